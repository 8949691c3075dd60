use crate::domain::contact::Contact;
use crate::domain::ids::GroupId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Email,
    Phone,
    /// Kept for consumers of the shared type model; clustering never produces it.
    Both,
}

impl MatchType {
    pub const fn as_str(self) -> &'static str {
        match self {
            MatchType::Email => "email",
            MatchType::Phone => "phone",
            MatchType::Both => "both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email" => Some(MatchType::Email),
            "phone" => Some(MatchType::Phone),
            "both" => Some(MatchType::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub id: GroupId,
    /// Anchor first, then its matches in scan order.
    pub contacts: Vec<Contact>,
    pub match_type: MatchType,
    pub similarity: u8,
}

impl DuplicateGroup {
    pub fn anchor(&self) -> Option<&Contact> {
        self.contacts.first()
    }

    pub fn duplicates(&self) -> &[Contact] {
        self.contacts.get(1..).unwrap_or_default()
    }

    /// Case-insensitive substring search over member names, emails, phones and tags.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.contacts.iter().any(|contact| {
            contact.name.to_lowercase().contains(&needle)
                || contact.email.to_lowercase().contains(&needle)
                || contact.phone.to_lowercase().contains(&needle)
                || contact
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
    }
}
