use crate::domain::email::normalize_email;
use crate::domain::ids::ContactId;
use crate::domain::phone::normalize_phone;
use serde::{Deserialize, Serialize};

/// A contact after normalization. Absent values are empty strings, never `None`,
/// so every comparison can check emptiness instead of presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub last_activity: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
}

impl Contact {
    pub fn new(id: impl Into<ContactId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }

    pub fn has_phone(&self) -> bool {
        !self.phone.is_empty()
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A contact record as exported by the upstream CRM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContact {
    pub id: ContactId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub last_activity_at: Option<String>,
    pub date_added: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub company_name: Option<String>,
    pub position: Option<String>,
    #[serde(alias = "address")]
    pub address1: Option<String>,
}

impl RawContact {
    pub fn normalize(self) -> Contact {
        let name = normalize_name(self.first_name.as_deref(), self.last_name.as_deref());
        let email = normalize_email(self.email.as_deref());
        let phone = self
            .phone
            .as_deref()
            .map(normalize_phone)
            .unwrap_or_default();
        let last_activity = self
            .last_activity_at
            .filter(|value| !value.is_empty())
            .or(self.date_added)
            .unwrap_or_default();

        Contact {
            id: self.id,
            name,
            email,
            phone,
            last_activity,
            tags: self.tags.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            company: self.company_name.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            address: self.address1.unwrap_or_default(),
        }
    }
}

pub fn normalize_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default())
        .trim()
        .to_string()
}
