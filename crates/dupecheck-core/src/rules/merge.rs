use crate::domain::{Contact, ContactId, MergeOptions};
use crate::error::CoreError;
use crate::time::parse_activity_timestamp;
use std::collections::HashSet;

const NOTE_SEPARATOR: &str = "\n\n";

/// Builds the surviving record for a merge.
///
/// The master is copied as-is. Only tags and notes can pick up duplicate data,
/// and only when the matching option is set; every other field keeps the
/// master's value even when it is empty.
pub fn merge_contact_data(
    master: &Contact,
    duplicates: &[Contact],
    options: MergeOptions,
) -> Contact {
    let mut merged = master.clone();

    if options.keep_tags {
        merged.tags = union_tags(master, duplicates);
    }

    if options.keep_notes {
        merged.notes = join_notes(master, duplicates);
    }

    merged
}

/// The merge result as shown for review: the authoritative merge, with empty
/// supplementary fields filled from the first duplicate that has a value.
///
/// This is not what gets written back; use [`merge_contact_data`] for that.
pub fn preview_merge(master: &Contact, duplicates: &[Contact], options: MergeOptions) -> Contact {
    let mut merged = merge_contact_data(master, duplicates, options);
    fill_from(&mut merged.company, duplicates, |c| &c.company);
    fill_from(&mut merged.position, duplicates, |c| &c.position);
    fill_from(&mut merged.address, duplicates, |c| &c.address);
    fill_from(&mut merged.notes, duplicates, |c| &c.notes);
    merged
}

fn union_tags(master: &Contact, duplicates: &[Contact]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut tags = Vec::new();
    let all = master
        .tags
        .iter()
        .chain(duplicates.iter().flat_map(|d| d.tags.iter()));
    for tag in all {
        if seen.insert(tag.as_str()) {
            tags.push(tag.clone());
        }
    }
    tags
}

fn join_notes(master: &Contact, duplicates: &[Contact]) -> String {
    std::iter::once(master.notes.as_str())
        .chain(duplicates.iter().map(|d| d.notes.as_str()))
        .filter(|note| !note.is_empty())
        .collect::<Vec<_>>()
        .join(NOTE_SEPARATOR)
}

fn fill_from<F>(target: &mut String, duplicates: &[Contact], field: F)
where
    F: Fn(&Contact) -> &String,
{
    if !target.is_empty() {
        return;
    }
    if let Some(value) = duplicates.iter().map(&field).find(|v| !v.is_empty()) {
        target.clone_from(value);
    }
}

/// Picks the member with the most recent `last_activity`.
///
/// Unparseable or empty timestamps rank below any parseable one; ties keep the
/// earlier member.
pub fn select_default_master(contacts: &[Contact]) -> Option<&Contact> {
    let mut best: Option<(&Contact, Option<i64>)> = None;
    for contact in contacts {
        let ts = parse_activity_timestamp(&contact.last_activity).ok();
        best = match best {
            Some((current, current_ts)) if current_ts >= ts => Some((current, current_ts)),
            _ => Some((contact, ts)),
        };
    }
    best.map(|(contact, _)| contact)
}

/// A master and its duplicates, looked up by id before a merge runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSelection<'a> {
    pub master: &'a Contact,
    pub duplicates: Vec<&'a Contact>,
}

impl<'a> MergeSelection<'a> {
    /// Fails without a partial result if the master or any duplicate is missing.
    pub fn resolve(
        contacts: &'a [Contact],
        master_id: &ContactId,
        duplicate_ids: &[ContactId],
    ) -> Result<Self, CoreError> {
        if duplicate_ids.is_empty() {
            return Err(CoreError::NoDuplicates);
        }
        if duplicate_ids.contains(master_id) {
            return Err(CoreError::MasterInDuplicates(master_id.to_string()));
        }

        let master = find(contacts, master_id)
            .ok_or_else(|| CoreError::MasterNotFound(master_id.to_string()))?;

        let mut seen: HashSet<&ContactId> = HashSet::new();
        let mut duplicates = Vec::with_capacity(duplicate_ids.len());
        for id in duplicate_ids {
            if !seen.insert(id) {
                continue;
            }
            let contact =
                find(contacts, id).ok_or_else(|| CoreError::DuplicateNotFound(id.to_string()))?;
            duplicates.push(contact);
        }

        Ok(Self { master, duplicates })
    }

    pub fn merge(&self, options: MergeOptions) -> Contact {
        merge_contact_data(self.master, &self.owned_duplicates(), options)
    }

    pub fn preview(&self, options: MergeOptions) -> Contact {
        preview_merge(self.master, &self.owned_duplicates(), options)
    }

    pub fn duplicate_ids(&self) -> Vec<&ContactId> {
        self.duplicates.iter().map(|c| &c.id).collect()
    }

    fn owned_duplicates(&self) -> Vec<Contact> {
        self.duplicates.iter().map(|&c| c.clone()).collect()
    }
}

fn find<'a>(contacts: &'a [Contact], id: &ContactId) -> Option<&'a Contact> {
    contacts.iter().find(|contact| &contact.id == id)
}

#[cfg(test)]
mod tests {
    use super::{merge_contact_data, preview_merge, select_default_master, MergeSelection};
    use crate::domain::{Contact, ContactId, MergeOptions};
    use crate::error::CoreError;

    fn with_tags(id: &str, tags: &[&str]) -> Contact {
        Contact {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Contact::new(id)
        }
    }

    fn with_notes(id: &str, notes: &str) -> Contact {
        Contact {
            notes: notes.to_string(),
            ..Contact::new(id)
        }
    }

    fn with_activity(id: &str, last_activity: &str) -> Contact {
        Contact {
            last_activity: last_activity.to_string(),
            ..Contact::new(id)
        }
    }

    const TAGS_ONLY: MergeOptions = MergeOptions {
        keep_tags: true,
        keep_notes: false,
    };
    const NOTES_ONLY: MergeOptions = MergeOptions {
        keep_tags: false,
        keep_notes: true,
    };

    #[test]
    fn keep_tags_takes_ordered_union() {
        let master = with_tags("m", &["a", "b"]);
        let dupes = vec![with_tags("d1", &["b", "c"]), with_tags("d2", &["a", "d", "d"])];
        let merged = merge_contact_data(&master, &dupes, TAGS_ONLY);
        assert_eq!(merged.tags, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn tags_untouched_without_keep_tags() {
        let master = with_tags("m", &["a", "a"]);
        let dupes = vec![with_tags("d", &["z"])];
        let merged = merge_contact_data(&master, &dupes, NOTES_ONLY);
        assert_eq!(merged.tags, vec!["a", "a"]);
    }

    #[test]
    fn keep_notes_skips_empty_notes() {
        let master = with_notes("m", "");
        let dupes = vec![with_notes("d1", ""), with_notes("d2", "hello")];
        let merged = merge_contact_data(&master, &dupes, NOTES_ONLY);
        assert_eq!(merged.notes, "hello");
    }

    #[test]
    fn keep_notes_joins_with_blank_line() {
        let master = with_notes("m", "first");
        let dupes = vec![with_notes("d1", "second"), with_notes("d2", "third")];
        let merged = merge_contact_data(&master, &dupes, NOTES_ONLY);
        assert_eq!(merged.notes, "first\n\nsecond\n\nthird");
    }

    #[test]
    fn all_empty_notes_stay_empty() {
        let master = with_notes("m", "");
        let dupes = vec![with_notes("d1", ""), with_notes("d2", "")];
        assert_eq!(merge_contact_data(&master, &dupes, NOTES_ONLY).notes, "");
    }

    #[test]
    fn master_fields_always_win() {
        let master = Contact {
            name: "Ada".to_string(),
            email: String::new(),
            ..Contact::new("m")
        };
        let dupe = Contact {
            name: "Ada L".to_string(),
            email: "ada@x.com".to_string(),
            phone: "+15551234567".to_string(),
            company: "Engines".to_string(),
            ..Contact::new("d")
        };
        let merged = merge_contact_data(&master, &[dupe], MergeOptions::default());
        assert_eq!(merged.id.as_str(), "m");
        assert_eq!(merged.name, "Ada");
        assert_eq!(merged.email, "");
        assert_eq!(merged.phone, "");
        assert_eq!(merged.company, "");
    }

    #[test]
    fn preview_fills_missing_supplementary_fields() {
        let master = Contact {
            company: "Keep".to_string(),
            ..Contact::new("m")
        };
        let dupes = vec![
            Contact {
                company: "Drop".to_string(),
                position: String::new(),
                ..Contact::new("d1")
            },
            Contact {
                position: "Engineer".to_string(),
                address: "1 Main St".to_string(),
                notes: "met at conf".to_string(),
                email: "not@copied.com".to_string(),
                ..Contact::new("d2")
            },
        ];
        let preview = preview_merge(&master, &dupes, TAGS_ONLY);
        assert_eq!(preview.company, "Keep");
        assert_eq!(preview.position, "Engineer");
        assert_eq!(preview.address, "1 Main St");
        assert_eq!(preview.notes, "met at conf");
        assert_eq!(preview.email, "");
    }

    #[test]
    fn default_master_is_most_recent() {
        let contacts = vec![
            with_activity("old", "2024-11-20T14:45:00Z"),
            with_activity("new", "2025-01-15T10:30:00Z"),
            with_activity("junk", "yesterday"),
        ];
        let master = select_default_master(&contacts).unwrap();
        assert_eq!(master.id.as_str(), "new");
    }

    #[test]
    fn default_master_ties_keep_group_order() {
        let contacts = vec![with_activity("a", ""), with_activity("b", "nope")];
        assert_eq!(select_default_master(&contacts).unwrap().id.as_str(), "a");
        assert!(select_default_master(&[]).is_none());
    }

    fn ids(values: &[&str]) -> Vec<ContactId> {
        values.iter().map(|v| ContactId::from(*v)).collect()
    }

    #[test]
    fn selection_resolves_in_requested_order() {
        let contacts = vec![Contact::new("1"), Contact::new("2"), Contact::new("3")];
        let selection =
            MergeSelection::resolve(&contacts, &"2".into(), &ids(&["3", "1", "3"])).unwrap();
        assert_eq!(selection.master.id.as_str(), "2");
        let dupes: Vec<&str> = selection
            .duplicates
            .iter()
            .map(|contact| contact.id.as_str())
            .collect();
        assert_eq!(dupes, vec!["3", "1"]);
    }

    #[test]
    fn selection_rejects_missing_master() {
        let contacts = vec![Contact::new("1")];
        let err = MergeSelection::resolve(&contacts, &"9".into(), &ids(&["1"])).unwrap_err();
        assert_eq!(err, CoreError::MasterNotFound("9".to_string()));
    }

    #[test]
    fn selection_aborts_on_any_missing_duplicate() {
        let contacts = vec![Contact::new("1"), Contact::new("2")];
        let err = MergeSelection::resolve(&contacts, &"1".into(), &ids(&["2", "404"])).unwrap_err();
        assert_eq!(err, CoreError::DuplicateNotFound("404".to_string()));
    }

    #[test]
    fn selection_rejects_degenerate_requests() {
        let contacts = vec![Contact::new("1"), Contact::new("2")];
        assert_eq!(
            MergeSelection::resolve(&contacts, &"1".into(), &[]).unwrap_err(),
            CoreError::NoDuplicates
        );
        assert_eq!(
            MergeSelection::resolve(&contacts, &"1".into(), &ids(&["1"])).unwrap_err(),
            CoreError::MasterInDuplicates("1".to_string())
        );
    }

    #[test]
    fn selection_merge_uses_resolver() {
        let contacts = vec![with_tags("1", &["a"]), with_tags("2", &["b"])];
        let selection = MergeSelection::resolve(&contacts, &"1".into(), &ids(&["2"])).unwrap();
        assert_eq!(selection.merge(TAGS_ONLY).tags, vec!["a", "b"]);
    }
}
