use crate::domain::{Contact, ContactId, DuplicateGroup, GroupId, MatchRules, MatchType};
use crate::rules::score::score_group;
use crate::rules::similarity::{edit_distance, phone_similarity, string_similarity};
use std::collections::HashSet;

/// Groups likely duplicates using the default match rules.
pub fn find_duplicates(contacts: &[Contact]) -> Vec<DuplicateGroup> {
    find_duplicates_with(contacts, &MatchRules::default())
}

/// Single greedy pass: each contact not yet claimed becomes an anchor and
/// claims every later unclaimed contact that matches *it*. Members are never
/// compared with each other, so the result depends on input order. Contacts
/// that match nothing are left out of the output.
pub fn find_duplicates_with(contacts: &[Contact], rules: &MatchRules) -> Vec<DuplicateGroup> {
    let mut groups = Vec::new();
    let mut processed: HashSet<&ContactId> = HashSet::new();

    for (i, anchor) in contacts.iter().enumerate() {
        if processed.contains(&anchor.id) {
            continue;
        }

        let matched: Vec<&Contact> = contacts[i + 1..]
            .iter()
            .filter(|candidate| !processed.contains(&candidate.id))
            .filter(|candidate| is_match(anchor, candidate, rules))
            .collect();

        if matched.is_empty() {
            continue;
        }

        processed.insert(&anchor.id);
        processed.extend(matched.iter().map(|&duplicate| &duplicate.id));

        let duplicates: Vec<Contact> = matched.into_iter().cloned().collect();
        let match_type = classify(anchor, &duplicates, rules);
        let similarity = score_group(anchor, &duplicates);
        let mut members = Vec::with_capacity(duplicates.len() + 1);
        members.push(anchor.clone());
        members.extend(duplicates);

        groups.push(DuplicateGroup {
            id: GroupId::for_anchor(i),
            contacts: members,
            match_type,
            similarity,
        });
    }

    groups
}

pub fn is_match(anchor: &Contact, candidate: &Contact, rules: &MatchRules) -> bool {
    (rules.use_email && emails_match(&anchor.email, &candidate.email, rules.email_max_distance))
        || (rules.use_phone
            && phones_match(&anchor.phone, &candidate.phone, rules.phone_min_similarity))
        || (rules.use_name
            && names_match(&anchor.name, &candidate.name, rules.name_min_similarity))
}

/// Identical, or within `max_distance` edits. Empty emails never match.
pub fn emails_match(a: &str, b: &str, max_distance: usize) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || edit_distance(a, b) <= max_distance
}

/// Empty phones never match. A digitless `"+"` still counts as a value.
pub fn phones_match(a: &str, b: &str, min_similarity: f64) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    phone_similarity(a, b) >= min_similarity
}

pub fn names_match(a: &str, b: &str, min_similarity: f64) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    string_similarity(a, b) >= min_similarity
}

// Any member that reached the anchor through the email predicate, exact or
// within the edit tolerance, makes it an email group. "both" is never produced.
fn classify(anchor: &Contact, duplicates: &[Contact], rules: &MatchRules) -> MatchType {
    let by_email = rules.use_email
        && duplicates
            .iter()
            .any(|d| emails_match(&anchor.email, &d.email, rules.email_max_distance));
    if by_email {
        MatchType::Email
    } else {
        MatchType::Phone
    }
}

#[cfg(test)]
mod tests {
    use super::{emails_match, find_duplicates, find_duplicates_with, phones_match};
    use crate::domain::{Contact, MatchRules, MatchType};

    fn contact(id: &str, name: &str, email: &str, phone: &str) -> Contact {
        Contact {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            ..Contact::new(id)
        }
    }

    fn ids(contacts: &[Contact]) -> Vec<&str> {
        contacts.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn email_predicate_tolerates_one_edit() {
        assert!(emails_match("j@x.com", "j@x.com", 1));
        assert!(emails_match("j@x.com", "j@x.co", 1));
        assert!(emails_match("jon@x.com", "jno@x.com", 2));
        assert!(!emails_match("jon@x.com", "jno@x.com", 1));
        assert!(!emails_match("", "", 1));
    }

    #[test]
    fn phone_predicate_requires_both_values() {
        assert!(phones_match("+15551234567", "+1 555 123 4567", 0.9));
        assert!(phones_match("+", "+", 0.9));
        assert!(!phones_match("+", "+15551234567", 0.9));
        assert!(!phones_match("", "+15551234567", 0.9));
        assert!(!phones_match("", "", 0.9));
    }

    #[test]
    fn one_character_email_typo_groups_by_email() {
        let contacts = vec![
            contact("1", "John", "j@x.com", ""),
            contact("2", "John", "j@x.co", ""),
            contact("3", "Jane", "", "+15551234567"),
        ];

        let groups = find_duplicates(&contacts);
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.id.as_str(), "group_0");
        assert_eq!(ids(&group.contacts), vec!["1", "2"]);
        assert_eq!(group.match_type, MatchType::Email);
        assert_eq!(group.similarity, 93);
    }

    #[test]
    fn exact_email_is_classified_as_email() {
        let contacts = vec![
            contact("1", "John", "j@x.com", ""),
            contact("2", "Johnny", "j@x.com", ""),
        ];
        let groups = find_duplicates(&contacts);
        assert_eq!(groups[0].match_type, MatchType::Email);
    }

    #[test]
    fn phone_match_groups_differently_formatted_numbers() {
        let contacts = vec![
            contact("a", "Ann", "", "+15551234567"),
            contact("b", "Bob", "bob@x.com", ""),
            contact("c", "Ann B", "", "+15551234567"),
        ];
        let groups = find_duplicates(&contacts);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0].contacts), vec!["a", "c"]);
        assert_eq!(groups[0].match_type, MatchType::Phone);
    }

    #[test]
    fn members_are_matched_against_anchor_only() {
        // B matches A by email, C matches A by phone, B and C share nothing.
        let contacts = vec![
            contact("A", "", "a@x.com", "+15551234567"),
            contact("B", "", "a@x.com", ""),
            contact("C", "", "", "+15551234567"),
        ];
        let groups = find_duplicates(&contacts);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0].contacts), vec!["A", "B", "C"]);
        assert_eq!(groups[0].match_type, MatchType::Email);
    }

    #[test]
    fn chains_are_not_transitively_closed() {
        // A~B by email, B~C by email, but A and C are two edits apart.
        let contacts = vec![
            contact("A", "", "ab@x.com", ""),
            contact("B", "", "abc@x.com", ""),
            contact("C", "", "abcd@x.com", ""),
        ];
        let groups = find_duplicates(&contacts);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0].contacts), vec!["A", "B"]);
    }

    #[test]
    fn grouping_depends_on_input_order() {
        let a = contact("A", "", "ab@x.com", "");
        let b = contact("B", "", "abc@x.com", "");
        let c = contact("C", "", "abcd@x.com", "");

        let forward = find_duplicates(&[a.clone(), b.clone(), c.clone()]);
        let middle_first = find_duplicates(&[b, a, c]);
        assert_eq!(ids(&forward[0].contacts), vec!["A", "B"]);
        assert_eq!(ids(&middle_first[0].contacts), vec!["B", "A", "C"]);
    }

    #[test]
    fn contacts_without_email_or_phone_never_group() {
        let contacts = vec![
            contact("1", "Same Name", "", ""),
            contact("2", "Same Name", "", ""),
            contact("3", "Same Name", "", ""),
        ];
        assert!(find_duplicates(&contacts).is_empty());
    }

    #[test]
    fn digitless_phones_still_match_each_other() {
        let contacts = vec![
            contact("a", "", "", "+"),
            contact("b", "", "", "+"),
            contact("c", "", "", "+15551234567"),
        ];
        let groups = find_duplicates(&contacts);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0].contacts), vec!["a", "b"]);
        assert_eq!(groups[0].match_type, MatchType::Phone);
        assert_eq!(groups[0].similarity, 100);
    }

    #[test]
    fn claimed_contacts_do_not_anchor_later_groups() {
        let contacts = vec![
            contact("1", "", "x@y.com", ""),
            contact("2", "", "x@y.com", "+15550001111"),
            contact("3", "", "", "+15550001111"),
        ];
        // 3 matches 2 by phone, but 2 was already claimed by 1 and 3 doesn't match 1.
        let groups = find_duplicates(&contacts);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0].contacts), vec!["1", "2"]);
    }

    #[test]
    fn group_ids_follow_anchor_positions() {
        let contacts = vec![
            contact("1", "", "solo@x.com", ""),
            contact("2", "", "pair@x.com", ""),
            contact("3", "", "pair@x.com", ""),
        ];
        let groups = find_duplicates(&contacts);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id.as_str(), "group_1");
    }

    #[test]
    fn repeated_runs_are_identical() {
        let contacts = vec![
            contact("1", "", "a@x.com", "+15551234567"),
            contact("2", "", "a@x.co", ""),
            contact("3", "", "", "+15551234567"),
            contact("4", "", "z@z.com", ""),
        ];
        assert_eq!(find_duplicates(&contacts), find_duplicates(&contacts));
    }

    #[test]
    fn name_matching_is_opt_in() {
        let contacts = vec![
            contact("1", "Katherine Johnson", "", ""),
            contact("2", "Katherine Jonson", "", ""),
        ];
        assert!(find_duplicates(&contacts).is_empty());

        let rules = MatchRules {
            use_name: true,
            ..MatchRules::default()
        };
        let groups = find_duplicates_with(&contacts, &rules);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].match_type, MatchType::Phone);
    }

    #[test]
    fn disabled_predicates_are_ignored() {
        let contacts = vec![
            contact("1", "", "a@x.com", ""),
            contact("2", "", "a@x.com", ""),
        ];
        let rules = MatchRules {
            use_email: false,
            ..MatchRules::default()
        };
        assert!(find_duplicates_with(&contacts, &rules).is_empty());
    }
}
