use crate::domain::Contact;
use crate::rules::similarity::{phone_similarity, string_similarity};

/// Confidence (0-100) that every duplicate belongs with the anchor.
///
/// Each pair averages whichever of email, phone and name similarity can be
/// computed (both sides non-empty); the group score is the rounded mean over
/// all pairs.
pub fn score_group(anchor: &Contact, duplicates: &[Contact]) -> u8 {
    if duplicates.is_empty() {
        return 0;
    }

    let total: f64 = duplicates
        .iter()
        .map(|duplicate| pair_score(anchor, duplicate))
        .sum();
    let mean = total / duplicates.len() as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

/// Percentage similarity of a single pair, 0 when no factor applies.
pub fn pair_score(a: &Contact, b: &Contact) -> f64 {
    let mut score = 0.0;
    let mut factors = 0u32;

    if a.has_email() && b.has_email() {
        score += string_similarity(&a.email, &b.email);
        factors += 1;
    }
    if a.has_phone() && b.has_phone() {
        score += phone_similarity(&a.phone, &b.phone);
        factors += 1;
    }
    if a.has_name() && b.has_name() {
        score += string_similarity(&a.name, &b.name);
        factors += 1;
    }

    if factors == 0 {
        return 0.0;
    }
    score / f64::from(factors) * 100.0
}
