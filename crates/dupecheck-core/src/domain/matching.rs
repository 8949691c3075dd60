pub const DEFAULT_EMAIL_MAX_DISTANCE: usize = 1;
pub const DEFAULT_PHONE_MIN_SIMILARITY: f64 = 0.9;
pub const DEFAULT_NAME_MIN_SIMILARITY: f64 = 0.8;

/// Pairwise predicates used when deciding whether a contact joins an anchor's group.
///
/// The default enables email (one edit of tolerance) and phone (90% positional
/// digit agreement) matching and leaves name matching off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRules {
    pub use_email: bool,
    pub use_phone: bool,
    pub use_name: bool,
    pub email_max_distance: usize,
    pub phone_min_similarity: f64,
    pub name_min_similarity: f64,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            use_email: true,
            use_phone: true,
            use_name: false,
            email_max_distance: DEFAULT_EMAIL_MAX_DISTANCE,
            phone_min_similarity: DEFAULT_PHONE_MIN_SIMILARITY,
            name_min_similarity: DEFAULT_NAME_MIN_SIMILARITY,
        }
    }
}
