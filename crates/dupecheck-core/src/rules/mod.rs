pub mod cluster;
pub mod merge;
pub mod score;
pub mod similarity;

pub use cluster::{
    emails_match, find_duplicates, find_duplicates_with, is_match, names_match, phones_match,
};
pub use merge::{merge_contact_data, preview_merge, select_default_master, MergeSelection};
pub use score::{pair_score, score_group};
pub use similarity::{edit_distance, phone_similarity, string_similarity};
