pub mod contact;
pub mod email;
pub mod group;
pub mod ids;
pub mod matching;
pub mod options;
pub mod phone;

pub use contact::{normalize_name, Contact, RawContact};
pub use email::normalize_email;
pub use group::{DuplicateGroup, MatchType};
pub use ids::{ContactId, GroupId};
pub use matching::MatchRules;
pub use options::MergeOptions;
pub use phone::{normalize_phone, phone_digits};
