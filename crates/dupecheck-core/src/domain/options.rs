use serde::{Deserialize, Serialize};

/// Which duplicate data gets folded into the surviving record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOptions {
    #[serde(default = "default_true")]
    pub keep_tags: bool,
    #[serde(default = "default_true")]
    pub keep_notes: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            keep_tags: true,
            keep_notes: true,
        }
    }
}

fn default_true() -> bool {
    true
}
