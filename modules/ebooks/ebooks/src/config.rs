use serde::{Deserialize, Serialize};

/// Configuration for the `ebooks` module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EbooksConfig {
    #[serde(default = "default_max_length")]
    pub max_title_length: usize,
    #[serde(default = "default_max_length")]
    pub max_author_length: usize,
}

impl Default for EbooksConfig {
    fn default() -> Self {
        Self {
            max_title_length: default_max_length(),
            max_author_length: default_max_length(),
        }
    }
}

fn default_max_length() -> usize {
    100
}
