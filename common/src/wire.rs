use serde::{Deserialize, Serialize};

/// One entry of the category listing endpoint (`api/categories`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: u64,
    pub title: String,
}

/// Full category data from `api/category?id=..`.
///
/// The remote API sends more fields per clue (airdate, value, source id);
/// everything not listed here is discarded on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub clues: Vec<ClueResponse>,
}

/// One clue as the remote API sends it. Question and answer can be null or
/// absent; normalization turns those into empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClueResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}
