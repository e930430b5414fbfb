//! Provider wire shapes, deserialized straight from the Places details
//! response.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    /// Provider value, not yet validated against the 1..=5 domain.
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub text: String,
    /// Unix seconds.
    #[serde(default)]
    pub time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}
