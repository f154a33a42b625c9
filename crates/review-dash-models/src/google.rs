use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Google Places (v1) review payloads

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoogleText {
    pub text: String,
    #[serde(default)]
    pub language_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAuthorAttribution {
    pub display_name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub photo_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoogleReview {
    pub name: String,
    #[serde(default)]
    pub relative_publish_time_description: String,
    pub rating: u8,
    #[serde(default)]
    pub text: Option<GoogleText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<GoogleText>,
    pub author_attribution: GoogleAuthorAttribution,
    pub publish_time: DateTime<Utc>, // RFC 3339 on the wire
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GooglePlaceDetails {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<GoogleText>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<u64>,
    #[serde(default)]
    pub reviews: Vec<GoogleReview>,
}
