use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::review::{ReviewStatus, ReviewType};
use crate::sentiment::Sentiment;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCategory {
    pub category: String,
    pub rating: u8, // 0-10 scale
    pub display_name: String,
}

/// The dashboard's canonical review, derived from a `RawReview` and an
/// approved-ID snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
    pub id: u64,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    pub overall_rating: Option<u8>,
    pub average_rating: Option<f64>, // 0-5 scale, derived from categories
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_review: Option<String>,
    pub categories: Vec<NormalizedCategory>,
    pub submitted_at: DateTime<Utc>,
    pub formatted_date: String,
    pub guest_name: String,
    pub listing_name: String,
    pub listing_id: String,
    pub channel: String,
    #[serde(default)]
    pub channel_icon: String,
    #[serde(default)]
    pub channel_label: String,
    pub is_approved_for_website: bool,
    pub sentiment: Sentiment,
}
