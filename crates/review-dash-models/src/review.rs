use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a review: who wrote it about whom.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewType {
    GuestToHost,
    HostToGuest,
}

impl ReviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewType::GuestToHost => "guest-to-host",
            ReviewType::HostToGuest => "host-to-guest",
        }
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "guest-to-host" => Ok(ReviewType::GuestToHost),
            "host-to-guest" => Ok(ReviewType::HostToGuest),
            other => Err(format!("Invalid review type: {}. Use 'guest-to-host' or 'host-to-guest'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Published,
    Pending,
    Draft,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Published => "published",
            ReviewStatus::Pending => "pending",
            ReviewStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "published" => Ok(ReviewStatus::Published),
            "pending" => Ok(ReviewStatus::Pending),
            "draft" => Ok(ReviewStatus::Draft),
            other => Err(format!("Invalid review status: {}. Use 'published', 'pending', or 'draft'", other)),
        }
    }
}

/// One sub-score on the 0-10 scale, keyed by the source's category name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRating {
    pub category: String,
    pub rating: u8,
}

/// A review record as delivered by a property-management provider.
///
/// Field names follow the provider's wire format. `submitted_at` is parsed
/// while deserializing, so a record with a malformed timestamp is rejected
/// at the provider boundary instead of reaching normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    pub id: u64,
    #[serde(rename = "type")]
    pub review_type: ReviewType,
    pub status: ReviewStatus,
    pub rating: Option<u8>, // 1-5, null when the guest left no overall score
    #[serde(rename = "publicReview", default)]
    pub text: String,
    #[serde(rename = "reviewCategory", default)]
    pub category_ratings: Vec<CategoryRating>,
    #[serde(with = "crate::timestamp::source_local")]
    pub submitted_at: DateTime<Utc>,
    pub guest_name: String,
    pub listing_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_review: Option<String>,
}
