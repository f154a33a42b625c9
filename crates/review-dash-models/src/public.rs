use serde::{Deserialize, Serialize};
use crate::analytics::{category_map, CategoryAverage};
use crate::normalized::NormalizedCategory;

/// What the public property page shows for one approved review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicReview {
    pub id: u64,
    pub guest_name: String,
    pub rating: Option<u8>,
    pub review: String,
    pub date: String,
    pub listing_name: String,
    pub categories: Vec<NormalizedCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: usize,
    pub average_rating: f64,
    #[serde(with = "category_map")]
    pub category_averages: Vec<CategoryAverage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}
