use async_trait::async_trait;
use review_dash_models::{GoogleReview, RawReview};
use crate::error::SourceError;

/// A provider of review records in the native property-management shape.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_raw_reviews(&self) -> Result<Vec<RawReview>, SourceError>;
}

/// A provider of Google Places reviews for one place.
///
/// Records keep the Google schema; `google::to_raw_review` translates them
/// before they reach normalization.
#[async_trait]
pub trait GoogleReviewProvider: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_raw_google_reviews(&self, place_id: &str) -> Result<Vec<GoogleReview>, SourceError>;
}
