use async_trait::async_trait;
use review_dash_models::{GoogleReview, RawReview};
use crate::error::SourceError;
use crate::traits::{GoogleReviewProvider, ReviewSource};

const MOCK_REVIEWS_JSON: &str = include_str!("../data/mock_reviews.json");
const MOCK_GOOGLE_REVIEWS_JSON: &str = include_str!("../data/mock_google_reviews.json");

/// Serves the bundled demo datasets. Used as the fallback when the real
/// providers are unavailable or have no data.
#[derive(Debug, Clone, Default)]
pub struct MockSource;

impl MockSource {
    pub fn new() -> Self {
        Self
    }

    pub fn hostaway_reviews() -> Result<Vec<RawReview>, SourceError> {
        serde_json::from_str(MOCK_REVIEWS_JSON).map_err(|e| SourceError::decode("mock", e))
    }

    pub fn google_reviews() -> Result<Vec<GoogleReview>, SourceError> {
        serde_json::from_str(MOCK_GOOGLE_REVIEWS_JSON).map_err(|e| SourceError::decode("mock-google", e))
    }
}

#[async_trait]
impl ReviewSource for MockSource {
    fn source_name(&self) -> &str {
        "mock"
    }

    async fn fetch_raw_reviews(&self) -> Result<Vec<RawReview>, SourceError> {
        Self::hostaway_reviews()
    }
}

#[async_trait]
impl GoogleReviewProvider for MockSource {
    fn source_name(&self) -> &str {
        "mock"
    }

    async fn fetch_raw_google_reviews(&self, _place_id: &str) -> Result<Vec<GoogleReview>, SourceError> {
        Self::google_reviews()
    }
}
