use async_trait::async_trait;
use review_dash_models::{GoogleReview, RawReview};
use tracing::{info, warn};
use crate::error::SourceError;
use crate::traits::{GoogleReviewProvider, ReviewSource};

/// Which provider served a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Primary,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub origin: Origin,
    pub served_by: String,
}

/// Serves `fallback` whenever `primary` fails or comes back empty.
///
/// The substitution is logged and reported through `Origin`, never hidden.
/// A failing fallback is returned to the caller as-is.
pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
    name: String,
}

impl<P, F> FallbackSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            name: "fallback".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<P: ReviewSource, F: ReviewSource> FallbackSource<P, F> {
    pub async fn fetch_with_origin(&self) -> Result<Fetched<RawReview>, SourceError> {
        match self.primary.fetch_raw_reviews().await {
            Ok(records) if !records.is_empty() => {
                info!("Fetched {} reviews from {}", records.len(), self.primary.source_name());
                return Ok(Fetched {
                    records,
                    origin: Origin::Primary,
                    served_by: self.primary.source_name().to_string(),
                });
            }
            Ok(_) => warn!(
                "{} returned no reviews, serving {} data",
                self.primary.source_name(),
                self.fallback.source_name()
            ),
            Err(e) => warn!(
                "{} fetch failed ({}), serving {} data",
                self.primary.source_name(),
                e,
                self.fallback.source_name()
            ),
        }

        let records = self.fallback.fetch_raw_reviews().await?;
        Ok(Fetched {
            records,
            origin: Origin::Fallback,
            served_by: self.fallback.source_name().to_string(),
        })
    }
}

impl<P: GoogleReviewProvider, F: GoogleReviewProvider> FallbackSource<P, F> {
    pub async fn fetch_google_with_origin(&self, place_id: &str) -> Result<Fetched<GoogleReview>, SourceError> {
        let primary_name = GoogleReviewProvider::source_name(&self.primary);
        let fallback_name = GoogleReviewProvider::source_name(&self.fallback);

        match self.primary.fetch_raw_google_reviews(place_id).await {
            Ok(records) if !records.is_empty() => {
                return Ok(Fetched {
                    records,
                    origin: Origin::Primary,
                    served_by: primary_name.to_string(),
                });
            }
            Ok(_) => warn!("{} returned no reviews for {}, serving {} data", primary_name, place_id, fallback_name),
            Err(e) => warn!("{} fetch failed for {} ({}), serving {} data", primary_name, place_id, e, fallback_name),
        }

        let records = self.fallback.fetch_raw_google_reviews(place_id).await?;
        Ok(Fetched {
            records,
            origin: Origin::Fallback,
            served_by: fallback_name.to_string(),
        })
    }
}

#[async_trait]
impl<P: ReviewSource, F: ReviewSource> ReviewSource for FallbackSource<P, F> {
    fn source_name(&self) -> &str {
        &self.name
    }

    async fn fetch_raw_reviews(&self) -> Result<Vec<RawReview>, SourceError> {
        Ok(self.fetch_with_origin().await?.records)
    }
}

#[async_trait]
impl<P: GoogleReviewProvider, F: GoogleReviewProvider> GoogleReviewProvider for FallbackSource<P, F> {
    fn source_name(&self) -> &str {
        &self.name
    }

    async fn fetch_raw_google_reviews(&self, place_id: &str) -> Result<Vec<GoogleReview>, SourceError> {
        Ok(self.fetch_google_with_origin(place_id).await?.records)
    }
}
