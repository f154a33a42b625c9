use async_trait::async_trait;
use reqwest::Client;
use review_dash_models::{CategoryRating, GooglePlaceDetails, GoogleReview, RawReview, ReviewStatus, ReviewType};
use std::time::Duration;
use tracing::debug;
use crate::error::SourceError;
use crate::traits::{GoogleReviewProvider, ReviewSource};

/// Synthetic ids for Google reviews start here so they never collide with
/// property-management review ids.
pub const GOOGLE_ID_BASE: u64 = 9_000_000_000;

const GOOGLE_FIELDS: &str = "id,displayName,rating,userRatingCount,reviews";

pub struct GoogleSource {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    place_id: Option<String>,
    listing_name: String,
}

impl GoogleSource {
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        place_id: Option<String>,
        listing_name: String,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            place_id,
            listing_name,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl GoogleReviewProvider for GoogleSource {
    fn source_name(&self) -> &str {
        "google"
    }

    async fn fetch_raw_google_reviews(&self, place_id: &str) -> Result<Vec<GoogleReview>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SourceError::NotConfigured("google".to_string()))?;
        if place_id.trim().is_empty() {
            return Err(SourceError::NotConfigured("google place_id".to_string()));
        }

        let url = format!("{}/{}?fields={}", self.api_url, place_id, GOOGLE_FIELDS);
        debug!("Fetching Google reviews for place {}", place_id);

        let response = self
            .client
            .get(&url)
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", GOOGLE_FIELDS)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                source_name: "google".to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let details: GooglePlaceDetails =
            serde_json::from_str(&body).map_err(|e| SourceError::decode("google", e))?;

        if details.reviews.is_empty() {
            return Err(SourceError::Empty("google".to_string()));
        }

        debug!("Google returned {} reviews for place {}", details.reviews.len(), details.id);
        Ok(details.reviews)
    }
}

#[async_trait]
impl ReviewSource for GoogleSource {
    fn source_name(&self) -> &str {
        "google"
    }

    async fn fetch_raw_reviews(&self) -> Result<Vec<RawReview>, SourceError> {
        let place_id = self
            .place_id
            .as_deref()
            .ok_or_else(|| SourceError::NotConfigured("google place_id".to_string()))?;
        let reviews = self.fetch_raw_google_reviews(place_id).await?;
        Ok(reviews.iter().map(|r| to_raw_review(r, &self.listing_name)).collect())
    }
}

/// Translate one Google review into the native review shape.
///
/// Google only carries an overall 1-5 score, so the category list holds a
/// single `overall` entry on the 0-10 scale.
pub fn to_raw_review(review: &GoogleReview, listing_name: &str) -> RawReview {
    let rating = review.rating.clamp(1, 5);

    let text = review
        .text
        .as_ref()
        .or(review.original_text.as_ref())
        .map(|t| t.text.clone())
        .unwrap_or_default();

    RawReview {
        id: google_review_id(&review.name),
        review_type: ReviewType::GuestToHost,
        status: ReviewStatus::Published,
        rating: Some(rating),
        text,
        category_ratings: vec![CategoryRating {
            category: "overall".to_string(),
            rating: rating * 2,
        }],
        submitted_at: review.publish_time,
        guest_name: review.author_attribution.display_name.clone(),
        listing_name: listing_name.to_string(),
        channel: Some("google".to_string()),
        reservation_id: None,
        private_review: None,
    }
}

/// Stable id derived from the review resource name (FNV-1a), so approvals
/// stay attached to the same review across fetches.
fn google_review_id(name: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = name.bytes().fold(FNV_OFFSET, |acc, byte| {
        (acc ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    GOOGLE_ID_BASE + hash % GOOGLE_ID_BASE
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_dash_models::{GoogleAuthorAttribution, GoogleText};

    fn google_review(name: &str, rating: u8) -> GoogleReview {
        GoogleReview {
            name: name.to_string(),
            relative_publish_time_description: "2 weeks ago".to_string(),
            rating,
            text: Some(GoogleText { text: "Lovely flat".to_string(), language_code: "en".to_string() }),
            original_text: None,
            author_attribution: GoogleAuthorAttribution {
                display_name: "Sarah M.".to_string(),
                uri: String::new(),
                photo_uri: String::new(),
            },
            publish_time: "2024-11-15T10:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_to_raw_review_preserves_required_fields() {
        let raw = to_raw_review(&google_review("places/abc/reviews/1", 4), "Shoreditch Heights");

        assert_eq!(raw.rating, Some(4));
        assert_eq!(raw.text, "Lovely flat");
        assert_eq!(raw.guest_name, "Sarah M.");
        assert_eq!(raw.listing_name, "Shoreditch Heights");
        assert_eq!(raw.submitted_at.to_rfc3339(), "2024-11-15T10:30:00+00:00");
        assert_eq!(raw.channel.as_deref(), Some("google"));
        assert_eq!(raw.review_type, ReviewType::GuestToHost);
        assert_eq!(raw.status, ReviewStatus::Published);
        assert_eq!(
            raw.category_ratings,
            vec![CategoryRating { category: "overall".to_string(), rating: 8 }]
        );
    }

    #[test]
    fn test_to_raw_review_clamps_rating() {
        assert_eq!(to_raw_review(&google_review("a", 0), "L").rating, Some(1));
        assert_eq!(to_raw_review(&google_review("b", 9), "L").rating, Some(5));
    }

    #[test]
    fn test_to_raw_review_falls_back_to_original_text() {
        let mut review = google_review("a", 5);
        review.text = None;
        review.original_text = Some(GoogleText { text: "Original".to_string(), language_code: "de".to_string() });
        assert_eq!(to_raw_review(&review, "L").text, "Original");

        review.original_text = None;
        assert_eq!(to_raw_review(&review, "L").text, "");
    }

    #[test]
    fn test_google_ids_are_stable_and_distinct() {
        let first = to_raw_review(&google_review("places/abc/reviews/1", 5), "L");
        let again = to_raw_review(&google_review("places/abc/reviews/1", 5), "L");
        let other = to_raw_review(&google_review("places/abc/reviews/2", 5), "L");

        assert_eq!(first.id, again.id);
        assert_ne!(first.id, other.id);
        assert!(first.id >= GOOGLE_ID_BASE);
    }

    #[tokio::test]
    async fn test_fetch_without_api_key_is_not_configured() {
        let source = GoogleSource::new(
            "https://places.example.test/v1/places".to_string(),
            None,
            None,
            "Property".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert!(!source.is_configured());
        let err = source.fetch_raw_google_reviews("ChIJ123").await.unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured(_)));
    }
}
