use chrono::{DateTime, Duration, TimeZone, Utc};
use review_dash_models::{CategoryRating, NormalizedReview, RawReview, ReviewStatus, ReviewType};
use crate::approval::ApprovedIds;
use crate::normalize::normalize;

const CATEGORY_KEYS: &[&str] = &["cleanliness", "communication", "location", "value", "accuracy"];

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 15, 14, 30, 0).unwrap()
}

pub fn approved(ids: &[u64]) -> ApprovedIds {
    ids.iter().copied().collect()
}

/// Guest-to-host review; category scores are assigned to the standard keys in order.
pub fn raw_review(id: u64, listing_name: &str, rating: Option<u8>, category_scores: &[u8]) -> RawReview {
    RawReview {
        id,
        review_type: ReviewType::GuestToHost,
        status: ReviewStatus::Published,
        rating,
        text: format!("Review text {}", id),
        category_ratings: category_scores
            .iter()
            .zip(CATEGORY_KEYS.iter().cycle())
            .map(|(score, key)| CategoryRating { category: key.to_string(), rating: *score })
            .collect(),
        submitted_at: base_time(),
        guest_name: format!("Guest {}", id),
        listing_name: listing_name.to_string(),
        channel: Some("airbnb".to_string()),
        reservation_id: None,
        private_review: None,
    }
}

pub fn review(id: u64, listing_name: &str, rating: Option<u8>) -> NormalizedReview {
    normalize(&raw_review(id, listing_name, rating, &[]), &approved(&[]))
}

/// Normalized review submitted `days_ago` days before `base_time()`.
pub fn review_at(id: u64, listing_name: &str, rating: Option<u8>, days_ago: i64) -> NormalizedReview {
    let mut raw = raw_review(id, listing_name, rating, &[]);
    raw.submitted_at = base_time() - Duration::days(days_ago);
    normalize(&raw, &approved(&[]))
}
