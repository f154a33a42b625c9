use chrono::{DateTime, Utc};
use review_dash_models::timestamp;
use review_dash_models::{NormalizedReview, ReviewStatus, ReviewType, Sentiment};
use serde::{Deserialize, Serialize};

/// Dashboard list constraints. Every field is optional and all present
/// fields must hold; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub listing_id: Option<String>,
    pub channel: Option<String>,
    #[serde(rename = "type")]
    pub review_type: Option<ReviewType>,
    pub status: Option<ReviewStatus>,
    pub min_rating: Option<u8>,
    pub max_rating: Option<u8>,
    #[serde(with = "timestamp::optional")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::optional")]
    pub date_to: Option<DateTime<Utc>>,
    pub sentiment: Option<Sentiment>,
    pub search_query: Option<String>,
    pub approved_only: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FilterCriteria {
    /// Apply the guest-to-host default when no review type was requested.
    pub fn with_default_type(mut self) -> Self {
        if self.review_type.is_none() {
            self.review_type = Some(ReviewType::GuestToHost);
        }
        self
    }

    pub fn matches(&self, review: &NormalizedReview) -> bool {
        if let Some(listing_id) = non_empty(&self.listing_id) {
            if review.listing_id != listing_id {
                return false;
            }
        }

        if let Some(channel) = non_empty(&self.channel) {
            if review.channel != channel {
                return false;
            }
        }

        if self.review_type.is_some_and(|t| review.review_type != t) {
            return false;
        }

        if self.status.is_some_and(|s| review.status != s) {
            return false;
        }

        // An unrated review never satisfies a rating bound.
        if let Some(min) = self.min_rating {
            match review.overall_rating {
                Some(rating) if rating >= min => {}
                _ => return false,
            }
        }

        if let Some(max) = self.max_rating {
            match review.overall_rating {
                Some(rating) if rating <= max => {}
                _ => return false,
            }
        }

        if self.date_from.is_some_and(|from| review.submitted_at < from) {
            return false;
        }

        if self.date_to.is_some_and(|to| review.submitted_at > to) {
            return false;
        }

        if self.sentiment.is_some_and(|s| review.sentiment != s) {
            return false;
        }

        if let Some(query) = non_empty(&self.search_query) {
            let haystack = format!("{} {} {}", review.text, review.guest_name, review.listing_name).to_lowercase();
            if !haystack.contains(&query.to_lowercase()) {
                return false;
            }
        }

        if self.approved_only && !review.is_approved_for_website {
            return false;
        }

        true
    }
}

/// Reviews matching `criteria`, in input order.
pub fn filter(reviews: &[NormalizedReview], criteria: &FilterCriteria) -> Vec<NormalizedReview> {
    reviews.iter().filter(|r| criteria.matches(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::test_support::{approved, raw_review, review_at};
    use review_dash_models::timestamp::parse_timestamp;

    fn sample() -> Vec<NormalizedReview> {
        vec![
            review_at(1, "Shoreditch Heights", Some(5), 0),
            review_at(2, "Shoreditch Heights", Some(3), 10),
            review_at(3, "Canary Wharf Tower", None, 20),
            review_at(4, "Canary Wharf Tower", Some(1), 30),
            review_at(5, "Soho Loft", Some(4), 40),
        ]
    }

    fn ids(reviews: &[NormalizedReview]) -> Vec<u64> {
        reviews.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let reviews = sample();
        assert_eq!(filter(&reviews, &FilterCriteria::default()), reviews);
        assert!(filter(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_rating_bounds_exclude_unrated() {
        let reviews = sample();
        let criteria = FilterCriteria { min_rating: Some(4), max_rating: Some(5), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &criteria)), vec![1, 5]);

        let max_only = FilterCriteria { max_rating: Some(5), ..Default::default() };
        assert!(!ids(&filter(&reviews, &max_only)).contains(&3));

        let min_only = FilterCriteria { min_rating: Some(1), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &min_only)), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_listing_and_channel_exact_match() {
        let mut reviews = sample();
        reviews[1].channel = "vrbo".to_string();

        let by_listing = FilterCriteria { listing_id: Some("canary-wharf-tower".to_string()), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &by_listing)), vec![3, 4]);

        let by_channel = FilterCriteria { channel: Some("vrbo".to_string()), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &by_channel)), vec![2]);

        let empty_channel = FilterCriteria { channel: Some(String::new()), ..Default::default() };
        assert_eq!(filter(&reviews, &empty_channel).len(), 5);
    }

    #[test]
    fn test_type_status_and_default_type() {
        let mut host_raw = raw_review(9, "Soho Loft", Some(5), &[]);
        host_raw.review_type = ReviewType::HostToGuest;
        host_raw.status = ReviewStatus::Pending;

        let mut reviews = sample();
        reviews.push(normalize(&host_raw, &approved(&[])));

        let defaulted = FilterCriteria::default().with_default_type();
        assert_eq!(defaulted.review_type, Some(ReviewType::GuestToHost));
        assert!(!ids(&filter(&reviews, &defaulted)).contains(&9));

        let explicit = FilterCriteria { review_type: Some(ReviewType::HostToGuest), ..Default::default() }.with_default_type();
        assert_eq!(ids(&filter(&reviews, &explicit)), vec![9]);

        let pending = FilterCriteria { status: Some(ReviewStatus::Pending), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &pending)), vec![9]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let reviews = sample();
        let from = reviews[2].submitted_at;
        let to = reviews[1].submitted_at;

        let criteria = FilterCriteria { date_from: Some(from), date_to: Some(to), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &criteria)), vec![2, 3]);

        let later = FilterCriteria { date_from: parse_timestamp("2030-01-01"), ..Default::default() };
        assert!(filter(&reviews, &later).is_empty());
    }

    #[test]
    fn test_sentiment_filter() {
        let reviews = sample();
        let neutral = FilterCriteria { sentiment: Some(Sentiment::Neutral), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &neutral)), vec![2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut reviews = sample();
        reviews[4].text = "Lovely QUIET street".to_string();

        let by_text = FilterCriteria { search_query: Some("quiet".to_string()), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &by_text)), vec![5]);

        let by_guest = FilterCriteria { search_query: Some("GUEST 4".to_string()), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &by_guest)), vec![4]);

        let by_listing = FilterCriteria { search_query: Some("wharf".to_string()), ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &by_listing)), vec![3, 4]);
    }

    #[test]
    fn test_approved_only() {
        let mut reviews = sample();
        reviews[0].is_approved_for_website = true;
        reviews[3].is_approved_for_website = true;

        let criteria = FilterCriteria { approved_only: true, ..Default::default() };
        assert_eq!(ids(&filter(&reviews, &criteria)), vec![1, 4]);
    }

    #[test]
    fn test_filter_is_idempotent_subset() {
        let reviews = sample();
        let criteria_sets = vec![
            FilterCriteria { min_rating: Some(3), ..Default::default() },
            FilterCriteria { search_query: Some("shoreditch".to_string()), max_rating: Some(4), ..Default::default() },
            FilterCriteria { sentiment: Some(Sentiment::Positive), approved_only: false, ..Default::default() },
        ];

        for criteria in criteria_sets {
            let once = filter(&reviews, &criteria);
            let twice = filter(&once, &criteria);
            assert_eq!(once, twice);
            assert!(once.iter().all(|r| reviews.contains(r)));
        }
    }

    #[test]
    fn test_criteria_deserialize_from_query_shape() {
        let criteria: FilterCriteria = serde_json::from_value(serde_json::json!({
            "listingId": "soho-loft",
            "type": "host-to-guest",
            "minRating": 2,
            "approvedOnly": true
        }))
        .unwrap();

        assert_eq!(criteria.listing_id.as_deref(), Some("soho-loft"));
        assert_eq!(criteria.review_type, Some(ReviewType::HostToGuest));
        assert_eq!(criteria.min_rating, Some(2));
        assert!(criteria.approved_only);
        assert!(criteria.search_query.is_none());
        assert!(criteria.date_from.is_none());
    }

    #[test]
    fn test_criteria_deserialize_date_bounds() {
        let criteria: FilterCriteria = serde_json::from_value(serde_json::json!({
            "dateFrom": "2024-11-01",
            "dateTo": "2024-11-15T10:30:00Z"
        }))
        .unwrap();
        assert_eq!(criteria.date_from, parse_timestamp("2024-11-01"));
        assert_eq!(criteria.date_to, parse_timestamp("2024-11-15 10:30:00"));

        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["dateFrom"], "2024-11-01T00:00:00+00:00");

        let cleared: FilterCriteria = serde_json::from_value(serde_json::json!({
            "dateFrom": "",
            "dateTo": null
        }))
        .unwrap();
        assert!(cleared.date_from.is_none() && cleared.date_to.is_none());

        let bad: Result<FilterCriteria, _> = serde_json::from_value(serde_json::json!({ "dateFrom": "soon" }));
        assert!(bad.is_err());
    }
}
