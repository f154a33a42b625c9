use super::*;
use crate::normalize::normalize;
use crate::test_support::{approved, raw_review, review_at};

fn with_categories(id: u64, listing: &str, rating: Option<u8>, scores: &[u8]) -> NormalizedReview {
    normalize(&raw_review(id, listing, rating, scores), &approved(&[]))
}

/// Ratings given newest first; review i is i days old.
fn listing_with_ratings(listing: &str, ratings: &[Option<u8>]) -> Vec<NormalizedReview> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, rating)| review_at(i as u64 + 1, listing, *rating, i as i64))
        .collect()
}

#[test]
fn test_improving_trend() {
    let reviews = listing_with_ratings("Soho", &[Some(5), Some(5), Some(5), Some(3), Some(3), Some(3)]);
    let analytics = aggregate(&reviews);

    assert_eq!(analytics.len(), 1);
    assert_eq!(analytics[0].recent_trend, Trend::Improving);
}

#[test]
fn test_declining_trend() {
    let reviews = listing_with_ratings("Soho", &[Some(2), Some(3), Some(2), Some(5), Some(4), Some(5)]);
    assert_eq!(aggregate(&reviews)[0].recent_trend, Trend::Declining);
}

#[test]
fn test_trend_needs_six_reviews() {
    let reviews = listing_with_ratings("Soho", &[Some(5), Some(5), Some(5), Some(1), Some(1)]);
    assert_eq!(aggregate(&reviews)[0].recent_trend, Trend::Stable);
}

#[test]
fn test_trend_delta_boundary() {
    // 13/3 vs 12/3: a difference of 1/3 clears the 0.3 delta
    let reviews = listing_with_ratings("Soho", &[Some(5), Some(4), Some(4), Some(4), Some(4), Some(4)]);
    assert_eq!(aggregate(&reviews)[0].recent_trend, Trend::Improving);

    let reviews = listing_with_ratings("Soho", &[Some(4), Some(4), Some(4), Some(4), Some(4), Some(4)]);
    assert_eq!(aggregate(&reviews)[0].recent_trend, Trend::Stable);
}

#[test]
fn test_trend_counts_unrated_as_zero() {
    // Recent window sums to 10 but still divides by 3.
    let reviews = listing_with_ratings("Soho", &[Some(5), None, Some(5), Some(4), Some(4), Some(4)]);
    assert_eq!(aggregate(&reviews)[0].recent_trend, Trend::Declining);
}

#[test]
fn test_trend_orders_by_date_not_input() {
    let mut reviews = listing_with_ratings("Soho", &[Some(5), Some(5), Some(5), Some(3), Some(3), Some(3)]);
    reviews.reverse();
    assert_eq!(aggregate(&reviews)[0].recent_trend, Trend::Improving);
}

#[test]
fn test_average_rating_ignores_unrated() {
    let reviews = listing_with_ratings("Soho", &[Some(5), None, Some(4), Some(4)]);
    let analytics = aggregate(&reviews);

    assert_eq!(analytics[0].total_reviews, 4);
    assert_eq!(analytics[0].average_rating, 4.3);
}

#[test]
fn test_average_rating_zero_when_all_unrated() {
    let reviews = listing_with_ratings("Soho", &[None, None]);
    assert_eq!(aggregate(&reviews)[0].average_rating, 0.0);
}

#[test]
fn test_rating_distribution_zero_filled() {
    let reviews = listing_with_ratings("Soho", &[Some(5), Some(5), None, Some(2)]);
    let distribution = &aggregate(&reviews)[0].rating_distribution;

    let expected: BTreeMap<u8, usize> = [(1, 0), (2, 1), (3, 0), (4, 0), (5, 2)].into_iter().collect();
    assert_eq!(distribution, &expected);
}

#[test]
fn test_distribution_never_exceeds_total() {
    let mut reviews = listing_with_ratings("Soho", &[Some(5), None, Some(3), None, Some(1)]);
    reviews.extend(listing_with_ratings("Bank", &[Some(4), Some(4)]));

    for listing in aggregate(&reviews) {
        let counted: usize = listing.rating_distribution.values().sum();
        assert!(counted <= listing.total_reviews);
    }
}

#[test]
fn test_category_averages_and_top_issues() {
    let reviews = vec![
        with_categories(1, "Soho", Some(4), &[10, 7, 9]),
        with_categories(2, "Soho", Some(4), &[9, 8, 6]),
    ];
    let analytics = &aggregate(&reviews)[0];

    let names: Vec<&str> = analytics.category_averages.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, vec!["Cleanliness", "Communication", "Location"]);

    let averages: Vec<f64> = analytics.category_averages.iter().map(|c| c.average).collect();
    assert_eq!(averages, vec![9.5, 7.5, 7.5]);

    assert_eq!(analytics.top_issues, vec!["Communication", "Location"]);
}

#[test]
fn test_issue_uses_rounded_average() {
    // 199 / 25 = 7.96, rounded to 8.0
    let mut reviews: Vec<NormalizedReview> = (1..=24).map(|id| with_categories(id, "Soho", Some(4), &[8])).collect();
    reviews.push(with_categories(25, "Soho", Some(4), &[7]));
    let analytics = &aggregate(&reviews)[0];

    assert_eq!(analytics.category_averages[0].average, 8.0);
    assert!(analytics.top_issues.is_empty());

    reviews.push(with_categories(26, "Soho", Some(4), &[5]));
    assert_eq!(aggregate(&reviews)[0].top_issues, vec!["Cleanliness"]);
}

#[test]
fn test_host_reviews_excluded() {
    let mut host_raw = raw_review(99, "Soho", Some(1), &[2, 2]);
    host_raw.review_type = ReviewType::HostToGuest;
    let mut host_only = raw_review(100, "Bank", Some(1), &[]);
    host_only.review_type = ReviewType::HostToGuest;

    let reviews = vec![
        normalize(&host_raw, &approved(&[99])),
        with_categories(1, "Soho", Some(5), &[10]),
        normalize(&host_only, &approved(&[])),
    ];
    let analytics = aggregate(&reviews);

    assert_eq!(analytics.len(), 1);
    assert_eq!(analytics[0].listing_id, "soho");
    assert_eq!(analytics[0].total_reviews, 1);
    assert_eq!(analytics[0].average_rating, 5.0);
    assert_eq!(analytics[0].approved_count, 0);
    assert!(analytics[0].top_issues.is_empty());
}

#[test]
fn test_listings_sorted_by_volume_then_first_seen() {
    let mut reviews = listing_with_ratings("Bank", &[Some(4)]);
    reviews.extend(listing_with_ratings("Soho", &[Some(4), Some(4), Some(4)]));
    reviews.extend(listing_with_ratings("Angel", &[Some(4)]));

    let order: Vec<String> = aggregate(&reviews).into_iter().map(|a| a.listing_id).collect();
    assert_eq!(order, vec!["soho", "bank", "angel"]);

    // A host-to-guest review alone fixes where its listing lands among equals.
    let mut host = review_at(10, "Bank", Some(5), 0);
    host.review_type = ReviewType::HostToGuest;
    let reviews = vec![
        host,
        review_at(11, "Angel", Some(4), 1),
        review_at(12, "Bank", Some(4), 2),
    ];

    let analytics = aggregate(&reviews);
    let order: Vec<&str> = analytics.iter().map(|a| a.listing_id.as_str()).collect();
    assert_eq!(order, vec!["bank", "angel"]);
    assert_eq!(analytics[0].total_reviews, 1);
}

#[test]
fn test_approved_and_channel_counts() {
    let mut raws = vec![
        raw_review(1, "Soho", Some(5), &[]),
        raw_review(2, "Soho", Some(4), &[]),
        raw_review(3, "Soho", Some(3), &[]),
    ];
    raws[1].channel = Some("vrbo".to_string());
    raws[2].channel = None;

    let reviews: Vec<NormalizedReview> = raws.iter().map(|r| normalize(r, &approved(&[1, 3]))).collect();
    let analytics = &aggregate(&reviews)[0];

    assert_eq!(analytics.approved_count, 2);
    let expected: BTreeMap<String, usize> = [("airbnb", 1), ("direct", 1), ("vrbo", 1)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    assert_eq!(analytics.channel_breakdown, expected);
}

#[test]
fn test_empty_input() {
    assert!(aggregate(&[]).is_empty());
}
