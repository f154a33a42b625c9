// Raw provider records -> dashboard reviews

use review_dash_models::timestamp::format_display_date;
use review_dash_models::{CategoryRating, NormalizedCategory, NormalizedReview, RawReview};
use std::collections::BTreeMap;
use crate::approval::ApprovedIds;
use crate::sentiment::classify;

pub const DEFAULT_CHANNEL: &str = "direct";

const CATEGORY_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("cleanliness", "Cleanliness"),
    ("communication", "Communication"),
    ("location", "Location"),
    ("value", "Value"),
    ("accuracy", "Accuracy"),
    ("check_in", "Check-in"),
    ("respect_house_rules", "House Rules"),
    ("amenities", "Amenities"),
];

// (key, icon, label)
const CHANNEL_INFO: &[(&str, &str, &str)] = &[
    ("airbnb", "🏠", "Airbnb"),
    ("booking.com", "🅱️", "Booking.com"),
    ("vrbo", "🏡", "VRBO"),
    ("direct", "🔗", "Direct Booking"),
    ("expedia", "✈️", "Expedia"),
    ("google", "🌐", "Google"),
];

/// Display label for a category key; unmapped keys pass through unchanged.
pub fn category_display_name(category: &str) -> String {
    CATEGORY_DISPLAY_NAMES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| category.to_string())
}

/// Icon and label for a channel key, if known.
pub fn channel_info(channel: &str) -> Option<(&'static str, &'static str)> {
    CHANNEL_INFO
        .iter()
        .find(|(key, _, _)| *key == channel)
        .map(|(_, icon, label)| (*icon, *label))
}

/// Slug for a listing name: lowercase, every run of characters outside
/// `[a-z0-9]` collapsed to one hyphen.
///
/// Distinct names can share a slug; see `detect_slug_collisions`.
pub fn listing_id(listing_name: &str) -> String {
    let mut slug = String::with_capacity(listing_name.len());
    let mut in_separator = false;

    for c in listing_name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }

    slug
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of the 0-10 category scores converted to the 0-5 scale, one decimal.
pub fn average_category_rating(categories: &[CategoryRating]) -> Option<f64> {
    if categories.is_empty() {
        return None;
    }

    let sum: u32 = categories.iter().map(|c| u32::from(c.rating)).sum();
    let mean = f64::from(sum) / categories.len() as f64;
    Some(round_to_tenth(mean / 2.0))
}

fn normalize_channel(channel: Option<&str>) -> String {
    channel
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CHANNEL)
        .to_lowercase()
}

/// Build the dashboard review for `raw` against one approved-ID snapshot.
pub fn normalize(raw: &RawReview, approved: &ApprovedIds) -> NormalizedReview {
    let categories = raw
        .category_ratings
        .iter()
        .map(|c| NormalizedCategory {
            category: c.category.clone(),
            rating: c.rating,
            display_name: category_display_name(&c.category),
        })
        .collect();

    let channel = normalize_channel(raw.channel.as_deref());
    let (channel_icon, channel_label) = channel_info(&channel).unwrap_or(("", ""));

    NormalizedReview {
        id: raw.id,
        review_type: raw.review_type,
        status: raw.status,
        overall_rating: raw.rating,
        average_rating: average_category_rating(&raw.category_ratings),
        text: raw.text.clone(),
        private_review: raw.private_review.clone(),
        categories,
        submitted_at: raw.submitted_at,
        formatted_date: format_display_date(&raw.submitted_at),
        guest_name: raw.guest_name.clone(),
        listing_name: raw.listing_name.clone(),
        listing_id: listing_id(&raw.listing_name),
        channel_icon: channel_icon.to_string(),
        channel_label: channel_label.to_string(),
        channel,
        is_approved_for_website: approved.contains(&raw.id),
        sentiment: classify(raw.rating),
    }
}

/// Element-wise `normalize`, preserving input order.
pub fn normalize_all(raws: &[RawReview], approved: &ApprovedIds) -> Vec<NormalizedReview> {
    raws.iter().map(|raw| normalize(raw, approved)).collect()
}

/// Listing ids that more than one distinct listing name maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub listing_id: String,
    pub listing_names: Vec<String>,
}

pub fn detect_slug_collisions(reviews: &[NormalizedReview]) -> Vec<SlugCollision> {
    let mut names_by_id: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for review in reviews {
        let names = names_by_id.entry(review.listing_id.as_str()).or_default();
        if !names.contains(&review.listing_name.as_str()) {
            names.push(review.listing_name.as_str());
        }
    }

    names_by_id
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(id, names)| SlugCollision {
            listing_id: id.to_string(),
            listing_names: names.into_iter().map(String::from).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{approved, raw_review};
    use review_dash_models::Sentiment;

    #[test]
    fn test_listing_id_slug() {
        assert_eq!(listing_id("2B N1 A - 29 Shoreditch Heights"), "2b-n1-a-29-shoreditch-heights");
        assert_eq!(listing_id("Luxury Suite - Canary Wharf Tower"), "luxury-suite-canary-wharf-tower");
        assert_eq!(listing_id("Café  Loft!!"), "caf-loft-");
        assert_eq!(listing_id("  Leading"), "-leading");
        assert_eq!(listing_id(""), "");
    }

    #[test]
    fn test_average_rating_from_categories() {
        let raw = raw_review(1, "L", Some(5), &[10, 10, 10, 9, 10]);
        let review = normalize(&raw, &approved(&[]));
        assert_eq!(review.average_rating, Some(4.9));
    }

    #[test]
    fn test_average_rating_rounds_half_up() {
        // 9.5 / 2 = 4.75 -> 4.8
        let raw = raw_review(1, "L", Some(5), &[10, 9]);
        assert_eq!(normalize(&raw, &approved(&[])).average_rating, Some(4.8));
    }

    #[test]
    fn test_average_rating_none_without_categories() {
        let raw = raw_review(1, "L", Some(5), &[]);
        assert_eq!(normalize(&raw, &approved(&[])).average_rating, None);
    }

    #[test]
    fn test_approval_flag_matches_membership() {
        let raw = raw_review(7453, "L", Some(5), &[10]);
        assert!(normalize(&raw, &approved(&[7453, 1])).is_approved_for_website);
        assert!(!normalize(&raw, &approved(&[1, 2])).is_approved_for_website);
        assert!(!normalize(&raw, &approved(&[])).is_approved_for_website);
    }

    #[test]
    fn test_category_display_names() {
        let mut raw = raw_review(1, "L", Some(4), &[]);
        raw.category_ratings = vec![
            CategoryRating { category: "check_in".to_string(), rating: 8 },
            CategoryRating { category: "wifi_speed".to_string(), rating: 6 },
        ];

        let review = normalize(&raw, &approved(&[]));
        assert_eq!(review.categories[0].display_name, "Check-in");
        assert_eq!(review.categories[1].display_name, "wifi_speed");
        assert_eq!(review.categories[1].rating, 6);
    }

    #[test]
    fn test_channel_defaults_and_decoration() {
        let mut raw = raw_review(1, "L", Some(4), &[]);
        raw.channel = None;
        let review = normalize(&raw, &approved(&[]));
        assert_eq!(review.channel, "direct");
        assert_eq!(review.channel_label, "Direct Booking");

        raw.channel = Some("Booking.com".to_string());
        let review = normalize(&raw, &approved(&[]));
        assert_eq!(review.channel, "booking.com");
        assert_eq!(review.channel_label, "Booking.com");

        raw.channel = Some("Marriott".to_string());
        let review = normalize(&raw, &approved(&[]));
        assert_eq!(review.channel, "marriott");
        assert_eq!(review.channel_icon, "");
        assert_eq!(review.channel_label, "");
    }

    #[test]
    fn test_copied_and_derived_fields() {
        let raw = raw_review(42, "2B N1 A - 29 Shoreditch Heights", Some(2), &[4, 4]);
        let review = normalize(&raw, &approved(&[]));

        assert_eq!(review.id, 42);
        assert_eq!(review.overall_rating, Some(2));
        assert_eq!(review.sentiment, Sentiment::Negative);
        assert_eq!(review.listing_id, "2b-n1-a-29-shoreditch-heights");
        assert_eq!(review.formatted_date, "15 Nov 2024");
        assert_eq!(review.submitted_at, raw.submitted_at);
        assert_eq!(review.text, raw.text);
        assert_eq!(review.guest_name, raw.guest_name);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let raw = raw_review(1, "Some Listing", None, &[7, 8, 9]);
        let ids = approved(&[1]);
        assert_eq!(normalize(&raw, &ids), normalize(&raw, &ids));
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let raws = vec![
            raw_review(3, "A", Some(5), &[]),
            raw_review(1, "B", Some(4), &[]),
            raw_review(2, "C", Some(3), &[]),
        ];
        let ids: Vec<u64> = normalize_all(&raws, &approved(&[])).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_detect_slug_collisions() {
        let raws = vec![
            raw_review(1, "Flat 1 - Soho", Some(5), &[]),
            raw_review(2, "Flat 1 Soho", Some(5), &[]),
            raw_review(3, "Flat 1 - Soho", Some(5), &[]),
            raw_review(4, "Other", Some(5), &[]),
        ];
        let collisions = detect_slug_collisions(&normalize_all(&raws, &approved(&[])));

        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].listing_id, "flat-1-soho");
        assert_eq!(collisions[0].listing_names, vec!["Flat 1 - Soho", "Flat 1 Soho"]);
    }
}
