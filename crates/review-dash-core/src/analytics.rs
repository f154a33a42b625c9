// Per-listing statistics over normalized reviews

use review_dash_models::{CategoryAverage, NormalizedReview, PropertyAnalytics, ReviewType, Trend};
use std::collections::BTreeMap;
use tracing::debug;
use crate::normalize::round_to_tenth;

/// Categories averaging below this (0-10 scale) are reported as issues.
pub const ISSUE_THRESHOLD: f64 = 8.0;

const TREND_WINDOW: usize = 3;
const TREND_DELTA: f64 = 0.3;

/// Mean category score per display name, in first-seen order, one decimal.
pub fn category_averages<'a, I>(reviews: I) -> Vec<CategoryAverage>
where
    I: IntoIterator<Item = &'a NormalizedReview>,
{
    let mut totals: Vec<(&str, u32, u32)> = Vec::new();

    for review in reviews {
        for category in &review.categories {
            let name = category.display_name.as_str();
            match totals.iter_mut().find(|(n, _, _)| *n == name) {
                Some((_, sum, count)) => {
                    *sum += u32::from(category.rating);
                    *count += 1;
                }
                None => totals.push((name, u32::from(category.rating), 1)),
            }
        }
    }

    totals
        .into_iter()
        .map(|(name, sum, count)| CategoryAverage {
            display_name: name.to_string(),
            average: round_to_tenth(f64::from(sum) / f64::from(count)),
        })
        .collect()
}

/// Sum of the ratings in `window` over a fixed divisor; unrated reviews add 0.
fn window_average(window: &[&NormalizedReview]) -> f64 {
    let sum: u32 = window
        .iter()
        .filter_map(|r| r.overall_rating)
        .map(u32::from)
        .sum();
    f64::from(sum) / TREND_WINDOW as f64
}

/// Compare the three newest reviews against the three before them.
/// Fewer than six reviews is always `Stable`.
pub fn recent_trend(reviews: &[&NormalizedReview]) -> Trend {
    if reviews.len() < TREND_WINDOW * 2 {
        return Trend::Stable;
    }

    let mut newest_first = reviews.to_vec();
    newest_first.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

    let recent = window_average(&newest_first[..TREND_WINDOW]);
    let previous = window_average(&newest_first[TREND_WINDOW..TREND_WINDOW * 2]);

    if recent > previous + TREND_DELTA {
        Trend::Improving
    } else if recent < previous - TREND_DELTA {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

fn analyze_listing(listing_id: &str, guest_reviews: &[&NormalizedReview]) -> PropertyAnalytics {
    let rated: Vec<u8> = guest_reviews.iter().filter_map(|r| r.overall_rating).collect();
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        let sum: u32 = rated.iter().copied().map(u32::from).sum();
        round_to_tenth(f64::from(sum) / rated.len() as f64)
    };

    let mut rating_distribution: BTreeMap<u8, usize> = (1..=5).map(|r| (r, 0)).collect();
    for rating in &rated {
        *rating_distribution.entry(*rating).or_insert(0) += 1;
    }

    let category_averages = category_averages(guest_reviews.iter().copied());
    let top_issues = category_averages
        .iter()
        .filter(|c| c.average < ISSUE_THRESHOLD)
        .map(|c| c.display_name.clone())
        .collect();

    let mut channel_breakdown = BTreeMap::new();
    for review in guest_reviews {
        *channel_breakdown.entry(review.channel.clone()).or_insert(0) += 1;
    }

    PropertyAnalytics {
        listing_id: listing_id.to_string(),
        listing_name: guest_reviews[0].listing_name.clone(),
        total_reviews: guest_reviews.len(),
        average_rating,
        category_averages,
        rating_distribution,
        recent_trend: recent_trend(guest_reviews),
        top_issues,
        approved_count: guest_reviews.iter().filter(|r| r.is_approved_for_website).count(),
        channel_breakdown,
    }
}

/// One `PropertyAnalytics` per listing with at least one guest-to-host
/// review, busiest listing first. Host-to-guest reviews are ignored.
pub fn aggregate(reviews: &[NormalizedReview]) -> Vec<PropertyAnalytics> {
    // Group order comes from every review, so a listing first seen through a
    // host-to-guest review keeps that position.
    let mut groups: Vec<(&str, Vec<&NormalizedReview>)> = Vec::new();

    for review in reviews {
        let members = match groups.iter().position(|(id, _)| *id == review.listing_id) {
            Some(index) => &mut groups[index].1,
            None => {
                groups.push((review.listing_id.as_str(), Vec::new()));
                let last = groups.len() - 1;
                &mut groups[last].1
            }
        };
        if review.review_type == ReviewType::GuestToHost {
            members.push(review);
        }
    }

    let mut analytics: Vec<PropertyAnalytics> = groups
        .iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(listing_id, members)| analyze_listing(listing_id, members))
        .collect();

    // Stable: equal totals stay in first-seen order.
    analytics.sort_by(|a, b| b.total_reviews.cmp(&a.total_reviews));

    debug!(
        "aggregate: reviews={}, listings={}",
        reviews.len(),
        analytics.len()
    );

    analytics
}

#[cfg(test)]
mod tests;
