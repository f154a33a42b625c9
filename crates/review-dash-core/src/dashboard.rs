// Request-scoped views composed from the pipeline stages

use review_dash_models::{Channel, Listing, NormalizedReview, PropertyAnalytics, PublicReview, RawReview, ReviewStats, ReviewType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::analytics::{aggregate, category_averages};
use crate::approval::ApprovedIds;
use crate::filter::{filter, FilterCriteria};
use crate::normalize::{detect_slug_collisions, listing_id, normalize_all, round_to_tenth};
use crate::paginate::paginate;
use crate::sort::{sort, SortDirection, SortField, SortOptions};

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewQuery {
    pub filters: FilterCriteria,
    pub sort: SortOptions,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            filters: FilterCriteria::default(),
            sort: SortOptions::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    /// Guest-to-host reviews before filtering.
    pub total: usize,
    /// Reviews matching the filters, before pagination.
    pub filtered: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub reviews: Vec<NormalizedReview>,
    pub analytics: Vec<PropertyAnalytics>,
    pub meta: DashboardMeta,
}

/// Normalize, filter (guest-to-host unless asked otherwise), sort and
/// paginate `raws`. Analytics always cover the unfiltered set.
pub fn build_dashboard(raws: &[RawReview], approved: &ApprovedIds, query: &ReviewQuery) -> DashboardView {
    let normalized = normalize_all(raws, approved);

    for collision in detect_slug_collisions(&normalized) {
        warn!(
            "Listing id {} is shared by {} listing names: {:?}",
            collision.listing_id,
            collision.listing_names.len(),
            collision.listing_names
        );
    }

    let criteria = query.filters.clone().with_default_type();
    let filtered = filter(&normalized, &criteria);
    let sorted = sort(&filtered, query.sort);
    let page = paginate(&sorted, query.page, query.page_size);

    let meta = DashboardMeta {
        total: normalized.iter().filter(|r| r.review_type == ReviewType::GuestToHost).count(),
        filtered: filtered.len(),
        page: query.page,
        page_size: query.page_size,
    };

    debug!(
        "build_dashboard: raw={}, total={}, filtered={}, page={}, returned={}",
        raws.len(),
        meta.total,
        meta.filtered,
        meta.page,
        page.len()
    );

    DashboardView {
        reviews: page,
        analytics: aggregate(&normalized),
        meta,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicView {
    pub reviews: Vec<PublicReview>,
    pub stats: ReviewStats,
}

/// Approved guest-to-host reviews for the property site, newest first.
pub fn build_public_view(raws: &[RawReview], approved: &ApprovedIds, listing: Option<&str>) -> PublicView {
    let normalized = normalize_all(raws, approved);
    let criteria = FilterCriteria {
        review_type: Some(ReviewType::GuestToHost),
        approved_only: true,
        listing_id: listing.map(str::to_string),
        ..Default::default()
    };
    let visible = sort(
        &filter(&normalized, &criteria),
        SortOptions::new(SortField::Date, SortDirection::Desc),
    );

    // Unrated reviews count toward the divisor.
    let average_rating = if visible.is_empty() {
        0.0
    } else {
        let sum: u32 = visible.iter().map(|r| u32::from(r.overall_rating.unwrap_or(0))).sum();
        round_to_tenth(f64::from(sum) / visible.len() as f64)
    };

    let stats = ReviewStats {
        total_reviews: visible.len(),
        average_rating,
        category_averages: category_averages(&visible),
    };

    let reviews = visible
        .into_iter()
        .map(|r| PublicReview {
            id: r.id,
            guest_name: r.guest_name,
            rating: r.overall_rating,
            review: r.text,
            date: r.formatted_date,
            listing_name: r.listing_name,
            categories: r.categories,
        })
        .collect();

    PublicView { reviews, stats }
}

/// Distinct listings in first-seen order. When several names share a
/// slug the last name seen is kept.
pub fn unique_listings(raws: &[RawReview]) -> Vec<Listing> {
    let mut listings: Vec<Listing> = Vec::new();

    for raw in raws {
        let id = listing_id(&raw.listing_name);
        match listings.iter_mut().find(|l| l.id == id) {
            Some(existing) => existing.name = raw.listing_name.clone(),
            None => listings.push(Listing {
                id,
                name: raw.listing_name.clone(),
            }),
        }
    }

    listings
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Channel keys present on the raw reviews, first-seen order, plus `google`.
pub fn unique_channels(raws: &[RawReview]) -> Vec<Channel> {
    let mut channels: Vec<Channel> = Vec::new();

    for channel in raws.iter().filter_map(|r| r.channel.as_deref()) {
        if channel.is_empty() || channels.iter().any(|c| c.id == channel) {
            continue;
        }
        channels.push(Channel {
            id: channel.to_string(),
            name: capitalize(channel),
        });
    }

    if !channels.iter().any(|c| c.id == "google") {
        channels.push(Channel {
            id: "google".to_string(),
            name: "Google".to_string(),
        });
    }

    channels
}
