use review_dash_models::NormalizedReview;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Date,
    Rating,
    GuestName,
    ListingName,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Rating => "rating",
            SortField::GuestName => "guestName",
            SortField::ListingName => "listingName",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortField::Date),
            "rating" => Ok(SortField::Rating),
            "guestName" | "guest-name" | "guest_name" => Ok(SortField::GuestName),
            "listingName" | "listing-name" | "listing_name" => Ok(SortField::ListingName),
            other => Err(format!("unknown sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOptions {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Base letters with accents stripped and case folded.
fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collation-style ordering: base letters first, then accents, then case
/// (lowercase before uppercase).
fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn compare(a: &NormalizedReview, b: &NormalizedReview, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.submitted_at.cmp(&b.submitted_at),
        SortField::Rating => a.overall_rating.unwrap_or(0).cmp(&b.overall_rating.unwrap_or(0)),
        SortField::GuestName => locale_cmp(&a.guest_name, &b.guest_name),
        SortField::ListingName => locale_cmp(&a.listing_name, &b.listing_name),
    }
}

/// Stable sort into a new list; ties keep their input order in either direction.
pub fn sort(reviews: &[NormalizedReview], options: SortOptions) -> Vec<NormalizedReview> {
    let mut sorted = reviews.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, options.field);
        match options.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}
