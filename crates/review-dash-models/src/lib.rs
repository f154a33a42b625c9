pub mod analytics;
pub mod google;
pub mod normalized;
pub mod public;
pub mod review;
pub mod sentiment;
pub mod timestamp;

pub use analytics::{CategoryAverage, PropertyAnalytics, Trend};
pub use google::{GoogleAuthorAttribution, GooglePlaceDetails, GoogleReview, GoogleText};
pub use normalized::{NormalizedCategory, NormalizedReview};
pub use public::{Channel, Listing, PublicReview, ReviewStats};
pub use review::{CategoryRating, RawReview, ReviewStatus, ReviewType};
pub use sentiment::Sentiment;
