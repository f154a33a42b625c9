pub mod error;
pub mod factory;
pub mod fallback;
pub mod google;
pub mod hostaway;
pub mod mock;
pub mod record;
pub mod traits;

pub use error::SourceError;
pub use factory::{build_google_provider, build_review_source};
pub use fallback::{FallbackSource, Fetched, Origin};
pub use google::{GoogleSource, to_raw_review, GOOGLE_ID_BASE};
pub use hostaway::HostawaySource;
pub use mock::MockSource;
pub use record::{into_raw_reviews, SourceRecord};
pub use traits::{GoogleReviewProvider, ReviewSource};
