pub mod analytics;
pub mod approval;
pub mod dashboard;
pub mod filter;
pub mod normalize;
pub mod paginate;
pub mod sentiment;
pub mod sort;

#[cfg(test)]
mod test_support;

pub use analytics::aggregate;
pub use approval::{ApprovalError, ApprovalSnapshot, ApprovalStore, ApprovedIds, FileApprovalStore, InMemoryApprovalStore, SnapshotSource, snapshot_or_default};
pub use dashboard::{DashboardMeta, DashboardView, PublicView, ReviewQuery, build_dashboard, build_public_view, unique_channels, unique_listings};
pub use filter::{FilterCriteria, filter};
pub use normalize::{detect_slug_collisions, listing_id, normalize, normalize_all, SlugCollision};
pub use paginate::{page_count, paginate};
pub use sentiment::classify;
pub use sort::{SortDirection, SortField, SortOptions, sort};
