pub mod approvals;
pub mod config;
pub mod context;
pub mod reviews;
