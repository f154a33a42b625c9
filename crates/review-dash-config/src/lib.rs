pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApprovalsConfig, Config, DashboardConfig, GoogleConfig, HostawayConfig, default_bootstrap_approved_ids,
    SORT_DIRECTION_NAMES, SORT_FIELD_NAMES};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
