use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub hostaway: HostawayConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub approvals: ApprovalsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Property-management review API. The API key lives in the credentials file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HostawayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_hostaway_api_url")]
    pub api_url: String,
    #[serde(default = "default_hostaway_account_id")]
    pub account_id: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_google_api_url")]
    pub api_url: String,
    /// Place queried when no `--place-id` is given
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default = "default_google_listing_name")]
    pub listing_name: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApprovalsConfig {
    /// Defaults to `<data_dir>/approved-reviews.json`
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Served when no approval state has been persisted yet
    #[serde(default = "default_bootstrap_approved_ids")]
    pub bootstrap_ids: Vec<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_sort_field")]
    pub sort_field: String,
    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (daily rotation) instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_hostaway_api_url() -> String {
    "https://api.hostaway.com/v1".to_string()
}

fn default_hostaway_account_id() -> String {
    "61148".to_string()
}

fn default_google_api_url() -> String {
    "https://places.googleapis.com/v1/places".to_string()
}

fn default_google_listing_name() -> String {
    "Property".to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_sort_field() -> String {
    "date".to_string()
}

fn default_sort_direction() -> String {
    "desc".to_string()
}

/// Every spelling `dashboard.sort_field` accepts.
pub const SORT_FIELD_NAMES: &[&str] = &[
    "date",
    "rating",
    "guestName",
    "guest-name",
    "guest_name",
    "listingName",
    "listing-name",
    "listing_name",
];

/// Matched case-insensitively.
pub const SORT_DIRECTION_NAMES: &[&str] = &["asc", "desc"];

/// Reviews pre-approved for the public site before any curation happened.
pub fn default_bootstrap_approved_ids() -> Vec<u64> {
    vec![
        7453, 7455, 7457, 7458, 7460, 7461, 7463, 7466, 7467, 7468, 7469, 7472, 7474, 7478,
        7479, 7480, // Riverside Apartment - Southbank
        7481, // Modern Flat - Kings Cross
        7483, 7484, // Victorian Townhouse - Notting Hill
        7485, // Art Deco Suite - Marylebone
        7487, // Docklands Executive Apartment
        7489, 7490, // Chelsea Garden Apartment
        7491, // Clerkenwell Warehouse Conversion
        7493, 7494, // Hampstead Heath Retreat
        7495, // Brixton Creative Studio
        7497, 7498, // Tower Bridge Luxury Flat
    ]
}

impl Default for HostawayConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_url: default_hostaway_api_url(),
            account_id: default_hostaway_account_id(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_google_api_url(),
            place_id: None,
            listing_name: default_google_listing_name(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ApprovalsConfig {
    fn default() -> Self {
        Self {
            file: None,
            bootstrap_ids: default_bootstrap_approved_ids(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sort_field: default_sort_field(),
            sort_direction: default_sort_direction(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing file yields the defaults; a present but broken file is an error.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.dashboard.page_size == 0 {
            return Err(anyhow::anyhow!("dashboard.page_size must be at least 1"));
        }

        if !SORT_FIELD_NAMES.contains(&self.dashboard.sort_field.as_str()) {
            return Err(anyhow::anyhow!("Invalid dashboard.sort_field: {}", self.dashboard.sort_field));
        }

        let direction = self.dashboard.sort_direction.to_ascii_lowercase();
        if !SORT_DIRECTION_NAMES.contains(&direction.as_str()) {
            return Err(anyhow::anyhow!("Invalid dashboard.sort_direction: {}", self.dashboard.sort_direction));
        }

        if self.hostaway.enabled && self.hostaway.api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("Hostaway is enabled but api_url is empty"));
        }

        if self.google.enabled && self.google.api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("Google is enabled but api_url is empty"));
        }

        Ok(())
    }

    pub fn approvals_file(&self, default_path: PathBuf) -> PathBuf {
        self.approvals.file.clone().unwrap_or(default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.google.enabled = true;
        config.google.place_id = Some("ChIJ123".to_string());
        config.dashboard.page_size = 50;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.google.enabled);
        assert_eq!(loaded.google.place_id.as_deref(), Some("ChIJ123"));
        assert_eq!(loaded.dashboard.page_size, 50);
        assert_eq!(loaded.approvals.bootstrap_ids, default_bootstrap_approved_ids());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[dashboard]\npage_size = 5\n").unwrap();
        assert_eq!(config.dashboard.page_size, 5);
        assert_eq!(config.dashboard.sort_field, "date");
        assert!(config.hostaway.enabled);
        assert!(!config.google.enabled);
        assert_eq!(config.approvals.bootstrap_ids.len(), 29);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.dashboard.page_size, 20);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.dashboard.page_size = 0;
        assert!(config.validate().is_err());

        config.dashboard.page_size = 10;
        config.dashboard.sort_field = "stars".to_string();
        assert!(config.validate().is_err());

        config.dashboard.sort_field = "guest_name".to_string();
        config.dashboard.sort_direction = "ASC".to_string();
        assert!(config.validate().is_ok());

        config.dashboard.sort_direction = "up".to_string();
        assert!(config.validate().is_err());

        config.dashboard.sort_direction = "desc".to_string();
        config.dashboard.sort_field = "rating".to_string();
        config.hostaway.api_url = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_approvals_file_override() {
        let mut config = Config::default();
        let default_path = PathBuf::from("/data/approved-reviews.json");
        assert_eq!(config.approvals_file(default_path.clone()), default_path);

        config.approvals.file = Some(PathBuf::from("/elsewhere/ids.json"));
        assert_eq!(config.approvals_file(default_path), PathBuf::from("/elsewhere/ids.json"));
    }
}
