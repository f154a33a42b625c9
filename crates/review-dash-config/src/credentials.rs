use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const HOSTAWAY_API_KEY_ENV: &str = "HOSTAWAY_API_KEY";
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    // Environment variables win over the stored file
    fn env_or_stored(&self, env_key: &str, key: &str) -> Option<String> {
        std::env::var(env_key)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.get(key).cloned())
    }

    pub fn hostaway_api_key(&self) -> Option<String> {
        self.env_or_stored(HOSTAWAY_API_KEY_ENV, "hostaway_api_key")
    }

    pub fn set_hostaway_api_key(&mut self, key: String) {
        self.set("hostaway_api_key".to_string(), key);
    }

    pub fn google_api_key(&self) -> Option<String> {
        self.env_or_stored(GOOGLE_API_KEY_ENV, "google_api_key")
    }

    pub fn set_google_api_key(&mut self, key: String) {
        self.set("google_api_key".to_string(), key);
    }
}
