//! Builds providers from configuration.
//!
//! Every provider is wrapped so that an unreachable or empty upstream falls
//! back to the bundled demo data instead of failing the request.

use review_dash_config::{Config, CredentialStore};
use std::time::Duration;
use tracing::info;
use crate::error::SourceError;
use crate::fallback::FallbackSource;
use crate::google::GoogleSource;
use crate::hostaway::HostawaySource;
use crate::mock::MockSource;
use crate::traits::{GoogleReviewProvider, ReviewSource};

pub fn build_review_source(
    config: &Config,
    credentials: &CredentialStore,
) -> Result<Box<dyn ReviewSource>, SourceError> {
    if !config.hostaway.enabled {
        info!("Hostaway disabled in config, using bundled demo reviews");
        return Ok(Box::new(MockSource::new()));
    }

    let Some(api_key) = credentials.hostaway_api_key() else {
        info!("No Hostaway API key configured, using bundled demo reviews");
        return Ok(Box::new(MockSource::new()));
    };

    let hostaway = HostawaySource::new(
        config.hostaway.api_url.clone(),
        config.hostaway.account_id.clone(),
        api_key,
        Duration::from_secs(config.hostaway.timeout_seconds),
    )?;

    Ok(Box::new(FallbackSource::new(hostaway, MockSource::new()).with_name("hostaway")))
}

pub fn build_google_provider(
    config: &Config,
    credentials: &CredentialStore,
) -> Result<Box<dyn GoogleReviewProvider>, SourceError> {
    if !config.google.enabled {
        info!("Google disabled in config, using bundled demo Google reviews");
        return Ok(Box::new(MockSource::new()));
    }

    let Some(api_key) = credentials.google_api_key() else {
        info!("No Google Places API key configured, using bundled demo Google reviews");
        return Ok(Box::new(MockSource::new()));
    };

    let google = GoogleSource::new(
        config.google.api_url.clone(),
        Some(api_key),
        config.google.place_id.clone(),
        config.google.listing_name.clone(),
        Duration::from_secs(config.google.timeout_seconds),
    )?;

    Ok(Box::new(FallbackSource::new(google, MockSource::new()).with_name("google")))
}
