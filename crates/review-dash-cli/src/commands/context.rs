use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use futures::future;
use review_dash_config::{Config, CredentialStore, PathManager};
use review_dash_core::{snapshot_or_default, ApprovalSnapshot, ApprovedIds, FileApprovalStore};
use review_dash_models::RawReview;
use review_dash_sources::{
    build_google_provider, build_review_source, into_raw_reviews, GoogleReviewProvider, ReviewSource, SourceRecord,
};
use tracing::{debug, warn};

/// Everything a command needs: resolved paths, validated config and secrets.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

impl AppContext {
    pub fn load(paths: PathManager) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let credentials_file = paths.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        Ok(Self {
            paths,
            config,
            credentials,
        })
    }

    pub fn bootstrap_ids(&self) -> ApprovedIds {
        self.config.approvals.bootstrap_ids.iter().copied().collect()
    }

    pub fn approval_store(&self) -> FileApprovalStore {
        let path = self.config.approvals_file(self.paths.approvals_file());
        FileApprovalStore::new(path, self.bootstrap_ids())
    }

    /// Fresh approved-ID snapshot for one command; unreadable state falls
    /// back to the bootstrap list.
    pub fn approval_snapshot(&self) -> ApprovalSnapshot {
        snapshot_or_default(&self.approval_store(), &self.bootstrap_ids())
    }

    pub async fn fetch_reviews(&self) -> Result<Vec<RawReview>> {
        let source = build_review_source(&self.config, &self.credentials)
            .wrap_err("Failed to set up review source")?;
        let reviews = source
            .fetch_raw_reviews()
            .await
            .wrap_err_with(|| format!("Failed to fetch reviews from {}", source.source_name()))?;
        debug!("Fetched {} reviews from {}", reviews.len(), source.source_name());
        Ok(reviews)
    }

    pub async fn fetch_google_records(
        &self,
        place_id: Option<String>,
        listing_name: Option<String>,
    ) -> Result<Vec<SourceRecord>> {
        let provider = build_google_provider(&self.config, &self.credentials)
            .wrap_err("Failed to set up Google review provider")?;
        let place_id = place_id
            .or_else(|| self.config.google.place_id.clone())
            .unwrap_or_default();
        let listing_name = listing_name.unwrap_or_else(|| self.config.google.listing_name.clone());

        let reviews = provider
            .fetch_raw_google_reviews(&place_id)
            .await
            .wrap_err_with(|| format!("Failed to fetch Google reviews from {}", provider.source_name()))?;

        Ok(reviews
            .into_iter()
            .map(|review| SourceRecord::Google {
                review,
                listing_name: listing_name.clone(),
            })
            .collect())
    }

    /// Native reviews, plus Google reviews when requested. A failing Google
    /// fetch is logged and skipped.
    pub async fn fetch_all(&self, include_google: bool) -> Result<Vec<RawReview>> {
        if !include_google {
            return self.fetch_reviews().await;
        }

        let (native, google) = future::join(self.fetch_reviews(), self.fetch_google_records(None, None)).await;

        let mut records: Vec<SourceRecord> = native?.into_iter().map(SourceRecord::Native).collect();
        match google {
            Ok(google) => records.extend(google),
            Err(e) => warn!("Skipping Google reviews: {:#}", e),
        }

        Ok(into_raw_reviews(records))
    }
}
