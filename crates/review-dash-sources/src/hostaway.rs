use async_trait::async_trait;
use reqwest::Client;
use review_dash_models::RawReview;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use crate::error::SourceError;
use crate::traits::ReviewSource;

const SOURCE_NAME: &str = "hostaway";

#[derive(Debug, Deserialize)]
struct HostawayResponse {
    status: String,
    #[serde(default)]
    result: Vec<RawReview>,
}

/// Client for the property-management reviews endpoint.
pub struct HostawaySource {
    client: Client,
    api_url: String,
    account_id: String,
    api_key: String,
}

impl HostawaySource {
    pub fn new(api_url: String, account_id: String, api_key: String, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            account_id,
            api_key,
        })
    }
}

/// Decode a `/reviews` response body.
fn parse_reviews_response(body: &str) -> Result<Vec<RawReview>, SourceError> {
    let response: HostawayResponse =
        serde_json::from_str(body).map_err(|e| SourceError::decode(SOURCE_NAME, e))?;

    if response.status != "success" {
        return Err(SourceError::decode(
            SOURCE_NAME,
            format!("unexpected response status '{}'", response.status),
        ));
    }

    if response.result.is_empty() {
        return Err(SourceError::Empty(SOURCE_NAME.to_string()));
    }

    Ok(response.result)
}

#[async_trait]
impl ReviewSource for HostawaySource {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch_raw_reviews(&self) -> Result<Vec<RawReview>, SourceError> {
        let url = format!("{}/reviews", self.api_url);
        debug!("Fetching reviews for account {} from {}", self.account_id, url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("Cache-Control", "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                source_name: SOURCE_NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let reviews = parse_reviews_response(&body)?;
        debug!("Fetched {} raw reviews", reviews.len());
        Ok(reviews)
    }
}
