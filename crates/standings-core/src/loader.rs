// Team list loader: one GET against the stats backend per call.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::model::TeamRecord;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed team list from {url}: {source}")]
    Malformed {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// TeamSource
// ---------------------------------------------------------------------------

/// Anything that can produce the current team list.
#[async_trait]
pub trait TeamSource: Send + Sync {
    async fn load(&self) -> Result<Vec<TeamRecord>, FetchError>;
}

/// Fetches the team list from the backend's `/api/teams` endpoint.
///
/// No retries and no caching: every `load` is exactly one request.
pub struct HttpTeamSource {
    http: reqwest::Client,
    url: String,
}

impl HttpTeamSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            url: url.into(),
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            api.teams_url(),
            api.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TeamSource for HttpTeamSource {
    async fn load(&self) -> Result<Vec<TeamRecord>, FetchError> {
        debug!("GET {}", self.url);
        let transport = |source| FetchError::Transport {
            url: self.url.clone(),
            source,
        };

        let response = self.http.get(&self.url).send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        let teams = parse_response(&self.url, status.as_u16(), &body)?;
        info!("Fetched {} teams from {}", teams.len(), self.url);
        Ok(teams)
    }
}

/// Turn a raw HTTP status and body into a team list.
///
/// Any non-2xx status is a failure regardless of the body.
pub fn parse_response(url: &str, status: u16, body: &str) -> Result<Vec<TeamRecord>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    serde_json::from_str(body).map_err(|source| FetchError::Malformed {
        url: url.to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
