//! Gateway to the RubyGems.org gems API.
//!
//! Two operations are supported: a single-gem lookup and a bulk lookup
//! resolving many names in one request. The bulk endpoint silently drops
//! unknown names from its response instead of erroring per name; callers
//! infer "not found" by set difference against the requested names.

use serde::Deserialize;

/// Public RubyGems.org API root.
pub const RUBYGEMS_BASE_URL: &str = "https://rubygems.org";

/// Errors surfaced by the gems API and the resolution layer above it.
#[derive(Debug, thiserror::Error)]
pub enum GemsApiError {
    /// The registry has no gem with this name (404 on the single lookup).
    #[error("gem '{name}' not found in RubyGems.org")]
    NotFound { name: String },

    /// The gem exists but its URL matches no recognized hosting service.
    #[error("gem '{name}' has no supported source code repository (URL: {url})")]
    UnsupportedRepository { name: String, url: String },

    /// Transport or decoding failure. Never retried, propagates unchanged.
    #[error("RubyGems.org request failed")]
    Transport(#[from] reqwest::Error),
}

/// One gem's metadata, decoded defensively.
///
/// The registry omits or empties URL fields freely; an absent candidate URL
/// is data, not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct GemRecord {
    pub name: String,
    #[serde(default)]
    pub source_code_uri: Option<String>,
    #[serde(default)]
    pub homepage_uri: Option<String>,
}

impl GemRecord {
    /// Best candidate for the source repository: `source_code_uri` when
    /// present and non-empty, otherwise `homepage_uri`.
    pub fn candidate_url(&self) -> Option<&str> {
        non_empty(self.source_code_uri.as_deref()).or_else(|| non_empty(self.homepage_uri.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// The registry seam the resolution engine talks through.
///
/// Implemented over HTTP by [`GemsApiClient`]; tests substitute a scripted
/// implementation.
pub trait GemsApi {
    /// Fetch metadata for a single gem. Fails with
    /// [`GemsApiError::NotFound`] when the registry reports no such gem.
    fn fetch_one(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<GemRecord, GemsApiError>> + Send;

    /// Fetch metadata for many gems in one request. Returns only the
    /// records the registry found; unknown names are silently omitted.
    fn fetch_many(
        &self,
        names: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<GemRecord>, GemsApiError>> + Send;
}

/// HTTP-backed [`GemsApi`] implementation.
#[derive(Debug, Clone)]
pub struct GemsApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GemsApiClient {
    /// Build a client against the public RubyGems.org API.
    pub fn new() -> Result<Self, GemsApiError> {
        Self::with_base_url(RUBYGEMS_BASE_URL)
    }

    /// Build a client against an alternate API root (mirrors, tests).
    pub fn with_base_url(base_url: &str) -> Result<Self, GemsApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gemlive/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl GemsApi for GemsApiClient {
    async fn fetch_one(&self, name: &str) -> Result<GemRecord, GemsApiError> {
        let url = format!("{}/api/v1/gems/{}.json", self.base_url, name);
        tracing::debug!(gem = name, %url, "fetching gem metadata");

        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GemsApiError::NotFound {
                name: name.to_string(),
            });
        }

        let record = response.error_for_status()?.json::<GemRecord>().await?;
        Ok(record)
    }

    async fn fetch_many(&self, names: &[String]) -> Result<Vec<GemRecord>, GemsApiError> {
        let url = format!("{}/api/v1/gems.json", self.base_url);
        tracing::debug!(count = names.len(), "fetching gem metadata in bulk");

        let response = self
            .http
            .get(&url)
            .query(&[("gems", names.join(","))])
            .send()
            .await?;

        let records = response.error_for_status()?.json::<Vec<GemRecord>>().await?;
        Ok(records)
    }
}
