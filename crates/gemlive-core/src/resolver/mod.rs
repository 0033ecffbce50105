//! Resolution engine.
//!
//! Merges user-configured URL overrides with batched registry lookups,
//! classifies every candidate URL into a known hosting service, and
//! aggregates the outcome into a single [`ResolutionResult`].

use std::collections::{BTreeMap, HashMap};

use crate::client::{GemsApi, GemsApiError};
use crate::source::{Service, SourceCodeRepositoryUrl};

/// Gem name -> raw URL, supplied by the config loader. Read-only for the
/// lifetime of the engine.
pub type OverrideMap = HashMap<String, String>;

/// Aggregated outcome of one `resolve` call.
///
/// Every requested name lands in exactly one service group entry or one
/// error message — never both, never neither.
#[derive(Debug, Default)]
pub struct ResolutionResult {
    service_urls: BTreeMap<Service, Vec<SourceCodeRepositoryUrl>>,
    error_messages: Vec<String>,
}

impl ResolutionResult {
    /// Resolved URLs grouped by service, insertion-ordered within each group.
    pub fn service_urls(&self) -> &BTreeMap<Service, Vec<SourceCodeRepositoryUrl>> {
        &self.service_urls
    }

    /// One human-readable message per unresolved gem, in discovery order.
    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    /// Total number of resolved URLs across all service groups.
    pub fn resolved_count(&self) -> usize {
        self.service_urls.values().map(Vec::len).sum()
    }

    fn push_url(&mut self, url: SourceCodeRepositoryUrl) {
        self.service_urls.entry(url.service()).or_default().push(url);
    }

    fn push_error(&mut self, message: String) {
        self.error_messages.push(message);
    }
}

/// Resolves gem names to source-code repository URLs.
///
/// Holds no mutable state: the override map is fixed at construction, so a
/// single engine may serve concurrent `resolve` calls.
#[derive(Debug)]
pub struct ResolutionEngine<G> {
    gateway: G,
    overrides: OverrideMap,
}

impl<G: GemsApi> ResolutionEngine<G> {
    pub fn new(gateway: G, overrides: OverrideMap) -> Self {
        Self { gateway, overrides }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Resolve `names` into a grouped report.
    ///
    /// Overridden names never reach the registry; the remainder is resolved
    /// with exactly one bulk request (none when every name is overridden).
    /// Per-gem failures become error messages; only a transport fault aborts
    /// the whole call.
    pub async fn resolve(&self, names: &[String]) -> Result<ResolutionResult, GemsApiError> {
        let mut result = ResolutionResult::default();

        // Partition, preserving relative order within each half
        let (overridden, to_query): (Vec<&String>, Vec<&String>) = names
            .iter()
            .partition(|name| self.overrides.contains_key(*name));

        for name in overridden {
            // Present by partition
            let raw_url = &self.overrides[name];
            match SourceCodeRepositoryUrl::classify(raw_url, name) {
                Some(url) => result.push_url(url),
                None => {
                    tracing::warn!(gem = %name, url = %raw_url, "override URL is not supported");
                    result.push_error(unsupported_message(name));
                }
            }
        }

        if to_query.is_empty() {
            return Ok(result);
        }

        let to_query: Vec<String> = to_query.into_iter().cloned().collect();
        let records = self.gateway.fetch_many(&to_query).await?;
        let records_by_name: HashMap<&str, _> = records
            .iter()
            .map(|record| (record.name.as_str(), record))
            .collect();

        // Walk the requested names rather than the response: the bulk
        // endpoint promises no ordering and silently drops unknown names.
        for name in &to_query {
            match records_by_name.get(name.as_str()) {
                Some(record) => {
                    let classified = record
                        .candidate_url()
                        .and_then(|raw| SourceCodeRepositoryUrl::classify(raw, name));
                    match classified {
                        Some(url) => result.push_url(url),
                        None => result.push_error(unsupported_message(name)),
                    }
                }
                None => result.push_error(not_found_message(name)),
            }
        }

        tracing::debug!(
            resolved = result.resolved_count(),
            errors = result.error_messages().len(),
            "resolution finished"
        );
        Ok(result)
    }

    /// Resolve a single gem, raising instead of reporting.
    ///
    /// Independent of [`resolve`](Self::resolve): no batching, and
    /// unresolved gems surface as [`GemsApiError::NotFound`] or
    /// [`GemsApiError::UnsupportedRepository`] rather than message strings.
    /// Overrides still win over the registry.
    pub async fn lookup_one(&self, name: &str) -> Result<SourceCodeRepositoryUrl, GemsApiError> {
        let candidate = match self.overrides.get(name) {
            Some(raw_url) => Some(raw_url.clone()),
            None => {
                let record = self.gateway.fetch_one(name).await?;
                record.candidate_url().map(String::from)
            }
        };

        candidate
            .as_deref()
            .and_then(|raw| SourceCodeRepositoryUrl::classify(raw, name))
            .ok_or_else(|| GemsApiError::UnsupportedRepository {
                name: name.to_string(),
                url: gem_page_url(name),
            })
    }
}

/// Registry page for a gem, shown when no supported repository URL exists.
fn gem_page_url(name: &str) -> String {
    format!("https://rubygems.org/gems/{name}")
}

fn not_found_message(name: &str) -> String {
    format!("[{name}] Not found in RubyGems.org.")
}

fn unsupported_message(name: &str) -> String {
    format!(
        "[{name}] Source code repository is not found in RubyGems.org, or not supported. URL: {}",
        gem_page_url(name)
    )
}
