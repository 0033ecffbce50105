//! Structural classification of repository URLs.
//!
//! A URL only becomes a [`SourceCodeRepositoryUrl`] once it has been
//! positively matched against one of the recognized hosting services;
//! everything else stays a plain string and is reported by the resolver
//! as unsupported.

use serde::{Deserialize, Serialize};
use url::Url;

/// Recognized source-hosting services.
///
/// The set is closed: classification either lands on one of these tags or
/// fails. Ordered so it can key a sorted map in resolution results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    GitHub,
    GitLab,
}

impl Service {
    /// Lowercase tag used in reports and config (e.g. `"github"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::GitHub => "github",
            Service::GitLab => "gitlab",
        }
    }

    fn from_host(host: &str) -> Option<Self> {
        match host {
            "github.com" | "www.github.com" => Some(Service::GitHub),
            "gitlab.com" | "www.gitlab.com" => Some(Service::GitLab),
            _ => None,
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository URL that has been classified into a known [`Service`].
///
/// Instances exist only for positively classified URLs; there is no
/// "unclassified" variant. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCodeRepositoryUrl {
    service: Service,
    url: String,
    gem_name: String,
}

impl SourceCodeRepositoryUrl {
    /// Classify a raw URL string for `gem_name`.
    ///
    /// Matching is purely structural: an http(s) URL on a recognized host
    /// with an `owner/repo` path, optionally pinned to a tag or branch via
    /// a `tree/<ref>` suffix (e.g. `/tree/v1.22.1`). Returns `None` for
    /// anything else, including the registry's own gem-page URLs.
    pub fn classify(raw_url: &str, gem_name: &str) -> Option<Self> {
        let (service, url) = classify_url(raw_url)?;
        Some(Self {
            service,
            url,
            gem_name: gem_name.to_string(),
        })
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn gem_name(&self) -> &str {
        &self.gem_name
    }
}

/// Match a raw URL against the recognized hosting-service shapes.
///
/// Deterministic and side-effect-free; the returned URL is the input with
/// any trailing slash removed, path otherwise preserved.
fn classify_url(raw_url: &str) -> Option<(Service, String)> {
    let parsed = Url::parse(raw_url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let service = Service::from_host(parsed.host_str()?)?;

    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        // owner/repo
        [_owner, _repo] => {}
        // owner/repo pinned to a tag or branch
        [_owner, _repo, "tree", _ref, ..] => {}
        _ => return None,
    }

    Some((service, raw_url.trim_end_matches('/').to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_tags_render_lowercase() {
        assert_eq!(Service::GitHub.as_str(), "github");
        assert_eq!(Service::GitLab.as_str(), "gitlab");
        assert_eq!(Service::GitLab.to_string(), "gitlab");
    }

    #[test]
    fn classifies_github_repo_url() {
        let url = SourceCodeRepositoryUrl::classify("https://github.com/whitequark/ast", "ast")
            .expect("should classify");
        assert_eq!(url.service(), Service::GitHub);
        assert_eq!(url.url(), "https://github.com/whitequark/ast");
        assert_eq!(url.gem_name(), "ast");
    }

    #[test]
    fn classifies_url_pinned_to_tag() {
        let url = SourceCodeRepositoryUrl::classify(
            "https://github.com/grosser/parallel/tree/v1.22.1",
            "parallel",
        )
        .expect("should classify");
        assert_eq!(url.service(), Service::GitHub);
        assert_eq!(url.url(), "https://github.com/grosser/parallel/tree/v1.22.1");
    }

    #[test]
    fn classifies_gitlab_url() {
        let url =
            SourceCodeRepositoryUrl::classify("https://gitlab.com/gitlab-org/gitlab", "gitlab")
                .expect("should classify");
        assert_eq!(url.service(), Service::GitLab);
    }

    #[test]
    fn strips_trailing_slash() {
        let url = SourceCodeRepositoryUrl::classify("https://github.com/sickill/rainbow/", "rainbow")
            .expect("should classify");
        assert_eq!(url.url(), "https://github.com/sickill/rainbow");
    }

    #[test]
    fn rejects_unknown_host() {
        assert!(SourceCodeRepositoryUrl::classify("https://example.com/a/b", "x").is_none());
    }

    #[test]
    fn rejects_registry_gem_page() {
        // The registry's generic homepage URL has a single path segment
        assert!(
            SourceCodeRepositoryUrl::classify("https://rubygems.org/gems/atlassian-jwt", "x")
                .is_none()
        );
    }

    #[test]
    fn rejects_non_repo_paths() {
        assert!(SourceCodeRepositoryUrl::classify("https://github.com/whitequark", "x").is_none());
        assert!(
            SourceCodeRepositoryUrl::classify("https://github.com/a/b/issues/1", "x").is_none()
        );
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(SourceCodeRepositoryUrl::classify("git@github.com:a/b.git", "x").is_none());
        assert!(SourceCodeRepositoryUrl::classify("ftp://github.com/a/b", "x").is_none());
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(SourceCodeRepositoryUrl::classify("", "x").is_none());
        assert!(SourceCodeRepositoryUrl::classify("not a url", "x").is_none());
    }
}
