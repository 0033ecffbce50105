//! Gemlive Core Library
//!
//! Resolves RubyGems dependency names to their canonical source-code
//! repository locations via the RubyGems.org API, merging user-configured
//! overrides with batched registry lookups.

pub mod client;
pub mod config;
pub mod lockfile;
pub mod resolver;
pub mod source;

/// Re-exports of commonly used types
pub mod prelude {
    // Registry client
    pub use crate::client::{GemRecord, GemsApi, GemsApiClient, GemsApiError};

    // Resolution
    pub use crate::resolver::{OverrideMap, ResolutionEngine, ResolutionResult};

    // Source hosting
    pub use crate::source::{Service, SourceCodeRepositoryUrl};
}
