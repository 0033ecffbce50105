//! Source-hosting services and classified repository URLs.

pub mod url;

pub use url::{Service, SourceCodeRepositoryUrl};
