//! RubyGems.org API client.

pub mod gems_api;

pub use gems_api::{GemRecord, GemsApi, GemsApiClient, GemsApiError, RUBYGEMS_BASE_URL};
