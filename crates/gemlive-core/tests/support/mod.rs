//! Scripted gems API used in place of the network.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use gemlive_core::client::{GemRecord, GemsApi, GemsApiError};

/// In-memory [`GemsApi`] over a fixed record set, counting every call.
#[derive(Default)]
pub struct ScriptedGemsApi {
    records: Vec<GemRecord>,
    fail_next_many: Mutex<Option<GemsApiError>>,
    pub one_calls: AtomicUsize,
    pub many_calls: AtomicUsize,
    pub queried_names: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGemsApi {
    pub fn new(records: Vec<GemRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Make the next `fetch_many` call fail with `error`.
    pub fn fail_next_many(self, error: GemsApiError) -> Self {
        *self.fail_next_many.lock().unwrap() = Some(error);
        self
    }

    pub fn one_calls(&self) -> usize {
        self.one_calls.load(Ordering::SeqCst)
    }

    pub fn many_calls(&self) -> usize {
        self.many_calls.load(Ordering::SeqCst)
    }

    /// Every name list passed to `fetch_many`, in call order.
    pub fn queried_names(&self) -> Vec<Vec<String>> {
        self.queried_names.lock().unwrap().clone()
    }
}

impl GemsApi for ScriptedGemsApi {
    async fn fetch_one(&self, name: &str) -> Result<GemRecord, GemsApiError> {
        self.one_calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .iter()
            .find(|record| record.name == name)
            .cloned()
            .ok_or_else(|| GemsApiError::NotFound {
                name: name.to_string(),
            })
    }

    async fn fetch_many(&self, names: &[String]) -> Result<Vec<GemRecord>, GemsApiError> {
        self.many_calls.fetch_add(1, Ordering::SeqCst);
        self.queried_names.lock().unwrap().push(names.to_vec());
        if let Some(error) = self.fail_next_many.lock().unwrap().take() {
            return Err(error);
        }
        // Unknown names are silently omitted, as the bulk endpoint does
        Ok(self
            .records
            .iter()
            .filter(|record| names.contains(&record.name))
            .cloned()
            .collect())
    }
}

pub fn record(name: &str, source_code_uri: Option<&str>, homepage_uri: Option<&str>) -> GemRecord {
    GemRecord {
        name: name.to_string(),
        source_code_uri: source_code_uri.map(String::from),
        homepage_uri: homepage_uri.map(String::from),
    }
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
