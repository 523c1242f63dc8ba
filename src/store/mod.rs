//! The external record store, seen from the client side.
//!
//! The store is a conventional REST-ish CRUD service; it is consumed, never
//! owned. Engines are generic over [`RecordStore`] so tests can substitute
//! an in-memory double.

use thiserror::Error;

use crate::model::PayrollRecord;

pub mod http;

pub use http::HttpRecordStore;

/// Narrows the list operation. Omitted fields impose no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Calendar month, 1-12.
    pub month: Option<u8>,
    /// Four-digit year.
    pub year: Option<u16>,
    pub is_active: Option<bool>,
}

impl ListFilter {
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.year.is_none() && self.is_active.is_none()
    }

    /// Query parameters for the list endpoint; only present fields appear.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(month) = self.month {
            params.push(("month", month.to_string()));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(active) = self.is_active {
            params.push(("is_active", if active { "1" } else { "0" }.to_string()));
        }
        params
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered with a non-success status. The message is the
    /// store's own `error` field when the body carried one, otherwise a
    /// generic fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response arrived but was not the shape the contract promises.
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub trait RecordStore {
    fn list(&self, filter: &ListFilter) -> Result<Vec<PayrollRecord>, StoreError>;
    fn fetch(&self, id: &str) -> Result<PayrollRecord, StoreError>;
    fn create(&self, record: &PayrollRecord) -> Result<PayrollRecord, StoreError>;
    fn update(&self, id: &str, record: &PayrollRecord) -> Result<PayrollRecord, StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}
