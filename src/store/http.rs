//! Blocking HTTP implementation of the record store contract.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | list (filtered) | GET | `/payroll/all` |
//! | get one | GET | `/payroll/{id}` |
//! | create | POST | `/payroll` |
//! | update | PUT | `/payroll/{id}` |
//! | delete | DELETE | `/payroll/{id}` |
//!
//! One outstanding request per user action, no retry, no coalescing.

use serde::Deserialize;
use tracing::debug;

use crate::model::PayrollRecord;

use super::{ListFilter, RecordStore, StoreError};

/// Error body the store sends with non-2xx statuses, when it sends one.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct HttpRecordStore {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::agent(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request_error(err: ureq::Error) -> StoreError {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_json::<ErrorBody>()
                    .ok()
                    .and_then(|body| body.error)
                    .unwrap_or_else(|| format!("store returned status {status}"));
                StoreError::Rejected { status, message }
            }
            ureq::Error::Transport(transport) => StoreError::Transport(transport.to_string()),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(response: ureq::Response) -> Result<T, StoreError> {
        response
            .into_json()
            .map_err(|err| StoreError::Malformed(err.to_string()))
    }
}

impl RecordStore for HttpRecordStore {
    fn list(&self, filter: &ListFilter) -> Result<Vec<PayrollRecord>, StoreError> {
        let url = self.url("/payroll/all");
        debug!(%url, ?filter, "listing payroll records");

        let mut request = self.agent.get(&url);
        for (key, value) in filter.query_params() {
            request = request.query(key, &value);
        }
        let response = request.call().map_err(Self::request_error)?;
        Self::decode(response)
    }

    fn fetch(&self, id: &str) -> Result<PayrollRecord, StoreError> {
        let url = self.url(&format!("/payroll/{id}"));
        debug!(%url, "fetching payroll record");

        let response = self.agent.get(&url).call().map_err(Self::request_error)?;
        Self::decode(response)
    }

    fn create(&self, record: &PayrollRecord) -> Result<PayrollRecord, StoreError> {
        let url = self.url("/payroll");
        debug!(%url, "creating payroll record");

        let response = self
            .agent
            .post(&url)
            .send_json(record)
            .map_err(Self::request_error)?;
        Self::decode(response)
    }

    fn update(&self, id: &str, record: &PayrollRecord) -> Result<PayrollRecord, StoreError> {
        let url = self.url(&format!("/payroll/{id}"));
        debug!(%url, "updating payroll record");

        let response = self
            .agent
            .put(&url)
            .send_json(record)
            .map_err(Self::request_error)?;
        Self::decode(response)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.url(&format!("/payroll/{id}"));
        debug!(%url, "deleting payroll record");

        self.agent
            .delete(&url)
            .call()
            .map_err(Self::request_error)?;
        Ok(())
    }
}
