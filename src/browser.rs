//! The filtered record listing engine.
//!
//! Owns the filter triple (month, year, active status) and the retrieved
//! collection, and brokers the per-record actions: handing a freshly fetched
//! record to the editor, deleting after the host has confirmed, and
//! explaining an empty result in terms of the active filter.

use chrono::Month;
use tracing::{debug, info};

use crate::editor::RefreshList;
use crate::model::PayrollRecord;
use crate::store::{ListFilter, RecordStore};

pub struct RecordBrowser<S: RecordStore> {
    store: S,
    filter: ListFilter,
    records: Vec<PayrollRecord>,
    last_error: Option<String>,
}

impl<S: RecordStore> RecordBrowser<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            filter: ListFilter::default(),
            records: Vec::new(),
            last_error: None,
        }
    }

    pub fn records(&self) -> &[PayrollRecord] {
        &self.records
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces the filter and re-retrieves; retrieval follows every filter
    /// change.
    pub fn set_filter(&mut self, filter: ListFilter) {
        self.filter = filter;
        self.reload();
    }

    /// Retrieves the filtered collection and replaces local state with it.
    ///
    /// Any failure (transport, rejection, or a malformed body) empties the
    /// collection and surfaces an error; an empty success is not an error.
    /// This is the retrieval the editor's refresh hook reaches.
    pub fn reload(&mut self) {
        match self.store.list(&self.filter) {
            Ok(records) => {
                debug!(count = records.len(), "payroll list retrieved");
                self.records = records;
                self.last_error = None;
            }
            Err(err) => {
                info!(error = %err, "payroll list retrieval failed");
                self.records.clear();
                self.last_error = Some(format!("Failed to fetch payroll data: {err}"));
            }
        }
    }

    /// Deletes after the host has confirmed interactively. Success triggers
    /// a full re-retrieval; failure leaves the collection untouched rather
    /// than optimistically dropping the row.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.store.delete(id) {
            Ok(()) => {
                info!(id, "payroll record deleted");
                self.reload();
                true
            }
            Err(err) => {
                info!(id, error = %err, "payroll record delete failed");
                self.last_error = Some(format!("Failed to delete record: {err}"));
                false
            }
        }
    }

    /// Fetches the full record for the editor. Failure surfaces an error
    /// and the editor must not be activated.
    pub fn fetch_for_edit(&mut self, id: &str) -> Option<PayrollRecord> {
        match self.store.fetch(id) {
            Ok(record) => {
                self.last_error = None;
                Some(record)
            }
            Err(err) => {
                info!(id, error = %err, "payroll record fetch failed");
                self.last_error = Some(format!("Failed to fetch record: {err}"));
                None
            }
        }
    }

    /// Explains an empty collection in terms of the active filter, e.g.
    /// "No records found for March 2024 and Active."
    pub fn empty_message(&self) -> String {
        let mut message = String::from("No records found");
        if !self.filter.is_empty() {
            message.push_str(" for");
            match (self.filter.month, self.filter.year) {
                (Some(month), Some(year)) => {
                    message.push(' ');
                    message.push_str(month_name(month));
                    message.push(' ');
                    message.push_str(&year.to_string());
                }
                (Some(month), None) => {
                    message.push(' ');
                    message.push_str(month_name(month));
                }
                (None, Some(year)) => {
                    message.push(' ');
                    message.push_str(&year.to_string());
                }
                (None, None) => {}
            }
            if let Some(active) = self.filter.is_active {
                if self.filter.month.is_some() || self.filter.year.is_some() {
                    message.push_str(" and");
                }
                message.push(' ');
                message.push_str(status_label(active));
            }
        }
        message.push('.');
        message
    }
}

/// The browser's retrieval is the sole coupling point with the editor.
impl<S: RecordStore> RefreshList for RecordBrowser<S> {
    fn refresh(&mut self) {
        self.reload();
    }
}

pub fn month_name(month: u8) -> &'static str {
    Month::try_from(month).map_or("Unknown", |m| m.name())
}

pub fn status_label(active: bool) -> &'static str {
    if active { "Active" } else { "Inactive" }
}
