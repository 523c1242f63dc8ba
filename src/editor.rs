//! The salary-computation form engine.
//!
//! Owns one mutable draft record, derives a computed total from it on
//! demand, and reconciles create-vs-update intent against the record store.
//! Hosting code renders the draft and feeds edits back in; the engine never
//! touches a terminal.

use tracing::{debug, info};

use crate::fields;
use crate::model::{PayrollRecord, RecordDraft};
use crate::store::RecordStore;

/// A listing that can be told to re-fetch itself after a successful write.
/// Injected into the editor at construction; the sole coupling between the
/// editor and whatever hosts the record collection.
pub trait RefreshList {
    fn refresh(&mut self);
}

/// Single-threaded hosts share one listing between shell and editor through
/// `Rc<RefCell<_>>`; refreshing through the handle refreshes the listing.
impl<T: RefreshList> RefreshList for std::rc::Rc<std::cell::RefCell<T>> {
    fn refresh(&mut self) {
        self.borrow_mut().refresh();
    }
}

/// What a submit attempt came to. The host exits edit mode on `Saved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Store accepted the record; the draft has been reset.
    Saved,
    /// Required identification fields were missing; no request was made.
    Invalid,
    /// The store rejected the request or was unreachable; draft and total
    /// are untouched so the user can retry.
    Failed,
}

pub struct RecordEditor<S: RecordStore> {
    store: S,
    draft: RecordDraft,
    /// Backing identity. `Some` puts the editor in edit mode.
    editing: Option<String>,
    computed_total: Option<f64>,
    last_error: Option<String>,
    on_saved: Option<Box<dyn RefreshList>>,
}

impl<S: RecordStore> RecordEditor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            draft: RecordDraft::default(),
            editing: None,
            computed_total: None,
            last_error: None,
            on_saved: None,
        }
    }

    /// Injects the listing to notify after a successful write.
    pub fn with_refresh(mut self, refresh: Box<dyn RefreshList>) -> Self {
        self.on_saved = Some(refresh);
        self
    }

    /// Seeds the draft from an existing record (edit mode) or resets it to
    /// the canonical defaults (create mode). Called every time the record
    /// handed to the editor changes, including switching between records.
    pub fn load(&mut self, record: Option<&PayrollRecord>) {
        match record {
            Some(record) => {
                self.draft = RecordDraft::from_record(record);
                // a record without an identity can only be created
                self.editing = record.id.clone();
                self.computed_total = record.total_salary;
            }
            None => {
                self.draft = RecordDraft::default();
                self.editing = None;
                self.computed_total = None;
            }
        }
        self.last_error = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    pub fn computed_total(&self) -> Option<f64> {
        self.computed_total
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces one string-backed draft field. Unknown keys are ignored.
    pub fn set_field(&mut self, key: &str, value: &str) -> bool {
        self.draft.set_text(key, value)
    }

    pub fn set_active(&mut self, active: bool) {
        self.draft.is_active = active;
    }

    /// Derives the total from the current draft: Σ earnings − Σ deductions,
    /// blank or unparseable amounts counting as zero. Pure with respect to
    /// the draft, so repeated calls without edits agree.
    pub fn compute(&mut self) -> f64 {
        let earnings: f64 = fields::earnings()
            .map(|spec| self.draft.amount(spec.key))
            .sum();
        let deductions: f64 = fields::deductions()
            .map(|spec| self.draft.amount(spec.key))
            .sum();
        let total = earnings - deductions;

        debug!(earnings, deductions, total, "computed salary");
        self.computed_total = Some(total);
        total
    }

    /// Validates, then creates or updates depending on mode.
    ///
    /// A missing employee code or name blocks the attempt before any request
    /// is made. A store failure surfaces the store's message and leaves
    /// draft and total untouched. Success resets the editor and notifies the
    /// injected listing.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.last_error = None;

        if self.draft.emp_code.trim().is_empty() || self.draft.emp_name.trim().is_empty() {
            self.last_error = Some("Employee Code and Name are required.".to_string());
            return SubmitOutcome::Invalid;
        }

        let payload = self.draft.to_record(self.computed_total);
        let result = match &self.editing {
            Some(id) => self.store.update(id, &payload),
            None => self.store.create(&payload),
        };

        match result {
            Ok(_) => {
                info!(
                    emp_code = %self.draft.emp_code,
                    updated = self.editing.is_some(),
                    "payroll record saved"
                );
                self.draft = RecordDraft::default();
                self.editing = None;
                self.computed_total = None;
                if let Some(listing) = self.on_saved.as_mut() {
                    listing.refresh();
                }
                SubmitOutcome::Saved
            }
            Err(err) => {
                info!(error = %err, "payroll record save rejected");
                self.last_error = Some(format!("Error saving record: {err}"));
                SubmitOutcome::Failed
            }
        }
    }

    /// Abandons the draft without any network traffic.
    pub fn cancel(&mut self) {
        self.draft = RecordDraft::default();
        self.editing = None;
        self.computed_total = None;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::store::{ListFilter, StoreError};

    /// Store double that records traffic and can be told to reject writes.
    #[derive(Default)]
    struct ScriptedStore {
        calls: Rc<Cell<usize>>,
        reject_with: Option<String>,
        saved: Rc<RefCell<Vec<PayrollRecord>>>,
        updated_ids: Rc<RefCell<Vec<String>>>,
    }

    impl ScriptedStore {
        fn write(&self, record: &PayrollRecord) -> Result<PayrollRecord, StoreError> {
            self.calls.set(self.calls.get() + 1);
            if let Some(message) = &self.reject_with {
                return Err(StoreError::Rejected {
                    status: 400,
                    message: message.clone(),
                });
            }
            self.saved.borrow_mut().push(record.clone());
            Ok(record.clone())
        }
    }

    impl RecordStore for ScriptedStore {
        fn list(&self, _: &ListFilter) -> Result<Vec<PayrollRecord>, StoreError> {
            Ok(Vec::new())
        }
        fn fetch(&self, _: &str) -> Result<PayrollRecord, StoreError> {
            unreachable!("editor never fetches")
        }
        fn create(&self, record: &PayrollRecord) -> Result<PayrollRecord, StoreError> {
            self.write(record)
        }
        fn update(&self, id: &str, record: &PayrollRecord) -> Result<PayrollRecord, StoreError> {
            self.updated_ids.borrow_mut().push(id.to_string());
            self.write(record)
        }
        fn delete(&self, _: &str) -> Result<(), StoreError> {
            unreachable!("editor never deletes")
        }
    }

    struct CountingRefresh(Rc<Cell<usize>>);

    impl RefreshList for CountingRefresh {
        fn refresh(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn compute_matches_the_fixed_partition() {
        let mut editor = RecordEditor::new(ScriptedStore::default());
        editor.set_field("emp_code", "E1");
        editor.set_field("emp_name", "Alice");
        editor.set_field("basic_salary", "1000");
        editor.set_field("hra", "200");
        editor.set_field("lop", "50");

        assert_eq!(editor.compute(), 1150.0);
        assert_eq!(editor.computed_total(), Some(1150.0));
    }

    #[test]
    fn compute_is_idempotent() {
        let mut editor = RecordEditor::new(ScriptedStore::default());
        editor.set_field("basic_salary", "500.25");
        editor.set_field("advance", "100");

        let first = editor.compute();
        let second = editor.compute();
        assert_eq!(first, second);
        assert_eq!(first, 400.25);
    }

    #[test]
    fn compute_treats_blank_and_garbage_as_zero() {
        let mut editor = RecordEditor::new(ScriptedStore::default());
        editor.set_field("basic_salary", "");
        editor.set_field("da", "not a number");
        editor.set_field("overtime", "75.5");
        editor.set_field("loan", "25.5");

        assert_eq!(editor.compute(), 50.0);
    }

    #[test]
    fn missing_identification_blocks_the_request() {
        let calls = Rc::new(Cell::new(0));
        let store = ScriptedStore {
            calls: Rc::clone(&calls),
            ..Default::default()
        };
        let mut editor = RecordEditor::new(store);
        editor.set_field("emp_name", "Alice");

        assert_eq!(editor.submit(), SubmitOutcome::Invalid);
        assert_eq!(calls.get(), 0);
        assert_eq!(
            editor.last_error(),
            Some("Employee Code and Name are required.")
        );
        // draft untouched
        assert_eq!(editor.draft().emp_name, "Alice");
    }

    #[test]
    fn successful_create_resets_the_editor_and_refreshes() {
        let refreshed = Rc::new(Cell::new(0));
        let saved = Rc::new(RefCell::new(Vec::new()));
        let store = ScriptedStore {
            saved: Rc::clone(&saved),
            ..Default::default()
        };
        let mut editor = RecordEditor::new(store)
            .with_refresh(Box::new(CountingRefresh(Rc::clone(&refreshed))));

        editor.set_field("emp_code", "E1");
        editor.set_field("emp_name", "Alice");
        editor.set_field("basic_salary", "1000");
        editor.compute();

        assert_eq!(editor.submit(), SubmitOutcome::Saved);
        assert_eq!(refreshed.get(), 1);
        assert_eq!(editor.draft(), &RecordDraft::default());
        assert_eq!(editor.computed_total(), None);
        assert_eq!(editor.last_error(), None);

        let payload = &saved.borrow()[0];
        assert_eq!(payload.total_salary, Some(1000.0));
    }

    #[test]
    fn uncomputed_total_submits_as_absent() {
        let saved = Rc::new(RefCell::new(Vec::new()));
        let store = ScriptedStore {
            saved: Rc::clone(&saved),
            ..Default::default()
        };
        let mut editor = RecordEditor::new(store);
        editor.set_field("emp_code", "E1");
        editor.set_field("emp_name", "Alice");
        editor.set_field("basic_salary", "1000");

        assert_eq!(editor.submit(), SubmitOutcome::Saved);
        assert_eq!(saved.borrow()[0].total_salary, None);
    }

    #[test]
    fn store_rejection_preserves_the_draft() {
        let store = ScriptedStore {
            reject_with: Some("duplicate employee code".to_string()),
            ..Default::default()
        };
        let mut editor = RecordEditor::new(store);
        editor.set_field("emp_code", "E1");
        editor.set_field("emp_name", "Alice");
        editor.compute();

        assert_eq!(editor.submit(), SubmitOutcome::Failed);
        assert_eq!(
            editor.last_error(),
            Some("Error saving record: duplicate employee code")
        );
        assert_eq!(editor.draft().emp_code, "E1");
        assert_eq!(editor.computed_total(), Some(0.0));
    }

    #[test]
    fn loading_a_record_enters_edit_mode_and_update_is_keyed() {
        let updated_ids = Rc::new(RefCell::new(Vec::new()));
        let store = ScriptedStore {
            updated_ids: Rc::clone(&updated_ids),
            ..Default::default()
        };
        let mut editor = RecordEditor::new(store);

        let record = PayrollRecord {
            id: Some("17".into()),
            emp_code: Some("E17".into()),
            emp_name: Some("Bob".into()),
            total_salary: Some(900.0),
            ..Default::default()
        };
        editor.load(Some(&record));

        assert!(editor.is_editing());
        assert_eq!(editor.computed_total(), Some(900.0));
        assert_eq!(editor.submit(), SubmitOutcome::Saved);
        assert_eq!(updated_ids.borrow().as_slice(), ["17"]);
        assert!(!editor.is_editing());
    }

    #[test]
    fn record_without_identity_stays_in_create_mode() {
        let mut editor = RecordEditor::new(ScriptedStore::default());
        let record = PayrollRecord {
            emp_code: Some("E1".into()),
            ..Default::default()
        };
        editor.load(Some(&record));
        assert!(!editor.is_editing());
    }

    #[test]
    fn reloading_with_none_resets() {
        let mut editor = RecordEditor::new(ScriptedStore::default());
        editor.set_field("emp_code", "E1");
        editor.compute();

        editor.load(None);
        assert_eq!(editor.draft(), &RecordDraft::default());
        assert_eq!(editor.computed_total(), None);
    }

    #[test]
    fn cancel_resets_without_traffic() {
        let calls = Rc::new(Cell::new(0));
        let store = ScriptedStore {
            calls: Rc::clone(&calls),
            ..Default::default()
        };
        let mut editor = RecordEditor::new(store);
        editor.set_field("emp_code", "E1");
        editor.compute();

        editor.cancel();
        assert_eq!(calls.get(), 0);
        assert_eq!(editor.draft(), &RecordDraft::default());
        assert_eq!(editor.computed_total(), None);
    }
}
