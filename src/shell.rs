//! Thin interactive surface over the two engines.
//!
//! Stands in for the out-of-scope navigation chrome: an entry route hosting
//! the editor in create mode and a records route hosting the browser. All
//! decisions of substance live in [`crate::editor`] and [`crate::browser`];
//! this module only prompts and prints.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};

use crate::browser::{RecordBrowser, month_name, status_label};
use crate::config::Config;
use crate::editor::{RecordEditor, SubmitOutcome};
use crate::fields::{self, FieldKind, FieldSpec};
use crate::model::PayrollRecord;
use crate::payslip;
use crate::store::{HttpRecordStore, ListFilter, RecordStore};

pub fn run(config: &Config) -> Result<()> {
    let store = HttpRecordStore::new(&config.api_url);

    loop {
        let choice = maybe(
            Select::new(
                "Payroll Desk",
                vec!["New payroll entry", "Payroll records", "Quit"],
            )
            .prompt(),
        )?;
        match choice {
            Some("New payroll entry") => {
                let mut editor = RecordEditor::new(store.clone());
                edit_form(&mut editor)?;
            }
            Some("Payroll records") => browse(store.clone(), config)?,
            _ => break,
        }
    }
    Ok(())
}

/// Runs the form until the draft is saved or abandoned.
fn edit_form<S: RecordStore>(editor: &mut RecordEditor<S>) -> Result<()> {
    for spec in fields::FIELDS {
        edit_field(editor, spec)?;
    }

    loop {
        if let Some(total) = editor.computed_total() {
            println!(
                "Calculated Total Salary: {}{total:.2}",
                payslip::CURRENCY_MARKER
            );
        }
        if let Some(error) = editor.last_error() {
            println!("{error}");
        }

        let title = if editor.is_editing() {
            "Edit Payroll"
        } else {
            "Employee Payroll Form"
        };
        let action = maybe(
            Select::new(title, vec!["Calculate", "Save", "Edit a field", "Cancel"]).prompt(),
        )?;
        match action {
            Some("Calculate") => {
                editor.compute();
            }
            Some("Save") => match editor.submit() {
                SubmitOutcome::Saved => {
                    println!("Record saved.");
                    return Ok(());
                }
                SubmitOutcome::Invalid | SubmitOutcome::Failed => {}
            },
            Some("Edit a field") => {
                let labels: Vec<&str> = fields::FIELDS.iter().map(|spec| spec.label).collect();
                if let Some(label) = maybe(Select::new("Which field?", labels).prompt())? {
                    if let Some(spec) = fields::FIELDS.iter().find(|spec| spec.label == label) {
                        edit_field(editor, spec)?;
                    }
                }
            }
            _ => {
                editor.cancel();
                return Ok(());
            }
        }
    }
}

/// Prompts for one field with the control its descriptor asks for. Esc
/// keeps the current value.
fn edit_field<S: RecordStore>(editor: &mut RecordEditor<S>, spec: &FieldSpec) -> Result<()> {
    match spec.kind {
        FieldKind::Text | FieldKind::Numeric => {
            let current = editor.draft().text(spec.key).unwrap_or("").to_string();
            if let Some(value) = maybe(
                Text::new(&format!("{}:", spec.label))
                    .with_initial_value(&current)
                    .prompt(),
            )? {
                editor.set_field(spec.key, &value);
            }
        }
        FieldKind::Choice(set) => {
            let mut options = vec![String::new()];
            options.extend(set.options());
            if let Some(choice) = maybe(
                Select::new(&format!("{}:", spec.label), options)
                    .with_help_message("empty option leaves the field unset")
                    .prompt(),
            )? {
                editor.set_field(spec.key, &choice);
            }
        }
        FieldKind::Checkbox => {
            let current = editor.draft().is_active;
            if let Some(active) = maybe(
                Confirm::new(&format!("{}?", spec.label))
                    .with_default(current)
                    .prompt(),
            )? {
                editor.set_active(active);
            }
        }
    }
    Ok(())
}

fn browse(store: HttpRecordStore, config: &Config) -> Result<()> {
    let browser = Rc::new(RefCell::new(RecordBrowser::new(store.clone())));
    browser.borrow_mut().reload();

    loop {
        print_listing(&browser.borrow());

        let action = maybe(
            Select::new(
                "Payroll Records",
                vec![
                    "Change filters",
                    "Edit a record",
                    "Delete a record",
                    "Download payslip",
                    "Refresh",
                    "Back",
                ],
            )
            .prompt(),
        )?;
        match action {
            Some("Change filters") => {
                if let Some(filter) = prompt_filter()? {
                    browser.borrow_mut().set_filter(filter);
                }
            }
            Some("Edit a record") => {
                let Some(id) = pick_record(&browser.borrow(), "Edit which record?")? else {
                    continue;
                };
                let fetched = browser.borrow_mut().fetch_for_edit(&id);
                if let Some(record) = fetched {
                    let mut editor = RecordEditor::new(store.clone())
                        .with_refresh(Box::new(Rc::clone(&browser)));
                    editor.load(Some(&record));
                    edit_form(&mut editor)?;
                }
            }
            Some("Delete a record") => {
                let Some(id) = pick_record(&browser.borrow(), "Delete which record?")? else {
                    continue;
                };
                let confirmed = maybe(
                    Confirm::new("Delete this record?")
                        .with_default(false)
                        .prompt(),
                )?
                .unwrap_or(false);
                if confirmed {
                    browser.borrow_mut().delete(&id);
                }
            }
            Some("Download payslip") => {
                let Some(id) = pick_record(&browser.borrow(), "Payslip for which record?")? else {
                    continue;
                };
                let record = browser
                    .borrow()
                    .records()
                    .iter()
                    .find(|record| record.id.as_deref() == Some(id.as_str()))
                    .cloned();
                if let Some(record) = record {
                    match payslip::save(&record, Path::new(&config.payslip_dir)) {
                        Ok(path) => println!("Payslip saved to {}", path.display()),
                        Err(err) => println!("{err}"),
                    }
                }
            }
            Some("Refresh") => browser.borrow_mut().reload(),
            _ => break,
        }
    }
    Ok(())
}

fn print_listing<S: RecordStore>(browser: &RecordBrowser<S>) {
    println!();
    if let Some(error) = browser.last_error() {
        println!("{error}");
    } else if browser.records().is_empty() {
        println!("{}", browser.empty_message());
    } else {
        println!(
            "{:<12} {:<22} {:<16} {:<18} {:>12} {:<8}",
            "Emp Code", "Name", "Department", "Designation", "Salary", "Status"
        );
        for record in browser.records() {
            let salary = record
                .total_salary
                .map(|total| format!("{}{total:.2}", payslip::CURRENCY_MARKER))
                .unwrap_or_default();
            println!(
                "{:<12} {:<22} {:<16} {:<18} {:>12} {:<8}",
                cell(&record.emp_code),
                cell(&record.emp_name),
                cell(&record.department),
                cell(&record.designation),
                salary,
                status_label(record.is_active),
            );
        }
    }
    println!();
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn prompt_filter() -> Result<Option<ListFilter>> {
    let mut months = vec!["All Months".to_string()];
    months.extend((1u8..=12).map(|m| month_name(m).to_string()));
    let Some(month_choice) = maybe(Select::new("Month:", months.clone()).prompt())? else {
        return Ok(None);
    };
    let month = months
        .iter()
        .position(|name| *name == month_choice)
        .filter(|&index| index > 0)
        .map(|index| index as u8);

    let mut years = vec!["All Years".to_string()];
    years.extend((2020u16..=2025).map(|y| y.to_string()));
    let Some(year_choice) = maybe(Select::new("Year:", years).prompt())? else {
        return Ok(None);
    };
    let year = year_choice.parse::<u16>().ok();

    let Some(status_choice) =
        maybe(Select::new("Status:", vec!["All", "Active", "Inactive"]).prompt())?
    else {
        return Ok(None);
    };
    let is_active = match status_choice {
        "Active" => Some(true),
        "Inactive" => Some(false),
        _ => None,
    };

    Ok(Some(ListFilter {
        month,
        year,
        is_active,
    }))
}

fn pick_record<S: RecordStore>(
    browser: &RecordBrowser<S>,
    prompt: &str,
) -> Result<Option<String>> {
    let choices: Vec<RecordChoice> = browser
        .records()
        .iter()
        .filter_map(RecordChoice::new)
        .collect();
    if choices.is_empty() {
        println!("No records to act on.");
        return Ok(None);
    }
    Ok(maybe(Select::new(prompt, choices).prompt())?.map(|choice| choice.id))
}

struct RecordChoice {
    id: String,
    summary: String,
}

impl RecordChoice {
    fn new(record: &PayrollRecord) -> Option<Self> {
        let id = record.id.clone()?;
        let code = record.emp_code.as_deref().unwrap_or("?");
        let name = record.emp_name.as_deref().unwrap_or("?");
        Some(Self {
            id,
            summary: format!("{code}  {name}"),
        })
    }
}

impl std::fmt::Display for RecordChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary)
    }
}

/// Treats Esc and Ctrl-C as "go back" instead of an error.
fn maybe<T>(outcome: Result<T, InquireError>) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
