//! Renders one payroll record as a printable payslip PDF.
//!
//! A4 portrait, built-in Helvetica. The layout mirrors the paper form the
//! clerks know: centered title, identity block, an Earnings column at the
//! left margin and a Deductions column at the horizontal midpoint plus the
//! same margin, each advancing its own vertical cursor, with the total and
//! the generation timestamp centered below whichever column ran longer.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;
use tracing::info;

use crate::fields::{self, FieldSpec};
use crate::model::PayrollRecord;

/// Built-in PDF fonts carry WinAnsi encoding only, so the marker stays in
/// ASCII.
pub const CURRENCY_MARKER: &str = "Rs.";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_STEP: f32 = 10.0;

#[derive(Debug, Error)]
pub enum PayslipError {
    #[error("failed to compose payslip: {0}")]
    Pdf(String),
    #[error("failed to write payslip: {0}")]
    Io(#[from] std::io::Error),
}

/// Line items for one column: label paired with the stored amount, keeping
/// only strictly positive values. Zero and absent amounts are omitted
/// entirely.
pub fn line_items<'a>(
    record: &PayrollRecord,
    specs: impl Iterator<Item = &'a FieldSpec>,
) -> Vec<(&'static str, f64)> {
    specs
        .filter_map(|spec| {
            let value = record.amount(spec.key).unwrap_or(0.0);
            (value > 0.0).then_some((spec.label, value))
        })
        .collect()
}

/// Deterministic document name: `payslip_{emp_code}.pdf`, falling back to a
/// literal `unknown`, with filesystem-hostile characters replaced.
pub fn filename(record: &PayrollRecord) -> String {
    let code = record
        .emp_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .unwrap_or("unknown");
    let safe: String = code
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("payslip_{safe}.pdf")
}

/// Renders the document and returns its bytes.
pub fn render(record: &PayrollRecord) -> Result<Vec<u8>, PayslipError> {
    let (doc, page, layer) = PdfDocument::new("Payslip", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| PayslipError::Pdf(err.to_string()))?;

    text_centered(&layer, &font, "Payslip", 16.0, 20.0);

    let na = |value: Option<&str>| value.filter(|v| !v.is_empty()).unwrap_or("N/A").to_string();
    let mut top = 40.0;
    let identity = [
        format!("Employee Code: {}", na(record.emp_code.as_deref())),
        format!("Employee Name: {}", na(record.emp_name.as_deref())),
        format!("Department: {}", na(record.department.as_deref())),
        format!("Designation: {}", na(record.designation.as_deref())),
        format!(
            "Status: {}",
            if record.is_active { "Active" } else { "Inactive" }
        ),
    ];
    for line in &identity {
        text_at(&layer, &font, line, 12.0, MARGIN, top);
        top += LINE_STEP;
    }
    top += LINE_STEP;

    let deduction_x = PAGE_WIDTH / 2.0 + MARGIN;
    text_at(&layer, &font, "Earnings", 14.0, MARGIN, top);
    text_at(&layer, &font, "Deductions", 14.0, deduction_x, top);
    top += LINE_STEP;

    let earnings_bottom = column(&layer, &font, line_items(record, fields::earnings()), MARGIN, top);
    let deductions_bottom = column(
        &layer,
        &font,
        line_items(record, fields::deductions()),
        deduction_x,
        top,
    );

    let mut bottom = earnings_bottom.max(deductions_bottom) + 2.0 * LINE_STEP;
    let total = record.total_salary.unwrap_or(0.0);
    text_centered(
        &layer,
        &font,
        &format!("Total Salary: {CURRENCY_MARKER}{total:.2}"),
        14.0,
        bottom,
    );
    bottom += LINE_STEP;
    let stamp = Local::now().format("%d/%m/%Y, %I:%M:%S %p");
    text_centered(&layer, &font, &format!("Date: {stamp}"), 14.0, bottom);

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|err| PayslipError::Pdf(err.to_string()))?;
    writer
        .into_inner()
        .map_err(|err| PayslipError::Pdf(err.to_string()))
}

/// Renders and saves into `dir`, returning the written path.
pub fn save(record: &PayrollRecord, dir: &Path) -> Result<PathBuf, PayslipError> {
    let bytes = render(record)?;
    let path = dir.join(filename(record));
    fs::write(&path, bytes)?;
    info!(path = %path.display(), "payslip written");
    Ok(path)
}

fn column(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    items: Vec<(&'static str, f64)>,
    x: f32,
    mut top: f32,
) -> f32 {
    for (label, value) in items {
        text_at(
            layer,
            font,
            &format!("{label}: {CURRENCY_MARKER}{value:.2}"),
            12.0,
            x,
            top,
        );
        top += LINE_STEP;
    }
    top
}

/// Places text by its distance from the page top, jsPDF-style; the PDF
/// y-axis itself grows upward.
fn text_at(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    x: f32,
    top: f32,
) {
    layer.use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - top), font);
}

fn text_centered(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    top: f32,
) {
    // approximate Helvetica advance of 0.5 em per glyph, points to mm
    let width = text.len() as f32 * size * 0.5 * 0.352_778;
    let x = (PAGE_WIDTH - width) / 2.0;
    text_at(layer, font, text, size, x.max(MARGIN), top);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amounts_are_omitted() {
        let record = PayrollRecord {
            basic_salary: Some(0.0),
            hra: Some(500.0),
            ..Default::default()
        };
        let items = line_items(&record, fields::earnings());
        assert_eq!(items, [("HRA", 500.0)]);
    }

    #[test]
    fn absent_amounts_are_omitted() {
        let record = PayrollRecord {
            lop: Some(50.0),
            ..Default::default()
        };
        let items = line_items(&record, fields::deductions());
        assert_eq!(items, [("LOP", 50.0)]);
    }

    #[test]
    fn column_order_follows_the_field_table() {
        let record = PayrollRecord {
            lop: Some(1.0),
            advance: Some(2.0),
            loan: Some(3.0),
            other_deduction: Some(4.0),
            ..Default::default()
        };
        let labels: Vec<_> = line_items(&record, fields::deductions())
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, ["LOP", "Advance", "Loan", "Other Deduction"]);
    }

    #[test]
    fn filename_falls_back_and_sanitizes() {
        assert_eq!(filename(&PayrollRecord::default()), "payslip_unknown.pdf");

        let record = PayrollRecord {
            emp_code: Some("EMP 01/x".into()),
            ..Default::default()
        };
        assert_eq!(filename(&record), "payslip_EMP_01_x.pdf");

        let blank = PayrollRecord {
            emp_code: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(filename(&blank), "payslip_unknown.pdf");
    }

    #[test]
    fn render_produces_a_pdf() {
        let record = PayrollRecord {
            emp_code: Some("E1".into()),
            emp_name: Some("Alice".into()),
            basic_salary: Some(1000.0),
            lop: Some(50.0),
            total_salary: Some(950.0),
            is_active: true,
            ..Default::default()
        };
        let bytes = render(&record).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn save_writes_the_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let record = PayrollRecord {
            emp_code: Some("E9".into()),
            ..Default::default()
        };
        let path = save(&record, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "payslip_E9.pdf");
        assert!(path.exists());
    }
}
