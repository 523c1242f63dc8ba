use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Wire shape of a payroll record as the store sends and accepts it.
///
/// Every field is present-but-nullable. Stores in the wild are loose about
/// types here: numeric fields arrive as JSON numbers or as numeric strings,
/// the active flag as a bool or a 0/1 integer, the id as a string or a
/// number. Deserialization accepts all of those; serialization always emits
/// typed values. The id never rides in a request body (identity travels in
/// the URL path), so it is skipped on serialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    #[serde(default, deserialize_with = "opt_id", skip_serializing)]
    pub id: Option<String>,

    #[serde(default)]
    pub emp_code: Option<String>,
    #[serde(default)]
    pub emp_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "opt_amount")]
    pub basic_salary: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub da: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub hra: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub conveyance: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub special_allowance: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub dp: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub arrears: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub overtime: Option<f64>,

    #[serde(default, deserialize_with = "opt_amount")]
    pub lop: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub advance: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub medical_deduction: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub loan: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub personal_bill: Option<f64>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub other_deduction: Option<f64>,

    #[serde(default, deserialize_with = "opt_amount")]
    pub total_salary: Option<f64>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: bool,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl PayrollRecord {
    /// Stored amount for a numeric field key, `None` for unknown keys or
    /// absent values.
    pub fn amount(&self, key: &str) -> Option<f64> {
        match key {
            "basic_salary" => self.basic_salary,
            "da" => self.da,
            "hra" => self.hra,
            "conveyance" => self.conveyance,
            "special_allowance" => self.special_allowance,
            "dp" => self.dp,
            "arrears" => self.arrears,
            "overtime" => self.overtime,
            "lop" => self.lop,
            "advance" => self.advance,
            "medical_deduction" => self.medical_deduction,
            "loan" => self.loan,
            "personal_bill" => self.personal_bill,
            "other_deduction" => self.other_deduction,
            "total_salary" => self.total_salary,
            _ => None,
        }
    }
}

fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(s.as_str(), "1" | "true" | "True"),
        _ => false,
    })
}

/// Amount semantics of the editor: blank or unparseable input counts as
/// zero, never as a validation failure.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Amount semantics of a submission payload: blank or unparseable input is
/// simply absent.
pub fn parse_optional_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn opt_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn amount_input(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// The editor's mutable draft of one record.
///
/// Text and numeric fields hold the raw input string; numeric coercion is
/// deferred to computation and submission time. Only the active flag is a
/// strict bool. `default()` is the canonical all-fields-present shape a
/// fresh form starts from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub emp_code: String,
    pub emp_name: String,
    pub department: String,
    pub designation: String,
    pub category: String,

    pub basic_salary: String,
    pub da: String,
    pub hra: String,
    pub conveyance: String,
    pub special_allowance: String,
    pub dp: String,
    pub arrears: String,
    pub overtime: String,

    pub lop: String,
    pub advance: String,
    pub medical_deduction: String,
    pub loan: String,
    pub personal_bill: String,
    pub other_deduction: String,

    pub remarks: String,
    pub is_active: bool,
}

impl RecordDraft {
    /// Deterministic overlay of a stored record onto the canonical default
    /// shape. Every field control ends up with a defined value even when the
    /// source record omits the field.
    pub fn from_record(record: &PayrollRecord) -> Self {
        Self {
            emp_code: record.emp_code.clone().unwrap_or_default(),
            emp_name: record.emp_name.clone().unwrap_or_default(),
            department: record.department.clone().unwrap_or_default(),
            designation: record.designation.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
            basic_salary: amount_input(record.basic_salary),
            da: amount_input(record.da),
            hra: amount_input(record.hra),
            conveyance: amount_input(record.conveyance),
            special_allowance: amount_input(record.special_allowance),
            dp: amount_input(record.dp),
            arrears: amount_input(record.arrears),
            overtime: amount_input(record.overtime),
            lop: amount_input(record.lop),
            advance: amount_input(record.advance),
            medical_deduction: amount_input(record.medical_deduction),
            loan: amount_input(record.loan),
            personal_bill: amount_input(record.personal_bill),
            other_deduction: amount_input(record.other_deduction),
            remarks: record.remarks.clone().unwrap_or_default(),
            is_active: record.is_active,
        }
    }

    /// Raw input for a string-backed field key.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.slot(key).map(String::as_str)
    }

    /// Replaces exactly one string-backed field. Returns false for unknown
    /// keys and for the checkbox field, which is set through `is_active`.
    pub fn set_text(&mut self, key: &str, value: &str) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Numeric reading of a field with the blank-or-unparseable-is-zero
    /// rule.
    pub fn amount(&self, key: &str) -> f64 {
        self.text(key).map(parse_amount).unwrap_or(0.0)
    }

    /// Submission payload: the draft's fields plus the last computed total,
    /// which may legitimately be absent.
    pub fn to_record(&self, total_salary: Option<f64>) -> PayrollRecord {
        PayrollRecord {
            id: None,
            emp_code: opt_text(&self.emp_code),
            emp_name: opt_text(&self.emp_name),
            department: opt_text(&self.department),
            designation: opt_text(&self.designation),
            category: opt_text(&self.category),
            basic_salary: parse_optional_amount(&self.basic_salary),
            da: parse_optional_amount(&self.da),
            hra: parse_optional_amount(&self.hra),
            conveyance: parse_optional_amount(&self.conveyance),
            special_allowance: parse_optional_amount(&self.special_allowance),
            dp: parse_optional_amount(&self.dp),
            arrears: parse_optional_amount(&self.arrears),
            overtime: parse_optional_amount(&self.overtime),
            lop: parse_optional_amount(&self.lop),
            advance: parse_optional_amount(&self.advance),
            medical_deduction: parse_optional_amount(&self.medical_deduction),
            loan: parse_optional_amount(&self.loan),
            personal_bill: parse_optional_amount(&self.personal_bill),
            other_deduction: parse_optional_amount(&self.other_deduction),
            total_salary,
            is_active: self.is_active,
            remarks: opt_text(&self.remarks),
        }
    }

    fn slot(&self, key: &str) -> Option<&String> {
        Some(match key {
            "emp_code" => &self.emp_code,
            "emp_name" => &self.emp_name,
            "department" => &self.department,
            "designation" => &self.designation,
            "category" => &self.category,
            "basic_salary" => &self.basic_salary,
            "da" => &self.da,
            "hra" => &self.hra,
            "conveyance" => &self.conveyance,
            "special_allowance" => &self.special_allowance,
            "dp" => &self.dp,
            "arrears" => &self.arrears,
            "overtime" => &self.overtime,
            "lop" => &self.lop,
            "advance" => &self.advance,
            "medical_deduction" => &self.medical_deduction,
            "loan" => &self.loan,
            "personal_bill" => &self.personal_bill,
            "other_deduction" => &self.other_deduction,
            "remarks" => &self.remarks,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        Some(match key {
            "emp_code" => &mut self.emp_code,
            "emp_name" => &mut self.emp_name,
            "department" => &mut self.department,
            "designation" => &mut self.designation,
            "category" => &mut self.category,
            "basic_salary" => &mut self.basic_salary,
            "da" => &mut self.da,
            "hra" => &mut self.hra,
            "conveyance" => &mut self.conveyance,
            "special_allowance" => &mut self.special_allowance,
            "dp" => &mut self.dp,
            "arrears" => &mut self.arrears,
            "overtime" => &mut self.overtime,
            "lop" => &mut self.lop,
            "advance" => &mut self.advance,
            "medical_deduction" => &mut self.medical_deduction,
            "loan" => &mut self.loan,
            "personal_bill" => &mut self.personal_bill,
            "other_deduction" => &mut self.other_deduction,
            "remarks" => &mut self.remarks,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_loose_wire_types() {
        let record: PayrollRecord = serde_json::from_str(
            r#"{
                "id": 42,
                "emp_code": "E1",
                "basic_salary": "1000",
                "hra": 200.5,
                "lop": "",
                "is_active": 1
            }"#,
        )
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("42"));
        assert_eq!(record.basic_salary, Some(1000.0));
        assert_eq!(record.hra, Some(200.5));
        assert_eq!(record.lop, None);
        assert!(record.is_active);
    }

    #[test]
    fn missing_fields_decode_to_null() {
        let record: PayrollRecord = serde_json::from_str(r#"{"emp_name": "Alice"}"#).unwrap();
        assert_eq!(record.emp_name.as_deref(), Some("Alice"));
        assert_eq!(record.id, None);
        assert_eq!(record.total_salary, None);
        assert!(!record.is_active);
    }

    #[test]
    fn id_never_serializes() {
        let record = PayrollRecord {
            id: Some("7".into()),
            emp_code: Some("E7".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["emp_code"], "E7");
    }

    #[test]
    fn overlay_fills_every_control() {
        let record = PayrollRecord {
            emp_code: Some("E1".into()),
            basic_salary: Some(1000.0),
            is_active: true,
            ..Default::default()
        };
        let draft = RecordDraft::from_record(&record);

        assert_eq!(draft.emp_code, "E1");
        assert_eq!(draft.basic_salary, "1000");
        assert!(draft.is_active);
        // omitted fields land on the canonical defaults
        assert_eq!(draft.emp_name, "");
        assert_eq!(draft.loan, "");
    }

    #[test]
    fn overlay_is_deterministic() {
        let record = PayrollRecord {
            emp_name: Some("Alice".into()),
            hra: Some(12.5),
            ..Default::default()
        };
        assert_eq!(
            RecordDraft::from_record(&record),
            RecordDraft::from_record(&record)
        );
    }

    #[test]
    fn amount_treats_blank_and_garbage_as_zero() {
        let mut draft = RecordDraft::default();
        assert_eq!(draft.amount("da"), 0.0);
        draft.set_text("da", "abc");
        assert_eq!(draft.amount("da"), 0.0);
        draft.set_text("da", " 12.5 ");
        assert_eq!(draft.amount("da"), 12.5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut draft = RecordDraft::default();
        assert!(!draft.set_text("is_active", "true"));
        assert!(!draft.set_text("salary", "10"));
        assert_eq!(draft.text("salary"), None);
    }

    #[test]
    fn payload_drops_blank_fields() {
        let mut draft = RecordDraft::default();
        draft.set_text("emp_code", "E1");
        draft.set_text("basic_salary", "1000");
        draft.set_text("da", "nonsense");

        let payload = draft.to_record(Some(1000.0));
        assert_eq!(payload.emp_code.as_deref(), Some("E1"));
        assert_eq!(payload.basic_salary, Some(1000.0));
        assert_eq!(payload.da, None);
        assert_eq!(payload.department, None);
        assert_eq!(payload.total_salary, Some(1000.0));
        assert_eq!(payload.id, None);
    }
}
