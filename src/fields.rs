//! Declarative description of every draft field.
//!
//! One static table drives the three consumers that used to hide this
//! knowledge in string comparisons: the salary computation (earning vs
//! deduction partition), the generic form renderer (which control to show),
//! and the payslip line items (labels and order).

use strum::IntoEnumIterator;

use crate::model::{Department, Designation};

/// Which control edits the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
    Choice(ChoiceSet),
    Checkbox,
}

/// The enumerated sets offered by choice fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSet {
    Department,
    Designation,
}

impl ChoiceSet {
    pub fn options(self) -> Vec<String> {
        match self {
            ChoiceSet::Department => Department::iter().map(|d| d.to_string()).collect(),
            ChoiceSet::Designation => Designation::iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Ledger role of the field. The earning/deduction partition is fixed; it is
/// not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Identity,
    Earning,
    Deduction,
    Meta,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub group: FieldGroup,
}

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "emp_code",
        label: "Employee Code",
        kind: FieldKind::Text,
        group: FieldGroup::Identity,
    },
    FieldSpec {
        key: "emp_name",
        label: "Employee Name",
        kind: FieldKind::Text,
        group: FieldGroup::Identity,
    },
    FieldSpec {
        key: "department",
        label: "Department",
        kind: FieldKind::Choice(ChoiceSet::Department),
        group: FieldGroup::Identity,
    },
    FieldSpec {
        key: "designation",
        label: "Designation",
        kind: FieldKind::Choice(ChoiceSet::Designation),
        group: FieldGroup::Identity,
    },
    FieldSpec {
        key: "category",
        label: "Category",
        kind: FieldKind::Text,
        group: FieldGroup::Identity,
    },
    FieldSpec {
        key: "basic_salary",
        label: "Basic Salary",
        kind: FieldKind::Numeric,
        group: FieldGroup::Earning,
    },
    FieldSpec {
        key: "da",
        label: "DA",
        kind: FieldKind::Numeric,
        group: FieldGroup::Earning,
    },
    FieldSpec {
        key: "hra",
        label: "HRA",
        kind: FieldKind::Numeric,
        group: FieldGroup::Earning,
    },
    FieldSpec {
        key: "conveyance",
        label: "Conveyance",
        kind: FieldKind::Numeric,
        group: FieldGroup::Earning,
    },
    FieldSpec {
        key: "special_allowance",
        label: "Special Allowance",
        kind: FieldKind::Numeric,
        group: FieldGroup::Earning,
    },
    FieldSpec {
        key: "dp",
        label: "DP",
        kind: FieldKind::Numeric,
        group: FieldGroup::Earning,
    },
    FieldSpec {
        key: "arrears",
        label: "Arrears",
        kind: FieldKind::Numeric,
        group: FieldGroup::Earning,
    },
    FieldSpec {
        key: "overtime",
        label: "Overtime",
        kind: FieldKind::Numeric,
        group: FieldGroup::Earning,
    },
    FieldSpec {
        key: "lop",
        label: "LOP",
        kind: FieldKind::Numeric,
        group: FieldGroup::Deduction,
    },
    FieldSpec {
        key: "advance",
        label: "Advance",
        kind: FieldKind::Numeric,
        group: FieldGroup::Deduction,
    },
    FieldSpec {
        key: "medical_deduction",
        label: "Medical Deduction",
        kind: FieldKind::Numeric,
        group: FieldGroup::Deduction,
    },
    FieldSpec {
        key: "loan",
        label: "Loan",
        kind: FieldKind::Numeric,
        group: FieldGroup::Deduction,
    },
    FieldSpec {
        key: "personal_bill",
        label: "Personal Bill",
        kind: FieldKind::Numeric,
        group: FieldGroup::Deduction,
    },
    FieldSpec {
        key: "other_deduction",
        label: "Other Deduction",
        kind: FieldKind::Numeric,
        group: FieldGroup::Deduction,
    },
    FieldSpec {
        key: "remarks",
        label: "Remarks",
        kind: FieldKind::Text,
        group: FieldGroup::Meta,
    },
    FieldSpec {
        key: "is_active",
        label: "Active",
        kind: FieldKind::Checkbox,
        group: FieldGroup::Meta,
    },
];

pub fn field(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.key == key)
}

pub fn earnings() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|spec| spec.group == FieldGroup::Earning)
}

pub fn deductions() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|spec| spec.group == FieldGroup::Deduction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_is_fixed() {
        let earning_keys: Vec<_> = earnings().map(|spec| spec.key).collect();
        let deduction_keys: Vec<_> = deductions().map(|spec| spec.key).collect();

        assert_eq!(
            earning_keys,
            [
                "basic_salary",
                "da",
                "hra",
                "conveyance",
                "special_allowance",
                "dp",
                "arrears",
                "overtime"
            ]
        );
        assert_eq!(
            deduction_keys,
            [
                "lop",
                "advance",
                "medical_deduction",
                "loan",
                "personal_bill",
                "other_deduction"
            ]
        );
    }

    #[test]
    fn every_numeric_field_is_partitioned() {
        for spec in FIELDS {
            if spec.kind == FieldKind::Numeric {
                assert!(
                    matches!(spec.group, FieldGroup::Earning | FieldGroup::Deduction),
                    "{} has no ledger side",
                    spec.key
                );
            }
        }
    }

    #[test]
    fn choice_sets_list_the_offered_values() {
        assert_eq!(
            ChoiceSet::Department.options(),
            ["Accounts", "Administration", "Marketing", "HR"]
        );
        assert_eq!(
            ChoiceSet::Designation.options(),
            ["Manager", "Account Officer", "Purchase Manager"]
        );
    }

    #[test]
    fn lookup_by_key() {
        assert_eq!(field("hra").unwrap().label, "HRA");
        assert!(field("nope").is_none());
    }
}
