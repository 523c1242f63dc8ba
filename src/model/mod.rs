pub mod department;
pub mod designation;
pub mod payroll;

pub use department::Department;
pub use designation::Designation;
pub use payroll::{PayrollRecord, RecordDraft, parse_amount, parse_optional_amount};
