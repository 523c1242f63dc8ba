use strum_macros::{Display, EnumIter, EnumString};

/// Departments the editor offers. Stored records may carry values outside
/// this set; those persist untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum Department {
    Accounts,
    Administration,
    Marketing,
    #[strum(serialize = "HR")]
    Hr,
}
