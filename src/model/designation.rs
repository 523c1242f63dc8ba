use strum_macros::{Display, EnumIter, EnumString};

/// Designations the editor offers. Same rule as departments: the store does
/// not enforce the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum Designation {
    Manager,
    #[strum(serialize = "Account Officer")]
    AccountOfficer,
    #[strum(serialize = "Purchase Manager")]
    PurchaseManager,
}
