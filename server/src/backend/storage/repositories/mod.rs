pub mod budget_repository;
pub mod passcode_repository;

pub use budget_repository::BudgetRepository;
pub use passcode_repository::{PasscodeRepository, PasscodeSnapshot, PASSCODE_LIST_KEY};
