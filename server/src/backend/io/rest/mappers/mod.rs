pub mod budget_mapper;
pub mod passcode_mapper;
