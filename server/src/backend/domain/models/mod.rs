pub mod budget;
pub mod catalog;
pub mod passcode;
pub mod session;
