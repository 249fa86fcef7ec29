//! # Domain Module
//!
//! Business rules for the gift budget planner, independent of HTTP and of
//! the storage backend.
//!
//! ## Module Organization
//!
//! - **passcode_service**: creating, deleting and admitting students against class passcodes
//! - **budget_service**: loading and saving student records, wiring in configuration
//! - **budget_calculator**: pure annual and weekly arithmetic over a record
//! - **admin_service**: the teacher dashboard's shared-secret gate
//! - **clock**: where "today" comes from
//! - **display**: money and percentage formatting
//! - **commands**: internal command types mapped from the REST DTOs
//! - **models**: passcodes, sessions, budget records and the gift catalog
//!
//! ## Business Rules
//!
//! - Passcodes are unique and matched case-insensitively
//! - A code admits students only inside its date window, both ends inclusive
//! - A code's seat count limits first-time students; returning students always get in
//! - Unparsable numbers count as zero; a budget form is never rejected

pub mod admin_service;
pub mod budget_calculator;
pub mod budget_service;
pub mod clock;
pub mod commands;
pub mod display;
pub mod models;
pub mod passcode_service;

pub use admin_service::*;
pub use budget_service::*;
pub use clock::Clock;
pub use passcode_service::*;
