//! # REST API Interface Layer
//!
//! HTTP endpoints for the admin dashboard and the student budget planner.
//! Handlers translate DTOs from the `shared` crate into domain commands and
//! map domain errors to status codes via [`errors`].

pub mod admin_apis;
pub mod budget_apis;
pub mod catalog_apis;
pub mod errors;
pub mod mappers;
pub mod passcode_apis;
pub mod session_apis;

#[cfg(test)]
pub(crate) mod test_support;
