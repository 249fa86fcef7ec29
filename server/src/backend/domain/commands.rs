//! Domain-level command types.
//!
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The REST layer maps the DTOs in the `shared`
//! crate to these types.

pub mod passcode {
    use chrono::NaiveDate;

    /// Input for creating a passcode. Dates are the raw ISO strings from the form.
    #[derive(Debug, Clone)]
    pub struct CreatePasscodeCommand {
        pub code: String,
        pub max_users: u32,
        pub start_date: String,
        pub end_date: String,
    }

    /// A student asking to join a class with a passcode on `today`.
    #[derive(Debug, Clone)]
    pub struct AdmitStudentCommand {
        pub name: String,
        pub code: String,
        pub today: NaiveDate,
    }
}

pub mod admin {
    #[derive(Debug, Clone)]
    pub struct AdminLoginCommand {
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct AdminLoginResult {
        pub success: bool,
        pub message: String,
    }
}
