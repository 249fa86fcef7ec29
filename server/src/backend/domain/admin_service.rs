use tracing::info;

use crate::backend::domain::commands::admin::{AdminLoginCommand, AdminLoginResult};

/// Gate in front of the teacher's passcode dashboard.
///
/// The secret comes from configuration and is compared exactly: no trimming,
/// no case folding.
#[derive(Clone)]
pub struct AdminService {
    password: String,
}

impl AdminService {
    pub fn new(password: impl Into<String>) -> Self {
        Self { password: password.into() }
    }

    pub fn is_authorized(&self, attempt: &str) -> bool {
        !self.password.is_empty() && attempt == self.password
    }

    /// Validate an admin login attempt
    pub fn login(&self, command: AdminLoginCommand) -> AdminLoginResult {
        info!("Validating admin password (length: {})", command.password.len());

        if self.is_authorized(&command.password) {
            info!("Admin login successful");
            AdminLoginResult {
                success: true,
                message: "Access granted. Welcome to the passcode manager.".to_string(),
            }
        } else {
            info!("Admin login failed");
            AdminLoginResult {
                success: false,
                message: "Incorrect admin password.".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(service: &AdminService, password: &str) -> AdminLoginResult {
        service.login(AdminLoginCommand { password: password.to_string() })
    }

    #[test]
    fn test_correct_password() {
        let service = AdminService::new("admin2024");
        let result = login(&service, "admin2024");
        assert!(result.success);
        assert!(result.message.contains("Access granted"));
    }

    #[test]
    fn test_incorrect_passwords() {
        let service = AdminService::new("admin2024");
        for attempt in ["", "admin", "ADMIN2024", " admin2024", "admin2024 "] {
            let result = login(&service, attempt);
            assert!(!result.success, "'{}' should be rejected", attempt);
            assert_eq!(result.message, "Incorrect admin password.");
        }
    }

    #[test]
    fn test_empty_secret_never_matches() {
        let service = AdminService::new("");
        assert!(!service.is_authorized(""));
    }
}
