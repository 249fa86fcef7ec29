use chrono::NaiveDate;

use crate::backend::domain::commands::passcode::{AdmitStudentCommand, CreatePasscodeCommand};
use crate::backend::domain::models::passcode::PasscodeEntry;
use crate::backend::domain::models::session::StudentSession;
use shared::{
    CreatePasscodeRequest, Passcode, PasscodeListResponse, StudentLoginRequest,
    StudentLoginResponse,
};

/// Mapper between passcode DTOs and domain models.
pub struct PasscodeMapper;

impl PasscodeMapper {
    /// Converts a domain entry to the dashboard DTO, marking whether it is open on `today`.
    pub fn to_dto(entry: PasscodeEntry, today: NaiveDate) -> Passcode {
        Passcode {
            active: entry.is_open_on(today),
            seats_used: entry.seats_used(),
            code: entry.code,
            max_users: entry.max_users,
            start_date: entry.start_date.format("%Y-%m-%d").to_string(),
            end_date: entry.end_date.format("%Y-%m-%d").to_string(),
            used_by: entry.used_by,
        }
    }

    pub fn to_list_dto(entries: Vec<PasscodeEntry>, today: NaiveDate) -> PasscodeListResponse {
        PasscodeListResponse {
            passcodes: entries.into_iter().map(|e| Self::to_dto(e, today)).collect(),
        }
    }

    pub fn to_create_command(request: CreatePasscodeRequest) -> CreatePasscodeCommand {
        CreatePasscodeCommand {
            code: request.code,
            max_users: request.max_users,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }

    pub fn to_admit_command(request: StudentLoginRequest, today: NaiveDate) -> AdmitStudentCommand {
        AdmitStudentCommand {
            name: request.name,
            code: request.code,
            today,
        }
    }

    pub fn to_login_dto(session: StudentSession) -> StudentLoginResponse {
        StudentLoginResponse {
            student_name: session.display_name,
            normalized_name: session.normalized_name,
            code: session.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dto_marks_active_codes() {
        let mut entry = PasscodeEntry::new(
            "C",
            30,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
        );
        entry.used_by.push("alice".to_string());

        let active = PasscodeMapper::to_dto(entry.clone(), NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert!(active.active);
        assert_eq!(active.seats_used, 1);
        assert_eq!(active.start_date, "2024-09-01");

        let inactive = PasscodeMapper::to_dto(entry, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert!(!inactive.active);
    }
}
