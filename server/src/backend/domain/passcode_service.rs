//! Passcode registry: teachers create and delete class codes, students are
//! admitted against them.
//!
//! Every change is a read-modify-write of the whole shared list, committed
//! with compare-and-swap. If another writer commits between our read and our
//! write, the change is recomputed from a fresh read, so two students
//! admitted at the same moment cannot overwrite each other's seat.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::domain::commands::passcode::{AdmitStudentCommand, CreatePasscodeCommand};
use crate::backend::domain::models::passcode::{
    normalize_code, AdmissionError, PasscodeEntry, RegistryError, ValidationError,
};
use crate::backend::domain::models::session::StudentSession;
use crate::backend::storage::repositories::{PasscodeRepository, PasscodeSnapshot};
use crate::backend::storage::KeyValueStorage;

/// Attempts before giving up on a contended update
const MAX_UPDATE_ATTEMPTS: usize = 5;

/// What an update decided to do with the list it was shown
enum Outcome<T> {
    Commit(Vec<PasscodeEntry>, T),
    Keep(T),
}

#[derive(Clone)]
pub struct PasscodeService {
    repository: PasscodeRepository,
}

impl PasscodeService {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            repository: PasscodeRepository::new(storage),
        }
    }

    /// All passcodes in creation order
    pub async fn list_codes(&self) -> Vec<PasscodeEntry> {
        self.repository.load().await.entries
    }

    pub async fn create_code(&self, command: CreatePasscodeCommand) -> Result<PasscodeEntry, RegistryError> {
        let code = normalize_code(&command.code);
        if code.is_empty() {
            return Err(ValidationError::MissingField("code").into());
        }
        let start_date = parse_form_date("start date", &command.start_date)?;
        let end_date = parse_form_date("end date", &command.end_date)?;

        let entry = PasscodeEntry::new(&code, command.max_users, start_date, end_date);
        info!(
            "Creating passcode {} for {} users ({} to {})",
            entry.code, entry.max_users, entry.start_date, entry.end_date
        );

        self.update(|snapshot| {
            if snapshot.find(&entry.code).is_some() {
                return Err(ValidationError::DuplicateCode(entry.code.clone()).into());
            }
            let mut entries = snapshot.entries.clone();
            entries.push(entry.clone());
            Ok(Outcome::Commit(entries, entry.clone()))
        })
        .await
    }

    /// Remove a passcode. Returns false if no such code existed.
    ///
    /// Callers are expected to have confirmed the deletion with the teacher.
    pub async fn delete_code(&self, code: &str) -> Result<bool, RegistryError> {
        let code = normalize_code(code);
        info!("Deleting passcode {}", code);

        self.update(|snapshot| {
            if snapshot.find(&code).is_none() {
                return Ok(Outcome::Keep(false));
            }
            let entries = snapshot.entries.iter().filter(|e| e.code != code).cloned().collect();
            Ok(Outcome::Commit(entries, true))
        })
        .await
    }

    /// Admit a student, recording their name against the code on first use.
    ///
    /// A student already on the list is always let back in, even when the
    /// code has since filled up. A first-time student whose seat cannot be
    /// written is refused with `StorageUnavailable`, since every later
    /// budget request checks for that seat.
    pub async fn admit(&self, command: AdmitStudentCommand) -> Result<StudentSession, RegistryError> {
        if command.name.trim().is_empty() {
            return Err(AdmissionError::MissingName.into());
        }
        if command.code.trim().is_empty() {
            return Err(AdmissionError::MissingCode.into());
        }

        let session = StudentSession::new(&command.name, &command.code);
        let today = command.today;

        let result = self
            .update(|snapshot| {
                let entry = check_window(snapshot, &session.code, today)?;
                if entry.has_member(&session.normalized_name) {
                    debug!("{} is already registered on {}", session.normalized_name, entry.code);
                    return Ok(Outcome::Keep(()));
                }
                if entry.is_full() {
                    return Err(AdmissionError::SessionFull.into());
                }

                let mut entries = snapshot.entries.clone();
                if let Some(target) = entries.iter_mut().find(|e| e.code == session.code) {
                    target.used_by.push(session.normalized_name.clone());
                }
                Ok(Outcome::Commit(entries, ()))
            })
            .await;

        if let Err(e) = result {
            info!("Admission of {} to {} refused: {}", session.normalized_name, session.code, e);
            return Err(e);
        }

        info!("Admitted {} to {}", session.normalized_name, session.code);
        Ok(session)
    }

    /// Check that a student previously admitted to `code` may still use it
    /// on `today`. Nothing is written.
    pub async fn verify_session(&self, name: &str, code: &str, today: NaiveDate) -> Result<StudentSession, RegistryError> {
        let session = StudentSession::new(name, code);
        let snapshot = self.repository.load().await;
        let entry = check_window(&snapshot, &session.code, today)?;
        if !entry.has_member(&session.normalized_name) {
            return Err(AdmissionError::NotAdmitted.into());
        }
        Ok(session)
    }

    /// Run `apply` against fresh reads of the list until its result commits
    async fn update<T>(
        &self,
        mut apply: impl FnMut(&PasscodeSnapshot) -> Result<Outcome<T>, RegistryError>,
    ) -> Result<T, RegistryError> {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let snapshot = self.repository.load().await;
            let (entries, value) = match apply(&snapshot)? {
                Outcome::Keep(value) => return Ok(value),
                Outcome::Commit(entries, value) => (entries, value),
            };

            match self.repository.replace(&snapshot, &entries).await {
                Ok(true) => return Ok(value),
                Ok(false) => {
                    debug!("Passcode list changed underneath us (attempt {}), retrying", attempt);
                }
                Err(e) => {
                    warn!("Failed to save passcode list: {:#}", e);
                    return Err(RegistryError::StorageUnavailable);
                }
            }
        }

        warn!("Gave up updating passcode list after {} attempts", MAX_UPDATE_ATTEMPTS);
        Err(RegistryError::Contention)
    }
}

/// Find `code` and make sure it is open on `today`
fn check_window<'a>(snapshot: &'a PasscodeSnapshot, code: &str, today: NaiveDate) -> Result<&'a PasscodeEntry, AdmissionError> {
    if snapshot.is_empty() {
        return Err(AdmissionError::RegistryEmpty);
    }
    let entry = snapshot.find(code).ok_or(AdmissionError::InvalidCode)?;
    if !entry.is_open_on(today) {
        return Err(AdmissionError::OutOfWindow {
            start: entry.start_date,
            end: entry.end_date,
        });
    }
    Ok(entry)
}

fn parse_form_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
