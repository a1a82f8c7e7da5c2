//! Repository error taxonomy and the shared failure shim.
//!
//! # Responsibility
//! - Define the single error type returned by every repository method.
//! - Log each failure once per repository call site with its context.
//!
//! # Invariants
//! - An error that is already a `RepoError` passes through unchanged.
//! - Storage faults raised by SQLite map to `REPO_ERROR`; faults the core
//!   cannot attribute to the engine (corrupt rows, schema mismatch) map to
//!   `UNKNOWN_ERROR`. The original message is kept in both cases.
//! - The shim never retries; retry policy belongs to callers.

use crate::db::DbError;
use crate::validation::ValidationErrors;
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Machine-readable code carried by [`RepositoryException`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    RepoError,
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RepoError => "REPO_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrapped failure with its code and the call site that observed it.
#[derive(Debug)]
pub struct RepositoryException {
    pub code: ErrorCode,
    pub message: String,
    /// `Repository.method` that raised the failure, e.g. `TaskRepository.update`.
    pub context: &'static str,
    source: Option<DbError>,
}

impl Display for RepositoryException {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RepositoryException {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

/// Error returned by every repository operation.
#[derive(Debug)]
pub enum RepoError {
    /// One or more field rules failed; nothing was written.
    Validation(ValidationErrors),
    /// A mutation targeted an id with no row.
    NotFound { entity: &'static str, id: String },
    /// Any other failure.
    Repository(RepositoryException),
}

impl RepoError {
    /// Code of a wrapped failure; `None` for validation and not-found.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Repository(err) => Some(err.code),
            Self::Validation(_) | Self::NotFound { .. } => None,
        }
    }

    /// Validation messages, when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::Validation(errors) => Some(errors.messages()),
            _ => None,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Repository(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Repository(err) => err.source(),
        }
    }
}

impl From<ValidationErrors> for RepoError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Raw failure observed inside a repository method body.
#[derive(Debug)]
pub(crate) enum Fault {
    Repo(RepoError),
    Db(DbError),
    /// Caller mistake detected before storage was contacted.
    Rejected(&'static str),
}

impl From<RepoError> for Fault {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for Fault {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ValidationErrors> for Fault {
    fn from(value: ValidationErrors) -> Self {
        Self::Repo(RepoError::Validation(value))
    }
}

/// Attaches repository call-site context to a fallible body.
pub(crate) trait InRepo<T> {
    fn in_repo(self, context: &'static str) -> RepoResult<T>;
}

impl<T, E: Into<Fault>> InRepo<T> for Result<T, E> {
    fn in_repo(self, context: &'static str) -> RepoResult<T> {
        self.map_err(|err| handle_repository_error(err.into(), context))
    }
}

/// Normalizes a fault into a `RepoError` and logs it with `context`.
pub(crate) fn handle_repository_error(fault: Fault, context: &'static str) -> RepoError {
    let err = match fault {
        Fault::Repo(err) => err,
        Fault::Db(err) => {
            let code = match err {
                DbError::Sqlite(_) => ErrorCode::RepoError,
                DbError::InvalidData(_) | DbError::UnsupportedSchemaVersion { .. } => {
                    ErrorCode::UnknownError
                }
            };
            RepoError::Repository(RepositoryException {
                code,
                message: err.to_string(),
                context,
                source: Some(err),
            })
        }
        Fault::Rejected(message) => RepoError::Repository(RepositoryException {
            code: ErrorCode::RepoError,
            message: message.to_string(),
            context,
            source: None,
        }),
    };

    match &err {
        RepoError::Repository(inner) => error!(
            "event=repo_call module=repo status=error context={} code={} error={}",
            context, inner.code, inner.message
        ),
        other => warn!(
            "event=repo_call module=repo status=rejected context={} error={}",
            context, other
        ),
    }
    err
}

#[cfg(test)]
mod tests {
    use super::{handle_repository_error, ErrorCode, Fault, RepoError};
    use crate::db::DbError;
    use crate::validation::ValidationErrors;

    #[test]
    fn sqlite_faults_map_to_repo_error() {
        let fault = Fault::Db(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows));
        let err = handle_repository_error(fault, "TaskRepository.getAll");
        assert_eq!(err.code(), Some(ErrorCode::RepoError));
        match err {
            RepoError::Repository(inner) => {
                assert_eq!(inner.context, "TaskRepository.getAll");
                assert!(std::error::Error::source(&inner).is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unattributed_faults_map_to_unknown_error() {
        let fault = Fault::Db(DbError::InvalidData("bad row".to_string()));
        let err = handle_repository_error(fault, "TaskRepository.getById");
        assert_eq!(err.code(), Some(ErrorCode::UnknownError));
        assert!(err.to_string().contains("bad row"));
    }

    #[test]
    fn typed_errors_pass_through_unchanged() {
        let original = RepoError::Validation(ValidationErrors(vec!["x".to_string()]));
        let err = handle_repository_error(Fault::Repo(original), "TaskRepository.batchUpdate");
        assert_eq!(err.validation_errors(), Some(&["x".to_string()][..]));

        let not_found = RepoError::not_found("task", "t-1");
        let err = handle_repository_error(Fault::Repo(not_found), "TaskRepository.update");
        assert!(matches!(err, RepoError::NotFound { entity: "task", ref id } if id == "t-1"));
    }

    #[test]
    fn rejected_calls_carry_repo_error_code() {
        let err = handle_repository_error(
            Fault::Rejected("No updates provided"),
            "CategoryRepository.update",
        );
        assert_eq!(err.code(), Some(ErrorCode::RepoError));
        assert_eq!(err.to_string(), "No updates provided");
        assert_eq!(ErrorCode::UnknownError.to_string(), "UNKNOWN_ERROR");
    }
}
