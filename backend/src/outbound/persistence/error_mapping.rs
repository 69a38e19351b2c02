//! Diesel and connection error mapping for the registration repository.

use tracing::debug;

use crate::domain::ports::RegistrationRepositoryError;

use super::connection::ConnectionError;

/// Map connection failures onto the repository's connection variant.
pub fn map_connection_error(error: ConnectionError) -> RegistrationRepositoryError {
    let message = match error {
        ConnectionError::Settings { message }
        | ConnectionError::Connect { message }
        | ConnectionError::Unconfigured { message } => message,
    };
    RegistrationRepositoryError::connection(message)
}

/// Map Diesel errors; only a closed connection counts as a connection failure.
///
/// Driver messages are logged at debug and replaced with fixed text.
pub fn map_diesel_error(error: diesel::result::Error) -> RegistrationRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RegistrationRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            RegistrationRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RegistrationRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation,
            _,
        ) => RegistrationRepositoryError::query("database constraint violated"),
        _ => RegistrationRepositoryError::query("database error"),
    }
}
