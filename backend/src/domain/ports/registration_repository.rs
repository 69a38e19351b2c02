//! Driven port for storing validated registrations.
//!
//! Adapters must treat one `save` as a single unit of work: the user row and
//! every language association commit together or not at all.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{RegistrationId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by registration repository adapters.
    pub enum RegistrationRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "registration store connection failed: {message}",
        /// A statement failed; the transaction was rolled back.
        Query { message: String } => "registration store query failed: {message}",
        /// A selected language has no reference row; the transaction was rolled back.
        UnknownLanguage { name: String } => "no reference row for programming language {name}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Persist `record` atomically and return the generated identifier.
    async fn save(&self, record: &UserRecord) -> Result<RegistrationId, RegistrationRepositoryError>;
}

/// In-memory repository handing out sequential identifiers.
///
/// Keeps every saved record so tests can assert on what reached the store.
#[derive(Debug, Default)]
pub struct FixtureRegistrationRepository {
    saved: Mutex<Vec<UserRecord>>,
}

impl FixtureRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records saved so far, in order.
    pub fn saved(&self) -> Vec<UserRecord> {
        self.saved
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RegistrationRepository for FixtureRegistrationRepository {
    async fn save(&self, record: &UserRecord) -> Result<RegistrationId, RegistrationRepositoryError> {
        let mut records = self
            .saved
            .lock()
            .map_err(|_| RegistrationRepositoryError::query("fixture store poisoned"))?;
        records.push(record.clone());
        let id = i32::try_from(records.len())
            .map_err(|_| RegistrationRepositoryError::query("fixture id overflow"))?;
        Ok(RegistrationId::new(id))
    }
}
