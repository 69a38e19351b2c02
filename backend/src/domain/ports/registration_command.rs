//! Driving port for the registration use-case.
//!
//! Inbound adapters hand over the raw submission and receive either the new
//! identifier or the field errors to echo back, without touching persistence.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationId, SubmittedForm, ValidationErrors};

/// Result of a registration attempt that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The submission was stored under the returned identifier.
    Registered(RegistrationId),
    /// One or more fields failed validation; nothing was stored.
    Rejected(ValidationErrors),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate `form` and persist it when every field passes.
    ///
    /// Returns `Err` only when the store fails.
    async fn register(&self, form: &SubmittedForm) -> Result<RegistrationOutcome, Error>;
}
