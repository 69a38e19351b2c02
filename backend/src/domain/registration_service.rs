//! Registration use-case: validate a submission, then persist it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::ports::{
    RegistrationCommand, RegistrationOutcome, RegistrationRepository, RegistrationRepositoryError,
};
use crate::domain::{Error, SubmittedForm, UserRecord, validate};

/// Domain service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RegistrationService<R> {
    /// Create a service over `repository`; `clock` anchors the birthdate rule.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn map_repository_error(error: RegistrationRepositoryError) -> Error {
    error!(%error, "registration could not be persisted");
    match error {
        RegistrationRepositoryError::Connection { message } => Error::service_unavailable(message),
        RegistrationRepositoryError::Query { message } => Error::internal(message),
        RegistrationRepositoryError::UnknownLanguage { name } => {
            Error::internal(format!("programming language {name} is not registered"))
        }
    }
}

#[async_trait]
impl<R> RegistrationCommand for RegistrationService<R>
where
    R: RegistrationRepository,
{
    async fn register(&self, form: &SubmittedForm) -> Result<RegistrationOutcome, Error> {
        let errors = validate(form, self.clock.local().naive_local());
        if !errors.is_empty() {
            debug!(
                fields = ?errors.keys().collect::<Vec<_>>(),
                "registration rejected by validation"
            );
            return Ok(RegistrationOutcome::Rejected(errors));
        }

        let record = UserRecord::from_valid_form(form)
            .map_err(|err| Error::internal(format!("validated form did not normalise: {err}")))?;
        let id = self
            .repository
            .save(&record)
            .await
            .map_err(map_repository_error)?;

        info!(
            registration_id = %id,
            languages = record.languages().len(),
            "registration stored"
        );
        Ok(RegistrationOutcome::Registered(id))
    }
}
