//! PostgreSQL-backed `RegistrationRepository` implementation using Diesel ORM.
//!
//! One save is one transaction on a dedicated connection: the user row, then
//! one link row per selected language, looked up by name in the reference
//! vocabulary. A language without a reference row aborts the whole save.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{RegistrationId, UserRecord};

use super::connection::ConnectionFactory;
use super::error_mapping::{map_connection_error, map_diesel_error};
use super::models::{NewUserLanguageRow, NewUserRow};
use super::schema::{programming_languages, user_programming_languages, users};

/// Failure inside the save transaction; any variant rolls it back.
#[derive(Debug, thiserror::Error)]
enum SaveError {
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
    #[error("no reference row for programming language {name}")]
    UnknownLanguage { name: &'static str },
}

fn map_save_error(error: SaveError) -> RegistrationRepositoryError {
    match error {
        SaveError::Diesel(error) => map_diesel_error(error),
        SaveError::UnknownLanguage { name } => RegistrationRepositoryError::unknown_language(name),
    }
}

/// Diesel-backed implementation of the `RegistrationRepository` port.
#[derive(Debug, Clone)]
pub struct DieselRegistrationRepository {
    connections: ConnectionFactory,
}

impl DieselRegistrationRepository {
    pub fn new(connections: ConnectionFactory) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn save(&self, record: &UserRecord) -> Result<RegistrationId, RegistrationRepositoryError> {
        let mut conn = self
            .connections
            .establish()
            .await
            .map_err(map_connection_error)?;
        let user_row = NewUserRow::from(record);
        let languages = record.languages();

        let user_id = conn
            .transaction::<_, SaveError, _>(|conn| {
                async move {
                    let user_id: i32 = diesel::insert_into(users::table)
                        .values(&user_row)
                        .returning(users::id)
                        .get_result(conn)
                        .await?;

                    for language in languages {
                        let name = language.as_str();
                        let language_id: i32 = programming_languages::table
                            .filter(programming_languages::name.eq(name))
                            .select(programming_languages::id)
                            .first(conn)
                            .await
                            .optional()?
                            .ok_or(SaveError::UnknownLanguage { name })?;

                        diesel::insert_into(user_programming_languages::table)
                            .values(NewUserLanguageRow {
                                user_id,
                                language_id,
                            })
                            .execute(conn)
                            .await?;
                    }

                    Ok(user_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_save_error)?;

        debug!(user_id, languages = languages.len(), "registration committed");
        Ok(RegistrationId::new(user_id))
    }
}
