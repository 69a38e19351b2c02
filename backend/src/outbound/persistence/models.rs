//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::UserRecord;

use super::schema::{user_programming_languages, users};

/// Insertable struct for a new registration.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub middle_name: Option<&'a str>,
    pub phone: &'a str,
    pub email: &'a str,
    pub birthdate: NaiveDate,
    pub gender: &'a str,
    pub biography: &'a str,
}

impl<'a> From<&'a UserRecord> for NewUserRow<'a> {
    fn from(record: &'a UserRecord) -> Self {
        let name = record.name();
        Self {
            first_name: name.first(),
            last_name: name.last(),
            middle_name: name.middle(),
            phone: record.phone(),
            email: record.email(),
            birthdate: record.birthdate(),
            gender: record.gender().as_str(),
            biography: record.biography(),
        }
    }
}

/// Insertable link between a stored user and one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Insertable)]
#[diesel(table_name = user_programming_languages)]
pub(crate) struct NewUserLanguageRow {
    pub user_id: i32,
    pub language_id: i32,
}
