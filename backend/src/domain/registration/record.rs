//! Normalised registration record handed to persistence.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::validation::BIRTHDATE_FORMAT;
use super::{FieldName, ProgrammingLanguage, SubmittedForm};

/// Errors raised when a form cannot be normalised into a [`UserRecord`].
///
/// Seeing one of these after validation passed means the rules and the
/// normaliser disagree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRecordError {
    #[error("field {field} is missing")]
    Missing { field: FieldName },
    #[error("field {field} holds an unusable value: {value}")]
    Unusable { field: FieldName, value: String },
}

/// Gender enumeration accepted by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Stored value: `male` or `female`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name split into its ordered parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    first: String,
    last: String,
    middle: Option<String>,
}

impl PersonName {
    /// Split a full name on whitespace; parts are taken in submitted order.
    fn parse(fullname: &str) -> Result<Self, UserRecordError> {
        let mut parts = fullname.split_whitespace().map(str::to_owned);
        let unusable = || UserRecordError::Unusable {
            field: FieldName::Fullname,
            value: fullname.to_owned(),
        };
        let first = parts.next().ok_or_else(unusable)?;
        let last = parts.next().ok_or_else(unusable)?;
        let middle = parts.next();
        if parts.next().is_some() {
            return Err(unusable());
        }
        Ok(Self {
            first,
            last,
            middle,
        })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn middle(&self) -> Option<&str> {
        self.middle.as_deref()
    }
}

/// One validated registration.
///
/// ## Invariants
/// - Built only through [`UserRecord::from_valid_form`] from a submission
///   that passed [`validate`](super::validate).
/// - `languages` is non-empty, deduplicated, and in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    name: PersonName,
    phone: String,
    email: String,
    birthdate: NaiveDate,
    gender: Gender,
    biography: String,
    languages: Vec<ProgrammingLanguage>,
}

impl UserRecord {
    /// Normalise a validated submission.
    ///
    /// Phone, email and biography are trimmed; the full name is split into
    /// first, last and optional middle parts.
    ///
    /// # Examples
    /// ```
    /// use signup::domain::{FieldName, SubmittedForm, UserRecord};
    ///
    /// let form = SubmittedForm::new()
    ///     .with(FieldName::Fullname, "Ada Lovelace")
    ///     .with(FieldName::Phone, "+79991234567")
    ///     .with(FieldName::Email, "ada@example.org")
    ///     .with(FieldName::Birthdate, "1815-12-10")
    ///     .with(FieldName::Gender, "female")
    ///     .with(FieldName::Language, "Pascal")
    ///     .with(FieldName::Bio, "Analytical engine enthusiast")
    ///     .with(FieldName::Contract, "on");
    /// let record = UserRecord::from_valid_form(&form).expect("valid form");
    /// assert_eq!(record.name().last(), "Lovelace");
    /// assert!(record.name().middle().is_none());
    /// ```
    pub fn from_valid_form(form: &SubmittedForm) -> Result<Self, UserRecordError> {
        let required = |field: FieldName| {
            form.first(field)
                .ok_or(UserRecordError::Missing { field })
        };
        let unusable = |field: FieldName, value: &str| UserRecordError::Unusable {
            field,
            value: value.to_owned(),
        };

        let name = PersonName::parse(required(FieldName::Fullname)?)?;

        let raw_birthdate = required(FieldName::Birthdate)?;
        let birthdate = NaiveDate::parse_from_str(raw_birthdate, BIRTHDATE_FORMAT)
            .map_err(|_| unusable(FieldName::Birthdate, raw_birthdate))?;

        let raw_gender = required(FieldName::Gender)?;
        let gender = raw_gender
            .parse::<Gender>()
            .map_err(|()| unusable(FieldName::Gender, raw_gender))?;

        let mut languages = Vec::new();
        for raw in form.all(FieldName::Language) {
            let language = raw
                .parse::<ProgrammingLanguage>()
                .map_err(|_| unusable(FieldName::Language, raw))?;
            if !languages.contains(&language) {
                languages.push(language);
            }
        }
        if languages.is_empty() {
            return Err(UserRecordError::Missing {
                field: FieldName::Language,
            });
        }

        Ok(Self {
            name,
            phone: required(FieldName::Phone)?.trim().to_owned(),
            email: required(FieldName::Email)?.trim().to_owned(),
            birthdate,
            gender,
            biography: required(FieldName::Bio)?.trim().to_owned(),
            languages,
        })
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birthdate(&self) -> NaiveDate {
        self.birthdate
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn biography(&self) -> &str {
        &self.biography
    }

    pub fn languages(&self) -> &[ProgrammingLanguage] {
        &self.languages
    }
}

/// Identifier generated by the store for a persisted registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistrationId(i32);

impl RegistrationId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
