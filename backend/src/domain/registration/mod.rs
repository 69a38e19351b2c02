//! Registration form model: raw submissions, field rules, and the normalised
//! record that reaches persistence.

mod errors;
mod field;
mod form;
mod language;
mod record;
pub mod validation;

pub use errors::{SERVER_ERROR_KEY, ValidationErrors};
pub use field::FieldName;
pub use form::SubmittedForm;
pub use language::{ProgrammingLanguage, UnknownLanguage};
pub use record::{Gender, PersonName, RegistrationId, UserRecord, UserRecordError};
pub use validation::{CONTRACT_ACCEPTED, validate};
