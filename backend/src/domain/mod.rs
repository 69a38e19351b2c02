//! Domain primitives, ports, and the registration use-case.
//!
//! Purpose: keep form rules and persistence contracts free of HTTP and SQL
//! details so adapters can be swapped or faked in tests.
//!
//! Public surface:
//! - `SubmittedForm`, `ValidationErrors`, `validate` — raw input and field rules.
//! - `UserRecord`, `RegistrationId` — what persistence stores and returns.
//! - `RegistrationService` — implementation of the registration port.
//! - `Error`, `ErrorCode`, `TraceId` — transport-agnostic failures.

pub mod error;
pub mod ports;
pub mod registration;
mod registration_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::registration::{
    CONTRACT_ACCEPTED, FieldName, Gender, PersonName, ProgrammingLanguage, RegistrationId,
    SERVER_ERROR_KEY, SubmittedForm, UnknownLanguage, UserRecord, UserRecordError,
    ValidationErrors, validate,
};
pub use self::registration_service::RegistrationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
