//! Registration form service.
//!
//! A single HTML form collects a user's details, validates them on the
//! server, echoes failures back through short-lived cookies, and stores
//! accepted submissions in PostgreSQL.
//!
//! - [`domain`]: submitted values, field rules, and the registration port.
//! - [`inbound::http`]: Actix handlers, cookie state, and template rendering.
//! - [`outbound::persistence`]: the Diesel-backed repository.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
