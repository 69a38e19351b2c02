//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the concrete `RegistrationRepository` backed by PostgreSQL via
//! Diesel with async support through `diesel-async`.
//!
//! # Architecture
//!
//! - **Thin adapter**: the repository only translates between Diesel rows
//!   and domain types. No validation happens here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **No pooling**: each save opens a dedicated connection and drops it
//!   once the transaction ends.
//! - **Strongly typed errors**: every database failure is mapped to
//!   `RegistrationRepositoryError`.
//!
//! # Example
//!
//! ```no_run
//! use mockable::DefaultEnv;
//! use signup::outbound::persistence::{
//!     ConnectionFactory, DbConfig, DieselRegistrationRepository,
//! };
//!
//! let config = DbConfig::from_env(&DefaultEnv::new()).expect("POSTGRES_* set");
//! let repo = DieselRegistrationRepository::new(ConnectionFactory::new(config));
//! ```

mod config;
mod connection;
mod diesel_registration_repository;
mod error_mapping;
mod models;
mod schema;

pub use config::{DATABASE_ENV, DbConfig, DbConfigError, HOST_ENV, PASSWORD_ENV, USER_ENV};
pub use connection::{ConnectionError, ConnectionFactory};
pub use diesel_registration_repository::DieselRegistrationRepository;
