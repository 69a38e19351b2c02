//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::build_registration_command;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use signup::Trace;
use signup::domain::ports::RegistrationCommand;
use signup::inbound::http::routes;
use signup::inbound::http::state::HttpState;

use std::sync::Arc;
use tracing::info;

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .wrap(Trace)
        .configure(routes)
}

/// Construct an Actix HTTP server for the registration form.
///
/// # Parameters
/// - `config`: bind address, assets directory, and cookie settings.
/// - `registration`: the port submissions are handed to.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the assets directory cannot be opened
/// or the socket cannot be bound.
pub fn create_server(
    config: ServerConfig,
    registration: Arc<dyn RegistrationCommand>,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config, registration)?;
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "registration form listening");
    Ok(server)
}
