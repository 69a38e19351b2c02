//! Builders for the registration port and the HTTP state handed to handlers.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{error, info};

use signup::domain::RegistrationService;
use signup::domain::ports::RegistrationCommand;
use signup::inbound::http::assets::AssetStore;
use signup::inbound::http::form_state::CookiePolicy;
use signup::inbound::http::state::HttpState;
use signup::outbound::persistence::{
    ConnectionFactory, DbConfig, DbConfigError, DieselRegistrationRepository,
};

use super::ServerConfig;

/// Wire the Diesel repository into the registration use-case.
///
/// Missing database settings do not stop the form from being served: the
/// failure is logged once here and every save then reports a connection
/// error.
pub(crate) fn build_registration_command(
    db: Result<DbConfig, DbConfigError>,
) -> Arc<dyn RegistrationCommand> {
    match &db {
        Ok(config) => info!(
            host = config.host(),
            database = config.database(),
            "registrations persist to PostgreSQL"
        ),
        Err(error) => error!(%error, "database settings unavailable; submissions will not be stored"),
    }
    let repository = DieselRegistrationRepository::new(ConnectionFactory::from_settings(db));
    Arc::new(RegistrationService::new(
        Arc::new(repository),
        Arc::new(DefaultClock),
    ))
}

/// Open the assets directory and bundle it with the registration port.
///
/// # Errors
/// Returns [`std::io::Error`] when the assets directory cannot be opened.
pub(super) fn build_http_state(
    config: &ServerConfig,
    registration: Arc<dyn RegistrationCommand>,
) -> std::io::Result<web::Data<HttpState>> {
    let assets = AssetStore::open(&config.assets_dir).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!(
                "failed to open assets directory {}: {e}",
                config.assets_dir.display()
            ),
        )
    })?;
    Ok(web::Data::new(HttpState::new(
        registration,
        Arc::new(assets),
        CookiePolicy::new(config.cookie_secure),
    )))
}
