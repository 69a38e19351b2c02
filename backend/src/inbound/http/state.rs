//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the registration port and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::RegistrationCommand;

use super::assets::AssetStore;
use super::form_state::CookiePolicy;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationCommand>,
    pub assets: Arc<AssetStore>,
    pub cookies: CookiePolicy,
}

impl HttpState {
    /// Construct state from the registration port, assets, and cookie policy.
    ///
    /// # Examples
    /// ```no_run
    /// use std::path::Path;
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use signup::domain::RegistrationService;
    /// use signup::domain::ports::FixtureRegistrationRepository;
    /// use signup::inbound::http::assets::AssetStore;
    /// use signup::inbound::http::form_state::CookiePolicy;
    /// use signup::inbound::http::state::HttpState;
    ///
    /// let service = RegistrationService::new(
    ///     Arc::new(FixtureRegistrationRepository::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let assets = AssetStore::open(Path::new("assets")).expect("assets dir");
    /// let state = HttpState::new(Arc::new(service), Arc::new(assets), CookiePolicy::default());
    /// ```
    pub fn new(
        registration: Arc<dyn RegistrationCommand>,
        assets: Arc<AssetStore>,
        cookies: CookiePolicy,
    ) -> Self {
        Self {
            registration,
            assets,
            cookies,
        }
    }
}
