//! Test helpers for inbound HTTP components.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::SET_COOKIE;
use mockable::DefaultClock;
use tempfile::TempDir;

use crate::domain::RegistrationService;
use crate::domain::ports::{FixtureRegistrationRepository, RegistrationCommand};

use super::assets::AssetStore;
use super::form_state::CookiePolicy;
use super::state::HttpState;

/// Assets shipped with the crate.
pub fn bundled_assets() -> Arc<AssetStore> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    Arc::new(AssetStore::open(&root).expect("bundled assets directory"))
}

/// An existing but empty assets directory; keep the guard alive.
pub fn empty_assets() -> (TempDir, Arc<AssetStore>) {
    let dir = TempDir::new().expect("temp dir");
    let store = AssetStore::open(dir.path()).expect("open temp assets");
    (dir, Arc::new(store))
}

/// State over the real service and an in-memory repository.
pub fn fixture_state(repository: Arc<FixtureRegistrationRepository>) -> HttpState {
    let service = RegistrationService::new(repository, Arc::new(DefaultClock));
    HttpState::new(Arc::new(service), bundled_assets(), CookiePolicy::default())
}

/// State over an arbitrary registration port.
pub fn state_with(registration: Arc<dyn RegistrationCommand>, assets: Arc<AssetStore>) -> HttpState {
    HttpState::new(registration, assets, CookiePolicy::default())
}

/// Parse every `Set-Cookie` header of a response.
pub fn set_cookies<B>(response: &ServiceResponse<B>) -> Vec<Cookie<'static>> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| Cookie::parse(raw.to_owned()).ok())
        .collect()
}
