//! HTTP inbound adapter serving the registration form.

use actix_web::web;

pub mod assets;
pub mod error;
pub mod form_state;
pub mod registration;
pub mod render;
pub mod state;
pub mod static_files;
pub mod template;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Register every route plus the plain-text 404 fallback.
///
/// Handlers expect [`state::HttpState`] in app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use signup::inbound::http::routes;
///
/// let app = App::new().configure(routes);
/// ```
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::show_form)
        .service(registration::submit)
        .service(static_files::stylesheet)
        .default_service(web::to(static_files::not_found));
}
