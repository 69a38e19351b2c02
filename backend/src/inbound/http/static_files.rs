//! Stylesheet passthrough and the catch-all 404.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use tracing::{error, warn};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::assets::StaticAssetError;
use crate::inbound::http::state::HttpState;

/// Body of every 404 response.
pub const NOT_FOUND_BODY: &str = "404 Not Found";

/// Serve `static/styles.css` from the assets directory.
#[get("/static/styles.css")]
pub async fn stylesheet(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    match state.assets.stylesheet() {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type("text/css; charset=utf-8")
            .body(bytes)),
        Err(StaticAssetError::NotFound { path }) => {
            warn!(%path, "stylesheet missing");
            Ok(not_found_response())
        }
        Err(err) => {
            error!(error = %err, "stylesheet unreadable");
            Err(Error::internal(err.to_string()))
        }
    }
}

/// Default service for paths no route claims.
pub async fn not_found() -> HttpResponse {
    not_found_response()
}

fn not_found_response() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::plaintext())
        .body(NOT_FOUND_BODY)
}
