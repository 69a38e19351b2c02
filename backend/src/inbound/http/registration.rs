//! Registration form handlers.
//!
//! ```text
//! GET  /        Render the form, prefilled from state cookies
//! POST /submit  fullname=..&phone=..&language=Go&language=C&contract=on
//! ```

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::{error, warn};

use crate::domain::ports::RegistrationOutcome;
use crate::domain::{Error, SubmittedForm, ValidationErrors};
use crate::inbound::http::ApiResult;
use crate::inbound::http::assets::AssetStore;
use crate::inbound::http::form_state::{self, FormState};
use crate::inbound::http::render::{render_form, render_success};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::template::{SlotTemplate, TemplateError};

/// Banner shown when a valid submission could not be stored.
pub const SAVE_FAILED_MESSAGE: &str =
    "Не удалось сохранить данные. Пожалуйста, попробуйте ещё раз позже.";

fn template_failure(err: TemplateError) -> Error {
    error!(error = %err, "template unavailable");
    Error::internal(err.to_string())
}

fn form_template(assets: &AssetStore) -> ApiResult<SlotTemplate> {
    assets.form_template().map_err(template_failure)
}

fn html(builder: &mut actix_web::HttpResponseBuilder, body: String) -> HttpResponse {
    builder.content_type(ContentType::html()).body(body)
}

/// Render the registration form.
///
/// A pending error echo is shown once: the response expires every state
/// cookie so a reload starts clean.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use signup::inbound::http::registration::show_form;
///
/// let app = App::new().service(show_form);
/// ```
#[get("/")]
pub async fn show_form(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let template = form_template(&state.assets)?;
    let FormState { values, errors } = form_state::decode(&req);

    let mut response = HttpResponse::Ok();
    if errors.is_some() {
        for cookie in form_state::clear_error_state(state.cookies) {
            response.cookie(cookie);
        }
    }
    let body = render_form(&template, Some(&values), errors.as_ref());
    Ok(html(&mut response, body))
}

/// Validate and store a submission.
///
/// - Rejected: `303 See Other` to `/` carrying the echo cookies.
/// - Stored: the confirmation page plus durable prefill cookies.
/// - Store failure: the form again, with the submitted values and a banner.
#[post("/submit")]
pub async fn submit(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let form = SubmittedForm::from_urlencoded(&body);

    match state.registration.register(&form).await {
        Ok(RegistrationOutcome::Rejected(errors)) => redirect_with_errors(&state, &form, &errors),
        Ok(RegistrationOutcome::Registered(id)) => {
            let template = state.assets.success_template().map_err(template_failure)?;
            let mut response = HttpResponse::Ok();
            for cookie in form_state::encode_success(state.cookies, &form) {
                response.cookie(cookie);
            }
            Ok(html(&mut response, render_success(&template, id)))
        }
        Err(err) => {
            warn!(code = err.code().as_str(), "registration not stored; re-rendering form");
            let template = form_template(&state.assets)?;
            let banner = ValidationErrors::server_error(SAVE_FAILED_MESSAGE);
            let body = render_form(&template, Some(&form), Some(&banner));
            Ok(html(&mut HttpResponse::Ok(), body))
        }
    }
}

fn redirect_with_errors(
    state: &HttpState,
    form: &SubmittedForm,
    errors: &ValidationErrors,
) -> ApiResult<HttpResponse> {
    let cookies = form_state::encode_failure(state.cookies, form, errors)
        .map_err(|err| Error::internal(format!("failed to serialise validation errors: {err}")))?;
    let mut response = HttpResponse::SeeOther();
    response.insert_header((header::LOCATION, "/"));
    for cookie in cookies {
        response.cookie(cookie);
    }
    Ok(response.finish())
}

#[cfg(test)]
mod tests;
