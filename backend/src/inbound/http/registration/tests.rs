//! Tests for the registration handlers.

use super::*;
use crate::Trace;
use crate::domain::ports::{FixtureRegistrationRepository, MockRegistrationCommand};
use crate::inbound::http::form_state::ERRORS_COOKIE;
use crate::inbound::http::routes;
use crate::inbound::http::static_files::NOT_FOUND_BODY;
use crate::inbound::http::test_utils::{
    bundled_assets, empty_assets, fixture_state, set_cookies, state_with,
};
use actix_web::cookie::Cookie;
use actix_web::cookie::time::Duration;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use std::sync::Arc;

async fn call(state: HttpState, request: actix_web::test::TestRequest) -> ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .configure(routes),
    )
    .await;
    actix_test::call_service(&app, request.to_request()).await
}

async fn body_text(response: ServiceResponse) -> String {
    let bytes = actix_test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

fn encode(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn post_submit(pairs: &[(&str, &str)]) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/submit")
        .insert_header(ContentType::form_url_encoded())
        .set_payload(encode(pairs))
}

fn with_cookies(
    request: actix_test::TestRequest,
    cookies: &[Cookie<'static>],
) -> actix_test::TestRequest {
    cookies
        .iter()
        .filter(|cookie| cookie.max_age() != Some(Duration::ZERO))
        .fold(request, |req, cookie| req.cookie(cookie.clone()))
}

#[fixture]
fn valid_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("fullname", "Иван Иванов"),
        ("phone", "+79991234567"),
        ("email", "a@b.com"),
        ("birthdate", "1990-01-01"),
        ("gender", "male"),
        ("language", "Python"),
        ("language", "Go"),
        ("bio", "xxxxxxxxxxxxxxxxxxxx"),
        ("contract", "on"),
    ]
}

fn replace(
    pairs: &[(&'static str, &'static str)],
    field: &str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    pairs
        .iter()
        .map(|&(name, old)| if name == field { (name, value) } else { (name, old) })
        .collect()
}

#[rstest]
#[actix_web::test]
async fn blank_form_renders_without_state() {
    let repo = Arc::new(FixtureRegistrationRepository::new());
    let response = call(fixture_state(repo), actix_test::TestRequest::get().uri("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    let body = body_text(response).await;
    assert!(body.contains("<h2>Форма регистрации</h2>"));
    assert!(!body.contains("{{"));
    assert!(!body.contains("error-message"));
}

#[rstest]
#[actix_web::test]
async fn valid_submission_is_stored_and_confirmed(valid_pairs: Vec<(&'static str, &'static str)>) {
    let repo = Arc::new(FixtureRegistrationRepository::new());
    let response = call(fixture_state(repo.clone()), post_submit(&valid_pairs)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    let kept: Vec<_> = cookies
        .iter()
        .filter(|c| c.max_age() != Some(Duration::ZERO))
        .map(|c| c.name().to_owned())
        .collect();
    assert_eq!(
        kept,
        ["fullname", "phone", "email", "birthdate", "gender", "language", "bio"]
    );
    assert!(body_text(response).await.contains("Ваш ID: 1"));

    let saved = repo.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name().last(), "Иванов");
}

#[rstest]
#[actix_web::test]
async fn invalid_submission_redirects_with_state(valid_pairs: Vec<(&'static str, &'static str)>) {
    let repo = Arc::new(FixtureRegistrationRepository::new());
    let pairs = replace(&valid_pairs, "birthdate", "2999-01-01");
    let response = call(fixture_state(repo.clone()), post_submit(&pairs)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
    let names: Vec<_> = set_cookies(&response)
        .iter()
        .map(|c| c.name().to_owned())
        .collect();
    assert!(names.iter().any(|name| name == ERRORS_COOKIE));
    assert!(repo.saved().is_empty());
}

#[rstest]
#[actix_web::test]
async fn redirect_echo_is_shown_once(valid_pairs: Vec<(&'static str, &'static str)>) {
    let repo = Arc::new(FixtureRegistrationRepository::new());
    let pairs = replace(&valid_pairs, "bio", "<script>alert(1)</script>");
    let rejected = call(fixture_state(repo.clone()), post_submit(&pairs)).await;
    let echo = set_cookies(&rejected);

    let request = with_cookies(actix_test::TestRequest::get().uri("/"), &echo);
    let response = call(fixture_state(repo), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cleared = set_cookies(&response);
    assert_eq!(cleared.len(), 9);
    assert!(cleared.iter().all(|c| c.max_age() == Some(Duration::ZERO)));

    let body = body_text(response).await;
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;</textarea>"));
    assert!(!body.contains("<script>"));
    assert!(body.contains(r#"class="error-message""#));
    assert!(body.contains(r#"value="Иван Иванов""#));
    assert!(body.contains(r#"<option value="Python" selected>"#));
    assert!(body.contains(r#"name="contract" class="" checked"#));
}

#[rstest]
#[actix_web::test]
async fn durable_prefill_renders_without_clearing(valid_pairs: Vec<(&'static str, &'static str)>) {
    let repo = Arc::new(FixtureRegistrationRepository::new());
    let stored = call(fixture_state(repo.clone()), post_submit(&valid_pairs)).await;
    let prefill = set_cookies(&stored);

    let request = with_cookies(actix_test::TestRequest::get().uri("/"), &prefill);
    let response = call(fixture_state(repo), request).await;

    assert!(set_cookies(&response).is_empty());
    let body = body_text(response).await;
    assert!(body.contains(r#"value="a@b.com""#));
    assert!(body.contains(r#"value="male" checked"#));
    assert!(!body.contains("error-message"));
}

#[rstest]
#[actix_web::test]
async fn store_failure_rerenders_with_banner(valid_pairs: Vec<(&'static str, &'static str)>) {
    let mut command = MockRegistrationCommand::new();
    command
        .expect_register()
        .times(1)
        .returning(|_| Err(Error::service_unavailable("connection refused")));
    let state = state_with(Arc::new(command), bundled_assets());

    let response = call(state, post_submit(&valid_pairs)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    let body = body_text(response).await;
    assert!(body.contains(&format!(r#"<div class="server-error">{SAVE_FAILED_MESSAGE}</div>"#)));
    assert!(body.contains(r#"value="+79991234567""#));
    assert!(!body.contains("connection refused"));
}

#[rstest]
#[actix_web::test]
async fn missing_template_is_a_generic_500() {
    let (_guard, assets) = empty_assets();
    let state = state_with(Arc::new(MockRegistrationCommand::new()), assets);

    let response = call(state, actix_test::TestRequest::get().uri("/")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn stylesheet_is_served_as_css() {
    let repo = Arc::new(FixtureRegistrationRepository::new());
    let response = call(
        fixture_state(repo),
        actix_test::TestRequest::get().uri("/static/styles.css"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("text/css; charset=utf-8")
    );
}

#[rstest]
#[case::missing_stylesheet("/static/styles.css")]
#[case::unknown_path("/admin")]
#[case::other_static("/static/app.js")]
#[actix_web::test]
async fn unknown_or_absent_paths_are_plain_404(#[case] path: &str) {
    let (_guard, assets) = empty_assets();
    let state = state_with(Arc::new(MockRegistrationCommand::new()), assets);

    let response = call(state, actix_test::TestRequest::get().uri(path)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, NOT_FOUND_BODY);
}
