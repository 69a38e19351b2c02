//! Behaviour tests for the registration form round trip.
//!
//! Each step drives the assembled Actix app in-process. A small cookie jar
//! replays `Set-Cookie` headers the way a browser would, so redirects and
//! later visits see the state earlier responses left behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::header::{self, HeaderValue};
use actix_web::rt::{System, SystemRunner};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use signup::Trace;
use signup::domain::RegistrationService;
use signup::domain::ports::FixtureRegistrationRepository;
use signup::inbound::http::assets::AssetStore;
use signup::inbound::http::form_state::CookiePolicy;
use signup::inbound::http::routes;
use signup::inbound::http::registration::SAVE_FAILED_MESSAGE;
use signup::inbound::http::state::HttpState;
use signup::outbound::persistence::{
    ConnectionFactory, DbConfigError, DieselRegistrationRepository, HOST_ENV,
};

struct Captured {
    status: u16,
    location: Option<String>,
    body: String,
}

struct RegistrationWorld {
    runner: SystemRunner,
    repository: Arc<FixtureRegistrationRepository>,
    state: RefCell<HttpState>,
    fields: RefCell<Vec<(String, String)>>,
    jar: RefCell<BTreeMap<String, String>>,
    last: RefCell<Option<Captured>>,
}

impl RegistrationWorld {
    fn new() -> Self {
        let repository = Arc::new(FixtureRegistrationRepository::new());
        let service = RegistrationService::new(repository.clone(), Arc::new(DefaultClock));
        let assets_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
        let assets = AssetStore::open(&assets_dir).expect("bundled assets");
        Self {
            runner: System::new(),
            repository,
            state: RefCell::new(HttpState::new(
                Arc::new(service),
                Arc::new(assets),
                CookiePolicy::default(),
            )),
            fields: RefCell::new(Vec::new()),
            jar: RefCell::new(BTreeMap::new()),
            last: RefCell::new(None),
        }
    }

    fn disconnect_database(&self) {
        let factory = ConnectionFactory::from_settings(Err(DbConfigError::MissingEnv {
            name: HOST_ENV,
        }));
        let service = RegistrationService::new(
            Arc::new(DieselRegistrationRepository::new(factory)),
            Arc::new(DefaultClock),
        );
        self.state.borrow_mut().registration = Arc::new(service);
    }

    fn replace_field(&self, name: &str, value: &str) {
        let mut fields = self.fields.borrow_mut();
        fields.retain(|(key, _)| key != name);
        fields.push((name.to_owned(), value.to_owned()));
    }

    fn cookie_header(&self) -> Option<HeaderValue> {
        let jar = self.jar.borrow();
        if jar.is_empty() {
            return None;
        }
        let joined = jar
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&joined).ok()
    }

    fn remember(&self, cookies: Vec<Cookie<'static>>) {
        let mut jar = self.jar.borrow_mut();
        for cookie in cookies {
            if cookie.value().is_empty() {
                jar.remove(cookie.name());
            } else {
                jar.insert(cookie.name().to_owned(), cookie.value().to_owned());
            }
        }
    }

    fn send(&self, request: TestRequest) {
        let request = match self.cookie_header() {
            Some(value) => request.insert_header((header::COOKIE, value)),
            None => request,
        };
        let state = web::Data::new(self.state.borrow().clone());
        let (captured, cookies) = self.runner.block_on(async move {
            let app = test::init_service(
                App::new().app_data(state).wrap(Trace).configure(routes),
            )
            .await;
            let response = test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let cookies: Vec<Cookie<'static>> = response
                .headers()
                .get_all(header::SET_COOKIE)
                .filter_map(|value| value.to_str().ok())
                .filter_map(|raw| Cookie::parse(raw.to_owned()).ok())
                .collect();
            let body = test::read_body(response).await;
            let captured = Captured {
                status,
                location,
                body: String::from_utf8_lossy(&body).into_owned(),
            };
            (captured, cookies)
        });
        self.remember(cookies);
        *self.last.borrow_mut() = Some(captured);
    }

    fn with_last<F>(&self, f: F)
    where
        F: FnOnce(&Captured),
    {
        let last = self.last.borrow();
        f(last.as_ref().expect("a request was sent"));
    }
}

#[fixture]
fn world() -> RegistrationWorld {
    RegistrationWorld::new()
}

#[given("a visitor filling in a valid registration")]
fn a_visitor_filling_in_a_valid_registration(world: &RegistrationWorld) {
    let bio = "x".repeat(20);
    let pairs = [
        ("fullname", "Иван Иванов"),
        ("phone", "+79991234567"),
        ("email", "a@b.com"),
        ("birthdate", "1990-01-01"),
        ("gender", "male"),
        ("language", "Python"),
        ("language", "Go"),
        ("bio", bio.as_str()),
        ("contract", "on"),
    ];
    *world.fields.borrow_mut() = pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect();
}

#[given("the database settings are missing")]
fn the_database_settings_are_missing(world: &RegistrationWorld) {
    world.disconnect_database();
}

#[given("the birthdate is {value}")]
fn the_birthdate_is(world: &RegistrationWorld, value: String) {
    world.replace_field("birthdate", &value);
}

#[given("the only selected language is {value}")]
fn the_only_selected_language_is(world: &RegistrationWorld, value: String) {
    world.replace_field("language", &value);
}

#[when("the visitor submits the form")]
fn the_visitor_submits_the_form(world: &RegistrationWorld) {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(world.fields.borrow().iter())
        .finish();
    world.send(
        TestRequest::post()
            .uri("/submit")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(body),
    );
}

#[when("the visitor opens the form")]
fn the_visitor_opens_the_form(world: &RegistrationWorld) {
    world.send(TestRequest::get().uri("/"));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &RegistrationWorld, status: u16) {
    world.with_last(|last| assert_eq!(last.status, status));
}

#[then("the response redirects to the form")]
fn the_response_redirects_to_the_form(world: &RegistrationWorld) {
    world.with_last(|last| {
        assert_eq!(last.status, 303);
        assert_eq!(last.location.as_deref(), Some("/"));
    });
}

#[then("the page shows registration id {id}")]
fn the_page_shows_registration_id(world: &RegistrationWorld, id: i32) {
    world.with_last(|last| assert!(last.body.contains(&format!("Ваш ID: {id}"))));
}

#[then("{count} registration is stored")]
fn registration_is_stored(world: &RegistrationWorld, count: usize) {
    assert_eq!(world.repository.saved().len(), count);
}

#[then("{count} registrations are stored")]
fn registrations_are_stored(world: &RegistrationWorld, count: usize) {
    assert_eq!(world.repository.saved().len(), count);
}

#[then("the form flags only the birthdate field")]
fn the_form_flags_only_the_birthdate_field(world: &RegistrationWorld) {
    world.with_last(|last| {
        assert_eq!(last.status, 200);
        assert!(last.body.contains(r#"name="birthdate" class="error-field""#));
        assert_eq!(last.body.matches(r#"class="error-message""#).count(), 1);
    });
}

#[then("the form flags the language field")]
fn the_form_flags_the_language_field(world: &RegistrationWorld) {
    world.with_last(|last| {
        assert!(last.body.contains(r#"name="language" class="error-field""#));
    });
}

#[then("the form shows no errors")]
fn the_form_shows_no_errors(world: &RegistrationWorld) {
    world.with_last(|last| {
        assert_eq!(last.status, 200);
        assert!(!last.body.contains("error-field"));
        assert!(!last.body.contains(r#"class="error-message""#));
    });
}

#[then("the fullname field still shows {value}")]
fn the_fullname_field_still_shows(world: &RegistrationWorld, value: String) {
    world.with_last(|last| {
        assert!(last.body.contains(&format!(r#"value="{value}""#)));
    });
}

#[then("the form shows the save failure banner")]
fn the_form_shows_the_save_failure_banner(world: &RegistrationWorld) {
    world.with_last(|last| {
        assert_eq!(last.status, 200);
        assert!(last.body.contains(r#"class="server-error""#));
        assert!(last.body.contains(SAVE_FAILED_MESSAGE));
    });
}

#[then("the contract box is unchecked")]
fn the_contract_box_is_unchecked(world: &RegistrationWorld) {
    world.with_last(|last| {
        assert!(!last.body.contains(r#"class="" checked"#));
    });
}

#[scenario(
    path = "tests/features/registration_flow.feature",
    name = "A valid registration is stored and acknowledged"
)]
fn a_valid_registration_is_stored_and_acknowledged(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration_flow.feature",
    name = "A future birthdate is sent back to the form"
)]
fn a_future_birthdate_is_sent_back_to_the_form(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration_flow.feature",
    name = "A language outside the vocabulary is rejected"
)]
fn a_language_outside_the_vocabulary_is_rejected(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration_flow.feature",
    name = "Errors are shown once only"
)]
fn errors_are_shown_once_only(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration_flow.feature",
    name = "Accepted values prefill the next visit"
)]
fn accepted_values_prefill_the_next_visit(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration_flow.feature",
    name = "The form still works without database settings"
)]
fn the_form_still_works_without_database_settings(world: RegistrationWorld) {
    drop(world);
}
