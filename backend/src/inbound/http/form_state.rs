//! Form echo and error state carried in cookies.
//!
//! One declarative schema drives both directions so the cookie names and
//! codecs cannot drift apart. Values are hex-encoded: cookie syntax forbids
//! commas, semicolons, and whitespace, all of which users type freely.
//!
//! ```text
//! POST /submit (invalid)  -> fullname=..; errors=..; Max-Age=300
//! GET  /                  -> reads them back, then expires every key
//! POST /submit (valid)    -> fullname=..; Expires=<now + 365d>
//! ```

use actix_web::HttpRequest;
use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};
use tracing::{debug, warn};

use crate::domain::{CONTRACT_ACCEPTED, FieldName, SubmittedForm, ValidationErrors};

/// Cookie holding the JSON-serialised [`ValidationErrors`].
pub const ERRORS_COOKIE: &str = "errors";

/// Lifetime of the echo written after a failed submission.
pub const FAILURE_MAX_AGE: Duration = Duration::minutes(5);

/// Lifetime of the prefill written after a successful registration.
pub const DURABLE_LIFETIME: Duration = Duration::days(365);

const JOIN_SEPARATOR: &str = ",";

/// Largest hex value written for one field; browsers drop cookies over 4 KiB.
pub const MAX_COOKIE_VALUE_BYTES: usize = 4000;

/// How a field's values map to a single cookie value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Codec {
    /// First submitted value only.
    Scalar,
    /// Every value joined with `,`; split again on decode.
    Joined,
    /// Presence of the field, stored as the consent marker.
    Flag,
}

#[derive(Debug, Clone, Copy)]
struct CookieField {
    field: FieldName,
    codec: Codec,
    /// Whether an accepted value is kept as long-lived prefill.
    durable: bool,
}

const fn entry(field: FieldName, codec: Codec, durable: bool) -> CookieField {
    CookieField {
        field,
        codec,
        durable,
    }
}

const SCHEMA: [CookieField; 8] = [
    entry(FieldName::Fullname, Codec::Scalar, true),
    entry(FieldName::Phone, Codec::Scalar, true),
    entry(FieldName::Email, Codec::Scalar, true),
    entry(FieldName::Birthdate, Codec::Scalar, true),
    entry(FieldName::Gender, Codec::Scalar, true),
    entry(FieldName::Language, Codec::Joined, true),
    entry(FieldName::Bio, Codec::Scalar, true),
    entry(FieldName::Contract, Codec::Flag, false),
];

/// Attributes shared by every state cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Emit the `Secure` attribute; leave off for plain-HTTP deployments.
    pub secure: bool,
}

impl CookiePolicy {
    pub const fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn build(self, name: &'static str, value: String) -> actix_web::cookie::CookieBuilder<'static> {
        Cookie::build(name, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
    }

    fn short_lived(self, name: &'static str, value: String) -> Cookie<'static> {
        self.build(name, value).max_age(FAILURE_MAX_AGE).finish()
    }

    fn durable(self, name: &'static str, value: String) -> Cookie<'static> {
        self.build(name, value)
            .expires(OffsetDateTime::now_utc() + DURABLE_LIFETIME)
            .finish()
    }

    fn removal(self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new()).finish();
        cookie.make_removal();
        cookie
    }
}

/// State recovered from the request cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Echoed values; fields without a cookie are absent.
    pub values: SubmittedForm,
    /// Present only while a failed submission is being echoed back.
    pub errors: Option<ValidationErrors>,
}

fn encode_field(entry: CookieField, form: &SubmittedForm) -> Option<String> {
    if !form.contains(entry.field) {
        return None;
    }
    let raw = match entry.codec {
        Codec::Scalar => form.first_or_empty(entry.field).to_owned(),
        Codec::Joined => form.all(entry.field).join(JOIN_SEPARATOR),
        Codec::Flag => CONTRACT_ACCEPTED.to_owned(),
    };
    let encoded = hex::encode(raw);
    if encoded.len() > MAX_COOKIE_VALUE_BYTES {
        debug!(
            field = entry.field.as_str(),
            bytes = encoded.len(),
            "omitting oversized state cookie"
        );
        return None;
    }
    Some(encoded)
}

fn decode_value(name: &str, raw: &str) -> Option<String> {
    let decoded = hex::decode(raw)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());
    if decoded.is_none() {
        debug!(cookie = name, "ignoring undecodable state cookie");
    }
    decoded
}

/// Cookies echoing a rejected submission and its errors for five minutes.
///
/// A field whose encoded value exceeds [`MAX_COOKIE_VALUE_BYTES`] is left
/// out so the browser still stores the rest.
///
/// # Errors
/// Returns an error when `errors` cannot be serialised.
pub fn encode_failure(
    policy: CookiePolicy,
    form: &SubmittedForm,
    errors: &ValidationErrors,
) -> serde_json::Result<Vec<Cookie<'static>>> {
    let mut cookies: Vec<Cookie<'static>> = SCHEMA
        .iter()
        .filter_map(|entry| {
            encode_field(*entry, form)
                .map(|value| policy.short_lived(entry.field.as_str(), value))
        })
        .collect();
    let json = errors.to_json()?;
    cookies.push(policy.short_lived(ERRORS_COOKIE, hex::encode(json)));
    Ok(cookies)
}

/// Cookies keeping an accepted submission as prefill for a year.
///
/// Error-state keys that are not rewritten here are expired, so the response
/// never carries two cookies with the same name.
pub fn encode_success(policy: CookiePolicy, form: &SubmittedForm) -> Vec<Cookie<'static>> {
    let mut removals = vec![policy.removal(ERRORS_COOKIE)];
    let mut durable = Vec::new();
    for entry in SCHEMA {
        let name = entry.field.as_str();
        match encode_field(entry, form) {
            Some(value) if entry.durable => durable.push(policy.durable(name, value)),
            _ => removals.push(policy.removal(name)),
        }
    }
    removals.extend(durable);
    removals
}

/// Cookies expiring every state key, errors included.
pub fn clear_error_state(policy: CookiePolicy) -> Vec<Cookie<'static>> {
    SCHEMA
        .iter()
        .map(|entry| policy.removal(entry.field.as_str()))
        .chain(std::iter::once(policy.removal(ERRORS_COOKIE)))
        .collect()
}

/// Rebuild form state from the request cookies.
///
/// Missing or undecodable cookies are treated as absent; a malformed error
/// map is dropped with a warning.
pub fn decode(req: &HttpRequest) -> FormState {
    let mut values = SubmittedForm::new();
    for entry in SCHEMA {
        let name = entry.field.as_str();
        let Some(cookie) = req.cookie(name) else {
            continue;
        };
        let Some(raw) = decode_value(name, cookie.value()) else {
            continue;
        };
        match entry.codec {
            Codec::Scalar | Codec::Flag => values.push(name, raw),
            Codec::Joined => {
                for part in raw.split(JOIN_SEPARATOR) {
                    values.push(name, part);
                }
            }
        }
    }

    let errors = req.cookie(ERRORS_COOKIE).and_then(|cookie| {
        let raw = decode_value(ERRORS_COOKIE, cookie.value())?;
        match ValidationErrors::from_json(&raw) {
            Ok(errors) => Some(errors),
            Err(error) => {
                warn!(%error, "discarding malformed error state cookie");
                None
            }
        }
    });

    FormState { values, errors }
}
