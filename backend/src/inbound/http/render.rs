//! Bind form state to the registration templates.
//!
//! Slot names follow `<field>.<facet>` so a template author can place values,
//! error classes, and messages wherever the markup needs them.

use crate::domain::{
    CONTRACT_ACCEPTED, FieldName, ProgrammingLanguage, RegistrationId, SubmittedForm,
    ValidationErrors,
};

use super::template::{SlotTemplate, SlotValues, escape_html};

/// Fields whose first value is echoed into a `value` attribute or textarea.
const TEXT_FIELDS: [FieldName; 5] = [
    FieldName::Fullname,
    FieldName::Phone,
    FieldName::Email,
    FieldName::Birthdate,
    FieldName::Bio,
];

const ERROR_CLASS: &str = "error-field";
const CHECKED: &str = "checked";
const SELECTED: &str = "selected";

/// Render the registration form.
///
/// `prefill` restores what the user last typed or had accepted; `errors`
/// flags fields and adds the general banner.
///
/// # Examples
/// ```
/// use signup::domain::{FieldName, SubmittedForm, ValidationErrors};
/// use signup::inbound::http::render::render_form;
/// use signup::inbound::http::template::SlotTemplate;
///
/// let template = SlotTemplate::parse(
///     "form.html",
///     r#"<input name="phone" class="{{ phone.class }}" value="{{ phone.value }}">"#,
/// )
/// .expect("template");
/// let prefill = SubmittedForm::new().with(FieldName::Phone, "123");
/// let mut errors = ValidationErrors::new();
/// errors.insert(FieldName::Phone, "bad");
///
/// let html = render_form(&template, Some(&prefill), Some(&errors));
/// assert_eq!(html, r#"<input name="phone" class="error-field" value="123">"#);
/// ```
pub fn render_form(
    template: &SlotTemplate,
    prefill: Option<&SubmittedForm>,
    errors: Option<&ValidationErrors>,
) -> String {
    let mut slots = SlotValues::new();
    if let Some(form) = prefill {
        bind_prefill(&mut slots, form);
    }
    if let Some(errors) = errors {
        bind_errors(&mut slots, errors);
    }
    template.render(&slots)
}

/// Render the confirmation page for a stored registration.
pub fn render_success(template: &SlotTemplate, id: RegistrationId) -> String {
    let mut slots = SlotValues::new();
    slots.text("id", &id.to_string());
    template.render(&slots)
}

fn bind_prefill(slots: &mut SlotValues, form: &SubmittedForm) {
    for field in TEXT_FIELDS {
        if let Some(value) = form.first(field) {
            slots.text(format!("{field}.value"), value);
        }
    }

    match form.first(FieldName::Gender) {
        Some("male") => slots.markup("gender.male", CHECKED),
        Some("female") => slots.markup("gender.female", CHECKED),
        _ => {}
    }

    if form.first(FieldName::Contract) == Some(CONTRACT_ACCEPTED) {
        slots.markup("contract.checked", CHECKED);
    }

    for language in ProgrammingLanguage::ALL {
        let chosen = form
            .all(FieldName::Language)
            .iter()
            .any(|value| value == language.as_str());
        if chosen {
            slots.markup(format!("language.{language}"), SELECTED);
        }
    }
}

fn bind_errors(slots: &mut SlotValues, errors: &ValidationErrors) {
    if let Some(message) = errors.general() {
        slots.markup(
            "server_error",
            format!(r#"<div class="server-error">{}</div>"#, escape_html(message)),
        );
    }
    for (field, message) in errors.field_errors() {
        slots.markup(format!("{field}.class"), ERROR_CLASS);
        slots.markup(
            format!("{field}.error"),
            format!(r#"<div class="error-message">{}</div>"#, escape_html(message)),
        );
    }
}
