//! Field rules for registration submissions.
//!
//! Each rule inspects one field in isolation and yields the user-facing
//! message when the value is rejected. [`validate`] runs every rule and
//! collects all failures so the form can flag each field in one pass.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use super::{FieldName, ProgrammingLanguage, SubmittedForm, ValidationErrors};

/// The only accepted value of the consent checkbox.
pub const CONTRACT_ACCEPTED: &str = "on";
/// Wire format of the birthdate field.
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

const MIN_BIRTH_YEAR: i32 = 1;
const FULLNAME_MIN_PARTS: usize = 2;
const FULLNAME_MAX_PARTS: usize = 3;
const BIO_MIN_CHARS: usize = 10;
const BIO_MAX_CHARS: usize = 500;
const BIO_FORBIDDEN: [char; 6] = ['<', '>', '{', '}', '[', ']'];

macro_rules! cached_regex {
    ($fn_name:ident, $pattern:expr) => {
        fn $fn_name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| {
                Regex::new($pattern).unwrap_or_else(|error| {
                    panic!("{} regex failed to compile: {error}", stringify!($fn_name))
                })
            })
        }
    };
}

cached_regex!(fullname_regex, r"^[а-яА-ЯёЁa-zA-Z\- ]+$");
cached_regex!(
    phone_regex,
    r"^(\+7|8)[\s\-]?\(?\d{3}\)?[\s\-]?\d{3}[\s\-]?\d{2}[\s\-]?\d{2}$"
);
cached_regex!(email_regex, r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$");
cached_regex!(birthdate_regex, r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$");

/// Require two or three name parts made of letters, spaces, and hyphens.
pub fn check_fullname(fullname: &str) -> Option<&'static str> {
    if fullname.is_empty() {
        return Some("ФИО обязательно для заполнения");
    }
    let parts = fullname.split_whitespace().count();
    if parts < FULLNAME_MIN_PARTS {
        return Some("Введите имя и фамилию");
    }
    if !fullname_regex().is_match(fullname) {
        return Some("ФИО должно содержать только буквы, пробелы и дефисы");
    }
    if parts > FULLNAME_MAX_PARTS {
        return Some("ФИО должно содержать не более 3 частей (фамилия, имя, отчество)");
    }
    None
}

/// Require a Russian number starting with `+7` or `8`.
pub fn check_phone(phone: &str) -> Option<&'static str> {
    if phone.is_empty() {
        return Some("Телефон обязателен для заполнения");
    }
    if !phone_regex().is_match(phone) {
        return Some(
            "Неверный формат телефона. Допустимые форматы: +7 999 123-45-67, 89991234567",
        );
    }
    None
}

pub fn check_email(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        return Some("Email обязателен для заполнения");
    }
    if !email_regex().is_match(email) {
        return Some(
            "Некорректный email. Допустимы только латинские буквы, цифры и символы ._%+-",
        );
    }
    None
}

/// Reject empty, malformed, impossible, and future dates.
///
/// Year `0000` does not exist in the calendar users pick from and counts as
/// impossible. A date is in the future when its midnight falls strictly after `now`.
pub fn check_birthdate(birthdate: &str, now: NaiveDateTime) -> Option<&'static str> {
    if birthdate.is_empty() {
        return Some("Дата рождения обязательна");
    }
    if !birthdate_regex().is_match(birthdate) {
        return Some("Неверный формат даты. Используйте формат ГГГГ-ММ-ДД");
    }
    let date = match NaiveDate::parse_from_str(birthdate, BIRTHDATE_FORMAT) {
        Ok(date) if date.year() >= MIN_BIRTH_YEAR => date,
        _ => return Some("Некорректная дата"),
    };
    if date.and_time(NaiveTime::MIN) > now {
        return Some("Дата рождения не может быть в будущем");
    }
    None
}

/// Exactly `male` or `female`.
pub fn check_gender(gender: &str) -> Option<&'static str> {
    match gender {
        "male" | "female" => None,
        _ => Some("Выберите пол"),
    }
}

/// Require a non-empty selection drawn entirely from the vocabulary.
pub fn check_languages(languages: &[String]) -> Option<&'static str> {
    if languages.is_empty() {
        return Some("Выберите хотя бы один язык");
    }
    if languages
        .iter()
        .any(|name| name.parse::<ProgrammingLanguage>().is_err())
    {
        return Some("Выбраны недопустимые языки");
    }
    None
}

/// Between 10 (trimmed) and 500 characters, without markup brackets.
pub fn check_bio(bio: &str) -> Option<&'static str> {
    if bio.trim().chars().count() < BIO_MIN_CHARS {
        return Some("Биография должна содержать минимум 10 символов");
    }
    if bio.chars().count() > BIO_MAX_CHARS {
        return Some("Биография не должна превышать 500 символов");
    }
    if bio.contains(BIO_FORBIDDEN) {
        return Some("Биография содержит недопустимые символы (<, >, {, }, [, ])");
    }
    None
}

/// The consent box must be ticked.
pub fn check_contract(contract: &str) -> Option<&'static str> {
    if contract == CONTRACT_ACCEPTED {
        None
    } else {
        Some("Необходимо подтвердить контракт")
    }
}

/// Run every field rule against `form`, collecting all failures.
///
/// Absent scalar fields are checked as empty strings; `now` anchors the
/// future-date rule.
pub fn validate(form: &SubmittedForm, now: NaiveDateTime) -> ValidationErrors {
    let scalar = |field: FieldName| form.first_or_empty(field);
    let checks = [
        (FieldName::Fullname, check_fullname(scalar(FieldName::Fullname))),
        (FieldName::Phone, check_phone(scalar(FieldName::Phone))),
        (FieldName::Email, check_email(scalar(FieldName::Email))),
        (
            FieldName::Birthdate,
            check_birthdate(scalar(FieldName::Birthdate), now),
        ),
        (FieldName::Gender, check_gender(scalar(FieldName::Gender))),
        (
            FieldName::Language,
            check_languages(form.all(FieldName::Language)),
        ),
        (FieldName::Bio, check_bio(scalar(FieldName::Bio))),
        (FieldName::Contract, check_contract(scalar(FieldName::Contract))),
    ];

    let mut errors = ValidationErrors::new();
    for (field, outcome) in checks {
        if let Some(message) = outcome {
            errors.insert(field, message);
        }
    }
    errors
}
