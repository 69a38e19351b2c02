//! Diesel table definitions for the registration schema.
//!
//! The tables are created outside this service. The SQL names are the
//! case-folded forms of the unquoted identifiers `Users`,
//! `ProgrammingLanguages`, and `UserProgrammingLanguages`.

diesel::table! {
    /// One row per registration.
    users (id) {
        /// Serial primary key returned to the user.
        id -> Int4,
        first_name -> Varchar,
        last_name -> Varchar,
        middle_name -> Nullable<Varchar>,
        phone -> Varchar,
        email -> Varchar,
        birthdate -> Date,
        /// `male` or `female`.
        gender -> Varchar,
        biography -> Text,
    }
}

diesel::table! {
    /// Reference vocabulary of selectable languages, seeded externally.
    #[sql_name = "programminglanguages"]
    programming_languages (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Many-to-many link between users and languages.
    #[sql_name = "userprogramminglanguages"]
    user_programming_languages (user_id, language_id) {
        user_id -> Int4,
        language_id -> Int4,
    }
}

diesel::joinable!(user_programming_languages -> users (user_id));
diesel::joinable!(user_programming_languages -> programming_languages (language_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    programming_languages,
    user_programming_languages,
);
