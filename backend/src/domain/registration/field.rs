//! Wire identifiers for the registration form fields.

use std::fmt;

/// Form field identifiers as they appear in the HTML `name` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Fullname,
    Phone,
    Email,
    Birthdate,
    Gender,
    Language,
    Bio,
    Contract,
}

impl FieldName {
    /// Every field in form order.
    pub const ALL: [Self; 8] = [
        Self::Fullname,
        Self::Phone,
        Self::Email,
        Self::Birthdate,
        Self::Gender,
        Self::Language,
        Self::Bio,
        Self::Contract,
    ];

    /// The wire name used by the form and the state cookies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fullname => "fullname",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Birthdate => "birthdate",
            Self::Gender => "gender",
            Self::Language => "language",
            Self::Bio => "bio",
            Self::Contract => "contract",
        }
    }

    /// Resolve a wire name back to its field.
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
