//! Closed vocabulary of selectable programming languages.

use std::fmt;
use std::str::FromStr;

/// Programming languages offered by the form.
///
/// The wire names double as the `name` column of the reference table, so the
/// spellings (including `Haskel`) must stay exactly as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgrammingLanguage {
    Pascal,
    C,
    CPlusPlus,
    JavaScript,
    Php,
    Python,
    Java,
    Haskel,
    Clojure,
    Prolog,
    Scala,
    Go,
}

impl ProgrammingLanguage {
    /// The full vocabulary in display order.
    pub const ALL: [Self; 12] = [
        Self::Pascal,
        Self::C,
        Self::CPlusPlus,
        Self::JavaScript,
        Self::Php,
        Self::Python,
        Self::Java,
        Self::Haskel,
        Self::Clojure,
        Self::Prolog,
        Self::Scala,
        Self::Go,
    ];

    /// Spelling used on the wire and in the reference table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pascal => "Pascal",
            Self::C => "C",
            Self::CPlusPlus => "C++",
            Self::JavaScript => "JavaScript",
            Self::Php => "PHP",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Haskel => "Haskel",
            Self::Clojure => "Clojure",
            Self::Prolog => "Prolog",
            Self::Scala => "Scala",
            Self::Go => "Go",
        }
    }
}

/// Returned when a name is outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown programming language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for ProgrammingLanguage {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}

impl fmt::Display for ProgrammingLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
