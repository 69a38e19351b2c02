//! Slot templates: static HTML with `{{ name }}` placeholders.
//!
//! A template is split once into literal text and named slots. Rendering walks
//! the segments a single time, so substituted values are never rescanned for
//! further placeholders and cannot collide with the surrounding markup.

use std::collections::HashMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Errors raised while loading or parsing a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template file does not exist.
    #[error("template {name} not found")]
    NotFound { name: String },
    /// The template file exists but could not be read.
    #[error("failed to read template {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// A `{{` has no matching `}}`.
    #[error("template {name} has an unclosed slot at byte {offset}")]
    UnclosedSlot { name: String, offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// Parsed template ready for repeated rendering.
///
/// # Examples
/// ```
/// use signup::inbound::http::template::{SlotTemplate, SlotValues};
///
/// let template = SlotTemplate::parse("greeting", "<p>{{ name }}</p>").expect("parse");
/// let mut values = SlotValues::new();
/// values.text("name", "<b>Ann</b>");
/// assert_eq!(template.render(&values), "<p>&lt;b&gt;Ann&lt;/b&gt;</p>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTemplate {
    segments: Vec<Segment>,
}

impl SlotTemplate {
    /// Split `source` into literal and slot segments.
    ///
    /// Slot names are trimmed; `name` only labels errors.
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut consumed = 0;

        while let Some(start) = rest.find(OPEN) {
            let (literal, after_literal) = rest.split_at(start);
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_owned()));
            }
            let body = &after_literal[OPEN.len()..];
            let Some(end) = body.find(CLOSE) else {
                return Err(TemplateError::UnclosedSlot {
                    name: name.to_owned(),
                    offset: consumed + start,
                });
            };
            segments.push(Segment::Slot(body[..end].trim().to_owned()));
            let advanced = start + OPEN.len() + end + CLOSE.len();
            consumed += advanced;
            rest = &rest[advanced..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }

        Ok(Self { segments })
    }

    /// Names of every slot, in document order.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fill every slot from `values`; unbound slots render empty.
    pub fn render(&self, values: &SlotValues) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(name) => {
                    if let Some(fragment) = values.get(name) {
                        out.push_str(fragment);
                    }
                }
            }
        }
        out
    }
}

/// Slot bindings. Everything stored here is already safe HTML.
#[derive(Debug, Clone, Default)]
pub struct SlotValues {
    bound: HashMap<String, String>,
}

impl SlotValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind user-supplied text; it is escaped before storage.
    pub fn text(&mut self, slot: impl Into<String>, raw: &str) {
        self.bound.insert(slot.into(), escape_html(raw));
    }

    /// Bind markup assembled by the renderer itself.
    ///
    /// Callers must escape any user text embedded in `markup`.
    pub fn markup(&mut self, slot: impl Into<String>, markup: impl Into<String>) {
        self.bound.insert(slot.into(), markup.into());
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.bound.get(slot).map(String::as_str)
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}
