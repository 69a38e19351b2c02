//! Templates and static files served from the assets directory.
//!
//! Files are read on every request through a capability handle opened once at
//! startup, so edits show up without a restart and nothing outside the
//! directory is reachable.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

use super::template::{SlotTemplate, TemplateError};

/// Registration form template, relative to the assets root.
pub const FORM_TEMPLATE: &str = "templates/form.html";
/// Confirmation page template, relative to the assets root.
pub const SUCCESS_TEMPLATE: &str = "templates/success.html";
/// Site stylesheet, relative to the assets root.
pub const STYLESHEET: &str = "static/styles.css";

/// Errors raised while serving a static file.
#[derive(Debug, thiserror::Error)]
pub enum StaticAssetError {
    #[error("static asset {path} not found")]
    NotFound { path: String },
    #[error("failed to read static asset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Read-only view of the assets directory.
#[derive(Debug)]
pub struct AssetStore {
    root: Dir,
}

impl AssetStore {
    /// Open `path` as the assets root.
    ///
    /// # Errors
    /// Fails when the directory does not exist or cannot be opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        Dir::open_ambient_dir(path, ambient_authority()).map(Self::from_dir)
    }

    pub fn from_dir(root: Dir) -> Self {
        Self { root }
    }

    /// Load and parse the registration form template.
    pub fn form_template(&self) -> Result<SlotTemplate, TemplateError> {
        self.template(FORM_TEMPLATE)
    }

    /// Load and parse the confirmation page template.
    pub fn success_template(&self) -> Result<SlotTemplate, TemplateError> {
        self.template(SUCCESS_TEMPLATE)
    }

    /// Raw bytes of the stylesheet.
    pub fn stylesheet(&self) -> Result<Vec<u8>, StaticAssetError> {
        self.root
            .read(Path::new(STYLESHEET))
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => StaticAssetError::NotFound {
                    path: STYLESHEET.to_owned(),
                },
                _ => StaticAssetError::Read {
                    path: STYLESHEET.to_owned(),
                    source,
                },
            })
    }

    fn template(&self, name: &str) -> Result<SlotTemplate, TemplateError> {
        let source = self
            .root
            .read_to_string(Path::new(name))
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => TemplateError::NotFound {
                    name: name.to_owned(),
                },
                _ => TemplateError::Read {
                    name: name.to_owned(),
                    source,
                },
            })?;
        SlotTemplate::parse(name, &source)
    }
}
