//! Rendering seam between the computational core and a drawing backend.
//!
//! The core never draws. It hands a finished [`DivisionScheme`] to a
//! [`SchemeRenderer`], an explicit mutable handle a backend implements.
//! The built-in [`PlanFileRenderer`] writes the scheme as a JSON plan
//! file that an external KOMPAS automation bridge picks up; a real
//! drawing backend would implement the same trait.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::scheme::request::DivisionScheme;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised by scheme renderers.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The rendering backend cannot be reached at all.
    #[error("renderer unavailable: {message}")]
    Unavailable {
        /// What is missing.
        message: String,
    },

    /// Writing the plan file failed.
    #[error("failed to write scheme plan to {path}: {source}")]
    PlanWrite {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The scheme could not be encoded as JSON.
    #[error("failed to encode scheme plan: {source}")]
    PlanEncode {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the scheme.
    #[error("renderer rejected the scheme: {message}")]
    Rejected {
        /// Backend-supplied reason.
        message: String,
    },
}

impl RenderError {
    /// Creates an error for an unreachable backend.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a write error for the given plan path.
    pub fn plan_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::PlanWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates an error for a scheme the backend refused.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// A document produced by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Where the document landed.
    pub path: PathBuf,
}

impl RenderedDocument {
    /// Returns the document's file name, if the path has one.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// A drawing backend the assembled scheme is handed to.
pub trait SchemeRenderer {
    /// Renders the scheme, returning the produced document.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the backend is unavailable, refuses
    /// the scheme, or fails to persist the output.
    fn render(&mut self, scheme: &DivisionScheme) -> RenderResult<RenderedDocument>;
}

/// Renderer that writes the scheme as a pretty-printed JSON plan file.
///
/// File names follow `DivisionScheme_<product code>_<short id>.json` so
/// repeated runs never overwrite each other.
#[derive(Debug, Clone)]
pub struct PlanFileRenderer {
    output_dir: PathBuf,
}

impl PlanFileRenderer {
    /// Creates a renderer writing into the given directory, creating it
    /// on first render if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the directory this renderer writes into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl SchemeRenderer for PlanFileRenderer {
    fn render(&mut self, scheme: &DivisionScheme) -> RenderResult<RenderedDocument> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|source| RenderError::plan_write(&self.output_dir, source))?;

        let id = Uuid::new_v4().simple().to_string();
        let file_name = format!("DivisionScheme_{}_{}.json", scheme.product_code, &id[..8]);
        let path = self.output_dir.join(file_name);

        let body = serde_json::to_string_pretty(scheme)
            .map_err(|source| RenderError::PlanEncode { source })?;
        fs::write(&path, body).map_err(|source| RenderError::plan_write(&path, source))?;

        info!(path = %path.display(), "scheme plan written");
        Ok(RenderedDocument { path })
    }
}
