use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for the studykit library.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Source text is empty or unusable.
    #[error("Input text is empty or unusable: {reason}")]
    EmptyInput {
        /// Why the input was rejected
        reason: String,
    },

    /// The generative model call failed.
    #[error("Model call failed: {message}")]
    Model {
        /// Error message from the model client
        message: String,
    },

    /// The model returned empty or whitespace-only text.
    #[error("Model returned an empty response for {task}")]
    EmptyCompletion {
        /// Task that received the empty response
        task: String,
    },

    /// Every per-chunk generation call failed; consolidation was not attempted.
    #[error("All {chunks} chunk generation calls failed; nothing to consolidate")]
    AllChunksFailed {
        /// Number of chunks that were attempted
        chunks: usize,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// Text extraction from a source document failed.
    #[error("Failed to extract text from '{path}': {message}")]
    Extraction {
        /// Source document path
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Prompt template rendering error.
    #[error("Failed to render template '{template}': {message}")]
    Template {
        /// Template name
        template: String,
        /// Error message
        message: String,
    },

    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// JSON serialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Creates an empty-input error.
    #[must_use]
    pub fn empty_input(reason: impl Into<String>) -> Self {
        Self::EmptyInput {
            reason: reason.into(),
        }
    }

    /// Creates a model-call error.
    #[must_use]
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
        }
    }

    /// Creates an empty-completion error for the given task.
    #[must_use]
    pub fn empty_completion(task: impl Into<String>) -> Self {
        Self::EmptyCompletion { task: task.into() }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an extraction error with path context.
    #[must_use]
    pub fn extraction(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a template error.
    #[must_use]
    pub fn template(template: impl Into<String>, source: tera::Error) -> Self {
        Self::Template {
            template: template.into(),
            message: source.to_string(),
        }
    }

    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Returns true if this is a model-call error.
    #[must_use]
    pub const fn is_model(&self) -> bool {
        matches!(self, Self::Model { .. } | Self::EmptyCompletion { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// Conversion implementations for convenient error handling
impl From<tera::Error> for Error {
    fn from(e: tera::Error) -> Self {
        Self::Template {
            template: "unknown".to_string(),
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}
