//! Error types for tmpl-processor

use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a host document into fragments.
///
/// None of these reach the lint engine: the preprocess boundary logs them
/// and falls back to linting the host text alone.
#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Failed to load {language} grammar: {message}")]
    LanguageInit {
        language: &'static str,
        message: String,
    },

    #[error("Parser produced no tree for {path}")]
    ParseFailed { path: String },

    #[error("Syntax error in {path} at {row}:{column}")]
    Syntax {
        path: String,
        row: usize,
        column: usize,
    },

    #[error("Byte offset {offset} is outside the host document")]
    Locate { offset: usize },
}

/// Failures while loading a [`ProcessorConfig`](crate::ProcessorConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
