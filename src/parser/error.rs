// ABOUTME: Error types for workflow document parsing and entrypoint resolution
// ABOUTME: Defines specific error types for parser module operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to read workflow file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("The workflow document does not contain '{0}'")]
    MissingField(String),

    #[error("Entrypoint '{entrypoint}' does not match any template. Available templates: {available:?}")]
    UnknownEntrypoint {
        entrypoint: String,
        available: Vec<String>,
    },

    #[error("Template '{template}' is malformed: {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Template '{template}' does not contain a dag or steps")]
    MissingStyle { template: String },

    #[error("Template '{template}' contains both a dag and steps; only one is allowed")]
    AmbiguousStyle { template: String },
}

pub type Result<T> = std::result::Result<T, ParserError>;
