// ABOUTME: Error types for image rendering and diagram conversion
// ABOUTME: Separates Graphviz process failures from rendering and conversion errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphvizError {
    #[error("Graphviz program '{program}' was not found. Install Graphviz or set ARGOVIZ_DOT")]
    ProgramNotFound { program: String },

    #[error("Graphviz program '{program}' failed ({status}): {stderr}")]
    ProcessFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("IO error while running Graphviz: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render image {}: {source}", path.display())]
    Graphviz {
        path: PathBuf,
        #[source]
        source: GraphvizError,
    },
}

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to lay out graph for diagram conversion: {0}")]
    Layout(#[from] GraphvizError),

    #[error("Invalid Graphviz layout output: {0}")]
    InvalidLayout(#[from] serde_json::Error),

    #[error("Layout has no position for node '{node}'")]
    MissingPosition { node: String },

    #[error("Malformed layout attribute '{attribute}': {value}")]
    MalformedAttribute { attribute: String, value: String },

    #[error("Failed to write diagram XML: {0}")]
    Xml(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Failed to write diagram document {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
