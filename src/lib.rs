// ABOUTME: Main library module for argoviz, the Argo workflow template diagrammer
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod export;
pub mod graph;
pub mod parser;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use export::{DiagramConverter, ExportArtifacts, Exporter, LayoutEngine};
pub use graph::{GraphBuilder, NodeStyle, WorkflowGraph};
pub use parser::{EntrypointTemplate, TemplateStyle, WorkflowDocument, WorkflowParser};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
