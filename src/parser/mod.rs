// ABOUTME: Parser module for YAML workflow-template documents
// ABOUTME: Exports document parsing, entrypoint resolution, and task structures

pub mod error;
pub mod template;
pub mod workflow;

pub use error::{ParserError, Result};
pub use template::{
    DagDefinition, EntrypointTemplate, StepEntry, Task, TemplateDefinition, TemplateStyle,
};
pub use workflow::{WorkflowDocument, WorkflowParser, WorkflowSpec};
