// ABOUTME: Error types for graph construction from workflow templates
// ABOUTME: Covers dangling dependencies and empty task lists

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("Task not found in graph: {name}")]
    UnknownTask { name: String },

    #[error("Template '{template}' has an empty steps list")]
    EmptySteps { template: String },

    #[error("Template '{template}' has a dag with no tasks; empty diagrams are not drawn")]
    EmptyDag { template: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
