// ABOUTME: Template and task structures for the two dependency-encoding styles
// ABOUTME: Resolves a raw template definition into a DAG or steps style exactly once

use serde::{Deserialize, Serialize};

use super::error::{ParserError, Result};

/// A single named unit of work inside a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Template invoked by this task. Kept for diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// `None` when the field is absent, which is what marks an entry node.
    /// `Some(vec![])` is a present but empty list and is not an entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

/// An element of a `steps` list: a task or a nested (parallel) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepEntry {
    Group(Vec<StepEntry>),
    Task(Task),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DagDefinition {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A template as written in the document. Other template keys
/// (`container`, `script`, `inputs`, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dag: Option<DagDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepEntry>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateStyle {
    Dag { tasks: Vec<Task> },
    Steps { sequence: Vec<StepEntry> },
}

/// The entrypoint template with its style already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrypointTemplate {
    pub name: String,
    pub style: TemplateStyle,
}

impl TemplateDefinition {
    /// Resolve the dependency-encoding style. Exactly one of `dag` and
    /// `steps` must be present.
    pub fn resolve(&self) -> Result<EntrypointTemplate> {
        let style = match (&self.dag, &self.steps) {
            (Some(dag), None) => TemplateStyle::Dag {
                tasks: dag.tasks.clone(),
            },
            (None, Some(steps)) => TemplateStyle::Steps {
                sequence: steps.clone(),
            },
            (Some(_), Some(_)) => {
                return Err(ParserError::AmbiguousStyle {
                    template: self.name.clone(),
                })
            }
            (None, None) => {
                return Err(ParserError::MissingStyle {
                    template: self.name.clone(),
                })
            }
        };

        Ok(EntrypointTemplate {
            name: self.name.clone(),
            style,
        })
    }
}

impl Task {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            template: None,
            dependencies: None,
        }
    }

    pub fn with_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = Some(dependencies.iter().map(|d| d.to_string()).collect());
        self
    }

    /// True when the `dependencies` field is absent altogether.
    pub fn is_entry(&self) -> bool {
        self.dependencies.is_none()
    }
}

impl TemplateStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateStyle::Dag { .. } => "dag",
            TemplateStyle::Steps { .. } => "steps",
        }
    }
}

impl std::fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
