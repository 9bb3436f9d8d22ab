// ABOUTME: Workflow document structures and parsing functionality
// ABOUTME: Loads the YAML document and resolves its entrypoint template

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ParserError, Result};
use super::template::{EntrypointTemplate, TemplateDefinition};

/// A workflow (or workflow template) document. Top-level keys other than
/// `spec` (`apiVersion`, `kind`, `metadata`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub spec: Option<WorkflowSpec>,
}

/// Templates stay untyped until one is selected, so a template that is
/// never drawn cannot fail the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSpec {
    pub entrypoint: Option<String>,
    #[serde(default)]
    pub templates: Vec<serde_yaml::Value>,
}

impl WorkflowDocument {
    /// Parse a workflow document from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ParserError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse a workflow document from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(ParserError::YamlError)
    }

    fn spec(&self) -> Result<&WorkflowSpec> {
        self.spec
            .as_ref()
            .ok_or_else(|| ParserError::MissingField("spec".to_string()))
    }

    /// Name of the entrypoint template
    pub fn entrypoint(&self) -> Result<&str> {
        self.spec()?
            .entrypoint
            .as_deref()
            .ok_or_else(|| ParserError::MissingField("spec.entrypoint".to_string()))
    }

    /// Get a template definition by name. Only the matching template is
    /// deserialized.
    pub fn get_template(&self, name: &str) -> Result<Option<TemplateDefinition>> {
        let Some(raw) = self
            .spec
            .as_ref()
            .and_then(|spec| spec.templates.iter().find(|t| template_name(t) == Some(name)))
        else {
            return Ok(None);
        };

        serde_yaml::from_value(raw.clone())
            .map(Some)
            .map_err(|source| ParserError::InvalidTemplate {
                template: name.to_string(),
                source,
            })
    }

    pub fn template_names(&self) -> Vec<String> {
        self.spec
            .as_ref()
            .map(|spec| {
                spec.templates
                    .iter()
                    .filter_map(template_name)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find the entrypoint template and resolve its dependency style.
    /// The first template carrying the entrypoint name wins.
    pub fn resolve_entrypoint(&self) -> Result<EntrypointTemplate> {
        let entrypoint = self.entrypoint()?;
        let template =
            self.get_template(entrypoint)?
                .ok_or_else(|| ParserError::UnknownEntrypoint {
                    entrypoint: entrypoint.to_string(),
                    available: self.template_names(),
                })?;

        template.resolve()
    }
}

fn template_name(template: &serde_yaml::Value) -> Option<&str> {
    template.get("name").and_then(serde_yaml::Value::as_str)
}

#[derive(Debug, Clone)]
pub struct WorkflowParser;

impl WorkflowParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<WorkflowDocument> {
        WorkflowDocument::from_file(path)
    }

    pub fn parse_string(&self, content: &str) -> Result<WorkflowDocument> {
        WorkflowDocument::from_yaml(content)
    }

    /// Parse a file and resolve its entrypoint template in one pass
    pub fn load_entrypoint<P: AsRef<Path>>(&self, path: P) -> Result<EntrypointTemplate> {
        self.parse_file(path)?.resolve_entrypoint()
    }
}

impl Default for WorkflowParser {
    fn default() -> Self {
        Self::new()
    }
}
