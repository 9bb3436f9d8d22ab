// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides template document builders, scratch directories, and fake exporters

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use argoviz::export::drawio::{build_document, DiagramDocument, GraphLayout, NodeGeometry};
use argoviz::export::error::{ConversionError, RenderError};
use argoviz::export::{DiagramConverter, Exporter, GraphvizError, LayoutEngine};
use argoviz::WorkflowGraph;

pub struct TestTask {
    pub name: String,
    pub dependencies: Option<Vec<String>>,
}

pub enum TestStep {
    Task(String),
    Group(Vec<TestStep>),
}

/// Builds a workflow-template YAML document with one entrypoint template.
pub struct TemplateDocumentBuilder {
    entrypoint: Option<String>,
    template_name: String,
    dag: Option<Vec<TestTask>>,
    steps: Option<Vec<TestStep>>,
}

impl TemplateDocumentBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            entrypoint: Some(name.to_string()),
            template_name: name.to_string(),
            dag: None,
            steps: None,
        }
    }

    pub fn without_entrypoint(mut self) -> Self {
        self.entrypoint = None;
        self
    }

    pub fn add_dag_task(mut self, name: &str) -> Self {
        self.dag.get_or_insert_with(Vec::new).push(TestTask {
            name: name.to_string(),
            dependencies: None,
        });
        self
    }

    pub fn add_dependent_task(mut self, name: &str, dependencies: Vec<&str>) -> Self {
        self.dag.get_or_insert_with(Vec::new).push(TestTask {
            name: name.to_string(),
            dependencies: Some(dependencies.into_iter().map(|d| d.to_string()).collect()),
        });
        self
    }

    pub fn add_step(mut self, name: &str) -> Self {
        self.steps
            .get_or_insert_with(Vec::new)
            .push(TestStep::Task(name.to_string()));
        self
    }

    pub fn add_parallel_steps(mut self, names: Vec<&str>) -> Self {
        let group = names
            .into_iter()
            .map(|n| TestStep::Task(n.to_string()))
            .collect();
        self.steps
            .get_or_insert_with(Vec::new)
            .push(TestStep::Group(group));
        self
    }

    pub fn with_empty_steps(mut self) -> Self {
        self.steps = Some(Vec::new());
        self
    }

    pub fn generate_yaml(&self) -> String {
        let mut yaml = String::from(
            "apiVersion: argoproj.io/v1alpha1\nkind: WorkflowTemplate\nmetadata:\n  name: test\nspec:\n",
        );

        if let Some(entrypoint) = &self.entrypoint {
            yaml.push_str(&format!("  entrypoint: {}\n", entrypoint));
        }

        yaml.push_str("  templates:\n");
        yaml.push_str(&format!("    - name: {}\n", self.template_name));

        if let Some(tasks) = &self.dag {
            yaml.push_str("      dag:\n        tasks:\n");
            for task in tasks {
                yaml.push_str(&format!("          - name: {}\n", task.name));
                yaml.push_str("            template: echo\n");
                if let Some(dependencies) = &task.dependencies {
                    yaml.push_str(&format!(
                        "            dependencies: [{}]\n",
                        dependencies.join(", ")
                    ));
                }
            }
        }

        if let Some(steps) = &self.steps {
            if steps.is_empty() {
                yaml.push_str("      steps: []\n");
            } else {
                yaml.push_str("      steps:\n");
                for step in steps {
                    write_step(&mut yaml, step, 8);
                }
            }
        }

        yaml.push_str("    - name: echo\n      container:\n        image: alpine:3.7\n");
        yaml
    }

    pub fn write_to_file(&self, path: &Path) {
        fs::write(path, self.generate_yaml()).expect("Failed to write template document");
    }
}

fn write_step(yaml: &mut String, step: &TestStep, indent: usize) {
    let pad = " ".repeat(indent);
    match step {
        TestStep::Task(name) => {
            yaml.push_str(&format!("{}- name: {}\n", pad, name));
            yaml.push_str(&format!("{}  template: echo\n", pad));
        }
        TestStep::Group(group) => {
            yaml.push_str(&format!("{}-\n", pad));
            for inner in group {
                write_step(yaml, inner, indent + 2);
            }
        }
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn input_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.yaml", name))
    }

    pub fn create_input_file(&self, name: &str, builder: &TemplateDocumentBuilder) -> PathBuf {
        let path = self.input_file(name);
        builder.write_to_file(&path);
        path
    }

    pub fn create_raw_input_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.input_file(name);
        fs::write(&path, content).expect("Failed to write input file");
        path
    }

    /// Every file currently in the scratch directory
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to read temp directory")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

/// Writes a placeholder image instead of running Graphviz
pub struct FakeRenderer;

impl LayoutEngine for FakeRenderer {
    fn layout_and_render(&self, graph: &WorkflowGraph, path: &Path) -> Result<(), RenderError> {
        fs::write(path, graph.name()).map_err(|e| RenderError::Graphviz {
            path: path.to_path_buf(),
            source: GraphvizError::IoError(e),
        })
    }
}

/// Lays nodes out top to bottom in declaration order
pub struct ColumnConverter;

impl DiagramConverter for ColumnConverter {
    fn convert(&self, graph: &WorkflowGraph) -> Result<DiagramDocument, ConversionError> {
        let mut layout = GraphLayout::default();
        for row in 0..graph.node_count() {
            layout.insert(
                row,
                NodeGeometry {
                    x: 0.0,
                    y: row as f64 * 72.0,
                    width: 54.0,
                    height: 36.0,
                },
            );
        }
        build_document(graph, &layout)
    }
}

pub fn fake_exporter() -> Exporter {
    Exporter::new(Box::new(FakeRenderer), Box::new(ColumnConverter))
}

pub fn graphviz_available() -> bool {
    argoviz::export::graphviz::Graphviz::default().is_available()
}
