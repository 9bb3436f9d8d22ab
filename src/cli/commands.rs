// ABOUTME: Command implementation for the argoviz CLI
// ABOUTME: Runs the parse, build, and export pipeline for one input document

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::config::Config;
use crate::export::graphviz::Graphviz;
use crate::export::{ExportArtifacts, Exporter};
use crate::graph::GraphBuilder;
use crate::parser::WorkflowParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub template: String,
    pub nodes: usize,
    pub edges: usize,
    pub artifacts: ExportArtifacts,
}

/// Render the entrypoint template of `input_file` with Graphviz
pub fn render_diagram(input_file: &Path, image_path: &Path, config: &Config) -> Result<RenderSummary> {
    let exporter = Exporter::with_graphviz(Graphviz::from(&config.graphviz));
    render_with_exporter(input_file, image_path, config, &exporter)
}

/// Run the pipeline with a caller-supplied exporter. Every error before the
/// export step returns without touching the output paths.
pub fn render_with_exporter(
    input_file: &Path,
    image_path: &Path,
    config: &Config,
    exporter: &Exporter,
) -> Result<RenderSummary> {
    if !input_file.exists() {
        return Err(anyhow!(
            "The YAML file does not exist: {}",
            input_file.display()
        ));
    }

    info!("Loading workflow document: {}", input_file.display());
    let template = WorkflowParser::new()
        .load_entrypoint(input_file)
        .with_context(|| format!("Failed to load {}", input_file.display()))?;
    info!("Entrypoint template '{}' uses {} style", template.name, template.style);

    let graph = GraphBuilder::new()
        .with_entry_style(config.entry_style.clone())
        .build(&template)?;

    let artifacts = exporter.export(&graph, image_path)?;

    Ok(RenderSummary {
        template: template.name,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        artifacts,
    })
}

/// Print what was written
pub fn print_summary(summary: &RenderSummary) {
    println!(
        "✓ Template '{}': {} tasks, {} edges",
        summary.template, summary.nodes, summary.edges
    );
    println!("  Image:   {}", summary.artifacts.image.display());
    println!("  Diagram: {}", summary.artifacts.diagram.display());
}

/// Resolve the image path for a run
pub fn resolve_image_path(input_file: &Path, output_file: Option<&Path>) -> PathBuf {
    match output_file {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => super::args::default_image_path(input_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::drawio::{build_document, DiagramDocument, GraphLayout, NodeGeometry};
    use crate::export::error::{ConversionError, RenderError};
    use crate::export::{DiagramConverter, LayoutEngine};
    use crate::graph::WorkflowGraph;
    use std::fs;
    use tempfile::tempdir;

    struct TouchRenderer;

    impl LayoutEngine for TouchRenderer {
        fn layout_and_render(
            &self,
            _graph: &WorkflowGraph,
            path: &Path,
        ) -> std::result::Result<(), RenderError> {
            fs::write(path, b"png").map_err(|e| RenderError::Graphviz {
                path: path.to_path_buf(),
                source: e.into(),
            })
        }
    }

    struct GridConverter;

    impl DiagramConverter for GridConverter {
        fn convert(
            &self,
            graph: &WorkflowGraph,
        ) -> std::result::Result<DiagramDocument, ConversionError> {
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

    fn exporter() -> Exporter {
        Exporter::new(Box::new(TouchRenderer), Box::new(GridConverter))
    }

    #[test]
    fn test_render_steps_document() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("workflow.yaml");
        fs::write(
            &input,
            r#"
spec:
  entrypoint: main
  templates:
    - name: main
      steps:
        - - name: S1
        - - name: S2
          - name: S3
        - - name: S4
"#,
        )
        .unwrap();

        let image = resolve_image_path(&input, None);
        let summary =
            render_with_exporter(&input, &image, &Config::default(), &exporter()).unwrap();

        assert_eq!(summary.template, "main");
        assert_eq!(summary.nodes, 4);
        assert_eq!(summary.edges, 3);
        assert_eq!(summary.artifacts.image, dir.path().join("workflow.png"));
        assert_eq!(summary.artifacts.diagram, dir.path().join("workflow.drawio"));
        assert!(summary.artifacts.diagram.exists());
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("missing.yaml");
        let image = dir.path().join("missing.png");

        let err = render_with_exporter(&input, &image, &Config::default(), &exporter())
            .unwrap_err();

        assert!(err.to_string().contains("does not exist"));
        assert!(!image.exists());
    }

    #[test]
    fn test_resolve_image_path() {
        assert_eq!(
            resolve_image_path(Path::new("a/b/workflow.yaml"), None),
            PathBuf::from("a/b/workflow.png")
        );
        assert_eq!(
            resolve_image_path(Path::new("a/b/workflow.yaml"), Some(Path::new("x/y.png"))),
            PathBuf::from("x/y.png")
        );
    }
}
