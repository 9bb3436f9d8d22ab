// ABOUTME: Export adapter module turning a finished graph into output artifacts
// ABOUTME: Renders the raster image and writes the draw.io document beside it

pub mod dot;
pub mod drawio;
pub mod error;
pub mod graphviz;
pub mod render;

use std::path::{Path, PathBuf};
use tracing::info;

use self::drawio::{DiagramDocument, DrawioConverter, DIAGRAM_EXTENSION};
use self::error::{ConversionError, ExportError, RenderError, Result};
use self::graphviz::Graphviz;
use self::render::GraphvizRenderer;
use crate::graph::WorkflowGraph;

pub use error::GraphvizError;

/// Lays out a graph and renders it to an image file.
pub trait LayoutEngine {
    fn layout_and_render(&self, graph: &WorkflowGraph, path: &Path)
        -> std::result::Result<(), RenderError>;
}

/// Converts a graph into an editable diagram document.
pub trait DiagramConverter {
    fn convert(&self, graph: &WorkflowGraph)
        -> std::result::Result<DiagramDocument, ConversionError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifacts {
    pub image: PathBuf,
    pub diagram: PathBuf,
}

pub struct Exporter {
    layout_engine: Box<dyn LayoutEngine>,
    converter: Box<dyn DiagramConverter>,
}

impl Exporter {
    pub fn new(layout_engine: Box<dyn LayoutEngine>, converter: Box<dyn DiagramConverter>) -> Self {
        Self {
            layout_engine,
            converter,
        }
    }

    /// Exporter backed by the Graphviz renderer and the draw.io converter
    pub fn with_graphviz(graphviz: Graphviz) -> Self {
        Self::new(
            Box::new(GraphvizRenderer::new(graphviz.clone())),
            Box::new(DrawioConverter::new(graphviz)),
        )
    }

    /// Render the image, then convert and write the diagram document to the
    /// sibling `.drawio` path. An image already written is left in place
    /// when the diagram step fails.
    pub fn export(&self, graph: &WorkflowGraph, image_path: &Path) -> Result<ExportArtifacts> {
        self.layout_engine.layout_and_render(graph, image_path)?;

        let diagram_path = diagram_path_for(image_path);
        let document = self.converter.convert(graph)?;
        document
            .write_to(&diagram_path)
            .map_err(|source| ExportError::WriteError {
                path: diagram_path.clone(),
                source,
            })?;
        info!("Wrote diagram document to {}", diagram_path.display());

        Ok(ExportArtifacts {
            image: image_path.to_path_buf(),
            diagram: diagram_path,
        })
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::with_graphviz(Graphviz::default())
    }
}

/// The diagram document lives beside the image with a `.drawio` extension
pub fn diagram_path_for(image_path: &Path) -> PathBuf {
    image_path.with_extension(DIAGRAM_EXTENSION)
}
