// ABOUTME: Raster image rendering of workflow graphs through Graphviz
// ABOUTME: Implements the layout engine seam with a hierarchical dot layout

use std::path::Path;
use tracing::info;

use super::dot::to_dot;
use super::error::RenderError;
use super::graphviz::Graphviz;
use super::LayoutEngine;
use crate::graph::WorkflowGraph;

pub const IMAGE_FORMAT: &str = "png";

#[derive(Debug, Clone, Default)]
pub struct GraphvizRenderer {
    graphviz: Graphviz,
}

impl GraphvizRenderer {
    pub fn new(graphviz: Graphviz) -> Self {
        Self { graphviz }
    }
}

impl LayoutEngine for GraphvizRenderer {
    fn layout_and_render(&self, graph: &WorkflowGraph, path: &Path) -> Result<(), RenderError> {
        let dot = to_dot(graph);
        self.graphviz
            .run(&dot, IMAGE_FORMAT, Some(path))
            .map_err(|source| RenderError::Graphviz {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Rendered image to {}", path.display());
        Ok(())
    }
}
