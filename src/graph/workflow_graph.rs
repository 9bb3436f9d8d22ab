// ABOUTME: Directed task graph keyed by task name with per-node styling
// ABOUTME: Wraps a petgraph DiGraph and keeps nodes in declaration order

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use super::error::{GraphError, Result};

/// Visual attributes applied to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    pub name: String,
    pub style: Option<NodeStyle>,
}

/// Nodes are task names, edges read "must happen before".
#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    name: String,
    graph: DiGraph<TaskNode, ()>,
    node_indices: IndexMap<String, NodeIndex>,
}

fn default_style() -> String {
    "filled".to_string()
}

fn default_fill_color() -> String {
    "lightblue".to_string()
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            style: default_style(),
            fill_color: default_fill_color(),
        }
    }
}

impl WorkflowGraph {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            graph: DiGraph::new(),
            node_indices: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a task node. Adding a name twice returns the existing node.
    pub fn add_task(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_indices.get(name) {
            return index;
        }

        let index = self.graph.add_node(TaskNode {
            name: name.to_string(),
            style: None,
        });
        self.node_indices.insert(name.to_string(), index);
        index
    }

    /// Add an edge `from -> to`. Both tasks must already exist; an edge that
    /// is already present is left as is.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<()> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;
        self.graph.update_edge(from_index, to_index, ());
        Ok(())
    }

    /// Apply `style` to an existing task.
    pub fn mark_entry(&mut self, name: &str, style: &NodeStyle) -> Result<()> {
        let index = self.index_of(name)?;
        self.graph[index].style = Some(style.clone());
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex> {
        self.node_indices
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownTask {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.node_indices.is_empty()
    }

    /// Nodes in the order they were first added
    pub fn nodes(&self) -> impl Iterator<Item = &TaskNode> + '_ {
        self.node_indices.values().map(move |&index| &self.graph[index])
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.node_indices.keys().map(|name| name.as_str()).collect()
    }

    /// Edges as `(from, to)` name pairs in insertion order
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].name.as_str(),
                    self.graph[edge.target()].name.as_str(),
                )
            })
            .collect()
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&from_index), Some(&to_index)) => {
                self.graph.find_edge(from_index, to_index).is_some()
            }
            _ => false,
        }
    }

    /// Tasks with an edge into `name`
    pub fn get_dependencies(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Incoming)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
        if let Some(&index) = self.node_indices.get(name) {
            self.graph
                .neighbors_directed(index, direction)
                .map(|neighbor| self.graph[neighbor].name.clone())
                .collect()
        } else {
            Vec::new()
        }
    }

    pub fn style_of(&self, name: &str) -> Option<&NodeStyle> {
        let &index = self.node_indices.get(name)?;
        self.graph[index].style.as_ref()
    }

    /// Names of styled (entry) nodes, in declaration order
    pub fn entry_nodes(&self) -> Vec<&str> {
        self.nodes()
            .filter(|node| node.style.is_some())
            .map(|node| node.name.as_str())
            .collect()
    }
}
