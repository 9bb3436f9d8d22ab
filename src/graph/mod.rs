// ABOUTME: Graph construction module for workflow templates
// ABOUTME: Flattens step groups, builds the directed task graph, and marks entry nodes

pub mod builder;
pub mod error;
pub mod normalize;
pub mod workflow_graph;

pub use builder::GraphBuilder;
pub use error::{GraphError, Result};
pub use normalize::flatten_steps;
pub use workflow_graph::{NodeStyle, TaskNode, WorkflowGraph};
