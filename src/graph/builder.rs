// ABOUTME: Builds a styled workflow graph from a resolved entrypoint template
// ABOUTME: Handles DAG dependency edges, sequential step edges, and entry-node marking

use tracing::{debug, info};

use super::error::{GraphError, Result};
use super::normalize::flatten_steps;
use super::workflow_graph::{NodeStyle, WorkflowGraph};
use crate::parser::{EntrypointTemplate, Task, TemplateStyle};

#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    entry_style: NodeStyle,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_style(mut self, entry_style: NodeStyle) -> Self {
        self.entry_style = entry_style;
        self
    }

    /// Build the graph for a template, dispatching on its style
    pub fn build(&self, template: &EntrypointTemplate) -> Result<WorkflowGraph> {
        match &template.style {
            TemplateStyle::Dag { tasks } => {
                info!("Creating DAG diagram");
                self.build_dag(&template.name, tasks)
            }
            TemplateStyle::Steps { sequence } => {
                info!("Creating Steps diagram");
                let tasks = flatten_steps(sequence);
                self.build_steps(&template.name, &tasks)
            }
        }
    }

    /// Connect every dependency `d` of task `t` as `d -> t`, then mark the
    /// tasks that carry no `dependencies` field.
    pub fn build_dag(&self, name: &str, tasks: &[Task]) -> Result<WorkflowGraph> {
        if tasks.is_empty() {
            return Err(GraphError::EmptyDag {
                template: name.to_string(),
            });
        }

        let mut graph = WorkflowGraph::new(name);
        for task in tasks {
            graph.add_task(&task.name);
        }

        for task in tasks {
            for dependency in task.dependencies.iter().flatten() {
                if !graph.contains(dependency) {
                    return Err(GraphError::UnknownDependency {
                        task: task.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
                graph.add_edge(dependency, &task.name)?;
            }
        }

        for task in tasks.iter().filter(|task| task.is_entry()) {
            graph.mark_entry(&task.name, &self.entry_style)?;
        }

        debug!(
            "Built DAG graph '{}' with {} nodes and {} edges",
            name,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Chain the flattened steps in order and mark the first one.
    pub fn build_steps(&self, name: &str, tasks: &[&Task]) -> Result<WorkflowGraph> {
        let first = tasks.first().ok_or_else(|| GraphError::EmptySteps {
            template: name.to_string(),
        })?;

        let mut graph = WorkflowGraph::new(name);
        for task in tasks {
            graph.add_task(&task.name);
        }

        for pair in tasks.windows(2) {
            graph.add_edge(&pair[0].name, &pair[1].name)?;
        }

        graph.mark_entry(&first.name, &self.entry_style)?;

        debug!(
            "Built steps graph '{}' with {} nodes and {} edges",
            name,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
