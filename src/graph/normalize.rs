// ABOUTME: Flattening of nested step groups into a single ordered task list
// ABOUTME: Grouping structure is discarded, relative order is kept

use crate::parser::{StepEntry, Task};

/// Expand nested step groups in place, to any depth.
pub fn flatten_steps(entries: &[StepEntry]) -> Vec<&Task> {
    let mut tasks = Vec::new();
    collect(entries, &mut tasks);
    tasks
}

fn collect<'a>(entries: &'a [StepEntry], tasks: &mut Vec<&'a Task>) {
    for entry in entries {
        match entry {
            StepEntry::Task(task) => tasks.push(task),
            StepEntry::Group(group) => collect(group, tasks),
        }
    }
}
