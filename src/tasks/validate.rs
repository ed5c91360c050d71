// src/tasks/validate.rs

//! Dependency validation over a parsed task list.
//!
//! The parser never cross-checks rows; this pass is run separately by
//! callers (the dispatcher, `mdbridge validate`) that need a sound graph.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{MdbridgeError, Result};
use crate::tasks::model::{Task, TaskStatus};

pub fn validate_tasks(tasks: &[Task]) -> Result<()> {
    ensure_unique_ids(tasks)?;
    validate_dependencies(tasks)?;
    validate_acyclic(tasks)?;
    Ok(())
}

fn ensure_unique_ids(tasks: &[Task]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        if let Some(first_line) = seen.insert(task.id.as_str(), task.source_line) {
            return Err(MdbridgeError::TaskTable(format!(
                "duplicate task id '{}' on lines {} and {}",
                task.id, first_line, task.source_line
            )));
        }
    }
    Ok(())
}

fn validate_dependencies(tasks: &[Task]) -> Result<()> {
    let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    for task in tasks {
        for dep in &task.dependencies {
            if dep == &task.id {
                return Err(MdbridgeError::TaskTable(format!(
                    "task '{}' cannot depend on itself",
                    task.id
                )));
            }
            if !ids.contains(dep.as_str()) {
                return Err(MdbridgeError::TaskTable(format!(
                    "task '{}' has unknown dependency '{}'",
                    task.id, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_acyclic(tasks: &[Task]) -> Result<()> {
    // Edge direction: dependency -> dependent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for task in tasks {
        graph.add_node(task.id.as_str());
    }
    for task in tasks {
        for dep in &task.dependencies {
            graph.add_edge(dep.as_str(), task.id.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(MdbridgeError::DependencyCycle(format!(
            "cycle detected in task dependencies involving task '{}'",
            cycle.node_id()
        ))),
    }
}

/// `PENDING` tasks whose dependencies have all reached `DONE` or `SKIPPED`,
/// in file order. Unknown dependencies count as unsatisfied.
pub fn ready_tasks(tasks: &[Task]) -> Vec<&Task> {
    let status_of: HashMap<&str, TaskStatus> =
        tasks.iter().map(|t| (t.id.as_str(), t.status)).collect();

    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .filter(|t| {
            t.dependencies.iter().all(|dep| {
                status_of
                    .get(dep.as_str())
                    .is_some_and(|s| s.satisfies_dependents())
            })
        })
        .collect()
}
