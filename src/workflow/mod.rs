//! Dependency-level layout for the workflow view.
//!
//! A pass runs `levels` → `dependents` → `packing` → `edges` over one
//! borrowed task list and always recomputes from scratch. Dangling ids and
//! cycles are normalised away; nothing here fails.

mod dependents;
mod edges;
mod graph;
mod levels;
mod packing;
mod types;

pub use dependents::{build_dependents, build_graph_dependents};
pub use edges::{compute_edges, connector};
pub use graph::DependencyGraph;
pub use levels::{LevelResolution, Traversal, level_of, resolve_graph_levels, resolve_levels};
pub use packing::{canvas_size, level_buckets, pack_levels, project};
pub use types::{CubicPath, EdgeLayout, NodeLayout, Point, TaskNode, WorkflowLayout};

use crate::config::LayoutConfig;
use crate::model::Task;

/// Leveled, packed nodes plus the cycle diagnostics of the pass.
pub fn build_nodes(tasks: &[Task]) -> (Vec<TaskNode>, LevelResolution) {
    let graph = DependencyGraph::build(tasks);
    let resolution = resolve_graph_levels(&graph);
    let mut dependents = build_graph_dependents(&graph);

    let nodes = graph
        .tasks()
        .iter()
        .map(|task| TaskNode {
            task: (*task).clone(),
            dependents: dependents.remove(task.id.as_str()).unwrap_or_default(),
            level: resolution.level(&task.id).unwrap_or(0),
            position: 0,
        })
        .collect();

    (pack_levels(nodes), resolution)
}

pub fn compute_workflow(tasks: &[Task], config: &LayoutConfig) -> WorkflowLayout {
    let (nodes, resolution) = build_nodes(tasks);
    let nodes = project(nodes, config);
    let edges = compute_edges(&nodes);
    let (width, height) = canvas_size(&nodes, config);

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        levels = nodes.iter().map(|n| n.node.level + 1).max().unwrap_or(0),
        cycles = resolution.cycles.len(),
        "computed workflow layout"
    );

    WorkflowLayout {
        nodes,
        edges,
        width,
        height,
        cycles: resolution.cycles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, id).with_dependencies(deps.iter().copied())
    }

    #[test]
    fn diamond_nodes_carry_level_position_and_dependents() {
        let tasks = vec![
            task("1", &[]),
            task("2", &["1"]),
            task("3", &["1"]),
            task("4", &["2", "3"]),
        ];
        let (nodes, _) = build_nodes(&tasks);
        let summary: Vec<(&str, usize, usize)> = nodes
            .iter()
            .map(|n| (n.id(), n.level, n.position))
            .collect();
        assert_eq!(
            summary,
            vec![("1", 0, 0), ("2", 1, 0), ("3", 1, 1), ("4", 2, 0)]
        );
        assert_eq!(nodes[0].dependents, vec!["2".to_string(), "3".to_string()]);
        assert!(nodes[3].dependents.is_empty());
    }

    #[test]
    fn workflow_edges_follow_dependencies() {
        let tasks = vec![
            task("1", &[]),
            task("2", &["1"]),
            task("3", &["1"]),
            task("4", &["2", "3", "ghost"]),
        ];
        let layout = compute_workflow(&tasks, &LayoutConfig::default());
        let pairs: Vec<(&str, &str)> = layout
            .edges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(pairs, vec![("1", "2"), ("1", "3"), ("2", "4"), ("3", "4")]);
        assert_eq!((layout.width, layout.height), (760.0, 320.0));
    }

    #[test]
    fn empty_task_list() {
        let layout = compute_workflow(&[], &LayoutConfig::default());
        assert!(layout.is_empty());
        assert!(layout.edges.is_empty());
        assert!(layout.cycles.is_empty());
        assert_eq!(layout.max_level(), None);
    }

    #[test]
    fn cycle_still_produces_edges_both_ways() {
        let layout = compute_workflow(&[task("A", &["B"]), task("B", &["A"])], &LayoutConfig::default());
        assert_eq!(layout.edges.len(), 2);
        assert_eq!(layout.cycles.len(), 1);
    }
}
