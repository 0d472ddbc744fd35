use std::collections::HashMap;

use crate::model::{Task, TaskId};

use super::graph::DependencyGraph;

/// Reverse edges: dependency id -> ids of the tasks that declare it.
///
/// Dependents appear in task-list order. Ids that name no task get no entry.
pub fn build_dependents(tasks: &[Task]) -> HashMap<TaskId, Vec<TaskId>> {
    let graph = DependencyGraph::build(tasks);
    build_graph_dependents(&graph)
}

pub fn build_graph_dependents(graph: &DependencyGraph<'_>) -> HashMap<TaskId, Vec<TaskId>> {
    let mut dependents: HashMap<TaskId, Vec<TaskId>> = HashMap::new();
    for task in graph.tasks() {
        for dep in graph.resolvable(&task.id) {
            dependents
                .entry(dep.to_string())
                .or_default()
                .push(task.id.clone());
        }
    }
    dependents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependents_follow_list_order() {
        let tasks = vec![
            Task::new("1", "root"),
            Task::new("3", "c").with_dependencies(["1"]),
            Task::new("2", "b").with_dependencies(["1"]),
            Task::new("4", "d").with_dependencies(["2", "3"]),
        ];
        let dependents = build_dependents(&tasks);
        assert_eq!(dependents["1"], vec!["3".to_string(), "2".to_string()]);
        assert_eq!(dependents["2"], vec!["4".to_string()]);
        assert_eq!(dependents["3"], vec!["4".to_string()]);
        assert!(!dependents.contains_key("4"));
    }

    #[test]
    fn dangling_ids_create_no_entry() {
        let tasks = vec![Task::new("5", "lonely").with_dependencies(["nonexistent"])];
        assert!(build_dependents(&tasks).is_empty());
    }
}
