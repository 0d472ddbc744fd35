use std::collections::{HashMap, HashSet};

use crate::model::{Task, TaskId};

use super::graph::DependencyGraph;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelResolution {
    pub levels: HashMap<TaskId, usize>,
    /// Distinct cycles met during traversal, ids in traversal order. Two
    /// cycles are the same when one is a rotation of the other.
    pub cycles: Vec<Vec<TaskId>>,
}

impl LevelResolution {
    pub fn level(&self, id: &str) -> Option<usize> {
        self.levels.get(id).copied()
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// Memo and in-progress set for one resolution pass.
#[derive(Debug, Default)]
pub struct Traversal<'a> {
    pub memo: HashMap<&'a str, usize>,
    pub visiting: HashSet<&'a str>,
    pub cycles: Vec<Vec<&'a str>>,
}

struct Frame<'a> {
    id: &'a str,
    deps: &'a [String],
    next: usize,
    level: usize,
}

impl<'a> Frame<'a> {
    fn enter(graph: &DependencyGraph<'a>, id: &'a str) -> Self {
        Self {
            id,
            deps: graph.dependencies(id),
            next: 0,
            level: 0,
        }
    }
}

pub fn resolve_levels(tasks: &[Task]) -> LevelResolution {
    let graph = DependencyGraph::build(tasks);
    resolve_graph_levels(&graph)
}

pub fn resolve_graph_levels(graph: &DependencyGraph<'_>) -> LevelResolution {
    if graph.is_empty() {
        return LevelResolution::default();
    }
    let mut state = Traversal::default();
    for task in graph.tasks() {
        level_of(graph, task.id.as_str(), &mut state);
    }

    for cycle in &state.cycles {
        tracing::warn!(ids = ?cycle, "dependency cycle detected; back edge treated as level 0");
    }

    LevelResolution {
        levels: state
            .memo
            .iter()
            .map(|(id, level)| (id.to_string(), *level))
            .collect(),
        cycles: state
            .cycles
            .iter()
            .map(|cycle| cycle.iter().map(|id| id.to_string()).collect())
            .collect(),
    }
}

/// Longest-path level of `id`, memoised in `state`.
///
/// A dependency that is still on the traversal stack resolves to 0 for that
/// edge. Its own memo entry is only written once it finishes, so the
/// short-circuit value never leaks to other paths. Which id of a cycle gets
/// short-circuited depends on where the traversal entered it.
pub fn level_of<'a>(graph: &DependencyGraph<'a>, id: &'a str, state: &mut Traversal<'a>) -> usize {
    if let Some(&level) = state.memo.get(id) {
        return level;
    }
    if !graph.contains(id) || state.visiting.contains(id) {
        return 0;
    }

    state.visiting.insert(id);
    let mut stack = vec![Frame::enter(graph, id)];

    while let Some(frame) = stack.last_mut() {
        let deps = frame.deps;
        if let Some(dep) = deps.get(frame.next) {
            frame.next += 1;
            let dep = dep.as_str();
            if !graph.contains(dep) {
                tracing::debug!(task = frame.id, dependency = dep, "dangling dependency ignored");
                continue;
            }
            if let Some(&level) = state.memo.get(dep) {
                frame.level = frame.level.max(level + 1);
                continue;
            }
            if state.visiting.contains(dep) {
                frame.level = frame.level.max(1);
                record_cycle(&stack, dep, &mut state.cycles);
                continue;
            }
            state.visiting.insert(dep);
            stack.push(Frame::enter(graph, dep));
            continue;
        }

        let (done, level) = (frame.id, frame.level);
        stack.pop();
        state.visiting.remove(done);
        state.memo.insert(done, level);
        match stack.last_mut() {
            Some(parent) => parent.level = parent.level.max(level + 1),
            None => return level,
        }
    }

    state.memo.get(id).copied().unwrap_or(0)
}

fn record_cycle<'a>(stack: &[Frame<'a>], reentered: &'a str, cycles: &mut Vec<Vec<&'a str>>) {
    let Some(start) = stack.iter().position(|frame| frame.id == reentered) else {
        return;
    };
    let cycle: Vec<&str> = stack[start..].iter().map(|frame| frame.id).collect();
    let key = canonical_rotation(&cycle);
    if !cycles.iter().any(|existing| canonical_rotation(existing) == key) {
        cycles.push(cycle);
    }
}

/// Rotates `cycle` so its smallest id comes first.
fn canonical_rotation<'a>(cycle: &[&'a str]) -> Vec<&'a str> {
    let pivot = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    cycle[pivot..].iter().chain(&cycle[..pivot]).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, id).with_dependencies(deps.iter().copied())
    }

    #[test]
    fn diamond_levels() {
        let tasks = vec![
            task("1", &[]),
            task("2", &["1"]),
            task("3", &["1"]),
            task("4", &["2", "3"]),
        ];
        let res = resolve_levels(&tasks);
        assert_eq!(res.level("1"), Some(0));
        assert_eq!(res.level("2"), Some(1));
        assert_eq!(res.level("3"), Some(1));
        assert_eq!(res.level("4"), Some(2));
        assert!(!res.has_cycles());
    }

    #[test]
    fn acyclic_levels_ignore_list_order() {
        let mut tasks = vec![
            task("a", &[]),
            task("b", &["a"]),
            task("c", &["b", "a"]),
            task("d", &["c"]),
            task("e", &["a"]),
        ];
        let forward = resolve_levels(&tasks);
        tasks.reverse();
        let backward = resolve_levels(&tasks);
        assert_eq!(forward, backward);
        assert_eq!(forward.level("d"), Some(3));
    }

    #[test]
    fn shared_dependency_reached_twice_keeps_its_level() {
        // x reaches c through both a and b; the second visit must use the memo.
        let tasks = vec![
            task("x", &["a", "b"]),
            task("a", &["c"]),
            task("b", &["c"]),
            task("c", &["d"]),
            task("d", &[]),
        ];
        let res = resolve_levels(&tasks);
        assert_eq!(res.level("c"), Some(1));
        assert_eq!(res.level("a"), Some(2));
        assert_eq!(res.level("b"), Some(2));
        assert_eq!(res.level("x"), Some(3));
    }

    #[test]
    fn dangling_dependency_is_skipped() {
        let with_ghost = resolve_levels(&[task("r", &[]), task("t", &["r", "ghost"])]);
        let without = resolve_levels(&[task("r", &[]), task("t", &["r"])]);
        assert_eq!(with_ghost.level("t"), without.level("t"));
        assert_eq!(with_ghost.level("t"), Some(1));

        let only_ghost = resolve_levels(&[task("5", &["nonexistent"])]);
        assert_eq!(only_ghost.level("5"), Some(0));
        assert_eq!(only_ghost.level("nonexistent"), None);
    }

    #[test]
    fn mutual_dependency_terminates() {
        let res = resolve_levels(&[task("A", &["B"]), task("B", &["A"])]);
        // Entered at A: the back edge B -> A resolves to 0.
        assert_eq!(res.level("B"), Some(1));
        assert_eq!(res.level("A"), Some(2));
        assert_eq!(res.cycles, vec![vec!["A".to_string(), "B".to_string()]]);

        let flipped = resolve_levels(&[task("B", &["A"]), task("A", &["B"])]);
        assert_eq!(flipped.level("A"), Some(1));
        assert_eq!(flipped.level("B"), Some(2));
    }

    #[test]
    fn self_dependency_is_a_cycle_of_one() {
        let res = resolve_levels(&[task("loop", &["loop"])]);
        assert_eq!(res.level("loop"), Some(1));
        assert_eq!(res.cycles, vec![vec!["loop".to_string()]]);
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let n = 20_000;
        let tasks: Vec<Task> = (0..n)
            .map(|i| {
                let id = i.to_string();
                if i == 0 {
                    Task::new(&id, &id)
                } else {
                    Task::new(&id, &id).with_dependencies([(i - 1).to_string()])
                }
            })
            .rev()
            .collect();
        let res = resolve_levels(&tasks);
        assert_eq!(res.level(&(n - 1).to_string()), Some(n - 1));
    }

    #[test]
    fn level_recurrence_holds_on_generated_dags() {
        let mut seed: u64 = 0x5eed;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };
        for round in 0..20 {
            let count = 5 + round * 3;
            let tasks: Vec<Task> = (0..count)
                .map(|i| {
                    let ghost = next() % 5 == 0;
                    let mut deps: Vec<String> = (0..i)
                        .filter(|_| next() % 4 == 0)
                        .map(|d| format!("t{d}"))
                        .collect();
                    if ghost {
                        deps.push("ghost".to_string());
                    }
                    Task::new(&format!("t{i}"), "generated").with_dependencies(deps)
                })
                .collect();
            let res = resolve_levels(&tasks);
            for task in &tasks {
                let resolvable: Vec<usize> = task
                    .dependencies
                    .iter()
                    .filter_map(|dep| res.level(dep))
                    .collect();
                let expected = resolvable.iter().max().map(|m| m + 1).unwrap_or(0);
                assert_eq!(res.level(&task.id), Some(expected), "task {}", task.id);
            }
        }
    }

    #[test]
    fn cycles_match_up_to_rotation_only() {
        assert_eq!(canonical_rotation(&["B", "C", "A"]), vec!["A", "B", "C"]);
        assert_eq!(canonical_rotation(&["C", "A", "B"]), canonical_rotation(&["A", "B", "C"]));
        assert_ne!(canonical_rotation(&["A", "C", "B"]), canonical_rotation(&["A", "B", "C"]));
        assert!(canonical_rotation(&[]).is_empty());
    }

    #[test]
    fn fully_connected_triangle_reports_each_back_edge_cycle() {
        let tasks = vec![task("A", &["B", "C"]), task("B", &["C", "A"]), task("C", &["A", "B"])];
        let res = resolve_levels(&tasks);
        assert_eq!(res.level("C"), Some(1));
        assert_eq!(res.level("B"), Some(2));
        assert_eq!(res.level("A"), Some(3));
        let cycles: Vec<Vec<&str>> = res
            .cycles
            .iter()
            .map(|c| c.iter().map(String::as_str).collect())
            .collect();
        assert_eq!(cycles, vec![vec!["A", "B", "C"], vec!["B", "C"], vec!["A", "B"]]);
    }

    #[test]
    fn explicit_state_can_be_reused_across_calls() {
        let tasks = vec![task("1", &[]), task("2", &["1"])];
        let graph = DependencyGraph::build(&tasks);
        let mut state = Traversal::default();
        assert_eq!(level_of(&graph, "2", &mut state), 1);
        assert_eq!(state.memo.get("1"), Some(&0));
        assert!(state.visiting.is_empty());
        assert_eq!(level_of(&graph, "1", &mut state), 0);
    }
}
