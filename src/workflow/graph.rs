use std::collections::HashMap;

use crate::model::Task;

/// Adjacency view over a borrowed task list: id -> dependency ids.
///
/// Ids are expected to be unique. When they are not, the first task carrying
/// an id is the one the graph sees.
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    order: Vec<&'a Task>,
    index: HashMap<&'a str, usize>,
}

impl<'a> DependencyGraph<'a> {
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut order = Vec::with_capacity(tasks.len());
        let mut index = HashMap::with_capacity(tasks.len());
        for task in tasks {
            if index.contains_key(task.id.as_str()) {
                tracing::debug!(id = %task.id, "duplicate task id ignored");
                continue;
            }
            index.insert(task.id.as_str(), order.len());
            order.push(task);
        }
        Self { order, index }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn task(&self, id: &str) -> Option<&'a Task> {
        self.index.get(id).map(|&idx| self.order[idx])
    }

    /// Dependency ids as declared, dangling ones included.
    pub fn dependencies(&self, id: &str) -> &'a [String] {
        self.task(id)
            .map(|task| task.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Dependency ids that name a task in the list.
    pub fn resolvable(&self, id: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.dependencies(id)
            .iter()
            .map(String::as_str)
            .filter(|dep| self.contains(dep))
    }

    /// Distinct tasks in list order.
    pub fn tasks(&self) -> &[&'a Task] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
