use serde::Serialize;

use crate::error::{BoardError, Result};
use crate::model::{Staff, Task, TaskId};
use crate::workflow::{TaskNode, WorkflowLayout};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    pub id: TaskId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRef {
    pub id: String,
    pub name: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    pub task: Task,
    pub level: usize,
    pub dependencies: Vec<TaskRef>,
    pub dependents: Vec<TaskRef>,
    pub assigned_staff: Vec<StaffRef>,
}

/// Staff whose assignment list names `task_id`. Empty when `task_id` is not
/// in `tasks`, whatever the assignment lists say.
pub fn assigned_staff<'a>(staff: &'a [Staff], tasks: &[Task], task_id: &str) -> Vec<&'a Staff> {
    if !tasks.iter().any(|task| task.id == task_id) {
        return Vec::new();
    }
    staff.iter().filter(|member| member.is_assigned(task_id)).collect()
}

fn titles(ids: &[TaskId], tasks: &[Task]) -> Vec<TaskRef> {
    ids.iter()
        .filter_map(|id| tasks.iter().find(|task| &task.id == id))
        .map(|task| TaskRef {
            id: task.id.clone(),
            title: task.title.clone(),
        })
        .collect()
}

pub fn task_details(node: &TaskNode, tasks: &[Task], staff: &[Staff]) -> TaskDetails {
    TaskDetails {
        task: node.task.clone(),
        level: node.level,
        dependencies: titles(&node.task.dependencies, tasks),
        dependents: titles(&node.dependents, tasks),
        assigned_staff: assigned_staff(staff, tasks, node.id())
            .into_iter()
            .map(|member| StaffRef {
                id: member.id.clone(),
                name: member.name.clone(),
                position: member.position.clone(),
            })
            .collect(),
    }
}

/// The workflow view's currently selected task, if any.
///
/// Only the id is held; it is looked up in whichever layout is current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<TaskId>,
}

impl Selection {
    pub fn select(&mut self, id: impl Into<TaskId>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn resolve<'a>(&self, layout: &'a WorkflowLayout) -> Option<&'a TaskNode> {
        let id = self.selected.as_deref()?;
        layout.node(id).map(|placed| &placed.node)
    }

    /// Drops the selection when its task is gone from `layout`.
    pub fn retain_in(&mut self, layout: &WorkflowLayout) {
        if self.resolve(layout).is_none() {
            self.selected = None;
        }
    }

    pub fn details(&self, layout: &WorkflowLayout, tasks: &[Task], staff: &[Staff]) -> Option<TaskDetails> {
        self.resolve(layout).map(|node| task_details(node, tasks, staff))
    }
}

pub fn details_for(layout: &WorkflowLayout, id: &str, tasks: &[Task], staff: &[Staff]) -> Result<TaskDetails> {
    let placed = layout
        .node(id)
        .ok_or_else(|| BoardError::UnknownTask(id.to_string()))?;
    Ok(task_details(&placed.node, tasks, staff))
}
