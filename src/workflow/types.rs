use crate::model::{Task, TaskId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    #[serde(flatten)]
    pub task: Task,
    pub dependents: Vec<TaskId>,
    pub level: usize,
    pub position: usize,
}

impl TaskNode {
    pub fn id(&self) -> &str {
        &self.task.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub node: TaskNode,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NodeLayout {
    pub fn id(&self) -> &str {
        self.node.id()
    }

    /// Where outgoing connectors leave the node.
    pub fn output_anchor(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    /// Where incoming connectors enter the node.
    pub fn input_anchor(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }
}

/// Cubic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicPath {
    pub fn points(&self) -> [Point; 4] {
        [self.start, self.control1, self.control2, self.end]
    }

    pub fn svg_data(&self) -> String {
        format!(
            "M {:.2} {:.2} C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }

    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let [p0, p1, p2, p3] = self.points();
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
            b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeLayout {
    /// The dependency (parent) task.
    pub from: TaskId,
    /// The dependent (child) task.
    pub to: TaskId,
    pub path: CubicPath,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowLayout {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub width: f32,
    pub height: f32,
    pub cycles: Vec<Vec<TaskId>>,
}

impl WorkflowLayout {
    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn max_level(&self) -> Option<usize> {
        self.nodes.iter().map(|n| n.node.level).max()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
