use crate::workflow::WorkflowLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub levels: usize,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub cycles: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub title: String,
    pub priority: String,
    pub status: String,
    pub level: usize,
    pub position: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub dependencies: Vec<String>,
    pub dependents: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub path: String,
    pub points: Vec<[f32; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &WorkflowLayout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|placed| NodeDump {
                id: placed.node.task.id.clone(),
                title: placed.node.task.title.clone(),
                priority: placed.node.task.priority.as_str().to_string(),
                status: placed.node.task.status.as_str().to_string(),
                level: placed.node.level,
                position: placed.node.position,
                x: placed.x,
                y: placed.y,
                width: placed.width,
                height: placed.height,
                dependencies: placed.node.task.dependencies.clone(),
                dependents: placed.node.dependents.clone(),
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                path: edge.path.svg_data(),
                points: edge.path.points().iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            levels: layout.max_level().map(|l| l + 1).unwrap_or(0),
            nodes,
            edges,
            cycles: layout.cycles.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(path: &Path, layout: &WorkflowLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
