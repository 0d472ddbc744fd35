use std::collections::HashMap;

use super::types::{CubicPath, EdgeLayout, NodeLayout, Point};

/// One connector per resolvable dependency, parent output anchor to child
/// input anchor. Connectors are not routed around other nodes.
pub fn compute_edges(nodes: &[NodeLayout]) -> Vec<EdgeLayout> {
    let mut by_id: HashMap<&str, &NodeLayout> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        by_id.entry(node.id()).or_insert(node);
    }

    let mut edges = Vec::new();
    for child in nodes {
        for dep in &child.node.task.dependencies {
            let Some(parent) = by_id.get(dep.as_str()) else {
                continue;
            };
            edges.push(EdgeLayout {
                from: parent.id().to_string(),
                to: child.id().to_string(),
                path: connector(parent.output_anchor(), child.input_anchor()),
            });
        }
    }
    edges
}

/// Horizontal S-curve: both control points sit on the vertical through the
/// midpoint, level with their own endpoint.
pub fn connector(start: Point, end: Point) -> CubicPath {
    let mid_x = (start.x + end.x) / 2.0;
    CubicPath {
        start,
        control1: Point::new(mid_x, start.y),
        control2: Point::new(mid_x, end.y),
        end,
    }
}
