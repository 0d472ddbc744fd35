use crate::config::LayoutConfig;

use super::types::{NodeLayout, TaskNode};

/// Assigns `position` as the index of each node among nodes sharing its
/// level, in input order.
pub fn pack_levels(mut nodes: Vec<TaskNode>) -> Vec<TaskNode> {
    let mut next_slot: Vec<usize> = Vec::new();
    for node in &mut nodes {
        if next_slot.len() <= node.level {
            next_slot.resize(node.level + 1, 0);
        }
        node.position = next_slot[node.level];
        next_slot[node.level] += 1;
    }
    nodes
}

/// Buckets of node indices per level, each bucket in input order.
pub fn level_buckets(nodes: &[TaskNode]) -> Vec<Vec<usize>> {
    let mut buckets: Vec<Vec<usize>> = Vec::new();
    for (idx, node) in nodes.iter().enumerate() {
        if buckets.len() <= node.level {
            buckets.resize_with(node.level + 1, Vec::new);
        }
        buckets[node.level].push(idx);
    }
    buckets
}

pub fn project(nodes: Vec<TaskNode>, config: &LayoutConfig) -> Vec<NodeLayout> {
    let width = config.node_width();
    nodes
        .into_iter()
        .map(|node| {
            let x = node.level as f32 * config.level_width + config.margin;
            let y = node.position as f32 * config.slot_height() + config.margin;
            NodeLayout {
                node,
                x,
                y,
                width,
                height: config.node_height,
            }
        })
        .collect()
}

/// Canvas size; an empty layout gets the size of a single slot.
pub fn canvas_size(nodes: &[NodeLayout], config: &LayoutConfig) -> (f32, f32) {
    let max_level = nodes.iter().map(|n| n.node.level).max().unwrap_or(0);
    let max_position = nodes.iter().map(|n| n.node.position).max().unwrap_or(0);
    let width = (max_level + 1) as f32 * config.level_width + config.margin;
    let height = (max_position + 1) as f32 * config.slot_height();
    (width, height)
}
