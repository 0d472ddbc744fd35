use serde::Deserialize;
use showroom_board::layout_dump::LayoutDump;
use showroom_board::{
    LayoutConfig, RenderOptions, SnapshotFormat, compute_workflow, parse_snapshot, render_with_options,
};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    level_width: Option<f32>,
    node_height: Option<f32>,
    vertical_spacing: Option<f32>,
}

fn build_render_options(options: BoardRenderOptions) -> RenderOptions {
    let mut render_options = match options.theme.as_deref() {
        Some("mono") | Some("print") => RenderOptions::mono(),
        _ => RenderOptions::dashboard(),
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(level_width) = options.level_width {
        render_options.layout.level_width = level_width;
    }
    if let Some(node_height) = options.node_height {
        render_options.layout.node_height = node_height;
    }
    if let Some(vertical_spacing) = options.vertical_spacing {
        render_options.layout.vertical_spacing = vertical_spacing;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_workflow_svg(snapshot_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<BoardRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        BoardRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(snapshot_json, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn workflow_layout_json(snapshot_json: &str) -> Result<String, JsValue> {
    layout_json(snapshot_json).map_err(|error| JsValue::from_str(&error))
}

fn layout_json(snapshot_json: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json, SnapshotFormat::Json).map_err(|error| error.to_string())?;
    let layout = compute_workflow(&snapshot.tasks, &LayoutConfig::default());
    LayoutDump::from_layout(&layout)
        .to_json()
        .map_err(|error| error.to_string())
}
