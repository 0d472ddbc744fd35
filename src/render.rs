use crate::config::{LayoutConfig, RenderConfig};
use crate::text_metrics::wrap_text;
use crate::theme::Theme;
use crate::workflow::{NodeLayout, WorkflowLayout};
use anyhow::Result;
use std::path::Path;

const NODE_PADDING: f32 = 12.0;
const MIN_CANVAS: f32 = 200.0;

pub fn render_svg(layout: &WorkflowLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(MIN_CANVAS);
    let height = layout.height.max(MIN_CANVAS);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for edge in &layout.edges {
        svg.push_str(&format!(
            "<path class=\"edge\" data-from=\"{}\" data-to=\"{}\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>",
            escape_xml(&edge.from),
            escape_xml(&edge.to),
            edge.path.svg_data(),
            theme.line_color
        ));
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"3\" fill=\"{}\"/>",
            edge.path.end.x, edge.path.end.y, theme.line_color
        ));
    }

    for node in &layout.nodes {
        svg.push_str(&node_svg(node, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn node_svg(node: &NodeLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let task = &node.node.task;
    let palette = theme.palette(task.priority);
    let mut out = String::new();

    out.push_str(&format!(
        "<g class=\"task\" data-id=\"{}\" data-level=\"{}\" data-position=\"{}\">",
        escape_xml(&task.id),
        node.node.level,
        node.node.position
    ));
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"8\" ry=\"8\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
        node.x, node.y, node.width, node.height, palette.fill, palette.border
    ));

    let text_x = node.x + NODE_PADDING;
    let text_width = (node.width - NODE_PADDING * 2.0 - 10.0).max(1.0);
    let title_y = node.y + NODE_PADDING + theme.title_font_size;
    let title = wrap_text(&task.title, text_width, 1, theme.title_font_size, &theme.font_family);
    out.push_str(&text_svg(
        text_x,
        title_y,
        &title,
        theme.title_font_size,
        &theme.title_color,
        theme,
        config,
    ));

    out.push_str(&format!(
        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{}\"><title>{}</title></circle>",
        node.x + node.width - NODE_PADDING,
        node.y + NODE_PADDING + 4.0,
        theme.status_color(task.status),
        task.status.as_str()
    ));

    if !task.description.is_empty() {
        let lines = wrap_text(
            &task.description,
            text_width,
            config.description_lines,
            theme.font_size,
            &theme.font_family,
        );
        let desc_y = title_y + theme.font_size * config.label_line_height;
        out.push_str(&text_svg(text_x, desc_y, &lines, theme.font_size, &theme.text_color, theme, config));
    }

    let footer_y = node.y + node.height - NODE_PADDING;
    out.push_str(&format!(
        "<text x=\"{text_x:.2}\" y=\"{footer_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        theme.font_family,
        theme.font_size,
        theme.muted_text_color,
        escape_xml(&task.start_time)
    ));
    if !task.dependencies.is_empty() {
        let badge_x = node.x + node.width - NODE_PADDING;
        out.push_str(&format!(
            "<text class=\"deps\" x=\"{badge_x:.2}\" y=\"{footer_y:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">⚠ {}</text>",
            theme.font_family,
            theme.font_size,
            theme.muted_text_color,
            task.dependencies.len()
        ));
    }

    out.push_str("</g>");
    out
}

fn text_svg(
    x: f32,
    y: f32,
    lines: &[String],
    font_size: f32,
    fill: &str,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut text = format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{font_size}\" fill=\"{fill}\">",
        theme.font_family
    );
    for (idx, line) in lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { font_size * config.label_line_height };
        text.push_str(&format!("<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>", escape_xml(line)));
    }
    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|f| f.trim().trim_matches('"').trim_matches('\'').to_string())
        .unwrap_or_else(|| "Inter".to_string());
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size {}x{}", render_cfg.width, render_cfg.height))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some(color) = parse_hex_color(&render_cfg.background) {
        pixmap.fill(color);
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn parse_hex_color(value: &str) -> Option<resvg::tiny_skia::Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(resvg::tiny_skia::Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255))
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
