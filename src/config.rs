use crate::error::Result;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed pixel constants for the workflow canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between two consecutive levels.
    pub level_width: f32,
    pub node_height: f32,
    pub vertical_spacing: f32,
    pub margin: f32,
    /// Gap left between a node's right edge and the next level.
    pub column_gap: f32,
    pub description_lines: usize,
    pub label_line_height: f32,
}

impl LayoutConfig {
    pub fn node_width(&self) -> f32 {
        (self.level_width - self.column_gap).max(1.0)
    }

    pub fn slot_height(&self) -> f32 {
        self.node_height + self.vertical_spacing
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_width: 240.0,
            node_height: 100.0,
            vertical_spacing: 60.0,
            margin: 40.0,
            column_gap: 40.0,
            description_lines: 2,
            label_line_height: 1.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::dashboard();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    layout: Option<LayoutOverrides>,
    render: Option<RenderOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOverrides {
    level_width: Option<f32>,
    node_height: Option<f32>,
    vertical_spacing: Option<f32>,
    margin: Option<f32>,
    column_gap: Option<f32>,
    description_lines: Option<usize>,
    label_line_height: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOverrides {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(name) = parsed.theme.as_deref() {
        match Theme::from_name(name) {
            Some(theme) => {
                config.render.background = theme.background.clone();
                config.theme = theme;
            }
            None => tracing::warn!(theme = name, "unknown theme, keeping default"),
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.level_width {
            config.layout.level_width = v;
        }
        if let Some(v) = layout.node_height {
            config.layout.node_height = v;
        }
        if let Some(v) = layout.vertical_spacing {
            config.layout.vertical_spacing = v;
        }
        if let Some(v) = layout.margin {
            config.layout.margin = v;
        }
        if let Some(v) = layout.column_gap {
            config.layout.column_gap = v;
        }
        if let Some(v) = layout.description_lines {
            config.layout.description_lines = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_layout_overrides_keep_defaults() {
        let config = parse_config(r#"{"layout": {"levelWidth": 300, "margin": 10}}"#).unwrap();
        assert_eq!(config.layout.level_width, 300.0);
        assert_eq!(config.layout.margin, 10.0);
        assert_eq!(config.layout.node_height, 100.0);
        assert_eq!(config.layout.vertical_spacing, 60.0);
        assert_eq!(config.layout.node_width(), 260.0);
    }

    #[test]
    fn theme_name_switches_palette() {
        let config = parse_config(r#"{"theme": "mono", "render": {"width": 640}}"#).unwrap();
        assert_eq!(config.theme, Theme::mono());
        assert_eq!(config.render.width, 640.0);
        assert_eq!(config.render.height, 800.0);
    }

    #[test]
    fn missing_path_is_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
    }
}
