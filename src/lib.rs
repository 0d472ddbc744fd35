pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod details;
pub mod error;
pub mod layout_dump;
#[cfg(feature = "cli")]
pub mod logging;
pub mod model;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;
pub mod timeline;
pub mod workflow;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig};
pub use details::{Selection, TaskDetails, details_for};
pub use error::{BoardError, Result};
pub use model::{Priority, Snapshot, Staff, Task, TaskStatus};
pub use parser::{SnapshotFormat, parse_snapshot};
pub use render::render_svg;
pub use theme::Theme;
pub use workflow::{WorkflowLayout, compute_workflow};

/// Theme plus layout constants for a one-shot render.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn dashboard() -> Self {
        Self {
            theme: Theme::dashboard(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn mono() -> Self {
        Self {
            theme: Theme::mono(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Parse a JSON snapshot, derive its workflow and render it to SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> Result<String> {
    let snapshot = parse_snapshot(input, SnapshotFormat::Json)?;
    let layout = compute_workflow(&snapshot.tasks, &options.layout);
    Ok(render_svg(&layout, &options.theme, &options.layout))
}
