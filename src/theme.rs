use crate::model::{Priority, TaskStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePalette {
    pub fill: String,
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub title_font_size: f32,
    pub title_color: String,
    pub text_color: String,
    pub muted_text_color: String,
    pub line_color: String,
    pub background: String,
    pub high: NodePalette,
    pub medium: NodePalette,
    pub low: NodePalette,
    pub pending_color: String,
    pub in_progress_color: String,
    pub completed_color: String,
}

impl Theme {
    /// Tailwind-like palette used by the dashboard pages.
    pub fn dashboard() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            title_font_size: 14.0,
            title_color: "#111827".to_string(),
            text_color: "#4B5563".to_string(),
            muted_text_color: "#6B7280".to_string(),
            line_color: "#CBD5E1".to_string(),
            background: "#FFFFFF".to_string(),
            high: NodePalette {
                fill: "#FEF2F2".to_string(),
                border: "#FECACA".to_string(),
            },
            medium: NodePalette {
                fill: "#FEFCE8".to_string(),
                border: "#FEF08A".to_string(),
            },
            low: NodePalette {
                fill: "#F0FDF4".to_string(),
                border: "#BBF7D0".to_string(),
            },
            pending_color: "#4B5563".to_string(),
            in_progress_color: "#2563EB".to_string(),
            completed_color: "#16A34A".to_string(),
        }
    }

    /// Grayscale variant for printing.
    pub fn mono() -> Self {
        let gray = |fill: &str, border: &str| NodePalette {
            fill: fill.to_string(),
            border: border.to_string(),
        };
        Self {
            font_family: "'Trebuchet MS', Verdana, Arial, sans-serif".to_string(),
            font_size: 12.0,
            title_font_size: 14.0,
            title_color: "#000000".to_string(),
            text_color: "#333333".to_string(),
            muted_text_color: "#666666".to_string(),
            line_color: "#999999".to_string(),
            background: "#FFFFFF".to_string(),
            high: gray("#E5E5E5", "#333333"),
            medium: gray("#F0F0F0", "#666666"),
            low: gray("#FAFAFA", "#999999"),
            pending_color: "#666666".to_string(),
            in_progress_color: "#333333".to_string(),
            completed_color: "#000000".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dashboard" | "default" => Some(Self::dashboard()),
            "mono" | "print" => Some(Self::mono()),
            _ => None,
        }
    }

    pub fn palette(&self, priority: Priority) -> &NodePalette {
        match priority {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    pub fn status_color(&self, status: TaskStatus) -> &str {
        match status {
            TaskStatus::Pending => &self.pending_color,
            TaskStatus::InProgress => &self.in_progress_color,
            TaskStatus::Completed => &self.completed_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dashboard()
    }
}
