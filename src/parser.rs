use crate::error::Result;
use crate::model::Snapshot;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Json5,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_json5 = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json5"))
            .unwrap_or(false);
        if is_json5 { Self::Json5 } else { Self::Json }
    }
}

pub fn parse_snapshot(input: &str, format: SnapshotFormat) -> Result<Snapshot> {
    let snapshot: Snapshot = match format {
        SnapshotFormat::Json => serde_json::from_str(input)?,
        SnapshotFormat::Json5 => json5::from_str(input)?,
    };
    tracing::debug!(
        version = snapshot.version,
        tasks = snapshot.tasks.len(),
        staff = snapshot.staff.len(),
        "parsed snapshot"
    );
    Ok(snapshot)
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let contents = std::fs::read_to_string(path)?;
    parse_snapshot(&contents, SnapshotFormat::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;

    #[test]
    fn json5_allows_comments_and_trailing_commas() {
        let input = r#"{
            // seeded from the task store
            tasks: [
                {id: "1", title: "Meeting", startTime: "09:00", endTime: "09:30",
                 priority: "high", status: "pending",},
            ],
            staff: [],
        }"#;
        let snapshot = parse_snapshot(input, SnapshotFormat::Json5).unwrap();
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.version, 0);
    }

    #[test]
    fn strict_json_rejects_json5_syntax() {
        let err = parse_snapshot("{tasks: []}", SnapshotFormat::Json).unwrap_err();
        assert!(matches!(err, BoardError::Json(_)));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.JSON5")), SnapshotFormat::Json5);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(Path::new("board")), SnapshotFormat::Json);
    }
}
