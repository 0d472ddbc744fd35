use crate::config::LayoutConfig;
use crate::model::Snapshot;
use crate::workflow::{WorkflowLayout, compute_workflow};

/// Holds the last layout together with the snapshot version and config that
/// produced it.
#[derive(Debug, Default)]
pub struct WorkflowCache {
    entry: Option<(u64, LayoutConfig, WorkflowLayout)>,
    recomputes: usize,
}

impl WorkflowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout_for(&mut self, snapshot: &Snapshot, config: &LayoutConfig) -> &WorkflowLayout {
        let fresh = matches!(
            &self.entry,
            Some((version, cached, _)) if *version == snapshot.version && cached == config
        );
        if !fresh {
            self.entry = None;
        }
        let recomputes = &mut self.recomputes;
        let (_, _, layout) = self.entry.get_or_insert_with(|| {
            tracing::debug!(version = snapshot.version, "recomputing workflow layout");
            *recomputes += 1;
            (snapshot.version, *config, compute_workflow(&snapshot.tasks, config))
        });
        layout
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}
