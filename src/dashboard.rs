use serde::Serialize;

use crate::model::{CheckPhase, CheckStatus, Kpi, Performance, Staff, Task, TaskId, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffBoardRow {
    pub id: String,
    pub name: String,
    pub position: String,
    /// Assigned tasks that exist, in task-list order.
    pub tasks: Vec<TaskId>,
    pub completed: usize,
    pub performance: Performance,
}

pub fn staff_board(staff: &[Staff], tasks: &[Task]) -> Vec<StaffBoardRow> {
    staff
        .iter()
        .map(|member| {
            let assigned: Vec<&Task> = tasks.iter().filter(|t| member.is_assigned(&t.id)).collect();
            StaffBoardRow {
                id: member.id.clone(),
                name: member.name.clone(),
                position: member.position.clone(),
                tasks: assigned.iter().map(|t| t.id.clone()).collect(),
                completed: assigned
                    .iter()
                    .filter(|t| t.status == TaskStatus::Completed)
                    .count(),
                performance: member.performance,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTotals {
    pub reception: u32,
    pub test_drive: u32,
    pub deal: u32,
    pub delivery: u32,
    /// Deals per reception, 0 with no receptions.
    pub conversion_rate: f64,
}

pub fn performance_totals(staff: &[Staff]) -> PerformanceTotals {
    let mut totals = PerformanceTotals::default();
    for member in staff {
        let perf = member.performance;
        totals.reception = totals.reception.saturating_add(perf.reception);
        totals.test_drive = totals.test_drive.saturating_add(perf.test_drive);
        totals.deal = totals.deal.saturating_add(perf.deal);
        totals.delivery = totals.delivery.saturating_add(perf.delivery);
    }
    if totals.reception > 0 {
        totals.conversion_rate = totals.deal as f64 / totals.reception as f64;
    }
    totals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiBand {
    OnTrack,
    AtRisk,
    Behind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiProgress {
    pub id: String,
    pub name: String,
    pub percent: u32,
    pub band: KpiBand,
}

impl KpiProgress {
    pub fn from_kpi(kpi: &Kpi) -> Self {
        let ratio = if kpi.target > 0.0 {
            (kpi.current / kpi.target).max(0.0)
        } else {
            0.0
        };
        let percent = (ratio * 100.0).round() as u32;
        let band = if ratio >= 1.0 {
            KpiBand::OnTrack
        } else if ratio >= 0.7 {
            KpiBand::AtRisk
        } else {
            KpiBand::Behind
        };
        Self {
            id: kpi.id.clone(),
            name: kpi.name.clone(),
            percent,
            band,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub pending: usize,
    pub passed: usize,
    pub failed: usize,
    pub pre: usize,
    pub during: usize,
    pub post: usize,
}

impl QualitySummary {
    pub fn from_task(task: &Task) -> Self {
        let mut summary = Self::default();
        for check in &task.quality_checks {
            match check.status {
                CheckStatus::Pending => summary.pending += 1,
                CheckStatus::Passed => summary.passed += 1,
                CheckStatus::Failed => summary.failed += 1,
            }
            match check.check_type {
                CheckPhase::Pre => summary.pre += 1,
                CheckPhase::During => summary.during += 1,
                CheckPhase::Post => summary.post += 1,
            }
        }
        summary
    }

    pub fn all_passed(&self) -> bool {
        self.pending == 0 && self.failed == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskScorecard {
    pub id: TaskId,
    pub title: String,
    pub quality: QualitySummary,
    pub kpis: Vec<KpiProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub status: StatusCounts,
    pub staff: Vec<StaffBoardRow>,
    pub performance: PerformanceTotals,
    pub scorecards: Vec<TaskScorecard>,
}

pub fn summarize(tasks: &[Task], staff: &[Staff]) -> DashboardSummary {
    let scorecards = tasks
        .iter()
        .filter(|t| !t.quality_checks.is_empty() || !t.kpis.is_empty())
        .map(|t| TaskScorecard {
            id: t.id.clone(),
            title: t.title.clone(),
            quality: QualitySummary::from_task(t),
            kpis: t.kpis.iter().map(KpiProgress::from_kpi).collect(),
        })
        .collect();
    DashboardSummary {
        status: StatusCounts::from_tasks(tasks),
        staff: staff_board(staff, tasks),
        performance: performance_totals(staff),
        scorecards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KpiCategory, QualityCheck};

    fn kpi(current: f64, target: f64) -> Kpi {
        Kpi {
            id: "k".into(),
            name: "k".into(),
            target,
            current,
            unit: "%".into(),
            category: KpiCategory::Quality,
        }
    }

    #[test]
    fn kpi_bands() {
        assert_eq!(KpiProgress::from_kpi(&kpi(100.0, 100.0)).band, KpiBand::OnTrack);
        let at_risk = KpiProgress::from_kpi(&kpi(95.0, 100.0));
        assert_eq!((at_risk.percent, at_risk.band), (95, KpiBand::AtRisk));
        assert_eq!(KpiProgress::from_kpi(&kpi(69.0, 100.0)).band, KpiBand::Behind);
        let zero_target = KpiProgress::from_kpi(&kpi(5.0, 0.0));
        assert_eq!((zero_target.percent, zero_target.band), (0, KpiBand::Behind));
    }

    #[test]
    fn staff_board_lists_existing_tasks_only() {
        let mut done = Task::new("2", "done");
        done.status = TaskStatus::Completed;
        let tasks = vec![Task::new("1", "open"), done];
        let mut s1 = Staff::new("s1", "Zhang").with_tasks(["2", "zzz", "1"]);
        s1.performance = Performance { reception: 15, test_drive: 8, deal: 3, delivery: 2 };
        let mut s2 = Staff::new("s2", "Li");
        s2.performance = Performance { reception: 5, test_drive: 6, deal: 2, delivery: 2 };

        let rows = staff_board(&[s1.clone(), s2.clone()], &tasks);
        assert_eq!(rows[0].tasks, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(rows[0].completed, 1);
        assert!(rows[1].tasks.is_empty());

        let totals = performance_totals(&[s1, s2]);
        assert_eq!((totals.reception, totals.deal), (20, 5));
        assert!((totals.conversion_rate - 0.25).abs() < 1e-9);
        assert_eq!(performance_totals(&[]).conversion_rate, 0.0);
    }

    #[test]
    fn performance_totals_saturate() {
        let mut busy = Staff::new("s1", "Zhang");
        busy.performance = Performance { reception: u32::MAX, test_drive: 1, deal: u32::MAX, delivery: 0 };
        let mut other = Staff::new("s2", "Li");
        other.performance = Performance { reception: 10, test_drive: 2, deal: 3, delivery: 1 };

        let totals = performance_totals(&[busy, other]);
        assert_eq!(totals.reception, u32::MAX);
        assert_eq!(totals.deal, u32::MAX);
        assert_eq!(totals.test_drive, 3);
        assert!((totals.conversion_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn quality_summary_counts_status_and_phase() {
        let check = |status, check_type| QualityCheck {
            id: "q".into(),
            title: "q".into(),
            description: String::new(),
            status,
            check_type,
            reviewer: None,
            comments: None,
            timestamp: None,
        };
        let mut task = Task::new("1", "meeting");
        task.quality_checks = vec![
            check(CheckStatus::Passed, CheckPhase::Pre),
            check(CheckStatus::Pending, CheckPhase::Post),
            check(CheckStatus::Failed, CheckPhase::Post),
        ];
        let summary = QualitySummary::from_task(&task);
        assert_eq!((summary.passed, summary.pending, summary.failed), (1, 1, 1));
        assert_eq!((summary.pre, summary.during, summary.post), (1, 0, 2));
        assert!(!summary.all_passed());

        let report = summarize(&[task, Task::new("plain", "plain")], &[]);
        assert_eq!(report.scorecards.len(), 1);
        assert_eq!(report.status.total(), 2);
    }
}
