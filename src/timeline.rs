use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{BoardError, Result};
use crate::model::{Task, TaskId};

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || BoardError::InvalidTime {
            value: value.to_string(),
        };
        let caps = TIME_RE.captures(value.trim()).ok_or_else(invalid)?;
        let hour = caps[1].parse().map_err(|_| invalid())?;
        let minute = caps[2].parse().map_err(|_| invalid())?;
        Ok(Self { hour, minute })
    }

    pub fn minutes(self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

pub fn time_window(task: &Task) -> Result<(TimeOfDay, TimeOfDay)> {
    Ok((
        TimeOfDay::parse(&task.start_time)?,
        TimeOfDay::parse(&task.end_time)?,
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourSlot {
    pub hour: u8,
    pub label: String,
    pub tasks: Vec<TaskId>,
}

/// Twenty-four hourly slots. A task fills hour `h` when its start hour is at
/// most `h` and its end hour is past `h`; minutes are not considered.
pub fn hourly_timeline(tasks: &[Task]) -> Vec<HourSlot> {
    let mut slots: Vec<HourSlot> = (0..24u8)
        .map(|hour| HourSlot {
            hour,
            label: format!("{hour:02}:00"),
            tasks: Vec::new(),
        })
        .collect();

    for task in tasks {
        let (start, end) = match time_window(task) {
            Ok(window) => window,
            Err(err) => {
                tracing::warn!(task = %task.id, %err, "skipping task in timeline");
                continue;
            }
        };
        for slot in &mut slots[start.hour as usize..end.hour.max(start.hour) as usize] {
            slot.tasks.push(task.id.clone());
        }
    }
    slots
}
