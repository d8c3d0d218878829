use chrono::{DateTime, NaiveDate, Utc};
use egui::Color32;

use super::task::Task;

/// The ordered task collection shown on the timeline.
#[derive(Debug, Clone)]
pub struct Roadmap {
    pub tasks: Vec<Task>,
    pub modified: DateTime<Utc>,
}

impl Default for Roadmap {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            modified: Utc::now(),
        }
    }
}

impl Roadmap {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.touch();
    }

    /// Swap in a new version of an existing record, matched by id.
    ///
    /// Returns `false` when no record carries that id.
    pub fn replace_task(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove a record, returning it if it existed.
    pub fn remove_task(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        self.touch();
        Some(self.tasks.remove(idx))
    }

    /// Demonstration roadmap used on first launch.
    pub fn sample() -> Self {
        let rows: [(&str, (i32, u32, u32), (i32, u32, u32), u32, u32, [u8; 3]); 10] = [
            ("Project planning", (2024, 1, 10), (2024, 1, 31), 2, 3, [0x4A, 0x90, 0xE2]),
            ("Requirements & interviews", (2024, 2, 5), (2024, 3, 15), 2, 3, [0x50, 0xC8, 0x78]),
            ("High-level design", (2024, 3, 20), (2024, 4, 30), 2, 4, [0xFF, 0x7F, 0x50]),
            ("Detailed design", (2024, 5, 7), (2024, 6, 30), 3, 5, [0x93, 0x70, 0xDB]),
            ("Frontend development", (2024, 7, 8), (2024, 9, 30), 3, 5, [0xFF, 0x6B, 0x6B]),
            ("Backend development", (2024, 7, 8), (2024, 9, 30), 3, 5, [0xFF, 0xB3, 0x66]),
            ("Unit testing", (2024, 10, 7), (2024, 11, 15), 2, 3, [0x4E, 0xCD, 0xC4]),
            ("Integration testing", (2024, 11, 20), (2024, 12, 20), 2, 3, [0x45, 0xB7, 0xD1]),
            ("User acceptance testing", (2024, 12, 25), (2025, 1, 31), 2, 4, [0x96, 0xC9, 0x3D]),
            ("Production readiness & release", (2025, 2, 5), (2025, 2, 28), 3, 5, [0x5D, 0x5D, 0x5D]),
        ];

        let tasks = rows
            .iter()
            .filter_map(|&(name, s, e, before, after, [r, g, b])| {
                let start = NaiveDate::from_ymd_opt(s.0, s.1, s.2)?;
                let end = NaiveDate::from_ymd_opt(e.0, e.1, e.2)?;
                let task = Task::new(name, start, end).ok()?;
                Some(
                    task.with_buffers(before, after)
                        .with_color(Color32::from_rgb(r, g, b)),
                )
            })
            .collect();

        Self::from_tasks(tasks)
    }
}
