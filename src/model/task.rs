use chrono::{Days, NaiveDate};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, RoadmapError};

/// Default bar colour for new tasks.
pub const DEFAULT_TASK_COLOR: Color32 = Color32::from_rgb(0x4A, 0x90, 0xE2);

/// A single roadmap task.
///
/// Records are treated as immutable values: edits and drags build a new
/// record which the owning [`Roadmap`](super::Roadmap) swaps in whole.
/// Deserialized records pass the same range checks as [`Task::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTask")]
pub struct Task {
    /// Opaque identifier, unique within a roadmap.
    pub id: String,
    pub name: String,
    /// First day of the task (inclusive).
    #[serde(rename = "startDate")]
    pub start: NaiveDate,
    /// Last day of the task (inclusive).
    #[serde(rename = "endDate")]
    pub end: NaiveDate,
    /// Days of slack drawn before `start`.
    pub buffer_before: u32,
    /// Days of slack drawn after `end`.
    pub buffer_after: u32,
    #[serde(with = "hex_color")]
    pub color: Color32,
}

impl Task {
    /// Create a task with no buffers and the default colour.
    ///
    /// Fails with [`RoadmapError::InvertedRange`] when `end < start`.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        check_range(start, end)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            start,
            end,
            buffer_before: 0,
            buffer_after: 0,
            color: DEFAULT_TASK_COLOR,
        })
    }

    pub fn with_buffers(mut self, before: u32, after: u32) -> Self {
        self.buffer_before = before;
        self.buffer_after = after;
        self
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    /// First day of the effective span (start minus the leading buffer).
    ///
    /// Saturates at [`NaiveDate::MIN`].
    pub fn effective_start(&self) -> NaiveDate {
        self.start
            .checked_sub_days(Days::new(u64::from(self.buffer_before)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the effective span (end plus the trailing buffer).
    ///
    /// Saturates at [`NaiveDate::MAX`].
    pub fn effective_end(&self) -> NaiveDate {
        self.end
            .checked_add_days(Days::new(u64::from(self.buffer_after)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whole days from `start` to `end`.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(RoadmapError::InvertedRange { start, end });
    }
    Ok(())
}

/// On-disk shape of a task, validated before it becomes a [`Task`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: String,
    name: String,
    #[serde(rename = "startDate")]
    start: NaiveDate,
    #[serde(rename = "endDate")]
    end: NaiveDate,
    #[serde(default)]
    buffer_before: u32,
    #[serde(default)]
    buffer_after: u32,
    #[serde(with = "hex_color")]
    color: Color32,
}

impl TryFrom<RawTask> for Task {
    type Error = RoadmapError;

    fn try_from(raw: RawTask) -> Result<Self> {
        check_range(raw.start, raw.end)?;
        let before = Days::new(u64::from(raw.buffer_before));
        let after = Days::new(u64::from(raw.buffer_after));
        if raw.start.checked_sub_days(before).is_none() || raw.end.checked_add_days(after).is_none()
        {
            return Err(RoadmapError::BufferOutOfRange {
                buffer_before: raw.buffer_before,
                buffer_after: raw.buffer_after,
            });
        }
        Ok(Self {
            id: raw.id,
            name: raw.name,
            start: raw.start,
            end: raw.end,
            buffer_before: raw.buffer_before,
            buffer_after: raw.buffer_after,
            color: raw.color,
        })
    }
}

/// Parse an ISO `YYYY-MM-DD` date, as produced by the forms and the store.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| RoadmapError::InvalidDate {
        input: input.to_string(),
    })
}

/// Serde helper storing `Color32` as `#RRGGBB` / `#RRGGBBAA`.
pub mod hex_color {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }

    pub fn to_hex(color: Color32) -> String {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }

    pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| format!("invalid hex color '{}'", s))
        };
        match hex.len() {
            6 => Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color32::from_rgba_unmultiplied(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => Err(format!(
                "invalid hex color '{}': expected 6 or 8 hex digits",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn effective_span_includes_buffers() {
        let task = Task::new("Plan", date(2024, 1, 10), date(2024, 1, 31))
            .unwrap()
            .with_buffers(2, 3);
        assert_eq!(task.effective_start(), date(2024, 1, 8));
        assert_eq!(task.effective_end(), date(2024, 2, 3));
        assert_eq!(task.duration_days(), 21);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Task::new("Bad", date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, RoadmapError::InvertedRange { .. }));
    }

    #[test]
    fn zero_length_range_is_accepted() {
        let task = Task::new("Launch", date(2024, 3, 1), date(2024, 3, 1)).unwrap();
        assert_eq!(task.duration_days(), 0);
    }

    #[test]
    fn parse_date_reports_invalid_input() {
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        let err = parse_date("2024-02-30").unwrap_err();
        assert!(matches!(err, RoadmapError::InvalidDate { ref input } if input == "2024-02-30"));
        assert!(parse_date("10/01/2024").is_err());
    }

    #[test]
    fn serializes_with_iso_dates_and_hex_color() {
        let task = Task::new("Design", date(2024, 3, 20), date(2024, 4, 30))
            .unwrap()
            .with_buffers(2, 4)
            .with_color(Color32::from_rgb(0xFF, 0x7F, 0x50));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["startDate"], "2024-03-20");
        assert_eq!(json["endDate"], "2024-04-30");
        assert_eq!(json["bufferBefore"], 2);
        assert_eq!(json["color"], "#FF7F50");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn deserializing_rejects_inverted_range() {
        let json = r##"{"id":"a","name":"Bad","startDate":"2024-02-01",
            "endDate":"2024-01-01","bufferBefore":0,"bufferAfter":0,"color":"#4A90E2"}"##;
        let err = serde_json::from_str::<Task>(json).unwrap_err();
        assert!(err.to_string().contains("before start"));
    }

    #[test]
    fn deserializing_rejects_buffers_past_the_calendar() {
        let json = r##"{"id":"a","name":"Far","startDate":"2024-02-01",
            "endDate":"2024-03-01","bufferBefore":4000000000,"bufferAfter":0,"color":"#4A90E2"}"##;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn effective_span_saturates_at_calendar_limits() {
        let task = Task::new("Edge", date(2024, 1, 1), date(2024, 1, 2))
            .unwrap()
            .with_buffers(u32::MAX, u32::MAX);
        assert_eq!(task.effective_start(), NaiveDate::MIN);
        assert_eq!(task.effective_end(), NaiveDate::MAX);
    }

    #[test]
    fn hex_color_rejects_garbage() {
        assert!(hex_color::parse_hex_color("#12345").is_err());
        assert!(hex_color::parse_hex_color("#GG0000").is_err());
        assert_eq!(
            hex_color::parse_hex_color("4a90e2").unwrap(),
            DEFAULT_TASK_COLOR
        );
    }
}
