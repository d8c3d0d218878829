use chrono::{Datelike, Duration, NaiveDate};

use super::timeline::days_between;
use super::zoom::Granularity;

/// Visual weight of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    Major,
    Minor,
}

/// A vertical marker on the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLine {
    /// Whole days from the viewport start; multiply by the scale for pixels.
    pub position: i64,
    /// Header text, empty for unlabelled lines.
    pub label: String,
    pub kind: GridKind,
}

/// Generate the grid lines for `[start, end]` at the given granularity.
///
/// Month and quarter grids iterate from the first of `start`'s month so that
/// boundaries line up, which can produce lines with negative positions.
/// Returns an empty list when `start > end`.
pub fn grid_lines(start: NaiveDate, end: NaiveDate, granularity: Granularity) -> Vec<GridLine> {
    let mut lines = Vec::new();
    if start > end {
        return lines;
    }

    let mut date = match granularity {
        Granularity::Day => start,
        Granularity::Month | Granularity::Quarter => start.with_day(1).unwrap_or(start),
    };

    while date <= end {
        let position = days_between(start, date);
        if let Some((label, kind)) = classify(date, granularity) {
            lines.push(GridLine {
                position,
                label,
                kind,
            });
        }
        date += Duration::days(1);
    }

    lines
}

fn classify(date: NaiveDate, granularity: Granularity) -> Option<(String, GridKind)> {
    match granularity {
        Granularity::Day => {
            let kind = if date.day() == 1 {
                GridKind::Major
            } else {
                GridKind::Minor
            };
            Some((day_label(date), kind))
        }
        Granularity::Month => match date.day() {
            1 => Some((month_label(date), GridKind::Major)),
            15 => Some((String::new(), GridKind::Minor)),
            _ => None,
        },
        Granularity::Quarter => match (date.day(), date.month()) {
            (1, 1 | 4 | 7 | 10) => Some((quarter_label(date), GridKind::Major)),
            (1, 2 | 5 | 8 | 11) => Some((String::new(), GridKind::Minor)),
            _ => None,
        },
    }
}

fn day_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

fn quarter_label(date: NaiveDate) -> String {
    format!("{} Q{}", date.year(), date.month0() / 3 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_grid_labels_every_day() {
        let lines = grid_lines(date(2024, 1, 30), date(2024, 2, 2), Granularity::Day);
        let labels: Vec<_> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["1/30", "1/31", "2/1", "2/2"]);
        assert_eq!(lines[2].kind, GridKind::Major);
        assert_eq!(lines[0].kind, GridKind::Minor);
        assert_eq!(lines[3].position, 3);
    }

    #[test]
    fn month_grid_snaps_to_first_of_month() {
        let lines = grid_lines(date(2024, 1, 10), date(2024, 3, 1), Granularity::Month);
        assert_eq!(
            lines,
            vec![
                GridLine { position: -9, label: "Jan 2024".into(), kind: GridKind::Major },
                GridLine { position: 5, label: String::new(), kind: GridKind::Minor },
                GridLine { position: 22, label: "Feb 2024".into(), kind: GridKind::Major },
                GridLine { position: 36, label: String::new(), kind: GridKind::Minor },
                GridLine { position: 51, label: "Mar 2024".into(), kind: GridKind::Major },
            ]
        );
    }

    #[test]
    fn quarter_grid_marks_quarters_and_second_months() {
        let lines = grid_lines(date(2024, 1, 1), date(2024, 12, 31), Granularity::Quarter);
        let summary: Vec<_> = lines
            .iter()
            .map(|l| (l.label.as_str(), l.kind))
            .collect();
        assert_eq!(
            summary,
            [
                ("2024 Q1", GridKind::Major),
                ("", GridKind::Minor),
                ("2024 Q2", GridKind::Major),
                ("", GridKind::Minor),
                ("2024 Q3", GridKind::Major),
                ("", GridKind::Minor),
                ("2024 Q4", GridKind::Major),
                ("", GridKind::Minor),
            ]
        );
        assert_eq!(lines[1].position, 31);
    }

    #[test]
    fn quarter_grid_mid_quarter_start_has_no_leading_major() {
        let lines = grid_lines(date(2024, 5, 20), date(2024, 7, 2), Granularity::Quarter);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].kind, GridKind::Minor);
        assert_eq!(lines[0].position, -19);
        assert_eq!(lines[1].label, "2024 Q3");
    }

    #[test]
    fn inverted_range_yields_nothing() {
        for g in [Granularity::Day, Granularity::Month, Granularity::Quarter] {
            assert!(grid_lines(date(2024, 2, 1), date(2024, 1, 1), g).is_empty());
        }
    }

    #[test]
    fn single_day_range() {
        let lines = grid_lines(date(2024, 6, 1), date(2024, 6, 1), Granularity::Day);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, GridKind::Major);
    }

    proptest! {
        #[test]
        fn positions_are_non_decreasing(
            offset in 0i64..2000,
            len in 0i64..800,
            g in prop_oneof![
                Just(Granularity::Day),
                Just(Granularity::Month),
                Just(Granularity::Quarter),
            ],
        ) {
            let start = date(2020, 1, 1) + Duration::days(offset);
            let lines = grid_lines(start, start + Duration::days(len), g);
            prop_assert!(lines.windows(2).all(|w| w[0].position <= w[1].position));
        }

        #[test]
        fn day_majors_match_months_touched(offset in 0i64..2000, len in 0i64..800) {
            let start = date(2020, 1, 1) + Duration::days(offset);
            let end = start + Duration::days(len);
            let lines = grid_lines(start, end, Granularity::Day);
            let majors = lines.iter().filter(|l| l.kind == GridKind::Major).count();

            let mut months = BTreeSet::new();
            let mut d = start;
            while d <= end {
                months.insert((d.year(), d.month()));
                d += Duration::days(1);
            }
            // The first month only has a major line when the range starts on the 1st.
            let expected = months.len() - usize::from(start.day() != 1);
            prop_assert_eq!(majors, expected);
        }
    }
}
