// Event/interval partitioning
//
// A `WindowPlan` splits the timeline into the named event windows and the
// gaps between chronologically adjacent events. Reports supply a tally per
// window; the plan turns tallies into summary rows and appends a single
// grouped row for all gaps.

use chrono::{DateTime, Utc};

use crate::entities::{EventRecord, WindowKind, WindowSummary};
use crate::errors::{require, ReportError};
use crate::utils::{inclusive_days, one_day, round2};

pub const GROUPED_INTERVALS_LABEL: &str = "Grouped intervals";

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub label: String,
    pub kind: WindowKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_days: i64,
}

impl Window {
    /// Inclusive on both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Values a window can sum. Integer sums fail instead of wrapping.
pub trait Amount: Copy + Default {
    fn checked_plus(self, other: Self) -> Option<Self>;
}

impl Amount for i64 {
    fn checked_plus(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }
}

impl Amount for f64 {
    fn checked_plus(self, other: Self) -> Option<Self> {
        Some(self + other)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally<S> {
    pub count: u64,
    pub sum: S,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowPlan {
    events: Vec<Window>,
    gaps: Vec<Window>,
}

impl WindowPlan {
    pub fn from_events(events: &[EventRecord]) -> Result<Self, ReportError> {
        let mut windows = Vec::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            let title = require(&event.title, "gameevents", "title", index)?;
            let start = *require(&event.start_date, "gameevents", "startDate", index)?;
            let end = *require(&event.end_date, "gameevents", "endDate", index)?;
            if end < start {
                return Err(ReportError::InvalidEventWindow {
                    title: title.clone(),
                });
            }
            windows.push(Window {
                label: title.clone(),
                kind: WindowKind::Event,
                start,
                end,
                duration_days: inclusive_days(start, end),
            });
        }
        windows.sort_by_key(|window| window.start);

        let mut gaps = Vec::new();
        for (index, pair) in windows.windows(2).enumerate() {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.start < previous.end {
                return Err(ReportError::OverlappingEvents {
                    previous: previous.label.clone(),
                    next: next.label.clone(),
                });
            }
            let start = previous.end + one_day();
            let end = next.start - one_day();
            let duration_days = inclusive_days(start, end);
            // No full day between the two events: nothing can fall inside.
            if duration_days <= 0 {
                continue;
            }
            gaps.push(Window {
                label: format!("Interval {}", index + 1),
                kind: WindowKind::Interval,
                start,
                end,
                duration_days,
            });
        }

        Ok(Self {
            events: windows,
            gaps,
        })
    }

    pub fn events(&self) -> &[Window] {
        &self.events
    }

    pub fn gaps(&self) -> &[Window] {
        &self.gaps
    }

    /// Events first, then gaps.
    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.events.iter().chain(self.gaps.iter())
    }

    /// Span and total day count of all gaps, if there are any.
    pub fn grouped_window(&self) -> Option<Window> {
        let first = self.gaps.first()?;
        let last = self.gaps.last()?;
        Some(Window {
            label: GROUPED_INTERVALS_LABEL.to_string(),
            kind: WindowKind::GroupedIntervals,
            start: first.start,
            end: last.end,
            duration_days: self.gaps.iter().map(|gap| gap.duration_days).sum(),
        })
    }

    /// `None` when a tally or the grouped sum overflows.
    pub fn summarize<S, F>(&self, mut tally: F) -> Option<Vec<WindowSummary<S>>>
    where
        S: Amount,
        F: FnMut(&Window) -> Option<Tally<S>>,
    {
        let mut rows = Vec::new();
        for window in self.windows() {
            rows.push(summary_row(window, tally(window)?));
        }

        if let Some(grouped) = self.grouped_window() {
            let mut total = Tally::<S>::default();
            for row in rows.iter().filter(|row| row.kind == WindowKind::Interval) {
                total.count += row.count;
                total.sum = total.sum.checked_plus(row.sum)?;
            }
            if total.count > 0 {
                rows.push(summary_row(&grouped, total));
            }
        }
        Some(rows)
    }
}

pub fn count_in(instants: &[DateTime<Utc>], window: &Window) -> u64 {
    instants
        .iter()
        .filter(|instant| window.contains(**instant))
        .count() as u64
}

pub fn sum_in<S: Amount>(points: &[(DateTime<Utc>, S)], window: &Window) -> Option<Tally<S>> {
    let mut tally = Tally::<S>::default();
    for (instant, value) in points {
        if window.contains(*instant) {
            tally.count += 1;
            tally.sum = tally.sum.checked_plus(*value)?;
        }
    }
    Some(tally)
}

fn summary_row<S>(window: &Window, tally: Tally<S>) -> WindowSummary<S> {
    let avg_per_day = if window.duration_days > 0 {
        round2(tally.count as f64 / window.duration_days as f64)
    } else {
        0.0
    };
    WindowSummary {
        label: window.label.clone(),
        kind: window.kind,
        start: window.start,
        end: window.end,
        duration_days: window.duration_days,
        count: tally.count,
        sum: tally.sum,
        avg_per_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap()
    }

    fn event(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> EventRecord {
        EventRecord {
            title: Some(title.to_string()),
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    #[test]
    fn gap_between_two_events_counts_records() {
        let events = vec![
            event("E1", at(1, 1, 0), at(1, 5, 0)),
            event("E2", at(1, 10, 0), at(1, 15, 0)),
        ];
        let plan = WindowPlan::from_events(&events).expect("plan");
        assert_eq!(plan.gaps().len(), 1);
        let gap = &plan.gaps()[0];
        assert_eq!(gap.start, at(1, 6, 0));
        assert_eq!(gap.end, at(1, 9, 0));
        assert_eq!(gap.duration_days, 4);

        let matches = vec![at(1, 7, 0)];
        let rows = plan
            .summarize(|window| {
                Some(Tally {
                    count: count_in(&matches, window),
                    sum: 0_i64,
                })
            })
            .expect("rows");
        let interval = rows
            .iter()
            .find(|row| row.kind == WindowKind::Interval)
            .expect("interval row");
        assert_eq!(interval.label, "Interval 1");
        assert_eq!(interval.count, 1);
        assert_eq!(interval.avg_per_day, 0.25);
    }

    #[test]
    fn grouped_row_sums_gaps_and_is_omitted_when_empty() {
        let events = vec![
            event("E1", at(1, 1, 0), at(1, 2, 0)),
            event("E2", at(1, 5, 0), at(1, 6, 0)),
            event("E3", at(1, 10, 0), at(1, 11, 0)),
        ];
        let plan = WindowPlan::from_events(&events).expect("plan");
        let matches = vec![at(1, 3, 12), at(1, 4, 0), at(1, 8, 0)];
        let rows = plan
            .summarize(|window| {
                Some(Tally {
                    count: count_in(&matches, window),
                    sum: 0_i64,
                })
            })
            .expect("rows");
        let gap_total: u64 = rows
            .iter()
            .filter(|row| row.kind == WindowKind::Interval)
            .map(|row| row.count)
            .sum();
        let grouped = rows.last().expect("grouped row");
        assert_eq!(grouped.kind, WindowKind::GroupedIntervals);
        assert_eq!(grouped.count, gap_total);
        assert_eq!(grouped.count, 3);
        assert_eq!(grouped.duration_days, 2 + 3);

        let empty: Vec<DateTime<Utc>> = Vec::new();
        let rows = plan
            .summarize(|window| {
                Some(Tally {
                    count: count_in(&empty, window),
                    sum: 0_i64,
                })
            })
            .expect("rows");
        assert!(rows
            .iter()
            .all(|row| row.kind != WindowKind::GroupedIntervals));
    }

    #[test]
    fn output_order_is_events_then_gaps_then_grouped() {
        let events = vec![
            event("E2", at(2, 10, 0), at(2, 12, 0)),
            event("E1", at(2, 1, 0), at(2, 3, 0)),
        ];
        let plan = WindowPlan::from_events(&events).expect("plan");
        let matches = vec![at(2, 5, 0)];
        let rows = plan
            .summarize(|window| {
                Some(Tally {
                    count: count_in(&matches, window),
                    sum: 0_i64,
                })
            })
            .expect("rows");
        let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["E1", "E2", "Interval 1", GROUPED_INTERVALS_LABEL]);
    }

    #[test]
    fn adjacent_events_leave_no_gap_row() {
        let events = vec![
            event("E1", at(3, 1, 0), at(3, 1, 23)),
            event("E2", at(3, 2, 0), at(3, 3, 0)),
        ];
        let plan = WindowPlan::from_events(&events).expect("plan");
        assert!(plan.gaps().is_empty());
        assert!(plan.grouped_window().is_none());
    }

    #[test]
    fn overlapping_events_are_rejected() {
        let events = vec![
            event("E1", at(4, 1, 0), at(4, 10, 0)),
            event("E2", at(4, 5, 0), at(4, 12, 0)),
        ];
        assert!(matches!(
            WindowPlan::from_events(&events),
            Err(ReportError::OverlappingEvents { .. })
        ));
    }

    #[test]
    fn inverted_event_is_rejected() {
        let events = vec![event("E1", at(4, 10, 0), at(4, 1, 0))];
        assert!(matches!(
            WindowPlan::from_events(&events),
            Err(ReportError::InvalidEventWindow { .. })
        ));
    }

    #[test]
    fn event_windows_are_inclusive() {
        let events = vec![event("E1", at(5, 1, 0), at(5, 2, 0))];
        let plan = WindowPlan::from_events(&events).expect("plan");
        let points = vec![(at(5, 1, 0), 2_i64), (at(5, 2, 0), 3), (at(5, 2, 1), 100)];
        let tally = sum_in(&points, &plan.events()[0]).expect("tally");
        assert_eq!(tally.count, 2);
        assert_eq!(tally.sum, 5);
        assert_eq!(plan.events()[0].duration_days, 2);
    }

    #[test]
    fn integer_sums_stop_at_overflow() {
        let events = vec![
            event("E1", at(6, 1, 0), at(6, 2, 0)),
            event("E2", at(6, 10, 0), at(6, 11, 0)),
            event("E3", at(6, 20, 0), at(6, 21, 0)),
        ];
        let plan = WindowPlan::from_events(&events).expect("plan");
        let points = vec![(at(6, 1, 0), i64::MAX), (at(6, 2, 0), 1)];
        assert_eq!(sum_in(&points, &plan.events()[0]), None);

        // Each gap fits on its own; only the grouped row overflows.
        let gap_points = vec![(at(6, 5, 0), i64::MAX), (at(6, 15, 0), i64::MAX)];
        assert!(plan.summarize(|window| sum_in(&gap_points, window)).is_none());
    }

    #[test]
    fn missing_event_dates_are_reported() {
        let events = vec![EventRecord {
            title: Some("E1".to_string()),
            start_date: None,
            end_date: Some(at(5, 2, 0)),
        }];
        assert_eq!(
            WindowPlan::from_events(&events),
            Err(ReportError::MissingField {
                table: "gameevents",
                field: "startDate",
                index: 0,
            })
        );
    }
}
