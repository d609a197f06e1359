//! # Dashboard aggregation — derived metrics over a weight history
//!
//! [`build`] transforms an account's stored entries plus its goal settings
//! into everything the dashboard page renders: the chart series, the
//! enriched table rows (day-over-day PNL, per-row BMI), goal progress,
//! elapsed days, and the normal-weight range.
//!
//! It is a pure function of its inputs plus `today`, which the caller
//! passes in — that keeps date-sensitive behavior testable.
//!
//! The one piece of non-obvious behavior is the **virtual starting point**:
//! when the goal has both a start date and a start weight and no real entry
//! exists on that exact date, a synthetic point is materialized so the chart
//! begins at the goal baseline. It is display-only, never persisted, and
//! disappears as soon as a real entry lands on that day.

use chrono::NaiveDate;

use crate::models::{GoalSettings, WeightEntry};

/// One table row on the dashboard. Fixed shape; absence is `None`, never a
/// sentinel value.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRow {
    pub day: NaiveDate,
    pub kg: f64,
    /// Change versus the previous row in day order; `None` for the first row.
    pub pnl: Option<f64>,
    /// `kg / h²`; `None` when the account has no height set.
    pub bmi: Option<f64>,
    /// False for the synthetic starting point.
    pub is_real: bool,
    /// Database id; `None` for the synthetic starting point.
    pub entry_id: Option<i64>,
}

/// Everything the dashboard page needs, derived in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    /// Chart x-axis: each day as `YYYY-MM-DD`, ascending.
    pub labels: Vec<String>,
    /// Chart y-axis: the weights, in the same order.
    pub data: Vec<f64>,
    pub rows: Vec<DashboardRow>,
    /// Most recent weight, or `None` with an empty history.
    pub current: Option<f64>,
    /// Percentage of the way from start to target weight, clamped to [0, 100].
    pub progress: Option<f64>,
    /// Days since the goal started; negative when the start date is in the
    /// future, deliberately unclamped.
    pub days_elapsed: Option<i64>,
    /// Weight at BMI 18.5 for this height.
    pub normal_min: Option<f64>,
    /// Weight at BMI 25 for this height.
    pub normal_max: Option<f64>,
}

/// Aggregate an account's history (ascending by day) and goal settings into
/// display data.
pub fn build(entries: &[WeightEntry], goal: &GoalSettings, today: NaiveDate) -> Dashboard {
    struct Point {
        day: NaiveDate,
        kg: f64,
        is_real: bool,
        entry_id: Option<i64>,
    }

    let mut points: Vec<Point> = entries
        .iter()
        .map(|e| Point {
            day: e.day,
            kg: e.kg,
            is_real: true,
            entry_id: Some(e.id),
        })
        .collect();

    // Virtual starting point, unless a real entry already occupies the day.
    if let (Some(goal_start), Some(start_weight)) = (goal.goal_start, goal.start_weight) {
        if points.iter().all(|p| p.day != goal_start) {
            points.push(Point {
                day: goal_start,
                kg: start_weight,
                is_real: false,
                entry_id: None,
            });
        }
    }

    // Stable, so the construction above can never reorder same-day points.
    points.sort_by_key(|p| p.day);

    let labels = points
        .iter()
        .map(|p| p.day.format("%Y-%m-%d").to_string())
        .collect();
    let data: Vec<f64> = points.iter().map(|p| p.kg).collect();
    let current = data.last().copied();

    let progress = match (goal.start_weight, goal.target_weight, current) {
        (Some(start), Some(target), Some(current)) => {
            let full_range = (start - target).abs();
            // A zero range would divide by zero; floor it to 1.
            let full_range = if full_range == 0.0 { 1.0 } else { full_range };
            Some(((start - current).abs() / full_range * 100.0).clamp(0.0, 100.0))
        }
        _ => None,
    };

    let days_elapsed = goal.goal_start.map(|start| (today - start).num_days());

    // Height squared in meters², the denominator of every BMI figure.
    let h2 = goal.height_cm.map(|height_cm| (height_cm / 100.0).powi(2));

    let mut rows = Vec::with_capacity(points.len());
    let mut previous_kg: Option<f64> = None;
    for point in &points {
        rows.push(DashboardRow {
            day: point.day,
            kg: point.kg,
            pnl: previous_kg.map(|prev| point.kg - prev),
            bmi: h2.map(|h2| point.kg / h2),
            is_real: point.is_real,
            entry_id: point.entry_id,
        });
        // The virtual row has no pnl of its own but still anchors the next one.
        previous_kg = Some(point.kg);
    }

    Dashboard {
        labels,
        data,
        rows,
        current,
        progress,
        days_elapsed,
        normal_min: h2.map(|h2| 18.5 * h2),
        normal_max: h2.map(|h2| 25.0 * h2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(id: i64, d: &str, kg: f64) -> WeightEntry {
        WeightEntry {
            id,
            account_id: 1,
            day: day(d),
            kg,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_history_and_no_goal_yields_nothing() {
        let board = build(&[], &GoalSettings::default(), day("2024-02-01"));
        assert!(board.labels.is_empty());
        assert!(board.data.is_empty());
        assert!(board.rows.is_empty());
        assert_eq!(board.current, None);
        assert_eq!(board.progress, None);
        assert_eq!(board.days_elapsed, None);
        assert_eq!(board.normal_min, None);
        assert_eq!(board.normal_max, None);
    }

    #[test]
    fn pnl_is_the_delta_against_the_previous_row() {
        let entries = [
            entry(1, "2024-01-01", 80.0),
            entry(2, "2024-01-08", 78.0),
            entry(3, "2024-01-15", 76.0),
        ];
        let board = build(&entries, &GoalSettings::default(), day("2024-02-01"));
        let pnls: Vec<Option<f64>> = board.rows.iter().map(|r| r.pnl).collect();
        assert_eq!(pnls[0], None);
        assert_close(pnls[1].unwrap(), -2.0);
        assert_close(pnls[2].unwrap(), -2.0);
    }

    #[test]
    fn progress_is_the_covered_share_of_the_full_range() {
        let goal = GoalSettings {
            start_weight: Some(80.0),
            target_weight: Some(70.0),
            ..Default::default()
        };
        let board = build(&[entry(1, "2024-01-10", 76.0)], &goal, day("2024-02-01"));
        assert_close(board.progress.unwrap(), 40.0);
    }

    #[test]
    fn equal_start_and_target_is_not_a_division_fault() {
        let goal = GoalSettings {
            start_weight: Some(75.0),
            target_weight: Some(75.0),
            ..Default::default()
        };
        let board = build(&[entry(1, "2024-01-10", 75.0)], &goal, day("2024-02-01"));
        assert_close(board.progress.unwrap(), 0.0);
    }

    #[test]
    fn progress_is_clamped_to_one_hundred() {
        let goal = GoalSettings {
            start_weight: Some(80.0),
            target_weight: Some(78.0),
            ..Default::default()
        };
        // Lost far more than the 2 kg range.
        let board = build(&[entry(1, "2024-01-10", 70.0)], &goal, day("2024-02-01"));
        assert_close(board.progress.unwrap(), 100.0);
    }

    #[test]
    fn virtual_point_fills_in_the_goal_start() {
        let goal = GoalSettings {
            start_weight: Some(82.0),
            goal_start: Some(day("2024-01-01")),
            ..Default::default()
        };
        let board = build(&[entry(1, "2024-01-08", 80.0)], &goal, day("2024-02-01"));

        assert_eq!(board.labels, vec!["2024-01-01", "2024-01-08"]);
        assert_eq!(board.data, vec![82.0, 80.0]);

        let first = &board.rows[0];
        assert!(!first.is_real);
        assert_eq!(first.entry_id, None);
        assert_eq!(first.pnl, None);
        // The virtual row still anchors the next row's pnl.
        assert_close(board.rows[1].pnl.unwrap(), -2.0);
    }

    #[test]
    fn real_entry_on_the_goal_start_suppresses_the_virtual_point() {
        let goal = GoalSettings {
            start_weight: Some(82.0),
            goal_start: Some(day("2024-01-01")),
            ..Default::default()
        };
        let board = build(&[entry(1, "2024-01-01", 81.5)], &goal, day("2024-02-01"));
        assert_eq!(board.rows.len(), 1);
        assert!(board.rows[0].is_real);
        assert_eq!(board.rows[0].entry_id, Some(1));
    }

    #[test]
    fn no_virtual_point_without_a_start_weight() {
        let goal = GoalSettings {
            goal_start: Some(day("2024-01-01")),
            ..Default::default()
        };
        let board = build(&[], &goal, day("2024-02-01"));
        assert!(board.rows.is_empty());
        // days_elapsed is independent of the history.
        assert_eq!(board.days_elapsed, Some(31));
    }

    #[test]
    fn days_elapsed_may_be_negative_for_a_future_goal_start() {
        let goal = GoalSettings {
            goal_start: Some(day("2024-03-01")),
            ..Default::default()
        };
        let board = build(&[], &goal, day("2024-02-01"));
        assert_eq!(board.days_elapsed, Some(-29));
    }

    #[test]
    fn bmi_and_normal_range_follow_height_squared() {
        let goal = GoalSettings {
            height_cm: Some(180.0),
            ..Default::default()
        };
        let board = build(&[entry(1, "2024-01-10", 80.0)], &goal, day("2024-02-01"));

        assert_close(board.rows[0].bmi.unwrap(), 80.0 / 3.24);
        assert_close(board.normal_min.unwrap(), 18.5 * 3.24);
        assert_close(board.normal_max.unwrap(), 81.0);
    }

    #[test]
    fn no_height_means_no_bmi_anywhere() {
        let board = build(
            &[entry(1, "2024-01-10", 80.0)],
            &GoalSettings::default(),
            day("2024-02-01"),
        );
        assert_eq!(board.rows[0].bmi, None);
        assert_eq!(board.normal_min, None);
        assert_eq!(board.normal_max, None);
    }

    #[test]
    fn current_is_the_latest_weight_even_when_the_virtual_point_sorts_last() {
        let goal = GoalSettings {
            start_weight: Some(82.0),
            // Goal starts after the only real entry; the virtual point sorts last.
            goal_start: Some(day("2024-06-01")),
            ..Default::default()
        };
        let board = build(&[entry(1, "2024-01-08", 80.0)], &goal, day("2024-02-01"));
        assert_eq!(board.current, Some(82.0));
        assert_eq!(board.labels.last().unwrap(), "2024-06-01");
    }
}
