use crate::models::{DailyTotal, ProgressSummary};

/// Weekly roll-up against a per-day goal. Ties for best and worst day go to
/// the earliest entry.
pub fn summarize_week(days: &[DailyTotal], goal_kg_per_day: f64) -> Option<ProgressSummary> {
    let first = *days.first()?;

    let mut total_kg = 0.0;
    let mut best_day = first;
    let mut worst_day = first;
    let mut days_within_goal = 0usize;

    for day in days {
        total_kg += day.kg;
        if day.kg < best_day.kg {
            best_day = *day;
        }
        if day.kg > worst_day.kg {
            worst_day = *day;
        }
        if day.kg <= goal_kg_per_day {
            days_within_goal += 1;
        }
    }

    Some(ProgressSummary {
        total_kg,
        average_kg: total_kg / days.len() as f64,
        best_day,
        worst_day,
        days_within_goal,
        day_count: days.len(),
    })
}
