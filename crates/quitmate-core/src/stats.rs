//! Consumption statistics over the per-day cigarette ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{local_date, previous_day};

/// One day of the trailing week, oldest first in [`WeeklyStats::week_days`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Trailing-7-day consumption summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub today: u32,
    pub week_total: u32,
    pub week_average: f64,
    pub week_days: Vec<DayCount>,
}

/// Summarize the last seven calendar days (today included).
pub fn weekly_stats(cigarettes_smoked: &BTreeMap<NaiveDate, u32>, now_ms: i64) -> WeeklyStats {
    let today = local_date(now_ms);

    let mut week_days = Vec::with_capacity(7);
    let mut date = today;
    for _ in 0..7 {
        let count = cigarettes_smoked.get(&date).copied().unwrap_or(0);
        week_days.push(DayCount { date, count });
        date = previous_day(date);
    }
    week_days.reverse();

    let week_total: u32 = week_days.iter().map(|d| d.count).sum();
    WeeklyStats {
        today: cigarettes_smoked.get(&today).copied().unwrap_or(0),
        week_total,
        week_average: week_total as f64 / 7.0,
        week_days,
    }
}
