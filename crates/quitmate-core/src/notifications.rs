//! Reminder planning.
//!
//! A pure consumer of derived state: given the current state and the
//! notification preferences, decide which reminders a scheduler should
//! queue. Nothing here feeds back into core state, and actual delivery
//! belongs to the platform layer.

use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::local_date;
use crate::state::AppState;
use crate::storage::config::NotificationsConfig;
use crate::store;

/// What the scheduler should queue right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPlan {
    /// Daily mood check-in is due (none recorded today and the reminder
    /// hour has passed).
    pub checkin_due: bool,
    /// Next savings milestone the user is approaching, in cents.
    pub next_milestone_cents: i64,
    /// Cents still missing to reach it.
    pub cents_to_next_milestone: i64,
}

/// Build the reminder plan for `now_ms`.
pub fn plan_reminders(state: &AppState, config: &NotificationsConfig, now_ms: i64) -> ReminderPlan {
    let net = store::net_savings_now(state, now_ms);
    let next_milestone = (net / 1000 + 1) * 1000;

    let checkin_due = config.enabled
        && state.onboarding_completed
        && state.checkin.last_checkin_date != Some(local_date(now_ms))
        && local_hour(now_ms) >= config.checkin_reminder_hour;

    ReminderPlan {
        checkin_due,
        next_milestone_cents: next_milestone,
        cents_to_next_milestone: next_milestone - net,
    }
}

fn local_hour(now_ms: i64) -> u32 {
    DateTime::<Utc>::from_timestamp_millis(now_ms)
        .unwrap_or_default()
        .with_timezone(&Local)
        .hour()
}
