use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::evolution::CompanionLevel;
use crate::state::Mood;

/// Every state change in the system produces an Event.
/// The CLI prints them; UI surfaces subscribe through the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    OnboardingCompleted {
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        daily_spend_cents: i64,
        at: DateTime<Utc>,
    },
    CigaretteLogged {
        date: NaiveDate,
        count_on_day: u32,
        cost_cents: i64,
        at: DateTime<Utc>,
    },
    CheckinRecorded {
        date: NaiveDate,
        mood: Mood,
        at: DateTime<Utc>,
    },
    /// Net savings crossed a new 1000-cent milestone (celebrated once).
    MilestoneReached {
        milestone_cents: i64,
        at: DateTime<Utc>,
    },
    BestStreakUpdated {
        days: u32,
        at: DateTime<Utc>,
    },
    CompanionLevelChanged {
        from: CompanionLevel,
        to: CompanionLevel,
        at: DateTime<Utc>,
    },
    PetPurchased {
        pet_id: String,
        price_cents: i64,
        at: DateTime<Utc>,
    },
    TreatPurchased {
        price_cents: i64,
        at: DateTime<Utc>,
    },
    ActivePetChanged {
        pet_id: Option<String>,
        at: DateTime<Utc>,
    },
    PremiumChanged {
        active: bool,
        at: DateTime<Utc>,
    },
    LoggedIn {
        email: String,
        at: DateTime<Utc>,
    },
    LoggedOut {
        at: DateTime<Utc>,
    },
    ProgressReset {
        best_streak_days: u32,
        at: DateTime<Utc>,
    },
    AccountDeleted {
        at: DateTime<Utc>,
    },
}
