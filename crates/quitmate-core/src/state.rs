//! Application state: the single persisted document and its defaults.
//!
//! Everything the app remembers lives in one [`AppState`] snapshot, written
//! as a single JSON document (see [`crate::storage::state_file`]). Wire
//! names are camelCase for compatibility with documents produced by the
//! mobile builds; Spanish enum aliases accept the earliest ones.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::local_date;
use crate::evolution::EvolutionState;
use crate::money::Currency;

/// Current persisted schema version. Bump together with a migration step in
/// [`crate::storage::migrate`].
pub const SCHEMA_VERSION: u32 = 2;

/// Why the user is quitting, from onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuitReason {
    #[serde(alias = "dinero")]
    Money,
    #[serde(alias = "salud")]
    Health,
    #[serde(alias = "aliento")]
    Breath,
}

/// Daily check-in mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    Zen,
    #[serde(alias = "ansioso")]
    Anxious,
    #[serde(alias = "rojo")]
    Red,
}

/// User-configured settings. Mutated only through the settings-update
/// action, which re-anchors the savings checkpoint first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Pre-quit daily cigarette baseline; denominator for the evolution
    /// thresholds. Kept `>= 1` by onboarding.
    pub cigs_per_day: u32,
    /// Pack price in minor currency units.
    pub pack_price_cents: i64,
    /// Cigarettes per pack; kept `>= 1` so per-cigarette cost is defined.
    pub cigs_per_pack: u32,
    pub reason: Option<QuitReason>,
    pub currency: Currency,
    /// Harsher motivational copy in the companion's messages.
    pub motivation_beast: bool,
    pub age: Option<u32>,
    pub years_smoking: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cigs_per_day: 20,
            pack_price_cents: 500,
            cigs_per_pack: 20,
            reason: None,
            currency: Currency::Eur,
            motivation_beast: false,
            age: None,
            years_smoking: None,
        }
    }
}

/// Partial settings update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub cigs_per_day: Option<u32>,
    pub pack_price_cents: Option<i64>,
    pub cigs_per_pack: Option<u32>,
    pub reason: Option<QuitReason>,
    pub currency: Option<Currency>,
    pub motivation_beast: Option<bool>,
    pub age: Option<u32>,
    pub years_smoking: Option<u32>,
}

impl SettingsPatch {
    /// Apply the patch, clamping the fields the division guards rely on.
    pub fn apply_to(&self, settings: &Settings) -> Settings {
        Settings {
            cigs_per_day: self.cigs_per_day.unwrap_or(settings.cigs_per_day),
            pack_price_cents: self
                .pack_price_cents
                .unwrap_or(settings.pack_price_cents)
                .max(0),
            cigs_per_pack: self.cigs_per_pack.unwrap_or(settings.cigs_per_pack).max(1),
            reason: self.reason.or(settings.reason),
            currency: self.currency.unwrap_or(settings.currency),
            motivation_beast: self.motivation_beast.unwrap_or(settings.motivation_beast),
            age: self.age.or(settings.age),
            years_smoking: self.years_smoking.or(settings.years_smoking),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Core mutable progress; single writer is the state container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    /// Savings amount frozen at `base_at_ts`; the accrual checkpoint.
    pub base_cents: i64,
    /// When the checkpoint was taken (epoch ms). Re-anchored on every rate
    /// change and every logged cigarette.
    pub base_at_ts: i64,
    /// Anchor of the smoke-free streak; reset whenever a cigarette is
    /// logged.
    pub smoke_free_start_ts: i64,
    /// Highest celebrated savings milestone, in cents.
    pub last_milestone_cents: i64,
    /// High-water mark of the smoke-free streak, in days.
    pub best_streak_days: u32,
    /// Cumulative treat/pet spend. Reduces only the spendable balance,
    /// never the historical savings total.
    pub caprichos_spent_cents: i64,
    /// Per-local-day cigarette counts; a missing day means zero.
    pub cigarettes_smoked: BTreeMap<NaiveDate, u32>,
    /// Cumulative cost of logged cigarettes; subtracted from gross accrual.
    pub cigarettes_spent_cents: i64,
    pub fumi_evolution: EvolutionState,
    pub owned_pets: Vec<String>,
    pub active_pet_id: Option<String>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            base_cents: 0,
            base_at_ts: 0,
            smoke_free_start_ts: 0,
            last_milestone_cents: 0,
            best_streak_days: 0,
            caprichos_spent_cents: 0,
            cigarettes_smoked: BTreeMap::new(),
            cigarettes_spent_cents: 0,
            fumi_evolution: EvolutionState::default(),
            owned_pets: Vec::new(),
            active_pet_id: None,
        }
    }
}

impl Progress {
    /// Fresh progress anchored at `now_ms`.
    pub fn initial(now_ms: i64) -> Self {
        Self {
            base_at_ts: now_ms,
            smoke_free_start_ts: now_ms,
            fumi_evolution: EvolutionState::initial(local_date(now_ms)),
            ..Self::default()
        }
    }

    /// Today's logged count.
    pub fn cigarettes_on(&self, date: NaiveDate) -> u32 {
        self.cigarettes_smoked.get(&date).copied().unwrap_or(0)
    }
}

/// Daily mood check-in record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Checkin {
    pub last_checkin_date: Option<NaiveDate>,
    pub last_mood: Option<Mood>,
}

/// Premium entitlement flag. Kept deliberately thin: the purchase flow's
/// demo fallback means this is a product switch, not a verified receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Premium {
    pub active: bool,
}

/// The single persisted application state document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub schema_version: u32,
    pub onboarding_completed: bool,
    /// First launch, for "days using the app".
    pub created_at_ts: i64,
    pub is_logged_in: bool,
    pub email: Option<String>,
    pub settings: Settings,
    pub progress: Progress,
    pub checkin: Checkin,
    pub premium: Premium,
}

impl AppState {
    /// Default state for a fresh install at `now_ms`.
    pub fn initial(now_ms: i64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            onboarding_completed: false,
            created_at_ts: now_ms,
            is_logged_in: false,
            email: None,
            settings: Settings::default(),
            progress: Progress::initial(now_ms),
            checkin: Checkin::default(),
            premium: Premium::default(),
        }
    }
}
