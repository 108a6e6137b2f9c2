//! Companion evolution engine.
//!
//! A day-granular state machine driving the companion through six ordered
//! stages. Once per calendar day the engine judges the *previous* (complete)
//! day against the current stage's consumption threshold and moves the
//! progress fraction; a separate, ungated rule demotes the companion the
//! moment today's logged consumption reaches the user's old baseline.
//!
//! The engine is a pure function of its inputs -- no clock access, no
//! storage. The state container owns when it runs (see [`crate::store`]).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::previous_day;

/// Denominator value meaning "derive from the level target before use".
///
/// Stored on every level change so the target of the *new* level is picked
/// up lazily at the next evaluation.
pub const PROGRESS_SENTINEL: u32 = 1;

/// The six companion stages, lowest to highest.
///
/// Wire names are the camelCase identifiers; the Spanish aliases accept
/// documents written by early builds of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CompanionLevel {
    #[default]
    #[serde(alias = "enfermo")]
    Sick,
    #[serde(alias = "bebeSano")]
    HealthyPet,
    #[serde(alias = "deporte")]
    Sporty,
    #[serde(alias = "rico")]
    Wealthy,
    #[serde(alias = "pulmonDiamante")]
    DiamondLungs,
    #[serde(alias = "dios")]
    Divine,
}

impl CompanionLevel {
    /// All levels in ascending order.
    pub const ALL: [CompanionLevel; 6] = [
        CompanionLevel::Sick,
        CompanionLevel::HealthyPet,
        CompanionLevel::Sporty,
        CompanionLevel::Wealthy,
        CompanionLevel::DiamondLungs,
        CompanionLevel::Divine,
    ];

    /// Successful days required to advance out of this level.
    pub fn target_days(&self) -> u32 {
        match self {
            CompanionLevel::Sick | CompanionLevel::HealthyPet => 3,
            CompanionLevel::Sporty => 3,
            CompanionLevel::Wealthy => 5,
            CompanionLevel::DiamondLungs => 10,
            CompanionLevel::Divine => 15,
        }
    }

    /// One stage up, saturating at the top.
    pub fn promoted(&self) -> CompanionLevel {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// One stage down, saturating at the bottom.
    pub fn demoted(&self) -> CompanionLevel {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[idx.saturating_sub(1)]
    }

    pub fn is_lowest(&self) -> bool {
        *self == CompanionLevel::Sick
    }

    pub fn is_highest(&self) -> bool {
        *self == CompanionLevel::Divine
    }

    /// Display name for CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            CompanionLevel::Sick => "Sick",
            CompanionLevel::HealthyPet => "Healthy Pet",
            CompanionLevel::Sporty => "Sporty",
            CompanionLevel::Wealthy => "Wealthy",
            CompanionLevel::DiamondLungs => "Diamond Lungs",
            CompanionLevel::Divine => "Divine",
        }
    }
}

/// Persisted evolution state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvolutionState {
    pub current_level: CompanionLevel,
    pub progress_numerator: u32,
    pub progress_denominator: u32,
    /// Last date the daily transition ran; guards re-entrancy.
    pub last_checked_date: NaiveDate,
    /// Consecutive successful days across the current climb.
    pub streak_days: u32,
    pub last_success_date: Option<NaiveDate>,
}

impl Default for EvolutionState {
    fn default() -> Self {
        Self {
            current_level: CompanionLevel::Sick,
            progress_numerator: 0,
            progress_denominator: PROGRESS_SENTINEL,
            last_checked_date: NaiveDate::default(),
            streak_days: 0,
            last_success_date: None,
        }
    }
}

impl EvolutionState {
    /// Fresh state anchored at `today`.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            last_checked_date: today,
            ..Self::default()
        }
    }

    /// Denominator with the lazy sentinel resolved to the level target.
    pub fn effective_denominator(&self) -> u32 {
        if self.progress_denominator <= PROGRESS_SENTINEL {
            self.current_level.target_days()
        } else {
            self.progress_denominator
        }
    }
}

/// Whether a completed day's count satisfies `level`'s threshold.
///
/// Thresholds are fractions of the pre-quit daily baseline; the top stage
/// demands a fully smoke-free day. A zero baseline makes the percentage
/// degenerate to 100 and the strict comparison of the low stages
/// unsatisfiable (see the zero-baseline note on [`evaluate`]).
pub fn day_meets_goal(level: CompanionLevel, cigarettes: u32, baseline: u32) -> bool {
    let pct = if baseline > 0 {
        (cigarettes as f64 / baseline as f64) * 100.0
    } else {
        100.0
    };
    match level {
        CompanionLevel::Sick | CompanionLevel::HealthyPet => cigarettes < baseline,
        CompanionLevel::Sporty => pct <= 70.0,
        CompanionLevel::Wealthy => pct <= 50.0,
        CompanionLevel::DiamondLungs => pct <= 25.0,
        CompanionLevel::Divine => cigarettes == 0,
    }
}

/// Advance the evolution state machine for `today`.
///
/// Rule order:
/// 1. Immediate demotion when today's count has already reached the
///    baseline (runs on every call, not just on day rollover).
/// 2. No-op when the daily step already ran for `today`.
/// 3. Day rollover: judge *yesterday* (the last complete day) against the
///    current level's threshold and move the fraction; filling the
///    denominator advances one level and re-arms the sentinel.
///
/// A zero `cigs_per_day` baseline disables rule 1 and leaves the low-stage
/// strict comparison unsatisfiable; callers keep the baseline positive
/// (onboarding clamps it) so the engine never sees that state in practice.
pub fn evaluate(
    state: &EvolutionState,
    cigarettes_smoked: &BTreeMap<NaiveDate, u32>,
    cigs_per_day: u32,
    today: NaiveDate,
) -> EvolutionState {
    let cigs_today = cigarettes_smoked.get(&today).copied().unwrap_or(0);

    // 1. Same-day binge: demote immediately, do not wait for the rollover.
    if cigs_per_day > 0 && cigs_today >= cigs_per_day && !state.current_level.is_lowest() {
        return EvolutionState {
            current_level: state.current_level.demoted(),
            progress_numerator: 0,
            progress_denominator: PROGRESS_SENTINEL,
            streak_days: 0,
            last_success_date: None,
            last_checked_date: today,
        };
    }

    let denominator = state.effective_denominator();

    // 2. Daily step already applied for today.
    if state.last_checked_date == today {
        return EvolutionState {
            progress_denominator: denominator,
            ..state.clone()
        };
    }

    // 3. Day rollover: judge the day that just completed.
    let yesterday = previous_day(today);
    let cigs_yesterday = cigarettes_smoked.get(&yesterday).copied().unwrap_or(0);

    let mut next = EvolutionState {
        progress_denominator: denominator,
        last_checked_date: today,
        ..state.clone()
    };

    if day_meets_goal(state.current_level, cigs_yesterday, cigs_per_day) {
        next.progress_numerator += 1;
        next.streak_days += 1;
        next.last_success_date = Some(yesterday);

        if next.progress_numerator >= denominator {
            if !state.current_level.is_highest() {
                next.current_level = state.current_level.promoted();
            }
            next.progress_numerator = 0;
            next.progress_denominator = PROGRESS_SENTINEL;
        }
    } else {
        next.progress_numerator = next.progress_numerator.saturating_sub(1);
        next.streak_days = 0;
        // last_success_date survives an ordinary failed day; only a
        // demotion clears it.
    }

    next
}
