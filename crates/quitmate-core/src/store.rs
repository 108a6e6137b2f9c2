//! State container: actions, reducer, and the tracker that owns the state.
//!
//! All mutation goes through [`reduce`], a pure `(state, action) -> state`
//! transition returning the events the change produced. [`Tracker`] is the
//! single owner: it dispatches actions, fans events out to subscribers, and
//! tracks a dirty flag so callers can persist lazily (best-effort, see
//! [`crate::storage::state_file`]).
//!
//! The recurring work -- accrual display, milestone and best-streak
//! high-water marks, the once-per-day evolution step -- hangs off the
//! [`Action::Tick`] action, driven by an explicit periodic callback (the
//! CLI's watch loop). Redundant ticks are cheap no-ops.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{local_date, utc_time, DAY_MS};
use crate::evolution::{self, CompanionLevel};
use crate::events::Event;
use crate::savings;
use crate::state::{AppState, Mood, Progress, QuitReason, SettingsPatch};

/// Savings milestone granularity in cents.
const MILESTONE_STEP_CENTS: i64 = 1000;

/// Everything the UI layer can ask the state container to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    CompleteOnboarding {
        cigs_per_day: u32,
        pack_price_cents: i64,
        reason: QuitReason,
        age: u32,
        years_smoking: u32,
    },
    UpdateSettings {
        patch: SettingsPatch,
    },
    /// Log cigarettes for a day (defaults to today). Negative amounts
    /// undo mistaken entries; the day count never goes below zero.
    RegisterCigarette {
        date: Option<NaiveDate>,
        amount: i32,
    },
    MarkCheckin {
        mood: Mood,
    },
    ResetProgress,
    SetPremiumActive {
        active: bool,
    },
    BuyTreat {
        price_cents: i64,
    },
    BuyPet {
        pet_id: String,
        price_cents: i64,
    },
    SetActivePet {
        pet_id: Option<String>,
    },
    Login {
        email: String,
    },
    Logout,
    DeleteAccount,
    Tick,
}

/// Derived figures for rendering; recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub now_ts: i64,
    pub onboarding_completed: bool,
    pub premium_active: bool,
    /// Net savings (gross accrual minus cigarette costs).
    pub saved_cents: i64,
    /// Net savings minus treat/pet spend.
    pub available_cents: i64,
    pub rate_cents_per_second: f64,
    pub daily_spend_cents: i64,
    pub days_smoke_free: i64,
    pub app_days: i64,
    pub best_streak_days: u32,
    pub cigarettes_today: u32,
    pub level: CompanionLevel,
    pub level_progress_numerator: u32,
    pub level_progress_denominator: u32,
    pub level_streak_days: u32,
    pub active_pet_id: Option<String>,
}

/// Days of the current smoke-free streak ("day 1" starts immediately).
pub fn days_smoke_free(state: &AppState, now_ms: i64) -> i64 {
    if !state.onboarding_completed {
        return 0;
    }
    ((now_ms - state.progress.smoke_free_start_ts).div_euclid(DAY_MS) + 1).max(0)
}

/// Days since first launch, at least 1.
pub fn app_days(state: &AppState, now_ms: i64) -> i64 {
    ((now_ms - state.created_at_ts).div_euclid(DAY_MS) + 1).max(1)
}

/// Net savings at `now_ms`.
pub fn net_savings_now(state: &AppState, now_ms: i64) -> i64 {
    let rate = savings::rate_cents_per_second(&state.settings);
    let gross = savings::accrued_cents(
        state.progress.base_cents,
        state.progress.base_at_ts,
        now_ms,
        rate,
    );
    savings::net_savings_cents(gross, state.progress.cigarettes_spent_cents)
}

/// Spendable balance at `now_ms` (net savings minus treat spend).
pub fn available_now(state: &AppState, now_ms: i64) -> i64 {
    savings::spendable_cents(
        net_savings_now(state, now_ms),
        state.progress.caprichos_spent_cents.max(0),
    )
}

/// Build the derived snapshot for `now_ms`.
pub fn snapshot(state: &AppState, now_ms: i64) -> Snapshot {
    let saved = net_savings_now(state, now_ms);
    let evo = &state.progress.fumi_evolution;
    Snapshot {
        now_ts: now_ms,
        onboarding_completed: state.onboarding_completed,
        premium_active: state.premium.active,
        saved_cents: saved,
        available_cents: savings::spendable_cents(saved, state.progress.caprichos_spent_cents.max(0)),
        rate_cents_per_second: savings::rate_cents_per_second(&state.settings),
        daily_spend_cents: savings::daily_spend_cents(&state.settings),
        days_smoke_free: days_smoke_free(state, now_ms),
        app_days: app_days(state, now_ms),
        best_streak_days: state.progress.best_streak_days,
        cigarettes_today: state.progress.cigarettes_on(local_date(now_ms)),
        level: evo.current_level,
        level_progress_numerator: evo.progress_numerator,
        level_progress_denominator: evo.effective_denominator(),
        level_streak_days: evo.streak_days,
        active_pet_id: state.progress.active_pet_id.clone(),
    }
}

/// Consolidate the accrual under the current rate into the checkpoint.
///
/// Must run *before* any change that alters the rate or deducts a lump
/// cost; it is what lets the stored state survive rate changes without a
/// ticking counter.
fn reanchor(progress: &mut Progress, state: &AppState, now_ms: i64) {
    let rate = savings::rate_cents_per_second(&state.settings);
    progress.base_cents = savings::accrued_cents(
        state.progress.base_cents,
        state.progress.base_at_ts,
        now_ms,
        rate,
    );
    progress.base_at_ts = now_ms;
}

/// Pure state transition. Returns the next state and the events produced.
pub fn reduce(state: &AppState, action: &Action, now_ms: i64) -> (AppState, Vec<Event>) {
    let at = utc_time(now_ms);
    let mut next = state.clone();
    let mut events = Vec::new();

    match action {
        Action::CompleteOnboarding {
            cigs_per_day,
            pack_price_cents,
            reason,
            age,
            years_smoking,
        } => {
            next.onboarding_completed = true;
            next.settings.cigs_per_day = (*cigs_per_day).max(1);
            next.settings.pack_price_cents = (*pack_price_cents).max(0);
            next.settings.reason = Some(*reason);
            next.settings.age = Some(*age);
            next.settings.years_smoking = Some(*years_smoking);
            // Fresh quit journey: zero the ledgers, keep the historical
            // best streak and the companion where it stood.
            next.progress.base_cents = 0;
            next.progress.base_at_ts = now_ms;
            next.progress.smoke_free_start_ts = now_ms;
            next.progress.last_milestone_cents = 0;
            next.progress.caprichos_spent_cents = 0;
            next.progress.cigarettes_smoked.clear();
            next.progress.cigarettes_spent_cents = 0;
            next.progress.owned_pets.clear();
            next.progress.active_pet_id = None;
            events.push(Event::OnboardingCompleted { at });
        }

        Action::UpdateSettings { patch } => {
            // The rate may change: freeze the accrual first, then apply.
            reanchor(&mut next.progress, state, now_ms);
            next.settings = patch.apply_to(&state.settings);
            events.push(Event::SettingsUpdated {
                daily_spend_cents: savings::daily_spend_cents(&next.settings),
                at,
            });
        }

        Action::RegisterCigarette { date, amount } => {
            let day = date.unwrap_or_else(|| local_date(now_ms));
            let current = state.progress.cigarettes_on(day);
            let new_count = (current as i64 + *amount as i64).max(0) as u32;
            let cost_cents =
                (savings::cost_per_cigarette_cents(&state.settings) * *amount as f64).round()
                    as i64;

            // Deduct the cost from the consolidated accrual and restart
            // the clock from here.
            reanchor(&mut next.progress, state, now_ms);
            next.progress.base_cents = (next.progress.base_cents - cost_cents).max(0);
            next.progress.cigarettes_spent_cents =
                (state.progress.cigarettes_spent_cents + cost_cents).max(0);
            next.progress.cigarettes_smoked.insert(day, new_count);
            // Any logged cigarette restarts the smoke-free streak.
            next.progress.smoke_free_start_ts = now_ms;

            let evo = evolution::evaluate(
                &state.progress.fumi_evolution,
                &next.progress.cigarettes_smoked,
                next.settings.cigs_per_day,
                day,
            );
            if evo.current_level != state.progress.fumi_evolution.current_level {
                events.push(Event::CompanionLevelChanged {
                    from: state.progress.fumi_evolution.current_level,
                    to: evo.current_level,
                    at,
                });
            }
            next.progress.fumi_evolution = evo;

            events.push(Event::CigaretteLogged {
                date: day,
                count_on_day: new_count,
                cost_cents,
                at,
            });
        }

        Action::MarkCheckin { mood } => {
            let today = local_date(now_ms);
            next.checkin.last_checkin_date = Some(today);
            next.checkin.last_mood = Some(*mood);
            events.push(Event::CheckinRecorded {
                date: today,
                mood: *mood,
                at,
            });
        }

        Action::ResetProgress => {
            let best = state
                .progress
                .best_streak_days
                .max(days_smoke_free(state, now_ms).max(0) as u32);
            next.progress = Progress::initial(now_ms);
            next.progress.best_streak_days = best;
            events.push(Event::ProgressReset {
                best_streak_days: best,
                at,
            });
        }

        Action::SetPremiumActive { active } => {
            if state.premium.active != *active {
                next.premium.active = *active;
                events.push(Event::PremiumChanged { active: *active, at });
            }
        }

        Action::BuyTreat { price_cents } => {
            let price = (*price_cents).max(0);
            if price > 0 && available_now(state, now_ms) >= price {
                next.progress.caprichos_spent_cents =
                    (state.progress.caprichos_spent_cents + price).max(0);
                events.push(Event::TreatPurchased { price_cents: price, at });
            }
        }

        Action::BuyPet { pet_id, price_cents } => {
            let price = (*price_cents).max(0);
            let already_owned = state.progress.owned_pets.iter().any(|p| p == pet_id);
            if !already_owned && available_now(state, now_ms) >= price {
                next.progress.caprichos_spent_cents =
                    (state.progress.caprichos_spent_cents + price).max(0);
                next.progress.owned_pets.push(pet_id.clone());
                // Buying auto-selects.
                next.progress.active_pet_id = Some(pet_id.clone());
                events.push(Event::PetPurchased {
                    pet_id: pet_id.clone(),
                    price_cents: price,
                    at,
                });
            }
        }

        Action::SetActivePet { pet_id } => {
            let valid = match pet_id {
                Some(id) => state.progress.owned_pets.iter().any(|p| p == id),
                None => true,
            };
            if valid && state.progress.active_pet_id != *pet_id {
                next.progress.active_pet_id = pet_id.clone();
                events.push(Event::ActivePetChanged {
                    pet_id: pet_id.clone(),
                    at,
                });
            }
        }

        Action::Login { email } => {
            next.is_logged_in = true;
            next.email = Some(email.clone());
            events.push(Event::LoggedIn {
                email: email.clone(),
                at,
            });
        }

        Action::Logout => {
            next.is_logged_in = false;
            next.email = None;
            events.push(Event::LoggedOut { at });
        }

        Action::DeleteAccount => {
            next = AppState::initial(now_ms);
            events.push(Event::AccountDeleted { at });
        }

        Action::Tick => {
            let today = local_date(now_ms);

            // At most one daily evolution step per calendar day.
            if state.progress.fumi_evolution.last_checked_date != today {
                let evo = evolution::evaluate(
                    &state.progress.fumi_evolution,
                    &state.progress.cigarettes_smoked,
                    state.settings.cigs_per_day,
                    today,
                );
                if evo.current_level != state.progress.fumi_evolution.current_level {
                    events.push(Event::CompanionLevelChanged {
                        from: state.progress.fumi_evolution.current_level,
                        to: evo.current_level,
                        at,
                    });
                }
                next.progress.fumi_evolution = evo;
            }

            if state.onboarding_completed {
                let streak = days_smoke_free(state, now_ms).max(0) as u32;
                if streak > state.progress.best_streak_days {
                    next.progress.best_streak_days = streak;
                    events.push(Event::BestStreakUpdated { days: streak, at });
                }

                let net = net_savings_now(state, now_ms);
                let milestone = (net / MILESTONE_STEP_CENTS) * MILESTONE_STEP_CENTS;
                if milestone > 0 && milestone > state.progress.last_milestone_cents {
                    next.progress.last_milestone_cents = milestone;
                    events.push(Event::MilestoneReached {
                        milestone_cents: milestone,
                        at,
                    });
                }
            }
        }
    }

    (next, events)
}

/// Owner of the application state.
///
/// Single logical writer: every mutation flows through [`reduce`], readers
/// get immutable snapshots. Subscribers are plain callbacks -- the whole
/// container is single-threaded by design.
pub struct Tracker {
    state: AppState,
    subscribers: Vec<Box<dyn Fn(&Event)>>,
    dirty: bool,
}

impl Tracker {
    /// Fresh tracker for a new install.
    pub fn new(now_ms: i64) -> Self {
        Self::from_state(AppState::initial(now_ms))
    }

    /// Wrap a loaded state.
    pub fn from_state(state: AppState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            dirty: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    /// Whether the state changed since the last [`Tracker::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag (callers persist when it was set).
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Register an event callback.
    pub fn subscribe(&mut self, callback: impl Fn(&Event) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Dispatch an action, notify subscribers, return the events.
    pub fn dispatch(&mut self, action: Action, now_ms: i64) -> Vec<Event> {
        let (next, events) = reduce(&self.state, &action, now_ms);
        if next != self.state {
            self.dirty = true;
        }
        self.state = next;
        for event in &events {
            for subscriber in &self.subscribers {
                subscriber(event);
            }
        }
        events
    }

    /// Periodic recomputation; call roughly once per second.
    pub fn tick(&mut self, now_ms: i64) -> Vec<Event> {
        self.dispatch(Action::Tick, now_ms)
    }

    /// Derived figures at `now_ms`.
    pub fn snapshot(&self, now_ms: i64) -> Snapshot {
        snapshot(&self.state, now_ms)
    }

    /// Buy a treat; `false` means insufficient funds (no state change).
    pub fn buy_treat(&mut self, price_cents: i64, now_ms: i64) -> bool {
        !self
            .dispatch(Action::BuyTreat { price_cents }, now_ms)
            .is_empty()
    }

    /// Buy a pet; `false` means insufficient funds or already owned
    /// (no state change).
    pub fn buy_pet(&mut self, pet_id: &str, price_cents: i64, now_ms: i64) -> bool {
        self.dispatch(
            Action::BuyPet {
                pet_id: pet_id.to_string(),
                price_cents,
            },
            now_ms,
        )
        .iter()
        .any(|e| matches!(e, Event::PetPurchased { .. }))
    }
}
