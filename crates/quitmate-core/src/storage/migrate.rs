//! Versioned migration of the persisted state document.
//!
//! Loading never fails: unknown shapes fall back to the default state,
//! older schema versions are upgraded one step at a time, and a final
//! normalize pass enforces the state invariants whatever the document
//! claimed. Migration steps edit the raw JSON; typed deserialization with
//! per-field defaults happens after the last step.

use serde_json::{json, Value};

use crate::calendar::local_date;
use crate::evolution::PROGRESS_SENTINEL;
use crate::state::{AppState, SCHEMA_VERSION};

/// Upgrade a raw state document to the current schema.
///
/// `now_ms` anchors any timestamp the document is missing.
pub fn migrate(mut raw: Value, now_ms: i64) -> AppState {
    if !raw.is_object() {
        return AppState::initial(now_ms);
    }

    let version = raw
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .unwrap_or(1) as u32;

    if version < 2 {
        migrate_v2(&mut raw);
    }
    raw["schemaVersion"] = json!(SCHEMA_VERSION);

    match serde_json::from_value::<AppState>(raw) {
        Ok(state) => normalize(state, now_ms),
        Err(_) => AppState::initial(now_ms),
    }
}

/// v1 -> v2: currency selection, motivation flag, profile fields and the
/// best-streak record were added; backfill them for old documents.
fn migrate_v2(raw: &mut Value) {
    if let Some(settings) = raw.get_mut("settings").and_then(Value::as_object_mut) {
        settings.entry("currency").or_insert(json!("EUR"));
        settings.entry("motivationBeast").or_insert(json!(false));
        settings.entry("age").or_insert(Value::Null);
        settings.entry("yearsSmoking").or_insert(Value::Null);
    }
    if let Some(progress) = raw.get_mut("progress").and_then(Value::as_object_mut) {
        progress.entry("bestStreakDays").or_insert(json!(0));
    }
}

/// Enforce the state invariants on a freshly-deserialized document.
fn normalize(mut state: AppState, now_ms: i64) -> AppState {
    state.schema_version = SCHEMA_VERSION;

    if state.created_at_ts <= 0 {
        state.created_at_ts = now_ms;
    }

    let progress = &mut state.progress;
    if progress.base_at_ts <= 0 {
        progress.base_at_ts = now_ms;
    }
    if progress.smoke_free_start_ts <= 0 {
        progress.smoke_free_start_ts = now_ms;
    }
    progress.base_cents = progress.base_cents.max(0);
    progress.cigarettes_spent_cents = progress.cigarettes_spent_cents.max(0);
    progress.caprichos_spent_cents = progress.caprichos_spent_cents.max(0);
    progress.last_milestone_cents = progress.last_milestone_cents.max(0);

    let evo = &mut progress.fumi_evolution;
    if evo.progress_denominator == 0 {
        evo.progress_denominator = PROGRESS_SENTINEL;
    }
    if evo.last_checked_date == chrono::NaiveDate::default() {
        evo.last_checked_date = local_date(now_ms);
    }
    // Numerator can never exceed the level's effective target.
    let cap = evo.effective_denominator();
    evo.progress_numerator = evo.progress_numerator.min(cap);

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::CompanionLevel;
    use crate::money::Currency;

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn garbage_becomes_the_default_state() {
        assert_eq!(migrate(json!("not an object"), T0), AppState::initial(T0));
        assert_eq!(migrate(json!(null), T0), AppState::initial(T0));
    }

    #[test]
    fn empty_object_fills_every_default() {
        let state = migrate(json!({}), T0);
        assert_eq!(state.schema_version, SCHEMA_VERSION);
        assert_eq!(state.created_at_ts, T0);
        assert_eq!(state.progress.base_at_ts, T0);
        assert_eq!(state.settings.cigs_per_day, 20);
    }

    #[test]
    fn v1_document_gets_backfilled() {
        let raw = json!({
            "schemaVersion": 1,
            "onboardingCompleted": true,
            "createdAtTs": T0,
            "settings": {
                "cigsPerDay": 15,
                "packPriceCents": 600,
                "cigsPerPack": 20,
                "reason": "dinero"
            },
            "progress": {
                "baseCents": 1234,
                "baseAtTs": T0,
                "smokeFreeStartTs": T0
            }
        });

        let state = migrate(raw, T0 + 1000);
        assert_eq!(state.schema_version, 2);
        assert!(state.onboarding_completed);
        assert_eq!(state.settings.cigs_per_day, 15);
        assert_eq!(state.settings.currency, Currency::Eur);
        assert!(!state.settings.motivation_beast);
        assert_eq!(state.settings.age, None);
        assert_eq!(state.progress.best_streak_days, 0);
        assert_eq!(state.progress.base_cents, 1234);
        // Present timestamps are kept, not re-anchored.
        assert_eq!(state.progress.base_at_ts, T0);
    }

    #[test]
    fn legacy_evolution_names_survive_migration() {
        let raw = json!({
            "schemaVersion": 2,
            "progress": {
                "baseAtTs": T0,
                "smokeFreeStartTs": T0,
                "fumiEvolution": {
                    "currentLevel": "pulmonDiamante",
                    "progressNumerator": 4,
                    "progressDenominator": 10,
                    "lastCheckedDate": "2025-05-01",
                    "streakDays": 4,
                    "lastSuccessDate": null
                }
            }
        });

        let state = migrate(raw, T0);
        let evo = &state.progress.fumi_evolution;
        assert_eq!(evo.current_level, CompanionLevel::DiamondLungs);
        assert_eq!(evo.progress_numerator, 4);
    }

    #[test]
    fn invariants_are_clamped() {
        let raw = json!({
            "schemaVersion": 2,
            "progress": {
                "baseCents": -500,
                "baseAtTs": T0,
                "smokeFreeStartTs": T0,
                "cigarettesSpentCents": -10,
                "fumiEvolution": {
                    "currentLevel": "sporty",
                    "progressNumerator": 99,
                    "progressDenominator": 0,
                    "lastCheckedDate": "2025-05-01",
                    "streakDays": 0,
                    "lastSuccessDate": null
                }
            }
        });

        let state = migrate(raw, T0);
        assert_eq!(state.progress.base_cents, 0);
        assert_eq!(state.progress.cigarettes_spent_cents, 0);
        let evo = &state.progress.fumi_evolution;
        assert_eq!(evo.progress_denominator, PROGRESS_SENTINEL);
        // Numerator capped at the Sporty target.
        assert_eq!(evo.progress_numerator, 3);
    }

    #[test]
    fn wrong_field_types_fall_back_to_default() {
        let raw = json!({
            "schemaVersion": 2,
            "progress": "definitely not progress"
        });
        assert_eq!(migrate(raw, T0), AppState::initial(T0));
    }
}
