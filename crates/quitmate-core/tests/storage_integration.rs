//! Persistence round-trips: the state document written by one session is
//! what the next session loads, including documents from older builds.

use quitmate_core::calendar::DAY_MS;
use quitmate_core::state::QuitReason;
use quitmate_core::store::{Action, Tracker};
use quitmate_core::{AppState, StateFile};

const T0: i64 = 1_700_000_000_000;

#[test]
fn a_session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let file = StateFile::at(dir.path().join("state.json"));

    // Session one: onboard, save on exit.
    let mut tracker = Tracker::from_state(file.load(T0));
    tracker.dispatch(
        Action::CompleteOnboarding {
            cigs_per_day: 10,
            pack_price_cents: 600,
            reason: QuitReason::Health,
            age: 28,
            years_smoking: 8,
        },
        T0,
    );
    if tracker.take_dirty() {
        file.save(tracker.state()).unwrap();
    }

    // Session two, a day later: derived figures pick up where we left off.
    let mut restored = Tracker::from_state(file.load(T0 + DAY_MS));
    let snap = restored.snapshot(T0 + DAY_MS);
    assert!(snap.onboarding_completed);
    // 10 of a 20-pack at 6.00: 3.00 a day.
    assert_eq!(snap.saved_cents, 300);
    assert_eq!(snap.days_smoke_free, 2);

    // The restart did not lose the evolution guard either.
    restored.tick(T0 + DAY_MS);
    let first = restored.state().progress.fumi_evolution.clone();
    restored.tick(T0 + DAY_MS + 1000);
    assert_eq!(restored.state().progress.fumi_evolution, first);
}

#[test]
fn a_v1_document_from_an_old_build_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(
        &path,
        format!(
            r#"{{
                "schemaVersion": 1,
                "onboardingCompleted": true,
                "createdAtTs": {T0},
                "isLoggedIn": false,
                "email": null,
                "settings": {{
                    "cigsPerDay": 20,
                    "packPriceCents": 500,
                    "cigsPerPack": 20,
                    "reason": "salud"
                }},
                "progress": {{
                    "baseCents": 2500,
                    "baseAtTs": {T0},
                    "smokeFreeStartTs": {T0},
                    "lastMilestoneCents": 2000,
                    "caprichosSpentCents": 0,
                    "cigarettesSmoked": {{"2023-11-10": 2}},
                    "cigarettesSpentCents": 50,
                    "fumiEvolution": {{
                        "currentLevel": "deporte",
                        "progressNumerator": 2,
                        "progressDenominator": 3,
                        "lastCheckedDate": "2023-11-14",
                        "streakDays": 5,
                        "lastSuccessDate": "2023-11-13"
                    }},
                    "ownedPets": ["hopper"],
                    "activePetId": "hopper"
                }}
            }}"#
        ),
    )
    .unwrap();

    let state = StateFile::at(&path).load(T0 + DAY_MS);
    assert_eq!(state.schema_version, 2);
    assert!(state.onboarding_completed);
    assert_eq!(state.settings.reason, Some(QuitReason::Health));
    // v2 backfill.
    assert_eq!(state.progress.best_streak_days, 0);
    assert!(!state.settings.motivation_beast);
    // Carried data is intact, including the legacy level name.
    assert_eq!(state.progress.base_cents, 2500);
    assert_eq!(
        state.progress.fumi_evolution.current_level,
        quitmate_core::CompanionLevel::Sporty
    );
    assert_eq!(state.progress.owned_pets, vec!["hopper".to_string()]);
}

#[test]
fn account_deletion_clears_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let file = StateFile::at(dir.path().join("state.json"));

    let mut tracker = Tracker::from_state(file.load(T0));
    tracker.dispatch(
        Action::Login {
            email: "demo@quitmate.app".into(),
        },
        T0,
    );
    file.save(tracker.state()).unwrap();

    tracker.dispatch(Action::DeleteAccount, T0 + 1000);
    file.clear().unwrap();
    file.save(tracker.state()).unwrap();

    let state = file.load(T0 + 2000);
    assert_eq!(state, AppState::initial(T0 + 1000));
    assert!(!state.is_logged_in);
}
