//! End-to-end tests for the state container: a full quit journey driven
//! through actions and daily ticks, the way a UI surface would.

use quitmate_core::calendar::{local_date, DAY_MS};
use quitmate_core::evolution::CompanionLevel;
use quitmate_core::state::QuitReason;
use quitmate_core::store::{days_smoke_free, Action, Tracker};
use quitmate_core::Event;

const T0: i64 = 1_700_000_000_000;

fn onboard(tracker: &mut Tracker, now_ms: i64) {
    tracker.dispatch(
        Action::CompleteOnboarding {
            cigs_per_day: 20,
            pack_price_cents: 500,
            reason: QuitReason::Money,
            age: 32,
            years_smoking: 12,
        },
        now_ms,
    );
}

#[test]
fn a_clean_month_climbs_to_divine() {
    let mut tracker = Tracker::new(T0);
    onboard(&mut tracker, T0);

    let mut level_changes = Vec::new();
    for day in 1..=24 {
        let now = T0 + day * DAY_MS;
        for event in tracker.tick(now) {
            if let Event::CompanionLevelChanged { to, .. } = event {
                level_changes.push((day, to));
            }
        }
        // Extra ticks within the day never double-apply the daily step.
        tracker.tick(now + 1000);
        tracker.tick(now + 2000);
    }

    // Targets 3/3/3/5/10: promotions land on days 3, 6, 9, 14, 24.
    assert_eq!(
        level_changes,
        vec![
            (3, CompanionLevel::HealthyPet),
            (6, CompanionLevel::Sporty),
            (9, CompanionLevel::Wealthy),
            (14, CompanionLevel::DiamondLungs),
            (24, CompanionLevel::Divine),
        ]
    );

    let snap = tracker.snapshot(T0 + 24 * DAY_MS);
    assert_eq!(snap.level, CompanionLevel::Divine);
    assert_eq!(snap.days_smoke_free, 25);
    assert_eq!(snap.best_streak_days, 25);
    // A pack a day at 5.00 for 24 days.
    assert_eq!(snap.saved_cents, 12_000);
}

#[test]
fn slipping_one_day_costs_progress_but_not_the_level() {
    let mut tracker = Tracker::new(T0);
    onboard(&mut tracker, T0);

    // Two clean days of progress at Sick.
    tracker.tick(T0 + DAY_MS);
    tracker.tick(T0 + 2 * DAY_MS);

    // Later on day 2: a full pack, logged as it happens.
    let slip_ts = T0 + 2 * DAY_MS + 600_000;
    for _ in 0..20 {
        tracker.dispatch(
            Action::RegisterCigarette {
                date: None,
                amount: 1,
            },
            slip_ts,
        );
    }
    // Sick is the floor: no demotion possible.
    let snap = tracker.snapshot(slip_ts);
    assert_eq!(snap.level, CompanionLevel::Sick);
    assert_eq!(snap.cigarettes_today, 20);

    // Next day's rollover judges the slip day: progress decays.
    let events = tracker.tick(T0 + 3 * DAY_MS);
    assert!(!events
        .iter()
        .any(|e| matches!(e, Event::CompanionLevelChanged { .. })));
    let snap = tracker.snapshot(T0 + 3 * DAY_MS);
    assert_eq!(snap.level_progress_numerator, 1);
    assert_eq!(snap.level_streak_days, 0);
}

#[test]
fn smoking_resets_streak_and_money_but_keeps_the_record() {
    let mut tracker = Tracker::new(T0);
    onboard(&mut tracker, T0);

    let day3 = T0 + 3 * DAY_MS;
    tracker.tick(day3);
    assert_eq!(tracker.state().progress.best_streak_days, 4);

    let events = tracker.dispatch(
        Action::RegisterCigarette {
            date: None,
            amount: 1,
        },
        day3 + 1000,
    );
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::CigaretteLogged { cost_cents: 25, .. })));

    assert_eq!(days_smoke_free(tracker.state(), day3 + 1000), 1);
    assert_eq!(tracker.state().progress.best_streak_days, 4);

    // 1500 accrued over three days, minus the cigarette, counted twice:
    // once out of the checkpoint, once in the spent ledger.
    assert_eq!(tracker.snapshot(day3 + 1000).saved_cents, 1450);
}

#[test]
fn milestones_fire_in_order_and_once() {
    let mut tracker = Tracker::new(T0);
    onboard(&mut tracker, T0);

    let mut milestones = Vec::new();
    for day in 1..=6 {
        for event in tracker.tick(T0 + day * DAY_MS) {
            if let Event::MilestoneReached { milestone_cents, .. } = event {
                milestones.push(milestone_cents);
            }
        }
    }
    // 500 cents/day: crossings at days 2, 4, 6.
    assert_eq!(milestones, vec![1000, 2000, 3000]);
}

#[test]
fn backfilled_smoking_replays_the_missed_day() {
    let mut tracker = Tracker::new(T0);
    onboard(&mut tracker, T0);

    // Two days later the user backfills yesterday's ten cigarettes.
    let now = T0 + 2 * DAY_MS;
    let yesterday = local_date(now - DAY_MS);
    tracker.dispatch(
        Action::RegisterCigarette {
            date: Some(yesterday),
            amount: 10,
        },
        now,
    );
    assert_eq!(tracker.state().progress.cigarettes_on(yesterday), 10);

    // The next tick still runs today's rollover: 10 < 20 is a success.
    tracker.tick(now + 1000);
    let snap = tracker.snapshot(now + 1000);
    assert!(snap.level_progress_numerator >= 1);
}

#[test]
fn the_full_shop_flow_spends_only_spendable_money() {
    let mut tracker = Tracker::new(T0);
    onboard(&mut tracker, T0);

    // Day 4: 2000 cents in the jar.
    let now = T0 + 4 * DAY_MS;
    assert!(!tracker.buy_pet("hopper", 2000, T0 + DAY_MS));
    assert!(tracker.buy_pet("hopper", 2000, now));
    assert!(!tracker.buy_treat(1, now));

    let snap = tracker.snapshot(now);
    assert_eq!(snap.available_cents, 0);
    assert_eq!(snap.saved_cents, 2000);
    assert_eq!(snap.active_pet_id.as_deref(), Some("hopper"));
}
