use quitmate_core::money::format_cents;
use quitmate_core::notifications::plan_reminders;
use quitmate_core::{calendar, Config};

use super::common;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;
    let now = calendar::now_ms();

    // Bring the day-dependent state up to date before reporting.
    tracker.tick(now);
    common::save_if_dirty(&file, &mut tracker);

    let snapshot = tracker.snapshot(now);
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let currency = tracker.state().settings.currency;
    if !snapshot.onboarding_completed {
        println!("Not onboarded yet. Run `quitmate-cli onboard --help` to start.");
        return Ok(());
    }

    println!("Saved:       {}", format_cents(snapshot.saved_cents, currency));
    println!(
        "Spendable:   {}",
        format_cents(snapshot.available_cents, currency)
    );
    println!(
        "Rate:        {} / day",
        format_cents(snapshot.daily_spend_cents, currency)
    );
    println!(
        "Smoke-free:  day {} (best {})",
        snapshot.days_smoke_free, snapshot.best_streak_days
    );
    println!(
        "Companion:   {} ({}/{}, streak {})",
        snapshot.level.label(),
        snapshot.level_progress_numerator,
        snapshot.level_progress_denominator,
        snapshot.level_streak_days
    );
    if snapshot.cigarettes_today > 0 {
        println!("Today:       {} cigarettes logged", snapshot.cigarettes_today);
    }
    if let Some(pet) = &snapshot.active_pet_id {
        println!("Pet:         {pet}");
    }

    let config = Config::load_or_default();
    let plan = plan_reminders(tracker.state(), &config.notifications, now);
    println!(
        "Milestone:   {} to go until {}",
        format_cents(plan.cents_to_next_milestone, currency),
        format_cents(plan.next_milestone_cents, currency)
    );
    if plan.checkin_due {
        println!("Reminder:    daily check-in pending");
    }

    Ok(())
}
