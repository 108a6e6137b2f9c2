//! The periodic poll loop: tick once a second, print events, persist
//! lazily. This is the explicit stand-in for the 1-second UI refresh.

use std::time::{Duration, Instant};

use clap::Args;
use quitmate_core::calendar::{self, local_date};
use quitmate_core::notifications::plan_reminders;
use quitmate_core::Config;

use super::common;

#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between ticks
    #[arg(long, default_value_t = 1)]
    pub interval_secs: u64,
    /// Stop after this many ticks (runs forever when omitted)
    #[arg(long)]
    pub ticks: Option<u64>,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;
    let config = Config::load_or_default();
    let debounce = Duration::from_millis(config.autosave.debounce_ms);

    let mut last_save = Instant::now();
    let mut pending_save = false;
    let mut last_reminder_date = None;
    let mut remaining = args.ticks;

    loop {
        let now = calendar::now_ms();
        let events = tracker.tick(now);
        common::print_events(&events)?;

        let plan = plan_reminders(tracker.state(), &config.notifications, now);
        let today = local_date(now);
        if plan.checkin_due && last_reminder_date != Some(today) {
            println!("reminder: daily check-in pending");
            last_reminder_date = Some(today);
        }

        // Debounced, best-effort persistence.
        if tracker.take_dirty() {
            pending_save = true;
        }
        if pending_save && last_save.elapsed() >= debounce {
            let _ = file.save(tracker.state());
            last_save = Instant::now();
            pending_save = false;
        }

        if let Some(ref mut n) = remaining {
            *n = n.saturating_sub(1);
            if *n == 0 {
                break;
            }
        }
        std::thread::sleep(Duration::from_secs(args.interval_secs.max(1)));
    }

    // Flush whatever is still unsaved before leaving.
    if pending_save {
        let _ = file.save(tracker.state());
    }
    Ok(())
}
