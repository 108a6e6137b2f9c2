use quitmate_core::calendar;
use quitmate_core::store::Action;

use super::common;

pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        println!("This restarts your progress (the best-streak record is kept).");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }

    let (file, mut tracker) = common::load()?;
    let events = tracker.dispatch(Action::ResetProgress, calendar::now_ms());
    common::save_if_dirty(&file, &mut tracker);
    common::print_events(&events)
}
