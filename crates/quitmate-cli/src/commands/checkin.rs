use clap::Args;
use quitmate_core::calendar;
use quitmate_core::store::Action;

use super::common::{self, MoodArg};

#[derive(Args)]
pub struct CheckinArgs {
    /// How you feel today
    #[arg(long, value_enum)]
    pub mood: MoodArg,
}

pub fn run(args: CheckinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;
    let events = tracker.dispatch(
        Action::MarkCheckin {
            mood: args.mood.into(),
        },
        calendar::now_ms(),
    );
    common::save_if_dirty(&file, &mut tracker);
    common::print_events(&events)
}
