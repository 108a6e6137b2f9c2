use chrono::NaiveDate;
use clap::Args;
use quitmate_core::calendar;
use quitmate_core::store::Action;

use super::common;

#[derive(Args)]
pub struct SmokeArgs {
    /// How many cigarettes (negative undoes earlier entries)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub count: i32,
    /// Day to log against, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: SmokeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;
    let events = tracker.dispatch(
        Action::RegisterCigarette {
            date: args.date,
            amount: args.count,
        },
        calendar::now_ms(),
    );
    common::save_if_dirty(&file, &mut tracker);
    common::print_events(&events)
}
