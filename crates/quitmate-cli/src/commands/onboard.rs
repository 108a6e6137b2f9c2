use clap::Args;
use quitmate_core::calendar;
use quitmate_core::state::SettingsPatch;
use quitmate_core::store::Action;

use super::common::{self, CurrencyArg, ReasonArg};

#[derive(Args)]
pub struct OnboardArgs {
    /// Cigarettes smoked per day before quitting
    #[arg(long)]
    pub cigs_per_day: u32,
    /// Pack price in cents
    #[arg(long)]
    pub pack_price_cents: i64,
    /// Why you are quitting
    #[arg(long, value_enum)]
    pub reason: ReasonArg,
    #[arg(long)]
    pub age: u32,
    #[arg(long)]
    pub years_smoking: u32,
    /// Cigarettes per pack (default 20)
    #[arg(long)]
    pub cigs_per_pack: Option<u32>,
    /// Display currency (default EUR)
    #[arg(long, value_enum)]
    pub currency: Option<CurrencyArg>,
}

pub fn run(args: OnboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;
    let now = calendar::now_ms();

    let mut events = tracker.dispatch(
        Action::CompleteOnboarding {
            cigs_per_day: args.cigs_per_day,
            pack_price_cents: args.pack_price_cents,
            reason: args.reason.into(),
            age: args.age,
            years_smoking: args.years_smoking,
        },
        now,
    );

    // Pack size and currency are not part of the onboarding questions;
    // fold them in as a settings patch when given.
    if args.cigs_per_pack.is_some() || args.currency.is_some() {
        let patch = SettingsPatch {
            cigs_per_pack: args.cigs_per_pack,
            currency: args.currency.map(Into::into),
            ..SettingsPatch::default()
        };
        events.extend(tracker.dispatch(Action::UpdateSettings { patch }, now));
    }

    common::save_if_dirty(&file, &mut tracker);
    common::print_events(&events)
}
