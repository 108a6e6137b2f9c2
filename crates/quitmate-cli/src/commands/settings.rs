use clap::{Args, Subcommand};
use quitmate_core::calendar;
use quitmate_core::state::SettingsPatch;
use quitmate_core::store::Action;

use super::common::{self, CurrencyArg, ReasonArg};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings as JSON
    Show,
    /// Update settings (only the given flags change)
    Set(SetArgs),
}

#[derive(Args)]
pub struct SetArgs {
    #[arg(long)]
    pub cigs_per_day: Option<u32>,
    #[arg(long)]
    pub pack_price_cents: Option<i64>,
    #[arg(long)]
    pub cigs_per_pack: Option<u32>,
    #[arg(long, value_enum)]
    pub reason: Option<ReasonArg>,
    #[arg(long, value_enum)]
    pub currency: Option<CurrencyArg>,
    #[arg(long)]
    pub motivation_beast: Option<bool>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub years_smoking: Option<u32>,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;

    match action {
        SettingsAction::Show => {
            println!(
                "{}",
                serde_json::to_string_pretty(&tracker.state().settings)?
            );
        }
        SettingsAction::Set(args) => {
            let patch = SettingsPatch {
                cigs_per_day: args.cigs_per_day,
                pack_price_cents: args.pack_price_cents,
                cigs_per_pack: args.cigs_per_pack,
                reason: args.reason.map(Into::into),
                currency: args.currency.map(Into::into),
                motivation_beast: args.motivation_beast,
                age: args.age,
                years_smoking: args.years_smoking,
            };
            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            let events = tracker.dispatch(
                Action::UpdateSettings { patch },
                calendar::now_ms(),
            );
            common::save_if_dirty(&file, &mut tracker);
            common::print_events(&events)?;
        }
    }

    Ok(())
}
