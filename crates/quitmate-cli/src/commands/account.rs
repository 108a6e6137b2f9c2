use clap::{Args, Subcommand};
use quitmate_core::calendar;
use quitmate_core::store::Action;

use super::common;

#[derive(Subcommand)]
pub enum AccountAction {
    /// Log in (demo build: any credentials are accepted)
    Login(LoginArgs),
    /// Log out
    Logout,
    /// Delete the account and wipe local data
    Delete {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

pub fn run(action: AccountAction) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;
    let now = calendar::now_ms();

    match action {
        AccountAction::Login(args) => {
            // Demo auth: the password is required by the form, not checked.
            let _ = args.password;
            let events = tracker.dispatch(Action::Login { email: args.email }, now);
            common::save_if_dirty(&file, &mut tracker);
            common::print_events(&events)?;
        }
        AccountAction::Logout => {
            let events = tracker.dispatch(Action::Logout, now);
            common::save_if_dirty(&file, &mut tracker);
            common::print_events(&events)?;
        }
        AccountAction::Delete { yes } => {
            if !yes {
                println!("This wipes all local data. Re-run with --yes to confirm.");
                return Ok(());
            }
            let events = tracker.dispatch(Action::DeleteAccount, now);
            // Best-effort wipe-and-rewrite, mirroring the in-memory reset.
            let _ = file.clear();
            let _ = file.save(tracker.state());
            tracker.take_dirty();
            common::print_events(&events)?;
        }
    }

    Ok(())
}
