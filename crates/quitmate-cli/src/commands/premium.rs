use clap::Subcommand;
use quitmate_core::calendar;
use quitmate_core::purchases::{
    restore_with_fallback, unlock_with_fallback, Package, PurchaseProvider, RevenueCatClient,
};
use quitmate_core::store::Action;
use quitmate_core::Config;

use super::common;

/// API key for the purchase service; absence triggers the demo fallback.
const API_KEY_ENV: &str = "QUITMATE_RC_API_KEY";

#[derive(Subcommand)]
pub enum PremiumAction {
    /// Show whether premium is active
    Status,
    /// List available offerings from the store
    Offerings,
    /// Purchase premium (any service failure unlocks it anyway)
    Unlock,
    /// Restore a previous purchase
    Restore,
}

fn provider() -> RevenueCatClient {
    let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
    let mut config = Config::load_or_default();
    RevenueCatClient::new(api_key, config.install_id())
}

pub fn run(action: PremiumAction) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;
    let now = calendar::now_ms();

    match action {
        PremiumAction::Status => {
            let active = tracker.state().premium.active;
            println!("Premium: {}", if active { "active" } else { "inactive" });
        }
        PremiumAction::Offerings => {
            let client = provider();
            let runtime = tokio::runtime::Runtime::new()?;
            match runtime.block_on(client.offerings()) {
                Ok(offerings) if !offerings.is_empty() => {
                    for offering in offerings {
                        println!("{}", offering.identifier);
                        for package in offering.packages {
                            println!("  {} ({})", package.identifier, package.product_id);
                        }
                    }
                }
                Ok(_) => println!("No offerings available."),
                Err(e) => println!("Store unavailable ({e}); demo mode applies."),
            }
        }
        PremiumAction::Unlock => {
            let client = provider();
            let package = Package {
                identifier: "$rc_annual".into(),
                product_id: "quitmate_premium_yearly".into(),
            };
            let runtime = tokio::runtime::Runtime::new()?;
            let active = runtime.block_on(unlock_with_fallback(&client, &package));
            let events = tracker.dispatch(Action::SetPremiumActive { active }, now);
            common::print_events(&events)?;
            println!("Premium: {}", if active { "active" } else { "inactive" });
        }
        PremiumAction::Restore => {
            let client = provider();
            let runtime = tokio::runtime::Runtime::new()?;
            let active = runtime.block_on(restore_with_fallback(&client));
            let events = tracker.dispatch(Action::SetPremiumActive { active }, now);
            common::print_events(&events)?;
            println!("Premium: {}", if active { "active" } else { "inactive" });
        }
    }

    common::save_if_dirty(&file, &mut tracker);
    Ok(())
}
