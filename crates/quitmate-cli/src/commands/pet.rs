use clap::Subcommand;
use quitmate_core::money::format_cents;
use quitmate_core::pets::{builtin_pets, find_pet};
use quitmate_core::store::Action;
use quitmate_core::calendar;

use super::common;

#[derive(Subcommand)]
pub enum PetAction {
    /// List the catalog with prices and ownership
    List,
    /// Buy a pet with your spendable savings
    Buy { id: String },
    /// Select an owned pet (omit the id to deselect)
    Select { id: Option<String> },
}

pub fn run(action: PetAction) -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut tracker) = common::load()?;
    let now = calendar::now_ms();

    match action {
        PetAction::List => {
            let currency = tracker.state().settings.currency;
            let owned = &tracker.state().progress.owned_pets;
            let active = tracker.state().progress.active_pet_id.clone();
            for pet in builtin_pets() {
                let mark = if active.as_deref() == Some(pet.id) {
                    "*"
                } else if owned.iter().any(|p| p == pet.id) {
                    "+"
                } else {
                    " "
                };
                println!(
                    "{mark} {:<10} {:<18} {:>10}  {}",
                    pet.id,
                    pet.name,
                    format_cents(pet.price_cents, currency),
                    pet.motivator
                );
            }
        }
        PetAction::Buy { id } => {
            let pet = find_pet(&id).ok_or_else(|| format!("unknown pet: {id}"))?;
            if tracker.buy_pet(pet.id, pet.price_cents, now) {
                println!("{} is yours! {}", pet.name, pet.emoji);
            } else {
                let available = tracker.snapshot(now).available_cents;
                let currency = tracker.state().settings.currency;
                println!(
                    "Cannot buy {} -- already owned or not enough savings ({} available).",
                    pet.name,
                    format_cents(available, currency)
                );
            }
        }
        PetAction::Select { id } => {
            let events = tracker.dispatch(Action::SetActivePet { pet_id: id.clone() }, now);
            if events.is_empty() {
                println!("Nothing changed -- you can only select a pet you own.");
            } else {
                common::print_events(&events)?;
            }
        }
    }

    common::save_if_dirty(&file, &mut tracker);
    Ok(())
}
