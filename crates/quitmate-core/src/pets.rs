//! Built-in companion pet catalog.
//!
//! Pets are bought with the spendable balance (never with real money) and
//! keep the companion company on screen. The catalog is fixed; ownership
//! and selection live in [`crate::state::Progress`].

use serde::{Deserialize, Serialize};

/// Catalog tier, for grouping in the shop UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetTier {
    Bronze,
    Silver,
    Gold,
}

/// A purchasable companion pet. The catalog is compiled in, so this only
/// ever serializes (for `--json` style output).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: &'static str,
    pub tier: PetTier,
    pub name: &'static str,
    pub price_cents: i64,
    pub emoji: &'static str,
    /// One-liner shown on the shop card.
    pub motivator: &'static str,
}

/// The built-in catalog.
pub fn builtin_pets() -> Vec<Pet> {
    vec![
        Pet {
            id: "hopper",
            tier: PetTier::Bronze,
            name: "Hopper the Rabbit",
            price_cents: 2000,
            emoji: "\u{1f430}",
            motivator: "A bouncy friend for the road ahead.",
        },
        Pet {
            id: "rex",
            tier: PetTier::Bronze,
            name: "Baby Rex",
            price_cents: 2000,
            emoji: "\u{1f996}",
            motivator: "Small, but with a mighty roar.",
        },
        Pet {
            id: "scout",
            tier: PetTier::Silver,
            name: "Scout the Pup",
            price_cents: 2000,
            emoji: "\u{1f436}",
            motivator: "Will never leave your side on this path.",
        },
        Pet {
            id: "whiskers",
            tier: PetTier::Gold,
            name: "Mystic Whiskers",
            price_cents: 2000,
            emoji: "\u{1f431}",
            motivator: "Nine lives -- take good care of yours!",
        },
    ]
}

/// Look up a catalog pet by id.
pub fn find_pet(id: &str) -> Option<Pet> {
    builtin_pets().into_iter().find(|p| p.id == id)
}
