//! # Quitmate Core Library
//!
//! This library provides the core business logic for Quitmate, a smoking
//! cessation tracker. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with graphical
//! surfaces being thin layers over the same core library.
//!
//! ## Architecture
//!
//! - **Savings**: checkpoint-based accrual -- figures are derived from a
//!   frozen base plus elapsed wall-clock time times a rate, never from a
//!   ticking counter
//! - **Evolution**: a day-granular state machine advancing a companion
//!   through six stages based on daily cigarette consumption
//! - **Store**: a reducer-style state container owning the single
//!   application state document; callers drive it with actions and a
//!   periodic tick
//! - **Storage**: single-document JSON persistence with versioned
//!   migration, plus TOML-based app preferences
//! - **Purchases**: RevenueCat-backed premium flow with the load-bearing
//!   demo fallback (any failure unlocks premium)
//!
//! ## Key Components
//!
//! - [`Tracker`]: the state container
//! - [`evolution::evaluate`]: the companion transition function
//! - [`StateFile`]: state document persistence
//! - [`Config`]: application preferences

pub mod calendar;
pub mod error;
pub mod events;
pub mod evolution;
pub mod health;
pub mod money;
pub mod notifications;
pub mod pets;
pub mod purchases;
pub mod savings;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;

pub use error::{ConfigError, CoreError, PurchaseError, StorageError, ValidationError};
pub use events::Event;
pub use evolution::{CompanionLevel, EvolutionState};
pub use state::{AppState, Checkin, Mood, Premium, Progress, QuitReason, Settings, SettingsPatch};
pub use storage::{Config, StateFile};
pub use store::{Action, Snapshot, Tracker};
