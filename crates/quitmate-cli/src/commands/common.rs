//! Shared plumbing for the command modules.

use clap::ValueEnum;
use quitmate_core::calendar;
use quitmate_core::money::Currency;
use quitmate_core::state::{Mood, QuitReason};
use quitmate_core::{Event, StateFile, Tracker};

/// Load the tracker from the state document.
pub fn load() -> Result<(StateFile, Tracker), Box<dyn std::error::Error>> {
    let file = StateFile::open()?;
    let tracker = Tracker::from_state(file.load(calendar::now_ms()));
    Ok((file, tracker))
}

/// Persist the tracker if anything changed. Write errors are dropped --
/// losing one save is better than failing the command.
pub fn save_if_dirty(file: &StateFile, tracker: &mut Tracker) {
    if tracker.take_dirty() {
        let _ = file.save(tracker.state());
    }
}

/// Print events as one-per-line JSON.
pub fn print_events(events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

// clap-facing mirrors of the core enums.

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoodArg {
    Zen,
    Anxious,
    Red,
}

impl From<MoodArg> for Mood {
    fn from(value: MoodArg) -> Self {
        match value {
            MoodArg::Zen => Mood::Zen,
            MoodArg::Anxious => Mood::Anxious,
            MoodArg::Red => Mood::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReasonArg {
    Money,
    Health,
    Breath,
}

impl From<ReasonArg> for QuitReason {
    fn from(value: ReasonArg) -> Self {
        match value {
            ReasonArg::Money => QuitReason::Money,
            ReasonArg::Health => QuitReason::Health,
            ReasonArg::Breath => QuitReason::Breath,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CurrencyArg {
    Eur,
    Usd,
    Gbp,
    Mxn,
}

impl From<CurrencyArg> for Currency {
    fn from(value: CurrencyArg) -> Self {
        match value {
            CurrencyArg::Eur => Currency::Eur,
            CurrencyArg::Usd => Currency::Usd,
            CurrencyArg::Gbp => Currency::Gbp,
            CurrencyArg::Mxn => Currency::Mxn,
        }
    }
}
