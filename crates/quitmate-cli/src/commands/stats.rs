use clap::Subcommand;
use quitmate_core::calendar::{self, DAY_MS};
use quitmate_core::health::{health_metrics, HealthProfile};
use quitmate_core::stats::weekly_stats;

use super::common;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Trailing-week consumption
    Week,
    /// Recovery metrics
    Health,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (_file, tracker) = common::load()?;
    let state = tracker.state();
    let now = calendar::now_ms();

    match action {
        StatsAction::Week => {
            let stats = weekly_stats(&state.progress.cigarettes_smoked, now);
            for day in &stats.week_days {
                println!("{}  {}", day.date, "#".repeat(day.count as usize));
            }
            println!(
                "today {}  week {}  avg {:.1}/day",
                stats.today, stats.week_total, stats.week_average
            );
        }
        StatsAction::Health => {
            let elapsed_days =
                (now - state.progress.smoke_free_start_ts).max(0) as f64 / DAY_MS as f64;
            let metrics = health_metrics(&HealthProfile {
                elapsed_days,
                cigs_per_day: state.settings.cigs_per_day,
                years_smoking: state.settings.years_smoking,
                age: state.settings.age,
                cigarettes_today: state.progress.cigarettes_on(calendar::local_date(now)),
            });
            println!("oxygen  {:>3}%", metrics.oxygen);
            println!("energy  {:>3}%", metrics.energy);
            println!("taste   {:>3}%", metrics.taste);
            println!("lungs   {:>3}%", metrics.lungs);
        }
    }

    Ok(())
}
