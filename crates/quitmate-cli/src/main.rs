use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "quitmate-cli", version, about = "Quitmate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the quit journey
    Onboard(commands::onboard::OnboardArgs),
    /// Savings, streak and companion status
    Status {
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log cigarettes (negative count undoes entries)
    Smoke(commands::smoke::SmokeArgs),
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Pet shop
    Pet {
        #[command(subcommand)]
        action: commands::pet::PetAction,
    },
    /// Premium subscription
    Premium {
        #[command(subcommand)]
        action: commands::premium::PremiumAction,
    },
    /// Daily mood check-in
    Checkin(commands::checkin::CheckinArgs),
    /// Consumption and recovery stats
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Account management
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Reset progress (keeps the best-streak record)
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Run the periodic tick loop and print events
    Watch(commands::watch::WatchArgs),
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Onboard(args) => commands::onboard::run(args),
        Commands::Status { json } => commands::status::run(json),
        Commands::Smoke(args) => commands::smoke::run(args),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Pet { action } => commands::pet::run(action),
        Commands::Premium { action } => commands::premium::run(action),
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Account { action } => commands::account::run(action),
        Commands::Reset { yes } => commands::reset::run(yes),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
