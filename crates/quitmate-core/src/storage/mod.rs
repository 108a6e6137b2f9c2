pub mod config;
pub mod migrate;
pub mod state_file;

pub use config::Config;
pub use state_file::StateFile;

use std::path::PathBuf;

/// Returns `~/.config/quitmate[-dev]/` based on QUITMATE_ENV.
///
/// Set QUITMATE_ENV=dev to use the development data directory, or
/// QUITMATE_DATA_DIR to point at an explicit directory (tests use this).
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = if let Ok(explicit) = std::env::var("QUITMATE_DATA_DIR") {
        PathBuf::from(explicit)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("QUITMATE_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("quitmate-dev")
        } else {
            base_dir.join("quitmate")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
