use anyhow::{Context, Result};
use std::process::Command;
use tracing::info;

/// Open a booking page with the platform's default browser.
pub fn open_in_browser(url: &str) -> Result<()> {
    info!("Opening booking page {}", url);

    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    command
        .arg(url)
        .spawn()
        .with_context(|| format!("Failed to open {}", url))?;

    Ok(())
}
