use anyhow::Result;
use owo_colors::OwoColorize;
use scheduler_core::config::SchedulerConfig;

pub fn run() -> Result<()> {
    let path = SchedulerConfig::config_path()?;

    if path.exists() {
        println!("{} {}", "Config already exists:".dimmed(), path.display());
        return Ok(());
    }

    SchedulerConfig::create_default_config(&path)?;
    println!("Created {}", path.display());
    Ok(())
}
