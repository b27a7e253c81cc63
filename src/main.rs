use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use secure_bank::{Args, Atm, Config, TerminalPrompter};

fn main() -> Result<()> {
    let config = Config::from(Args::parse());
    init_logging(&config)?;

    tracing::info!(
        version = secure_bank::VERSION,
        bank = config.bank_name.as_str(),
        policy = ?config.duplicate_policy,
        "starting"
    );

    let prompter = TerminalPrompter::new(config.mask_pin);
    if config.mask_pin && !prompter.masks_secrets() {
        tracing::debug!("PIN masking unavailable, reading PIN as a plain line");
    }

    let mut atm = Atm::new(config, prompter);
    atm.run().context("banking session ended unexpectedly")?;

    Ok(())
}

// Logs go to stderr so they never mix with the menu on stdout
fn init_logging(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level '{}'", config.log_level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
