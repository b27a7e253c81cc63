// Runtime configuration from the command line
//
// Nothing is read from files or the environment here; RUST_LOG is handled by
// the log filter in main.

use clap::Parser;

use crate::entities::DuplicatePolicy;

pub const DEFAULT_BANK_NAME: &str = "SecureBank CLI";
pub const DEFAULT_CURRENCY: &str = "$";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Interactive in-memory banking simulator
#[derive(Parser, Debug)]
#[command(name = "secure-bank", version, about)]
pub struct Args {
    /// Name shown in the welcome banner and menu headers
    #[arg(long, default_value = DEFAULT_BANK_NAME)]
    pub bank_name: String,

    /// Currency symbol used in prompts and balances
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Echo the PIN while typing instead of masking it with '*'
    #[arg(long)]
    pub no_mask: bool,

    /// Refuse to create a second account with an existing account number
    #[arg(long)]
    pub unique_account_numbers: bool,

    /// Log level when RUST_LOG is not set (logs go to stderr)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bank_name: String,
    pub currency_symbol: String,
    pub mask_pin: bool,
    pub duplicate_policy: DuplicatePolicy,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bank_name: DEFAULT_BANK_NAME.to_string(),
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            mask_pin: true,
            duplicate_policy: DuplicatePolicy::Allow,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            bank_name: args.bank_name,
            currency_symbol: args.currency,
            mask_pin: !args.no_mask,
            duplicate_policy: if args.unique_account_numbers {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::Allow
            },
            log_level: args.log_level,
        }
    }
}
