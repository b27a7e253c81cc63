// SecureBank - Core Library
// In-memory accounts, login sessions and the menu loops, usable from the CLI
// binary and from tests

pub mod atm;
pub mod config;
pub mod entities;
pub mod error;
pub mod menu;
pub mod money;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use atm::{Atm, Flow};
pub use config::{Args, Config};
pub use entities::{Account, AccountId, AccountRegistry, DuplicatePolicy};
pub use error::{BankError, Result};
pub use menu::{MainMenuChoice, TransactionChoice};
pub use money::{format_amount, parse_amount};
pub use prompt::{LinePrompter, Prompter, TerminalPrompter};
pub use session::{login, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
