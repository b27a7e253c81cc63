// ATM interaction loops
//
// Top level:    MainMenu → CreateAccount → MainMenu
//               MainMenu → Login → TransactionLoop → MainMenu
//               MainMenu → Exit
// Transactions: Menu → Deposit | Withdraw | CheckBalance → Menu
//               Menu → Logout (account removed, back to MainMenu)
//
// Every recoverable error is reported and the same menu is shown again.

use tracing::{debug, info};

use crate::config::Config;
use crate::entities::{AccountId, AccountRegistry};
use crate::error::{BankError, Result};
use crate::menu::{numbered, MainMenuChoice, TransactionChoice};
use crate::money::{format_amount, parse_amount};
use crate::prompt::Prompter;
use crate::session::{self, Session};

const CHOICE_PROMPT: &str = "Enter your choice: ";

/// What the top-level loop does after handling one menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Atm<P: Prompter> {
    registry: AccountRegistry,
    prompter: P,
    config: Config,
}

impl<P: Prompter> Atm<P> {
    pub fn new(config: Config, prompter: P) -> Self {
        Atm {
            registry: AccountRegistry::with_policy(config.duplicate_policy),
            prompter,
            config,
        }
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Run the top-level menu until Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(BankError::InputClosed) => {
                    info!("input closed, leaving main menu");
                    break;
                }
                Err(err) if err.is_recoverable() => {
                    report(&mut self.prompter, &self.config, &err)?;
                }
                Err(err) => return Err(err),
            }
        }

        self.prompter.say(&format!(
            "\n👋 Thank you for using {}. Goodbye!",
            self.config.bank_name
        ))?;
        Ok(())
    }

    /// Show the main menu once and handle a single choice
    pub fn step(&mut self) -> Result<Flow> {
        self.prompter
            .say(&format!("\n🏦 Welcome to {} 🏦", self.config.bank_name))?;
        for line in numbered(MainMenuChoice::ALL.iter().map(|c| c.label())) {
            self.prompter.say(&line)?;
        }

        let answer = self.prompter.ask(CHOICE_PROMPT)?;
        match MainMenuChoice::try_from(answer.as_str())? {
            MainMenuChoice::CreateAccount => {
                self.create_account()?;
                Ok(Flow::Continue)
            }
            MainMenuChoice::Login => {
                self.login()?;
                Ok(Flow::Continue)
            }
            MainMenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    /// Prompt for the new account's details and register it
    pub fn create_account(&mut self) -> Result<AccountId> {
        self.prompter.say(&format!(
            "\nWelcome to {} - Create Account",
            self.config.bank_name
        ))?;
        let username = self.prompter.ask("Enter your username: ")?;
        let account_number = self.prompter.ask("Enter account number: ")?;
        let pin = self.prompter.ask_secret("Set your 4-digit PIN: ")?;
        let balance_input = self.prompter.ask(&format!(
            "Enter initial balance: {}",
            self.config.currency_symbol
        ))?;
        let initial_balance = parse_amount(&balance_input, &self.config.currency_symbol)?;

        let id = self
            .registry
            .create_account(username.as_str(), account_number, pin, initial_balance)?;

        self.prompter.say(&format!(
            "\n🎉 Congratulations, {}! Your account has been created successfully!",
            username
        ))?;
        Ok(id)
    }

    /// Authenticate, then hand the session to the transaction loop.
    ///
    /// The PIN is only asked for once the account number is known.
    pub fn login(&mut self) -> Result<()> {
        self.prompter
            .say(&format!("\nWelcome to {} - Login", self.config.bank_name))?;
        let account_number = self.prompter.ask("Enter account number: ")?;
        if self.registry.find_by_account_number(&account_number).is_none() {
            debug!(account_number = account_number.as_str(), "unknown account number");
            return Err(BankError::AccountNotFound);
        }
        let pin = self.prompter.ask_secret("Enter PIN: ")?;

        let session = session::login(&mut self.registry, &account_number, &pin)?;
        let username = session.account()?.username().to_string();
        self.prompter
            .say(&format!("\n🔓 Login successful, {}!", username))?;

        run_transactions(session, &mut self.prompter, &self.config)
    }
}

/// Transaction menu for one session; returns after logout
pub fn run_transactions<P: Prompter>(
    mut session: Session<'_>,
    prompter: &mut P,
    config: &Config,
) -> Result<()> {
    loop {
        prompter.say(&format!("\n{} - Main Menu", config.bank_name))?;
        for line in numbered(TransactionChoice::ALL.iter().map(|c| c.label())) {
            prompter.say(&line)?;
        }

        let answer = prompter.ask(CHOICE_PROMPT)?;
        let choice = match TransactionChoice::try_from(answer.as_str()) {
            Ok(choice) => choice,
            Err(err) => {
                report(prompter, config, &err)?;
                continue;
            }
        };

        if choice == TransactionChoice::Logout {
            session.logout()?;
            prompter.say("\n👋 Logged out successfully.")?;
            return Ok(());
        }

        match perform(&mut session, choice, prompter, config) {
            Ok(()) => {}
            Err(err) if err.is_recoverable() => report(prompter, config, &err)?,
            Err(err) => return Err(err),
        }
    }
}

fn perform<P: Prompter>(
    session: &mut Session<'_>,
    choice: TransactionChoice,
    prompter: &mut P,
    config: &Config,
) -> Result<()> {
    let symbol = config.currency_symbol.as_str();
    match choice {
        TransactionChoice::Deposit => {
            let input = prompter.ask(&format!("Enter amount to deposit: {}", symbol))?;
            let balance = session.deposit(parse_amount(&input, symbol)?)?;
            prompter.say(&format!(
                "\n💰 Deposit successful. Current balance: {}",
                format_amount(symbol, balance)
            ))
        }
        TransactionChoice::Withdraw => {
            let input = prompter.ask(&format!("Enter amount to withdraw: {}", symbol))?;
            let balance = session.withdraw(parse_amount(&input, symbol)?)?;
            prompter.say(&format!(
                "\n💸 Withdrawal successful. Current balance: {}",
                format_amount(symbol, balance)
            ))
        }
        TransactionChoice::CheckBalance => {
            let balance = session.check_balance()?;
            prompter.say(&format!(
                "\n💳 Current balance: {}",
                format_amount(symbol, balance)
            ))
        }
        // Logout consumes the session and is handled by the loop
        TransactionChoice::Logout => Ok(()),
    }
}

/// Customer-facing text for a recoverable error
pub fn user_message(err: &BankError, currency_symbol: &str) -> String {
    match err {
        BankError::AccountNotFound => "🚫 Account not found. Please try again.".to_string(),
        BankError::InvalidPin => "🔒 Incorrect PIN. Please try again.".to_string(),
        BankError::InsufficientBalance { available, .. } => format!(
            "❌ Insufficient balance. Withdrawal failed. Available: {}",
            format_amount(currency_symbol, *available)
        ),
        BankError::InvalidMenuChoice(_) => "❗ Invalid choice. Please try again.".to_string(),
        BankError::MalformedAmount(input) => format!(
            "❗ '{}' is not a valid amount. Enter a number such as 25 or 25.50.",
            input
        ),
        BankError::NonPositiveAmount(_) => "❗ Amount must be greater than zero.".to_string(),
        BankError::AmountTooLarge { .. } => {
            "❗ That amount is too large for this account. Transaction cancelled.".to_string()
        }
        BankError::NegativeOpeningBalance(_) => {
            "❗ Initial balance cannot be negative.".to_string()
        }
        BankError::DuplicateAccountNumber(number) => format!(
            "🚫 Account number {} is already in use. Please choose another.",
            number
        ),
        other => format!("❗ {}", other),
    }
}

fn report<P: Prompter>(prompter: &mut P, config: &Config, err: &BankError) -> Result<()> {
    debug!(error = %err, "reporting recoverable error");
    prompter.say(&format!("\n{}", user_message(err, &config.currency_symbol)))
}
