// Session / Login
//
// A Session is the period between a successful login and logout. It holds the
// registry mutably for its whole lifetime, so nothing else can reshape the
// registry while an account is bound to the transaction loop.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::entities::{Account, AccountId, AccountRegistry};
use crate::error::{BankError, Result};

/// Authenticate against the registry.
///
/// Looks up the first account with `account_number`, then compares `pin` as
/// plain text. Unknown numbers fail with `AccountNotFound` before the PIN is
/// looked at; a known number with the wrong PIN fails with `InvalidPin`.
/// Retries are unlimited.
pub fn login<'r>(
    registry: &'r mut AccountRegistry,
    account_number: &str,
    pin: &str,
) -> Result<Session<'r>> {
    let position = match registry.find_by_account_number(account_number) {
        Some(position) => position,
        None => {
            warn!(account_number, "login failed: account not found");
            return Err(BankError::AccountNotFound);
        }
    };

    let account = registry
        .get_at(position)
        .ok_or(BankError::AccountNotFound)?;

    if !account.verify_pin(pin) {
        warn!(account_number, "login failed: incorrect PIN");
        return Err(BankError::InvalidPin);
    }

    let account_id = account.id();
    info!(%account_id, account_number, position, "login succeeded");

    Ok(Session {
        registry,
        account_id,
        login_position: position,
        opened_at: Utc::now(),
    })
}

/// One authenticated account bound to the transaction loop
#[derive(Debug)]
pub struct Session<'r> {
    registry: &'r mut AccountRegistry,
    account_id: AccountId,
    login_position: usize,
    opened_at: DateTime<Utc>,
}

impl<'r> Session<'r> {
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Registry position the account had when the session was opened
    pub fn login_position(&self) -> usize {
        self.login_position
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn account(&self) -> Result<&Account> {
        self.registry
            .get(&self.account_id)
            .ok_or(BankError::AccountNotFound)
    }

    fn account_mut(&mut self) -> Result<&mut Account> {
        self.registry
            .get_mut(&self.account_id)
            .ok_or(BankError::AccountNotFound)
    }

    /// Deposit and return the new balance
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        let account = self.account_mut()?;
        account.deposit(amount)?;
        Ok(account.check_balance())
    }

    /// Withdraw and return the new balance; balance is unchanged on error
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal> {
        let account_id = self.account_id;
        let account = self.account_mut()?;
        if let Err(err) = account.withdraw(amount) {
            warn!(%account_id, %amount, error = %err, "withdrawal rejected");
            return Err(err);
        }
        Ok(account.check_balance())
    }

    pub fn check_balance(&self) -> Result<Decimal> {
        Ok(self.account()?.check_balance())
    }

    /// End the session and remove its account from the registry.
    ///
    /// Removal goes by identity, not by the position seen at login.
    pub fn logout(self) -> Result<Account> {
        let removed = self
            .registry
            .remove(&self.account_id)
            .ok_or(BankError::AccountNotFound)?;

        let duration = Utc::now().signed_duration_since(self.opened_at);
        info!(
            account_id = %self.account_id,
            account_number = removed.account_number(),
            session_ms = duration.num_milliseconds(),
            remaining = self.registry.len(),
            "logged out, account removed"
        );
        Ok(removed)
    }
}
