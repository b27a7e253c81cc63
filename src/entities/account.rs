// 💳 Account Entity + in-memory Account Registry
//
// "Account number is what the customer types, AccountId is who the account is"
//
// - Account number, username and PIN are fixed at creation
// - Balance changes only through deposit/withdraw
// - Internal UUID identity lets logout remove exactly the session's account,
//   even when several accounts share an account number

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{BankError, Result};

// ============================================================================
// ACCOUNT IDENTITY
// ============================================================================

/// Stable internal identity of an account (never shown to the customer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    fn new() -> Self {
        AccountId(Uuid::new_v4())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// One customer account
///
/// Identity: `id` (UUID) plus the customer-facing `account_number`
/// Values: `balance` is the only field that changes after creation
#[derive(Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    username: String,
    account_number: String,
    /// Plain text shared secret, compared verbatim
    pin: String,
    balance: Decimal,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh identity
    pub fn new(
        username: impl Into<String>,
        account_number: impl Into<String>,
        pin: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(BankError::NegativeOpeningBalance(initial_balance));
        }

        Ok(Account {
            id: AccountId::new(),
            username: username.into(),
            account_number: account_number.into(),
            pin: pin.into(),
            balance: initial_balance,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Plain text comparison against the stored PIN
    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin == pin
    }

    /// Add funds. Zero and negative amounts are rejected, and so is a deposit
    /// whose sum does not fit in a `Decimal`; the balance is untouched on error.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::AmountTooLarge {
                amount,
                balance: self.balance,
            })?;
        Ok(())
    }

    /// Take funds out if the balance covers them.
    ///
    /// Withdrawing exactly the balance succeeds and leaves zero. On failure
    /// the balance is untouched.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        if amount > self.balance {
            return Err(BankError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn check_balance(&self) -> Decimal {
        self.balance
    }
}

// PIN stays out of debug output and therefore out of logs
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("account_number", &self.account_number)
            .field("pin", &"****")
            .field("balance", &self.balance)
            .field("created_at", &self.created_at)
            .finish()
    }
}

fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(BankError::NonPositiveAmount(amount));
    }
    Ok(())
}

// ============================================================================
// ACCOUNT REGISTRY
// ============================================================================

/// What `create_account` does when the account number is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep both; lookups resolve to the first one created
    #[default]
    Allow,
    /// Refuse the second account
    Reject,
}

/// Ordered collection of every account for the lifetime of the process
///
/// Owned by the top-level loop and lent to sessions; there is no global
/// instance. Order is creation order, which is what makes first-match lookup
/// deterministic for duplicated account numbers.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
    policy: DuplicatePolicy,
}

impl AccountRegistry {
    /// Create new empty registry that allows duplicate account numbers
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        AccountRegistry {
            accounts: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Construct an account and append it to the registry
    pub fn create_account(
        &mut self,
        username: impl Into<String>,
        account_number: impl Into<String>,
        pin: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<AccountId> {
        let account = Account::new(username, account_number, pin, initial_balance)?;

        if self.find_by_account_number(account.account_number()).is_some() {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(BankError::DuplicateAccountNumber(
                        account.account_number().to_string(),
                    ));
                }
                DuplicatePolicy::Allow => {
                    debug!(
                        account_number = account.account_number(),
                        "account number already registered, earlier account wins lookups"
                    );
                }
            }
        }

        let id = account.id();
        info!(
            %id,
            username = account.username(),
            account_number = account.account_number(),
            "account created"
        );
        self.accounts.push(account);
        Ok(id)
    }

    /// Position of the first account with this number (linear scan)
    pub fn find_by_account_number(&self, account_number: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|acc| acc.account_number == account_number)
    }

    pub fn position_of(&self, id: &AccountId) -> Option<usize> {
        self.accounts.iter().position(|acc| acc.id == *id)
    }

    pub fn get_at(&self, position: usize) -> Option<&Account> {
        self.accounts.get(position)
    }

    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.id == *id)
    }

    pub fn get_mut(&mut self, id: &AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|acc| acc.id == *id)
    }

    /// Remove by position, shifting later accounts down by one
    pub fn remove_at(&mut self, position: usize) -> Option<Account> {
        if position < self.accounts.len() {
            Some(self.accounts.remove(position))
        } else {
            None
        }
    }

    /// Remove by identity, independent of where the account currently sits
    pub fn remove(&mut self, id: &AccountId) -> Option<Account> {
        let position = self.position_of(id)?;
        self.remove_at(position)
    }

    /// Remove the first account with this number
    pub fn remove_by_account_number(&mut self, account_number: &str) -> Option<Account> {
        let position = self.find_by_account_number(account_number)?;
        self.remove_at(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn alice() -> Account {
        Account::new("alice", "123", "1111", dec(100)).unwrap()
    }

    #[test]
    fn test_account_creation() {
        let account = alice();

        assert_eq!(account.username(), "alice");
        assert_eq!(account.account_number(), "123");
        assert_eq!(account.check_balance(), dec(100));
        assert!(account.verify_pin("1111"));
        assert!(!account.verify_pin("1112"));
        assert!(account.created_at() <= Utc::now());
    }

    #[test]
    fn test_account_ids_are_unique() {
        let a = alice();
        let b = alice();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_negative_opening_balance_rejected() {
        let result = Account::new("bob", "456", "2222", dec(-1));
        assert!(matches!(result, Err(BankError::NegativeOpeningBalance(_))));
    }

    #[test]
    fn test_zero_opening_balance_allowed() {
        let account = Account::new("bob", "456", "2222", Decimal::ZERO).unwrap();
        assert_eq!(account.check_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_deposit_adds_to_balance() {
        let mut account = alice();
        account.deposit(dec(50)).unwrap();
        assert_eq!(account.check_balance(), dec(150));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut account = alice();
        assert!(matches!(
            account.deposit(dec(-30)),
            Err(BankError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            account.deposit(Decimal::ZERO),
            Err(BankError::NonPositiveAmount(_))
        ));
        assert_eq!(account.check_balance(), dec(100));
    }

    #[test]
    fn test_deposit_overflow_rejected_without_change() {
        let mut account = Account::new("max", "1", "0000", Decimal::MAX).unwrap();

        let err = account.deposit(dec(1)).unwrap_err();
        match err {
            BankError::AmountTooLarge { amount, balance } => {
                assert_eq!(amount, dec(1));
                assert_eq!(balance, Decimal::MAX);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(account.check_balance(), Decimal::MAX);

        // Still usable afterwards
        account.withdraw(dec(1)).unwrap();
        account.deposit(dec(1)).unwrap();
        assert_eq!(account.check_balance(), Decimal::MAX);
    }

    #[test]
    fn test_withdraw_within_balance() {
        let mut account = alice();
        account.withdraw(dec(40)).unwrap();
        assert_eq!(account.check_balance(), dec(60));
    }

    #[test]
    fn test_withdraw_exact_balance_leaves_zero() {
        let mut account = alice();
        account.withdraw(dec(100)).unwrap();
        assert_eq!(account.check_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_over_balance_fails_without_change() {
        let mut account = alice();
        let err = account.withdraw(dec(101)).unwrap_err();
        match err {
            BankError::InsufficientBalance {
                requested,
                available,
            } => {
                assert_eq!(requested, dec(101));
                assert_eq!(available, dec(100));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(account.check_balance(), dec(100));
    }

    #[test]
    fn test_withdraw_rejects_non_positive() {
        let mut account = alice();
        assert!(matches!(
            account.withdraw(dec(-5)),
            Err(BankError::NonPositiveAmount(_))
        ));
        assert_eq!(account.check_balance(), dec(100));
    }

    #[test]
    fn test_debug_output_hides_pin() {
        let rendered = format!("{:?}", alice());
        assert!(!rendered.contains("1111"));
        assert!(rendered.contains("alice"));
    }

    #[test]
    fn test_registry_create_and_find() {
        let mut registry = AccountRegistry::new();
        assert!(registry.is_empty());

        registry.create_account("alice", "123", "1111", dec(100)).unwrap();
        registry.create_account("bob", "456", "2222", dec(5)).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_by_account_number("123"), Some(0));
        assert_eq!(registry.find_by_account_number("456"), Some(1));
        assert_eq!(registry.find_by_account_number("789"), None);
    }

    #[test]
    fn test_registry_create_rejects_negative_balance() {
        let mut registry = AccountRegistry::new();
        let result = registry.create_account("alice", "123", "1111", dec(-10));
        assert!(matches!(result, Err(BankError::NegativeOpeningBalance(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_duplicates_resolve_to_first() {
        let mut registry = AccountRegistry::new();
        let first = registry.create_account("alice", "999", "1111", dec(1)).unwrap();
        let second = registry.create_account("bob", "999", "2222", dec(2)).unwrap();

        assert_eq!(registry.len(), 2);
        let position = registry.find_by_account_number("999").unwrap();
        assert_eq!(registry.get_at(position).unwrap().id(), first);
        assert_ne!(first, second);
    }

    #[test]
    fn test_registry_reject_policy_refuses_duplicates() {
        let mut registry = AccountRegistry::with_policy(DuplicatePolicy::Reject);
        registry.create_account("alice", "999", "1111", dec(1)).unwrap();

        let result = registry.create_account("bob", "999", "2222", dec(2));
        assert!(matches!(
            result,
            Err(BankError::DuplicateAccountNumber(ref number)) if number == "999"
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.policy(), DuplicatePolicy::Reject);
        assert_eq!(AccountRegistry::new().policy(), DuplicatePolicy::Allow);
    }

    #[test]
    fn test_registry_remove_at_shifts() {
        let mut registry = AccountRegistry::new();
        registry.create_account("a", "1", "0000", dec(1)).unwrap();
        registry.create_account("b", "2", "0000", dec(2)).unwrap();
        registry.create_account("c", "3", "0000", dec(3)).unwrap();

        let removed = registry.remove_at(1).unwrap();
        assert_eq!(removed.account_number(), "2");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_by_account_number("3"), Some(1));
        assert!(registry.remove_at(5).is_none());
    }

    #[test]
    fn test_registry_remove_by_id_leaves_others_untouched() {
        let mut registry = AccountRegistry::new();
        let a = registry.create_account("a", "1", "0000", dec(10)).unwrap();
        let b = registry.create_account("b", "2", "0000", dec(20)).unwrap();
        let before_b = registry.get(&b).unwrap().clone();

        let removed = registry.remove(&a).unwrap();
        assert_eq!(removed.id(), a);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&a).is_none());
        assert_eq!(registry.get(&b).unwrap(), &before_b);
        assert!(registry.remove(&a).is_none());
    }

    #[test]
    fn test_registry_remove_by_account_number_takes_first() {
        let mut registry = AccountRegistry::new();
        let first = registry.create_account("a", "7", "0000", dec(1)).unwrap();
        let second = registry.create_account("b", "7", "0000", dec(2)).unwrap();

        let removed = registry.remove_by_account_number("7").unwrap();
        assert_eq!(removed.id(), first);
        assert_eq!(registry.get_at(0).unwrap().id(), second);
        assert!(registry.remove_by_account_number("8").is_none());
    }

    #[test]
    fn test_registry_get_mut_updates_balance() {
        let mut registry = AccountRegistry::new();
        let id = registry.create_account("a", "1", "0000", dec(10)).unwrap();

        registry.get_mut(&id).unwrap().deposit(dec(5)).unwrap();
        assert_eq!(registry.get(&id).unwrap().check_balance(), dec(15));
    }

    #[test]
    fn test_registry_iter_in_creation_order() {
        let mut registry = AccountRegistry::new();
        for number in ["3", "1", "2"] {
            registry.create_account("x", number, "0000", dec(0)).unwrap();
        }
        let numbers: Vec<&str> = registry.iter().map(Account::account_number).collect();
        assert_eq!(numbers, vec!["3", "1", "2"]);
    }
}
