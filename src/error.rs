// Error taxonomy for the banking core
//
// Every variant except Io/Interrupted is recovered locally by the menu loops:
// the message is shown and the same menu is offered again.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Account not found")]
    AccountNotFound,

    #[error("Incorrect PIN")]
    InvalidPin,

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid choice '{0}'")]
    InvalidMenuChoice(String),

    #[error("'{0}' is not a valid amount")]
    MalformedAmount(String),

    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),

    #[error("Amount {amount} would take the balance past the largest supported value")]
    AmountTooLarge { amount: Decimal, balance: Decimal },

    #[error("Initial balance cannot be negative (got {0})")]
    NegativeOpeningBalance(Decimal),

    #[error("Account number '{0}' is already registered")]
    DuplicateAccountNumber(String),

    #[error("Input closed")]
    InputClosed,

    #[error("Interrupted")]
    Interrupted,

    #[error("Terminal I/O failed")]
    Io(#[from] std::io::Error),
}

impl BankError {
    /// True when the menu loop should report the error and re-prompt
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            BankError::InputClosed | BankError::Interrupted | BankError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_recoverable() {
        assert!(BankError::AccountNotFound.is_recoverable());
        assert!(BankError::InvalidPin.is_recoverable());
        assert!(BankError::MalformedAmount("abc".to_string()).is_recoverable());
        assert!(BankError::InvalidMenuChoice("9".to_string()).is_recoverable());
        let too_large = BankError::AmountTooLarge {
            amount: Decimal::ONE,
            balance: Decimal::MAX,
        };
        assert!(too_large.is_recoverable());
    }

    #[test]
    fn test_terminal_errors_are_not_recoverable() {
        assert!(!BankError::InputClosed.is_recoverable());
        assert!(!BankError::Interrupted.is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert!(!BankError::from(io).is_recoverable());
    }

    #[test]
    fn test_insufficient_balance_message() {
        let err = BankError::InsufficientBalance {
            requested: Decimal::from(200),
            available: Decimal::from(150),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested 200, available 150"
        );
    }
}
