// Menu choices for the two interaction levels
//
// Choices are matched on the trimmed text the user typed. Anything else is an
// InvalidMenuChoice and the caller shows the same menu again.

use crate::error::BankError;

// ============================================================================
// TOP-LEVEL MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    CreateAccount,
    Login,
    Exit,
}

impl MainMenuChoice {
    /// Menu entries in display order; entry N is selected by typing N
    pub const ALL: [MainMenuChoice; 3] = [
        MainMenuChoice::CreateAccount,
        MainMenuChoice::Login,
        MainMenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MainMenuChoice::CreateAccount => "Create Account",
            MainMenuChoice::Login => "Login",
            MainMenuChoice::Exit => "Exit",
        }
    }
}

impl TryFrom<&str> for MainMenuChoice {
    type Error = BankError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "1" => Ok(MainMenuChoice::CreateAccount),
            "2" => Ok(MainMenuChoice::Login),
            "3" => Ok(MainMenuChoice::Exit),
            other => Err(BankError::InvalidMenuChoice(other.to_string())),
        }
    }
}

// ============================================================================
// TRANSACTION MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionChoice {
    Deposit,
    Withdraw,
    CheckBalance,
    Logout,
}

impl TransactionChoice {
    pub const ALL: [TransactionChoice; 4] = [
        TransactionChoice::Deposit,
        TransactionChoice::Withdraw,
        TransactionChoice::CheckBalance,
        TransactionChoice::Logout,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionChoice::Deposit => "Deposit",
            TransactionChoice::Withdraw => "Withdraw",
            TransactionChoice::CheckBalance => "Check Balance",
            TransactionChoice::Logout => "Logout",
        }
    }
}

impl TryFrom<&str> for TransactionChoice {
    type Error = BankError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "1" => Ok(TransactionChoice::Deposit),
            "2" => Ok(TransactionChoice::Withdraw),
            "3" => Ok(TransactionChoice::CheckBalance),
            "4" => Ok(TransactionChoice::Logout),
            other => Err(BankError::InvalidMenuChoice(other.to_string())),
        }
    }
}

/// Numbered menu lines, e.g. `"1. Create Account"`
pub fn numbered<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| format!("{}. {}", i + 1, label))
        .collect()
}
