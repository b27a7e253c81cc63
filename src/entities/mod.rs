// Entity Models
//
// The registry exclusively owns every Account; sessions borrow it for the
// duration of a login.

pub mod account;

pub use account::{Account, AccountId, AccountRegistry, DuplicatePolicy};
