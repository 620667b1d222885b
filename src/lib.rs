// ATM Core - Library
// Card validation, balance inquiry and cash withdrawal for a single machine

pub mod atm;
pub mod config;
pub mod entities;
pub mod error;

// Re-export commonly used types
pub use atm::{Atm, Session};
pub use config::{AccountFixture, AtmConfig, CardFixture, CASH_RESERVE_ENV};
pub use entities::{Account, AccountType, BankAccount, BankCard, Card, Pin, SharedAccount};
pub use error::{AtmError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
