// 🚨 ATM Errors - Typed failures for every operation
//
// Every error is terminal for the call that produced it. Nothing is retried
// and nothing is partially applied.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias used across the ATM API
pub type Result<T> = std::result::Result<T, AtmError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtmError {
    /// ATM built with a cash reserve that is zero or negative
    #[error("invalid configuration: cash reserve must be positive, got {cash_reserve}")]
    InvalidConfiguration { cash_reserve: Decimal },

    /// No card was handed to `validate_card`
    #[error("missing reference: no card provided")]
    MissingReference,

    /// Balance or cash requested before a card was accepted
    #[error("no card inserted")]
    NoCardInserted,

    /// Withdrawal amount is zero or negative
    #[error("invalid amount: {amount} (must be positive)")]
    InvalidAmount { amount: Decimal },

    /// Account balance does not cover the withdrawal
    #[error("insufficient funds on card: requested {requested}, available {available}")]
    InsufficientFundsOnAccount { requested: Decimal, available: Decimal },

    /// Machine reserve does not cover the withdrawal
    #[error("insufficient funds in machine: requested {requested}, available {available}")]
    InsufficientFundsInMachine { requested: Decimal, available: Decimal },
}

impl AtmError {
    /// True for errors the caller can act on (insert a card, pick a smaller amount)
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AtmError::InvalidConfiguration { .. } | AtmError::MissingReference
        )
    }
}
