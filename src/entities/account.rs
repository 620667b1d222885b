// 💰 Account Entity - Balance holder behind every card
//
// "The account holds the money, the ATM decides whether it may leave"
//
// - `Account` is the capability the ATM talks to (balance + withdraw)
// - `BankAccount` is the concrete entity with identity and masked number
// - `SharedAccount` lets the owner keep a handle while the card sits in the ATM

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

// ============================================================================
// ACCOUNT CAPABILITY
// ============================================================================

/// Balance-holding entity subject to withdrawal
///
/// `withdraw` performs no validation: the caller (the ATM) is responsible
/// for checking the balance first.
pub trait Account {
    /// Current balance, no side effects
    fn balance(&self) -> Decimal;

    /// Subtract `amount` from the balance
    fn withdraw(&mut self, amount: Decimal);
}

/// An account shared between its owner and the card that references it
pub type SharedAccount = Arc<RwLock<BankAccount>>;

impl<A: Account> Account for Arc<RwLock<A>> {
    fn balance(&self) -> Decimal {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .balance()
    }

    fn withdraw(&mut self, amount: Decimal) {
        self.write()
            .unwrap_or_else(PoisonError::into_inner)
            .withdraw(amount);
    }
}

// ============================================================================
// ACCOUNT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    /// Checking account (debit card, daily withdrawals)
    #[default]
    Checking,

    /// Savings account
    Savings,

    /// Other / Unknown
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::Other => "Other",
        }
    }
}

// ============================================================================
// BANK ACCOUNT ENTITY
// ============================================================================

/// Bank account with stable identity
///
/// Identity: UUID (never changes)
/// Values: name, masked number, balances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    /// Stable identity (UUID)
    pub id: String,

    /// Account name (e.g., "Everyday Checking")
    pub name: String,

    /// Account number, masked to the last 4 digits ("*1234")
    pub account_number: String,

    pub account_type: AccountType,

    /// Currency (ISO 4217 code: USD, EUR, ...)
    pub currency: String,

    /// Balance at the moment the account was opened
    pub opening_balance: Decimal,

    /// Balance after every withdrawal so far
    pub current_balance: Decimal,

    pub opened_at: DateTime<Utc>,
}

impl BankAccount {
    /// Create new account with a fresh UUID
    ///
    /// The account number is masked on the way in; the full number is never stored.
    pub fn new(
        name: impl Into<String>,
        account_number: &str,
        account_type: AccountType,
        currency: impl Into<String>,
        opening_balance: Decimal,
    ) -> Self {
        BankAccount {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            account_number: Self::mask_account_number(account_number),
            account_type,
            currency: currency.into(),
            opening_balance,
            current_balance: opening_balance,
            opened_at: Utc::now(),
        }
    }

    /// Wrap the account so a card and its owner can both reach it
    pub fn into_shared(self) -> SharedAccount {
        Arc::new(RwLock::new(self))
    }

    /// Net movement since the account was opened
    pub fn balance_change(&self) -> Decimal {
        self.current_balance - self.opening_balance
    }

    /// Check if account is overdrawn (negative balance)
    pub fn is_overdrawn(&self) -> bool {
        self.current_balance < Decimal::ZERO
    }

    /// Mask account number (show only last 4 digits)
    ///
    /// Example: "1234567890" → "*7890"
    pub fn mask_account_number(full_number: &str) -> String {
        if full_number.starts_with('*') || full_number.chars().count() <= 4 {
            return full_number.to_string();
        }
        let chars: Vec<char> = full_number.chars().collect();
        let last4: String = chars[chars.len() - 4..].iter().collect();
        format!("*{}", last4)
    }
}

impl Account for BankAccount {
    fn balance(&self) -> Decimal {
        self.current_balance
    }

    fn withdraw(&mut self, amount: Decimal) {
        self.current_balance -= amount;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_test_account(balance: Decimal) -> BankAccount {
        BankAccount::new(
            "Test Checking",
            "9876541234",
            AccountType::Checking,
            "USD",
            balance,
        )
    }

    #[test]
    fn test_account_creation() {
        let account = create_test_account(dec!(1000));

        assert!(!account.id.is_empty());
        assert_eq!(account.name, "Test Checking");
        assert_eq!(account.account_number, "*1234");
        assert_eq!(account.account_type, AccountType::Checking);
        assert_eq!(account.currency, "USD");
        assert_eq!(account.opening_balance, dec!(1000));
        assert_eq!(account.balance(), dec!(1000));
    }

    #[test]
    fn test_withdraw_has_no_guard() {
        let mut account = create_test_account(dec!(100));

        account.withdraw(dec!(30.50));
        assert_eq!(account.balance(), dec!(69.50));
        assert_eq!(account.balance_change(), dec!(-30.50));
        assert!(!account.is_overdrawn());

        // Account itself never refuses; the ATM guards this
        account.withdraw(dec!(100));
        assert_eq!(account.balance(), dec!(-30.50));
        assert!(account.is_overdrawn());
    }

    #[test]
    fn test_account_type_labels() {
        assert_eq!(AccountType::Checking.as_str(), "Checking");
        assert_eq!(AccountType::Savings.as_str(), "Savings");
        assert_eq!(AccountType::Other.as_str(), "Other");
        assert_eq!(AccountType::default(), AccountType::Checking);
    }

    #[test]
    fn test_mask_account_number() {
        assert_eq!(BankAccount::mask_account_number("1234567890"), "*7890");
        assert_eq!(BankAccount::mask_account_number("1234"), "1234");
        assert_eq!(BankAccount::mask_account_number("*5678"), "*5678");
    }

    #[test]
    fn test_shared_account_sees_withdrawals() {
        let shared = create_test_account(dec!(500)).into_shared();
        let mut handle = Arc::clone(&shared);

        handle.withdraw(dec!(200));

        assert_eq!(shared.balance(), dec!(300));
        assert_eq!(shared.read().unwrap().current_balance, dec!(300));
    }

    #[test]
    fn test_account_serialization() {
        let account = create_test_account(dec!(42.10));
        let json = serde_json::to_string(&account).unwrap();
        let back: BankAccount = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, account.id);
        assert_eq!(back.current_balance, dec!(42.10));
        assert_eq!(back.account_type, AccountType::Checking);
    }
}
