// 💳 Card Entity - Credential linked to exactly one account
//
// A card is fixed once issued: blocked flag, PIN and account never change.
// The PIN never leaves the card: it is not serialized and not printed.

use super::account::{Account, SharedAccount};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PIN
// ============================================================================

/// Numeric PIN code
///
/// `Debug` is masked so a PIN cannot end up in a log line by accident.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pin(u32);

impl Pin {
    pub fn new(code: u32) -> Self {
        Pin(code)
    }
}

impl From<u32> for Pin {
    fn from(code: u32) -> Self {
        Pin(code)
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

// ============================================================================
// CARD CAPABILITY
// ============================================================================

/// Credential the ATM validates before opening a session
pub trait Card {
    type Account: Account;

    fn is_blocked(&self) -> bool;

    /// True iff `candidate` equals the stored PIN
    fn check_pin(&self, candidate: Pin) -> bool;

    fn account(&self) -> &Self::Account;

    fn account_mut(&mut self) -> &mut Self::Account;
}

// ============================================================================
// BANK CARD ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BankCard {
    /// Stable identity (UUID)
    pub id: String,

    /// Card number, masked to the last 4 digits
    pub card_number: String,

    #[serde(skip)]
    pin: Pin,

    blocked: bool,

    #[serde(skip)]
    account: SharedAccount,
}

impl BankCard {
    /// Issue an active card for `account`
    pub fn new(card_number: &str, pin: impl Into<Pin>, account: SharedAccount) -> Self {
        BankCard {
            id: uuid::Uuid::new_v4().to_string(),
            card_number: super::account::BankAccount::mask_account_number(card_number),
            pin: pin.into(),
            blocked: false,
            account,
        }
    }

    /// Builder pattern: issue the card already blocked
    pub fn blocked(mut self) -> Self {
        self.blocked = true;
        self
    }

    /// Handle to the linked account, for the account owner
    pub fn owner_account(&self) -> SharedAccount {
        SharedAccount::clone(&self.account)
    }
}

impl Card for BankCard {
    type Account = SharedAccount;

    fn is_blocked(&self) -> bool {
        self.blocked
    }

    fn check_pin(&self, candidate: Pin) -> bool {
        self.pin == candidate
    }

    fn account(&self) -> &SharedAccount {
        &self.account
    }

    fn account_mut(&mut self) -> &mut SharedAccount {
        &mut self.account
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::account::{AccountType, BankAccount};
    use rust_decimal_macros::dec;

    fn create_test_card(pin: u32) -> BankCard {
        let account =
            BankAccount::new("Card Test", "55550000", AccountType::Checking, "USD", dec!(250))
                .into_shared();
        BankCard::new("4000123412349999", pin, account)
    }

    #[test]
    fn test_card_creation() {
        let card = create_test_card(1111);

        assert!(!card.id.is_empty());
        assert_eq!(card.card_number, "*9999");
        assert!(!card.is_blocked());
        assert_eq!(card.account().balance(), dec!(250));
    }

    #[test]
    fn test_check_pin() {
        let card = create_test_card(1111);

        assert!(card.check_pin(Pin::new(1111)));
        assert!(!card.check_pin(Pin::new(1112)));
        assert!(!card.check_pin(0.into()));
    }

    #[test]
    fn test_blocked_builder() {
        let card = create_test_card(1111).blocked();
        assert!(card.is_blocked());
        // A blocked card still knows its PIN; refusing it is the ATM's job
        assert!(card.check_pin(Pin::new(1111)));
    }

    #[test]
    fn test_pin_never_printed_or_serialized() {
        let card = create_test_card(4321);

        let debug = format!("{:?}", card);
        assert!(!debug.contains("Pin(4321)"));
        assert!(debug.contains("pin: Pin(****)"));

        let json = serde_json::to_string(&card).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("pin").is_none());
        assert!(value.get("account").is_none());
        assert_eq!(value["blocked"], false);
    }

    #[test]
    fn test_owner_shares_account_with_card() {
        let mut card = create_test_card(1111);
        let owner = card.owner_account();

        card.account_mut().withdraw(dec!(50));

        assert_eq!(owner.balance(), dec!(200));
    }
}
