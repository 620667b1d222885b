// 🏧 ATM - Card session, cash reserve and withdrawal checks
//
// Session state machine:
//   NoCard ──(validate_card succeeds)──▶ CardActive
//
// There is no way back to NoCard: once a card is accepted the session lasts
// for the lifetime of the machine.
//
// Withdrawal order (get_cash):
//   1. session present            → else NoCardInserted
//   2. amount > 0                 → else InvalidAmount
//   3. read account balance       (always before withdraw)
//   4. amount > balance           → InsufficientFundsOnAccount
//   5. amount > cash reserve      → InsufficientFundsInMachine
//   6. account.withdraw(amount), reserve -= amount

use crate::config::AtmConfig;
use crate::entities::{Account, Card, Pin};
use crate::error::{AtmError, Result};
use log::{debug, info, warn};
use rust_decimal::Decimal;

// ============================================================================
// SESSION
// ============================================================================

/// Card currently held by the machine
#[derive(Debug, Clone, PartialEq)]
pub enum Session<C> {
    NoCard,
    CardActive(C),
}

impl<C> Session<C> {
    pub fn is_active(&self) -> bool {
        matches!(self, Session::CardActive(_))
    }

    pub fn card(&self) -> Option<&C> {
        match self {
            Session::NoCard => None,
            Session::CardActive(card) => Some(card),
        }
    }

    fn card_mut(&mut self) -> Option<&mut C> {
        match self {
            Session::NoCard => None,
            Session::CardActive(card) => Some(card),
        }
    }
}

// ============================================================================
// ATM
// ============================================================================

#[derive(Debug)]
pub struct Atm<C: Card> {
    cash_reserve: Decimal,
    session: Session<C>,
}

impl<C: Card> Atm<C> {
    /// Create an ATM loaded with `cash_reserve`
    ///
    /// Fails with `InvalidConfiguration` when the reserve is zero or negative.
    pub fn new(cash_reserve: Decimal) -> Result<Self> {
        if cash_reserve <= Decimal::ZERO {
            return Err(AtmError::InvalidConfiguration { cash_reserve });
        }

        info!("ATM loaded with cash reserve {}", cash_reserve);
        Ok(Atm {
            cash_reserve,
            session: Session::NoCard,
        })
    }

    /// Create an ATM from a loaded configuration
    pub fn from_config(config: &AtmConfig) -> Result<Self> {
        Self::new(config.cash_reserve)
    }

    /// Cash currently held by the machine
    pub fn money_in_atm(&self) -> Decimal {
        self.cash_reserve
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub fn has_card(&self) -> bool {
        self.session.is_active()
    }

    /// Insert a card and check its PIN
    ///
    /// # Returns
    /// * `Ok(true)` - PIN accepted, the card becomes the active session
    /// * `Ok(false)` - card blocked or PIN wrong; the session is left as it was
    /// * `Err(MissingReference)` - no card given
    pub fn validate_card(&mut self, card: Option<C>, pin: Pin) -> Result<bool> {
        let card = card.ok_or(AtmError::MissingReference)?;

        if card.is_blocked() {
            warn!("Card rejected: blocked");
            return Ok(false);
        }

        if !card.check_pin(pin) {
            warn!("Card rejected: wrong PIN");
            return Ok(false);
        }

        if self.session.is_active() {
            debug!("Replacing active card session");
        }
        info!("Card accepted, session established");
        self.session = Session::CardActive(card);
        Ok(true)
    }

    /// Balance of the account behind the active card
    pub fn check_balance(&self) -> Result<Decimal> {
        let card = self.session.card().ok_or(AtmError::NoCardInserted)?;
        let balance = card.account().balance();
        debug!("Balance read: {}", balance);
        Ok(balance)
    }

    /// Dispense `amount` from the machine and debit the card's account
    ///
    /// The account balance is checked before the machine reserve, so when
    /// both are short the caller sees `InsufficientFundsOnAccount`.
    pub fn get_cash(&mut self, amount: Decimal) -> Result<Decimal> {
        if !self.session.is_active() {
            return Err(AtmError::NoCardInserted);
        }

        if amount <= Decimal::ZERO {
            warn!("Withdrawal refused: invalid amount {}", amount);
            return Err(AtmError::InvalidAmount { amount });
        }

        let balance = self.check_balance()?;

        if amount > balance {
            warn!(
                "Withdrawal refused: requested {} exceeds account balance {}",
                amount, balance
            );
            return Err(AtmError::InsufficientFundsOnAccount {
                requested: amount,
                available: balance,
            });
        }

        if amount > self.cash_reserve {
            warn!(
                "Withdrawal refused: requested {} exceeds machine reserve {}",
                amount, self.cash_reserve
            );
            return Err(AtmError::InsufficientFundsInMachine {
                requested: amount,
                available: self.cash_reserve,
            });
        }

        let card = self.session.card_mut().ok_or(AtmError::NoCardInserted)?;
        card.account_mut().withdraw(amount);
        self.cash_reserve -= amount;

        info!(
            "Dispensed {}, machine reserve now {}",
            amount, self.cash_reserve
        );
        Ok(amount)
    }
}

// ============================================================================
// TESTS
// ============================================================================
