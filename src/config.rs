// ⚙️ ATM Configuration - JSON file + environment overrides
//
// Example file:
// {
//   "cash_reserve": "5000",
//   "cards": [
//     {
//       "card_number": "4000000000001234",
//       "pin": 2468,
//       "account": { "name": "Everyday Checking", "account_number": "1234567890", "balance": "300" }
//     }
//   ]
// }

use crate::entities::{AccountType, BankAccount, BankCard, Pin};
use anyhow::{bail, Context, Result};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Overrides `cash_reserve` from the file when set
pub const CASH_RESERVE_ENV: &str = "ATM_CASH_RESERVE";

// ============================================================================
// FIXTURES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountFixture {
    pub name: String,
    pub account_number: String,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub balance: Decimal,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFixture {
    pub card_number: String,
    pub pin: Pin,
    #[serde(default)]
    pub blocked: bool,
    pub account: AccountFixture,
}

impl CardFixture {
    /// Issue a card backed by a freshly opened account
    pub fn build(&self) -> BankCard {
        let account = BankAccount::new(
            self.account.name.clone(),
            &self.account.account_number,
            self.account.account_type,
            self.account.currency.clone(),
            self.account.balance,
        )
        .into_shared();

        let card = BankCard::new(&self.card_number, self.pin, account);
        debug!(
            "Issued card {} on {} account",
            card.card_number,
            self.account.account_type.as_str()
        );
        if self.blocked {
            card.blocked()
        } else {
            card
        }
    }
}

// ============================================================================
// ATM CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmConfig {
    pub cash_reserve: Decimal,
    #[serde(default)]
    pub cards: Vec<CardFixture>,
}

impl AtmConfig {
    /// Parse configuration from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AtmConfig =
            serde_json::from_str(json).context("Failed to parse ATM configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: AtmConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Ok(value) = std::env::var(CASH_RESERVE_ENV) {
            config.apply_cash_reserve_override(&value)?;
        }

        config.validate()?;
        debug!(
            "Loaded ATM config from {} ({} cards)",
            path.display(),
            config.cards.len()
        );
        Ok(config)
    }

    /// Replace the cash reserve with a value given as text (e.g. from the environment)
    pub fn apply_cash_reserve_override(&mut self, value: &str) -> Result<()> {
        let reserve: Decimal = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value: {:?}", CASH_RESERVE_ENV, value))?;
        debug!("Cash reserve overridden to {}", reserve);
        self.cash_reserve = reserve;
        Ok(())
    }

    /// Reject configurations the ATM would refuse anyway
    pub fn validate(&self) -> Result<()> {
        if self.cash_reserve <= Decimal::ZERO {
            bail!("cash_reserve must be positive, got {}", self.cash_reserve);
        }
        Ok(())
    }

    /// First configured card whose number ends with `last4`
    ///
    /// An empty selector matches nothing.
    pub fn find_card(&self, last4: &str) -> Option<&CardFixture> {
        let last4 = last4.trim();
        if last4.is_empty() {
            return None;
        }
        self.cards.iter().find(|c| c.card_number.ends_with(last4))
    }
}

// ============================================================================
// TESTS
// ============================================================================
