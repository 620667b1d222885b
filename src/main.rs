// ATM Demo - runs one card session against a JSON config
//
// Usage:
//   atm-demo <config.json> <card-last4> <pin> balance
//   atm-demo <config.json> <card-last4> <pin> withdraw <amount>
//
// RUST_LOG=info shows the ATM's decisions; ATM_CASH_RESERVE overrides the reserve.

use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::path::{Path, PathBuf};

use atm_core::{Account, Atm, AtmConfig, BankCard, Pin};

#[derive(Debug, PartialEq)]
enum Command {
    Balance,
    Withdraw(Decimal),
}

/// Parsed command line
#[derive(Debug)]
struct Invocation {
    config_path: PathBuf,
    card_last4: String,
    pin: Pin,
    command: Command,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        eprintln!("Usage:");
        eprintln!("  atm-demo <config.json> <card-last4> <pin> balance");
        eprintln!("  atm-demo <config.json> <card-last4> <pin> withdraw <amount>");
        std::process::exit(2);
    }

    let invocation = parse_args(&args[1..])?;
    run_session(&invocation)
}

/// Parse `<config.json> <card-last4> <pin> <command> [amount]`
fn parse_args(args: &[String]) -> Result<Invocation> {
    if args.len() < 4 {
        bail!("Expected <config.json> <card-last4> <pin> <command>");
    }

    let command = match args[3].as_str() {
        "balance" => Command::Balance,
        "withdraw" => {
            let raw = args
                .get(4)
                .ok_or_else(|| anyhow!("withdraw needs an amount"))?;
            let amount: Decimal = raw
                .parse()
                .with_context(|| format!("Invalid amount: {}", raw))?;
            Command::Withdraw(amount)
        }
        other => bail!("Unknown command: {}", other),
    };

    let pin: u32 = args[2].parse().context("PIN must be numeric")?;

    Ok(Invocation {
        config_path: PathBuf::from(&args[0]),
        card_last4: args[1].clone(),
        pin: Pin::new(pin),
        command,
    })
}

fn run_session(invocation: &Invocation) -> Result<()> {
    let last4 = invocation.card_last4.as_str();

    println!("🏧 ATM {}", atm_core::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load config
    let config = AtmConfig::load(Path::new(&invocation.config_path))?;
    let mut atm: Atm<BankCard> = Atm::from_config(&config)?;
    println!("✓ Machine loaded with {}", atm.money_in_atm());

    // 2. Insert card
    let fixture = match config.find_card(last4) {
        Some(fixture) => fixture,
        None => bail!("No card ending in {}", last4),
    };
    let card = fixture.build();
    let owner = card.owner_account();

    if !atm.validate_card(Some(card), invocation.pin)? {
        eprintln!("❌ Card rejected");
        std::process::exit(1);
    }
    println!(
        "✓ Card *{} accepted ({} account)",
        last4,
        fixture.account.account_type.as_str()
    );

    // 3. Run command
    match invocation.command {
        Command::Balance => {
            println!("💰 Balance: {}", atm.check_balance()?);
        }
        Command::Withdraw(amount) => {
            let dispensed = atm.get_cash(amount)?;
            println!("💵 Dispensed: {}", dispensed);
            println!("✓ Account balance now {}", owner.balance());
            println!("✓ Machine reserve now {}", atm.money_in_atm());
        }
    }

    Ok(())
}
