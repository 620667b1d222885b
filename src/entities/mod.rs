// Entity Models - the collaborators an ATM talks to
//
// Each entity has:
// - A capability trait the ATM depends on (Account, Card)
// - A concrete entity with stable identity (BankAccount, BankCard)

pub mod account;
pub mod card;

pub use account::{Account, AccountType, BankAccount, SharedAccount};
pub use card::{BankCard, Card, Pin};
