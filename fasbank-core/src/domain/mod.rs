//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
mod rates;
mod session;
pub mod result;

pub use account::{
    parse_amount, Account, AccountBook, AccountUpdate, Card, CardKind, DEFAULT_CARD_BRAND,
};
pub use rates::RateTable;
pub use session::Session;
