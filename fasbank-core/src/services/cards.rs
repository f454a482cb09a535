//! Card service - register, unregister, view

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, Card, CardKind, DEFAULT_CARD_BRAND};
use crate::ports::AccountStore;

/// Raw card fields as supplied by the caller, before validation
#[derive(Debug, Clone, Default)]
pub struct CardDraft {
    pub number: String,
    pub expiration: String,
    pub brand: String,
    pub kind: String,
    pub cvc: String,
}

/// Card lifecycle over a single account (at most one card)
pub struct CardService {
    accounts: Arc<dyn AccountStore>,
}

impl CardService {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Attach a card, validating the numeric fields
    pub fn register(&self, username: &str, draft: CardDraft) -> Result<Card> {
        let key = Account::normalize_key(username);
        let mut book = self.accounts.load_snapshot()?;
        let account = book.get_mut(&key).ok_or_else(|| Error::not_found(&key))?;

        if account.card.is_some() {
            return Err(Error::CardAlreadyRegistered);
        }

        let number: u64 = draft
            .number
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCardFields)?;
        let cvc: u32 = draft
            .cvc
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCardFields)?;

        let brand = {
            let brand = draft.brand.trim().to_uppercase();
            if brand.is_empty() {
                DEFAULT_CARD_BRAND.to_string()
            } else {
                brand
            }
        };

        let card = Card {
            number,
            expiration: draft.expiration.trim().to_string(),
            brand,
            kind: CardKind::parse(&draft.kind),
            cvc,
        };
        account.card = Some(card.clone());
        self.accounts.save_snapshot(&book)?;
        Ok(card)
    }

    /// Remove the registered card
    pub fn unregister(&self, username: &str) -> Result<()> {
        let key = Account::normalize_key(username);
        let mut book = self.accounts.load_snapshot()?;
        let account = book.get_mut(&key).ok_or_else(|| Error::not_found(&key))?;

        if account.card.take().is_none() {
            return Err(Error::NoCardRegistered);
        }
        self.accounts.save_snapshot(&book)?;
        Ok(())
    }

    /// The registered card, if any; no card is not an error
    pub fn view(&self, username: &str) -> Result<Option<Card>> {
        let key = Account::normalize_key(username);
        let book = self.accounts.load_snapshot()?;
        let account = book.get(&key).ok_or_else(|| Error::not_found(&key))?;
        Ok(account.card.clone())
    }
}
