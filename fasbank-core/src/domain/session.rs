//! Session domain model

use serde::{Deserialize, Serialize};

/// The single active session (process-wide singleton record)
///
/// Overwritten wholesale on login/logout, never merged. The `logged in`
/// wire name (with a space) is the persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "logged in")]
    pub logged_in: bool,
    pub account: String,
}

impl Session {
    /// The logged-out session
    pub fn logged_out() -> Self {
        Self {
            logged_in: false,
            account: String::new(),
        }
    }

    /// A session authenticated as the given account key
    pub fn for_account(key: impl Into<String>) -> Self {
        Self {
            logged_in: true,
            account: key.into(),
        }
    }

    /// The authenticated account key, if any
    pub fn account_key(&self) -> Option<&str> {
        if self.logged_in && !self.account.is_empty() {
            Some(&self.account)
        } else {
            None
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::logged_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_key() {
        assert_eq!(Session::logged_out().account_key(), None);
        assert_eq!(Session::for_account("ALICE").account_key(), Some("ALICE"));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Session::for_account("ALICE")).unwrap();
        assert_eq!(json, r#"{"logged in":true,"account":"ALICE"}"#);

        let parsed: Session =
            serde_json::from_str(r#"{"logged in":false,"account":""}"#).unwrap();
        assert_eq!(parsed, Session::logged_out());
    }
}
