//! Invitation token wrapper.
//!
//! An invitation token is a bearer capability: anyone holding it can redeem
//! the invitation. `InviteToken` keeps it out of logs by redacting `Debug`
//! and `Display` down to a short prefix.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::{generate_token, is_valid_token_format};

/// Number of leading characters shown in redacted output.
const VISIBLE_PREFIX: usize = 4;

/// A redeemable invitation token.
///
/// # Example
///
/// ```rust
/// use tourney_access::InviteToken;
///
/// let token = InviteToken::new("AbCdEfGhJkMnPqRsTuVwXyZ234567892");
/// assert_eq!(format!("{token:?}"), "InviteToken(AbCd…)");
/// assert_eq!(token.expose(), "AbCdEfGhJkMnPqRsTuVwXyZ234567892");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteToken(String);

impl InviteToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Creates a fresh random token of the given length.
    #[must_use]
    pub fn generate(length: usize) -> Self {
        Self(generate_token(length))
    }

    /// Returns the raw token, e.g. for building the invite link.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Shape check: `length` characters, all from the token alphabet.
    ///
    /// Pass the `token_length` the issuing config used.
    #[must_use]
    pub fn is_well_formed(&self, length: usize) -> bool {
        is_valid_token_format(&self.0, length)
    }

    fn redacted(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(VISIBLE_PREFIX)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Debug for InviteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InviteToken({}…)", self.redacted())
    }
}

impl fmt::Display for InviteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…", self.redacted())
    }
}

impl From<String> for InviteToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InviteToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
