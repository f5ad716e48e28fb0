//! Configuration for the tournament access library.
//!
//! # Example
//!
//! ```rust
//! use tourney_access::config::{AccessConfig, GuestRedemptionPolicy, InvitationConfig};
//!
//! // Use defaults
//! let config = AccessConfig::default();
//!
//! // Or customize
//! let config = AccessConfig {
//!     origin: "https://cup.example.org".to_owned(),
//!     invitations: InvitationConfig {
//!         default_expiry_days: 3,
//!         ..Default::default()
//!     },
//!     guest_redemption: GuestRedemptionPolicy::RequireAccount,
//! };
//! ```

use chrono::Duration;

use crate::crypto::DEFAULT_TOKEN_LENGTH;

/// Main configuration struct.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Invitation defaults and limits.
    pub invitations: InvitationConfig,

    /// Origin used to build invite links, e.g. `https://cup.example.org`.
    ///
    /// Links have the form `{origin}/invite?token={token}`.
    pub origin: String,

    /// Whether guest or anonymous identities may redeem invitations.
    pub guest_redemption: GuestRedemptionPolicy,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            invitations: InvitationConfig::default(),
            origin: "http://localhost:3000".to_owned(),
            guest_redemption: GuestRedemptionPolicy::default(),
        }
    }
}

impl AccessConfig {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Long-lived, unlimited-friendly invitations for local work.
    pub fn development() -> Self {
        Self {
            invitations: InvitationConfig {
                default_expiry_days: 30,
                default_max_uses: 0,
                max_expiry_days: 365,
                token_length: DEFAULT_TOKEN_LENGTH,
            },
            ..Self::default()
        }
    }

    /// Short-lived single-use invitations, guests must sign up first.
    pub fn strict() -> Self {
        Self {
            invitations: InvitationConfig {
                default_expiry_days: 1,
                default_max_uses: 1,
                max_expiry_days: 30,
                token_length: 48,
            },
            guest_redemption: GuestRedemptionPolicy::RequireAccount,
            ..Self::default()
        }
    }

    /// Builds the shareable link for a token.
    pub fn invite_link(&self, token: &str) -> String {
        format!("{}/invite?token={token}", self.origin.trim_end_matches('/'))
    }
}

/// Invitation defaults.
#[derive(Debug, Clone)]
pub struct InvitationConfig {
    /// Days until an invitation expires when the caller gives none.
    ///
    /// Default: 7
    pub default_expiry_days: u32,

    /// Uses allowed when the caller gives none; 0 means unlimited.
    ///
    /// Default: 1
    pub default_max_uses: u32,

    /// Upper bound accepted for `expires_in_days`.
    ///
    /// Default: 365
    pub max_expiry_days: u32,

    /// Length of generated tokens.
    ///
    /// Default: 32 (~185 bits of entropy)
    pub token_length: usize,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            default_expiry_days: 7,
            default_max_uses: 1,
            max_expiry_days: 365,
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl InvitationConfig {
    /// Lifetime for an invitation, falling back to the default.
    pub fn expiry(&self, expires_in_days: Option<u32>) -> Duration {
        Duration::days(i64::from(
            expires_in_days.unwrap_or(self.default_expiry_days),
        ))
    }
}

/// Redemption policy for identities with the guest global role.
///
/// Invitation creation always rejects guests. Redemption historically did
/// not check the global role at all; `Allow` keeps that behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuestRedemptionPolicy {
    /// Guests and anonymous identities may redeem invitations.
    #[default]
    Allow,
    /// Redemption fails with `Unauthenticated` for guests.
    RequireAccount,
}
