pub mod config;
pub mod crypto;
pub mod events;
pub mod token;
pub mod tournaments;
pub mod validators;

pub use config::{AccessConfig, GuestRedemptionPolicy, InvitationConfig};
pub use events::{AccessEvent, register_event_listeners};
pub use token::InviteToken;
pub use validators::ValidationError;

use std::fmt;

/// Every failure an access operation can report.
///
/// Domain outcomes (expired token, missing permission) are ordinary values the
/// caller branches on. `Display` produces the short message shown to users;
/// storage detail is kept out of it.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessError {
    /// The actor has no membership in the tournament.
    Unauthenticated,
    /// The permission matrix rejected the action.
    Forbidden(&'static str),
    NotFound,
    /// The target user has no membership in the tournament.
    NotMember,
    /// The role is not allowed for this operation.
    InvalidRole,
    Expired,
    Deactivated,
    MaxUsesReached,
    AlreadyMember,
    Validation(ValidationError),
    /// Opaque failure from the storage collaborator.
    Storage(String),
    /// Ownership transfer left the tournament without an owner and the
    /// rollback failed. Requires manual remediation; never retry.
    InconsistentOwnershipState {
        tournament_id: String,
        former_owner_id: String,
        new_owner_id: String,
    },
}

impl AccessError {
    /// Stable machine id for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound => "not_found",
            Self::NotMember => "not_member",
            Self::InvalidRole => "invalid_role",
            Self::Expired => "expired",
            Self::Deactivated => "deactivated",
            Self::MaxUsesReached => "max_uses_reached",
            Self::AlreadyMember => "already_member",
            Self::Validation(_) => "validation",
            Self::Storage(_) => "storage_failure",
            Self::InconsistentOwnershipState { .. } => "inconsistent_ownership_state",
        }
    }

    /// True only for errors that break the single-owner invariant.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InconsistentOwnershipState { .. })
    }
}

impl std::error::Error for AccessError {}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "You are not a member of this tournament"),
            Self::Forbidden(reason) => write!(f, "{reason}"),
            Self::NotFound => write!(f, "This invitation or member could not be found"),
            Self::NotMember => write!(f, "That user is not a member of this tournament"),
            Self::InvalidRole => write!(f, "That role cannot be used here"),
            Self::Expired => write!(f, "This invitation has expired"),
            Self::Deactivated => write!(f, "This invitation was deactivated"),
            Self::MaxUsesReached => write!(f, "This invitation was already used"),
            Self::AlreadyMember => write!(f, "You are already a member of this tournament"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(_) => write!(f, "Something went wrong, please try again"),
            Self::InconsistentOwnershipState { .. } => write!(
                f,
                "Ownership transfer failed and the tournament needs manual repair"
            ),
        }
    }
}

impl From<ValidationError> for AccessError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}
