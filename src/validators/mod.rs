pub mod email;
pub mod invitation;
pub mod label;

pub use email::normalize_email;
pub use invitation::{validate_expiry_days, validate_team_ids};
pub use label::validate_label;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    LabelTooLong,
    ExpiryOutOfRange { max_days: u32 },
    TeamIdEmpty,
    TeamIdDuplicate(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
            Self::LabelTooLong => write!(f, "Label is too long (max 100 characters)"),
            Self::ExpiryOutOfRange { max_days } => {
                write!(f, "Invitations must expire within 1 to {max_days} days")
            }
            Self::TeamIdEmpty => write!(f, "Team id cannot be empty"),
            Self::TeamIdDuplicate(id) => write!(f, "Team {id} is listed twice"),
        }
    }
}

impl std::error::Error for ValidationError {}
