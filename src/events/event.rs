use chrono::{DateTime, Utc};

use crate::tournaments::TournamentRole;

/// Access events emitted by tournament actions.
///
/// Events are always fired from actions. If no listeners are registered,
/// they are silently ignored (no-op). Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners) to handle events.
#[derive(Debug, Clone)]
pub enum AccessEvent {
    // membership
    OwnerMembershipCreated {
        tournament_id: String,
        user_id: String,
        at: DateTime<Utc>,
    },
    MemberRoleChanged {
        tournament_id: String,
        membership_id: String,
        actor_user_id: String,
        from: TournamentRole,
        to: TournamentRole,
        at: DateTime<Utc>,
    },
    TrainerTeamsUpdated {
        tournament_id: String,
        membership_id: String,
        actor_user_id: String,
        team_ids: Vec<String>,
        at: DateTime<Utc>,
    },
    MemberRemoved {
        tournament_id: String,
        user_id: String,
        actor_user_id: String,
        at: DateTime<Utc>,
    },

    // invitations
    InvitationCreated {
        tournament_id: String,
        invitation_id: String,
        role: TournamentRole,
        created_by: String,
        at: DateTime<Utc>,
    },
    InvitationAccepted {
        tournament_id: String,
        invitation_id: String,
        user_id: String,
        at: DateTime<Utc>,
    },
    InvitationDeactivated {
        tournament_id: String,
        invitation_id: String,
        actor_user_id: String,
        at: DateTime<Utc>,
    },

    // ownership
    OwnershipTransferred {
        tournament_id: String,
        former_owner_id: String,
        new_owner_id: String,
        at: DateTime<Utc>,
    },
    /// The tournament has no owner and needs manual repair.
    OwnershipStateInconsistent {
        tournament_id: String,
        former_owner_id: String,
        new_owner_id: String,
        at: DateTime<Utc>,
    },
}

impl AccessEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OwnerMembershipCreated { .. } => "membership.owner_created",
            Self::MemberRoleChanged { .. } => "membership.role_changed",
            Self::TrainerTeamsUpdated { .. } => "membership.teams_updated",
            Self::MemberRemoved { .. } => "membership.removed",
            Self::InvitationCreated { .. } => "invitation.created",
            Self::InvitationAccepted { .. } => "invitation.accepted",
            Self::InvitationDeactivated { .. } => "invitation.deactivated",
            Self::OwnershipTransferred { .. } => "ownership.transferred",
            Self::OwnershipStateInconsistent { .. } => "ownership.inconsistent",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::OwnerMembershipCreated { at, .. }
            | Self::MemberRoleChanged { at, .. }
            | Self::TrainerTeamsUpdated { at, .. }
            | Self::MemberRemoved { at, .. }
            | Self::InvitationCreated { at, .. }
            | Self::InvitationAccepted { at, .. }
            | Self::InvitationDeactivated { at, .. }
            | Self::OwnershipTransferred { at, .. }
            | Self::OwnershipStateInconsistent { at, .. } => *at,
        }
    }

    /// The tournament the event belongs to.
    pub fn tournament_id(&self) -> &str {
        match self {
            Self::OwnerMembershipCreated { tournament_id, .. }
            | Self::MemberRoleChanged { tournament_id, .. }
            | Self::TrainerTeamsUpdated { tournament_id, .. }
            | Self::MemberRemoved { tournament_id, .. }
            | Self::InvitationCreated { tournament_id, .. }
            | Self::InvitationAccepted { tournament_id, .. }
            | Self::InvitationDeactivated { tournament_id, .. }
            | Self::OwnershipTransferred { tournament_id, .. }
            | Self::OwnershipStateInconsistent { tournament_id, .. } => tournament_id,
        }
    }

    /// Events operators must be alerted about.
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::OwnershipStateInconsistent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            AccessEvent::OwnerMembershipCreated {
                tournament_id: "t1".to_owned(),
                user_id: "u1".to_owned(),
                at: now
            }
            .name(),
            "membership.owner_created"
        );

        assert_eq!(
            AccessEvent::MemberRoleChanged {
                tournament_id: "t1".to_owned(),
                membership_id: "m1".to_owned(),
                actor_user_id: "u1".to_owned(),
                from: TournamentRole::Viewer,
                to: TournamentRole::Trainer,
                at: now
            }
            .name(),
            "membership.role_changed"
        );

        assert_eq!(
            AccessEvent::OwnershipTransferred {
                tournament_id: "t1".to_owned(),
                former_owner_id: "a".to_owned(),
                new_owner_id: "b".to_owned(),
                at: now
            }
            .name(),
            "ownership.transferred"
        );
    }

    #[test]
    fn test_event_timestamp_and_tournament() {
        let now = Utc::now();

        let event = AccessEvent::InvitationAccepted {
            tournament_id: "t9".to_owned(),
            invitation_id: "i1".to_owned(),
            user_id: "u2".to_owned(),
            at: now,
        };

        assert_eq!(event.timestamp(), now);
        assert_eq!(event.tournament_id(), "t9");
        assert!(!event.is_alert());
    }

    #[test]
    fn test_inconsistent_ownership_is_alert() {
        let event = AccessEvent::OwnershipStateInconsistent {
            tournament_id: "t1".to_owned(),
            former_owner_id: "a".to_owned(),
            new_owner_id: "b".to_owned(),
            at: Utc::now(),
        };

        assert!(event.is_alert());
        assert_eq!(event.name(), "ownership.inconsistent");
    }
}
