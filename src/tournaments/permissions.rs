//! The permission matrix.
//!
//! Pure functions over [`TournamentRole`]. Every mutating action calls into
//! this module before it touches storage; nothing here touches storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::roles::TournamentRole;
use super::roles::TournamentRole::{CoAdmin, Collaborator, Owner, Trainer, Viewer};

/// Whether `actor` may change the role of (or remove) a member holding `target`.
///
/// The owner may act on anyone but an owner. A co-admin may act on anyone
/// below co-admin. Everyone else may act on no one.
pub fn can_change_role(actor: TournamentRole, target: TournamentRole) -> bool {
    match actor {
        Owner => target != Owner,
        CoAdmin => !matches!(target, Owner | CoAdmin),
        Trainer | Collaborator | Viewer => false,
    }
}

/// Whether `actor` may move a member from `target_current` to `new_role`.
///
/// Only the owner hands out co-admin. Nobody hands out owner; that goes
/// through the ownership transfer.
pub fn can_set_role_to(
    actor: TournamentRole,
    target_current: TournamentRole,
    new_role: TournamentRole,
) -> bool {
    if !can_change_role(actor, target_current) {
        return false;
    }

    match new_role {
        Owner => false,
        CoAdmin => actor == Owner,
        Trainer | Collaborator | Viewer => true,
    }
}

pub fn can_transfer_ownership(actor: TournamentRole) -> bool {
    actor == Owner
}

/// Roles `actor` may grant, by role change or invitation.
pub fn assignable_roles(actor: TournamentRole) -> &'static [TournamentRole] {
    match actor {
        Owner => &[CoAdmin, Trainer, Collaborator, Viewer],
        CoAdmin => &[Trainer, Collaborator, Viewer],
        Trainer | Collaborator | Viewer => &[],
    }
}

/// Results: admins and collaborators always, trainers for matches of their teams.
pub fn can_edit_results(
    role: TournamentRole,
    actor_team_ids: &[String],
    match_team_ids: &[String],
) -> bool {
    scope_for(role, Capability::EditResults).allows(actor_team_ids, match_team_ids)
}

pub fn can_edit_schedule(role: TournamentRole) -> bool {
    scope_for(role, Capability::EditSchedule) == Scope::Full
}

pub fn can_edit_roster(role: TournamentRole, actor_team_ids: &[String], team_id: &str) -> bool {
    scope_for(role, Capability::EditRoster).allows_team(actor_team_ids, team_id)
}

pub fn can_edit_team_metadata(
    role: TournamentRole,
    actor_team_ids: &[String],
    team_id: &str,
) -> bool {
    scope_for(role, Capability::EditTeamMetadata).allows_team(actor_team_ids, team_id)
}

pub fn can_view_members(role: TournamentRole) -> bool {
    scope_for(role, Capability::ViewMembers) == Scope::Full
}

pub fn can_manage_members(role: TournamentRole) -> bool {
    scope_for(role, Capability::ManageMembers) == Scope::Full
}

pub fn can_manage_invitations(role: TournamentRole) -> bool {
    scope_for(role, Capability::ManageInvitations) == Scope::Full
}

pub fn can_edit_settings(role: TournamentRole) -> bool {
    scope_for(role, Capability::EditSettings) == Scope::Full
}

pub fn can_delete_tournament(role: TournamentRole) -> bool {
    scope_for(role, Capability::DeleteTournament) == Scope::Full
}

/// Something a member may do inside a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    EditResults,
    EditSchedule,
    EditRoster,
    EditTeamMetadata,
    ViewMembers,
    ManageMembers,
    ManageInvitations,
    EditSettings,
    DeleteTournament,
}

impl Capability {
    pub const ALL: [Self; 9] = [
        Self::EditResults,
        Self::EditSchedule,
        Self::EditRoster,
        Self::EditTeamMetadata,
        Self::ViewMembers,
        Self::ManageMembers,
        Self::ManageInvitations,
        Self::EditSettings,
        Self::DeleteTournament,
    ];
}

/// How far a capability reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Denied,
    /// Only where one of the member's assigned teams is involved.
    OwnTeams,
    Full,
}

impl Scope {
    /// Whether the scope covers something involving `target_team_ids`.
    pub fn allows(self, actor_team_ids: &[String], target_team_ids: &[String]) -> bool {
        match self {
            Self::Full => true,
            Self::Denied => false,
            Self::OwnTeams => target_team_ids.iter().any(|t| actor_team_ids.contains(t)),
        }
    }

    pub fn allows_team(self, actor_team_ids: &[String], team_id: &str) -> bool {
        match self {
            Self::Full => true,
            Self::Denied => false,
            Self::OwnTeams => actor_team_ids.iter().any(|t| t == team_id),
        }
    }
}

/// The single table all checks above derive from.
pub fn scope_for(role: TournamentRole, capability: Capability) -> Scope {
    use self::Capability::{
        DeleteTournament, EditResults, EditRoster, EditTeamMetadata,
    };

    match (role, capability) {
        (Owner, _) => Scope::Full,
        (CoAdmin, DeleteTournament) => Scope::Denied,
        (CoAdmin, _) => Scope::Full,
        (Trainer, EditResults | EditRoster | EditTeamMetadata) => Scope::OwnTeams,
        (Collaborator, EditResults) => Scope::Full,
        (Trainer | Collaborator | Viewer, _) => Scope::Denied,
    }
}

/// A role's scope for every capability, for the UI to decide what to show.
///
/// Serializes as `{"edit_results": "full", "edit_roster": "own_teams", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    scopes: BTreeMap<Capability, Scope>,
}

impl PermissionSet {
    pub fn for_role(role: TournamentRole) -> Self {
        Self {
            scopes: Capability::ALL
                .iter()
                .map(|c| (*c, scope_for(role, *c)))
                .collect(),
        }
    }

    pub fn scope(&self, capability: Capability) -> Scope {
        self.scopes
            .get(&capability)
            .copied()
            .unwrap_or(Scope::Denied)
    }

    /// True if the capability is granted at all, in any scope.
    pub fn can(&self, capability: Capability) -> bool {
        self.scope(capability) != Scope::Denied
    }

    /// Capabilities granted in any scope.
    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        self.scopes
            .iter()
            .filter(|(_, s)| **s != Scope::Denied)
            .map(|(c, _)| *c)
    }
}
