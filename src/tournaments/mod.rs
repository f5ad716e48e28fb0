//! Tournament roles, memberships, invitations and ownership.
//!
//! Every mutating operation is an action struct generic over the repository
//! traits it needs. Actions consult [`permissions`] before touching storage.

mod actions;
pub mod permissions;
mod repository;
mod roles;
mod types;

pub use actions::{
    AcceptInvitationAction, ChangeRoleAction, CreateInvitationAction, CreateInvitationInput,
    CreateInvitationOutput, CreateOwnerMembershipAction, DeactivateInvitationAction,
    GetMembershipAction, ListActiveInvitationsAction, ListMembersAction,
    ListUserTournamentsAction, RemoveMemberAction, TransferOwnershipAction,
    UpdateTrainerTeamsAction, ValidateInvitationAction,
};
pub use permissions::{Capability, PermissionSet, Scope};
pub use repository::{
    CreateInvitation, CreateMembership, Deactivation, InvitationRepository, MembershipRepository,
    Redemption, TournamentRepository, UserRepository,
};
pub use roles::{GlobalRole, TournamentRole, UnknownRole};
pub use types::{
    Actor, Invitation, InvitationPreview, InvitationStatus, InviterSummary, TournamentMembership,
    TournamentSummary, User,
};

#[cfg(any(test, feature = "mocks"))]
mod mocks;

#[cfg(any(test, feature = "mocks"))]
pub use mocks::{
    MockInvitationRepository, MockMembershipRepository, MockTournamentRepository,
    MockUserRepository,
};
