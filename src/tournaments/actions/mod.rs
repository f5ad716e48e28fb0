mod accept_invitation;
mod change_role;
mod create_invitation;
mod create_owner;
mod deactivate_invitation;
mod list_invitations;
mod members;
mod remove_member;
mod transfer_ownership;
mod update_trainer_teams;
mod validate_invitation;

pub use accept_invitation::AcceptInvitationAction;
pub use change_role::ChangeRoleAction;
pub use create_invitation::{CreateInvitationAction, CreateInvitationInput, CreateInvitationOutput};
pub use create_owner::CreateOwnerMembershipAction;
pub use deactivate_invitation::DeactivateInvitationAction;
pub use list_invitations::ListActiveInvitationsAction;
pub use members::{GetMembershipAction, ListMembersAction, ListUserTournamentsAction};
pub use remove_member::RemoveMemberAction;
pub use transfer_ownership::TransferOwnershipAction;
pub use update_trainer_teams::UpdateTrainerTeamsAction;
pub use validate_invitation::ValidateInvitationAction;

use crate::AccessError;
use crate::tournaments::{MembershipRepository, TournamentMembership};

/// The acting user's membership in a tournament.
///
/// A missing membership means the actor has no standing there at all.
async fn actor_membership<M: MembershipRepository>(
    membership_repo: &M,
    tournament_id: &str,
    actor_user_id: &str,
) -> Result<TournamentMembership, AccessError> {
    membership_repo
        .find_by_tournament_and_user(tournament_id, actor_user_id)
        .await?
        .ok_or(AccessError::Unauthenticated)
}
