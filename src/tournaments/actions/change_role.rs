use chrono::Utc;

use super::actor_membership;
use crate::AccessError;
use crate::events::{AccessEvent, dispatch};
use crate::tournaments::permissions::{can_change_role, can_set_role_to};
use crate::tournaments::{MembershipRepository, TournamentMembership, TournamentRole};
use crate::validators::validate_team_ids;

/// Action to change a member's role.
///
/// This action:
/// 1. Loads the target membership and the actor's membership in the same tournament
/// 2. Checks the actor may act on the target and grant the new role
/// 3. Overwrites role and team ids in a single write
///
/// Team ids only survive on trainers. Moving a trainer to trainer keeps the
/// existing teams unless new ones are passed.
pub struct ChangeRoleAction<M: MembershipRepository> {
    membership_repo: M,
}

impl<M: MembershipRepository> ChangeRoleAction<M> {
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    /// Changes the role of `membership_id` to `new_role`.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - The updated membership
    /// - `Err(AccessError::NotFound)` - Target membership does not exist
    /// - `Err(AccessError::Unauthenticated)` - Actor is not a member of the tournament
    /// - `Err(AccessError::Forbidden(_))` - The permission matrix rejects the change
    /// - `Err(AccessError::Validation(_))` - Malformed team ids
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "change_role", skip_all, err)
    )]
    pub async fn execute(
        &self,
        membership_id: &str,
        new_role: TournamentRole,
        actor_user_id: &str,
        new_team_ids: Option<Vec<String>>,
    ) -> Result<TournamentMembership, AccessError> {
        let target = self
            .membership_repo
            .find_by_id(membership_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        let actor =
            actor_membership(&self.membership_repo, &target.tournament_id, actor_user_id).await?;

        if !can_change_role(actor.role, target.role) {
            log::warn!(
                target: "tourney_access",
                "msg=\"role change refused\", tournament_id={}, actor_role={}, target_role={}",
                target.tournament_id,
                actor.role,
                target.role
            );
            return Err(AccessError::Forbidden("you cannot change this member's role"));
        }

        if !can_set_role_to(actor.role, target.role, new_role) {
            return Err(AccessError::Forbidden("you cannot assign this role"));
        }

        let team_ids = match (new_role, new_team_ids) {
            (TournamentRole::Trainer, Some(ids)) => {
                validate_team_ids(&ids)?;
                ids
            }
            (TournamentRole::Trainer, None) if target.role == TournamentRole::Trainer => {
                target.team_ids.clone()
            }
            _ => Vec::new(),
        };

        let updated = self
            .membership_repo
            .update_role(&target.id, new_role, &team_ids)
            .await?;

        log::info!(
            target: "tourney_access",
            "msg=\"role changed\", tournament_id={}, membership_id={}, from={}, to={}",
            target.tournament_id,
            target.id,
            target.role,
            new_role
        );

        dispatch(AccessEvent::MemberRoleChanged {
            tournament_id: target.tournament_id,
            membership_id: target.id,
            actor_user_id: actor_user_id.to_owned(),
            from: target.role,
            to: new_role,
            at: Utc::now(),
        })
        .await;

        Ok(updated)
    }
}
