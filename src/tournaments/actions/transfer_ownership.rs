use chrono::Utc;

use super::actor_membership;
use crate::AccessError;
use crate::events::{AccessEvent, dispatch};
use crate::tournaments::permissions::can_transfer_ownership;
use crate::tournaments::{MembershipRepository, TournamentMembership, TournamentRole};

/// Times the old owner's role is written back before giving up.
const COMPENSATION_ATTEMPTS: usize = 2;

/// Action to hand a tournament to one of its co-admins.
///
/// Storage offers no multi-record transactions, so the swap is two writes:
/// demote the owner to co-admin, then promote the co-admin to owner. If the
/// promotion fails the demotion is undone. If that undo fails as well the
/// tournament has no owner, which is reported as
/// [`AccessError::InconsistentOwnershipState`] and raised as an alert event.
pub struct TransferOwnershipAction<M: MembershipRepository> {
    membership_repo: M,
}

impl<M: MembershipRepository> TransferOwnershipAction<M> {
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    /// Moves ownership of `tournament_id` from the actor to `new_owner_user_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - The new owner's membership
    /// - `Err(AccessError::Unauthenticated)` - Actor is not a member of the tournament
    /// - `Err(AccessError::Forbidden(_))` - Actor is not the owner
    /// - `Err(AccessError::NotMember)` - Target user is not a member
    /// - `Err(AccessError::InvalidRole)` - Target is not a co-admin
    /// - `Err(AccessError::Storage(_))` - A write failed and was rolled back
    /// - `Err(AccessError::InconsistentOwnershipState { .. })` - Rollback failed
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "transfer_ownership", skip_all, err)
    )]
    pub async fn execute(
        &self,
        tournament_id: &str,
        new_owner_user_id: &str,
        actor_user_id: &str,
    ) -> Result<TournamentMembership, AccessError> {
        let owner = actor_membership(&self.membership_repo, tournament_id, actor_user_id).await?;

        if !can_transfer_ownership(owner.role) {
            return Err(AccessError::Forbidden("only the owner can transfer ownership"));
        }

        let successor = self
            .membership_repo
            .find_by_tournament_and_user(tournament_id, new_owner_user_id)
            .await?
            .ok_or(AccessError::NotMember)?;

        if successor.role != TournamentRole::CoAdmin {
            return Err(AccessError::InvalidRole);
        }

        self.membership_repo
            .update_role(&owner.id, TournamentRole::CoAdmin, &[])
            .await?;

        let promoted = match self
            .membership_repo
            .update_role(&successor.id, TournamentRole::Owner, &[])
            .await
        {
            Ok(promoted) => promoted,
            Err(err) => {
                log::warn!(
                    target: "tourney_access",
                    "msg=\"ownership promotion failed, restoring owner\", tournament_id={}, error=\"{:?}\"",
                    tournament_id,
                    err
                );
                self.restore_owner(&owner, new_owner_user_id).await?;
                return Err(err);
            }
        };

        log::info!(
            target: "tourney_access",
            "msg=\"ownership transferred\", tournament_id={}, from={}, to={}",
            tournament_id,
            actor_user_id,
            new_owner_user_id
        );

        dispatch(AccessEvent::OwnershipTransferred {
            tournament_id: tournament_id.to_owned(),
            former_owner_id: actor_user_id.to_owned(),
            new_owner_id: new_owner_user_id.to_owned(),
            at: Utc::now(),
        })
        .await;

        Ok(promoted)
    }

    /// Compensating write for a failed promotion.
    async fn restore_owner(
        &self,
        owner: &TournamentMembership,
        new_owner_user_id: &str,
    ) -> Result<(), AccessError> {
        let mut last_err = None;

        for attempt in 1..=COMPENSATION_ATTEMPTS {
            match self
                .membership_repo
                .update_role(&owner.id, TournamentRole::Owner, &owner.team_ids)
                .await
            {
                Ok(_) => return Ok(()),
                Err(err) => {
                    log::warn!(
                        target: "tourney_access",
                        "msg=\"owner restore attempt failed\", tournament_id={}, attempt={}, error=\"{:?}\"",
                        owner.tournament_id,
                        attempt,
                        err
                    );
                    last_err = Some(err);
                }
            }
        }

        log::error!(
            target: "tourney_access",
            "msg=\"tournament left without owner\", tournament_id={}, former_owner_id={}, new_owner_id={}, error=\"{:?}\"",
            owner.tournament_id,
            owner.user_id,
            new_owner_user_id,
            last_err
        );

        dispatch(AccessEvent::OwnershipStateInconsistent {
            tournament_id: owner.tournament_id.clone(),
            former_owner_id: owner.user_id.clone(),
            new_owner_id: new_owner_user_id.to_owned(),
            at: Utc::now(),
        })
        .await;

        Err(AccessError::InconsistentOwnershipState {
            tournament_id: owner.tournament_id.clone(),
            former_owner_id: owner.user_id.clone(),
            new_owner_id: new_owner_user_id.to_owned(),
        })
    }
}
