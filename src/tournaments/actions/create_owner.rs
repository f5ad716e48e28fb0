use chrono::Utc;

use crate::AccessError;
use crate::crypto::generate_id;
use crate::events::{AccessEvent, dispatch};
use crate::tournaments::{CreateMembership, MembershipRepository, TournamentMembership, TournamentRole};

/// Action that records the creator of a tournament as its owner.
///
/// Called exactly once per tournament, right after the tournament itself is
/// stored. No permission check applies, but a tournament that already has an
/// owner is refused; later owners only come from a transfer.
pub struct CreateOwnerMembershipAction<M: MembershipRepository> {
    membership_repo: M,
}

impl<M: MembershipRepository> CreateOwnerMembershipAction<M> {
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    /// Creates the owner membership.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - Owner membership created
    /// - `Err(AccessError::Forbidden(_))` - The tournament already has an owner
    /// - `Err(_)` - Storage failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_owner_membership", skip_all, err)
    )]
    pub async fn execute(
        &self,
        tournament_id: &str,
        user_id: &str,
    ) -> Result<TournamentMembership, AccessError> {
        let members = self.membership_repo.find_by_tournament(tournament_id).await?;
        if members.iter().any(TournamentMembership::is_owner) {
            log::warn!(
                target: "tourney_access",
                "msg=\"owner membership refused, owner exists\", tournament_id={}, user_id={}",
                tournament_id,
                user_id
            );
            return Err(AccessError::Forbidden("this tournament already has an owner"));
        }

        let now = Utc::now();

        let membership = self
            .membership_repo
            .create(CreateMembership {
                id: generate_id(),
                tournament_id: tournament_id.to_owned(),
                user_id: user_id.to_owned(),
                role: TournamentRole::Owner,
                team_ids: Vec::new(),
                invited_by: None,
                invited_at: None,
                accepted_at: Some(now),
            })
            .await?;

        log::info!(
            target: "tourney_access",
            "msg=\"owner membership created\", tournament_id={}, user_id={}",
            tournament_id,
            user_id
        );

        dispatch(AccessEvent::OwnerMembershipCreated {
            tournament_id: tournament_id.to_owned(),
            user_id: user_id.to_owned(),
            at: now,
        })
        .await;

        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournaments::MockMembershipRepository;
    use crate::tournaments::actions::testing::seed_member;

    #[tokio::test]
    async fn test_create_owner_membership() {
        let repo = MockMembershipRepository::new();
        let action = CreateOwnerMembershipAction::new(repo.clone());

        let membership = action.execute("t1", "u1").await.unwrap();

        assert_eq!(membership.role, TournamentRole::Owner);
        assert_eq!(membership.tournament_id, "t1");
        assert!(membership.team_ids.is_empty());
        assert!(membership.accepted_at.is_some());
        assert_eq!(repo.owner_count("t1"), 1);
    }

    #[tokio::test]
    async fn test_second_call_for_same_user_is_rejected() {
        let repo = MockMembershipRepository::new();
        let action = CreateOwnerMembershipAction::new(repo.clone());

        action.execute("t1", "u1").await.unwrap();
        let result = action.execute("t1", "u1").await;

        assert!(matches!(result, Err(AccessError::Forbidden(_))));
        assert_eq!(repo.owner_count("t1"), 1);
    }

    #[tokio::test]
    async fn test_second_owner_for_tournament_is_rejected() {
        let repo = MockMembershipRepository::new();
        let action = CreateOwnerMembershipAction::new(repo.clone());

        action.execute("t1", "u1").await.unwrap();
        let result = action.execute("t1", "u2").await;

        assert!(matches!(result, Err(AccessError::Forbidden(_))));
        assert_eq!(repo.owner_count("t1"), 1);
        assert!(repo.find_by_tournament_and_user("t1", "u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owners_of_different_tournaments_are_independent() {
        let repo = MockMembershipRepository::new();
        let action = CreateOwnerMembershipAction::new(repo.clone());

        action.execute("t1", "u1").await.unwrap();
        action.execute("t2", "u2").await.unwrap();

        assert_eq!(repo.owner_count("t1"), 1);
        assert_eq!(repo.owner_count("t2"), 1);
    }

    #[tokio::test]
    async fn test_existing_non_owner_members_do_not_block() {
        let repo = MockMembershipRepository::new();
        seed_member(&repo, "t1", "viewer", TournamentRole::Viewer, vec![]).await;

        let membership = CreateOwnerMembershipAction::new(repo.clone())
            .execute("t1", "u1")
            .await
            .unwrap();

        assert!(membership.is_owner());
        assert_eq!(repo.owner_count("t1"), 1);
    }
}
