//! Team membership.
//!
//! A member belongs to at most one team through its nullable `team_id`.
//! Existence of both sides is checked at assignment time only; the check and
//! the write are not transactional, so two concurrent assignments for the same
//! member resolve as last-write-wins. Deleting a team leaves its members'
//! references dangling.

use crate::db::EntityStore;
use crate::errors::AppError;
use crate::models::TeamMember;

/// Point `member_id` at `team_id`, replacing any previous team.
pub async fn assign<S: EntityStore>(
    store: &S,
    member_id: &str,
    team_id: &str,
) -> Result<TeamMember, AppError> {
    let mut member = store
        .find_member(member_id)
        .await?
        .ok_or_else(|| AppError::not_found("Member", member_id))?;

    let team = store
        .find_team(team_id)
        .await?
        .ok_or_else(|| AppError::not_found("Team", team_id))?;

    member.team_id = Some(team.id);
    let member = store.save_member_team(&member).await?;

    tracing::info!("Assigned member {} to team {}", member_id, team_id);
    Ok(member)
}

/// Clear the team reference of `member_id`. Succeeds for unassigned members too.
pub async fn remove<S: EntityStore>(store: &S, member_id: &str) -> Result<TeamMember, AppError> {
    let mut member = store
        .find_member(member_id)
        .await?
        .ok_or_else(|| AppError::not_found("Member", member_id))?;

    let previous = member.team_id.take();
    let member = store.save_member_team(&member).await?;

    tracing::info!(
        "Removed member {} from team {}",
        member_id,
        previous.as_deref().unwrap_or("<none>")
    );
    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_database, NewMember, NewTeam, Repository};
    use tempfile::TempDir;

    async fn seeded() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"), 1)
            .await
            .expect("Failed to init DB");
        let repo = Repository::new(pool);

        repo.insert_member(NewMember {
            id: "m1".into(),
            name: "John Doe".into(),
            email: "john@example.com".into(),
            picture: String::new(),
        })
        .await
        .unwrap();
        for (id, name) in [("t1", "Engineering Team"), ("t2", "Design Team")] {
            repo.insert_team(NewTeam {
                id: id.into(),
                name: name.into(),
                logo: String::new(),
            })
            .await
            .unwrap();
        }

        (repo, temp_dir)
    }

    #[tokio::test]
    async fn test_assign_then_remove() {
        let (repo, _dir) = seeded().await;

        let member = assign(&repo, "m1", "t1").await.unwrap();
        assert_eq!(member.team_id.as_deref(), Some("t1"));
        let stored = repo.find_member("m1").await.unwrap().unwrap();
        assert_eq!(stored.team_id.as_deref(), Some("t1"));

        let member = remove(&repo, "m1").await.unwrap();
        assert_eq!(member.team_id, None);
        let stored = repo.find_member("m1").await.unwrap().unwrap();
        assert_eq!(stored.team_id, None);
    }

    #[tokio::test]
    async fn test_reassign_moves_member() {
        let (repo, _dir) = seeded().await;

        assign(&repo, "m1", "t1").await.unwrap();
        assign(&repo, "m1", "t2").await.unwrap();

        assert!(repo.list_team_members("t1").await.unwrap().is_empty());
        let t2 = repo.list_team_members("t2").await.unwrap();
        assert_eq!(t2.len(), 1);
        assert_eq!(t2[0].id, "m1");
    }

    #[tokio::test]
    async fn test_assign_requires_both_sides() {
        let (repo, _dir) = seeded().await;

        let err = assign(&repo, "ghost", "t1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains("Member")));

        let err = assign(&repo, "m1", "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg.contains("Team")));

        // Failed assignment leaves the member untouched.
        let stored = repo.find_member("m1").await.unwrap().unwrap();
        assert_eq!(stored.team_id, None);
    }

    #[tokio::test]
    async fn test_remove_unknown_member_is_not_found() {
        let (repo, _dir) = seeded().await;
        assert!(matches!(
            remove(&repo, "ghost").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_unassigned_member_succeeds() {
        let (repo, _dir) = seeded().await;
        let member = remove(&repo, "m1").await.unwrap();
        assert_eq!(member.team_id, None);
    }
}
