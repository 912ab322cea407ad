//! SQLite implementation of [`EntityStore`].
//!
//! Uses prepared statements; uniqueness violations surface as conflicts through
//! the `From<sqlx::Error>` conversion on [`AppError`].

use chrono::{SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};

use super::{EntityStore, NewFeedback, NewMember, NewTeam};
use crate::errors::AppError;
use crate::models::{Feedback, FeedbackFilter, TargetType, Team, TeamMember};

const MEMBER_COLUMNS: &str = "id, name, email, picture, team_id, created_at, updated_at";
const TEAM_COLUMNS: &str = "id, name, logo, created_at, updated_at";
const FEEDBACK_COLUMNS: &str =
    "id, content, target_type, target_id, target_name, created_at, updated_at";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check that the database answers queries.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Fixed-width UTC timestamp so that text ordering matches time ordering.
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl EntityStore for Repository {
    // ==================== MEMBER OPERATIONS ====================

    async fn insert_member(&self, member: NewMember) -> Result<TeamMember, AppError> {
        let now = now();

        sqlx::query(
            "INSERT INTO members (id, name, email, picture, team_id, created_at, updated_at) VALUES (?, ?, ?, ?, NULL, ?, ?)",
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.picture)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(TeamMember {
            id: member.id,
            name: member.name,
            email: member.email,
            picture: member.picture,
            team_id: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn find_member(&self, id: &str) -> Result<Option<TeamMember>, AppError> {
        let row = sqlx::query(&format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(member_from_row))
    }

    async fn list_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY name, created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(member_from_row).collect())
    }

    async fn list_team_members(&self, team_id: &str) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE team_id = ? ORDER BY name, created_at"
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(member_from_row).collect())
    }

    async fn list_assigned_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE team_id IS NOT NULL ORDER BY name, created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(member_from_row).collect())
    }

    async fn update_member(&self, member: &TeamMember) -> Result<TeamMember, AppError> {
        let now = now();

        let result = sqlx::query(
            "UPDATE members SET name = ?, email = ?, picture = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.picture)
        .bind(&now)
        .bind(&member.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member {} not found", member.id)));
        }

        // Re-read so the returned team reference reflects the stored one.
        self.find_member(&member.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", member.id)))
    }

    async fn save_member_team(&self, member: &TeamMember) -> Result<TeamMember, AppError> {
        let now = now();

        let result = sqlx::query("UPDATE members SET team_id = ?, updated_at = ? WHERE id = ?")
            .bind(&member.team_id)
            .bind(&now)
            .bind(&member.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member {} not found", member.id)));
        }

        Ok(TeamMember {
            updated_at: now,
            ..member.clone()
        })
    }

    async fn delete_member(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member {} not found", id)));
        }

        Ok(())
    }

    // ==================== TEAM OPERATIONS ====================

    async fn insert_team(&self, team: NewTeam) -> Result<Team, AppError> {
        let now = now();

        sqlx::query(
            "INSERT INTO teams (id, name, logo, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&team.id)
        .bind(&team.name)
        .bind(&team.logo)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Team {
            id: team.id,
            name: team.name,
            logo: team.logo,
            members: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn find_team(&self, id: &str) -> Result<Option<Team>, AppError> {
        let row = sqlx::query(&format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(team_from_row))
    }

    async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams ORDER BY name, created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(team_from_row).collect())
    }

    async fn update_team(&self, team: &Team) -> Result<Team, AppError> {
        let now = now();

        let result = sqlx::query("UPDATE teams SET name = ?, logo = ?, updated_at = ? WHERE id = ?")
            .bind(&team.name)
            .bind(&team.logo)
            .bind(&now)
            .bind(&team.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", team.id)));
        }

        Ok(Team {
            updated_at: now,
            ..team.clone()
        })
    }

    async fn delete_team(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }

        Ok(())
    }

    // ==================== FEEDBACK OPERATIONS ====================

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, AppError> {
        let now = now();
        let target_type = feedback.target.target_type();

        sqlx::query(
            "INSERT INTO feedbacks (id, content, target_type, target_id, target_name, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&feedback.id)
        .bind(&feedback.content)
        .bind(target_type.as_str())
        .bind(feedback.target.id())
        .bind(&feedback.target_name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Feedback {
            target_id: feedback.target.id().to_string(),
            id: feedback.id,
            content: feedback.content,
            target_type,
            target_name: feedback.target_name,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn find_feedback(&self, id: &str) -> Result<Option<Feedback>, AppError> {
        let row = sqlx::query(&format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(feedback_from_row).transpose()
    }

    async fn list_feedback(&self, filter: &FeedbackFilter) -> Result<Vec<Feedback>, AppError> {
        // A NULL parameter disables its filter.
        let rows = sqlx::query(&format!(
            r#"SELECT {FEEDBACK_COLUMNS} FROM feedbacks
               WHERE (?1 IS NULL OR target_type = ?1)
                 AND (?2 IS NULL OR target_id = ?2)
               ORDER BY created_at DESC, rowid DESC"#
        ))
        .bind(filter.target_type.map(|t| t.as_str()))
        .bind(filter.target_id.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(feedback_from_row).collect()
    }

    async fn update_feedback_content(&self, id: &str, content: &str) -> Result<Feedback, AppError> {
        let now = now();

        let result = sqlx::query("UPDATE feedbacks SET content = ?, updated_at = ? WHERE id = ?")
            .bind(content)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Feedback {} not found", id)));
        }

        self.find_feedback(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Feedback {} not found", id)))
    }

    async fn delete_feedback(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM feedbacks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Feedback {} not found", id)));
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn member_from_row(row: &sqlx::sqlite::SqliteRow) -> TeamMember {
    TeamMember {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        picture: row.get("picture"),
        team_id: row.get("team_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn team_from_row(row: &sqlx::sqlite::SqliteRow) -> Team {
    Team {
        id: row.get("id"),
        name: row.get("name"),
        logo: row.get("logo"),
        members: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn feedback_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Feedback, AppError> {
    let target_type_str: String = row.get("target_type");
    let target_type = TargetType::parse(&target_type_str).ok_or_else(|| {
        AppError::Internal(format!("Unknown feedback target type {:?}", target_type_str))
    })?;

    Ok(Feedback {
        id: row.get("id"),
        content: row.get("content"),
        target_type,
        target_id: row.get("target_id"),
        target_name: row.get("target_name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::FeedbackTarget;
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"), 1)
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn new_member(id: &str, email: &str) -> NewMember {
        NewMember {
            id: id.to_string(),
            name: "John Doe".to_string(),
            email: email.to_string(),
            picture: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_member() {
        let (repo, _dir) = repo().await;

        let created = repo
            .insert_member(new_member("m1", "john@example.com"))
            .await
            .unwrap();
        assert!(!created.created_at.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let found = repo.find_member("m1").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_member("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict_case_insensitive() {
        let (repo, _dir) = repo().await;

        repo.insert_member(new_member("m1", "john@example.com"))
            .await
            .unwrap();
        let err = repo
            .insert_member(new_member("m2", "JOHN@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_duplicate_team_name_is_conflict() {
        let (repo, _dir) = repo().await;

        let team = |id: &str| NewTeam {
            id: id.to_string(),
            name: "Engineering Team".to_string(),
            logo: String::new(),
        };
        repo.insert_team(team("t1")).await.unwrap();
        let err = repo.insert_team(team("t2")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_member_keeps_team_reference() {
        let (repo, _dir) = repo().await;

        let mut member = repo
            .insert_member(new_member("m1", "john@example.com"))
            .await
            .unwrap();
        member.team_id = Some("t1".to_string());
        repo.save_member_team(&member).await.unwrap();

        let mut renamed = member.clone();
        renamed.name = "Johnny".to_string();
        renamed.team_id = None;
        let updated = repo.update_member(&renamed).await.unwrap();
        assert_eq!(updated.name, "Johnny");
        assert_eq!(updated.team_id.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let (repo, _dir) = repo().await;

        sqlx::query("DROP TABLE members")
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.list_members().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert_eq!(err.message(), "Database operation failed");
        assert!(!err.message().contains("members"));
        assert!(!err.message().contains("no such table"));
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let (repo, _dir) = repo().await;

        assert!(matches!(
            repo.delete_member("nope").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete_team("nope").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete_feedback("nope").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            repo.update_feedback_content("nope", "Hello there").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_feedback_filters_and_orders_newest_first() {
        let (repo, _dir) = repo().await;

        let entries = [
            ("f1", FeedbackTarget::Member("m1".into())),
            ("f2", FeedbackTarget::Team("t1".into())),
            ("f3", FeedbackTarget::Member("m1".into())),
            ("f4", FeedbackTarget::Member("m2".into())),
        ];
        for (id, target) in entries {
            repo.insert_feedback(NewFeedback {
                id: id.to_string(),
                content: "Nice job overall".to_string(),
                target,
                target_name: "Someone".to_string(),
            })
            .await
            .unwrap();
        }

        let all = repo.list_feedback(&FeedbackFilter::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f4", "f3", "f2", "f1"]);

        let members = repo
            .list_feedback(&FeedbackFilter {
                target_type: Some(TargetType::Member),
                target_id: None,
            })
            .await
            .unwrap();
        assert_eq!(members.len(), 3);

        let m1 = repo
            .list_feedback(&FeedbackFilter {
                target_type: Some(TargetType::Member),
                target_id: Some("m1".into()),
            })
            .await
            .unwrap();
        let ids: Vec<_> = m1.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f3", "f1"]);

        let by_id_only = repo
            .list_feedback(&FeedbackFilter {
                target_type: None,
                target_id: Some("t1".into()),
            })
            .await
            .unwrap();
        assert_eq!(by_id_only.len(), 1);
        assert_eq!(by_id_only[0].target_type, TargetType::Team);
    }
}
