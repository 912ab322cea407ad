//! Member operations.

use super::{new_id, warn_not_found, CoachingService};
use crate::db::{EntityStore, NewMember};
use crate::errors::AppError;
use crate::membership;
use crate::models::{CreateMemberRequest, TeamMember, UpdateMemberRequest};
use crate::validation::{self, canonical, canonical_non_empty};

const DUPLICATE_EMAIL: &str = "A member with this email already exists";

impl<S: EntityStore> CoachingService<S> {
    pub async fn create_member(&self, request: &CreateMemberRequest) -> Result<TeamMember, AppError> {
        validation::validate_member(request)?;

        let member = self
            .store
            .insert_member(NewMember {
                id: new_id(),
                name: canonical(&request.name),
                email: canonical(&request.email),
                picture: canonical_non_empty(request.picture.as_ref()).unwrap_or_default(),
            })
            .await
            .map_err(|e| e.on_conflict(DUPLICATE_EMAIL))?;

        tracing::info!("Created member {}", member.id);
        Ok(member)
    }

    pub async fn list_members(&self) -> Result<Vec<TeamMember>, AppError> {
        self.store.list_members().await
    }

    pub async fn get_member(&self, id: &str) -> Result<TeamMember, AppError> {
        self.store
            .find_member(id)
            .await?
            .ok_or_else(|| AppError::not_found("Member", id))
    }

    /// Merge provided, non-blank fields into the stored member.
    pub async fn update_member(
        &self,
        id: &str,
        request: &UpdateMemberRequest,
    ) -> Result<TeamMember, AppError> {
        let mut member = self.get_member(id).await?;

        validation::validate_member_update(request)?;

        if let Some(name) = canonical_non_empty(request.name.as_ref()) {
            member.name = name;
        }
        if let Some(email) = canonical_non_empty(request.email.as_ref()) {
            member.email = email;
        }
        if let Some(picture) = canonical_non_empty(request.picture.as_ref()) {
            member.picture = picture;
        }

        let member = self
            .store
            .update_member(&member)
            .await
            .map_err(|e| warn_not_found(e.on_conflict(DUPLICATE_EMAIL)))?;

        tracing::info!("Updated member {}", id);
        Ok(member)
    }

    /// Feedback about the member and team references are left in place.
    pub async fn delete_member(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_member(id).await.map_err(warn_not_found)?;
        tracing::info!("Deleted member {}", id);
        Ok(())
    }

    pub async fn assign_member(&self, member_id: &str, team_id: &str) -> Result<TeamMember, AppError> {
        if member_id.trim().is_empty() || team_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Member ID and Team ID are required".to_string(),
            ));
        }
        membership::assign(&self.store, member_id.trim(), team_id.trim()).await
    }

    pub async fn remove_member_from_team(&self, member_id: &str) -> Result<TeamMember, AppError> {
        membership::remove(&self.store, member_id).await
    }
}
