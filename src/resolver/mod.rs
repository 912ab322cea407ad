//! Feedback target resolution.
//!
//! A feedback item names its subject by type and id. Resolution looks the
//! subject up once, at creation, and yields the display name that gets stored
//! on the feedback as a snapshot.

use crate::db::EntityStore;
use crate::errors::AppError;
use crate::models::FeedbackTarget;

/// Resolve the display name of a feedback target, or `NotFound` if it does not exist.
pub async fn resolve_target<S: EntityStore>(
    store: &S,
    target: &FeedbackTarget,
) -> Result<String, AppError> {
    match target {
        FeedbackTarget::Team(id) => resolve_team(store, id).await,
        FeedbackTarget::Member(id) => resolve_member(store, id).await,
    }
}

pub async fn resolve_team<S: EntityStore>(store: &S, id: &str) -> Result<String, AppError> {
    match store.find_team(id).await? {
        Some(team) => Ok(team.name),
        None => {
            tracing::warn!("Feedback target team {} not found", id);
            Err(AppError::NotFound(format!("Team {} not found", id)))
        }
    }
}

pub async fn resolve_member<S: EntityStore>(store: &S, id: &str) -> Result<String, AppError> {
    match store.find_member(id).await? {
        Some(member) => Ok(member.name),
        None => {
            tracing::warn!("Feedback target member {} not found", id);
            Err(AppError::NotFound(format!("Member {} not found", id)))
        }
    }
}
