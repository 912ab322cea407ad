//! Feedback operations.

use super::{new_id, warn_not_found, CoachingService};
use crate::db::{EntityStore, NewFeedback};
use crate::errors::AppError;
use crate::models::{CreateFeedbackRequest, Feedback, FeedbackQuery, UpdateFeedbackRequest};
use crate::resolver;
use crate::validation::{self, canonical, canonical_non_empty};

impl<S: EntityStore> CoachingService<S> {
    /// Resolve the target, then persist with the target's current name as a snapshot.
    pub async fn create_feedback(&self, request: &CreateFeedbackRequest) -> Result<Feedback, AppError> {
        let target = validation::validate_feedback(request)?;
        let target_name = resolver::resolve_target(&self.store, &target).await?;

        let feedback = self
            .store
            .insert_feedback(NewFeedback {
                id: new_id(),
                content: canonical(&request.content),
                target,
                target_name,
            })
            .await?;

        tracing::info!(
            "Created feedback {} for {} {}",
            feedback.id,
            feedback.target_type,
            feedback.target_id
        );
        Ok(feedback)
    }

    pub async fn list_feedback(&self, query: &FeedbackQuery) -> Result<Vec<Feedback>, AppError> {
        let filter = validation::parse_feedback_query(query)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.store.list_feedback(&filter).await
    }

    pub async fn get_feedback(&self, id: &str) -> Result<Feedback, AppError> {
        self.store
            .find_feedback(id)
            .await?
            .ok_or_else(|| AppError::not_found("Feedback", id))
    }

    /// Only the content changes; the target and its name snapshot are kept as created.
    pub async fn update_feedback(
        &self,
        id: &str,
        request: &UpdateFeedbackRequest,
    ) -> Result<Feedback, AppError> {
        let existing = self.get_feedback(id).await?;

        validation::validate_feedback_update(request)?;

        let feedback = match canonical_non_empty(request.content.as_ref()) {
            Some(content) => self
                .store
                .update_feedback_content(id, &content)
                .await
                .map_err(warn_not_found)?,
            None => existing,
        };

        tracing::info!("Updated feedback {}", id);
        Ok(feedback)
    }

    pub async fn delete_feedback(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_feedback(id).await.map_err(warn_not_found)?;
        tracing::info!("Deleted feedback {}", id);
        Ok(())
    }
}
