//! Feedback API endpoints.

use axum::extract::{Path, Query, State};

use super::{ApiResponse, ApiResult, JsonBody};
use crate::models::{CreateFeedbackRequest, Feedback, FeedbackQuery, UpdateFeedbackRequest};
use crate::AppState;

/// GET /api/v1/feedbacks - List feedback, newest first, optionally filtered by target.
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> ApiResult<Vec<Feedback>> {
    let feedbacks = state.service.list_feedback(&query).await?;
    tracing::debug!("Listed {} feedbacks", feedbacks.len());
    Ok(ApiResponse::ok(feedbacks))
}

/// GET /api/v1/feedbacks/:id - Get a single feedback item.
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Feedback> {
    state.service.get_feedback(&id).await.map(ApiResponse::ok)
}

/// POST /api/v1/feedbacks - Create feedback about a team or a member.
pub async fn create_feedback(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateFeedbackRequest>,
) -> ApiResult<Feedback> {
    state
        .service
        .create_feedback(&request)
        .await
        .map(ApiResponse::created)
}

/// PUT /api/v1/feedbacks/:id - Update feedback content.
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateFeedbackRequest>,
) -> ApiResult<Feedback> {
    state
        .service
        .update_feedback(&id, &request)
        .await
        .map(ApiResponse::ok)
}

/// DELETE /api/v1/feedbacks/:id - Delete a feedback item.
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.service.delete_feedback(&id).await?;
    Ok(ApiResponse::ok(()))
}
