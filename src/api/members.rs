//! Member API endpoints.

use axum::extract::{Path, State};

use super::{ApiResponse, ApiResult, JsonBody};
use crate::models::{CreateMemberRequest, TeamMember, UpdateMemberRequest};
use crate::AppState;

/// GET /api/v1/members - List all members.
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Vec<TeamMember>> {
    let members = state.service.list_members().await?;
    tracing::debug!("Listed {} members", members.len());
    Ok(ApiResponse::ok(members))
}

/// GET /api/v1/members/:id - Get a single member.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TeamMember> {
    state.service.get_member(&id).await.map(ApiResponse::ok)
}

/// POST /api/v1/members - Create a new member.
pub async fn create_member(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateMemberRequest>,
) -> ApiResult<TeamMember> {
    state
        .service
        .create_member(&request)
        .await
        .map(ApiResponse::created)
}

/// PUT /api/v1/members/:id - Partially update a member.
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateMemberRequest>,
) -> ApiResult<TeamMember> {
    state
        .service
        .update_member(&id, &request)
        .await
        .map(ApiResponse::ok)
}

/// DELETE /api/v1/members/:id - Delete a member.
pub async fn delete_member(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.service.delete_member(&id).await?;
    Ok(ApiResponse::ok(()))
}
