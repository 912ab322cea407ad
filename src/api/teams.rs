//! Team and membership API endpoints.

use axum::extract::{Path, State};

use super::{ApiResponse, ApiResult, JsonBody};
use crate::models::{AssignMemberRequest, CreateTeamRequest, Team, TeamMember, UpdateTeamRequest};
use crate::AppState;

/// GET /api/v1/teams - List all teams with their members.
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Vec<Team>> {
    state.service.list_teams().await.map(ApiResponse::ok)
}

/// GET /api/v1/teams/:id - Get a single team with its members.
pub async fn get_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Team> {
    state.service.get_team(&id).await.map(ApiResponse::ok)
}

/// POST /api/v1/teams - Create a new team.
pub async fn create_team(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateTeamRequest>,
) -> ApiResult<Team> {
    state
        .service
        .create_team(&request)
        .await
        .map(ApiResponse::created)
}

/// PUT /api/v1/teams/:id - Partially update a team.
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateTeamRequest>,
) -> ApiResult<Team> {
    state
        .service
        .update_team(&id, &request)
        .await
        .map(ApiResponse::ok)
}

/// DELETE /api/v1/teams/:id - Delete a team. Members keep their team reference.
pub async fn delete_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.service.delete_team(&id).await?;
    Ok(ApiResponse::ok(()))
}

/// POST /api/v1/teams/assign - Assign a member to a team.
pub async fn assign_member(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AssignMemberRequest>,
) -> ApiResult<TeamMember> {
    state
        .service
        .assign_member(&request.member_id, &request.team_id)
        .await
        .map(ApiResponse::ok)
}

/// DELETE /api/v1/teams/members/:member_id - Remove a member from their team.
pub async fn remove_member_from_team(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> ApiResult<TeamMember> {
    state
        .service
        .remove_member_from_team(&member_id)
        .await
        .map(ApiResponse::ok)
}
