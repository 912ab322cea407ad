//! Team model.

use serde::{Deserialize, Serialize};

use super::TeamMember;

/// A team. `members` is derived from the members' `team_id` and never stored on the team row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Request body for a partial team update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Request body for assigning a member to a team.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignMemberRequest {
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub team_id: String,
}
