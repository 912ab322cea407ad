//! Team member model.

use serde::{Deserialize, Serialize};

/// A person who can belong to at most one team and receive feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub picture: String,
    /// Weak reference to a team; checked only when assigned.
    pub team_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new team member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Request body for a partial member update. Team assignment goes through the membership routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}
