//! The persistence contract the domain layer depends on.

use std::future::Future;

use crate::errors::AppError;
use crate::models::{Feedback, FeedbackFilter, FeedbackTarget, Team, TeamMember};

/// A member row about to be inserted. The id is chosen by the caller.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
}

/// A team row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub id: String,
    pub name: String,
    pub logo: String,
}

/// A feedback row about to be inserted, with its target already resolved.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub id: String,
    pub content: String,
    pub target: FeedbackTarget,
    pub target_name: String,
}

/// Entity storage.
///
/// Inserts and updates return [`AppError::Conflict`] when a uniqueness
/// constraint fires. Updates and deletes return [`AppError::NotFound`] when no
/// row matched. Lookups return `Ok(None)` for a missing row. Timestamps are
/// owned by the store.
pub trait EntityStore: Send + Sync {
    fn insert_member(
        &self,
        member: NewMember,
    ) -> impl Future<Output = Result<TeamMember, AppError>> + Send;

    fn find_member(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<TeamMember>, AppError>> + Send;

    fn list_members(&self) -> impl Future<Output = Result<Vec<TeamMember>, AppError>> + Send;

    /// Members whose `team_id` equals `team_id`.
    fn list_team_members(
        &self,
        team_id: &str,
    ) -> impl Future<Output = Result<Vec<TeamMember>, AppError>> + Send;

    /// Members with a non-null `team_id`.
    fn list_assigned_members(
        &self,
    ) -> impl Future<Output = Result<Vec<TeamMember>, AppError>> + Send;

    /// Write name, email and picture. The team reference is left untouched.
    fn update_member(
        &self,
        member: &TeamMember,
    ) -> impl Future<Output = Result<TeamMember, AppError>> + Send;

    /// Write only the team reference of a member.
    fn save_member_team(
        &self,
        member: &TeamMember,
    ) -> impl Future<Output = Result<TeamMember, AppError>> + Send;

    fn delete_member(&self, id: &str) -> impl Future<Output = Result<(), AppError>> + Send;

    fn insert_team(&self, team: NewTeam) -> impl Future<Output = Result<Team, AppError>> + Send;

    /// Look up a team row. `members` is left empty.
    fn find_team(&self, id: &str) -> impl Future<Output = Result<Option<Team>, AppError>> + Send;

    /// All team rows ordered by name, `members` left empty.
    fn list_teams(&self) -> impl Future<Output = Result<Vec<Team>, AppError>> + Send;

    fn update_team(&self, team: &Team) -> impl Future<Output = Result<Team, AppError>> + Send;

    fn delete_team(&self, id: &str) -> impl Future<Output = Result<(), AppError>> + Send;

    fn insert_feedback(
        &self,
        feedback: NewFeedback,
    ) -> impl Future<Output = Result<Feedback, AppError>> + Send;

    fn find_feedback(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Feedback>, AppError>> + Send;

    /// Newest first.
    fn list_feedback(
        &self,
        filter: &FeedbackFilter,
    ) -> impl Future<Output = Result<Vec<Feedback>, AppError>> + Send;

    /// Write only the content. Target columns are immutable.
    fn update_feedback_content(
        &self,
        id: &str,
        content: &str,
    ) -> impl Future<Output = Result<Feedback, AppError>> + Send;

    fn delete_feedback(&self, id: &str) -> impl Future<Output = Result<(), AppError>> + Send;
}
