//! Team operations. Teams are always returned with their derived member list.

use std::collections::HashMap;

use super::{new_id, warn_not_found, CoachingService};
use crate::db::{EntityStore, NewTeam};
use crate::errors::AppError;
use crate::models::{CreateTeamRequest, Team, TeamMember, UpdateTeamRequest};
use crate::validation::{self, canonical, canonical_non_empty};

const DUPLICATE_NAME: &str = "A team with this name already exists";

impl<S: EntityStore> CoachingService<S> {
    pub async fn create_team(&self, request: &CreateTeamRequest) -> Result<Team, AppError> {
        validation::validate_team(request)?;

        let team = self
            .store
            .insert_team(NewTeam {
                id: new_id(),
                name: canonical(&request.name),
                logo: canonical_non_empty(request.logo.as_ref()).unwrap_or_default(),
            })
            .await
            .map_err(|e| e.on_conflict(DUPLICATE_NAME))?;

        tracing::info!("Created team {}", team.id);
        Ok(team)
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let mut teams = self.store.list_teams().await?;

        let mut by_team: HashMap<String, Vec<TeamMember>> = HashMap::new();
        for member in self.store.list_assigned_members().await? {
            if let Some(team_id) = member.team_id.clone() {
                by_team.entry(team_id).or_default().push(member);
            }
        }

        for team in &mut teams {
            team.members = by_team.remove(&team.id).unwrap_or_default();
        }
        Ok(teams)
    }

    pub async fn get_team(&self, id: &str) -> Result<Team, AppError> {
        let mut team = self
            .store
            .find_team(id)
            .await?
            .ok_or_else(|| AppError::not_found("Team", id))?;
        team.members = self.store.list_team_members(id).await?;
        Ok(team)
    }

    pub async fn update_team(&self, id: &str, request: &UpdateTeamRequest) -> Result<Team, AppError> {
        let mut team = self.get_team(id).await?;

        validation::validate_team_update(request)?;

        if let Some(name) = canonical_non_empty(request.name.as_ref()) {
            team.name = name;
        }
        if let Some(logo) = canonical_non_empty(request.logo.as_ref()) {
            team.logo = logo;
        }

        let team = self
            .store
            .update_team(&team)
            .await
            .map_err(|e| warn_not_found(e.on_conflict(DUPLICATE_NAME)))?;

        tracing::info!("Updated team {}", id);
        Ok(team)
    }

    /// Members keep their `team_id`; it simply stops resolving.
    pub async fn delete_team(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_team(id).await.map_err(warn_not_found)?;
        tracing::info!("Deleted team {}", id);
        Ok(())
    }
}
