//! Field validation rules for members, teams and feedback.
//!
//! Every rule is pure. Each check returns the first violated rule so callers
//! can report a single, specific message.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    CreateFeedbackRequest, CreateMemberRequest, CreateTeamRequest, FeedbackFilter, FeedbackQuery,
    FeedbackTarget, TargetType, UpdateFeedbackRequest, UpdateMemberRequest, UpdateTeamRequest,
};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;
pub const CONTENT_MIN_LEN: usize = 5;
pub const CONTENT_MAX_LEN: usize = 1000;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A violated field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Trimmed copy of a string field, the form in which it is persisted.
pub fn canonical(value: &str) -> String {
    value.trim().to_string()
}

/// Trimmed copy of an optional field; `None` when absent or blank.
pub fn canonical_non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_length(
    field: &'static str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{} is required", label)));
    }
    let len = trimmed.chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            format!("{} must be at least {} characters", label, min),
        ));
    }
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("{} must be at most {} characters", label, max),
        ));
    }
    Ok(())
}

pub fn validate_member_name(name: &str) -> Result<(), ValidationError> {
    check_length("name", "name", name, NAME_MIN_LEN, NAME_MAX_LEN)
}

pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    check_length("name", "team name", name, NAME_MIN_LEN, NAME_MAX_LEN)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("email", "email is required"));
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::new("email", "invalid email format"));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    check_length(
        "content",
        "feedback content",
        content,
        CONTENT_MIN_LEN,
        CONTENT_MAX_LEN,
    )
}

pub fn validate_target_type(target_type: &str) -> Result<TargetType, ValidationError> {
    TargetType::parse(target_type).ok_or_else(|| {
        ValidationError::new(
            "target_type",
            "target type must be either 'team' or 'member'",
        )
    })
}

pub fn validate_target_id(target_id: &str) -> Result<(), ValidationError> {
    if target_id.trim().is_empty() {
        return Err(ValidationError::new("target_id", "target ID is required"));
    }
    Ok(())
}

pub fn validate_member(request: &CreateMemberRequest) -> Result<(), ValidationError> {
    validate_member_name(&request.name)?;
    validate_email(&request.email)
}

/// Provided fields are held to the same rules as on create.
pub fn validate_member_update(request: &UpdateMemberRequest) -> Result<(), ValidationError> {
    if let Some(name) = &request.name {
        validate_member_name(name)?;
    }
    if let Some(email) = &request.email {
        validate_email(email)?;
    }
    Ok(())
}

pub fn validate_team(request: &CreateTeamRequest) -> Result<(), ValidationError> {
    validate_team_name(&request.name)
}

pub fn validate_team_update(request: &UpdateTeamRequest) -> Result<(), ValidationError> {
    match &request.name {
        Some(name) => validate_team_name(name),
        None => Ok(()),
    }
}

/// Validate a feedback payload and return the target it points at.
pub fn validate_feedback(request: &CreateFeedbackRequest) -> Result<FeedbackTarget, ValidationError> {
    validate_content(&request.content)?;
    let target_type = validate_target_type(&request.target_type)?;
    validate_target_id(&request.target_id)?;
    Ok(FeedbackTarget::new(target_type, canonical(&request.target_id)))
}

pub fn validate_feedback_update(request: &UpdateFeedbackRequest) -> Result<(), ValidationError> {
    match &request.content {
        Some(content) => validate_content(content),
        None => Ok(()),
    }
}

/// Turn listing query parameters into a filter. Blank parameters mean "no filter".
pub fn parse_feedback_query(query: &FeedbackQuery) -> Result<FeedbackFilter, ValidationError> {
    let target_type = match canonical_non_empty(query.target_type.as_ref()) {
        Some(raw) => Some(validate_target_type(&raw)?),
        None => None,
    };
    Ok(FeedbackFilter {
        target_type,
        target_id: canonical_non_empty(query.target_id.as_ref()),
    })
}
