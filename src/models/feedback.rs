//! Feedback model and its polymorphic target.

use serde::{Deserialize, Serialize};

/// Kind of entity a feedback item is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Team,
    Member,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Team => "team",
            TargetType::Member => "member",
        }
    }

    /// Parse the exact wire value. No trimming or case folding.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "team" => Some(TargetType::Team),
            "member" => Some(TargetType::Member),
            _ => None,
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved reference to the subject of a feedback item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackTarget {
    Team(String),
    Member(String),
}

impl FeedbackTarget {
    pub fn new(target_type: TargetType, id: impl Into<String>) -> Self {
        match target_type {
            TargetType::Team => FeedbackTarget::Team(id.into()),
            TargetType::Member => FeedbackTarget::Member(id.into()),
        }
    }

    pub fn target_type(&self) -> TargetType {
        match self {
            FeedbackTarget::Team(_) => TargetType::Team,
            FeedbackTarget::Member(_) => TargetType::Member,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            FeedbackTarget::Team(id) | FeedbackTarget::Member(id) => id,
        }
    }
}

/// A feedback item.
///
/// `target_name` is a snapshot of the target's name at creation time. It is
/// intentionally never refreshed when the target is renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub content: String,
    pub target_type: TargetType,
    pub target_id: String,
    pub target_name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating feedback.
///
/// `target_type` stays a string here so an unknown value is reported by the
/// validation rules rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedbackRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub target_type: String,
    #[serde(default)]
    pub target_id: String,
}

/// Request body for updating feedback. Only the content is mutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFeedbackRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// Optional equality filters for listing feedback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackQuery {
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub target_id: Option<String>,
}

/// Parsed form of [`FeedbackQuery`] handed to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub target_type: Option<TargetType>,
    pub target_id: Option<String>,
}
