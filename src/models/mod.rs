//! Data models for the coaching application.
//!
//! Field names follow the snake_case JSON contract used by existing clients.

mod feedback;
mod member;
mod team;

pub use feedback::*;
pub use member::*;
pub use team::*;
