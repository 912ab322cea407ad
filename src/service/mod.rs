//! Entity facade: create/list/get/update/delete per entity plus membership.
//!
//! Each operation validates its payload, canonicalizes string fields, and then
//! talks to the store. Store conflicts are translated into domain messages here.

mod feedback;
mod members;
mod teams;

use crate::db::EntityStore;
use crate::errors::AppError;

/// Domain operations over an explicitly passed store handle.
pub struct CoachingService<S> {
    store: S,
}

impl<S: EntityStore> CoachingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Log a `NotFound` reported by the store; other errors pass through untouched.
fn warn_not_found(err: AppError) -> AppError {
    if let AppError::NotFound(msg) = &err {
        tracing::warn!("{}", msg);
    }
    err
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
