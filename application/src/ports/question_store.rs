//! Question store port
//!
//! Defines the interface to the persistence collaborator that owns
//! question data, identity assignment, and any concurrency control over
//! the underlying storage.

use async_trait::async_trait;
use queue_domain::{Question, QuestionDraft, QuestionId};
use thiserror::Error;

/// Errors that can occur during question store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Question not found: {0}")]
    NotFound(QuestionId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Store error: {0}")]
    Other(String),
}

/// Persistence collaborator for questions
///
/// This port defines how the application layer reaches the question store.
/// Implementations (adapters) live in the infrastructure layer and are
/// solely responsible for identity assignment and concurrent access to the
/// underlying data.
///
/// Mutations against an unknown id fail with [`StoreError::NotFound`].
/// Archiving is terminal: an archived question leaves the active set, and
/// subsequent mutations against its id also fail with `NotFound`.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Store a draft, assigning it a fresh id.
    async fn add_question(&self, draft: QuestionDraft) -> Result<Question, StoreError>;

    /// Fetch all active (non-archived) questions, in stable submission order.
    async fn get_questions(&self) -> Result<Vec<Question>, StoreError>;

    /// Record a response on the question with the given id.
    async fn update_question(&self, id: &QuestionId, response: &str) -> Result<(), StoreError>;

    /// Change the priority of the question with the given id.
    async fn update_question_priority(
        &self,
        id: &QuestionId,
        priority: i32,
    ) -> Result<(), StoreError>;

    /// Remove the question with the given id from the active set.
    async fn archive_question(&self, id: &QuestionId) -> Result<(), StoreError>;
}
