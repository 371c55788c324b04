//! Question entities and value objects.
//!
//! A [`QuestionDraft`] is a question as submitted by a user, before the
//! store has assigned it an identity. A [`Question`] is the stored entity:
//! draft content plus an id, an optional response, and the archived flag.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Priority assigned to drafts that do not specify one.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Unique identifier for a stored question.
///
/// Opaque string, assigned by the question store at submission time.
/// The domain never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a QuestionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for QuestionId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question as submitted, before the store assigns an id.
///
/// Content must not be empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    content: String,
    priority: i32,
}

impl QuestionDraft {
    /// Create a new draft with [`DEFAULT_PRIORITY`].
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace.
    pub fn new(content: impl Into<String>) -> Self {
        match Self::try_new(content) {
            Ok(draft) => draft,
            Err(e) => panic!("{e}"),
        }
    }

    /// Try to create a new draft, validating the content.
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "content must not be empty".to_string(),
            ));
        }
        Ok(Self {
            content,
            priority: DEFAULT_PRIORITY,
        })
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Get the question content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// A stored question.
///
/// Lifecycle: created from a draft at submission, mutated by responding or
/// reprioritizing, terminally archived. An archived question is no longer
/// part of the active queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Store-assigned identifier.
    pub id: QuestionId,
    /// The submitted question text.
    pub content: String,
    /// Response text, absent until someone responds.
    pub response: Option<String>,
    /// Queue priority. Higher means more urgent.
    pub priority: i32,
    /// Whether the question has been archived.
    pub archived: bool,
}

impl Question {
    /// Materialize a draft into a stored question under the given id.
    pub fn from_draft(id: QuestionId, draft: QuestionDraft) -> Self {
        Self {
            id,
            content: draft.content,
            response: None,
            priority: draft.priority,
            archived: false,
        }
    }

    /// Whether a response has been recorded.
    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }

    /// Whether the question has been archived.
    pub fn is_archived(&self) -> bool {
        self.archived
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.content)
    }
}
