//! In-memory question store.

use async_trait::async_trait;
use queue_application::ports::question_store::{QuestionStore, StoreError};
use queue_domain::{Question, QuestionDraft, QuestionId};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory [`QuestionStore`] adapter.
///
/// Questions live in a `Vec` behind an `RwLock`, in submission order.
/// Intended for tests and ephemeral runs; nothing survives the process.
#[derive(Default)]
pub struct InMemoryQuestionStore {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn new_id() -> QuestionId {
    QuestionId::new(Uuid::new_v4().to_string())
}

fn find_active<'a>(
    questions: &'a mut [Question],
    id: &QuestionId,
) -> Result<&'a mut Question, StoreError> {
    questions
        .iter_mut()
        .find(|q| &q.id == id && !q.archived)
        .ok_or_else(|| StoreError::NotFound(id.clone()))
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn add_question(&self, draft: QuestionDraft) -> Result<Question, StoreError> {
        let question = Question::from_draft(new_id(), draft);
        self.questions.write().await.push(question.clone());
        Ok(question)
    }

    async fn get_questions(&self) -> Result<Vec<Question>, StoreError> {
        let questions = self.questions.read().await;
        Ok(questions.iter().filter(|q| !q.archived).cloned().collect())
    }

    async fn update_question(&self, id: &QuestionId, response: &str) -> Result<(), StoreError> {
        let mut questions = self.questions.write().await;
        let question = find_active(&mut questions, id)?;
        question.response = Some(response.to_string());
        Ok(())
    }

    async fn update_question_priority(
        &self,
        id: &QuestionId,
        priority: i32,
    ) -> Result<(), StoreError> {
        let mut questions = self.questions.write().await;
        let question = find_active(&mut questions, id)?;
        question.priority = priority;
        Ok(())
    }

    async fn archive_question(&self, id: &QuestionId) -> Result<(), StoreError> {
        let mut questions = self.questions.write().await;
        let question = find_active(&mut questions, id)?;
        question.archived = true;
        Ok(())
    }
}
