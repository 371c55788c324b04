//! Question queue service.
//!
//! The operation wrapper over the [`QuestionStore`] collaborator. Each of
//! the five operations performs exactly one delegated store call and
//! resolves to exactly one [`Outcome`]; store failures are intercepted at
//! the operation boundary and delivered as data, never as faults. The
//! returned futures are lazy — nothing touches the store until they are
//! polled — and dropping one abandons the delegated call.

use crate::outcome::Outcome;
use crate::ports::question_store::QuestionStore;
use queue_domain::{Question, QuestionDraft, QuestionId, preview};
use std::sync::Arc;
use tracing::{debug, warn};

/// Facade over the question store.
///
/// Stateless pass-through: holds only the injected store reference.
/// Concurrent invocations share no mutable state and need no locking;
/// concurrency control over the underlying data is the store's concern.
pub struct QuestionQueueService {
    store: Arc<dyn QuestionStore>,
}

impl Clone for QuestionQueueService {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl QuestionQueueService {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Submit a new question to the queue.
    ///
    /// The store assigns the id; the outcome carries no value.
    pub async fn submit_question(&self, draft: QuestionDraft) -> Outcome<()> {
        debug!("Submitting question: {}", preview(draft.content(), 80));
        match self.store.add_question(draft).await {
            Ok(question) => {
                debug!("Question stored as {}", question.id);
                Ok(())
            }
            Err(e) => {
                warn!("Submit failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Fetch the active questions, in the store's submission order.
    pub async fn retrieve_questions(&self) -> Outcome<Vec<Question>> {
        match self.store.get_questions().await {
            Ok(questions) => {
                debug!("Retrieved {} active questions", questions.len());
                Ok(questions)
            }
            Err(e) => {
                warn!("Retrieve failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Record a response on a question.
    pub async fn respond_to_question(&self, id: &QuestionId, response: &str) -> Outcome<()> {
        debug!("Responding to question {id}");
        match self.store.update_question(id, response).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Respond to {id} failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Change a question's priority.
    pub async fn prioritize_question(&self, id: &QuestionId, priority: i32) -> Outcome<()> {
        debug!("Setting priority of question {id} to {priority}");
        match self.store.update_question_priority(id, priority).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Prioritize {id} failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Archive a question, removing it from the active queue.
    pub async fn archive_question(&self, id: &QuestionId) -> Outcome<()> {
        debug!("Archiving question {id}");
        match self.store.archive_question(id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Archive {id} failed: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{QueueError, dispatch};
    use crate::ports::question_store::StoreError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockStore {
        add_results: Mutex<VecDeque<Result<Question, StoreError>>>,
        get_results: Mutex<VecDeque<Result<Vec<Question>, StoreError>>>,
        unit_results: Mutex<VecDeque<Result<(), StoreError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockStore {
        fn push_add(&self, result: Result<Question, StoreError>) {
            self.add_results.lock().unwrap().push_back(result);
        }

        fn push_get(&self, result: Result<Vec<Question>, StoreError>) {
            self.get_results.lock().unwrap().push_back(result);
        }

        fn push_unit(&self, result: Result<(), StoreError>) {
            self.unit_results.lock().unwrap().push_back(result);
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuestionStore for MockStore {
        async fn add_question(&self, _draft: QuestionDraft) -> Result<Question, StoreError> {
            self.record("add_question");
            self.add_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(StoreError::Other("no scripted result".to_string())))
        }

        async fn get_questions(&self) -> Result<Vec<Question>, StoreError> {
            self.record("get_questions");
            self.get_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(StoreError::Other("no scripted result".to_string())))
        }

        async fn update_question(
            &self,
            _id: &QuestionId,
            _response: &str,
        ) -> Result<(), StoreError> {
            self.record("update_question");
            self.unit_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(StoreError::Other("no scripted result".to_string())))
        }

        async fn update_question_priority(
            &self,
            _id: &QuestionId,
            _priority: i32,
        ) -> Result<(), StoreError> {
            self.record("update_question_priority");
            self.unit_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(StoreError::Other("no scripted result".to_string())))
        }

        async fn archive_question(&self, _id: &QuestionId) -> Result<(), StoreError> {
            self.record("archive_question");
            self.unit_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(StoreError::Other("no scripted result".to_string())))
        }
    }

    /// Store whose calls never complete, for cancellation tests.
    struct BlockingStore;

    #[async_trait]
    impl QuestionStore for BlockingStore {
        async fn add_question(&self, _draft: QuestionDraft) -> Result<Question, StoreError> {
            std::future::pending().await
        }

        async fn get_questions(&self) -> Result<Vec<Question>, StoreError> {
            std::future::pending().await
        }

        async fn update_question(
            &self,
            _id: &QuestionId,
            _response: &str,
        ) -> Result<(), StoreError> {
            std::future::pending().await
        }

        async fn update_question_priority(
            &self,
            _id: &QuestionId,
            _priority: i32,
        ) -> Result<(), StoreError> {
            std::future::pending().await
        }

        async fn archive_question(&self, _id: &QuestionId) -> Result<(), StoreError> {
            std::future::pending().await
        }
    }

    fn question(id: &str, content: &str) -> Question {
        Question::from_draft(QuestionId::new(id), QuestionDraft::new(content))
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_submit_success_emits_unit() {
        let store = Arc::new(MockStore::default());
        store.push_add(Ok(question("q1", "Why?")));
        let service = QuestionQueueService::new(store.clone());

        let outcome = service.submit_question(QuestionDraft::new("Why?")).await;

        assert!(outcome.is_ok());
        assert_eq!(store.calls(), vec!["add_question"]);
    }

    #[tokio::test]
    async fn test_submit_failure_becomes_data() {
        let store = Arc::new(MockStore::default());
        store.push_add(Err(StoreError::Unavailable("connection refused".to_string())));
        let service = QuestionQueueService::new(store);

        let err = service
            .submit_question(QuestionDraft::new("Why?"))
            .await
            .unwrap_err();

        assert!(matches!(err, QueueError::Store(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_retrieve_preserves_store_order() {
        let store = Arc::new(MockStore::default());
        store.push_get(Ok(vec![question("q1", "first"), question("q2", "second")]));
        let service = QuestionQueueService::new(store);

        let questions = service.retrieve_questions().await.unwrap();

        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
    }

    #[tokio::test]
    async fn test_retrieve_failure_becomes_data() {
        let store = Arc::new(MockStore::default());
        store.push_get(Err(StoreError::Unavailable("timeout".to_string())));
        let service = QuestionQueueService::new(store);

        assert!(service.retrieve_questions().await.is_err());
    }

    #[tokio::test]
    async fn test_respond_success() {
        let store = Arc::new(MockStore::default());
        store.push_unit(Ok(()));
        let service = QuestionQueueService::new(store.clone());

        let outcome = service
            .respond_to_question(&QuestionId::new("q1"), "because")
            .await;

        assert!(outcome.is_ok());
        assert_eq!(store.calls(), vec!["update_question"]);
    }

    #[tokio::test]
    async fn test_respond_unknown_id_is_not_found() {
        let store = Arc::new(MockStore::default());
        store.push_unit(Err(StoreError::NotFound(QuestionId::new("q404"))));
        let service = QuestionQueueService::new(store);

        let err = service
            .respond_to_question(&QuestionId::new("q404"), "answer")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_prioritize_success() {
        let store = Arc::new(MockStore::default());
        store.push_unit(Ok(()));
        let service = QuestionQueueService::new(store.clone());

        let outcome = service
            .prioritize_question(&QuestionId::new("q1"), 5)
            .await;

        assert!(outcome.is_ok());
        assert_eq!(store.calls(), vec!["update_question_priority"]);
    }

    #[tokio::test]
    async fn test_archive_unknown_id_is_not_found() {
        let store = Arc::new(MockStore::default());
        store.push_unit(Err(StoreError::NotFound(QuestionId::new("q404"))));
        let service = QuestionQueueService::new(store);

        let err = service
            .archive_question(&QuestionId::new("q404"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_operation_future_is_lazy() {
        let store = Arc::new(MockStore::default());
        let service = QuestionQueueService::new(store.clone());

        let fut = service.submit_question(QuestionDraft::new("never sent"));
        drop(fut);

        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_invocations_are_independent() {
        let store = Arc::new(MockStore::default());
        store.push_add(Ok(question("q1", "Why?")));
        store.push_add(Ok(question("q2", "Why?")));
        let service = QuestionQueueService::new(store.clone());

        let first = service.submit_question(QuestionDraft::new("Why?")).await;
        let second = service.submit_question(QuestionDraft::new("Why?")).await;

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_dispatched_operation_delivers_via_handle() {
        let store = Arc::new(MockStore::default());
        store.push_add(Ok(question("q1", "Why?")));
        let service = QuestionQueueService::new(store);

        let handle = dispatch(async move {
            service.submit_question(QuestionDraft::new("Why?")).await
        });

        assert!(handle.outcome().await.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_abandons_inflight_call() {
        let service = QuestionQueueService::new(Arc::new(BlockingStore));

        let handle = dispatch(async move {
            service.submit_question(QuestionDraft::new("Why?")).await
        });
        handle.cancel();

        assert!(handle.outcome().await.unwrap_err().is_cancelled());
    }
}
