//! JSONL file-backed question store.
//!
//! Persistence is an append-only event log: every accepted mutation is one
//! JSON line. On open the log is replayed into memory; reads serve from
//! memory, and each write appends its event and flushes before the
//! in-memory state changes, so a failed write leaves the state untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use queue_application::ports::question_store::{QuestionStore, StoreError};
use queue_domain::{Question, QuestionDraft, QuestionId};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

/// One record in the event log.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum StoreEvent {
    Added {
        question: Question,
        timestamp: DateTime<Utc>,
    },
    Responded {
        id: QuestionId,
        response: String,
        timestamp: DateTime<Utc>,
    },
    Prioritized {
        id: QuestionId,
        priority: i32,
        timestamp: DateTime<Utc>,
    },
    Archived {
        id: QuestionId,
        timestamp: DateTime<Utc>,
    },
}

/// JSONL-backed [`QuestionStore`] adapter.
///
/// The store assumes exclusive ownership of the log file; opening the same
/// path from two stores at once is unsupported.
pub struct JsonlQuestionStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    questions: Vec<Question>,
    writer: BufWriter<File>,
}

impl Inner {
    fn append(&mut self, event: &StoreEvent) -> Result<(), StoreError> {
        let line = serde_json::to_string(event)
            .map_err(|e| StoreError::Other(format!("encode event: {e}")))?;
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| StoreError::Unavailable(format!("write event log: {e}")))
    }

    fn is_active(&self, id: &QuestionId) -> bool {
        self.questions.iter().any(|q| &q.id == id && !q.archived)
    }
}

impl JsonlQuestionStore {
    /// Open (or create) the store at `path`, replaying any existing log.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("create {}: {e}", parent.display()))
            })?;
        }

        let mut questions = Vec::new();
        if path.exists() {
            let file = File::open(&path)
                .map_err(|e| StoreError::Unavailable(format!("open {}: {e}", path.display())))?;
            for (line_no, line) in BufReader::new(file).lines().enumerate() {
                let line = line
                    .map_err(|e| StoreError::Unavailable(format!("read {}: {e}", path.display())))?;
                if line.trim().is_empty() {
                    continue;
                }
                let event: StoreEvent = serde_json::from_str(&line).map_err(|e| {
                    StoreError::Other(format!(
                        "corrupt event log {} line {}: {e}",
                        path.display(),
                        line_no + 1
                    ))
                })?;
                apply(&mut questions, event);
            }
            debug!(
                "Replayed {} questions from {}",
                questions.len(),
                path.display()
            );
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::Unavailable(format!("open {}: {e}", path.display())))?;

        Ok(Self {
            path,
            inner: Mutex::new(Inner {
                questions,
                writer: BufWriter::new(file),
            }),
        })
    }

    /// Path of the backing log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

fn apply(questions: &mut Vec<Question>, event: StoreEvent) {
    match event {
        StoreEvent::Added { question, .. } => questions.push(question),
        StoreEvent::Responded { id, response, .. } => match find(questions, &id) {
            Some(question) => question.response = Some(response),
            None => warn!("Event log responds to unknown question {id}"),
        },
        StoreEvent::Prioritized { id, priority, .. } => match find(questions, &id) {
            Some(question) => question.priority = priority,
            None => warn!("Event log prioritizes unknown question {id}"),
        },
        StoreEvent::Archived { id, .. } => match find(questions, &id) {
            Some(question) => question.archived = true,
            None => warn!("Event log archives unknown question {id}"),
        },
    }
}

fn find<'a>(questions: &'a mut [Question], id: &QuestionId) -> Option<&'a mut Question> {
    questions.iter_mut().find(|q| &q.id == id)
}

#[async_trait]
impl QuestionStore for JsonlQuestionStore {
    async fn add_question(&self, draft: QuestionDraft) -> Result<Question, StoreError> {
        let question = Question::from_draft(QuestionId::new(Uuid::new_v4().to_string()), draft);
        let mut inner = self.lock_inner()?;
        let event = StoreEvent::Added {
            question: question.clone(),
            timestamp: Utc::now(),
        };
        inner.append(&event)?;
        apply(&mut inner.questions, event);
        Ok(question)
    }

    async fn get_questions(&self) -> Result<Vec<Question>, StoreError> {
        let inner = self.lock_inner()?;
        Ok(inner
            .questions
            .iter()
            .filter(|q| !q.archived)
            .cloned()
            .collect())
    }

    async fn update_question(&self, id: &QuestionId, response: &str) -> Result<(), StoreError> {
        let mut inner = self.lock_inner()?;
        if !inner.is_active(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        let event = StoreEvent::Responded {
            id: id.clone(),
            response: response.to_string(),
            timestamp: Utc::now(),
        };
        inner.append(&event)?;
        apply(&mut inner.questions, event);
        Ok(())
    }

    async fn update_question_priority(
        &self,
        id: &QuestionId,
        priority: i32,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock_inner()?;
        if !inner.is_active(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        let event = StoreEvent::Prioritized {
            id: id.clone(),
            priority,
            timestamp: Utc::now(),
        };
        inner.append(&event)?;
        apply(&mut inner.questions, event);
        Ok(())
    }

    async fn archive_question(&self, id: &QuestionId) -> Result<(), StoreError> {
        let mut inner = self.lock_inner()?;
        if !inner.is_active(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        let event = StoreEvent::Archived {
            id: id.clone(),
            timestamp: Utc::now(),
        };
        inner.append(&event)?;
        apply(&mut inner.questions, event);
        Ok(())
    }
}
