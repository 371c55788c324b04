//! Application layer for question-queue
//!
//! This crate contains the question queue operation wrapper, the store
//! port it delegates to, and application parameters. It depends only on
//! the domain layer.

pub mod outcome;
pub mod params;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use outcome::{Outcome, OutcomeHandle, QueueError, dispatch};
pub use params::QueueParams;
pub use ports::question_store::{QuestionStore, StoreError};
pub use use_cases::question_queue::QuestionQueueService;
