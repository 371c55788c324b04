//! Infrastructure layer for question-queue
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileQueueConfig, FileStoreConfig, StoreBackend};
pub use store::{InMemoryQuestionStore, JsonlQuestionStore};
