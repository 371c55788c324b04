//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types
//! where appropriate.

use queue_application::QueueParams;
use queue_domain::DEFAULT_PRIORITY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Store backend selection
    pub store: FileStoreConfig,
    /// Queue behavior settings
    pub queue: FileQueueConfig,
}

/// Which store adapter backs the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Append-only JSONL log on disk.
    #[default]
    Jsonl,
    /// In-memory, per-process only.
    Memory,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub backend: StoreBackend,
    /// JSONL log location. Defaults to the platform data directory.
    pub path: Option<PathBuf>,
}

impl FileStoreConfig {
    /// The JSONL log path, explicit or platform default.
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("question-queue")
                .join("questions.jsonl")
        })
    }
}

/// `[queue]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueueConfig {
    /// Priority for submissions that do not specify one.
    pub default_priority: i32,
}

impl Default for FileQueueConfig {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

impl FileQueueConfig {
    /// Convert to application-layer parameters.
    pub fn to_params(&self) -> QueueParams {
        QueueParams::default().with_default_priority(self.default_priority)
    }
}
