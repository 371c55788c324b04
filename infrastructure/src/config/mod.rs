//! Configuration file loading for question-queue
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./qqueue.toml` or `./.qqueue.toml`
//! 3. Global: `<config_dir>/question-queue/config.toml`
//! 4. Default values

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileQueueConfig, FileStoreConfig, StoreBackend};
pub use loader::ConfigLoader;
