//! Utilities shared by the Learnova dashboard crates: durable client storage
//! and path helpers.

pub mod durable_store;
mod path_processing;

pub use durable_store::{DurableStore, InMemoryStore, JsonFileStore, STORE_PATH_ENV, StoreError, default_store_path};
pub use path_processing::{LOG_PATH_ENV, app_config_dir, default_log_path, expand_tilde};
