//! Configuration module - IDE preferences read by the story layer
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.config/inform-ide/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//! - The `ConfigStore` lookup used during story teardown
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions
//! - `loader` - File system loading and saving

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_CLEAN_BUILD_FILES, DEFAULT_CLEAN_INDEX_FILES};
pub use types::{CleaningConfig, Config, ConfigStore};

pub use loader::{config_path, load_config, load_config_from, save_config_to};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
