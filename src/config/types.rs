//! Configuration type definitions

use serde::{Deserialize, Serialize};

use super::defaults::*;

// ============================================
// CLEANING CONFIG
// ============================================

/// What to delete from a project directory when its window closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningConfig {
    /// Delete build artifacts (default: true)
    #[serde(default = "default_clean_build_files")]
    pub build_files: bool,
    /// Delete index pages as well (default: false)
    #[serde(default = "default_clean_index_files")]
    pub index_files: bool,
}

fn default_clean_build_files() -> bool {
    DEFAULT_CLEAN_BUILD_FILES
}
fn default_clean_index_files() -> bool {
    DEFAULT_CLEAN_INDEX_FILES
}

impl Default for CleaningConfig {
    fn default() -> Self {
        CleaningConfig {
            build_files: DEFAULT_CLEAN_BUILD_FILES,
            index_files: DEFAULT_CLEAN_INDEX_FILES,
        }
    }
}

// ============================================
// MAIN CONFIG
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub cleaning: CleaningConfig,
}

/// Boolean preference lookup by section and key.
///
/// Unknown keys read as false.
pub trait ConfigStore {
    fn get_bool(&self, section: &str, key: &str) -> bool;
}

impl ConfigStore for Config {
    fn get_bool(&self, section: &str, key: &str) -> bool {
        match (section, key) {
            (SECTION_CLEANING, KEY_BUILD_FILES) => self.cleaning.build_files,
            (SECTION_CLEANING, KEY_INDEX_FILES) => self.cleaning.index_files,
            _ => false,
        }
    }
}

impl CleaningConfig {
    /// Read the cleaning preferences out of any store
    pub fn from_store(store: &dyn ConfigStore) -> Self {
        CleaningConfig {
            build_files: store.get_bool(SECTION_CLEANING, KEY_BUILD_FILES),
            index_files: store.get_bool(SECTION_CLEANING, KEY_INDEX_FILES),
        }
    }
}
