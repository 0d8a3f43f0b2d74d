//! Default configuration values

/// Remove compiler output and build logs when a project is closed
pub const DEFAULT_CLEAN_BUILD_FILES: bool = true;

/// Also remove the generated index pages (only applies when build files are cleaned)
pub const DEFAULT_CLEAN_INDEX_FILES: bool = false;

/// Section and key names as used by `ConfigStore::get_bool`
pub const SECTION_CLEANING: &str = "Cleaning";
pub const KEY_BUILD_FILES: &str = "BuildFiles";
pub const KEY_INDEX_FILES: &str = "IndexFiles";
