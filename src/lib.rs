//! Inform IDE story layer
//!
//! Tracks every open interactive-fiction project: its window, the source
//! buffer shared by the window's two editor panes, build settings, the
//! skein, and the interpreter process while the story runs.
//!
//! The toolkit lives behind the traits in [`services`].

pub mod cleanup;
pub mod config;
pub mod error;
pub mod handles;
pub mod logging;
pub mod registry;
pub mod runner;
pub mod services;
pub mod story;

#[cfg(test)]
mod testing;

pub use error::{ErrorSeverity, Result, ResultExt, StoryError};
pub use registry::StoryRegistry;
pub use story::{BuildSettings, Story, StoryFormat, StoryId};
