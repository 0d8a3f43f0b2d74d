//! A single open project: window, source buffer, build settings, skein.

use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Result, StoryError};
use crate::handles::{BufferHandle, SkeinCursor, SkeinHandle, WindowHandle};
use crate::runner::RunState;

/// Title shown for projects that have never been saved
pub const UNTITLED: &str = "Untitled";

/// Registry-assigned identity of an open story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoryId(Uuid);

impl StoryId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Virtual machine the compiled story targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoryFormat {
    #[default]
    Z5,
    Z8,
    Glulx,
}

impl StoryFormat {
    /// Raw code stored in project settings for Glulx
    pub const GLULX_CODE: u32 = 256;

    /// Convert a persisted format code (Z-machine version, or 256 for Glulx).
    ///
    /// Codes outside the known set mean the settings were written by
    /// something we do not understand, which is an internal error.
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            5 => Ok(StoryFormat::Z5),
            8 => Ok(StoryFormat::Z8),
            Self::GLULX_CODE => Ok(StoryFormat::Glulx),
            other => Err(StoryError::UnknownStoryFormat(other)),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            StoryFormat::Z5 => 5,
            StoryFormat::Z8 => 8,
            StoryFormat::Glulx => Self::GLULX_CODE,
        }
    }

    /// File extension of the compiled output
    pub fn extension(self) -> &'static str {
        match self {
            StoryFormat::Z5 => "z5",
            StoryFormat::Z8 => "z8",
            StoryFormat::Glulx => "ulx",
        }
    }
}

/// Per-story build options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildSettings {
    pub story_format: StoryFormat,
    /// Wrap the compiled output in a Blorb package
    pub make_blorb: bool,
    pub release: bool,
    pub run: bool,
}

/// One open project
#[derive(Debug)]
pub struct Story {
    id: StoryId,
    filename: Option<PathBuf>,
    window: WindowHandle,
    buffer: BufferHandle,
    pub settings: BuildSettings,
    pub run_state: RunState,
    skein: SkeinHandle,
    pub skein_cursor: SkeinCursor,
}

impl Story {
    pub(crate) fn new(
        window: WindowHandle,
        buffer: BufferHandle,
        skein: SkeinHandle,
        skein_cursor: SkeinCursor,
    ) -> Self {
        Self {
            id: StoryId::new(),
            filename: None,
            window,
            buffer,
            settings: BuildSettings::default(),
            run_state: RunState::default(),
            skein,
            skein_cursor,
        }
    }

    pub fn id(&self) -> StoryId {
        self.id
    }

    /// Project directory, absent for unsaved projects
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub(crate) fn replace_filename(&mut self, path: PathBuf) -> Option<PathBuf> {
        self.filename.replace(path)
    }

    pub fn window(&self) -> WindowHandle {
        self.window
    }

    pub fn buffer(&self) -> BufferHandle {
        self.buffer
    }

    pub fn skein(&self) -> SkeinHandle {
        self.skein
    }

    pub fn interp_running(&self) -> bool {
        self.run_state.is_running()
    }

    pub fn extension(&self) -> &'static str {
        self.settings.story_format.extension()
    }

    /// Title shown in the window bar and the window list
    pub fn title(&self) -> String {
        match &self.filename {
            Some(path) => title_for_path(path),
            None => UNTITLED.to_string(),
        }
    }

    /// Where the compiler writes its output for the current format
    pub fn output_path(&self) -> Option<PathBuf> {
        self.filename
            .as_ref()
            .map(|dir| dir.join("Build").join(format!("output.{}", self.extension())))
    }
}

/// Final path component, or the whole path when it has none (e.g. `/`)
pub(crate) fn title_for_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
