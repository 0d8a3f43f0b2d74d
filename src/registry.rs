//! Story Registry
//!
//! Owns every open story of the process. It is created once at startup,
//! handed to whoever needs to find or broadcast to projects, and drained
//! with `destroy_all` at shutdown. All access happens on the UI thread.
//!
//! # Lifecycle
//!
//! ```text
//! create()  ──▶ window + buffer (bound to both panes) + empty skein
//!               push to list ──▶ notify window-list listeners
//!
//! destroy() ──▶ remove from list
//!               runner.stop()      (interpreter killed, callbacks cancelled)
//!               clean_project()    (only for saved projects)
//!               release buffer, destroy window, destroy skein
//!               notify window-list listeners
//! ```

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cleanup::{clean_project, CleanReport};
use crate::config::{CleaningConfig, ConfigStore};
use crate::error::{Result, ResultExt, StoryError};
use crate::handles::{BufferHandle, WidgetHandle, WindowHandle};
use crate::logging;
use crate::runner::ProcessExit;
use crate::services::{Services, WindowListEntry, WindowListListener};
use crate::story::{title_for_path, Story, StoryId};

pub struct StoryRegistry {
    stories: Vec<Story>,
    services: Services,
    prefs: Box<dyn ConfigStore>,
    listeners: Vec<Box<dyn WindowListListener>>,
}

impl StoryRegistry {
    pub fn new(services: Services, prefs: Box<dyn ConfigStore>) -> Self {
        Self {
            stories: Vec::new(),
            services,
            prefs,
            listeners: Vec::new(),
        }
    }

    /// Replace the preference store consulted during teardown
    pub fn set_prefs(&mut self, prefs: Box<dyn ConfigStore>) {
        self.prefs = prefs;
    }

    pub fn add_listener(&mut self, listener: Box<dyn WindowListListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Ids of all open stories, in registry order
    pub fn ids(&self) -> Vec<StoryId> {
        self.stories.iter().map(Story::id).collect()
    }

    pub fn get(&self, id: StoryId) -> Option<&Story> {
        self.stories.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: StoryId) -> Option<&mut Story> {
        self.stories.iter_mut().find(|s| s.id() == id)
    }

    fn story_mut(&mut self, id: StoryId) -> Result<&mut Story> {
        self.get_mut(id).ok_or(StoryError::StoryNotFound(id))
    }

    /// Open a new, unsaved project.
    ///
    /// A factory that hands back a window already owned by an open story
    /// is a toolkit bug. Release builds log it and return that story
    /// unchanged, so no two stories ever share a window.
    pub fn create(&mut self) -> StoryId {
        let window = self.services.windows.create_window();
        if let Some(existing) = self.lookup_window(window) {
            crate::debug_panic!("Window factory returned {} which is already open", window);
            return existing;
        }

        let buffer = self.services.buffers.create_buffer();
        for pane in self.services.windows.editor_panes(window) {
            self.services.buffers.bind(buffer, pane);
        }

        let skein = self.services.skeins.create_skein();
        let cursor = self.services.skeins.start_node(skein);

        let story = Story::new(window, buffer, skein, cursor);
        let id = story.id();
        logging::log_story_event(id, "created", &story.title());
        self.stories.push(story);

        self.notify();
        id
    }

    /// Close a project and release everything it owns.
    ///
    /// The story leaves the list before anything is torn down, and its
    /// interpreter is stopped before any resource is released.
    pub fn destroy(&mut self, id: StoryId) -> Result<CleanReport> {
        let index = self
            .stories
            .iter()
            .position(|s| s.id() == id)
            .ok_or(StoryError::StoryNotFound(id))?;
        let mut story = self.stories.remove(index);

        self.services.runner.stop(&mut story.run_state);

        let report = match story.filename() {
            Some(dir) => clean_project(dir, CleaningConfig::from_store(&*self.prefs)),
            None => CleanReport::default(),
        };

        self.services.buffers.release_buffer(story.buffer());
        self.services.windows.destroy_window(story.window());
        self.services.skeins.destroy_skein(story.skein());
        logging::log_story_event(id, "destroyed", &story.title());
        drop(story);

        self.notify();
        Ok(report)
    }

    /// Close every project, in registry order. Used at shutdown.
    pub fn destroy_all(&mut self) {
        for id in self.ids() {
            self.destroy(id).log_err();
        }
    }

    /// Find the story whose window encloses `widget`.
    ///
    /// None is an ordinary answer, e.g. for a global menu action fired
    /// while no project is open.
    pub fn lookup(&self, widget: WidgetHandle) -> Option<StoryId> {
        let window = self.services.windows.toplevel_of(widget)?;
        self.lookup_window(window)
    }

    pub fn lookup_window(&self, window: WindowHandle) -> Option<StoryId> {
        self.stories
            .iter()
            .find(|s| s.window() == window)
            .map(Story::id)
    }

    /// Story whose interpreter has process id `pid`
    pub fn find_by_pid(&self, pid: u32) -> Option<StoryId> {
        self.stories
            .iter()
            .find(|s| s.run_state.interp_process.as_ref().map(|p| p.pid) == Some(pid))
            .map(Story::id)
    }

    /// Apply an exit reported by the runner to the story that owned it
    pub fn mark_exited(&mut self, exit: &ProcessExit) -> Option<StoryId> {
        let id = self.find_by_pid(exit.pid)?;
        let story = self.get_mut(id)?;
        story.run_state.mark_exited(exit.pid);
        debug!(story_id = %id, pid = exit.pid, code = ?exit.code, "Interpreter finished");
        Some(id)
    }

    /// Point a story at its project directory and retitle its window
    pub fn set_filename(&mut self, id: StoryId, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let title = title_for_path(&path);

        let story = self.story_mut(id)?;
        let window = story.window();
        let previous = story.replace_filename(path);
        info!(
            story_id = %id,
            previous = ?previous.as_ref().map(|p| p.display().to_string()),
            title = %title,
            "Story filename changed"
        );

        self.services.windows.set_title(window, &title);
        logging::log_story_event(id, "renamed", &title);
        self.notify();
        Ok(())
    }

    /// Call `f` with every open project window, in registry order.
    ///
    /// `f` cannot reach the registry while the iteration borrows it.
    pub fn for_each_window(&self, mut f: impl FnMut(WindowHandle)) {
        for story in &self.stories {
            f(story.window());
        }
    }

    /// Call `f` with every open source buffer, in registry order
    pub fn for_each_buffer(&self, mut f: impl FnMut(BufferHandle)) {
        for story in &self.stories {
            f(story.buffer());
        }
    }

    /// Output file extension for the story's target format
    pub fn extension_for(&self, id: StoryId) -> Result<&'static str> {
        self.get(id)
            .map(Story::extension)
            .ok_or(StoryError::StoryNotFound(id))
    }

    pub fn output_path(&self, id: StoryId) -> Option<PathBuf> {
        self.get(id).and_then(Story::output_path)
    }

    /// Rows for the Window menu
    pub fn window_list(&self) -> Vec<WindowListEntry> {
        self.stories
            .iter()
            .map(|s| WindowListEntry {
                story: s.id(),
                window: s.window(),
                title: s.title(),
            })
            .collect()
    }

    fn notify(&mut self) {
        let entries = self.window_list();
        for listener in &mut self.listeners {
            listener.window_list_changed(&entries);
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
