//! Collaborator seams used by the story registry.
//!
//! The registry never talks to the toolkit directly. Window creation,
//! buffer wiring, skein storage and interpreter control are reached
//! through these traits so the host application can plug in its widgets
//! and tests can plug in recorders.

use crate::handles::{
    BufferHandle, PaneHandle, SkeinCursor, SkeinHandle, WidgetHandle, WindowHandle,
};
use crate::runner::RunState;
use crate::story::StoryId;

/// Creates and tears down project windows
pub trait WindowFactory {
    /// Build a new project window with its full widget tree
    fn create_window(&mut self) -> WindowHandle;

    /// Destroy the window and every widget under it
    fn destroy_window(&mut self, window: WindowHandle);

    fn set_title(&mut self, window: WindowHandle, title: &str);

    /// The left and right source panes of a project window
    fn editor_panes(&self, window: WindowHandle) -> [PaneHandle; 2];

    /// Resolve the project window enclosing `widget`.
    ///
    /// Menu widgets do not always report the project window as their own
    /// top-level, so the factory does the resolution. Returns None for
    /// widgets that belong to no project window.
    fn toplevel_of(&self, widget: WidgetHandle) -> Option<WindowHandle>;
}

/// Creates the natural-language source buffer shared by a window's panes
pub trait TextBufferFactory {
    fn create_buffer(&mut self) -> BufferHandle;

    fn bind(&mut self, buffer: BufferHandle, pane: PaneHandle);

    fn release_buffer(&mut self, buffer: BufferHandle);
}

/// Storage for dialogue trees
pub trait SkeinEngine {
    /// Create an empty skein holding only its start node
    fn create_skein(&mut self) -> SkeinHandle;

    fn start_node(&self, skein: SkeinHandle) -> SkeinCursor;

    fn destroy_skein(&mut self, skein: SkeinHandle);
}

/// Controls interpreter processes on behalf of stories
pub trait ProjectRunner {
    /// Stop the interpreter for this run state, if any.
    ///
    /// On return no process is running and both deferred callbacks are
    /// cancelled, so neither can fire for the story afterwards.
    fn stop(&mut self, run_state: &mut RunState);
}

/// One row of the window list shown in every project's Window menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowListEntry {
    pub story: StoryId,
    pub window: WindowHandle,
    pub title: String,
}

/// Observer for changes to the set or titles of open project windows
pub trait WindowListListener {
    fn window_list_changed(&mut self, entries: &[WindowListEntry]);
}

/// The collaborators a registry is constructed with
pub struct Services {
    pub windows: Box<dyn WindowFactory>,
    pub buffers: Box<dyn TextBufferFactory>,
    pub skeins: Box<dyn SkeinEngine>,
    pub runner: Box<dyn ProjectRunner>,
}

/// Lets the host keep using a runner (to start and poll interpreters)
/// after handing it to the registry.
impl<R: ProjectRunner> ProjectRunner for std::rc::Rc<std::cell::RefCell<R>> {
    fn stop(&mut self, run_state: &mut RunState) {
        self.borrow_mut().stop(run_state);
    }
}
