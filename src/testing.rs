//! Recording fakes for the collaborator traits.
//!
//! All fakes share one `ToolkitState`, so tests can inspect the exact
//! order of calls the registry made across collaborators.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::handles::{
    BufferHandle, PaneHandle, SkeinCursor, SkeinHandle, WidgetHandle, WindowHandle,
};
use crate::runner::RunState;
use crate::services::{
    ProjectRunner, Services, SkeinEngine, TextBufferFactory, WindowFactory, WindowListEntry,
    WindowListListener,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateWindow(WindowHandle),
    DestroyWindow(WindowHandle),
    SetTitle(WindowHandle, String),
    CreateBuffer(BufferHandle),
    Bind(BufferHandle, PaneHandle),
    ReleaseBuffer(BufferHandle),
    CreateSkein(SkeinHandle),
    DestroySkein(SkeinHandle),
    Stop { was_running: bool },
}

#[derive(Debug, Default)]
pub struct ToolkitState {
    last_id: u64,
    pub calls: Vec<Call>,
    pub live_windows: HashSet<WindowHandle>,
    panes: HashMap<WindowHandle, [PaneHandle; 2]>,
    /// Widgets that do not report their window directly (menus)
    detached: HashMap<WidgetHandle, WindowHandle>,
    pub live_skeins: HashSet<SkeinHandle>,
    /// When set, `create_window` hands out this handle instead of a fresh one
    pub reuse_window: Option<WindowHandle>,
}

impl ToolkitState {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Register a menu widget whose window has to be resolved by the factory
    pub fn add_menu_widget(&mut self, window: WindowHandle) -> WidgetHandle {
        let widget = WidgetHandle::from_raw(self.next_id());
        self.detached.insert(widget, window);
        widget
    }

    pub fn panes_of(&self, window: WindowHandle) -> Option<[PaneHandle; 2]> {
        self.panes.get(&window).copied()
    }

    pub fn titles(&self, window: WindowHandle) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetTitle(w, title) if *w == window => Some(title.clone()),
                _ => None,
            })
            .collect()
    }
}

pub type SharedToolkit = Rc<RefCell<ToolkitState>>;

pub struct FakeWindows(SharedToolkit);
pub struct FakeBuffers(SharedToolkit);
pub struct FakeSkeins(SharedToolkit);
pub struct FakeRunner(SharedToolkit);

impl WindowFactory for FakeWindows {
    fn create_window(&mut self) -> WindowHandle {
        let mut state = self.0.borrow_mut();
        let reuse = state.reuse_window;
        let window = match reuse {
            Some(w) => w,
            None => WindowHandle::from_raw(state.next_id()),
        };
        let panes = [
            PaneHandle::from_raw(state.next_id()),
            PaneHandle::from_raw(state.next_id()),
        ];
        state.panes.insert(window, panes);
        state.live_windows.insert(window);
        state.calls.push(Call::CreateWindow(window));
        window
    }

    fn destroy_window(&mut self, window: WindowHandle) {
        let mut state = self.0.borrow_mut();
        state.live_windows.remove(&window);
        state.panes.remove(&window);
        state.detached.retain(|_, w| *w != window);
        state.calls.push(Call::DestroyWindow(window));
    }

    fn set_title(&mut self, window: WindowHandle, title: &str) {
        self.0
            .borrow_mut()
            .calls
            .push(Call::SetTitle(window, title.to_string()));
    }

    fn editor_panes(&self, window: WindowHandle) -> [PaneHandle; 2] {
        self.0.borrow().panes[&window]
    }

    fn toplevel_of(&self, widget: WidgetHandle) -> Option<WindowHandle> {
        let state = self.0.borrow();
        let as_window = WindowHandle::from_raw(widget.raw());
        if state.live_windows.contains(&as_window) {
            return Some(as_window);
        }
        state.detached.get(&widget).copied()
    }
}

impl TextBufferFactory for FakeBuffers {
    fn create_buffer(&mut self) -> BufferHandle {
        let mut state = self.0.borrow_mut();
        let buffer = BufferHandle::from_raw(state.next_id());
        state.calls.push(Call::CreateBuffer(buffer));
        buffer
    }

    fn bind(&mut self, buffer: BufferHandle, pane: PaneHandle) {
        self.0.borrow_mut().calls.push(Call::Bind(buffer, pane));
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        self.0.borrow_mut().calls.push(Call::ReleaseBuffer(buffer));
    }
}

impl SkeinEngine for FakeSkeins {
    fn create_skein(&mut self) -> SkeinHandle {
        let mut state = self.0.borrow_mut();
        let skein = SkeinHandle::from_raw(state.next_id());
        state.live_skeins.insert(skein);
        state.calls.push(Call::CreateSkein(skein));
        skein
    }

    fn start_node(&self, skein: SkeinHandle) -> SkeinCursor {
        SkeinCursor(skein.raw() * 100)
    }

    fn destroy_skein(&mut self, skein: SkeinHandle) {
        let mut state = self.0.borrow_mut();
        state.live_skeins.remove(&skein);
        state.calls.push(Call::DestroySkein(skein));
    }
}

impl ProjectRunner for FakeRunner {
    fn stop(&mut self, run_state: &mut RunState) {
        let was_running = run_state.interp_process.take().is_some();
        for sub in [run_state.child_exit.take(), run_state.commit.take()]
            .into_iter()
            .flatten()
        {
            sub.cancel();
        }
        self.0.borrow_mut().calls.push(Call::Stop { was_running });
    }
}

/// Services wired to fresh fakes, plus the shared state to inspect
pub fn fake_services() -> (Services, SharedToolkit) {
    let state = SharedToolkit::default();
    let services = Services {
        windows: Box::new(FakeWindows(state.clone())),
        buffers: Box::new(FakeBuffers(state.clone())),
        skeins: Box::new(FakeSkeins(state.clone())),
        runner: Box::new(FakeRunner(state.clone())),
    };
    (services, state)
}

/// Listener that keeps every window list it was sent
#[derive(Clone, Default)]
pub struct RecordingListener(pub Rc<RefCell<Vec<Vec<WindowListEntry>>>>);

impl WindowListListener for RecordingListener {
    fn window_list_changed(&mut self, entries: &[WindowListEntry]) {
        self.0.borrow_mut().push(entries.to_vec());
    }
}
