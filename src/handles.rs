//! Typed handles for toolkit-owned resources.
//!
//! The toolkit hands out opaque identifiers for windows, widgets, text
//! buffers and skeins. Each kind gets its own newtype so a buffer can
//! never be passed where a window is expected.

use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.0)
            }
        }
    };
}

handle!(
    /// A project's top-level window
    WindowHandle,
    "window"
);
handle!(
    /// Any widget inside a window's tree, including detached menus
    WidgetHandle,
    "widget"
);
handle!(
    /// One of the two source editor panes of a project window
    PaneHandle,
    "pane"
);
handle!(
    /// A syntax-aware source buffer
    BufferHandle,
    "buffer"
);
handle!(
    /// A dialogue tree owned by the skein engine
    SkeinHandle,
    "skein"
);

impl From<WindowHandle> for WidgetHandle {
    /// A window is itself a widget in its own tree.
    fn from(window: WindowHandle) -> Self {
        WidgetHandle(window.0)
    }
}

/// Position of the traversal cursor inside a skein
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkeinCursor(pub u64);
