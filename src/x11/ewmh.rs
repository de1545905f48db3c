//! EWMH atoms and client-message payloads.
//!
//! Everything here is pure data encoding; the requests themselves are sent
//! by [`X11Session`](super::session::X11Session).

use crate::geometry::Rectangle;
use crate::traits::{StateChange, StateFlag};

// Interned once per session.
x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        _NET_ACTIVE_WINDOW,
        _NET_CLIENT_LIST,
        _NET_MOVERESIZE_WINDOW,
        _NET_SUPPORTING_WM_CHECK,
        _NET_WM_NAME,
        _NET_WM_STATE,
        _NET_WM_STATE_HIDDEN,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_MAXIMIZED_VERT,
        _NET_WM_STRUT,
        _NET_WM_STRUT_PARTIAL,
        UTF8_STRING,
    }
}

/// Source indication for requests made on the user's direct behalf.
pub const SOURCE_USER: u32 = 2;

const STATE_REMOVE: u32 = 0;
const STATE_ADD: u32 = 1;

const MOVERESIZE_X: u32 = 1 << 8;
const MOVERESIZE_Y: u32 = 1 << 9;
const MOVERESIZE_WIDTH: u32 = 1 << 10;
const MOVERESIZE_HEIGHT: u32 = 1 << 11;

impl Atoms {
    pub fn state_atom(&self, flag: StateFlag) -> u32 {
        match flag {
            StateFlag::MaximizedVert => self._NET_WM_STATE_MAXIMIZED_VERT,
            StateFlag::MaximizedHorz => self._NET_WM_STATE_MAXIMIZED_HORZ,
            StateFlag::Hidden => self._NET_WM_STATE_HIDDEN,
        }
    }

    /// Reverse of [`state_atom`](Self::state_atom); `None` for states we do
    /// not track.
    pub fn state_flag(&self, atom: u32) -> Option<StateFlag> {
        [
            StateFlag::MaximizedVert,
            StateFlag::MaximizedHorz,
            StateFlag::Hidden,
        ]
        .into_iter()
        .find(|&f| self.state_atom(f) == atom)
    }
}

/// `_NET_WM_STATE` payload.  The message carries at most two properties,
/// so `atoms` beyond the second are ignored.
pub fn wm_state_data(change: StateChange, atoms: &[u32]) -> [u32; 5] {
    let action = match change {
        StateChange::Add => STATE_ADD,
        StateChange::Remove => STATE_REMOVE,
    };
    [
        action,
        atoms.first().copied().unwrap_or(0),
        atoms.get(1).copied().unwrap_or(0),
        SOURCE_USER,
        0,
    ]
}

/// `_NET_ACTIVE_WINDOW` payload (no timestamp, no current window).
pub fn active_window_data() -> [u32; 5] {
    [SOURCE_USER, x11rb::CURRENT_TIME, 0, 0, 0]
}

/// `_NET_MOVERESIZE_WINDOW` payload setting all four coordinates with the
/// window's own gravity.
pub fn moveresize_data(target: Rectangle) -> [u32; 5] {
    let flags = MOVERESIZE_X | MOVERESIZE_Y | MOVERESIZE_WIDTH | MOVERESIZE_HEIGHT | (SOURCE_USER << 12);
    [
        flags,
        target.x as u32,
        target.y as u32,
        target.width,
        target.height,
    ]
}

/// Shrink `target` by the decoration overhead so that the frame, not the
/// client, ends up covering `target`.  Never shrinks below 1×1.
pub fn client_target(target: Rectangle, overhead: (u32, u32)) -> Rectangle {
    Rectangle {
        width: target.width.saturating_sub(overhead.0).max(1),
        height: target.height.saturating_sub(overhead.1).max(1),
        ..target
    }
}

/// Grow a window's inner geometry by its X border on every side, giving
/// the rectangle it actually occupies on screen.
pub fn outer_rect(inner: Rectangle, border_width: u32) -> Rectangle {
    Rectangle {
        x: inner.x - border_width as i32,
        y: inner.y - border_width as i32,
        width: inner.width + 2 * border_width,
        height: inner.height + 2 * border_width,
    }
}

/// Extra width and height the frame (including its X border) adds around
/// the client.
pub fn decoration_overhead(
    frame: (u32, u32),
    frame_border: u32,
    client: (u32, u32),
) -> (u32, u32) {
    let outer = outer_rect(Rectangle::new(0, 0, frame.0, frame.1), frame_border);
    (
        outer.width.saturating_sub(client.0),
        outer.height.saturating_sub(client.1),
    )
}
