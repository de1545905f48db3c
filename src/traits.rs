//! The seam between the snapping logic and the windowing system.
//!
//! [`ActionDispatcher`](crate::dispatcher::ActionDispatcher) and
//! [`Tile`](crate::tile::Tile) only depend on [`WindowSystem`]; the X11
//! backend lives in [`x11`](crate::x11) and tests use an in-memory double.

use crate::geometry::Rectangle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque window id, as handed out by the windowing system.
pub type WindowId = u32;

/// The running window manager, as far as geometry requests are concerned.
///
/// Detected once per run and passed explicitly to every call whose framing
/// depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WmVariant {
    #[default]
    Unknown,
    Openbox,
    KWin,
}

impl WmVariant {
    /// Map a `_NET_WM_NAME` value to a variant (case-insensitive).
    pub fn from_wm_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "openbox" => WmVariant::Openbox,
            "kwin" => WmVariant::KWin,
            _ => WmVariant::Unknown,
        }
    }

    /// How many parents up from the client window its decoration frame
    /// sits.  KWin wraps clients twice.
    pub fn frame_depth(self) -> usize {
        match self {
            WmVariant::KWin => 2,
            WmVariant::Openbox | WmVariant::Unknown => 1,
        }
    }
}

impl fmt::Display for WmVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WmVariant::Unknown => write!(f, "unknown"),
            WmVariant::Openbox => write!(f, "openbox"),
            WmVariant::KWin => write!(f, "kwin"),
        }
    }
}

/// Extended window state flags we read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFlag {
    MaximizedVert,
    MaximizedHorz,
    Hidden,
}

/// Whether a state request adds or removes its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateChange {
    Add,
    Remove,
}

/// Abstraction over a windowing-system connection.
///
/// Every mutating method blocks until the server acknowledges the request,
/// so a returned `Ok` means the request was accepted.  Implementations are
/// single-threaded and used for exactly one action.
pub trait WindowSystem {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Work area of every monitor, in whatever order the backend reports.
    fn work_areas(&self) -> Result<Vec<Rectangle>, Self::Error>;

    /// The focused window, or `None` if nothing has focus.
    fn active_window(&self) -> Result<Option<WindowId>, Self::Error>;

    /// Current on-screen geometry of `window`, including its decorations.
    fn geometry(&self, window: WindowId, wm: WmVariant) -> Result<Rectangle, Self::Error>;

    /// The extended state flags currently set on `window`.
    fn window_state(&self, window: WindowId) -> Result<Vec<StateFlag>, Self::Error>;

    /// Add or remove `flags` on `window`.
    fn change_state(
        &self,
        window: WindowId,
        change: StateChange,
        flags: &[StateFlag],
    ) -> Result<(), Self::Error>;

    /// Ask the window manager to focus and raise `window` on the user's
    /// behalf.
    fn activate(&self, window: WindowId) -> Result<(), Self::Error>;

    /// Move and resize `window` so that its frame covers `target`.
    fn moveresize(
        &self,
        window: WindowId,
        target: Rectangle,
        wm: WmVariant,
    ) -> Result<(), Self::Error>;

    /// Identify the running window manager.
    fn probe_wm(&self) -> Result<WmVariant, Self::Error>;

    /// Push any buffered requests to the server.
    fn flush(&self) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording [`WindowSystem`] double shared by the unit tests.

    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        ChangeState(WindowId, StateChange, Vec<StateFlag>),
        Activate(WindowId),
        MoveResize(WindowId, Rectangle, WmVariant),
        Flush,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error: {0}")]
    pub struct MockError(pub &'static str);

    /// In-memory desktop with one window.
    ///
    /// State changes and geometry requests are applied to the window so
    /// that follow-up queries observe them.
    #[derive(Debug)]
    pub struct MockWs {
        pub monitors: Vec<Rectangle>,
        pub active: Option<WindowId>,
        pub geometry: RefCell<Rectangle>,
        pub state: RefCell<Vec<StateFlag>>,
        pub wm: WmVariant,
        pub log: RefCell<Vec<Call>>,
        /// Reject every state change with this message.
        pub fail_state_changes: Option<&'static str>,
    }

    impl MockWs {
        pub fn new(monitors: Vec<Rectangle>, window: Rectangle) -> Self {
            Self {
                monitors,
                active: Some(0x1c0_0003),
                geometry: RefCell::new(window),
                state: RefCell::new(Vec::new()),
                wm: WmVariant::Unknown,
                log: RefCell::new(Vec::new()),
                fail_state_changes: None,
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.log.borrow().clone()
        }

        pub fn moves(&self) -> Vec<Rectangle> {
            self.log
                .borrow()
                .iter()
                .filter_map(|c| match c {
                    Call::MoveResize(_, r, _) => Some(*r),
                    _ => None,
                })
                .collect()
        }
    }

    impl WindowSystem for MockWs {
        type Error = MockError;

        fn work_areas(&self) -> Result<Vec<Rectangle>, MockError> {
            Ok(self.monitors.clone())
        }

        fn active_window(&self) -> Result<Option<WindowId>, MockError> {
            Ok(self.active)
        }

        fn geometry(&self, _window: WindowId, _wm: WmVariant) -> Result<Rectangle, MockError> {
            Ok(*self.geometry.borrow())
        }

        fn window_state(&self, _window: WindowId) -> Result<Vec<StateFlag>, MockError> {
            Ok(self.state.borrow().clone())
        }

        fn change_state(
            &self,
            window: WindowId,
            change: StateChange,
            flags: &[StateFlag],
        ) -> Result<(), MockError> {
            if let Some(msg) = self.fail_state_changes {
                return Err(MockError(msg));
            }
            self.log
                .borrow_mut()
                .push(Call::ChangeState(window, change, flags.to_vec()));
            let mut state = self.state.borrow_mut();
            for flag in flags {
                match change {
                    StateChange::Add if !state.contains(flag) => state.push(*flag),
                    StateChange::Add => {}
                    StateChange::Remove => state.retain(|f| f != flag),
                }
            }
            Ok(())
        }

        fn activate(&self, window: WindowId) -> Result<(), MockError> {
            self.log.borrow_mut().push(Call::Activate(window));
            Ok(())
        }

        fn moveresize(
            &self,
            window: WindowId,
            target: Rectangle,
            wm: WmVariant,
        ) -> Result<(), MockError> {
            self.log
                .borrow_mut()
                .push(Call::MoveResize(window, target, wm));
            *self.geometry.borrow_mut() = target;
            Ok(())
        }

        fn probe_wm(&self) -> Result<WmVariant, MockError> {
            Ok(self.wm)
        }

        fn flush(&self) -> Result<(), MockError> {
            self.log.borrow_mut().push(Call::Flush);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{Call, MockWs};
    use super::*;

    #[test]
    fn wm_name_is_case_insensitive() {
        assert_eq!(WmVariant::from_wm_name("Openbox"), WmVariant::Openbox);
        assert_eq!(WmVariant::from_wm_name("KWin"), WmVariant::KWin);
        assert_eq!(WmVariant::from_wm_name("kwin "), WmVariant::KWin);
        assert_eq!(WmVariant::from_wm_name("xfwm4"), WmVariant::Unknown);
        assert_eq!(WmVariant::from_wm_name(""), WmVariant::Unknown);
    }

    #[test]
    fn kwin_frame_is_two_levels_up() {
        assert_eq!(WmVariant::KWin.frame_depth(), 2);
        assert_eq!(WmVariant::Openbox.frame_depth(), 1);
        assert_eq!(WmVariant::Unknown.frame_depth(), 1);
    }

    #[test]
    fn wm_variant_serde_names() {
        let v: WmVariant = serde_json::from_str("\"kwin\"").unwrap();
        assert_eq!(v, WmVariant::KWin);
        assert_eq!(serde_json::to_string(&WmVariant::Openbox).unwrap(), "\"openbox\"");
        assert_eq!(WmVariant::Openbox.to_string(), "openbox");
    }

    #[test]
    fn mock_records_and_applies_state() {
        let ws = MockWs::new(vec![Rectangle::new(0, 0, 100, 100)], Rectangle::default());
        ws.change_state(7, StateChange::Add, &[StateFlag::Hidden]).unwrap();
        ws.change_state(7, StateChange::Add, &[StateFlag::Hidden]).unwrap();
        assert_eq!(ws.window_state(7).unwrap(), vec![StateFlag::Hidden]);
        ws.change_state(7, StateChange::Remove, &[StateFlag::Hidden]).unwrap();
        assert!(ws.window_state(7).unwrap().is_empty());
        assert_eq!(ws.calls().len(), 3);
        assert_eq!(
            ws.calls()[0],
            Call::ChangeState(7, StateChange::Add, vec![StateFlag::Hidden])
        );
    }
}
