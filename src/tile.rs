//! Per-window operations on top of a [`WindowSystem`].

use crate::geometry::Rectangle;
use crate::traits::{StateChange, StateFlag, WindowId, WindowSystem, WmVariant};
use log::debug;

const MAXIMIZED: [StateFlag; 2] = [StateFlag::MaximizedVert, StateFlag::MaximizedHorz];

/// A single window, bound to the backend and window-manager variant it
/// lives under.
///
/// Every mutating call waits for the server's acknowledgement and returns
/// the first error unchanged, so a caller can stop before issuing the next
/// request.
pub struct Tile<'a, W: WindowSystem> {
    ws: &'a W,
    window: WindowId,
    wm: WmVariant,
}

impl<'a, W: WindowSystem> Tile<'a, W> {
    pub fn new(ws: &'a W, window: WindowId, wm: WmVariant) -> Self {
        Self { ws, window, wm }
    }

    pub fn id(&self) -> WindowId {
        self.window
    }

    /// Current frame geometry.
    pub fn geometry(&self) -> Result<Rectangle, W::Error> {
        self.ws.geometry(self.window, self.wm)
    }

    /// True only when both the vertical and horizontal maximize flags are
    /// set.
    pub fn is_maximized(&self) -> Result<bool, W::Error> {
        let state = self.ws.window_state(self.window)?;
        Ok(MAXIMIZED.iter().all(|f| state.contains(f)))
    }

    pub fn maximize(&self) -> Result<(), W::Error> {
        debug!("maximize 0x{:x}", self.window);
        self.ws.change_state(self.window, StateChange::Add, &MAXIMIZED)
    }

    pub fn unmaximize(&self) -> Result<(), W::Error> {
        debug!("unmaximize 0x{:x}", self.window);
        self.ws
            .change_state(self.window, StateChange::Remove, &MAXIMIZED)
    }

    /// Set the hidden state.
    ///
    /// Some window managers ignore a client request for `Hidden` and keep
    /// the window on screen.
    pub fn minimize(&self) -> Result<(), W::Error> {
        debug!("minimize 0x{:x}", self.window);
        self.ws
            .change_state(self.window, StateChange::Add, &[StateFlag::Hidden])
    }

    pub fn activate(&self) -> Result<(), W::Error> {
        debug!("activate 0x{:x}", self.window);
        self.ws.activate(self.window)
    }

    /// Clear maximize, then place the frame at `target`.
    ///
    /// A maximized window would ignore or fight the new geometry, so the
    /// maximize flags are always removed first.  If that fails, no geometry
    /// request is sent.
    pub fn moveresize(&self, target: Rectangle) -> Result<(), W::Error> {
        self.unmaximize()?;
        debug!("moveresize 0x{:x} to {} ({})", self.window, target, self.wm);
        self.ws.moveresize(self.window, target, self.wm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::{Call, MockWs};

    fn ws() -> MockWs {
        MockWs::new(
            vec![Rectangle::new(0, 0, 1920, 1080)],
            Rectangle::new(100, 100, 800, 600),
        )
    }

    #[test]
    fn maximized_needs_both_flags() {
        let ws = ws();
        let tile = Tile::new(&ws, 1, WmVariant::Unknown);
        assert!(!tile.is_maximized().unwrap());

        ws.state.borrow_mut().push(StateFlag::MaximizedVert);
        assert!(!tile.is_maximized().unwrap());

        ws.state.borrow_mut().push(StateFlag::MaximizedHorz);
        assert!(tile.is_maximized().unwrap());
    }

    #[test]
    fn maximize_is_idempotent() {
        let ws = ws();
        let tile = Tile::new(&ws, 1, WmVariant::Unknown);
        tile.maximize().unwrap();
        tile.maximize().unwrap();
        assert!(tile.is_maximized().unwrap());
        assert_eq!(ws.state.borrow().len(), 2);
        tile.unmaximize().unwrap();
        tile.unmaximize().unwrap();
        assert!(!tile.is_maximized().unwrap());
    }

    #[test]
    fn minimize_sets_hidden() {
        let ws = ws();
        Tile::new(&ws, 9, WmVariant::Unknown).minimize().unwrap();
        assert_eq!(
            ws.calls(),
            vec![Call::ChangeState(9, StateChange::Add, vec![StateFlag::Hidden])]
        );
    }

    #[test]
    fn moveresize_unmaximizes_first() {
        let ws = ws();
        *ws.state.borrow_mut() = MAXIMIZED.to_vec();
        let tile = Tile::new(&ws, 1, WmVariant::KWin);
        let target = Rectangle::new(0, 0, 960, 1080);
        tile.moveresize(target).unwrap();

        assert_eq!(
            ws.calls(),
            vec![
                Call::ChangeState(1, StateChange::Remove, MAXIMIZED.to_vec()),
                Call::MoveResize(1, target, WmVariant::KWin),
            ]
        );
        assert_eq!(tile.geometry().unwrap(), target);
        assert!(!tile.is_maximized().unwrap());
    }

    #[test]
    fn failed_unmaximize_skips_geometry() {
        let mut ws = ws();
        ws.fail_state_changes = Some("BadWindow");
        let tile = Tile::new(&ws, 1, WmVariant::Unknown);
        assert!(tile.moveresize(Rectangle::new(0, 0, 10, 10)).is_err());
        assert!(ws.moves().is_empty());
    }

    #[test]
    fn activate_forwards_window() {
        let ws = ws();
        Tile::new(&ws, 42, WmVariant::Unknown).activate().unwrap();
        assert_eq!(ws.calls(), vec![Call::Activate(42)]);
    }
}
