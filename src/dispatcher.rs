//! The snap-tile state machine.
//!
//! [`snap_target`] decides where a directional action sends a window;
//! [`ActionDispatcher`] gathers the inputs from a [`WindowSystem`], runs one
//! [`Action`] and applies the result through a [`Tile`].
//!
//! # Horizontal cycling
//!
//! `left` on a window that is not yet flush with its monitor's left edge
//! snaps it to the left half.  Pressing `left` again (now flush) carries it
//! over to the **right** half of the monitor to the left, so repeated
//! presses walk the window across the desktop half a monitor at a time.
//! `right` mirrors this.  On the outermost monitor the action stops.

use crate::action::Action;
use crate::config::Config;
use crate::geometry::{Adjacency, Rectangle};
use crate::monitor::MonitorLayout;
use crate::tile::Tile;
use crate::traits::{WindowSystem, WmVariant};
use log::{debug, info};

/// Possible errors from the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A windowing-system request failed or was not acknowledged.
    #[error("window system error: {0}")]
    WindowSystem(String),
    /// The windowing system reported no monitors.
    #[error("no monitors found")]
    NoMonitors,
    /// Nothing has input focus.
    #[error("no focused window")]
    NoActiveWindow,
}

fn ws_err<E: std::error::Error>(e: E) -> DispatchError {
    DispatchError::WindowSystem(e.to_string())
}

/// Where a directional action sends a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    /// Place the window at `rect`, which lies on monitor `monitor`.
    Move { monitor: usize, rect: Rectangle },
    /// The window is already at the outermost position in that direction.
    Stay,
}

/// What [`ActionDispatcher::handle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Snapped { monitor: usize, rect: Rectangle },
    Unchanged,
    Minimized,
    Maximized,
    Unmaximized,
}

/// Compute the target of a directional `action` for `window`, currently on
/// monitor `current` of `layout`.
///
/// Returns `None` for non-directional actions or an out-of-range
/// `current`.
pub fn snap_target(
    action: Action,
    window: &Rectangle,
    layout: &MonitorLayout,
    current: usize,
) -> Option<SnapTarget> {
    let mon = layout.get(current)?;

    let target = match action {
        Action::Left if window.is_adjacent(mon, Adjacency::LeftLeft) => match current
            .checked_sub(1)
            .and_then(|i| layout.get(i).map(|m| (i, m)))
        {
            Some((prev, m)) => SnapTarget::Move {
                monitor: prev,
                rect: m.right_half(),
            },
            None => SnapTarget::Stay,
        },
        Action::Left => SnapTarget::Move {
            monitor: current,
            rect: mon.left_half(),
        },
        Action::Right if window.is_adjacent(mon, Adjacency::RightRight) => {
            match layout.get(current + 1) {
                Some(m) => SnapTarget::Move {
                    monitor: current + 1,
                    rect: m.left_half(),
                },
                None => SnapTarget::Stay,
            }
        }
        Action::Right => SnapTarget::Move {
            monitor: current,
            rect: mon.right_half(),
        },
        Action::Top => SnapTarget::Move {
            monitor: current,
            rect: mon.top_half(),
        },
        Action::Bottom => SnapTarget::Move {
            monitor: current,
            rect: mon.bottom_half(),
        },
        Action::Min | Action::Max => return None,
    };

    Some(target)
}

/// Runs one [`Action`] against the focused window.
///
/// The dispatcher owns the [`WindowSystem`] handle for the whole run.  It
/// does not flush on its own: the entry point calls
/// [`flush`](ActionDispatcher::flush) exactly once after
/// [`handle`](ActionDispatcher::handle), whatever the outcome.
pub struct ActionDispatcher<W: WindowSystem> {
    ws: W,
    config: Config,
}

impl<W: WindowSystem> ActionDispatcher<W> {
    pub fn new(ws: W, config: Config) -> Self {
        Self { ws, config }
    }

    /// The underlying backend.
    pub fn window_system(&self) -> &W {
        &self.ws
    }

    /// Window-manager variant to frame geometry requests for: the
    /// configured override, or whatever the backend detects.
    pub fn wm_variant(&self) -> Result<WmVariant, DispatchError> {
        match self.config.window_manager {
            Some(wm) => {
                info!("window manager forced to {} by config", wm);
                Ok(wm)
            }
            None => self.ws.probe_wm().map_err(ws_err),
        }
    }

    /// Perform `action` on the focused window.
    ///
    /// Stops at the first failed request; nothing after it is sent.
    pub fn handle(&self, action: Action) -> Result<Outcome, DispatchError> {
        info!("action {}", action);

        let window = self
            .ws
            .active_window()
            .map_err(ws_err)?
            .ok_or(DispatchError::NoActiveWindow)?;
        let wm = self.wm_variant()?;
        let tile = Tile::new(&self.ws, window, wm);

        if action.is_directional() {
            return self.snap(&tile, action);
        }

        if action == Action::Min {
            tile.minimize().map_err(ws_err)?;
            return Ok(Outcome::Minimized);
        }

        if tile.is_maximized().map_err(ws_err)? {
            tile.unmaximize().map_err(ws_err)?;
            Ok(Outcome::Unmaximized)
        } else {
            tile.maximize().map_err(ws_err)?;
            Ok(Outcome::Maximized)
        }
    }

    fn snap(&self, tile: &Tile<'_, W>, action: Action) -> Result<Outcome, DispatchError> {
        let layout = MonitorLayout::new(self.ws.work_areas().map_err(ws_err)?);
        if layout.is_empty() {
            return Err(DispatchError::NoMonitors);
        }
        for (idx, area) in layout.iter().enumerate() {
            debug!("monitor {}: {}", idx, area);
        }

        let rect = tile.geometry().map_err(ws_err)?;
        debug!("window 0x{:x} at {}", tile.id(), rect);

        let current = layout
            .monitor_for(&rect, self.config.monitor_threshold)
            .ok_or(DispatchError::NoMonitors)?;
        debug!("window is on monitor {}", current);

        match snap_target(action, &rect, &layout, current) {
            Some(SnapTarget::Move { monitor, rect }) => {
                info!("snapping {} to {} on monitor {}", action, rect, monitor);
                tile.moveresize(rect).map_err(ws_err)?;
                if self.config.activate_after_snap {
                    tile.activate().map_err(ws_err)?;
                }
                Ok(Outcome::Snapped { monitor, rect })
            }
            Some(SnapTarget::Stay) | None => {
                info!("no monitor beyond {} in direction {}", current, action);
                Ok(Outcome::Unchanged)
            }
        }
    }

    /// Push buffered requests to the server.
    pub fn flush(&self) -> Result<(), DispatchError> {
        self.ws.flush().map_err(ws_err)
    }
}
