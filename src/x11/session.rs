//! [`WindowSystem`] implementation backed by an X11 connection.
//!
//! Requests follow EWMH: state changes, activation and geometry are client
//! messages sent to the root window, so the window manager stays in charge
//! of the actual placement.  Each one is sent checked and waited on.

use super::ewmh::{self, Atoms};
use crate::geometry::Rectangle;
use crate::monitor::{self, Strut};
use crate::traits::{StateChange, StateFlag, WindowId, WindowSystem, WmVariant};
use log::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};
use x11rb::protocol::xinerama::ConnectionExt as _;
use x11rb::protocol::xproto::{Atom, AtomEnum, ClientMessageEvent, ConnectionExt as _, EventMask, Window};
use x11rb::rust_connection::RustConnection;

/// Errors that can occur when talking to the X server.
#[derive(Debug, thiserror::Error)]
#[error("X11 error: {0}")]
pub struct X11Error(String);

impl From<ConnectError> for X11Error {
    fn from(e: ConnectError) -> Self {
        X11Error(format!("connect: {}", e))
    }
}

impl From<ConnectionError> for X11Error {
    fn from(e: ConnectionError) -> Self {
        X11Error(e.to_string())
    }
}

impl From<ReplyError> for X11Error {
    fn from(e: ReplyError) -> Self {
        X11Error(e.to_string())
    }
}

/// The one X11 connection of a run.
///
/// Opened by [`connect`](X11Session::connect) and owned by whoever drives
/// the action.  Requests are buffered by x11rb until a reply is awaited or
/// [`flush`](WindowSystem::flush) is called.
pub struct X11Session {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
}

impl X11Session {
    /// Connect to `$DISPLAY` and intern the EWMH atoms.
    pub fn connect() -> Result<Self, X11Error> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|s| s.root)
            .ok_or_else(|| X11Error(format!("screen {} not found", screen_num)))?;
        let atoms = Atoms::new(&conn)?.reply()?;
        debug!("connected to screen {}, root 0x{:x}", screen_num, root);
        Ok(Self { conn, root, atoms })
    }

    /// Read a 32-bit property as a list; empty when the property is unset.
    fn property32(
        &self,
        window: Window,
        property: Atom,
        type_: impl Into<Atom>,
    ) -> Result<Vec<u32>, X11Error> {
        let reply = self
            .conn
            .get_property(false, window, property, type_, 0, u32::MAX)?
            .reply()?;
        Ok(reply.value32().map(|v| v.collect()).unwrap_or_default())
    }

    fn send_root_message(
        &self,
        window: Window,
        type_: Atom,
        data: [u32; 5],
    ) -> Result<(), X11Error> {
        let event = ClientMessageEvent::new(32, window, type_, data);
        self.conn
            .send_event(
                false,
                self.root,
                EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
                event,
            )?
            .check()?;
        Ok(())
    }

    /// Walk up to `depth` parents from `window`, stopping below the root.
    fn frame_of(&self, window: Window, depth: usize) -> Result<Window, X11Error> {
        let mut frame = window;
        for _ in 0..depth {
            let tree = self.conn.query_tree(frame)?.reply()?;
            if tree.parent == tree.root || tree.parent == x11rb::NONE {
                break;
            }
            frame = tree.parent;
        }
        Ok(frame)
    }

    /// Geometry of `window` in root coordinates, border included.
    fn absolute_geometry(&self, window: Window) -> Result<Rectangle, X11Error> {
        let geo = self.conn.get_geometry(window)?.reply()?;
        // Translated origin is inside the border.
        let pos = self
            .conn
            .translate_coordinates(window, self.root, 0, 0)?
            .reply()?;
        let inner = Rectangle::new(
            pos.dst_x.into(),
            pos.dst_y.into(),
            geo.width.into(),
            geo.height.into(),
        );
        Ok(ewmh::outer_rect(inner, geo.border_width.into()))
    }

    fn xinerama_screens(&self) -> Result<Vec<Rectangle>, X11Error> {
        if self.conn.xinerama_is_active()?.reply()?.state == 0 {
            return Ok(Vec::new());
        }
        let screens = self.conn.xinerama_query_screens()?.reply()?.screen_info;
        Ok(screens
            .iter()
            .map(|s| {
                Rectangle::new(
                    s.x_org.into(),
                    s.y_org.into(),
                    s.width.into(),
                    s.height.into(),
                )
            })
            .collect())
    }

    /// Physical monitor rectangles, before struts.
    fn monitors(&self) -> Result<Vec<Rectangle>, X11Error> {
        let screens = self.xinerama_screens().unwrap_or_else(|e| {
            warn!("xinerama unavailable ({}), using the root window", e);
            Vec::new()
        });
        if !screens.is_empty() {
            return Ok(screens);
        }
        let root = self.conn.get_geometry(self.root)?.reply()?;
        Ok(vec![Rectangle::new(0, 0, root.width.into(), root.height.into())])
    }

    fn strut(&self, window: Window) -> Result<Option<Strut>, X11Error> {
        let mut values =
            self.property32(window, self.atoms._NET_WM_STRUT_PARTIAL, AtomEnum::CARDINAL)?;
        if values.len() < 4 {
            values = self.property32(window, self.atoms._NET_WM_STRUT, AtomEnum::CARDINAL)?;
        }
        if values.len() < 4 {
            return Ok(None);
        }
        Ok(Some(Strut {
            left: values[0],
            right: values[1],
            top: values[2],
            bottom: values[3],
        }))
    }

    fn reservation(&self, client: Window) -> Result<Option<(Rectangle, Strut)>, X11Error> {
        match self.strut(client)? {
            Some(strut) if !strut.is_zero() => Ok(Some((self.absolute_geometry(client)?, strut))),
            _ => Ok(None),
        }
    }

    /// Geometry and strut of every managed client that reserves space.
    ///
    /// Clients that disappear while being queried are skipped.
    fn reservations(&self) -> Result<Vec<(Rectangle, Strut)>, X11Error> {
        let clients =
            self.property32(self.root, self.atoms._NET_CLIENT_LIST, AtomEnum::WINDOW)?;
        let mut out = Vec::new();
        for client in clients {
            match self.reservation(client) {
                Ok(Some(pair)) => out.push(pair),
                Ok(None) => {}
                Err(e) => warn!("skipping struts of 0x{:x}: {}", client, e),
            }
        }
        Ok(out)
    }
}

impl WindowSystem for X11Session {
    type Error = X11Error;

    fn work_areas(&self) -> Result<Vec<Rectangle>, X11Error> {
        let monitors = self.monitors()?;
        let reservations = self.reservations()?;
        Ok(monitor::work_areas(&monitors, &reservations))
    }

    fn active_window(&self) -> Result<Option<WindowId>, X11Error> {
        let active =
            self.property32(self.root, self.atoms._NET_ACTIVE_WINDOW, AtomEnum::WINDOW)?;
        Ok(active.first().copied().filter(|&w| w != x11rb::NONE))
    }

    fn geometry(&self, window: WindowId, wm: WmVariant) -> Result<Rectangle, X11Error> {
        let frame = self.frame_of(window, wm.frame_depth())?;
        self.absolute_geometry(frame)
    }

    fn window_state(&self, window: WindowId) -> Result<Vec<StateFlag>, X11Error> {
        let atoms = self.property32(window, self.atoms._NET_WM_STATE, AtomEnum::ATOM)?;
        Ok(atoms
            .into_iter()
            .filter_map(|a| self.atoms.state_flag(a))
            .collect())
    }

    fn change_state(
        &self,
        window: WindowId,
        change: StateChange,
        flags: &[StateFlag],
    ) -> Result<(), X11Error> {
        let atoms: Vec<u32> = flags.iter().map(|&f| self.atoms.state_atom(f)).collect();
        for pair in atoms.chunks(2) {
            self.send_root_message(
                window,
                self.atoms._NET_WM_STATE,
                ewmh::wm_state_data(change, pair),
            )?;
        }
        Ok(())
    }

    fn activate(&self, window: WindowId) -> Result<(), X11Error> {
        self.send_root_message(
            window,
            self.atoms._NET_ACTIVE_WINDOW,
            ewmh::active_window_data(),
        )
    }

    fn moveresize(
        &self,
        window: WindowId,
        target: Rectangle,
        wm: WmVariant,
    ) -> Result<(), X11Error> {
        let frame = self.frame_of(window, wm.frame_depth())?;
        let target = if frame == window {
            target
        } else {
            let outer = self.conn.get_geometry(frame)?.reply()?;
            let inner = self.conn.get_geometry(window)?.reply()?;
            let overhead = ewmh::decoration_overhead(
                (outer.width.into(), outer.height.into()),
                outer.border_width.into(),
                (inner.width.into(), inner.height.into()),
            );
            debug!("frame 0x{:x} adds {:?} of decorations", frame, overhead);
            ewmh::client_target(target, overhead)
        };
        self.send_root_message(
            window,
            self.atoms._NET_MOVERESIZE_WINDOW,
            ewmh::moveresize_data(target),
        )
    }

    /// Follow `_NET_SUPPORTING_WM_CHECK` and match the window manager's
    /// `_NET_WM_NAME`.  A check window that does not point back at itself
    /// is stale and yields [`WmVariant::Unknown`].
    fn probe_wm(&self) -> Result<WmVariant, X11Error> {
        let check = self.atoms._NET_SUPPORTING_WM_CHECK;
        let Some(wm_window) = self
            .property32(self.root, check, AtomEnum::WINDOW)?
            .first()
            .copied()
            .filter(|&w| w != x11rb::NONE)
        else {
            warn!("no EWMH-compliant window manager found");
            return Ok(WmVariant::Unknown);
        };

        let own = self.property32(wm_window, check, AtomEnum::WINDOW)?;
        if own.first() != Some(&wm_window) {
            warn!("stale _NET_SUPPORTING_WM_CHECK window 0x{:x}", wm_window);
            return Ok(WmVariant::Unknown);
        }

        let reply = self
            .conn
            .get_property(
                false,
                wm_window,
                self.atoms._NET_WM_NAME,
                self.atoms.UTF8_STRING,
                0,
                u32::MAX,
            )?
            .reply()?;
        let name = String::from_utf8_lossy(&reply.value);
        info!("{} window manager is running", name);
        Ok(WmVariant::from_wm_name(&name))
    }

    fn flush(&self) -> Result<(), X11Error> {
        self.conn.flush()?;
        Ok(())
    }
}
