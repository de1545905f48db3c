//! **snaptile** — snap the focused window to half of a monitor.
//!
//! One invocation performs one [`Action`](action::Action): snap the focused
//! window to the left, right, top or bottom half of its monitor, minimize
//! it, or toggle maximize.  Snapping left or right on a window that is
//! already flush with the monitor edge carries it over to the neighbouring
//! monitor.
//!
//! # Architecture
//!
//! * [`geometry`] and [`monitor`] are pure: rectangles, work areas and the
//!   heuristic that decides which monitor a window is on.
//! * [`traits::WindowSystem`] abstracts the windowing system so the snapping
//!   logic is not coupled to X11.
//! * [`tile::Tile`] wraps per-window requests and
//!   [`dispatcher::ActionDispatcher`] runs one action end to end.
//!
//! The concrete backend lives in [`x11`].

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod geometry;
pub mod monitor;
pub mod tile;
pub mod traits;
pub mod x11;
