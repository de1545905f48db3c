//! X11-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`WindowSystem`](crate::traits::WindowSystem) trait, speaking EWMH over
//! an [`x11rb`] connection.
//!
//! Nothing outside this module should reference X11 directly.

pub mod ewmh;
pub mod session;
