//! Monitor work areas and the heuristic that decides which monitor a window
//! belongs to.
//!
//! A window straddling two monitors is assigned to the first monitor (in
//! left-to-right order) that holds at least [`DEFAULT_THRESHOLD`] of its
//! area.  When no monitor holds that much, the one with the largest overlap
//! wins.

use crate::geometry::Rectangle;
use log::debug;

/// Share of the window's area a monitor must hold to claim the window
/// outright.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Monitor work areas, sorted by ascending `x`.
///
/// Monitors are assumed to sit side by side; vertically stacked layouts are
/// not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorLayout {
    areas: Vec<Rectangle>,
}

impl MonitorLayout {
    /// Build a layout from work areas in any order.
    pub fn new(mut areas: Vec<Rectangle>) -> Self {
        // Stable, so monitors sharing an x keep the backend's order.
        areas.sort_by_key(|r| r.x);
        Self { areas }
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Work area of monitor `index`.
    pub fn get(&self, index: usize) -> Option<&Rectangle> {
        self.areas.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rectangle> {
        self.areas.iter()
    }

    /// Index of the monitor `window` belongs to, or `None` for an empty
    /// layout.
    ///
    /// Monitors are scanned left to right and the first one holding at
    /// least `threshold` of the window's area is returned immediately.
    /// Otherwise the monitor with the largest intersection wins, ties going
    /// to the lowest index.  A window that touches no monitor at all lands
    /// on monitor 0.
    pub fn monitor_for(&self, window: &Rectangle, threshold: f64) -> Option<usize> {
        let window_area = window.area();
        let mut best: Option<(usize, u64)> = None;

        for (idx, area) in self.areas.iter().enumerate() {
            let shared = window.intersection_area(area);
            debug!("intersection with monitor {} ({}): {} px", idx, area, shared);

            if window_area > 0 && shared as f64 / window_area as f64 >= threshold {
                debug!("threshold met for monitor {}", idx);
                return Some(idx);
            }

            match best {
                Some((_, max)) if shared <= max => {}
                _ => best = Some((idx, shared)),
            }
        }

        best.map(|(idx, _)| idx)
    }
}

/// Space a client reserves along the screen edges (`_NET_WM_STRUT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Strut {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Strut {
    pub fn is_zero(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }
}

/// Shrink each monitor by the clients that reserve space on it.
///
/// `reservations` pairs a client's geometry with its strut.  A client only
/// affects monitors it overlaps with positive area, and it is carved out
/// whole: a left-reserving dock pushes the work area right by the dock's
/// width, a bottom panel trims the panel's height, and so on.  Identical
/// `(geometry, strut)` pairs are only counted once.
pub fn work_areas(monitors: &[Rectangle], reservations: &[(Rectangle, Strut)]) -> Vec<Rectangle> {
    let mut seen: Vec<(Rectangle, Strut)> = Vec::new();
    let mut result = monitors.to_vec();

    for &(client, strut) in reservations {
        if strut.is_zero() {
            continue;
        }
        for area in result.iter_mut() {
            if client.intersection_area(area) == 0 {
                continue;
            }
            if seen.contains(&(client, strut)) {
                continue;
            }
            seen.push((client, strut));

            let mut shrunk = *area;
            if strut.left > 0 || strut.right > 0 {
                if strut.left > 0 {
                    shrunk.x += client.width as i32;
                }
                shrunk.width = shrunk.width.saturating_sub(client.width);
            }
            if strut.top > 0 || strut.bottom > 0 {
                if strut.top > 0 {
                    shrunk.y += client.height as i32;
                }
                shrunk.height = shrunk.height.saturating_sub(client.height);
            }
            debug!("strut {:?} of {} shrinks {} to {}", strut, client, area, shrunk);
            *area = shrunk;
        }
    }

    result
}
