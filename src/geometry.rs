//! Axis-aligned rectangles in screen-pixel space.
//!
//! [`Rectangle`] is a plain value type: every operation returns a new
//! rectangle instead of mutating in place.  [`Adjacency`] names the edge
//! pairs two rectangles can share.

use std::fmt;

/// A shared-edge relation between two rectangles.
///
/// The first half of each name is an edge of `self`, the second an edge of
/// `other`, as passed to [`Rectangle::adjacency`].  `LeftRight` therefore
/// means "my left edge sits on your right edge".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjacency {
    TopTop,
    TopBottom,
    BottomTop,
    BottomBottom,
    LeftLeft,
    LeftRight,
    RightLeft,
    RightRight,
}

impl Adjacency {
    pub const ALL: [Adjacency; 8] = [
        Adjacency::TopTop,
        Adjacency::TopBottom,
        Adjacency::BottomTop,
        Adjacency::BottomBottom,
        Adjacency::LeftLeft,
        Adjacency::LeftRight,
        Adjacency::RightLeft,
        Adjacency::RightRight,
    ];
}

/// An axis-aligned rectangle.
///
/// `width` and `height` are unsigned, so the area is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.x, self.y
        )
    }
}

impl Rectangle {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate one past the right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Y coordinate one past the bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Every edge pair on which `self` and `other` line up exactly.
    ///
    /// Relations are independent of each other, so several may hold at
    /// once.  Identical rectangles are adjacent in every sense and yield
    /// all eight, even though a non-empty rectangle's top never equals its
    /// own bottom.
    pub fn adjacency(&self, other: &Rectangle) -> Vec<Adjacency> {
        if self == other {
            return Adjacency::ALL.to_vec();
        }

        let (top, bottom) = (self.y as i64, self.bottom());
        let (left, right) = (self.x as i64, self.right());
        let (o_top, o_bottom) = (other.y as i64, other.bottom());
        let (o_left, o_right) = (other.x as i64, other.right());

        [
            (top == o_top, Adjacency::TopTop),
            (top == o_bottom, Adjacency::TopBottom),
            (bottom == o_top, Adjacency::BottomTop),
            (bottom == o_bottom, Adjacency::BottomBottom),
            (left == o_left, Adjacency::LeftLeft),
            (left == o_right, Adjacency::LeftRight),
            (right == o_left, Adjacency::RightLeft),
            (right == o_right, Adjacency::RightRight),
        ]
        .into_iter()
        .filter_map(|(holds, adj)| holds.then_some(adj))
        .collect()
    }

    /// Whether the given edge relation holds between `self` and `other`.
    pub fn is_adjacent(&self, other: &Rectangle, relation: Adjacency) -> bool {
        self.adjacency(other).contains(&relation)
    }

    /// The overlapping region of two rectangles.
    ///
    /// Rectangles that merely touch produce a zero-area rectangle; `None`
    /// is reserved for rectangles that are strictly apart on some axis.
    /// The result does not depend on argument order.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let x = (self.x as i64).max(other.x as i64);
        let y = (self.y as i64).max(other.y as i64);
        let width = self.right().min(other.right()) - x;
        let height = self.bottom().min(other.bottom()) - y;

        if width < 0 || height < 0 {
            return None;
        }

        Some(Rectangle {
            x: x as i32,
            y: y as i32,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Area shared with `other`, `0` when they do not overlap.
    pub fn intersection_area(&self, other: &Rectangle) -> u64 {
        self.intersection(other).map_or(0, |r| r.area())
    }

    /// Left half of this rectangle (full height).
    pub fn left_half(&self) -> Rectangle {
        Rectangle {
            width: self.width / 2,
            ..*self
        }
    }

    /// Right half of this rectangle (full height).
    pub fn right_half(&self) -> Rectangle {
        Rectangle {
            x: self.x + (self.width / 2) as i32,
            width: self.width / 2,
            ..*self
        }
    }

    /// Top half of this rectangle (full width).
    pub fn top_half(&self) -> Rectangle {
        Rectangle {
            height: self.height / 2,
            ..*self
        }
    }

    /// Bottom half of this rectangle (full width).
    pub fn bottom_half(&self) -> Rectangle {
        Rectangle {
            y: self.y + (self.height / 2) as i32,
            height: self.height / 2,
            ..*self
        }
    }
}
