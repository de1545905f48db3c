//! The actions a single invocation can perform.

use std::fmt;
use std::str::FromStr;

/// One discrete window action, chosen on the command line.
///
/// The four directional actions are mutually exclusive: each invocation
/// snaps to exactly one half of a monitor, never to a quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Top,
    Bottom,
    /// Minimize (set the hidden state).
    Min,
    /// Toggle maximize.
    Max,
}

impl Action {
    /// Whether this action changes the window geometry.
    pub fn is_directional(self) -> bool {
        matches!(self, Action::Left | Action::Right | Action::Top | Action::Bottom)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Left => write!(f, "left"),
            Action::Right => write!(f, "right"),
            Action::Top => write!(f, "top"),
            Action::Bottom => write!(f, "bottom"),
            Action::Min => write!(f, "min"),
            Action::Max => write!(f, "max"),
        }
    }
}

/// Returned when the command-line action is not one of the known names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid action {0:?} (expected left, right, top, bottom, min or max)")]
pub struct ActionParseError(pub String);

impl FromStr for Action {
    type Err = ActionParseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Action::Left),
            "right" => Ok(Action::Right),
            "top" => Ok(Action::Top),
            "bottom" => Ok(Action::Bottom),
            "min" => Ok(Action::Min),
            "max" => Ok(Action::Max),
            _ => Err(ActionParseError(s.to_string())),
        }
    }
}
