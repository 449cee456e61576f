//! Turtle state and operations for 2D line interpretation.

use crate::error::{Error, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The state of the drawing turtle.
///
/// A plain snapshot: the interpreter keeps one current state and copies it onto the
/// branch stack on `Push`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position of the pen.
    pub position: DVec2,

    /// Direction of travel in degrees. 0 points along +X, 90 along +Y.
    pub heading: f64,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            heading: 0.0,
        }
    }
}

impl TurtleState {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            heading,
        }
    }

    /// Unit vector along the current heading, `(cos h, sin h)`.
    pub fn direction(&self) -> DVec2 {
        DVec2::from_angle(self.heading.to_radians())
    }

    /// The point `distance` units ahead along the heading.
    pub fn ahead(&self, distance: f64) -> DVec2 {
        self.position + self.direction() * distance
    }

    /// Rotates the heading by `degrees`.
    pub fn turn(&mut self, degrees: f64) {
        self.heading += degrees;
    }
}

/// Sense of a relative turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Towards +Y from +X (counter-clockwise in the math convention).
    Positive,
    Negative,
}

impl TurnDirection {
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    /// Accepts exactly `1` or `-1`.
    pub fn from_sign(sign: i64) -> Result<Self> {
        match sign {
            1 => Ok(Self::Positive),
            -1 => Ok(Self::Negative),
            other => Err(Error::config(format!(
                "turn direction must be -1 or 1, got {other}"
            ))),
        }
    }
}

/// Operations that can be performed by the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move `step * step_mult` along the heading; draws when `draw` is set,
    /// otherwise lifts the pen and starts a new polyline at the destination.
    Forward { draw: bool, step_mult: f64 },
    /// Rotate by `direction * angle_mult * angle`.
    Turn {
        direction: TurnDirection,
        angle_mult: f64,
    },
    /// Rotate by a raw number of degrees, independent of the base angle.
    TurnAbsolute { delta_deg: f64 },
    /// Save the turtle state onto the stack (`[`).
    Push,
    /// Restore the most recently pushed turtle state (`]`).
    Pop,
    Noop,
}

impl TurtleOp {
    pub const DRAW: Self = Self::Forward {
        draw: true,
        step_mult: 1.0,
    };
    pub const MOVE: Self = Self::Forward {
        draw: false,
        step_mult: 1.0,
    };
    pub const LEFT: Self = Self::Turn {
        direction: TurnDirection::Positive,
        angle_mult: 1.0,
    };
    pub const RIGHT: Self = Self::Turn {
        direction: TurnDirection::Negative,
        angle_mult: 1.0,
    };
}

/// What to do with a symbol that has no entry in the command table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultAction {
    /// Draw one base step forward.
    #[default]
    ForwardDraw,
    /// Move one base step forward with the pen up.
    ForwardMove,
    /// Ignore the symbol.
    Noop,
}

impl DefaultAction {
    pub const ALL: [Self; 3] = [Self::ForwardDraw, Self::ForwardMove, Self::Noop];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ForwardDraw => "forward_draw",
            Self::ForwardMove => "forward_move",
            Self::Noop => "noop",
        }
    }

    /// The operation this policy stands in for.
    pub fn op(self) -> TurtleOp {
        match self {
            Self::ForwardDraw => TurtleOp::DRAW,
            Self::ForwardMove => TurtleOp::MOVE,
            Self::Noop => TurtleOp::Noop,
        }
    }
}

impl fmt::Display for DefaultAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                Error::config(format!(
                    "default_action must be 'forward_draw', 'forward_move', or 'noop'; got '{s}'"
                ))
            })
    }
}
