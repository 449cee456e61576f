//! Interpreter that converts an L-System symbol sequence into a [`Drawing`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`] with any stream of symbols: an
//! [`Expansion`](crate::Expansion), `str::chars()`, or a collected `Vec<char>`.

use crate::drawing::{Drawing, Polyline};
use crate::error::{Error, Result};
use crate::turtle::{DefaultAction, TurtleOp, TurtleState};
use glam::DVec2;
use std::collections::HashMap;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, PartialEq)]
pub struct TurtleConfig {
    /// Base turn angle in degrees, scaled by each turn's multiplier.
    pub angle: f64,
    /// Base forward step, scaled by each forward's multiplier. Must be > 0.
    pub step: f64,
    /// Where the turtle starts and which way it faces.
    pub start: TurtleState,
    /// Operation applied to symbols with no registered mapping.
    pub default_action: DefaultAction,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            angle: 90.0,
            step: 10.0,
            start: TurtleState::default(),
            default_action: DefaultAction::ForwardDraw,
        }
    }
}

/// Polylines under construction. The last one is the active polyline.
#[derive(Debug)]
struct PolylineBuffer {
    polylines: Vec<Polyline>,
}

impl PolylineBuffer {
    fn new(start: DVec2) -> Self {
        Self {
            polylines: vec![vec![start]],
        }
    }

    fn start_new(&mut self, p: DVec2) {
        self.polylines.push(vec![p]);
    }

    /// Extends the active polyline, skipping exact repeats of its last point.
    fn add_point(&mut self, p: DVec2) {
        match self.polylines.last_mut() {
            Some(active) if active.last() == Some(&p) => {}
            Some(active) => active.push(p),
            None => self.start_new(p),
        }
    }

    /// Polylines that never got a second point are dropped by [`Drawing::new`].
    fn finish(self) -> Drawing {
        Drawing::new(self.polylines)
    }
}

/// Interprets L-System output to build a [`Drawing`].
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before calling
    /// [`interpret`](Self::interpret).
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TurtleOp`] to a symbol.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// The operation `symbol` dispatches to, falling back to the default action.
    pub fn op_for(&self, symbol: char) -> TurtleOp {
        self.op_map
            .get(&symbol)
            .copied()
            .unwrap_or_else(|| self.config.default_action.op())
    }

    /// Registers the conventional turtle symbols.
    ///
    /// `F` draws, `f` moves with the pen up, `+`/`-` turn by the base angle, `|` turns
    /// around, and `[`/`]` push and pop. Existing mappings for these symbols are replaced.
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            ('F', TurtleOp::DRAW),
            ('f', TurtleOp::MOVE),
            ('+', TurtleOp::LEFT),
            ('-', TurtleOp::RIGHT),
            ('|', TurtleOp::TurnAbsolute { delta_deg: 180.0 }),
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    /// Interprets `symbols` in order and returns the resulting [`Drawing`].
    ///
    /// The turtle starts at `config.start` with one active polyline holding the start
    /// point.
    ///
    /// # Polylines
    ///
    /// A drawing forward extends the active polyline. A pen-up forward starts a new
    /// polyline at its destination. `Push` keeps drawing into the active polyline so
    /// a branch continues the trunk stroke; `Pop` restores the saved state and starts
    /// a new polyline there, so no segment joins the branch tip back to the trunk.
    /// Polylines with fewer than two points are dropped at the end.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if the base step is not positive, and
    /// [`Error::StackUnderflow`] on a `Pop` with nothing pushed. A non-empty branch
    /// stack at the end of the stream is accepted.
    pub fn interpret<I>(&self, symbols: I) -> Result<Drawing>
    where
        I: IntoIterator<Item = char>,
    {
        let TurtleConfig {
            angle, step, start, ..
        } = self.config;
        if !(step > 0.0) {
            return Err(Error::config(format!("turtle.step must be > 0, got {step}")));
        }

        let mut turtle = start;
        let mut buffer = PolylineBuffer::new(turtle.position);
        let mut stack: Vec<TurtleState> = Vec::new();

        for symbol in symbols {
            match self.op_for(symbol) {
                TurtleOp::Forward { draw, step_mult } => {
                    let next = turtle.ahead(step * step_mult);
                    if draw {
                        buffer.add_point(next);
                    } else {
                        buffer.start_new(next);
                    }
                    turtle.position = next;
                }
                TurtleOp::Turn {
                    direction,
                    angle_mult,
                } => turtle.turn(direction.sign() * angle_mult * angle),
                TurtleOp::TurnAbsolute { delta_deg } => turtle.turn(delta_deg),
                TurtleOp::Push => stack.push(turtle),
                TurtleOp::Pop => {
                    turtle = stack.pop().ok_or(Error::StackUnderflow { symbol })?;
                    buffer.start_new(turtle.position);
                }
                TurtleOp::Noop => {}
            }
        }

        Ok(buffer.finish())
    }
}
