//! End-to-end pipeline: config → expansion → turtle → SVG, plus a bounded validation pass.

use crate::config::LSystemConfig;
use crate::drawing::Drawing;
use crate::error::{Error, Result};
use crate::svg::write_svg_file;
use crate::turtle::DefaultAction;
use std::fmt;
use std::path::Path;

/// Number of symbols [`validate`] interprets before giving up on the rest.
pub const VALIDATE_SYMBOL_LIMIT: usize = 10_000;

/// Expands and interprets `config`, streaming symbols straight into the turtle.
pub fn render_drawing(config: &LSystemConfig, default_action: DefaultAction) -> Result<Drawing> {
    log::debug!(
        "rendering '{}' ({} iterations, default action {default_action})",
        config.name,
        config.iterations
    );
    let drawing = config
        .interpreter(default_action)
        .interpret(config.expansion())?;
    log::debug!(
        "'{}' produced {} polylines, {} points",
        config.name,
        drawing.len(),
        drawing.point_count()
    );
    Ok(drawing)
}

/// Renders `config` and writes the SVG to `output`.
pub fn render_to_file(
    config: &LSystemConfig,
    default_action: DefaultAction,
    output: impl AsRef<Path>,
) -> Result<Drawing> {
    let drawing = render_drawing(config, default_action)?;
    write_svg_file(output, &drawing, &config.svg, Some(&config.name))?;
    Ok(drawing)
}

/// Summary produced by [`validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationReport {
    pub name: String,
    pub axiom_len: usize,
    pub iterations: usize,
    pub rules: usize,
    pub commands: usize,
    pub angle: f64,
    pub step: f64,
    pub start: (f64, f64, f64),
    pub margin: f64,
    pub precision: usize,
    pub flip_y: bool,
    /// Symbols actually interpreted.
    pub symbols_sampled: usize,
    /// Whether the expansion continued past [`VALIDATE_SYMBOL_LIMIT`].
    pub truncated: bool,
    pub polylines: usize,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y, heading) = self.start;
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "axiom length: {}", self.axiom_len)?;
        writeln!(f, "iterations: {}", self.iterations)?;
        writeln!(f, "rules: {}", self.rules)?;
        writeln!(
            f,
            "turtle: angle={} step={} start=({x},{y},{heading}deg)",
            self.angle, self.step
        )?;
        writeln!(f, "commands: {}", self.commands)?;
        writeln!(
            f,
            "svg: margin={} precision={} flip_y={}",
            self.margin, self.precision, self.flip_y
        )?;
        let suffix = if self.truncated { "+" } else { "" };
        writeln!(f, "symbols (sampled): {}{suffix}", self.symbols_sampled)?;
        write!(f, "polylines: {}", self.polylines)
    }
}

/// Interprets the first [`VALIDATE_SYMBOL_LIMIT`] symbols of `config` and summarizes them.
///
/// Unlike [`validate`], an empty sample is not an error; the report just counts zero
/// polylines. Interpretation errors (e.g. an unmatched pop) in the sample are returned as-is.
pub fn summarize(config: &LSystemConfig) -> Result<ValidationReport> {
    let mut symbols = config.expansion();
    let mut sampled = 0;
    let drawing = config
        .interpreter(config.turtle.default_action)
        .interpret(
            symbols
                .by_ref()
                .take(VALIDATE_SYMBOL_LIMIT)
                .inspect(|_| sampled += 1),
        )?;
    let truncated = symbols.next().is_some();
    if truncated {
        log::warn!("'{}' truncated at {VALIDATE_SYMBOL_LIMIT} symbols", config.name);
    }

    let start = config.turtle.start;
    Ok(ValidationReport {
        name: config.name.clone(),
        axiom_len: config.axiom.chars().count(),
        iterations: config.iterations,
        rules: config.rules.len(),
        commands: config.commands.len(),
        angle: config.turtle.angle,
        step: config.turtle.step,
        start: (start.position.x, start.position.y, start.heading),
        margin: config.svg.margin,
        precision: config.svg.precision,
        flip_y: config.svg.flip_y,
        symbols_sampled: sampled,
        truncated,
        polylines: drawing.len(),
    })
}

impl ValidationReport {
    /// Fails with [`Error::Geometry`] if the sample drew nothing.
    pub fn require_geometry(&self) -> Result<()> {
        if self.polylines == 0 {
            return Err(Error::Geometry("Config produces no drawable geometry".into()));
        }
        Ok(())
    }
}

/// Cheaply checks that `config` renders.
///
/// Only the first [`VALIDATE_SYMBOL_LIMIT`] symbols of the expansion are interpreted,
/// so grammars with exponential output cost a bounded amount of work.
///
/// # Errors
///
/// Anything [`summarize`] returns, and [`Error::Geometry`] if the sampled prefix draws
/// nothing.
pub fn validate(config: &LSystemConfig) -> Result<ValidationReport> {
    let report = summarize(config)?;
    report.require_geometry()?;
    Ok(report)
}
