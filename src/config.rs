//! JSON configuration files.
//!
//! [`ConfigFile`] mirrors the file layout one-to-one and is what serde reads and
//! writes. [`LSystemConfig`] is the checked form the rest of the crate works with;
//! convert with `LSystemConfig::try_from(file)` or load straight from disk with
//! [`LSystemConfig::load`].

use crate::error::{Error, Result};
use crate::interpreter::{TurtleConfig, TurtleInterpreter};
use crate::rewriter::{Expansion, RuleSet};
use crate::svg::SvgOptions;
use crate::turtle::{DefaultAction, TurnDirection, TurtleOp, TurtleState};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

fn default_name() -> String {
    "L-System".to_string()
}

fn unit() -> f64 {
    1.0
}

fn default_angle() -> f64 {
    90.0
}

fn default_step() -> f64 {
    10.0
}

/// Root of a configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Human-readable title, written into the SVG `<title>`.
    #[serde(default = "default_name")]
    pub name: String,

    /// Initial word. Required and non-empty.
    #[serde(default)]
    pub axiom: String,

    /// Number of rewriting generations.
    #[serde(default)]
    pub iterations: i64,

    /// Productions keyed by single-character strings.
    #[serde(default)]
    pub rules: BTreeMap<String, String>,

    /// Policy for symbols missing from `turtle.commands`.
    #[serde(default)]
    pub default_action: DefaultAction,

    #[serde(default)]
    pub turtle: TurtleSection,

    #[serde(default)]
    pub svg: SvgOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleSection {
    /// Base turn angle in degrees.
    #[serde(default = "default_angle")]
    pub angle: f64,

    /// Base forward step length.
    #[serde(default = "default_step")]
    pub step: f64,

    #[serde(default)]
    pub start: StartSection,

    /// Command table keyed by single-character strings.
    #[serde(default)]
    pub commands: BTreeMap<String, CommandSpec>,
}

impl Default for TurtleSection {
    fn default() -> Self {
        Self {
            angle: default_angle(),
            step: default_step(),
            start: StartSection::default(),
            commands: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StartSection {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Degrees; 0 faces +X, 90 faces +Y.
    #[serde(default)]
    pub heading: f64,
}

/// One entry of the command table, tagged by its `"type"` field.
///
/// Missing fields and unknown types are rejected by serde while reading the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandSpec {
    Forward {
        draw: bool,
        /// Multiplier of `turtle.step`.
        #[serde(default = "unit")]
        step: f64,
    },
    Turn {
        direction: i64,
        /// Multiplier of `turtle.angle`.
        #[serde(default = "unit")]
        angle: f64,
    },
    TurnAbs {
        /// Raw degrees added to the heading.
        angle: f64,
    },
    Push,
    Pop,
    Noop,
}

impl TryFrom<&CommandSpec> for TurtleOp {
    type Error = Error;

    fn try_from(spec: &CommandSpec) -> Result<Self> {
        Ok(match *spec {
            CommandSpec::Forward { draw, step } => TurtleOp::Forward {
                draw,
                step_mult: step,
            },
            CommandSpec::Turn { direction, angle } => TurtleOp::Turn {
                direction: TurnDirection::from_sign(direction)?,
                angle_mult: angle,
            },
            CommandSpec::TurnAbs { angle } => TurtleOp::TurnAbsolute { delta_deg: angle },
            CommandSpec::Push => TurtleOp::Push,
            CommandSpec::Pop => TurtleOp::Pop,
            CommandSpec::Noop => TurtleOp::Noop,
        })
    }
}

impl ConfigFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the file as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        crate::ensure_parent_dir(path)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))?;
        log::info!("wrote config to {}", path.display());
        Ok(())
    }
}

/// A validated L-System plus its turtle and SVG settings.
#[derive(Clone, Debug)]
pub struct LSystemConfig {
    pub name: String,
    pub axiom: String,
    pub iterations: usize,
    pub rules: RuleSet,
    pub turtle: TurtleConfig,
    pub commands: HashMap<char, TurtleOp>,
    pub svg: SvgOptions,
}

/// Parses a key that must be exactly one character.
fn single_char(key: &str, what: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::config(format!(
            "{what} keys must be single-character strings, got '{key}'"
        ))),
    }
}

impl TryFrom<ConfigFile> for LSystemConfig {
    type Error = Error;

    fn try_from(file: ConfigFile) -> Result<Self> {
        if file.axiom.is_empty() {
            return Err(Error::config("axiom must be non-empty"));
        }
        let iterations = usize::try_from(file.iterations)
            .map_err(|_| Error::config("iterations must be >= 0"))?;

        let rules = file
            .rules
            .into_iter()
            .map(|(key, word)| Ok((single_char(&key, "rules")?, word)))
            .collect::<Result<RuleSet>>()?;

        let turtle = file.turtle;
        if !(turtle.step > 0.0) {
            return Err(Error::config("turtle.step must be > 0"));
        }

        let commands = turtle
            .commands
            .iter()
            .map(|(key, spec)| {
                let symbol = single_char(key, "turtle.commands")?;
                let op = TurtleOp::try_from(spec).map_err(|e| match e {
                    Error::InvalidConfiguration(msg) => {
                        Error::config(format!("turtle.commands['{key}']: {msg}"))
                    }
                    other => other,
                })?;
                Ok((symbol, op))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        file.svg.validate()?;

        Ok(Self {
            name: file.name,
            axiom: file.axiom,
            iterations,
            rules,
            turtle: TurtleConfig {
                angle: turtle.angle,
                step: turtle.step,
                start: TurtleState::new(turtle.start.x, turtle.start.y, turtle.start.heading),
                default_action: file.default_action,
            },
            commands,
            svg: file.svg,
        })
    }
}

impl LSystemConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        ConfigFile::from_json_str(json)?.try_into()
    }

    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_json_str(&json).map_err(|e| match e {
            Error::Json(e) => Error::config(format!("invalid JSON in {}: {e}", path.display())),
            e => e,
        })?;
        log::debug!(
            "loaded '{}' from {}: {} rules, {} commands, {} iterations",
            config.name,
            path.display(),
            config.rules.len(),
            config.commands.len(),
            config.iterations
        );
        Ok(config)
    }

    /// Lazily expanded symbol stream.
    pub fn expansion(&self) -> Expansion<'_> {
        Expansion::new(&self.axiom, &self.rules, self.iterations)
    }

    /// An interpreter loaded with this config's command table.
    pub fn interpreter(&self, default_action: DefaultAction) -> TurtleInterpreter {
        TurtleInterpreter::new(TurtleConfig {
            default_action,
            ..self.turtle.clone()
        })
        .with_map(self.commands.clone())
    }
}
