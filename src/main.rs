//! Streaming L-System renderer that outputs SVG.

use clap::{Parser, Subcommand};
use lsystem_svg::{DefaultAction, Error, LSystemConfig, random_config, render_to_file, summarize};
use std::path::PathBuf;
use std::process::ExitCode;

const FORMAT_HELP: &str = r#"INPUT JSON SYNTAX

Top-level keys
  name: string               Title written into the SVG <title> (default "L-System").
  axiom: string              Initial word (required, non-empty).
  iterations: integer >= 0   Number of rewriting steps (default 0).
  rules: {char: string}      Productions; symbols without a rule rewrite to themselves.
  default_action: string     forward_draw | forward_move | noop (default forward_draw).

turtle
  angle: number              Base turn angle in degrees (default 90).
  step: number > 0           Base forward step (default 10).
  start: {x, y, heading}     Starting state; heading 0 = +X, 90 = +Y (defaults 0).
  commands: {char: action}   Command table. Actions:
    {"type": "forward", "draw": true|false, "step": <multiplier, default 1>}
    {"type": "turn", "direction": 1|-1, "angle": <multiplier, default 1>}
    {"type": "turn_abs", "angle": <degrees added to the heading>}
    {"type": "push"}  {"type": "pop"}  {"type": "noop"}

svg
  margin: number             Space around the bounds (default 10).
  precision: 0..10           Coordinate decimals (default 3).
  flip_y: bool               Flip so +Y points up (default true).
  width, height: number      Optional explicit size; the viewBox is kept.
  background: string         Optional background colour ("none" omits it).
  style: {stroke, stroke_width, fill, stroke_linecap, stroke_linejoin}

Example (Koch curve)
  {"axiom": "F", "iterations": 4, "rules": {"F": "F+F--F+F"},
   "turtle": {"angle": 60, "step": 10, "commands": {
     "F": {"type": "forward", "draw": true},
     "+": {"type": "turn", "direction": 1},
     "-": {"type": "turn", "direction": -1}}}}
"#;

#[derive(Debug, Parser)]
#[command(name = "lsystem-svg", version, about, after_long_help = FORMAT_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render an L-System JSON config to an SVG file
    Render {
        /// Path to the input JSON config
        config: PathBuf,
        /// Path to write the SVG output
        output: PathBuf,
        /// What to do for symbols not found in turtle.commands
        /// (forward_draw, forward_move or noop). Overrides the config's default_action.
        #[arg(long, value_name = "ACTION")]
        default_action: Option<DefaultAction>,
    },
    /// Validate a JSON config and print a brief summary
    Validate {
        /// Path to the input JSON config
        config: PathBuf,
    },
    /// Generate a random JSON config for experimentation
    Random {
        /// Where to write the generated JSON file
        output: PathBuf,
        /// Seed for repeatable randomness
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Render {
            config,
            output,
            default_action,
        } => {
            let config = LSystemConfig::load(&config)?;
            let default_action = default_action.unwrap_or(config.turtle.default_action);
            render_to_file(&config, default_action, &output)?;
        }
        Command::Validate { config } => {
            let config = LSystemConfig::load(&config)?;
            let report = summarize(&config)?;
            println!("{report}");
            if report.truncated {
                println!(
                    "warning: expansion exceeds {} symbols; \
                     geometry stats are based on the first portion only",
                    report.symbols_sampled
                );
            }
            report.require_geometry()?;
        }
        Command::Random { output, seed } => {
            random_config(seed).save(&output)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
