//! Random configuration generator for experimentation and test data.
//!
//! Configs are small plant-like systems over `F + - [ ]` (plus `X` for the two-rule
//! variant). They are not meant to be pretty, only quick to tweak.

use crate::config::{CommandSpec, ConfigFile, StartSection, TurtleSection};
use crate::svg::SvgOptions;
use crate::turtle::DefaultAction;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const ANGLES: [f64; 9] = [15.0, 20.0, 22.5, 25.0, 30.0, 36.0, 45.0, 60.0, 90.0];
const STEPS: [f64; 5] = [5.0, 8.0, 10.0, 12.0, 15.0];

/// Deepest bracket nesting in a generated word.
const MAX_BRANCH_DEPTH: usize = 3;

/// Probability that a position in a word is a bracket.
const P_BRANCH: f64 = 0.4;

/// Generates a word of roughly `length` symbols with balanced brackets.
///
/// The running bracket depth never goes negative and never exceeds
/// [`MAX_BRANCH_DEPTH`]; any brackets still open at the end are closed, and an `F` is
/// appended if none was drawn.
fn random_balanced_word<R: Rng>(rng: &mut R, length: usize) -> String {
    let mut word = String::with_capacity(length + MAX_BRANCH_DEPTH + 1);
    let mut depth = 0;

    for _ in 0..length {
        if rng.gen_bool(P_BRANCH) {
            let open = match depth {
                0 => true,
                MAX_BRANCH_DEPTH => false,
                _ => rng.gen_bool(0.5),
            };
            if open {
                word.push('[');
                depth += 1;
            } else {
                word.push(']');
                depth -= 1;
            }
            continue;
        }

        let t: f64 = rng.r#gen();
        word.push(match t {
            t if t < 0.55 => 'F',
            t if t < 0.775 => '+',
            _ => '-',
        });
    }

    word.extend(std::iter::repeat_n(']', depth));
    if !word.contains('F') {
        word.push('F');
    }
    word
}

fn random_x_rule<R: Rng>(rng: &mut R) -> String {
    let parts = rng.gen_range(3..=6);
    (0..parts)
        .map(|_| match rng.r#gen::<f64>() {
            r if r < 0.45 => "F",
            r if r < 0.65 => "X",
            r if r < 0.80 => "+",
            r if r < 0.95 => "-",
            _ => "[X]",
        })
        .collect()
}

fn standard_commands() -> BTreeMap<String, CommandSpec> {
    [
        ("F", CommandSpec::Forward { draw: true, step: 1.0 }),
        ("f", CommandSpec::Forward { draw: false, step: 1.0 }),
        ("+", CommandSpec::Turn { direction: 1, angle: 1.0 }),
        ("-", CommandSpec::Turn { direction: -1, angle: 1.0 }),
        ("[", CommandSpec::Push),
        ("]", CommandSpec::Pop),
        ("X", CommandSpec::Noop),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Builds a random config. The same `seed` always yields the same config; `None`
/// seeds from the OS.
pub fn random_config(seed: Option<u64>) -> ConfigFile {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate(&mut rng)
}

fn generate<R: Rng>(rng: &mut R) -> ConfigFile {
    let angle = *ANGLES.choose(rng).unwrap_or(&90.0);
    let iterations = rng.gen_range(3..=6);
    let step = *STEPS.choose(rng).unwrap_or(&10.0);

    let (axiom, rules) = if rng.gen_bool(0.5) {
        let len = rng.gen_range(8..=18);
        let rule_f = random_balanced_word(rng, len);
        let rule_x = random_x_rule(rng);
        ("X", BTreeMap::from([("F".into(), rule_f), ("X".into(), rule_x)]))
    } else {
        let len = rng.gen_range(10..=22);
        ("F", BTreeMap::from([("F".into(), random_balanced_word(rng, len))]))
    };

    ConfigFile {
        name: "Random L-System".to_string(),
        axiom: axiom.to_string(),
        iterations,
        rules,
        default_action: DefaultAction::ForwardDraw,
        turtle: TurtleSection {
            angle,
            step,
            start: StartSection {
                x: 0.0,
                y: 0.0,
                heading: 90.0,
            },
            commands: standard_commands(),
        },
        svg: SvgOptions::default(),
    }
}
