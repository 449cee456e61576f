use glam::DVec2;
use lsystem_svg::{
    Bounds, CommandSpec, ConfigFile, DefaultAction, Drawing, Error, LSystemConfig, SvgOptions,
    TurnDirection, TurtleOp, format_number, render_svg,
};
use serde_json::json;

fn parse(value: serde_json::Value) -> Result<LSystemConfig, Error> {
    LSystemConfig::from_json_str(&value.to_string())
}

fn assert_config_error(value: serde_json::Value) {
    match parse(value.clone()) {
        Err(e @ (Error::InvalidConfiguration(_) | Error::Json(_))) => {
            assert_eq!(e.exit_code(), 2, "{e}");
        }
        other => panic!("expected a configuration error for {value}, got {other:?}"),
    }
}

fn drawing(polylines: &[&[(f64, f64)]]) -> Drawing {
    Drawing::new(
        polylines
            .iter()
            .map(|pl| pl.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
            .collect(),
    )
}

fn plain_options() -> SvgOptions {
    SvgOptions {
        margin: 5.0,
        precision: 2,
        flip_y: false,
        ..SvgOptions::default()
    }
}

#[test]
fn test_basic_config() {
    let config = parse(json!({
        "axiom": "F",
        "iterations": 1,
        "rules": {"F": "F+F"},
        "turtle": {
            "angle": 90,
            "step": 10,
            "start": {"x": 1, "y": 2, "heading": 45},
            "commands": {"F": {"type": "forward", "draw": true, "step": 1}}
        },
        "svg": {
            "margin": 5,
            "precision": 2,
            "flip_y": true,
            "style": {"stroke": "#000", "stroke_width": 1}
        }
    }))
    .unwrap();

    assert_eq!(config.name, "L-System");
    assert_eq!(config.axiom, "F");
    assert_eq!(config.iterations, 1);
    assert_eq!(config.rules.get('F'), Some("F+F"));
    assert_eq!(config.turtle.angle, 90.0);
    assert_eq!(config.turtle.step, 10.0);
    assert_eq!(config.turtle.start.position, DVec2::new(1.0, 2.0));
    assert_eq!(config.turtle.start.heading, 45.0);
    assert_eq!(config.turtle.default_action, DefaultAction::ForwardDraw);
    assert_eq!(config.commands[&'F'], TurtleOp::DRAW);
    assert_eq!(config.svg.margin, 5.0);
    assert_eq!(config.svg.precision, 2);
    assert_eq!(config.svg.style.stroke, "#000");

    let symbols: String = config.expansion().collect();
    assert_eq!(symbols, "F+F");
}

#[test]
fn test_defaults() {
    let config = parse(json!({"axiom": "F", "unknown_key": [1, 2, 3]})).unwrap();
    assert_eq!(config.iterations, 0);
    assert!(config.rules.is_empty());
    assert!(config.commands.is_empty());
    assert_eq!(config.turtle.angle, 90.0);
    assert_eq!(config.turtle.step, 10.0);
    assert_eq!(config.svg, SvgOptions::default());
    assert!(config.svg.flip_y);
    assert_eq!(config.svg.margin, 10.0);
    assert_eq!(config.svg.precision, 3);
}

#[test]
fn test_command_specs() {
    let config = parse(json!({
        "axiom": "F",
        "default_action": "noop",
        "turtle": {"commands": {
            "f": {"type": "forward", "draw": false},
            "G": {"type": "forward", "draw": true, "step": 0.5},
            "+": {"type": "turn", "direction": 1},
            "-": {"type": "turn", "direction": -1, "angle": 2},
            "|": {"type": "turn_abs", "angle": 180},
            "[": {"type": "push"},
            "]": {"type": "pop"},
            "X": {"type": "noop"}
        }}
    }))
    .unwrap();

    assert_eq!(config.turtle.default_action, DefaultAction::Noop);
    assert_eq!(config.commands[&'f'], TurtleOp::MOVE);
    assert_eq!(
        config.commands[&'G'],
        TurtleOp::Forward {
            draw: true,
            step_mult: 0.5
        }
    );
    assert_eq!(config.commands[&'+'], TurtleOp::LEFT);
    assert_eq!(
        config.commands[&'-'],
        TurtleOp::Turn {
            direction: TurnDirection::Negative,
            angle_mult: 2.0
        }
    );
    assert_eq!(
        config.commands[&'|'],
        TurtleOp::TurnAbsolute { delta_deg: 180.0 }
    );
    assert_eq!(config.commands[&'['], TurtleOp::Push);
    assert_eq!(config.commands[&']'], TurtleOp::Pop);
    assert_eq!(config.commands[&'X'], TurtleOp::Noop);
}

#[test]
fn test_missing_or_invalid_fields() {
    // Missing or empty axiom.
    assert_config_error(json!({"iterations": 1}));
    assert_config_error(json!({"axiom": ""}));
    // Wrong types.
    assert_config_error(json!({"axiom": "F", "iterations": "1"}));
    assert_config_error(json!({"axiom": "F", "iterations": 1.5}));
    assert_config_error(json!({"axiom": 7}));
    assert_config_error(json!({"axiom": "F", "svg": {"flip_y": "yes"}}));
    // Out of range.
    assert_config_error(json!({"axiom": "F", "iterations": -1}));
    assert_config_error(json!({"axiom": "F", "turtle": {"step": 0}}));
    assert_config_error(json!({"axiom": "F", "turtle": {"step": -2.5}}));
    assert_config_error(json!({"axiom": "F", "svg": {"precision": 15}}));
    assert_config_error(json!({"axiom": "F", "svg": {"width": 0}}));
    assert_config_error(json!({"axiom": "F", "svg": {"height": -10}}));
    // Keys must be single characters.
    assert_config_error(json!({"axiom": "F", "rules": {"FF": "F"}}));
    assert_config_error(json!({"axiom": "F", "rules": {"": "F"}}));
    assert_config_error(json!({"axiom": "F", "turtle": {"commands": {"ab": {"type": "push"}}}}));
    // Unknown default policy.
    assert_config_error(json!({"axiom": "F", "default_action": "typo"}));
}

#[test]
fn test_malformed_actions() {
    let with_command = |action: serde_json::Value| json!({"axiom": "F", "turtle": {"commands": {"F": action}}});

    assert_config_error(with_command(json!({"type": "jump"})));
    assert_config_error(with_command(json!({"draw": true})));
    assert_config_error(with_command(json!({"type": "forward"})));
    assert_config_error(with_command(json!({"type": "forward", "draw": 1})));
    assert_config_error(with_command(json!({"type": "forward", "draw": true, "step": "2"})));
    assert_config_error(with_command(json!({"type": "turn"})));
    assert_config_error(with_command(json!({"type": "turn", "direction": 2})));
    assert_config_error(with_command(json!({"type": "turn", "direction": 0})));
    assert_config_error(with_command(json!({"type": "turn", "direction": 1, "angle": "x"})));
    assert_config_error(with_command(json!({"type": "turn_abs"})));
    assert_config_error(json!({"axiom": "F", "turtle": {"commands": {"F": "forward"}}}));
}

#[test]
fn test_bad_direction_names_the_symbol() {
    let err = parse(json!({
        "axiom": "F",
        "turtle": {"commands": {"+": {"type": "turn", "direction": 3}}}
    }))
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("turtle.commands['+']"), "{msg}");
    assert!(msg.contains("-1 or 1"), "{msg}");
}

#[test]
fn test_malformed_json() {
    let err = LSystemConfig::from_json_str("{ not valid json }").unwrap_err();
    assert!(matches!(err, Error::Json(_)), "{err}");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_config_file_round_trip() {
    let file = ConfigFile::from_json_str(
        &json!({
            "name": "Round trip",
            "axiom": "X",
            "iterations": 3,
            "rules": {"X": "F[+X]-X"},
            "turtle": {"commands": {"F": {"type": "forward", "draw": true}, "[": {"type": "push"}}},
            "svg": {"background": "white", "width": 200}
        })
        .to_string(),
    )
    .unwrap();

    assert_eq!(
        file.turtle.commands["F"],
        CommandSpec::Forward {
            draw: true,
            step: 1.0
        }
    );
    let reparsed = ConfigFile::from_json_str(&file.to_json_pretty().unwrap()).unwrap();
    assert_eq!(reparsed, file);
}

#[test]
fn test_bounds() {
    let d = drawing(&[&[(0.0, 5.0), (10.0, -2.0)], &[(3.0, 8.0), (7.0, 1.0)]]);
    let bounds = d.bounds().unwrap();
    assert_eq!(bounds.min, DVec2::new(0.0, -2.0));
    assert_eq!(bounds.max, DVec2::new(10.0, 8.0));
    assert_eq!(bounds.width(), 10.0);
    assert_eq!(bounds.height(), 10.0);

    let grown = bounds.expand(2.0);
    assert_eq!(grown.min, DVec2::new(-2.0, -4.0));
    assert_eq!(grown.size(), DVec2::new(14.0, 14.0));
}

#[test]
fn test_collinear_bounds() {
    let d = drawing(&[&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]]);
    let bounds = d.bounds().unwrap();
    assert_eq!(bounds.height(), 0.0);
    assert_eq!(bounds.width(), 10.0);
}

#[test]
fn test_drawing_keeps_only_strokes() {
    let d = drawing(&[&[(1.0, 1.0)], &[], &[(0.0, 0.0), (2.0, 0.0)], &[(5.0, 5.0)]]);
    assert_eq!(d.len(), 1);
    assert_eq!(d.point_count(), 2);
    assert_eq!(d.polylines()[0], vec![DVec2::ZERO, DVec2::new(2.0, 0.0)]);

    let d = drawing(&[&[(1.0, 1.0)]]);
    assert!(d.is_empty());
    assert!(matches!(d.bounds(), Err(Error::Geometry(_))));
}

#[test]
fn test_empty_bounds_fail() {
    let err = Bounds::of(&[]).unwrap_err();
    assert!(matches!(err, Error::Geometry(_)), "{err}");
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(10.0, 2), "10");
    assert_eq!(format_number(1.5, 3), "1.5");
    assert_eq!(format_number(-2.126, 2), "-2.13");
    assert_eq!(format_number(0.333333, 3), "0.333");
    assert_eq!(format_number(-0.0, 3), "0");
    assert_eq!(format_number(-0.0001, 3), "0");
    assert_eq!(format_number(7.6, 0), "8");
}

#[test]
fn test_svg_points() {
    let d = drawing(&[&[(0.0, 0.0), (10.0, 10.0)]]);
    let options = SvgOptions {
        margin: 0.0,
        ..plain_options()
    };
    let svg = render_svg(&d, &options, None).unwrap();

    assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(svg.contains(r#"viewBox="0 0 10 10""#), "{svg}");
    assert!(svg.contains(r#"points="0,0 10,10""#), "{svg}");
    assert!(svg.contains(r##"stroke="#000" stroke-width="1" fill="none""##), "{svg}");
    assert!(!svg.contains("<title>"));
    assert!(!svg.contains("<rect"));
    assert!(!svg.contains("<g "));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_svg_one_element_per_polyline() {
    let d = drawing(&[
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)],
        &[(10.0, 0.0), (20.0, 0.0)],
    ]);
    let svg = render_svg(&d, &plain_options(), None).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 2);
    assert!(svg.contains(r#"points="0,0 10,0 10,10""#), "{svg}");
    assert!(svg.contains(r#"viewBox="-5 -5 30 20""#), "{svg}");
}

#[test]
fn test_svg_flip_y() {
    let d = drawing(&[&[(0.0, 0.0), (10.0, 5.0)]]);
    let options = SvgOptions {
        flip_y: true,
        ..plain_options()
    };
    let svg = render_svg(&d, &options, None).unwrap();
    assert!(svg.contains(r#"<g transform="translate(0,5) scale(1,-1)">"#), "{svg}");
    assert!(svg.contains("    <polyline"), "{svg}");
    assert!(svg.contains("  </g>"));
}

#[test]
fn test_svg_background() {
    let d = drawing(&[&[(0.0, 0.0), (10.0, 5.0)]]);
    let options = SvgOptions {
        background: Some("#ff0000".into()),
        ..plain_options()
    };
    let svg = render_svg(&d, &options, None).unwrap();
    assert!(svg.contains("<rect"), "{svg}");
    assert!(svg.contains(r##"fill="#ff0000""##), "{svg}");

    let options = SvgOptions {
        background: Some("None".into()),
        ..plain_options()
    };
    let svg = render_svg(&d, &options, None).unwrap();
    assert!(!svg.contains("<rect"), "{svg}");
}

#[test]
fn test_svg_width_height() {
    let d = drawing(&[&[(0.0, 0.0), (10.0, 5.0)]]);
    let options = SvgOptions {
        width: Some(200.0),
        height: Some(100.0),
        ..plain_options()
    };
    let svg = render_svg(&d, &options, None).unwrap();
    assert!(svg.contains(r#" width="200""#), "{svg}");
    assert!(svg.contains(r#" height="100""#), "{svg}");
}

#[test]
fn test_svg_title_is_escaped() {
    let d = drawing(&[&[(0.0, 0.0), (10.0, 5.0)]]);
    let svg = render_svg(&d, &plain_options(), Some("My <L-System> & co")).unwrap();
    assert!(svg.contains("<title>My &lt;L-System&gt; &amp; co</title>"), "{svg}");
}

#[test]
fn test_svg_degenerate_bounds() {
    let d = drawing(&[&[(0.0, 0.0), (10.0, 0.0)]]);
    let options = SvgOptions {
        margin: 0.0,
        ..plain_options()
    };
    let err = render_svg(&d, &options, None).unwrap_err();
    assert!(matches!(err, Error::Geometry(_)), "{err}");

    // A margin rescues collinear geometry.
    assert!(render_svg(&d, &plain_options(), None).is_ok());

    let err = render_svg(&Drawing::default(), &plain_options(), None).unwrap_err();
    assert!(matches!(err, Error::Geometry(_)), "{err}");
}
