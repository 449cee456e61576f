//! SVG serialization of a [`Drawing`].
//!
//! Each polyline becomes one `<polyline>` element. The viewBox is the drawing's
//! bounds grown by a margin, and the optional Y flip is a group transform so the
//! coordinates themselves stay in the turtle's Cartesian frame.

use crate::drawing::{Bounds, Drawing};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::fs;
use std::path::Path;

/// Largest accepted number of decimals in formatted coordinates.
pub const MAX_PRECISION: usize = 10;

fn default_margin() -> f64 {
    10.0
}

fn default_precision() -> usize {
    3
}

fn default_true() -> bool {
    true
}

/// Stroke attributes shared by every polyline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
    pub stroke_linecap: String,
    pub stroke_linejoin: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            stroke: "#000".to_string(),
            stroke_width: 1.0,
            fill: "none".to_string(),
            stroke_linecap: "round".to_string(),
            stroke_linejoin: "round".to_string(),
        }
    }
}

/// Output options, read from the `svg` section of a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SvgOptions {
    /// Extra space around the bounds, in drawing units.
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Decimals kept in coordinates, `0..=10`.
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Mirror vertically so +Y points up in viewers.
    #[serde(default = "default_true")]
    pub flip_y: bool,

    /// Explicit `width` attribute; the viewBox is kept either way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Fill colour of a background rectangle. `None` or `"none"` omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default)]
    pub style: SvgStyle,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            precision: default_precision(),
            flip_y: true,
            width: None,
            height: None,
            background: None,
            style: SvgStyle::default(),
        }
    }
}

impl SvgOptions {
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(Error::config(format!(
                "svg.precision must be between 0 and {MAX_PRECISION}"
            )));
        }
        for (field, value) in [("svg.width", self.width), ("svg.height", self.height)] {
            if let Some(v) = value
                && !(v > 0.0)
            {
                return Err(Error::config(format!("{field} must be > 0")));
            }
        }
        Ok(())
    }
}

/// Formats `x` with `precision` decimals, trimming trailing zeros.
///
/// Negative zero prints as `0`.
pub fn format_number(x: f64, precision: usize) -> String {
    let x = if x == 0.0 { 0.0 } else { x };
    let mut s = format!("{x:.precision$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders `drawing` as a standalone SVG document.
///
/// # Errors
///
/// [`Error::Geometry`] when the drawing is empty, or when the bounds have zero width or
/// height even after the margin is applied (collinear geometry with `margin = 0`).
pub fn render_svg(drawing: &Drawing, options: &SvgOptions, title: Option<&str>) -> Result<String> {
    let bounds = drawing.bounds()?.expand(options.margin);
    let (w, h) = (bounds.width(), bounds.height());
    if !(w > 0.0 && h > 0.0) {
        return Err(Error::Geometry(
            "Degenerate bounds after margin (width or height is zero). \
             Set svg.margin > 0 to render collinear or single-point geometry."
                .into(),
        ));
    }

    let mut out = String::new();
    write_document(&mut out, drawing, options, bounds, title)
        .map_err(|e| Error::Geometry(format!("failed to format SVG: {e}")))?;
    Ok(out)
}

fn write_document(
    out: &mut impl Write,
    drawing: &Drawing,
    options: &SvgOptions,
    bounds: Bounds,
    title: Option<&str>,
) -> fmt::Result {
    let prec = options.precision;
    let fmt = |x: f64| format_number(x, prec);
    let (min_x, min_y) = (fmt(bounds.min.x), fmt(bounds.min.y));
    let (w, h) = (fmt(bounds.width()), fmt(bounds.height()));

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;

    let mut size_attrs = String::new();
    if let Some(width) = options.width {
        write!(size_attrs, r#" width="{}""#, fmt(width))?;
    }
    if let Some(height) = options.height {
        write!(size_attrs, r#" height="{}""#, fmt(height))?;
    }
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="{min_x} {min_y} {w} {h}"{size_attrs}>"#,
    )?;

    if let Some(title) = title {
        writeln!(out, "  <title>{}</title>", escape_text(title))?;
    }

    if let Some(background) = options
        .background
        .as_deref()
        .filter(|bg| !bg.eq_ignore_ascii_case("none"))
    {
        writeln!(
            out,
            r#"  <rect x="{min_x}" y="{min_y}" width="{w}" height="{h}" fill="{background}" />"#,
        )?;
    }

    let style = &options.style;
    let style_attrs = format!(
        r#"stroke="{}" stroke-width="{}" fill="{}" stroke-linecap="{}" stroke-linejoin="{}""#,
        style.stroke,
        fmt(style.stroke_width),
        style.fill,
        style.stroke_linecap,
        style.stroke_linejoin,
    );

    let indent = if options.flip_y {
        // Mirror about the horizontal centre line of the viewBox.
        writeln!(
            out,
            r#"  <g transform="translate(0,{}) scale(1,-1)">"#,
            fmt(bounds.min.y + bounds.max.y)
        )?;
        "    "
    } else {
        "  "
    };

    for polyline in drawing.polylines() {
        let points = polyline
            .iter()
            .map(|p| format!("{},{}", fmt(p.x), fmt(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, r#"{indent}<polyline points="{points}" {style_attrs} />"#)?;
    }

    if options.flip_y {
        writeln!(out, "  </g>")?;
    }
    writeln!(out, "</svg>")
}

/// Renders `drawing` and writes it to `path`, creating parent directories.
pub fn write_svg_file(
    path: impl AsRef<Path>,
    drawing: &Drawing,
    options: &SvgOptions,
    title: Option<&str>,
) -> Result<()> {
    let path = path.as_ref();
    let svg = render_svg(drawing, options, title)?;
    crate::ensure_parent_dir(path)?;
    fs::write(path, svg).map_err(|e| Error::io(path, e))?;
    log::info!(
        "wrote {} polylines ({} points) to {}",
        drawing.len(),
        drawing.point_count(),
        path.display()
    );
    Ok(())
}
