//! # lsystem-svg
//!
//! Streams L-System grammars into 2D turtle line art.
//!
//! An axiom is rewritten lazily by [`Expansion`], which never builds the full expanded
//! string, and the resulting symbols drive a [`TurtleInterpreter`] that collects
//! disjoint polylines with branch (`[`/`]`) and pen-up semantics. The resulting
//! [`Drawing`] can be serialized to SVG, with JSON config files describing the
//! grammar, the turtle command table and the output style.

pub mod config;
pub mod drawing;
pub mod error;
pub mod interpreter;
pub mod random;
pub mod render;
pub mod rewriter;
pub mod svg;
pub mod turtle;

pub use config::*;
pub use drawing::*;
pub use error::{Error, Result};
pub use interpreter::*;
pub use random::random_config;
pub use render::*;
pub use rewriter::*;
pub use svg::*;
pub use turtle::*;

use std::path::Path;

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
        }
        _ => Ok(()),
    }
}
