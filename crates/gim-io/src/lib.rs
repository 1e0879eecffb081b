//! # gim-io: Grid Interchange Model Persistence
//!
//! Deterministic JSON persistence for `gim-core` documents (topology,
//! topology case, steady-state case).
//!
//! ## Design Philosophy
//!
//! **Deterministic output**: serialization is a pure function of model state.
//! Keys are sorted alphabetically, indentation is fixed at two spaces, floats
//! are rounded per quantity precision by the model layer, enums appear by
//! their wire string. Serializing twice yields byte-identical text.
//!
//! **Permissive numeric input**: non-finite floats are written as the bare
//! tokens `NaN`/`Infinity`/`-Infinity` (not strict JSON). The loader accepts
//! those tokens, their string forms, and `null` in value positions.
//!
//! **Whole-document validation**: loading parses first, then walks the whole
//! tree, failing with a report that enumerates every offending field path,
//! not just the first.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gim_core::Topology;
//!
//! fn main() -> gim_core::GimResult<()> {
//!     let topology: Topology = gim_io::from_file("grid/topology.json")?;
//!     gim_io::to_file(&topology, "out/topology.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`canon`] - canonical JSON tree, tree-building serializer and writer
//! - [`lenient`] - pre-parse pass for permissive numeric tokens

use std::fs;
use std::path::Path;

use gim_core::{GimError, GimResult, Validate};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod canon;
pub mod lenient;

/// Render a document as canonical JSON text.
pub fn to_json_string<T: Serialize>(value: &T) -> GimResult<String> {
    canon::to_canonical_string(value).map_err(|e| GimError::Other(e.to_string()))
}

/// Parse a document from JSON text and validate the whole tree.
///
/// Accepts strict JSON as well as the bare non-finite tokens the canonical
/// writer emits. On schema violations the error lists every offending field
/// path.
pub fn from_json_str<T: DeserializeOwned + Validate>(json: &str) -> GimResult<T> {
    let sanitized = lenient::sanitize_nonfinite(json);
    let value: T = serde_json::from_str(&sanitized)?;
    value.validated()
}

/// Write a document to `path` in canonical form.
///
/// Parent directories are created as needed; an existing file is
/// overwritten.
pub fn to_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> GimResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = to_json_string(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a document from the file at `path`, validating the whole tree.
pub fn from_file<T: DeserializeOwned + Validate>(path: impl AsRef<Path>) -> GimResult<T> {
    let text = fs::read_to_string(path)?;
    from_json_str(&text)
}
