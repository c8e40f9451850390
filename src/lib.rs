//! ## svgtess - tessellate SVG path data
//!
//! `svgtess` parses SVG-style path data (`M 0,0 C 0,100 200,100 180,0 Z`),
//! evaluates each command against a drawing cursor, and produces renderable
//! line geometry: a flat vertex buffer, a line-list index buffer, and the
//! per-sub-path segment ranges within them.
//!
//! It is normally run as a command line tool, taking an SVG document (or raw
//! path data) and reporting or re-emitting the paths it contains.
//!
//! ## Library use
//!
//! A [`Path`] is parsed from text, and its [`Tessellation`] computed on demand
//! according to its [`TessellationConfig`]. Multiple paths may be collected
//! into a [`Scene`], either directly or by importing an SVG document with
//! [`document::import_str`].
//!
//! Errors are reported via `svgtess::Result`.
//!
//! ## Example
//!
//! ```
//! let path = svgtess::Path::parse("M 0,0 L 10,0 L 10,10").unwrap();
//! let tess = path.tessellation().unwrap();
//!
//! assert_eq!(tess.vertices, vec![0., 0., 10., 0., 10., 0., 10., 10.]);
//! assert_eq!(tess.indices, vec![0, 1, 2, 3]);
//! ```

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "cli")]
pub mod cli;
pub mod document;
pub mod errors;
pub mod geometry;
#[cfg(feature = "json")]
pub mod json_api;
pub mod path;
pub mod scene;
#[cfg(feature = "server")]
pub mod server;

pub use errors::{Error, Result};
pub use geometry::{BoundingBox, Point};
pub use path::{Command, Coord, Path, Segment, Tessellation};
pub use scene::{Scene, Shape};

// Allow users of this as a library to easily retrieve the version of svgtess being used
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of points sampled from each curve command
pub const DEFAULT_CURVE_SAMPLES: usize = 100;

/// Upper bound on points sampled from each curve command
pub const MAX_CURVE_SAMPLES: usize = 65536;

/// Check a curve sample count is in `1..=MAX_CURVE_SAMPLES`.
pub fn check_curve_samples(samples: usize) -> Result<usize> {
    if samples == 0 || samples > MAX_CURVE_SAMPLES {
        return Err(Error::InvalidValue(
            "curve sample count".to_string(),
            samples.to_string(),
        ));
    }
    Ok(samples)
}

/// Handling of elliptical arc commands during tessellation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "json", derive(serde_derive::Deserialize, serde_derive::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum ArcMode {
    /// Fail with `Error::UnsupportedFeature`
    #[default]
    Reject,
    /// Sample along the arc like any other curve
    Sample,
}

impl std::str::FromStr for ArcMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reject" => Ok(Self::Reject),
            "sample" => Ok(Self::Sample),
            _ => Err(Error::InvalidValue("arc mode".into(), s.into())),
        }
    }
}

/// Handling of close-path commands during tessellation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "json", derive(serde_derive::Deserialize, serde_derive::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum CloseMode {
    /// Emit a line back to the sub-path start
    #[default]
    Connect,
    /// Fail with `Error::UnsupportedFeature`
    Reject,
}

impl std::str::FromStr for CloseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "connect" => Ok(Self::Connect),
            "reject" => Ok(Self::Reject),
            _ => Err(Error::InvalidValue("close mode".into(), s.into())),
        }
    }
}

/// Settings to configure tessellation of a path.
///
/// Alternate front-ends may use this directly rather than `cli::Config`,
/// which wraps this struct when `svgtess` is run as a command-line program.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde_derive::Deserialize, serde_derive::Serialize))]
#[cfg_attr(feature = "json", serde(default))]
pub struct TessellationConfig {
    /// Points sampled per curve command, from 1 to `MAX_CURVE_SAMPLES`
    pub curve_samples: usize,
    pub arc_mode: ArcMode,
    pub close_mode: CloseMode,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            curve_samples: DEFAULT_CURVE_SAMPLES,
            arc_mode: ArcMode::default(),
            close_mode: CloseMode::default(),
        }
    }
}

/// Parse and tessellate `data` with the given config.
pub fn tessellate_str(data: &str, config: &TessellationConfig) -> Result<Tessellation> {
    let path = Path::parse(data)?.with_config(config.clone());
    path.tessellation().cloned()
}

/// Re-emit path data in canonical form.
pub fn canonical_path_data(data: &str) -> Result<String> {
    Ok(Path::parse(data)?.to_text())
}

/// Flattened x,y vertex pairs for the given path data, using default settings.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn path_vertices(data: String) -> core::result::Result<Vec<f32>, String> {
    tessellate_str(&data, &TessellationConfig::default())
        .map(|t| t.vertices)
        .map_err(|e| e.to_string())
}

/// Line-list indices for the given path data, using default settings.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn path_indices(data: String) -> core::result::Result<Vec<u32>, String> {
    tessellate_str(&data, &TessellationConfig::default())
        .map(|t| t.indices)
        .map_err(|e| e.to_string())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn normalize_path(data: String) -> core::result::Result<String, String> {
    canonical_path_data(&data).map_err(|e| e.to_string())
}
