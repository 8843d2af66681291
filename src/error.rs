use std::path::PathBuf;
use thiserror::Error;

/// Failure to build a playable level from a map file.
#[derive(Debug, Error)]
pub enum MapParseError {
    #[error("cannot read map file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map contains no grid rows")]
    Empty,

    #[error("line {line}: row has {found} tiles, expected {expected}")]
    NonRectangular {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: unrecognized tile `{token}`")]
    UnknownTile {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("door `{tag}` appears more than once")]
    DuplicateDoor { tag: char },

    #[error("key `{tag}` appears more than once")]
    DuplicateKey { tag: char },

    #[error("tag `{tag}` has a {present} but no {missing}")]
    UnpairedTag {
        tag: char,
        present: &'static str,
        missing: &'static str,
    },

    #[error("map has no goal tile")]
    MissingGoal,

    #[error("map has more than one goal tile")]
    DuplicateGoal,

    #[error("map has no player start")]
    MissingStart,

    #[error("map has more than one player start")]
    DuplicateStart,
}

/// Failure to load a mesh, texture or registry entry.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("cannot read asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mesh `{name}` has no float-count header")]
    MissingHeader { name: String },

    #[error("mesh `{name}`: invalid number `{token}`")]
    InvalidNumber { name: String, token: String },

    #[error("mesh `{name}`: float count {count} is not a multiple of the 8-float vertex stride")]
    BadStride { name: String, count: usize },

    #[error("mesh `{name}`: header declares {declared} floats but only {found} follow")]
    Truncated {
        name: String,
        declared: usize,
        found: usize,
    },

    #[error("mesh `{0}` is registered twice")]
    DuplicateMesh(String),

    #[error("no mesh named `{0}` in the asset registry")]
    MissingMesh(String),

    #[error("cannot decode texture {}: {reason}", path.display())]
    Texture { path: PathBuf, reason: String },
}

/// Failure to bring up the window surface and GPU device.
#[cfg(feature = "native")]
#[derive(Debug, Error)]
pub enum GpuInitError {
    #[error("cannot create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("cannot open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Failure to read the INI configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot load config file {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("config [{section}] {key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}
