use std::{io, path::PathBuf};

use thiserror::Error;

/// Reasons the particle layer cannot start on a surface.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("surface container could not be measured")]
    Unmeasurable,
    #[error("surface has no drawable area ({width}x{height})")]
    ZeroArea { width: f32, height: f32 },
    #[error("surface has no drawing context")]
    NoContext,
}

#[derive(Debug, Error)]
pub enum CastError {
    #[error("failed to read cast file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid cast file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("relationship references unknown character `{0}`")]
    UnknownEndpoint(String),
    #[error("character `{id}` position ({x}, {y}) is outside the 0..=100 square")]
    OutOfRange { id: String, x: f32, y: f32 },
}
