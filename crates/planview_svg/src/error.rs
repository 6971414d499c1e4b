//! Plan error types

use std::io;
use std::path::PathBuf;

use planview_core::Rect;
use thiserror::Error;

/// Errors that can occur when loading or rendering a plan
#[derive(Error, Debug)]
pub enum PlanError {
    /// The plan file does not exist. Checked before any read or parse.
    #[error("File {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// The plan file could not be read or parsed
    #[error("Error loading SVG plan {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadCause,
    },

    /// The drawing surface rejected a draw call
    #[error("Cannot draw SVG plan: {source}")]
    Render {
        #[source]
        source: DrawError,
    },
}

/// Underlying cause of a [`PlanError::Load`]
#[derive(Error, Debug)]
pub enum LoadCause {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] usvg::Error),
}

/// Errors raised by a drawing surface
#[derive(Error, Debug)]
pub enum DrawError {
    /// The matrix has a zero determinant or a non-finite element
    #[error("Transform is not invertible: {0:?}")]
    NonInvertibleTransform([f32; 6]),

    /// The rectangle cannot be represented on the surface
    #[error("Invalid rectangle: {0:?}")]
    InvalidRect(Rect),

    /// The surface could not be created with the requested size
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Encoding the surface contents failed
    #[error("Encoding error: {0}")]
    Encode(String),
}
