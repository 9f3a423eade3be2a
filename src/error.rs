//! Error types for the renderer and its I/O adapters.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors surfaced at construction or I/O time. Rasterization itself never
/// fails: out-of-surface pixels are clipped and degenerate geometry draws
/// nothing.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Width or height of zero.
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Projection parameters that cannot produce a usable frustum.
    #[error("invalid projection: fov={fov}, znear={znear}, zfar={zfar}")]
    InvalidProjection { fov: f32, znear: f32, zfar: f32 },

    /// A face refers to a vertex the mesh does not have.
    #[error("mesh `{mesh}`: face {face} references vertex {index}, mesh has {count}")]
    FaceOutOfRange {
        mesh: String,
        face: usize,
        index: usize,
        count: usize,
    },

    /// Unsupported mesh file.
    #[error("unsupported mesh format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("OBJ error: {0}")]
    Obj(#[from] obj::ObjError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
