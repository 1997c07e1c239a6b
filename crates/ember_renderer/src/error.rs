//! Error types for scene construction and rendering.

use thiserror::Error;

/// Errors raised while building acceleration structures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("cannot build a BVH over an empty object list")]
    EmptyObjectList,
}

pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur before or while rendering a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to start band workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;
