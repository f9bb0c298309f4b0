//! Error handling for ls2d-core.
//!
//! This module defines the error type returned by all fallible operations in the kernel.
//!
//! ## Design Philosophy
//!
//! The crate follows a strict **no-panic** policy on well-formed input:
//!
//! - All errors are returned as `Result<T, KernelError>`, never panicked
//! - Internal consistency violations (a labeller or splitter invariant breaking) are
//!   returned as errors too, via [`KernelError::TopologyInvariant`], rather than asserted away
//!
//! ## Usage
//!
//! ```
//! use ls2d_core::error::{KernelError, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Everything that can go wrong while running the isosurface discretization pipeline.
///
/// Every variant aborts the pipeline immediately (see the top-level module docs for the
/// error policy); the mesh is left in whatever partially-mutated state the failing phase
/// produced and must not be reused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// A scratch buffer, the edge hash, or a new point could not be allocated.
    #[error("resource exhaustion: {0}")]
    ResourceExhaustion(String),

    /// A topology invariant the splitter or labeller depends on was violated.
    #[error("topology invariant violated: {0}")]
    TopologyInvariant(String),

    /// The manifold verifier rejected the final mesh.
    #[error("non-manifold resulting situation: {0}")]
    NonManifoldResult(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KernelError>;
