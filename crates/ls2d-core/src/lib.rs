//! # ls2d-core
//!
//! Isosurface (level-set) discretization kernel for 2D triangular meshes.
//!
//! Given a planar triangular mesh and a scalar field `phi` sampled at its vertices, this
//! crate rewrites the mesh so the zero level set of `phi` becomes an explicit set of
//! triangle edges, and labels every resulting triangle `PLUS` or `MINUS` by the sign of
//! `phi` in its interior.
//!
//! ## Quick Start
//!
//! ```
//! use ls2d_core::config::{Thresholds, Verbosity};
//! use ls2d_core::field::Field;
//! use ls2d_core::mesh::Mesh;
//! use ls2d_core::pipeline::run;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut mesh = Mesh::new();
//! let a = mesh.allocate_point((0.0, 0.0)).unwrap();
//! let b = mesh.allocate_point((1.0, 0.0)).unwrap();
//! let c = mesh.allocate_point((0.0, 1.0)).unwrap();
//! mesh.add_triangle(a, b, c);
//!
//! let mut field = Field::new(vec![-1.0, 1.0, 1.0]);
//!
//! let stats = run(&mut mesh, &mut field, Thresholds::default(), Verbosity::quiet())?;
//! println!("{} triangles split", stats.splits);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mesh`]: the point/triangle arena and half-edge adjacency, plus the collaborator
//!   operations (`allocate_point`, `build_adjacency`, `free_adjacency`,
//!   `transfer_boundary_edges`) the kernel phases call but do not themselves define.
//! - [`field`]: the dense scalar field `phi` and the `same_sign`/`is_degenerate`
//!   predicates shared by every phase.
//! - [`config`]: `Thresholds` (`eps`, `epsd`) and `Verbosity` (`imprim`).
//! - [`error`]: the typed [`error::KernelError`] every fallible operation returns.
//! - [`snapper`]: near-zero snapping and the manifold-ball admissibility check (§4.1-4.2).
//! - [`crossing`]: zero-crossing enumeration and edge-keyed point insertion (§4.3).
//! - [`splitter`]: the Split-1/Split-2 triangle subdivision patterns (§4.4).
//! - [`labeller`]: `PLUS`/`MINUS` subdomain assignment (§4.5).
//! - [`verifier`]: the post-split manifoldness checks (§4.6).
//! - [`pipeline`]: [`pipeline::run`], the single entry point wiring the phases together
//!   in order (§4.7).
//!
//! ## Design Principles
//!
//! - **No panics on well-formed input**: every fallible operation returns
//!   `Result<T, KernelError>`; internal consistency violations are reported as
//!   [`error::KernelError::TopologyInvariant`] or [`error::KernelError::NonManifoldResult`]
//!   rather than asserted away.
//! - **Arena + indices**: points and triangles live in dense tables referenced by
//!   integer id; the half-edge adjacency is index-encoded. No pointer graph, no
//!   relocation during a phase.
//! - **No rollback on failure**: a failing phase leaves the mesh poisoned. The crate
//!   does not wrap mutation in a transactional layer, matching the source kernel's own
//!   error policy (§7).

pub mod config;
pub mod crossing;
pub mod error;
pub mod field;
pub mod labeller;
pub mod mesh;
pub mod pipeline;
pub mod snapper;
pub mod splitter;
pub mod verifier;

pub use error::{KernelError, Result};
pub use pipeline::{run, RunStats};
