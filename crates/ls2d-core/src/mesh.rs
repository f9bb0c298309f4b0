//! The mesh arena: points, triangles, and the half-edge adjacency between them.
//!
//! This module owns the data model described by the kernel's spec (§3) and the four
//! "collaborator" operations the kernel phases call but do not themselves implement:
//! [`Mesh::allocate_point`], [`Mesh::build_adjacency`], [`Mesh::free_adjacency`], and
//! [`Mesh::transfer_boundary_edges`]. Keeping them here, rather than in `snapper.rs` /
//! `crossing.rs` / `splitter.rs` / `labeller.rs` / `verifier.rs`, mirrors the boundary the
//! original package draws between the isosurface module and its `hashTria`/`assignEdge`/
//! point-allocator neighbors.

use crate::error::{KernelError, Result};
use std::collections::HashMap;

/// Identifier for a point in the mesh arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u32);

/// Identifier for a triangle in the mesh arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleId(pub u32);

/// Opaque subdomain tag assigned by the labeller.
///
/// `Unset` is the value every triangle (original or split-produced) carries before
/// §4.5 runs; it is never observable on a valid triangle once `run` returns `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubdomainTag {
    #[default]
    Unset,
    Plus,
    Minus,
}

/// A 2D point: coordinate plus validity bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub valid: bool,
}

impl Point {
    pub fn coord(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// A triangle: ordered vertex triple, subdomain tag, validity bit.
///
/// The scratch bitmask the splitter reads (§4.4) is *not* stored here; it lives in a
/// phase-local side table built fresh by `splitter.rs`, per the Design Notes' preference
/// for side tables over mutable scratch struct fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v: [PointId; 3],
    pub subdomain: SubdomainTag,
    pub valid: bool,
}

/// The neighbour across one local edge: which triangle, and which of *its* local edges
/// is the shared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjRef {
    pub triangle: TriangleId,
    pub edge: u8,
}

/// `next` permutation of the local edge convention: `0->1, 1->2, 2->0`.
pub const fn next_local(i: u8) -> u8 {
    match i {
        0 => 1,
        1 => 2,
        _ => 0,
    }
}

/// `prev` permutation of the local edge convention: `0->2, 1->0, 2->1`.
pub const fn prev_local(i: u8) -> u8 {
    match i {
        0 => 2,
        1 => 0,
        _ => 1,
    }
}

/// The mesh arena: point and triangle tables plus an optional half-edge adjacency.
///
/// Adjacency is `None` whenever it has been torn down by [`Mesh::free_adjacency`] or has
/// never been built; the manifold verifier and the snapper's manifold-ball check both
/// require it to be `Some`.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    points: Vec<Point>,
    triangles: Vec<Triangle>,
    adjacency: Option<Vec<[Option<AdjRef>; 3]>>,
    point_capacity: Option<usize>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of points this mesh will allocate, so that
    /// [`Mesh::allocate_point`] exhaustion (§7 `ResourceExhaustion`) is reachable and
    /// testable. Unbounded (`None`) by default, matching the source's arena which only
    /// fails when the host's backing allocator is genuinely out of memory.
    pub fn set_point_capacity(&mut self, capacity: Option<usize>) {
        self.point_capacity = capacity;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangles_mut(&mut self) -> &mut [Triangle] {
        &mut self.triangles
    }

    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.0 as usize]
    }

    pub fn triangle_mut(&mut self, id: TriangleId) -> &mut Triangle {
        &mut self.triangles[id.0 as usize]
    }

    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id.0 as usize]
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId> {
        (0..self.triangles.len() as u32).map(TriangleId)
    }

    /// Collaborator contract: append a vertex with the valid bit set.
    ///
    /// Returns `None` once `point_capacity` (if set) is reached, which is this crate's
    /// realization of the source's allocator-exhaustion failure mode.
    pub fn allocate_point(&mut self, coord: (f64, f64)) -> Option<PointId> {
        if let Some(cap) = self.point_capacity {
            if self.points.len() >= cap {
                return None;
            }
        }
        let id = PointId(self.points.len() as u32);
        self.points.push(Point {
            x: coord.0,
            y: coord.1,
            valid: true,
        });
        Some(id)
    }

    /// Appends a triangle directly. Not part of the collaborator surface (triangle
    /// creation by the splitter always succeeds once the incident points exist), but kept
    /// public so test fixtures and the splitter can build the initial/derived mesh.
    pub fn add_triangle(&mut self, v0: PointId, v1: PointId, v2: PointId) -> TriangleId {
        let id = TriangleId(self.triangles.len() as u32);
        self.triangles.push(Triangle {
            v: [v0, v1, v2],
            subdomain: SubdomainTag::Unset,
            valid: true,
        });
        id
    }

    /// Collaborator contract: (re)build the half-edge adjacency by a single edge-keyed
    /// pass over all valid triangles.
    ///
    /// This is the "obvious O(n) version" the expanded spec calls for (§9): no spatial
    /// acceleration, just a `HashMap` from the canonicalized unordered edge to the (at
    /// most two) incident (triangle, local edge) occurrences. An edge with more than two
    /// incident triangles is a malformed, non-manifold *input* mesh; this crate connects
    /// the first two occurrences it sees and leaves the rest as boundary, since
    /// diagnosing arbitrary non-manifold input is outside the kernel's contract.
    pub fn build_adjacency(&mut self) -> Result<()> {
        let mut edge_map: HashMap<(PointId, PointId), (TriangleId, u8)> = HashMap::new();
        let mut adjacency = vec![[None; 3]; self.triangles.len()];

        for (idx, tri) in self.triangles.iter().enumerate() {
            if !tri.valid {
                continue;
            }
            let k = TriangleId(idx as u32);
            for i in 0..3u8 {
                let a = tri.v[next_local(i) as usize];
                let b = tri.v[prev_local(i) as usize];
                let key = canonical_edge(a, b);

                match edge_map.remove(&key) {
                    None => {
                        edge_map.insert(key, (k, i));
                    }
                    Some((other_k, other_i)) => {
                        adjacency[k.0 as usize][i as usize] = Some(AdjRef {
                            triangle: other_k,
                            edge: other_i,
                        });
                        adjacency[other_k.0 as usize][other_i as usize] = Some(AdjRef {
                            triangle: k,
                            edge: i,
                        });
                    }
                }
            }
        }

        self.adjacency = Some(adjacency);
        Ok(())
    }

    /// Collaborator contract: tear down the adjacency table.
    pub fn free_adjacency(&mut self) {
        self.adjacency = None;
    }

    /// Collaborator contract: transfer externally-tracked boundary-edge references onto
    /// triangles.
    ///
    /// This crate's mesh has no separate boundary-edge resource table (that bookkeeping
    /// is mesh-I/O-layer concern and out of scope per §1), so there is nothing to
    /// transfer; the call is kept in the pipeline purely to preserve the phase ordering
    /// of §4.7.
    pub fn transfer_boundary_edges(&mut self) -> Result<()> {
        Ok(())
    }

    /// The neighbour across local edge `i` of triangle `k`, or `None` at the mesh
    /// boundary. Panics (via the `Option::expect` inside) if adjacency has not been
    /// built — callers are expected to check `has_adjacency` or simply only call this
    /// between a `build_adjacency`/`free_adjacency` pair.
    pub fn neighbor(&self, k: TriangleId, i: u8) -> Option<AdjRef> {
        self.adjacency
            .as_ref()
            .expect("adjacency not built")[k.0 as usize][i as usize]
    }

    pub fn has_adjacency(&self) -> bool {
        self.adjacency.is_some()
    }

    /// Planar (signed-magnitude) area of a triangle, used by the area-conservation
    /// property test (§8 I6).
    pub fn triangle_area(&self, tri: &Triangle) -> f64 {
        let a = self.point(tri.v[0]).coord();
        let b = self.point(tri.v[1]).coord();
        let c = self.point(tri.v[2]).coord();
        0.5 * ((b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1)).abs()
    }

    pub fn total_area(&self) -> f64 {
        self.triangles
            .iter()
            .filter(|t| t.valid)
            .map(|t| self.triangle_area(t))
            .sum()
    }
}

/// Canonicalizes an unordered edge key as `(min, max)`, as required by §4.3's "Edge keys".
pub fn canonical_edge(a: PointId, b: PointId) -> (PointId, PointId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Raised by [`Mesh::allocate_point`] call sites that need a `Result` rather than an
/// `Option`, e.g. when the kernel must report exhaustion through [`KernelError`].
pub fn exhausted(what: &str) -> KernelError {
    KernelError::ResourceExhaustion(format!("point allocation exhausted while {what}"))
}
