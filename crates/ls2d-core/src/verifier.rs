//! Validates that the labelled mesh actually represents a manifold interface (§4.6).

use crate::error::{KernelError, Result};
use crate::mesh::{Mesh, SubdomainTag, TriangleId, next_local, prev_local};

/// Runs both manifold checks over `mesh`, which must already have adjacency built and
/// every valid triangle labelled by [`crate::labeller::label_subdomains`].
pub fn verify_manifold(mesh: &Mesh) -> Result<()> {
    check_no_triple_boundary_triangle(mesh)?;
    check_vertex_stars(mesh)?;
    Ok(())
}

/// Check 1: no valid triangle may have all three local edges on the interface (absent
/// neighbour, or a neighbour with a different subdomain tag). The per-triangle count is
/// reset at the start of each triangle, resolving the ambiguity left open by the source
/// (whose loop-scoped `cnt` is never visibly reinitialized per iteration).
fn check_no_triple_boundary_triangle(mesh: &Mesh) -> Result<()> {
    for (idx, tri) in mesh.triangles().iter().enumerate() {
        if !tri.valid {
            continue;
        }
        let k = TriangleId(idx as u32);
        let mut count = 0;
        for i in 0..3u8 {
            match mesh.neighbor(k, i) {
                None => count += 1,
                Some(adj) => {
                    if mesh.triangle(adj.triangle).subdomain != tri.subdomain {
                        count += 1;
                    }
                }
            }
        }
        if count == 3 {
            return Err(KernelError::NonManifoldResult(format!(
                "triangle {idx} has three interface edges"
            )));
        }
    }
    Ok(())
}

/// Check 2: for every interface edge, the vertex star at its `next`-side endpoint must
/// close into a single topological disk, i.e. carry exactly one other interface edge.
fn check_vertex_stars(mesh: &Mesh) -> Result<()> {
    for (idx, tri) in mesh.triangles().iter().enumerate() {
        if !tri.valid {
            continue;
        }
        let k = TriangleId(idx as u32);
        for i in 0..3u8 {
            let Some(adj) = mesh.neighbor(k, i) else {
                continue;
            };
            if mesh.triangle(adj.triangle).subdomain == tri.subdomain {
                continue;
            }
            let istart = next_local(i);
            if !is_manifold_vertex(mesh, k, istart) {
                return Err(KernelError::NonManifoldResult(format!(
                    "interface is not a 1-manifold at the vertex opposite edge {i} of triangle {idx}"
                )));
            }
        }
    }
    Ok(())
}

/// One step of a vertex-star walk: cross the edge `perm(i)` of `k`, landing at the
/// matching local edge of the neighbour, then advance `i` by the same permutation again.
/// `None` means the walk fell off the mesh boundary.
fn step(mesh: &Mesh, k: TriangleId, i: u8, perm: fn(u8) -> u8) -> Option<(TriangleId, u8)> {
    let i1 = perm(i);
    let adj = mesh.neighbor(k, i1)?;
    Some((adj.triangle, perm(adj.edge)))
}

fn ref_at(mesh: &Mesh, k: TriangleId) -> SubdomainTag {
    mesh.triangle(k).subdomain
}

/// Mirrors the source's `chkmaniball`: walks the star of `(start, istart)` forward, and
/// if it falls off a boundary before re-crossing the interface, walks backward from
/// `start` too (both must then hit a boundary). Otherwise it keeps walking forward
/// through the other subdomain until it must return exactly to `start`.
fn is_manifold_vertex(mesh: &Mesh, start: TriangleId, istart: u8) -> bool {
    let refstart = ref_at(mesh, start);

    let mut cur = (start, istart);
    let after_first_leg = loop {
        match step(mesh, cur.0, cur.1, next_local) {
            None => break None,
            Some(next) => {
                if ref_at(mesh, next.0) == refstart {
                    cur = next;
                } else {
                    break Some(next);
                }
            }
        }
    };

    let Some(crossed) = after_first_leg else {
        // Hit the boundary while still in the starting subdomain: the only admissible
        // outcome is hitting the boundary again walking the other way from `start`.
        let mut cur = match step(mesh, start, istart, prev_local) {
            None => return false,
            Some(next) => next,
        };
        loop {
            match step(mesh, cur.0, cur.1, prev_local) {
                None => return true,
                Some(next) => {
                    if ref_at(mesh, next.0) != refstart {
                        cur = next;
                    } else {
                        return false;
                    }
                }
            }
        }
    };

    // Already crossed into the other subdomain once; keep walking until the interface is
    // crossed again. Success iff that lands back exactly on `start`.
    let mut cur = crossed;
    loop {
        match step(mesh, cur.0, cur.1, next_local) {
            None => return false,
            Some(next) => {
                if ref_at(mesh, next.0) != refstart {
                    cur = next;
                } else {
                    return next.0 == start;
                }
            }
        }
    }
}
