//! Snapping of near-zero field values, and the manifold-ball admissibility check that
//! decides whether a given snap may be kept (§4.1, §4.2).

use crate::field::{Field, same_sign};
use crate::mesh::{Mesh, TriangleId, next_local, prev_local};
use crate::config::Thresholds;

/// Counts produced by [`snap_values`], surfaced in [`crate::pipeline::RunStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapStats {
    /// Points whose field value was snapped to exactly zero.
    pub snapped: usize,
    /// Of those, how many were reverted because the snap was non-manifold.
    pub reverted: usize,
}

/// Snaps every point with `|phi| < eps` to exactly zero, then reverts any snap that
/// would pinch the prospective zero locus at that point (§4.1).
///
/// Requires `mesh` to already have adjacency built ([`Mesh::build_adjacency`]): the
/// manifold-ball check (§4.2) walks it.
pub fn snap_values(mesh: &Mesh, field: &mut Field, thresholds: Thresholds) -> SnapStats {
    let mut stats = SnapStats::default();

    // `tmp` and the point scratch flag are phase-local side tables (Design Notes'
    // preferred alternative to mutating shared scratch struct fields), sized to the
    // point table and reset implicitly by being freshly allocated here.
    let mut tmp = vec![0.0f64; mesh.point_count()];
    let mut snapped = vec![false; mesh.point_count()];

    for (idx, point) in mesh.points().iter().enumerate() {
        if !point.valid {
            continue;
        }
        let p = crate::mesh::PointId(idx as u32);
        let phi = field.get(p);
        if phi.abs() < thresholds.eps {
            tmp[idx] = if phi.abs() < thresholds.epsd {
                -100.0 * thresholds.eps
            } else {
                phi
            };
            field.set(p, 0.0);
            snapped[idx] = true;
            stats.snapped += 1;
        }
    }

    for (idx, tri) in mesh.triangles().iter().enumerate() {
        if !tri.valid {
            continue;
        }
        let k = TriangleId(idx as u32);
        for i in 0..3u8 {
            let p = tri.v[i as usize];
            if !snapped[p.0 as usize] {
                continue;
            }
            let p1 = tri.v[next_local(i) as usize];
            let p2 = tri.v[prev_local(i) as usize];

            // Only a triangle whose other two vertices actually straddle zero catches
            // this point; a flagged point never adjacent to such an edge is simply left
            // snapped. Once caught, the flag is cleared regardless of the manifold-ball
            // verdict, so a point shared by several triangles is tested at most once.
            if !same_sign(field.get(p1), field.get(p2)) {
                if !is_manifold_ball(mesh, field, k, i) {
                    field.set(p, tmp[p.0 as usize]);
                    stats.reverted += 1;
                }
                snapped[p.0 as usize] = false;
                tmp[p.0 as usize] = 0.0;
            }
        }
    }

    stats
}

/// Decides whether treating `start.v[istart]` as lying on the zero locus keeps the
/// interface manifold in its star (§4.2).
///
/// Walks the star in both rotational senses from the vertex and compares where each
/// walk stops; the snap is admissible iff both walks stop at the same triangle
/// (including both stopping at the mesh boundary).
pub fn is_manifold_ball(mesh: &Mesh, field: &Field, start: TriangleId, istart: u8) -> bool {
    walk_ball(mesh, field, start, istart, true) == walk_ball(mesh, field, start, istart, false)
}

fn walk_ball(
    mesh: &Mesh,
    field: &Field,
    start: TriangleId,
    istart: u8,
    forward: bool,
) -> Option<TriangleId> {
    let mut k = start;
    let mut i = if forward {
        next_local(istart)
    } else {
        prev_local(istart)
    };

    loop {
        let adj = mesh.neighbor(k, i)?;
        let i1 = adj.edge;
        // The step uses the permutation opposite the one used to set up `i`: starting
        // from `next(istart)`, each step advances by `prev(i1)`, and vice versa. This
        // keeps `{i1, new_i}` picking out the two vertices of the new triangle that are
        // not the one shared with the previous triangle across the crossed edge.
        let new_i = if forward { prev_local(i1) } else { next_local(i1) };
        let tri = mesh.triangle(adj.triangle);
        let ip1 = tri.v[i1 as usize];
        let ip2 = tri.v[new_i as usize];

        k = adj.triangle;
        i = new_i;

        if !same_sign(field.get(ip1), field.get(ip2)) {
            return Some(k);
        }
    }
}
