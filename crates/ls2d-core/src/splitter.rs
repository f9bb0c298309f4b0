//! Replaces every triangle crossed by the zero locus with the canonical Split-1 or
//! Split-2 pattern (§4.4).
//!
//! Reimplemented directly in this crate rather than behind a collaborator boundary: the
//! split patterns carry the bulk of this kernel's algorithmic complexity.

use crate::crossing::CrossingHash;
use crate::error::{KernelError, Result};
use crate::mesh::{Mesh, PointId, TriangleId, next_local, prev_local};

/// Counts produced by [`split_triangles`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    pub splits: usize,
}

/// Walks every triangle present at entry and replaces each one whose edges the crossing
/// hash touches with its Split-1 or Split-2 decomposition.
///
/// Triangles appended by a split are never themselves revisited: the loop bound is
/// captured once, before any mutation, per §4.4's mutation policy.
pub fn split_triangles(mesh: &mut Mesh, crossings: &CrossingHash) -> Result<SplitStats> {
    let mut stats = SplitStats::default();
    let bound = mesh.triangle_count();

    for idx in 0..bound {
        let k = TriangleId(idx as u32);
        if !mesh.triangles()[idx].valid {
            continue;
        }
        let v = mesh.triangle(k).v;

        let mut vx = [None; 3];
        let mut flag = 0u8;
        for i in 0..3u8 {
            let p0 = v[next_local(i) as usize];
            let p1 = v[prev_local(i) as usize];
            if let Some(m) = crossings.get(p0, p1) {
                vx[i as usize] = Some(m);
                flag |= 1 << i;
            }
        }

        match flag.count_ones() {
            0 => continue,
            1 => {
                let i = flag.trailing_zeros() as u8;
                split1(mesh, k, v, i, vx[i as usize].unwrap());
                stats.splits += 1;
            }
            2 => {
                // The uncut edge is the one bit *not* set.
                let m = (!flag & 0b111).trailing_zeros() as u8;
                let e1 = next_local(m);
                let e2 = prev_local(m);
                split2(
                    mesh,
                    k,
                    v,
                    m,
                    vx[e1 as usize].unwrap(),
                    vx[e2 as usize].unwrap(),
                );
                stats.splits += 1;
            }
            _ => {
                return Err(KernelError::TopologyInvariant(format!(
                    "triangle {} has all three edges crossed",
                    k.0
                )));
            }
        }
    }

    Ok(stats)
}

/// One crossing edge, opposite vertex `i`, carrying new point `m`. Replaces the triangle
/// with two, sharing the new interior edge `v[i]`-`m`.
fn split1(mesh: &mut Mesh, k: TriangleId, v: [PointId; 3], i: u8, m: PointId) {
    let apex = v[i as usize];
    let ni = v[next_local(i) as usize];
    let pi = v[prev_local(i) as usize];

    mesh.triangle_mut(k).valid = false;
    mesh.add_triangle(apex, ni, m);
    mesh.add_triangle(apex, m, pi);
}

/// Two crossing edges, the uncut one opposite vertex `m`. `m1` is the new point on the
/// edge `v[prev(m)]`-`v[m]`; `m2` is the new point on the edge `v[m]`-`v[next(m)]`.
/// Replaces the triangle with three: the apex corner at `v[m]`, plus the remaining
/// quadrilateral triangulated along whichever diagonal touches the lower-indexed of
/// `v[next(m)]`/`v[prev(m)]`.
fn split2(mesh: &mut Mesh, k: TriangleId, v: [PointId; 3], m: u8, m1: PointId, m2: PointId) {
    let apex = v[m as usize];
    let b = v[next_local(m) as usize];
    let c = v[prev_local(m) as usize];

    mesh.triangle_mut(k).valid = false;
    mesh.add_triangle(apex, m2, m1);
    if b.0 < c.0 {
        mesh.add_triangle(m2, b, m1);
        mesh.add_triangle(b, c, m1);
    } else {
        mesh.add_triangle(m2, b, c);
        mesh.add_triangle(m2, c, m1);
    }
}
