//! Enumeration of zero-crossing edges and insertion of the intersection points that will
//! seed the splitter (§4.3).

use crate::config::Thresholds;
use crate::error::Result;
use crate::field::{Field, is_degenerate};
use crate::mesh::{Mesh, PointId, canonical_edge, exhausted, next_local, prev_local};
use std::collections::HashMap;

/// Output of [`enumerate_crossings`]: the edge-to-new-point map the splitter consumes,
/// keyed by the canonicalized endpoint pair.
#[derive(Debug, Clone, Default)]
pub struct CrossingHash {
    pub edges: HashMap<(PointId, PointId), PointId>,
}

impl CrossingHash {
    /// The new point inserted on the edge `(p0, p1)`, if that edge crosses zero.
    pub fn get(&self, p0: PointId, p1: PointId) -> Option<PointId> {
        self.edges.get(&canonical_edge(p0, p1)).copied()
    }
}

/// Finds every edge whose endpoints straddle zero and inserts one linearly-interpolated
/// point on it, recording the mapping in the returned [`CrossingHash`].
///
/// A `None` count (`crossings.edges.is_empty()`) means the field has no zero crossing in
/// this mesh at all; callers should treat that as "nothing to split" rather than an error.
pub fn enumerate_crossings(
    mesh: &mut Mesh,
    field: &mut Field,
    thresholds: Thresholds,
) -> Result<CrossingHash> {
    let mut flag = vec![0u32; mesh.point_count()];
    let mut nb: u32 = 0;

    // Count pass: a point's flag, once set, is a cheap signal that it already sits on a
    // counted crossing edge, letting a triangle whose edge was already counted from its
    // neighbour skip re-evaluating the same geometric edge.
    for tri in mesh.triangles() {
        if !tri.valid {
            continue;
        }
        for i in 0..3u8 {
            let p0 = tri.v[next_local(i) as usize];
            let p1 = tri.v[prev_local(i) as usize];

            if flag[p0.0 as usize] != 0 && flag[p1.0 as usize] != 0 {
                continue;
            }

            let v0 = field.get(p0);
            let v1 = field.get(p1);
            if !is_degenerate(v0, thresholds.epsd) && !is_degenerate(v1, thresholds.epsd) && v0 * v1 < 0.0 {
                nb += 1;
                if flag[p0.0 as usize] == 0 {
                    flag[p0.0 as usize] = nb;
                }
                if flag[p1.0 as usize] == 0 {
                    flag[p1.0 as usize] = nb;
                }
            }
        }
    }

    let mut crossings = CrossingHash {
        edges: HashMap::with_capacity(2 * nb as usize),
    };
    if nb == 0 {
        return Ok(crossings);
    }

    for idx in 0..mesh.triangle_count() {
        if !mesh.triangles()[idx].valid {
            continue;
        }
        for i in 0..3u8 {
            let (p0, p1) = {
                let tri = &mesh.triangles()[idx];
                (tri.v[next_local(i) as usize], tri.v[prev_local(i) as usize])
            };
            let key = canonical_edge(p0, p1);
            if crossings.edges.contains_key(&key) {
                continue;
            }

            let v0 = field.get(p0);
            let v1 = field.get(p1);
            if is_degenerate(v0, thresholds.epsd) || is_degenerate(v1, thresholds.epsd) {
                continue;
            }
            if v0 * v1 > 0.0 {
                continue;
            }
            if flag[p0.0 as usize] == 0 || flag[p1.0 as usize] == 0 {
                continue;
            }

            let mut s = v0 / (v0 - v1);
            s = s.max(thresholds.eps).min(1.0 - thresholds.eps);

            let a = mesh.point(p0).coord();
            let b = mesh.point(p1).coord();
            let coord = (a.0 + s * (b.0 - a.0), a.1 + s * (b.1 - a.1));

            let np = mesh
                .allocate_point(coord)
                .ok_or_else(|| exhausted("inserting a zero-crossing point"))?;
            field.insert(np, 0.0);
            crossings.edges.insert(key, np);
        }
    }

    Ok(crossings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    fn two_triangle_mesh() -> (Mesh, Field) {
        let mut mesh = Mesh::new();
        let a = mesh.allocate_point((0.0, 0.0)).unwrap();
        let b = mesh.allocate_point((1.0, 0.0)).unwrap();
        let c = mesh.allocate_point((1.0, 1.0)).unwrap();
        let d = mesh.allocate_point((0.0, 1.0)).unwrap();
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a, c, d);
        let field = Field::new(vec![1.0, 1.0, -1.0, -1.0]);
        (mesh, field)
    }

    #[test]
    fn no_crossing_produces_empty_hash() {
        let mut mesh = Mesh::new();
        let a = mesh.allocate_point((0.0, 0.0)).unwrap();
        let b = mesh.allocate_point((1.0, 0.0)).unwrap();
        let c = mesh.allocate_point((0.0, 1.0)).unwrap();
        mesh.add_triangle(a, b, c);
        let mut field = Field::new(vec![1.0, 2.0, 3.0]);

        let crossings = enumerate_crossings(&mut mesh, &mut field, Thresholds::default()).unwrap();
        assert!(crossings.edges.is_empty());
    }

    #[test]
    fn shared_edge_is_split_once_not_twice() {
        let (mut mesh, mut field) = two_triangle_mesh();
        let before = mesh.point_count();

        let crossings = enumerate_crossings(&mut mesh, &mut field, Thresholds::default()).unwrap();

        // a-b, b-c, c-d, d-a, plus the shared diagonal a-c: the diagonal is the only
        // crossing edge (a=+,c=-); b-c and d-a also cross (b=+,c=-) and (d=-,a=+).
        assert_eq!(crossings.edges.len(), 3);
        assert_eq!(mesh.point_count(), before + 3);

        let new_point = crossings.get(PointId(0), PointId(2)).unwrap();
        assert!((field.get(new_point)).abs() < 1e-12);
    }

    #[test]
    fn point_allocation_exhaustion_is_reported() {
        let (mut mesh, mut field) = two_triangle_mesh();
        mesh.set_point_capacity(Some(mesh.point_count()));

        let err = enumerate_crossings(&mut mesh, &mut field, Thresholds::default()).unwrap_err();
        assert!(matches!(err, crate::error::KernelError::ResourceExhaustion(_)));
    }
}
