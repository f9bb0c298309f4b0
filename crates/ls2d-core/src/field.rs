//! The scalar field `phi`, dense and co-indexed with the point table.

use crate::mesh::PointId;

/// A dense mapping from point id to a real value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    values: Vec<f64>,
}

impl Field {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn get(&self, p: PointId) -> f64 {
        self.values[p.0 as usize]
    }

    pub fn set(&mut self, p: PointId, value: f64) {
        self.values[p.0 as usize] = value;
    }

    /// Grows the backing storage (with zeros) if needed, then sets `p`'s value.
    ///
    /// Used when a new point is allocated mid-pipeline (the crossing enumerator, §4.3):
    /// the mesh and the field are separate tables, so inserting into one does not
    /// automatically keep the other in sync; callers that allocate a point must also
    /// insert its field value through this method.
    pub fn insert(&mut self, p: PointId, value: f64) {
        let idx = p.0 as usize;
        if idx >= self.values.len() {
            self.values.resize(idx + 1, 0.0);
        }
        self.values[idx] = value;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// `same_sign(a, b) == true` iff `a * b > 0` strictly.
///
/// Implemented via the overflow-safe reformulation the spec's Open Questions list
/// prefers over the literal product comparison: `(a < 0) != (b < 0) && a != 0 && b != 0`.
pub fn same_sign(a: f64, b: f64) -> bool {
    a != 0.0 && b != 0.0 && (a < 0.0) == (b < 0.0)
}

/// `true` iff `|v|` is below the degeneracy threshold, i.e. numerically indistinguishable
/// from zero for the purposes of edge-crossing detection.
pub fn is_degenerate(v: f64, epsd: f64) -> bool {
    v.abs() <= epsd
}
