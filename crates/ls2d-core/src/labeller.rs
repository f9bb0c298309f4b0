//! Assigns every post-split triangle to the `PLUS` or `MINUS` subdomain by majority sign
//! of its vertex field values (§4.5).

use crate::error::{KernelError, Result};
use crate::field::Field;
use crate::mesh::{Mesh, SubdomainTag};

/// Labels every valid triangle `PLUS` or `MINUS`, in place.
///
/// Requires the splitter to have already run: a triangle straddling zero (both strictly
/// positive and strictly negative vertices) is a `TopologyInvariant` violation here,
/// meaning §4.3/§4.4 left a sign change uncut.
pub fn label_subdomains(mesh: &mut Mesh, field: &Field) -> Result<()> {
    for idx in 0..mesh.triangle_count() {
        if !mesh.triangles()[idx].valid {
            continue;
        }
        let v = mesh.triangles()[idx].v;

        let (mut npl, mut nmn, mut nz) = (0, 0, 0);
        for p in v {
            let phi = field.get(p);
            if phi > 0.0 {
                npl += 1;
            } else if phi < 0.0 {
                nmn += 1;
            } else {
                nz += 1;
            }
        }

        if nz >= 3 || (npl > 0 && nmn > 0) {
            return Err(KernelError::TopologyInvariant(format!(
                "triangle {idx} has an uncut sign change (npl={npl}, nmn={nmn}, nz={nz})"
            )));
        }

        mesh.triangles_mut()[idx].subdomain = if npl > 0 {
            SubdomainTag::Plus
        } else {
            SubdomainTag::Minus
        };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn majority_sign_determines_label() {
        let mut mesh = Mesh::new();
        let a = mesh.allocate_point((0.0, 0.0)).unwrap();
        let b = mesh.allocate_point((1.0, 0.0)).unwrap();
        let c = mesh.allocate_point((0.0, 1.0)).unwrap();
        mesh.add_triangle(a, b, c);
        let field = Field::new(vec![1.0, 2.0, 0.0]);

        label_subdomains(&mut mesh, &field).unwrap();
        assert_eq!(mesh.triangles()[0].subdomain, SubdomainTag::Plus);
    }

    #[test]
    fn mixed_sign_triangle_is_a_topology_invariant_violation() {
        let mut mesh = Mesh::new();
        let a = mesh.allocate_point((0.0, 0.0)).unwrap();
        let b = mesh.allocate_point((1.0, 0.0)).unwrap();
        let c = mesh.allocate_point((0.0, 1.0)).unwrap();
        mesh.add_triangle(a, b, c);
        let field = Field::new(vec![1.0, -1.0, 0.5]);

        let err = label_subdomains(&mut mesh, &field).unwrap_err();
        assert!(matches!(err, KernelError::TopologyInvariant(_)));
    }
}
