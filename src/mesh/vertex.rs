use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Handle of a vertex inside its owning [`Mesh`](super::Mesh).
pub type VertexId = usize;

/// A mesh vertex.
///
/// Besides its position a vertex carries an accumulator for smooth
/// (Gouraud) normals: every incident face adds its normal and the average is
/// read back with [`Vertex::gouraud_normal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub pos: Point3<Real>,
    normal_sum: Vector3<Real>,
    normal_count: u32,
}

impl Vertex {
    /// Create a new vertex, sanitising non-finite coordinates to zero.
    pub fn new(id: VertexId, mut pos: Point3<Real>) -> Self {
        for c in pos.coords.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }
        Vertex {
            id,
            pos,
            normal_sum: Vector3::zeros(),
            normal_count: 0,
        }
    }

    pub fn clear_gouraud_normal(&mut self) {
        self.normal_sum = Vector3::zeros();
        self.normal_count = 0;
    }

    pub fn incr_gouraud_normal(&mut self, normal: Vector3<Real>) {
        self.normal_sum += normal;
        self.normal_count += 1;
    }

    /// Averaged normal of all incident faces, or zero if none were accumulated.
    pub fn gouraud_normal(&self) -> Vector3<Real> {
        if self.normal_count == 0 {
            return Vector3::zeros();
        }
        let avg = self.normal_sum / self.normal_count as Real;
        avg.try_normalize(Real::EPSILON).unwrap_or(avg)
    }
}
