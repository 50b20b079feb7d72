use crate::mesh::Mesh;
use crate::triangulated::{TriangleCorner, Triangulated3D};

impl Triangulated3D for Mesh {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([TriangleCorner; 3]),
    {
        for t in self.triangles() {
            let (Some(positions), Some(normal)) =
                (self.triangle_positions(t.id), self.face_normal(t.id))
            else {
                continue;
            };
            f(positions.map(|position| TriangleCorner { position, normal }));
        }
    }
}
