//! STL export of meshes and of the parts of a partition.

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::bsp::BspTree;
use crate::triangulated::Triangulated3D;
use nalgebra::{Point3, Vector3};
use std::fmt::Write as _;
use std::io::Cursor;

/// One facet as STL stores it: the face normal and three corners.
struct Facet {
    normal: Vector3<Real>,
    corners: [Point3<Real>; 3],
}

fn facets<T: Triangulated3D>(shape: &T) -> Vec<Facet> {
    let mut out = Vec::new();
    shape.visit_triangles(|tri| {
        out.push(Facet {
            normal: tri[0].normal,
            corners: tri.map(|c| c.position),
        })
    });
    out
}

fn push_solid(out: &mut String, name: &str, facets: &[Facet]) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "solid {name}");
    for Facet { normal: n, corners } in facets {
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for p in corners {
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {name}");
}

/// Convert any triangulated surface to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use chopper::mesh::Mesh;
/// # use nalgebra::Point3;
/// let mesh = Mesh::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
/// let text = mesh.to_stl_ascii("my_solid");
/// assert!(text.starts_with("solid my_solid"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    push_solid(&mut out, name, &facets(shape));
    out
}

/// Convert any triangulated surface to **binary STL**. Coordinates are
/// narrowed to `f32`, as the format requires.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    #[allow(clippy::unnecessary_cast)]
    let narrow = |x: Real| x as f32;
    let triangles: Vec<stl_io::Triangle> = facets(shape)
        .into_iter()
        .map(|Facet { normal: n, corners }| stl_io::Triangle {
            normal: stl_io::Normal::new([narrow(n.x), narrow(n.y), narrow(n.z)]),
            vertices: corners.map(|p| stl_io::Vertex::new([narrow(p.x), narrow(p.y), narrow(p.z)])),
        })
        .collect();

    let mut cursor = Cursor::new(Vec::new());
    stl_io::write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }
}

impl BspTree {
    /// Every leaf as its own `solid {prefix}_partN` block of one ASCII STL.
    pub fn to_stl_ascii(&self, prefix: &str) -> String {
        let mut out = String::new();
        for (i, leaf) in self.leaves().iter().enumerate() {
            push_solid(&mut out, &format!("{prefix}_part{i}"), &facets(leaf.mesh()));
        }
        out
    }

    /// One binary STL per leaf, named `{prefix}_partN`.
    pub fn leaves_to_stl(&self, prefix: &str) -> std::io::Result<Vec<(String, Vec<u8>)>> {
        self.leaves()
            .iter()
            .enumerate()
            .map(|(i, leaf)| Ok((format!("{prefix}_part{i}"), leaf.mesh().to_stl_binary()?)))
            .collect()
    }
}
