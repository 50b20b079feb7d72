//! Wavefront OBJ: triangle-mesh import and partition export.
//!
//! Only geometry is read: `v` positions and `f` faces. Faces may use the
//! `i`, `i/t`, `i//n` and `i/t/n` corner forms and negative (relative)
//! indices; polygons with more than three corners are fanned into
//! triangles. Texture, normal, grouping and material records are skipped.

use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::Mesh;
use crate::mesh::bsp::BspTree;
use log::debug;
use nalgebra::Point3;
use nom::{
    IResult,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{map_res, opt, recognize},
    multi::many1,
    number::complete::recognize_float,
    sequence::{preceded, terminated, tuple},
};
use std::path::Path;

const IGNORED: [&str; 9] = ["vt", "vn", "vp", "g", "o", "s", "usemtl", "mtllib", "l"];

fn keyword(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn coordinate(input: &str) -> IResult<&str, &str> {
    preceded(space1, recognize_float)(input)
}

/// `x y z` with an optional trailing weight.
fn vertex_record(input: &str) -> IResult<&str, [&str; 3]> {
    let (input, (x, y, z)) = tuple((coordinate, coordinate, coordinate))(input)?;
    let (input, _w) = opt(coordinate)(input)?;
    let (input, _) = space0(input)?;
    Ok((input, [x, y, z]))
}

fn index(input: &str) -> IResult<&str, i64> {
    map_res(recognize(preceded(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)
}

/// One face corner; only the position index is kept.
fn face_corner(input: &str) -> IResult<&str, i64> {
    terminated(
        index,
        take_while(|c: char| c == '/' || c == '-' || c.is_ascii_digit()),
    )(input)
}

fn face_record(input: &str) -> IResult<&str, Vec<i64>> {
    terminated(many1(preceded(space1, face_corner)), space0)(input)
}

fn malformed(line: usize, msg: impl std::fmt::Display) -> IoError {
    IoError::MalformedInput(format!("line {line}: {msg}"))
}

/// Resolve a 1-based (or negative, relative) OBJ index to a 0-based one.
fn resolve(raw: i64, num_vertices: usize, line: usize) -> Result<usize, IoError> {
    let resolved = if raw > 0 {
        raw - 1
    } else {
        num_vertices as i64 + raw
    };
    if raw == 0 || resolved < 0 || resolved >= num_vertices as i64 {
        return Err(malformed(
            line,
            format!("vertex index {raw} out of range (1..={num_vertices})"),
        ));
    }
    Ok(resolved as usize)
}

impl Mesh {
    /// Parse an OBJ document into a closed or open triangle mesh.
    ///
    /// Faces that repeat a vertex or that would duplicate an existing
    /// half-edge (a non-manifold or inconsistently wound surface) are
    /// rejected with [`IoError::MalformedInput`].
    pub fn from_obj(source: &str) -> Result<Mesh, IoError> {
        let mut mesh = Mesh::new();
        for (n, raw_line) in source.lines().enumerate() {
            let line_no = n + 1;
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let (rest, kw) = keyword(line).map_err(|e| malformed(line_no, e))?;
            match kw {
                "v" => {
                    let (rest, [x, y, z]) =
                        vertex_record(rest).map_err(|e| malformed(line_no, e))?;
                    if !rest.is_empty() {
                        return Err(malformed(line_no, format!("unexpected `{rest}`")));
                    }
                    mesh.add_vertex(Point3::new(
                        x.parse::<Real>()?,
                        y.parse::<Real>()?,
                        z.parse::<Real>()?,
                    ));
                },
                "f" => {
                    let (rest, corners) = face_record(rest).map_err(|e| malformed(line_no, e))?;
                    if !rest.is_empty() {
                        return Err(malformed(line_no, format!("unexpected `{rest}`")));
                    }
                    add_face(&mut mesh, &corners, line_no)?;
                },
                kw if IGNORED.contains(&kw) => {},
                other => debug!("obj line {line_no}: skipping `{other}` record"),
            }
        }
        Ok(mesh)
    }

    /// Read and parse an OBJ file.
    pub fn from_obj_file(path: impl AsRef<Path>) -> Result<Mesh, IoError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_obj(&source)
    }
}

fn add_face(mesh: &mut Mesh, corners: &[i64], line: usize) -> Result<(), IoError> {
    if corners.len() < 3 {
        return Err(malformed(line, "a face needs at least three corners"));
    }
    let ids = corners
        .iter()
        .map(|&raw| resolve(raw, mesh.num_vertices(), line))
        .collect::<Result<Vec<usize>, IoError>>()?;

    for k in 1..ids.len() - 1 {
        let (a, b, c) = (ids[0], ids[k], ids[k + 1]);
        if a == b || b == c || c == a {
            return Err(malformed(line, "face repeats a vertex"));
        }
        if let Some((s, e)) = [(a, b), (b, c), (c, a)]
            .into_iter()
            .find(|&(s, e)| mesh.get_edge(s, e).is_some())
        {
            return Err(malformed(
                line,
                format!("edge {} -> {} is already used by another face", s + 1, e + 1),
            ));
        }
        mesh.add_triangle(a, b, c);
    }
    Ok(())
}

impl BspTree {
    /// Export every leaf as its own `g partN` group.
    ///
    /// Each group carries positions, smoothed vertex normals and faces;
    /// indices are global across the file as OBJ requires.
    pub fn to_obj(&self) -> String {
        let leaves = self.leaves();
        let mut out = String::new();
        out.push_str(&format!("# {} parts\n", leaves.len()));

        let mut base = 1;
        for (i, leaf) in leaves.iter().enumerate() {
            let mut mesh = leaf.mesh().clone();
            mesh.compute_gouraud_normals();

            out.push_str(&format!("g part{i}\n"));
            for v in mesh.vertices() {
                out.push_str(&format!("v {} {} {}\n", v.pos.x, v.pos.y, v.pos.z));
            }
            for v in mesh.vertices() {
                let n = v.gouraud_normal();
                out.push_str(&format!("vn {} {} {}\n", n.x, n.y, n.z));
            }
            for t in mesh.triangles() {
                if let Some([a, b, c]) = mesh.triangle_vertices(t.id) {
                    let (a, b, c) = (a + base, b + base, c + base);
                    out.push_str(&format!("f {a}//{a} {b}//{b} {c}//{c}\n"));
                }
            }
            base += mesh.num_vertices();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_forms() {
        assert_eq!(face_corner("7/2/3 rest"), Ok((" rest", 7)));
        assert_eq!(face_corner("7//3"), Ok(("", 7)));
        assert_eq!(face_corner("-1"), Ok(("", -1)));
    }

    #[test]
    fn negative_indices_are_relative() {
        assert_eq!(resolve(-1, 4, 1).unwrap(), 3);
        assert!(resolve(0, 4, 1).is_err());
        assert!(resolve(5, 4, 1).is_err());
    }
}
