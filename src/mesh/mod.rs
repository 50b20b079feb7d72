//! `Mesh`: a half-edge triangle mesh owned by one partition of the input.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::half_edge::edge_ids_of;
use crate::volume::WorkingVolume;
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

pub mod bsp;
pub mod half_edge;
pub mod plane;
pub mod triangulated;
pub mod vertex;

pub use half_edge::{Edge, EdgeId, Triangle, TriangleId};
pub use vertex::{Vertex, VertexId};

/// A triangle mesh stored as arenas of vertices, half-edges and triangles.
///
/// - At most one half-edge exists per ordered vertex pair.
/// - Every live triangle owns exactly three live half-edges; removing the
///   triangle removes them.
/// - The bounding box only grows as vertices are counted into it. It is
///   recomputed by [`Mesh::compacted`].
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    edges: Vec<Option<Edge>>,
    edge_table: HashMap<(VertexId, VertexId), EdgeId>,
    triangles: Vec<Option<Triangle>>,
    num_triangles: usize,
    bounding_box: Option<Aabb>,
    /// Boundary vertex created for each clipped `(parent, parent)` pair.
    /// Only meaningful during a single cut.
    vertex_parents: HashMap<(VertexId, VertexId), VertexId>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Returns a new empty Mesh
    pub fn new() -> Self {
        Mesh {
            vertices: Vec::new(),
            edges: Vec::new(),
            edge_table: HashMap::new(),
            triangles: Vec::new(),
            num_triangles: 0,
            bounding_box: None,
            vertex_parents: HashMap::new(),
        }
    }

    /// Build a mesh from vertex positions and 0-based triangle index triples.
    ///
    /// Panics if an index is out of range or the triangles are not an
    /// oriented manifold (see [`Mesh::add_triangle`]).
    pub fn from_indexed(positions: &[Point3<Real>], triangles: &[[usize; 3]]) -> Self {
        let mut mesh = Mesh::new();
        for p in positions {
            mesh.add_vertex(*p);
        }
        for &[a, b, c] in triangles {
            mesh.add_triangle(a, b, c);
        }
        mesh
    }

    /// A closed axis-aligned box spanning `min..max`, wound outward.
    pub fn cuboid(min: Point3<Real>, max: Point3<Real>) -> Self {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);
        let positions = [
            Point3::new(x0, y0, z0),
            Point3::new(x1, y0, z0),
            Point3::new(x1, y1, z0),
            Point3::new(x0, y1, z0),
            Point3::new(x0, y0, z1),
            Point3::new(x1, y0, z1),
            Point3::new(x1, y1, z1),
            Point3::new(x0, y1, z1),
        ];
        let triangles = [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        Self::from_indexed(&positions, &triangles)
    }

    // ========
    // VERTICES

    /// Append a vertex and extend the bounding box to contain it.
    pub fn add_vertex(&mut self, pos: Point3<Real>) -> VertexId {
        let id = self.add_unbounded_vertex(pos);
        self.include_in_bounds(id);
        id
    }

    /// Append a vertex without counting it in the bounding box.
    ///
    /// Used for corners of triangles that are about to be clipped away.
    pub fn add_unbounded_vertex(&mut self, pos: Point3<Real>) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex::new(id, pos));
        id
    }

    /// Extend the bounding box to contain vertex `v`.
    pub fn include_in_bounds(&mut self, v: VertexId) {
        let p = self.vertices[v].pos;
        match self.bounding_box.as_mut() {
            Some(aabb) => {
                aabb.mins = aabb.mins.inf(&p);
                aabb.maxs = aabb.maxs.sup(&p);
            },
            None => self.bounding_box = Some(Aabb::new(p, p)),
        }
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// True if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // =========
    // TRIANGLES

    /// Create triangle `a → b → c` and its three half-edges.
    ///
    /// Each new half-edge is linked with its reverse-oriented counterpart if
    /// one exists, establishing adjacency.
    ///
    /// # Panics
    /// If a corner is out of range, two corners coincide, or one of the
    /// ordered edges already exists (a non-manifold or duplicate insertion).
    pub fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) -> TriangleId {
        let corners = [a, b, c];
        assert!(
            corners.iter().all(|&v| v < self.vertices.len()),
            "triangle {corners:?} references a vertex outside this mesh"
        );
        assert!(a != b && b != c && c != a, "degenerate triangle {corners:?}");
        for k in 0..3 {
            let key = (corners[k], corners[(k + 1) % 3]);
            assert!(
                !self.edge_table.contains_key(&key),
                "half-edge {key:?} already exists (non-manifold or duplicate triangle)"
            );
        }

        let id = self.triangles.len();
        let ids = edge_ids_of(id);
        for k in 0..3 {
            let (start, end) = (corners[k], corners[(k + 1) % 3]);
            let opposite = self.edge_table.get(&(end, start)).copied();
            if let Some(twin) = opposite.and_then(|e| self.edges[e].as_mut()) {
                twin.opposite = Some(ids[k]);
            }
            self.edges.push(Some(Edge {
                start,
                end,
                triangle: id,
                next: ids[(k + 1) % 3],
                opposite,
            }));
            self.edge_table.insert((start, end), ids[k]);
        }
        self.triangles.push(Some(Triangle { id, edge: ids[0] }));
        self.num_triangles += 1;
        id
    }

    /// Detach and free the triangle's three half-edges and release the triangle.
    ///
    /// Vertices are left in place; they may still be referenced elsewhere.
    pub fn remove_triangle(&mut self, t: TriangleId) {
        let removed = self.triangles.get_mut(t).and_then(Option::take);
        assert!(removed.is_some(), "triangle {t} is not part of this mesh");
        for e in edge_ids_of(t) {
            let Some(edge) = self.edges[e].take() else {
                continue;
            };
            self.edge_table.remove(&(edge.start, edge.end));
            if let Some(twin) = edge.opposite.and_then(|o| self.edges[o].as_mut()) {
                twin.opposite = None;
            }
        }
        self.num_triangles -= 1;
    }

    pub fn triangle(&self, t: TriangleId) -> Option<&Triangle> {
        self.triangles.get(t).and_then(Option::as_ref)
    }

    /// Live triangles in id order.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.triangles.iter().flatten()
    }

    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    /// Corners of triangle `t` in winding order, following the `next` chain.
    pub fn triangle_vertices(&self, t: TriangleId) -> Option<[VertexId; 3]> {
        let first = self.edge(self.triangle(t)?.edge)?;
        let second = self.edge(first.next)?;
        let third = self.edge(second.next)?;
        Some([first.start, second.start, third.start])
    }

    /// Corner positions of triangle `t` in winding order.
    pub fn triangle_positions(&self, t: TriangleId) -> Option<[Point3<Real>; 3]> {
        self.triangle_vertices(t)
            .map(|corners| corners.map(|v| self.vertices[v].pos))
    }

    /// Unit face normal of triangle `t` (zero if degenerate).
    pub fn face_normal(&self, t: TriangleId) -> Option<Vector3<Real>> {
        let [a, b, c] = self.triangle_positions(t)?;
        let n = (b - a).cross(&(c - a));
        Some(n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros))
    }

    // =====
    // EDGES

    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e).and_then(Option::as_ref)
    }

    /// Look up the half-edge `a → b`.
    pub fn get_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_table.get(&(a, b)).copied()
    }

    /// Reverse-oriented half-edge of `e` in the neighbouring triangle.
    pub fn opposite(&self, e: EdgeId) -> Option<EdgeId> {
        self.edge(e)?.opposite
    }

    /// Next half-edge around the triangle owning `e`.
    pub fn next(&self, e: EdgeId) -> Option<EdgeId> {
        self.edge(e).map(|edge| edge.next)
    }

    pub fn num_edges(&self) -> usize {
        self.edge_table.len()
    }

    /// True if every half-edge has an opposite, i.e. the surface has no boundary.
    pub fn is_closed(&self) -> bool {
        self.edges.iter().flatten().all(|e| e.opposite.is_some())
    }

    // ==============
    // VERTEX PARENTS

    /// The boundary vertex previously created on the edge between `p1` and `p2`.
    pub fn get_child_vertex(&self, p1: VertexId, p2: VertexId) -> Option<VertexId> {
        self.vertex_parents.get(&(p1, p2)).copied()
    }

    /// Record `child` as the boundary vertex created on the edge `(p1, p2)`.
    ///
    /// # Panics
    /// If the pair was already registered since the last
    /// [`Mesh::clear_vertex_parents`].
    pub fn set_parents_child(&mut self, p1: VertexId, p2: VertexId, child: VertexId) {
        let previous = self.vertex_parents.insert((p1, p2), child);
        assert!(
            previous.is_none(),
            "parent pair ({p1}, {p2}) already has a child vertex"
        );
    }

    pub fn clear_vertex_parents(&mut self) {
        self.vertex_parents.clear();
    }

    // ========
    // BOUNDING

    /// Axis-aligned bounding box; a degenerate box at the origin if nothing
    /// has been counted yet.
    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box
            .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
    }

    /// Extents of the bounding box (zero for an empty mesh).
    pub fn dimensions(&self) -> Vector3<Real> {
        self.bounding_box
            .map(|aabb| aabb.maxs - aabb.mins)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Estimate how many working volumes are needed to contain this mesh.
    pub fn num_print_volumes(&self, volume: &WorkingVolume) -> usize {
        volume.print_volumes_for(self.dimensions())
    }

    /// True iff the sorted bounding-box extents are each within the
    /// correspondingly sorted working-volume extents.
    pub fn fits_in_volume(&self, volume: &WorkingVolume) -> bool {
        volume.contains_dims(self.dimensions())
    }

    /// Extreme values of `normal · p` over all vertices.
    pub fn min_max_offsets_along(&self, normal: &Vector3<Real>) -> Option<(Real, Real)> {
        self.vertices.iter().map(|v| normal.dot(&v.pos.coords)).fold(
            None,
            |acc, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            },
        )
    }

    // =======
    // NORMALS

    /// Compute the averaged (Gouraud) normal of every vertex.
    pub fn compute_gouraud_normals(&mut self) {
        self.vertices.iter_mut().for_each(Vertex::clear_gouraud_normal);
        let faces: Vec<([VertexId; 3], Vector3<Real>)> = self
            .triangles()
            .filter_map(|t| Some((self.triangle_vertices(t.id)?, self.face_normal(t.id)?)))
            .collect();
        for (corners, normal) in faces {
            for v in corners {
                self.vertices[v].incr_gouraud_normal(normal);
            }
        }
    }

    /// Rebuild the mesh keeping only vertices referenced by a triangle.
    ///
    /// Vertex order and triangle order are preserved; ids are renumbered
    /// densely and the bounding box is recomputed from the surviving
    /// vertices.
    pub fn compacted(&self) -> Mesh {
        let faces: Vec<[VertexId; 3]> = self
            .triangles()
            .filter_map(|t| self.triangle_vertices(t.id))
            .collect();

        let mut used = vec![false; self.vertices.len()];
        faces.iter().flatten().for_each(|&v| used[v] = true);

        let mut out = Mesh::new();
        let remap: Vec<VertexId> = self
            .vertices
            .iter()
            .zip(&used)
            .map(|(v, &keep)| if keep { out.add_vertex(v.pos) } else { usize::MAX })
            .collect();
        for [a, b, c] in faces {
            out.add_triangle(remap[a], remap[b], remap[c]);
        }
        out
    }

    /// Drop all topology but keep the bounding box.
    ///
    /// Used for interior tree nodes whose geometry is no longer needed except
    /// for their extents.
    pub fn bounds_only(&self) -> Mesh {
        Mesh {
            bounding_box: self.bounding_box,
            ..Mesh::new()
        }
    }
}
