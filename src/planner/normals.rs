//! Candidate cut directions.

use crate::float_types::Real;
use nalgebra::Vector3;

/// 129 near-uniformly distributed unit directions taken from the vertices
/// of a subdivided octahedron (one hemisphere plus the equator: a plane and
/// its flip describe the same cut, so antipodes are left out).
pub const OCTAHEDRON_NORMALS: [[Real; 3]; 129] = [
    [0.0, 0.0, 1.000000],
    [1.000000, 0.0, 0.0],
    [0.0, 1.000000, 0.0],
    [0.707107, 0.707107, 0.0],
    [0.0, 0.707107, 0.707107],
    [-0.707107, 0.707107, 0.0],
    [0.0, 0.707107, -0.707107],
    [0.707107, 0.0, -0.707107],
    [0.707107, 0.0, 0.707107],
    [-0.418436, 0.806116, -0.418436],
    [-0.806116, 0.418436, -0.418436],
    [-0.418436, 0.418436, -0.806116],
    [-0.418436, 0.806116, 0.418436],
    [-0.418436, 0.418436, 0.806116],
    [-0.806116, 0.418436, 0.418436],
    [0.418436, 0.806116, 0.418436],
    [0.806116, 0.418436, 0.418436],
    [0.418436, 0.418436, 0.806116],
    [0.418436, 0.806116, -0.418436],
    [0.418436, 0.418436, -0.806116],
    [0.806116, 0.418436, -0.418436],
    [0.948730, 0.0, 0.316088],
    [0.316091, 0.0, -0.948729],
    [0.0, 0.948730, -0.316088],
    [-0.316088, 0.948730, 0.0],
    [0.0, 0.948730, 0.316088],
    [0.316088, 0.948730, 0.0],
    [0.948730, 0.316088, 0.0],
    [0.0, 0.316088, 0.948730],
    [-0.948730, 0.316088, 0.0],
    [0.0, 0.316088, -0.948730],
    [0.948730, 0.0, -0.316088],
    [0.316088, 0.0, 0.948730],
    [-0.200776, 0.379965, -0.902948],
    [-0.379965, 0.200776, -0.902948],
    [-0.173078, 0.173078, -0.969581],
    [-0.902948, 0.379965, 0.200776],
    [-0.902948, 0.200776, 0.379965],
    [-0.969581, 0.173078, 0.173078],
    [0.200776, 0.379965, 0.902948],
    [0.379965, 0.200776, 0.902948],
    [0.173078, 0.173078, 0.969581],
    [0.902948, 0.379965, -0.200776],
    [0.902947, 0.200776, -0.379967],
    [0.969581, 0.173078, -0.173078],
    [0.173078, 0.969581, -0.173078],
    [0.200776, 0.902947, -0.379967],
    [0.379967, 0.902947, -0.200776],
    [0.173078, 0.173078, -0.969581],
    [0.379967, 0.200776, -0.902947],
    [0.200776, 0.379965, -0.902948],
    [0.434333, 0.636928, -0.636928],
    [0.636928, 0.434333, -0.636928],
    [0.636928, 0.636928, -0.434333],
    [0.173078, 0.969581, 0.173078],
    [0.379967, 0.902947, 0.200776],
    [0.200776, 0.902947, 0.379967],
    [0.969581, 0.173078, 0.173078],
    [0.902947, 0.200776, 0.379967],
    [0.902948, 0.379965, 0.200776],
    [0.636928, 0.636928, 0.434333],
    [0.636928, 0.434333, 0.636928],
    [0.434333, 0.636928, 0.636928],
    [-0.173078, 0.969581, 0.173078],
    [-0.200776, 0.902947, 0.379967],
    [-0.379967, 0.902947, 0.200776],
    [-0.173078, 0.173078, 0.969581],
    [-0.379967, 0.200776, 0.902947],
    [-0.200776, 0.379965, 0.902948],
    [-0.434333, 0.636928, 0.636928],
    [-0.636928, 0.434333, 0.636928],
    [-0.636928, 0.636928, 0.434333],
    [-0.173078, 0.969581, -0.173078],
    [-0.379967, 0.902947, -0.200776],
    [-0.200776, 0.902947, -0.379967],
    [-0.969581, 0.173078, -0.173078],
    [-0.902947, 0.200776, -0.379967],
    [-0.902948, 0.379965, -0.200776],
    [-0.636928, 0.636928, -0.434333],
    [-0.636928, 0.434333, -0.636928],
    [-0.434333, 0.636928, -0.636928],
    [0.519721, 0.0, 0.854336],
    [0.854336, 0.0, -0.519721],
    [0.0, 0.519721, -0.854336],
    [-0.854336, 0.519721, 0.0],
    [0.0, 0.519721, 0.854336],
    [0.854336, 0.519721, 0.0],
    [0.139167, 0.990269, 0.0],
    [0.0, 0.990269, 0.139167],
    [-0.139167, 0.990269, 0.0],
    [0.0, 0.990269, -0.139167],
    [0.139167, 0.0, -0.990269],
    [0.990269, 0.0, 0.139167],
    [0.779257, 0.590606, -0.209624],
    [0.209626, 0.590606, -0.779257],
    [0.209626, 0.779256, -0.590607],
    [0.209624, 0.590606, 0.779257],
    [0.779257, 0.590606, 0.209624],
    [0.590608, 0.779256, 0.209624],
    [-0.779257, 0.590606, 0.209624],
    [-0.209626, 0.590606, 0.779257],
    [-0.209626, 0.779256, 0.590607],
    [-0.209624, 0.590606, -0.779257],
    [-0.779257, 0.590606, -0.209626],
    [-0.590608, 0.779256, -0.209624],
    [-0.209624, 0.779257, -0.590606],
    [-0.779256, 0.209624, -0.590608],
    [-0.590606, 0.209624, -0.779257],
    [-0.590608, 0.779256, 0.209624],
    [-0.590608, 0.209624, 0.779256],
    [-0.779257, 0.209624, 0.590606],
    [0.209624, 0.779256, 0.590608],
    [0.779256, 0.209624, 0.590608],
    [0.590606, 0.209624, 0.779257],
    [0.590608, 0.779256, -0.209624],
    [0.590608, 0.209624, -0.779256],
    [0.779257, 0.209624, -0.590606],
    [0.854336, 0.0, 0.519721],
    [0.519721, 0.0, -0.854336],
    [0.0, 0.854336, -0.519721],
    [-0.519721, 0.854336, 0.0],
    [0.0, 0.854336, 0.519721],
    [0.519721, 0.854336, 0.0],
    [0.990269, 0.139167, 0.0],
    [0.0, 0.139167, 0.990269],
    [-0.990269, 0.139167, 0.0],
    [0.0, 0.139167, -0.990269],
    [0.990269, 0.0, -0.139167],
    [0.139167, 0.0, 0.990269],
];

/// The full direction library, normalized.
pub fn octahedron_normals() -> Vec<Vector3<Real>> {
    OCTAHEDRON_NORMALS
        .iter()
        .map(|&[x, y, z]| Vector3::new(x, y, z).normalize())
        .collect()
}

/// Only the three coordinate axes; cheap and exact for box-like parts.
pub fn axis_normals() -> Vec<Vector3<Real>> {
    vec![Vector3::x(), Vector3::y(), Vector3::z()]
}
