//! Cutting planes and point/triangle classification.

use crate::float_types::{Real, tolerance};
use nalgebra::{Point3, Vector3};

// Classification bitmask. A triangle's class is the OR of its corners'.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane `{ p : normal · p = w }` with a unit normal.
///
/// The *front* half-space (`normal · p > w`) is the side a cut hands to the
/// right child of a [`BspTree`](crate::mesh::bsp::BspTree).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal (plane equation: n·p = w)
    pub w: Real,
}

impl Plane {
    /// Create a new plane from a normal vector and offset; the normal is normalized.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane {
            normal: normal.normalize(),
            w,
        }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane (reverse normal and offset)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance of `point` from the plane, positive on the front side.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as FRONT, BACK or COPLANAR. Points within
    /// [`tolerance`] of the plane are COPLANAR.
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        orient_distance(self.signed_distance(point))
    }

    /// Bitmask of the classifications of a triangle's three corners.
    pub fn classify_triangle(&self, corners: &[Point3<Real>; 3]) -> i8 {
        corners
            .iter()
            .fold(COPLANAR, |acc, p| acc | self.orient_point(p))
    }

    /// Intersect the segment `a → b` with this plane.
    ///
    /// Casts a ray from `a` along `b - a`:
    /// `t = (w − a·n) / ((b − a)·n)`. Returns `None` when the segment is
    /// parallel to the plane (within [`tolerance`]). `t` is clamped to the segment.
    pub fn intersect_edge(&self, a: &Point3<Real>, b: &Point3<Real>) -> Option<Point3<Real>> {
        let dir = b - a;
        let denom = self.normal.dot(&dir);
        if denom.abs() <= tolerance() {
            return None;
        }
        let t = ((self.w - self.normal.dot(&a.coords)) / denom).clamp(0.0, 1.0);
        Some(a + dir * t)
    }
}

/// Class of a signed distance from a plane.
fn orient_distance(distance: Real) -> i8 {
    let tol = tolerance();
    if distance > tol {
        FRONT
    } else if distance < -tol {
        BACK
    } else {
        COPLANAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_edge_hits_midpoint() {
        let plane = Plane::from_normal(Vector3::x(), 1.0);
        let hit = plane
            .intersect_edge(&Point3::new(0.0, 0.0, 0.0), &Point3::new(2.0, 2.0, 0.0))
            .unwrap();
        assert!((hit - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn parallel_edge_has_no_intersection() {
        let plane = Plane::from_normal(Vector3::z(), 0.0);
        let a = Point3::new(0.0, 0.0, 1.0);
        let b = Point3::new(5.0, 0.0, 1.0);
        assert!(plane.intersect_edge(&a, &b).is_none());
    }
}
