// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Stateless per-triangle geometry
//!
//! Everything here is a pure function of a vertex triple (and, for the
//! distance helpers, a query point). The evaluation cache and the integrity
//! checker are both built from these primitives.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Relative threshold on sin(angle between two edges) below which a
/// triangle is considered degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Plane through a triangle, given as unit normal and a point on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub point: Point3<f64>,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, point: Point3<f64>) -> Self {
        Self { normal, point }
    }

    /// Signed distance of `point`, positive on the side the normal points to.
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        signed_distance(point, self)
    }
}

/// Plane of the triangle (v0, v1, v2) with the right-hand-rule normal.
///
/// Returns `None` for colinear vertices or a zero-area face.
pub fn face_plane(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> Option<Plane> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let cross = edge1.cross(&edge2);
    let magnitude = cross.norm();

    if magnitude <= DEGENERATE_EPSILON * edge1.norm() * edge2.norm() || !magnitude.is_finite() {
        return None;
    }

    Some(Plane::new(cross / magnitude, *v0))
}

/// Signed distance `dot(point - plane.point, plane.normal)`.
pub fn signed_distance(point: &Point3<f64>, plane: &Plane) -> f64 {
    (point - plane.point).dot(&plane.normal)
}

/// Area of the triangle (v0, v1, v2).
pub fn triangle_area(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> f64 {
    (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
}

/// Centroid of the triangle (v0, v1, v2).
pub fn triangle_centroid(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> Point3<f64> {
    Point3::from((v0.coords + v1.coords + v2.coords) / 3.0)
}

/// Segment vectors G_p0, G_p1, G_p2 walking the face: v1-v0, v2-v1, v0-v2.
pub fn segment_vectors(
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> [Vector3<f64>; 3] {
    [v1 - v0, v2 - v1, v0 - v2]
}

/// Plane unit normal N_p from two consecutive segment vectors.
pub fn plane_unit_normal(first: &Vector3<f64>, second: &Vector3<f64>) -> Vector3<f64> {
    first.cross(second).normalize()
}

/// Segment unit normals n_pq = normalize(G_pq x N_p).
///
/// For a counter-clockwise face seen from N_p these lie in the face plane
/// and point away from the face interior.
pub fn segment_unit_normals(
    segments: &[Vector3<f64>; 3],
    plane_normal: &Vector3<f64>,
) -> [Vector3<f64>; 3] {
    [
        segments[0].cross(plane_normal).normalize(),
        segments[1].cross(plane_normal).normalize(),
        segments[2].cross(plane_normal).normalize(),
    ]
}

/// Orthogonal projection of `point` onto the infinite line through `start`
/// with direction `direction`.
pub fn project_onto_line(
    point: &Vector3<f64>,
    start: &Vector3<f64>,
    direction: &Vector3<f64>,
) -> Vector3<f64> {
    let t = (point - start).dot(direction) / direction.norm_squared();
    start + direction * t
}
