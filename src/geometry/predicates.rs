// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ray casting predicates used by the orientation check

use nalgebra::{Point3, Vector3};

/// Relative threshold on sin(angle between ray and triangle plane) below
/// which the ray counts as parallel.
const PARALLEL_EPSILON: f64 = 1e-14;

/// Intersect a ray with a triangle (Möller–Trumbore).
///
/// Returns the hit point if the ray hits the closed triangle further than
/// `min_distance` in front of its origin. Both tests are relative to the
/// size of the triangle and the ray, so they hold at any mesh scale.
pub fn ray_triangle_intersection(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    triangle: &[Point3<f64>; 3],
    min_distance: f64,
) -> Option<Point3<f64>> {
    let edge1 = triangle[1] - triangle[0];
    let edge2 = triangle[2] - triangle[0];
    let h = direction.cross(&edge2);
    let a = edge1.dot(&h);

    // Ray parallel to the triangle
    let scale = edge1.norm() * edge2.norm() * direction.norm();
    if a.abs() <= PARALLEL_EPSILON * scale || !a.is_finite() {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - triangle[0];
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    if t * direction.norm() > min_distance {
        Some(origin + direction * t)
    } else {
        None
    }
}

/// Count distinct points where a ray crosses a triangle soup.
///
/// Hits closer than `merge_distance` are counted once, so a ray passing
/// through an edge shared by two triangles crosses the surface only once.
/// Hits within `merge_distance` of the origin are ignored.
pub fn count_ray_intersections<I>(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    triangles: I,
    merge_distance: f64,
) -> usize
where
    I: IntoIterator<Item = [Point3<f64>; 3]>,
{
    let mut hits: Vec<Point3<f64>> = Vec::new();

    for triangle in triangles {
        if let Some(hit) = ray_triangle_intersection(origin, direction, &triangle, merge_distance) {
            let known = hits
                .iter()
                .any(|other| (other - hit).norm() <= merge_distance);
            if !known {
                hits.push(hit);
            }
        }
    }

    hits.len()
}
