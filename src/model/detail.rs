// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed-form contribution of a single face
//!
//! All quantities are computed with the evaluation point moved to the
//! origin. Notation follows the usual line/surface integral formulation:
//!
//! - `N_p` plane unit normal, `n_pq` segment unit normals
//! - `h_p` distance of the point to the plane, `σ_p` the side it lies on
//! - `P'` projection of the point onto the plane, `P''` projection of `P'`
//!   onto a segment line, `h_pq = |P' - P''|`
//! - `LN` and `AN` the logarithmic and arctangent segment terms
//!
//! Points on a plane, segment line or vertex are valid input and resolve to
//! the limiting forms of the terms instead of NaN.

use super::result::EvaluationResult;
use crate::geometry::{plane_unit_normal, project_onto_line, segment_unit_normals, segment_vectors};
use crate::utils::{is_critical_difference, is_zero, sign_with_tolerance, EPSILON_ZERO_OFFSET};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::warn;

/// Point independent data of one face, computed once per evaluable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceCache {
    /// Segment vectors G_pq: v1 - v0, v2 - v1, v0 - v2
    pub segments: [Vector3<f64>; 3],
    /// Plane unit normal N_p
    pub plane_normal: Vector3<f64>,
    /// Segment unit normals n_pq
    pub segment_normals: [Vector3<f64>; 3],
}

impl FaceCache {
    /// Derive the cache entry of a face from its corners.
    ///
    /// The face must not be degenerate, otherwise the normals are NaN.
    pub fn new(corners: &[Point3<f64>; 3]) -> Self {
        let segments = segment_vectors(&corners[0], &corners[1], &corners[2]);
        let plane_normal = plane_unit_normal(&segments[0], &segments[1]);
        let segment_normals = segment_unit_normals(&segments, &plane_normal);
        Self {
            segments,
            plane_normal,
            segment_normals,
        }
    }

    /// Whether this entry could have been derived from `corners`.
    ///
    /// Segment vectors are plain differences and must match exactly; the
    /// normals only need to be finite unit vectors.
    pub fn matches(&self, corners: &[Point3<f64>; 3]) -> bool {
        let unit = |v: &Vector3<f64>| {
            v.iter().all(|c| c.is_finite()) && (v.norm() - 1.0).abs() < 1e-9
        };
        self.segments == segment_vectors(&corners[0], &corners[1], &corners[2])
            && unit(&self.plane_normal)
            && self.segment_normals.iter().all(unit)
    }
}

/// Unscaled contribution of one face to potential, acceleration and tensor
/// at `point`.
pub fn face_contribution(
    corners: &[Point3<f64>; 3],
    point: &Point3<f64>,
    cache: &FaceCache,
) -> EvaluationResult {
    let v = corners.map(|c| c - point);
    let normal = &cache.plane_normal;

    let plane_distance = normal.dot(&v[0]);
    let sigma_p = sign_with_tolerance(plane_distance, EPSILON_ZERO_OFFSET);
    let h_p = plane_distance.abs();
    let p_prime = normal * plane_distance;

    let sigma_pq: [f64; 3] = std::array::from_fn(|q| {
        sign_with_tolerance(
            cache.segment_normals[q].dot(&(v[q] - p_prime)),
            EPSILON_ZERO_OFFSET,
        )
    });

    let p_double_prime: [Vector3<f64>; 3] = std::array::from_fn(|q| {
        if sigma_pq[q] == 0.0 {
            p_prime
        } else {
            project_onto_line(&p_prime, &v[q], &cache.segments[q])
        }
    });

    let h_pq: [f64; 3] = std::array::from_fn(|q| (p_prime - p_double_prime[q]).norm());

    let mut ln = [0.0; 3];
    let mut an = [0.0; 3];
    for q in 0..3 {
        let (l, a) = segment_terms(
            &v[q],
            &v[(q + 1) % 3],
            &cache.segments[q],
            &p_double_prime[q],
            h_p,
            h_pq[q],
        );
        ln[q] = l;
        an[q] = a;
    }

    let (singularity_a, singularity_b) =
        singularity_terms(&v, &p_prime, &sigma_pq, cache, h_p, sigma_p);

    let sum_ln_h: f64 = (0..3).map(|q| sigma_pq[q] * h_pq[q] * ln[q]).sum();
    let sum_ln_n: Vector3<f64> = (0..3).fold(Vector3::zeros(), |acc, q| {
        acc + cache.segment_normals[q] * ln[q]
    });
    let sum_an: f64 = (0..3).map(|q| sigma_pq[q] * an[q]).sum();

    if is_critical_difference(h_p, sum_an) {
        warn!(
            h_p,
            sum_an,
            "Plane distance and arctangent sum differ beyond f64 precision"
        );
    }

    let plane_sum = sum_ln_h + h_p * sum_an + singularity_a;
    let tensor_sum = sum_ln_n + normal * (sigma_p * sum_an) + singularity_b;

    EvaluationResult {
        potential: sigma_p * h_p * plane_sum,
        acceleration: normal * plane_sum,
        tensor: [
            normal.x * tensor_sum.x,
            normal.y * tensor_sum.y,
            normal.z * tensor_sum.z,
            normal.x * tensor_sum.y,
            normal.x * tensor_sum.z,
            normal.y * tensor_sum.z,
        ],
    }
}

/// LN and AN of the segment from `start` to `end`.
///
/// LN uses the branch that avoids cancellation when P'' lies before the
/// segment start or past its end, and is 0 when the point sits on the
/// segment itself. AN vanishes when the point lies in the plane or on the
/// segment line.
fn segment_terms(
    start: &Vector3<f64>,
    end: &Vector3<f64>,
    segment: &Vector3<f64>,
    p_double_prime: &Vector3<f64>,
    h_p: f64,
    h_pq: f64,
) -> (f64, f64) {
    let direction = segment.normalize();
    let s1 = (start - p_double_prime).dot(&direction);
    let s2 = (end - p_double_prime).dot(&direction);
    let l1 = start.norm();
    let l2 = end.norm();

    let (numerator, denominator) = if s1 < 0.0 && s2 <= 0.0 {
        (l1 - s1, l2 - s2)
    } else {
        (s2 + l2, s1 + l1)
    };

    let ln = if numerator < EPSILON_ZERO_OFFSET || denominator < EPSILON_ZERO_OFFSET {
        0.0
    } else {
        (numerator / denominator).ln()
    };

    let an = if is_zero(h_p) || is_zero(h_pq) {
        0.0
    } else {
        (h_p * s2 / (h_pq * l2)).atan() - (h_p * s1 / (h_pq * l1)).atan()
    };

    (ln, an)
}

/// Singularity terms for P' inside the face, on an edge or on a vertex.
///
/// The scalar enters the potential and acceleration sum, the vector the
/// tensor sum. Both are zero when P' lies outside the face.
fn singularity_terms(
    v: &[Vector3<f64>; 3],
    p_prime: &Vector3<f64>,
    sigma_pq: &[f64; 3],
    cache: &FaceCache,
    h_p: f64,
    sigma_p: f64,
) -> (f64, Vector3<f64>) {
    let normal = cache.plane_normal;

    // Inside the face
    if sigma_pq.iter().all(|&s| s == 1.0) {
        return (-2.0 * PI * h_p, normal * (-2.0 * PI * sigma_p));
    }

    let corner_distance: [f64; 3] = std::array::from_fn(|i| (p_prime - v[i]).norm());

    // On an edge, strictly between its two vertices
    for q in 0..3 {
        if sigma_pq[q] != 0.0 {
            continue;
        }
        let length = cache.segments[q].norm();
        let (d1, d2) = (corner_distance[q], corner_distance[(q + 1) % 3]);
        if d1 < length && d2 < length && !is_zero(d1) && !is_zero(d2) {
            return (-PI * h_p, normal * (-PI * sigma_p));
        }
    }

    // On a vertex, weighted by its interior angle
    for j in 0..3 {
        if is_zero(corner_distance[j]) {
            let outgoing = cache.segments[j];
            let incoming = cache.segments[(j + 2) % 3];
            let cosine = outgoing.dot(&-incoming) / (outgoing.norm() * incoming.norm());
            let theta = cosine.clamp(-1.0, 1.0).acos();
            return (-theta * h_p, normal * (-theta * sigma_p));
        }
    }

    (0.0, Vector3::zeros())
}
