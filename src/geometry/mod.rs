// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - per-triangle kernel and ray predicates

pub mod kernel;
pub mod predicates;

pub use kernel::{
    face_plane, plane_unit_normal, project_onto_line, segment_unit_normals, segment_vectors,
    signed_distance, triangle_area, triangle_centroid, Plane, DEGENERATE_EPSILON,
};
pub use predicates::{count_ray_intersections, ray_triangle_intersection};
