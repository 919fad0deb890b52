// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared meshes for the integration tests

#![allow(dead_code)]

use polygrav::{Polyhedron, PolyhedronIntegrity, PolyhedronOptions};

/// Axis aligned cube with corners at +-1
pub const CUBE_VERTICES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

pub const CUBE_OUTWARDS: [[usize; 3]; 12] = [
    [1, 3, 2],
    [0, 3, 1],
    [0, 1, 5],
    [0, 5, 4],
    [0, 7, 3],
    [0, 4, 7],
    [1, 2, 6],
    [1, 6, 5],
    [2, 3, 6],
    [3, 7, 6],
    [4, 5, 6],
    [4, 6, 7],
];

pub const CUBE_INWARDS: [[usize; 3]; 12] = [
    [3, 1, 2],
    [3, 0, 1],
    [1, 0, 5],
    [5, 0, 4],
    [7, 0, 3],
    [4, 0, 7],
    [2, 1, 6],
    [6, 1, 5],
    [3, 2, 6],
    [7, 3, 6],
    [5, 4, 6],
    [6, 4, 7],
];

/// Outward cube with faces 0 and 4 wound inwards
pub const CUBE_OUTWARDS_MAJORITY: [[usize; 3]; 12] = [
    [3, 1, 2],
    [0, 3, 1],
    [0, 1, 5],
    [0, 5, 4],
    [7, 0, 3],
    [0, 4, 7],
    [1, 2, 6],
    [1, 6, 5],
    [2, 3, 6],
    [3, 7, 6],
    [4, 5, 6],
    [4, 6, 7],
];

/// Inward cube with faces 9, 10 and 11 wound outwards
pub const CUBE_INWARDS_MAJORITY: [[usize; 3]; 12] = [
    [3, 1, 2],
    [3, 0, 1],
    [1, 0, 5],
    [5, 0, 4],
    [7, 0, 3],
    [4, 0, 7],
    [2, 1, 6],
    [6, 1, 5],
    [3, 2, 6],
    [3, 7, 6],
    [4, 5, 6],
    [4, 6, 7],
];

/// Box of 20 x 10 x 10 away from the origin
pub const PRISM_VERTICES: [[f64; 3]; 8] = [
    [-20.0, 0.0, 25.0],
    [0.0, 0.0, 25.0],
    [0.0, 10.0, 25.0],
    [-20.0, 10.0, 25.0],
    [-20.0, 0.0, 15.0],
    [0.0, 0.0, 15.0],
    [0.0, 10.0, 15.0],
    [-20.0, 10.0, 15.0],
];

pub const PRISM_OUTWARDS: [[usize; 3]; 12] = [
    [0, 4, 5],
    [0, 5, 1],
    [0, 1, 3],
    [1, 2, 3],
    [1, 5, 6],
    [1, 6, 2],
    [0, 7, 4],
    [0, 3, 7],
    [4, 7, 5],
    [5, 7, 6],
    [2, 7, 3],
    [2, 6, 7],
];

pub const PRISM_INWARDS: [[usize; 3]; 12] = [
    [4, 0, 5],
    [5, 0, 1],
    [1, 0, 3],
    [2, 1, 3],
    [5, 1, 6],
    [6, 1, 2],
    [7, 0, 4],
    [3, 0, 7],
    [7, 4, 5],
    [7, 5, 6],
    [7, 2, 3],
    [6, 2, 7],
];

pub fn options(integrity: PolyhedronIntegrity) -> PolyhedronOptions {
    PolyhedronOptions::default().with_integrity(integrity)
}

pub fn build(
    vertices: &[[f64; 3]],
    faces: &[[usize; 3]],
    density: f64,
    options: PolyhedronOptions,
) -> polygrav::GravityResult<Polyhedron> {
    Polyhedron::new(vertices.to_vec(), faces.to_vec(), density, options)
}

/// Outward cube of density 1 built without checks
pub fn unit_cube() -> Polyhedron {
    build(
        &CUBE_VERTICES,
        &CUBE_OUTWARDS,
        1.0,
        options(PolyhedronIntegrity::Disable),
    )
    .expect("valid cube")
}
