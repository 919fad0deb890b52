// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cube field against the analytic prism solution

mod common;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use polygrav::{GravityEvaluable, GRAVITATIONAL_CONSTANT};
use std::f64::consts::PI;

/// Point, potential and acceleration of the analytic rectangular prism
/// solution for the +-1 cube of density 1.
const ANALYTIC: [([f64; 3], f64, [f64; 3]); 7] = [
    (
        [1.0, 1.0, 0.0],
        3.8103850469496404e-10,
        [-2.0712943827409735e-10, -2.0712943827409735e-10, 0.0],
    ),
    ([0.0, 0.0, 0.0], 6.354140140163494e-10, [0.0, 0.0, 0.0]),
    ([2.0, 0.0, 0.0], 2.6365951932715783e-10, [-1.2587699928407302e-10, 0.0, 0.0]),
    ([1.0, 0.0, 0.0], 4.786301362419239e-10, [-3.4664933664539595e-10, 0.0, 0.0]),
    (
        [1.0, 1.0, 1.0],
        3.1770700700817484e-10,
        [-1.2939973360438973e-10, -1.2939973360438973e-10, -1.2939973360438973e-10],
    ),
    (
        [3.0, -2.0, 5.0],
        8.662069043627428e-11,
        [-6.8366950776370996e-12, 4.5566943165233105e-12, -1.1402285249789424e-11],
    ),
    (
        [0.5, 0.25, -0.3],
        5.80109262997325e-10,
        [-1.4057591640722876e-10, -6.236591578564954e-11, 7.613942242455324e-11],
    ),
];

fn evaluable() -> GravityEvaluable {
    GravityEvaluable::new(common::unit_cube()).expect("cube has no degenerate faces")
}

#[test]
fn test_point_on_two_faces_matches_analytic() {
    let result = evaluable().evaluate(&Point3::new(1.0, 1.0, 0.0), false);

    assert!(result.is_finite());
    assert_relative_eq!(result.potential, 3.8103850469496404e-10, max_relative = 1e-10);
    assert_relative_eq!(
        result.acceleration,
        Vector3::new(-2.0712943827409735e-10, -2.0712943827409735e-10, 0.0),
        max_relative = 1e-10,
        epsilon = 1e-24
    );
}

#[test]
fn test_analytic_reference_points() {
    let evaluable = evaluable();

    for (point, potential, acceleration) in ANALYTIC {
        let result = evaluable.evaluate(&Point3::from(point), false);
        assert!(result.is_finite(), "non-finite result at {:?}", point);
        assert_relative_eq!(result.potential, potential, max_relative = 1e-10);
        assert_relative_eq!(
            result.acceleration,
            Vector3::from(acceleration),
            max_relative = 1e-10,
            epsilon = 1e-24
        );
    }
}

#[test]
fn test_tensor_diagonal_by_symmetry() {
    let evaluable = evaluable();

    // Centre: isotropic, trace -4 pi G rho
    let centre = evaluable.evaluate(&Point3::origin(), false);
    let expected = -4.0 * PI * GRAVITATIONAL_CONSTANT / 3.0;
    for t in &centre.tensor[..3] {
        assert_relative_eq!(*t, expected, max_relative = 1e-10);
    }
    for t in &centre.tensor[3..] {
        assert!(t.abs() < 1e-24);
    }

    // On the axis outside the cube
    let axis = evaluable.evaluate(&Point3::new(2.0, 0.0, 0.0), false);
    assert_relative_eq!(axis.tensor[0], 1.1304431555668506e-10, max_relative = 1e-9);
    assert_relative_eq!(axis.tensor[1], -5.652215777834258e-11, max_relative = 1e-9);
    assert_relative_eq!(axis.tensor[1], axis.tensor[2], max_relative = 1e-12);
}

#[test]
fn test_tensor_at_regular_points() {
    let evaluable = evaluable();

    let outside = evaluable.evaluate(&Point3::new(3.0, -2.0, 5.0), false);
    let expected = [
        -6.635828581645811e-13,
        -1.5615310291104453e-12,
        2.225113887275006e-12,
        -1.0773731231352724e-12,
        2.70068430234988e-12,
        -1.799136295506872e-12,
    ];
    for (t, e) in outside.tensor.iter().zip(expected) {
        assert_relative_eq!(*t, e, max_relative = 1e-8);
    }
    // Laplace outside the body
    assert!(outside.tensor_matrix().trace().abs() < 1e-22);

    let inside = evaluable.evaluate(&Point3::new(0.5, 0.25, -0.3), false);
    assert_relative_eq!(
        inside.tensor_matrix().trace(),
        -4.0 * PI * GRAVITATIONAL_CONSTANT,
        max_relative = 1e-10
    );
}

#[test]
fn test_density_scales_linearly() {
    let dense = common::build(
        &common::CUBE_VERTICES,
        &common::CUBE_OUTWARDS,
        2670.0,
        common::options(polygrav::PolyhedronIntegrity::Verify),
    )
    .unwrap();
    let point = Point3::new(3.0, -2.0, 5.0);

    let light = evaluable().evaluate(&point, false);
    let heavy = GravityEvaluable::new(dense).unwrap().evaluate(&point, false);
    assert_relative_eq!(heavy.potential, light.potential * 2670.0, max_relative = 1e-12);
    assert_relative_eq!(
        heavy.acceleration,
        light.acceleration * 2670.0,
        max_relative = 1e-12
    );
}
