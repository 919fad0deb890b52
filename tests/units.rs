// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Consistency of results across metric units

mod common;

use approx::assert_relative_eq;
use common::*;
use nalgebra::Point3;
use polygrav::units::convert_all;
use polygrav::{
    convert, EvaluationResult, GravityEvaluable, MetricUnit, PolyhedronIntegrity,
    GRAVITATIONAL_CONSTANT,
};

fn cube_in(unit: MetricUnit, scale: f64, density: f64) -> GravityEvaluable {
    let vertices: Vec<[f64; 3]> = CUBE_VERTICES
        .iter()
        .map(|v| [v[0] * scale, v[1] * scale, v[2] * scale])
        .collect();
    let polyhedron = build(
        &vertices,
        &CUBE_OUTWARDS,
        density,
        options(PolyhedronIntegrity::Verify).with_unit(unit),
    )
    .unwrap();
    GravityEvaluable::new(polyhedron).unwrap()
}

fn assert_scaled(lhs: &EvaluationResult, rhs: &EvaluationResult, factor: f64) {
    let scaled = rhs.scaled(factor);
    assert_relative_eq!(lhs.potential, scaled.potential, max_relative = 1e-12);
    assert_relative_eq!(
        lhs.acceleration,
        scaled.acceleration,
        max_relative = 1e-12,
        epsilon = 1e-30
    );
    for (a, b) in lhs.tensor.iter().zip(scaled.tensor) {
        assert_relative_eq!(*a, b, max_relative = 1e-12, epsilon = 1e-30);
    }
}

#[test]
fn test_same_mesh_in_different_units() {
    let meter = cube_in(MetricUnit::Meter, 1.0, 1.0);
    let kilometer = cube_in(MetricUnit::Kilometer, 1.0, 1.0);
    let unitless = cube_in(MetricUnit::Unitless, 1.0, 1.0);

    for point in [
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(3.0, -2.0, 5.0),
        Point3::new(0.5, 0.25, -0.3),
    ] {
        let m = meter.evaluate(&point, false);
        let km = kilometer.evaluate(&point, false);
        let raw = unitless.evaluate(&point, false);

        assert_scaled(&m, &km, 1e9);
        assert_scaled(&m, &raw, GRAVITATIONAL_CONSTANT);
    }
}

#[test]
fn test_converted_kilometer_cube_matches_meter_cube() {
    // 1 kg/m^3 is 1e9 kg/km^3
    let meter = cube_in(MetricUnit::Meter, 1000.0, 1.0);
    let kilometer = cube_in(MetricUnit::Kilometer, 1.0, 1e9);

    let points_km = [
        Point3::new(2.0, 0.5, -0.3),
        Point3::new(1.5, -0.5, 0.25),
        Point3::new(0.1, 0.2, 0.3),
    ];
    let points_m: Vec<Point3<f64>> = points_km.iter().map(|p| p * 1000.0).collect();

    let from_km = convert_all(
        &kilometer.evaluate_batch(&points_km, false),
        MetricUnit::Kilometer,
        MetricUnit::Meter,
    );
    let in_m = meter.evaluate_batch(&points_m, false);

    for (converted, direct) in from_km.iter().zip(&in_m) {
        assert_scaled(converted, direct, 1.0);
    }
}

#[test]
fn test_unitless_conversion_restores_constant() {
    let meter = cube_in(MetricUnit::Meter, 1.0, 1.0);
    let unitless = cube_in(MetricUnit::Unitless, 1.0, 1.0);
    let point = Point3::new(-2.0, 0.0, 1.5);

    let raw = unitless.evaluate(&point, false);
    let with_constant = convert(&raw, MetricUnit::Unitless, MetricUnit::Meter);
    assert_scaled(&with_constant, &meter.evaluate(&point, false), 1.0);

    let stripped = convert(&with_constant, MetricUnit::Meter, MetricUnit::Unitless);
    assert_scaled(&stripped, &raw, 1.0);
    assert_eq!(convert(&raw, MetricUnit::Unitless, MetricUnit::Unitless), raw);
}

#[test]
fn test_output_units() {
    assert_eq!(
        cube_in(MetricUnit::Kilometer, 1.0, 1.0).output_units(),
        ["km^2/s^2".to_string(), "km/s^2".to_string(), "1/s^2".to_string()]
    );
    assert_eq!(
        cube_in(MetricUnit::Unitless, 1.0, 1.0).polyhedron().density_unit(),
        "unitless"
    );
}
