// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities and physical constants

/// Newtonian constant of gravitation in m^3/(kg s^2) (CODATA 2018).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Absolute threshold below which a geometric quantity counts as zero.
///
/// Applied after the computation point has been moved to the origin, so it
/// is compared against coordinates of the mesh relative to that point.
pub const EPSILON_ZERO_OFFSET: f64 = 1e-14;

/// Sign of `value` as -1, 0 or +1, where |value| below `epsilon` maps to 0.
pub fn sign_with_tolerance(value: f64, epsilon: f64) -> f64 {
    if value.abs() < epsilon {
        0.0
    } else if value > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// True when |value| lies below [`EPSILON_ZERO_OFFSET`].
pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON_ZERO_OFFSET
}

/// True when the binary exponents of two non-zero numbers are further apart
/// than an f64 mantissa can bridge, i.e. adding their products loses all
/// digits of the smaller one.
pub fn is_critical_difference(first: f64, second: f64) -> bool {
    if first == 0.0 || second == 0.0 || !first.is_finite() || !second.is_finite() {
        return false;
    }
    let exponent = |x: f64| x.abs().log2().floor() as i64;
    (exponent(first) - exponent(second)).abs() > f64::MANTISSA_DIGITS as i64
}
