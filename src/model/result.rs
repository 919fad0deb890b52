// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Evaluation result value type

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Potential, acceleration and gravity gradient tensor at one point.
///
/// The tensor is stored as its six independent entries in the order
/// `[xx, yy, zz, xy, xz, yz]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub potential: f64,
    pub acceleration: Vector3<f64>,
    pub tensor: [f64; 6],
}

impl EvaluationResult {
    pub fn new(potential: f64, acceleration: Vector3<f64>, tensor: [f64; 6]) -> Self {
        Self {
            potential,
            acceleration,
            tensor,
        }
    }

    /// Multiply every component by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            potential: self.potential * factor,
            acceleration: self.acceleration * factor,
            tensor: self.tensor.map(|t| t * factor),
        }
    }

    /// Full symmetric 3x3 tensor.
    pub fn tensor_matrix(&self) -> Matrix3<f64> {
        let [xx, yy, zz, xy, xz, yz] = self.tensor;
        Matrix3::new(xx, xy, xz, xy, yy, yz, xz, yz, zz)
    }

    /// True when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.potential.is_finite()
            && self.acceleration.iter().all(|a| a.is_finite())
            && self.tensor.iter().all(|t| t.is_finite())
    }
}

impl Add for EvaluationResult {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for EvaluationResult {
    fn add_assign(&mut self, rhs: Self) {
        self.potential += rhs.potential;
        self.acceleration += rhs.acceleration;
        for (lhs, rhs) in self.tensor.iter_mut().zip(rhs.tensor) {
            *lhs += rhs;
        }
    }
}

impl Sum for EvaluationResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
