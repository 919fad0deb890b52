// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygrav
//!
//! Closed-form gravitational potential, acceleration and gravity gradient
//! tensor of constant-density polyhedra. A [`Polyhedron`] validates (and
//! optionally heals) a triangulated surface, a [`GravityEvaluable`] caches
//! the per-face data and evaluates any number of points against it.
//!
//! ```no_run
//! use nalgebra::Point3;
//! use polygrav::{GravityEvaluable, Polyhedron, PolyhedronOptions};
//!
//! # fn main() -> polygrav::GravityResult<()> {
//! let polyhedron = Polyhedron::new(
//!     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
//!     vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
//!     2670.0,
//!     PolyhedronOptions::default(),
//! )?;
//! let evaluable = GravityEvaluable::new(polyhedron)?;
//! let result = evaluable.evaluate(&Point3::new(2.0, 2.0, 2.0), false);
//! println!("{} {}", result.potential, result.acceleration);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod model;
pub mod polyhedron;
pub mod units;
pub mod utils;

pub use config::RunConfig;
pub use error::{GravityError, GravityResult, InputError};
pub use model::{EvaluableState, EvaluationResult, FaceCache, GravityEvaluable};
pub use polyhedron::{NormalOrientation, Polyhedron, PolyhedronIntegrity, PolyhedronOptions};
pub use units::{convert, MetricUnit};
pub use utils::GRAVITATIONAL_CONSTANT;

use nalgebra::Point3;

/// Evaluate a single point without keeping the evaluable around.
pub fn evaluate(
    polyhedron: &Polyhedron,
    point: &Point3<f64>,
    parallel: bool,
) -> GravityResult<EvaluationResult> {
    let evaluable = GravityEvaluable::new(polyhedron.clone())?;
    Ok(evaluable.evaluate(point, parallel))
}

/// Evaluate many points without keeping the evaluable around.
pub fn evaluate_many(
    polyhedron: &Polyhedron,
    points: &[Point3<f64>],
    parallel: bool,
) -> GravityResult<Vec<EvaluationResult>> {
    let evaluable = GravityEvaluable::new(polyhedron.clone())?;
    Ok(evaluable.evaluate_batch(points, parallel))
}
