// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reusable gravity evaluator bound to one polyhedron

use super::detail::{face_contribution, FaceCache};
use super::result::EvaluationResult;
use crate::error::{GravityError, GravityResult};
use crate::geometry::{face_plane, triangle_area};
use crate::polyhedron::Polyhedron;
use nalgebra::Point3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, trace};

/// Evaluator owning a validated polyhedron and its per-face cache.
///
/// The cache is read-only after construction, so one evaluable can be
/// queried from many threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct GravityEvaluable {
    polyhedron: Polyhedron,
    cache: Vec<FaceCache>,
}

/// Captured state of a [`GravityEvaluable`].
///
/// Without a cache the restore recomputes it from the polyhedron, which
/// yields the same bits as the captured one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluableState {
    pub polyhedron: Polyhedron,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<Vec<FaceCache>>,
}

impl GravityEvaluable {
    /// Build the per-face cache of `polyhedron`.
    ///
    /// Fails with [`GravityError::DegenerateFace`] if any face has no plane,
    /// also for polyhedrons built without integrity checks.
    pub fn new(polyhedron: Polyhedron) -> GravityResult<Self> {
        let cache = build_cache(&polyhedron)?;
        debug!(faces = cache.len(), "Evaluation cache built");
        Ok(Self { polyhedron, cache })
    }

    pub fn polyhedron(&self) -> &Polyhedron {
        &self.polyhedron
    }

    pub fn cache(&self) -> &[FaceCache] {
        &self.cache
    }

    /// Potential, acceleration and tensor at `point`.
    ///
    /// With `parallel` the face contributions are computed on the rayon pool
    /// but still summed in face order, so both paths give identical bits.
    pub fn evaluate(&self, point: &Point3<f64>, parallel: bool) -> EvaluationResult {
        let contributions: Vec<EvaluationResult> = if parallel {
            (0..self.cache.len())
                .into_par_iter()
                .map(|face| self.face_term(face, point))
                .collect()
        } else {
            (0..self.cache.len())
                .map(|face| self.face_term(face, point))
                .collect()
        };

        let sum: EvaluationResult = contributions.into_iter().sum();
        self.apply_prefix(&sum)
    }

    /// Evaluate every point; results keep the order of `points`.
    ///
    /// With `parallel` the points are spread over the rayon pool, each one
    /// evaluated sequentially.
    pub fn evaluate_batch(&self, points: &[Point3<f64>], parallel: bool) -> Vec<EvaluationResult> {
        let start = Instant::now();
        debug!(points = points.len(), parallel, "Batch evaluation started");

        let results: Vec<EvaluationResult> = if parallel {
            points
                .par_iter()
                .map(|point| self.evaluate(point, false))
                .collect()
        } else {
            points
                .iter()
                .map(|point| self.evaluate(point, false))
                .collect()
        };

        debug!(
            points = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Batch evaluation finished"
        );
        results
    }

    /// Units of potential, acceleration and tensor.
    pub fn output_units(&self) -> [String; 3] {
        self.polyhedron.unit().output_units()
    }

    /// Capture the state, optionally with the per-face cache.
    pub fn state(&self, include_cache: bool) -> EvaluableState {
        EvaluableState {
            polyhedron: self.polyhedron.clone(),
            cache: include_cache.then(|| self.cache.clone()),
        }
    }

    /// Restore an evaluable from a captured state.
    pub fn from_state(state: EvaluableState) -> GravityResult<Self> {
        match state.cache {
            Some(cache) => {
                if cache.len() != state.polyhedron.face_count() {
                    return Err(GravityError::CacheMismatch {
                        expected: state.polyhedron.face_count(),
                        actual: cache.len(),
                    });
                }
                if let Some(face) = state
                    .polyhedron
                    .resolved_faces()
                    .zip(&cache)
                    .position(|(corners, entry)| !entry.matches(&corners))
                {
                    return Err(GravityError::CorruptCache { face });
                }
                debug!(faces = cache.len(), "Evaluation cache restored");
                Ok(Self {
                    polyhedron: state.polyhedron,
                    cache,
                })
            }
            None => Self::new(state.polyhedron),
        }
    }

    pub fn to_json(&self, include_cache: bool) -> GravityResult<String> {
        Ok(serde_json::to_string(&self.state(include_cache))?)
    }

    pub fn from_json(json: &str) -> GravityResult<Self> {
        let state: EvaluableState = serde_json::from_str(json)?;
        Self::from_state(state)
    }

    /// Write the state as JSON to `path`.
    pub fn save(&self, path: impl AsRef<Path>, include_cache: bool) -> GravityResult<()> {
        fs::write(path, self.to_json(include_cache)?)?;
        Ok(())
    }

    /// Read a state written by [`GravityEvaluable::save`].
    pub fn load(path: impl AsRef<Path>) -> GravityResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn face_term(&self, face: usize, point: &Point3<f64>) -> EvaluationResult {
        let indices = self.polyhedron.faces()[face];
        let vertices = self.polyhedron.vertices();
        let corners = [
            vertices[indices[0]],
            vertices[indices[1]],
            vertices[indices[2]],
        ];
        let term = face_contribution(&corners, point, &self.cache[face]);
        trace!(face, potential = term.potential, "Face contribution");
        term
    }

    fn apply_prefix(&self, sum: &EvaluationResult) -> EvaluationResult {
        let scaling = self.polyhedron.gravity_model_scaling();
        EvaluationResult {
            potential: sum.potential * scaling / 2.0,
            acceleration: sum.acceleration * -scaling,
            tensor: sum.tensor.map(|t| t * scaling),
        }
    }
}

impl fmt::Display for GravityEvaluable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<polygrav.GravityEvaluable, polyhedron = {}, cached faces = {}>",
            self.polyhedron,
            self.cache.len()
        )
    }
}

fn build_cache(polyhedron: &Polyhedron) -> GravityResult<Vec<FaceCache>> {
    polyhedron
        .resolved_faces()
        .enumerate()
        .map(|(face, corners)| {
            let [v0, v1, v2] = &corners;
            match face_plane(v0, v1, v2) {
                Some(_) => Ok(FaceCache::new(&corners)),
                None => Err(GravityError::DegenerateFace {
                    face,
                    area: triangle_area(v0, v1, v2),
                }),
            }
        })
        .collect()
}
