// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Metric units of a mesh and conversion of evaluation results

use crate::error::{GravityError, GravityResult};
use crate::model::EvaluationResult;
use crate::utils::GRAVITATIONAL_CONSTANT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of the mesh coordinates.
///
/// The unit decides which gravitational constant scales the raw surface
/// integrals. `Unitless` strips the constant entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MetricUnit {
    #[default]
    Meter,
    Kilometer,
    Unitless,
}

impl MetricUnit {
    /// Gravitational constant expressed in this length unit.
    ///
    /// m^3/(kg s^2) for meters, km^3/(kg s^2) for kilometers and 1 for
    /// unitless meshes.
    pub fn gravitational_constant(self) -> f64 {
        match self {
            Self::Meter => GRAVITATIONAL_CONSTANT,
            Self::Kilometer => GRAVITATIONAL_CONSTANT * 1e-9,
            Self::Unitless => 1.0,
        }
    }

    /// Length of one unit in meters, `None` when unitless.
    pub fn length_in_meters(self) -> Option<f64> {
        match self {
            Self::Meter => Some(1.0),
            Self::Kilometer => Some(1000.0),
            Self::Unitless => None,
        }
    }

    /// Unit of a density matching meshes in this unit.
    pub fn density_unit(self) -> String {
        match self {
            Self::Unitless => self.to_string(),
            _ => format!("kg/{}^3", self),
        }
    }

    /// Units of potential, acceleration and tensor evaluated on a mesh in
    /// this unit.
    pub fn output_units(self) -> [String; 3] {
        match self {
            Self::Unitless => [
                "1/s^2".to_string(),
                "1/s^2".to_string(),
                "1/s^2".to_string(),
            ],
            _ => [
                format!("{}^2/s^2", self),
                format!("{}/s^2", self),
                "1/s^2".to_string(),
            ],
        }
    }
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Meter => "m",
            Self::Kilometer => "km",
            Self::Unitless => "unitless",
        };
        f.write_str(name)
    }
}

impl FromStr for MetricUnit {
    type Err = GravityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(Self::Meter),
            "km" | "kilometer" | "kilometers" => Ok(Self::Kilometer),
            "unitless" | "1" => Ok(Self::Unitless),
            _ => Err(GravityError::UnknownUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for MetricUnit {
    type Error = GravityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MetricUnit> for String {
    fn from(unit: MetricUnit) -> Self {
        unit.to_string()
    }
}

/// Rescale a result computed on a mesh in unit `from` into unit `to`.
///
/// Between dimensional units with s = len(from)/len(to) the potential scales
/// with s^2, the acceleration with s and the tensor stays unchanged.
/// Converting from `Unitless` multiplies by the target's gravitational
/// constant (coordinates are read in the target unit), converting to
/// `Unitless` divides by the source's.
pub fn convert(result: &EvaluationResult, from: MetricUnit, to: MetricUnit) -> EvaluationResult {
    if from == to {
        return *result;
    }

    match (from.length_in_meters(), to.length_in_meters()) {
        (Some(source), Some(target)) => {
            let s = source / target;
            EvaluationResult {
                potential: result.potential * s * s,
                acceleration: result.acceleration * s,
                tensor: result.tensor,
            }
        }
        (None, Some(_)) => result.scaled(to.gravitational_constant()),
        (Some(_), None) => result.scaled(1.0 / from.gravitational_constant()),
        (None, None) => *result,
    }
}

/// Convert a batch of results, see [`convert`].
pub fn convert_all(
    results: &[EvaluationResult],
    from: MetricUnit,
    to: MetricUnit,
) -> Vec<EvaluationResult> {
    results.iter().map(|r| convert(r, from, to)).collect()
}

/// Parse a unit from user input, reporting unknown spellings.
pub fn parse_unit(value: &str) -> GravityResult<MetricUnit> {
    value.parse()
}
