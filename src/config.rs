// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Run configuration of the `polygrav` command line tool

use crate::io::OutputFormat;
use crate::polyhedron::{NormalOrientation, PolyhedronIntegrity, PolyhedronOptions};
use crate::units::MetricUnit;
use anyhow::{bail, Context, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything needed to evaluate a mesh at a list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// JSON mesh array file
    pub mesh: PathBuf,
    /// Constant density of the body
    pub density: f64,
    /// Declared orientation of the face normals
    pub orientation: NormalOrientation,
    /// Integrity policy at construction
    pub integrity: PolyhedronIntegrity,
    /// Unit of the mesh coordinates
    pub unit: MetricUnit,
    /// Convert results into this unit before writing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_unit: Option<MetricUnit>,
    /// Evaluation points in mesh units
    pub points: Vec<[f64; 3]>,
    /// Result file, stdout summary when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Result file format
    pub format: OutputFormat,
    /// Spread the points over all cores
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mesh: PathBuf::from("mesh.json"),
            density: 1.0,
            orientation: NormalOrientation::default(),
            integrity: PolyhedronIntegrity::default(),
            unit: MetricUnit::default(),
            output_unit: None,
            points: Vec::new(),
            output: None,
            format: OutputFormat::default(),
            parallel: true,
        }
    }
}

impl RunConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let mut config: RunConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        // Mesh paths are relative to the config file
        if config.mesh.is_relative() {
            if let Some(parent) = path.as_ref().parent() {
                config.mesh = parent.join(&config.mesh);
            }
        }
        Ok(config)
    }

    /// Load configuration with `POLYGRAV_*` environment variable overrides,
    /// starting from the defaults when `path` does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.with_env_overrides()
    }

    /// Load an existing configuration file with `POLYGRAV_*` environment
    /// variable overrides
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("Config file not found: {}", path.display());
        }
        Self::from_file(path)?.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(mesh) = std::env::var("POLYGRAV_MESH") {
            self.mesh = PathBuf::from(mesh);
        }

        if let Ok(density) = std::env::var("POLYGRAV_DENSITY") {
            self.density = density
                .parse::<f64>()
                .with_context(|| format!("Invalid POLYGRAV_DENSITY: {}", density))?;
        }

        if let Ok(unit) = std::env::var("POLYGRAV_UNIT") {
            self.unit = unit
                .parse::<MetricUnit>()
                .with_context(|| format!("Invalid POLYGRAV_UNIT: {}", unit))?;
        }

        if let Ok(integrity) = std::env::var("POLYGRAV_INTEGRITY") {
            self.integrity = integrity
                .parse::<PolyhedronIntegrity>()
                .with_context(|| format!("Invalid POLYGRAV_INTEGRITY: {}", integrity))?;
        }

        if let Ok(parallel) = std::env::var("POLYGRAV_PARALLEL") {
            self.parallel = parallel.parse().unwrap_or(true);
        }

        if let Ok(output) = std::env::var("POLYGRAV_OUTPUT") {
            self.output = Some(PathBuf::from(output));
        }

        Ok(self)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn options(&self) -> PolyhedronOptions {
        PolyhedronOptions {
            orientation: self.orientation,
            integrity: self.integrity,
            unit: self.unit,
        }
    }

    pub fn evaluation_points(&self) -> Vec<Point3<f64>> {
        self.points.iter().copied().map(Point3::from).collect()
    }
}
