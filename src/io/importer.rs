// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON mesh array importer

use crate::error::{GravityResult, InputError};
use crate::polyhedron::{Polyhedron, PolyhedronOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw vertex and face arrays as read from a mesh file.
///
/// Rows are kept as nested lists so malformed input is reported with its
/// position instead of a generic parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSource {
    pub vertices: Vec<Vec<f64>>,
    pub faces: Vec<Vec<usize>>,
}

impl MeshSource {
    /// Arrays of a constructed polyhedron, e.g. after healing.
    pub fn from_polyhedron(polyhedron: &Polyhedron) -> Self {
        Self {
            vertices: polyhedron
                .vertices()
                .iter()
                .map(|v| vec![v.x, v.y, v.z])
                .collect(),
            faces: polyhedron.faces().iter().map(|f| f.to_vec()).collect(),
        }
    }

    /// Check row lengths and convert to fixed-size arrays.
    pub fn into_arrays(self) -> Result<(Vec<[f64; 3]>, Vec<[usize; 3]>), InputError> {
        let vertices = self
            .vertices
            .into_iter()
            .enumerate()
            .map(|(vertex, row)| {
                <[f64; 3]>::try_from(row.as_slice()).map_err(|_| InputError::MalformedVertex {
                    vertex,
                    len: row.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let faces = self
            .faces
            .into_iter()
            .enumerate()
            .map(|(face, row)| {
                <[usize; 3]>::try_from(row.as_slice()).map_err(|_| InputError::NonTriangularFace {
                    face,
                    len: row.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((vertices, faces))
    }

    pub fn into_polyhedron(
        self,
        density: f64,
        options: PolyhedronOptions,
    ) -> GravityResult<Polyhedron> {
        let (vertices, faces) = self.into_arrays()?;
        Polyhedron::new(vertices, faces, density, options)
    }
}

/// Read a `{"vertices": [...], "faces": [...]}` file.
pub fn import_mesh_file(path: impl AsRef<Path>) -> Result<MeshSource> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mesh file: {}", path.display()))?;

    serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse mesh file: {}", path.display()))
}

/// Read a mesh file and build a polyhedron from it.
pub fn load_polyhedron(
    path: impl AsRef<Path>,
    density: f64,
    options: PolyhedronOptions,
) -> Result<Polyhedron> {
    let path = path.as_ref();
    import_mesh_file(path)?
        .into_polyhedron(density, options)
        .with_context(|| format!("Failed to build polyhedron from: {}", path.display()))
}
