// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Constant density polyhedron with validated face winding
//!
//! A [`Polyhedron`] is built once from raw vertex and face arrays. Input
//! validation always runs; the orientation and manifold checks depend on the
//! chosen [`PolyhedronIntegrity`] policy. After construction the mesh is
//! immutable.

pub mod integrity;

use crate::error::{GravityError, GravityResult, InputError};
use crate::units::MetricUnit;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub use integrity::{enforce_integrity, plane_unit_normal_orientation};

/// Direction the face normals are expected to point relative to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NormalOrientation {
    #[default]
    Outwards,
    Inwards,
}

impl NormalOrientation {
    /// +1 for outward normals, -1 for inward ones.
    pub fn factor(self) -> f64 {
        match self {
            Self::Outwards => 1.0,
            Self::Inwards => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Outwards => Self::Inwards,
            Self::Inwards => Self::Outwards,
        }
    }
}

impl fmt::Display for NormalOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outwards => f.write_str("OUTWARDS"),
            Self::Inwards => f.write_str("INWARDS"),
        }
    }
}

impl FromStr for NormalOrientation {
    type Err = GravityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OUTWARDS" | "OUTWARD" => Ok(Self::Outwards),
            "INWARDS" | "INWARD" => Ok(Self::Inwards),
            _ => Err(GravityError::UnknownOption {
                kind: "normal orientation",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for NormalOrientation {
    type Error = GravityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NormalOrientation> for String {
    fn from(orientation: NormalOrientation) -> Self {
        orientation.to_string()
    }
}

/// How strictly the mesh is checked at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PolyhedronIntegrity {
    /// No checks besides input validation.
    Disable,
    /// Fail on any orientation or manifold defect.
    Verify,
    /// Flip minority faces towards the majority orientation.
    Heal,
    /// Like `Verify`, with a notice about the quadratic cost of the check.
    #[default]
    Automatic,
}

impl fmt::Display for PolyhedronIntegrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disable => "DISABLE",
            Self::Verify => "VERIFY",
            Self::Heal => "HEAL",
            Self::Automatic => "AUTOMATIC",
        };
        f.write_str(name)
    }
}

impl FromStr for PolyhedronIntegrity {
    type Err = GravityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DISABLE" => Ok(Self::Disable),
            "VERIFY" => Ok(Self::Verify),
            "HEAL" => Ok(Self::Heal),
            "AUTOMATIC" => Ok(Self::Automatic),
            _ => Err(GravityError::UnknownOption {
                kind: "integrity policy",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PolyhedronIntegrity {
    type Error = GravityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PolyhedronIntegrity> for String {
    fn from(integrity: PolyhedronIntegrity) -> Self {
        integrity.to_string()
    }
}

/// Construction options of a [`Polyhedron`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyhedronOptions {
    /// Declared orientation of the face normals
    pub orientation: NormalOrientation,
    /// Integrity policy applied at construction
    pub integrity: PolyhedronIntegrity,
    /// Unit of the vertex coordinates
    pub unit: MetricUnit,
}

impl PolyhedronOptions {
    pub fn with_orientation(mut self, orientation: NormalOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_integrity(mut self, integrity: PolyhedronIntegrity) -> Self {
        self.integrity = integrity;
        self
    }

    pub fn with_unit(mut self, unit: MetricUnit) -> Self {
        self.unit = unit;
        self
    }
}

/// Triangulated, closed body of constant density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolyhedron")]
pub struct Polyhedron {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
    density: f64,
    orientation: NormalOrientation,
    unit: MetricUnit,
}

/// Serialized form of a polyhedron, validated on the way in.
#[derive(Deserialize)]
struct RawPolyhedron {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
    density: f64,
    #[serde(default)]
    orientation: NormalOrientation,
    #[serde(default)]
    unit: MetricUnit,
}

impl TryFrom<RawPolyhedron> for Polyhedron {
    type Error = GravityError;

    fn try_from(raw: RawPolyhedron) -> Result<Self, Self::Error> {
        validate_input(&raw.vertices, &raw.faces, raw.density)?;
        Ok(Self {
            vertices: raw.vertices,
            faces: raw.faces,
            density: raw.density,
            orientation: raw.orientation,
            unit: raw.unit,
        })
    }
}

impl Polyhedron {
    /// Build a polyhedron from raw arrays.
    ///
    /// Face indices are shifted down by one when no face references vertex
    /// 0, so 1-based meshes are accepted as-is. The integrity policy in
    /// `options` runs last and may rewrite face windings (HEAL).
    pub fn new(
        vertices: Vec<[f64; 3]>,
        faces: Vec<[usize; 3]>,
        density: f64,
        options: PolyhedronOptions,
    ) -> GravityResult<Self> {
        let vertices: Vec<Point3<f64>> = vertices.into_iter().map(Point3::from).collect();
        let faces = shift_one_based(faces);
        validate_input(&vertices, &faces, density)?;

        let mut polyhedron = Self {
            vertices,
            faces,
            density,
            orientation: options.orientation,
            unit: options.unit,
        };
        enforce_integrity(&mut polyhedron, options.integrity)?;

        debug!(
            vertices = polyhedron.vertex_count(),
            faces = polyhedron.face_count(),
            orientation = %polyhedron.orientation,
            "Polyhedron constructed"
        );
        Ok(polyhedron)
    }

    /// Build a polyhedron with the default options (OUTWARDS, AUTOMATIC, m).
    pub fn with_defaults(
        vertices: Vec<[f64; 3]>,
        faces: Vec<[usize; 3]>,
        density: f64,
    ) -> GravityResult<Self> {
        Self::new(vertices, faces, density, PolyhedronOptions::default())
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&Point3<f64>> {
        self.vertices.get(index)
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Option<&[usize; 3]> {
        self.faces.get(index)
    }

    /// Coordinates of the three corners of face `index`.
    pub fn resolved_face(&self, index: usize) -> Option<[Point3<f64>; 3]> {
        self.faces.get(index).map(|face| self.corners(face))
    }

    /// Iterate over the corner coordinates of every face in index order.
    pub fn resolved_faces(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.faces.iter().map(|face| self.corners(face))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn orientation(&self) -> NormalOrientation {
        self.orientation
    }

    pub fn orientation_factor(&self) -> f64 {
        self.orientation.factor()
    }

    pub fn unit(&self) -> MetricUnit {
        self.unit
    }

    pub fn density_unit(&self) -> String {
        self.unit.density_unit()
    }

    /// G (in the mesh unit) times density times the orientation factor.
    pub fn gravity_model_scaling(&self) -> f64 {
        self.unit.gravitational_constant() * self.density * self.orientation.factor()
    }

    /// Majority orientation of the face normals and the faces that disagree
    /// with it, ascending.
    ///
    /// Runs the ray casting test regardless of the construction policy, so
    /// it can inspect meshes built with [`PolyhedronIntegrity::Disable`].
    pub fn check_plane_unit_normal_orientation(&self) -> (NormalOrientation, Vec<usize>) {
        plane_unit_normal_orientation(self)
    }

    fn corners(&self, face: &[usize; 3]) -> [Point3<f64>; 3] {
        [
            self.vertices[face[0]],
            self.vertices[face[1]],
            self.vertices[face[2]],
        ]
    }

    pub(crate) fn faces_mut(&mut self) -> &mut [[usize; 3]] {
        &mut self.faces
    }

    pub(crate) fn set_orientation(&mut self, orientation: NormalOrientation) {
        self.orientation = orientation;
    }
}

impl fmt::Display for Polyhedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<polygrav.Polyhedron, density = {} {}, vertices = {}, faces = {}, orientation = {}, mesh_unit = '{}'>",
            self.density,
            self.density_unit(),
            self.vertex_count(),
            self.face_count(),
            self.orientation,
            self.unit
        )
    }
}

/// Shift all indices down by one if vertex 0 is never referenced.
fn shift_one_based(faces: Vec<[usize; 3]>) -> Vec<[usize; 3]> {
    let one_based = !faces.is_empty() && faces.iter().flatten().all(|&index| index > 0);
    if !one_based {
        return faces;
    }

    debug!(faces = faces.len(), "No face references vertex 0, shifting indices by -1");
    faces
        .into_iter()
        .map(|[a, b, c]| [a - 1, b - 1, c - 1])
        .collect()
}

fn validate_input(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
    density: f64,
) -> Result<(), InputError> {
    if vertices.is_empty() || faces.is_empty() {
        return Err(InputError::EmptyMesh {
            vertices: vertices.len(),
            faces: faces.len(),
        });
    }

    if !density.is_finite() {
        return Err(InputError::InvalidDensity(density));
    }

    if let Some(vertex) = vertices
        .iter()
        .position(|v| !v.coords.iter().all(|c| c.is_finite()))
    {
        return Err(InputError::NonFiniteVertex { vertex });
    }

    let vertex_count = vertices.len();
    for (face, indices) in faces.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&index| index >= vertex_count) {
            return Err(InputError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            });
        }
    }

    Ok(())
}
