// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for polyhedron construction and evaluation

use crate::polyhedron::NormalOrientation;
use thiserror::Error;

/// Result type used throughout the crate.
pub type GravityResult<T> = Result<T, GravityError>;

/// Errors raised while building a polyhedron or an evaluable.
///
/// Structural problems are detected eagerly at construction; evaluation
/// itself never fails.
#[derive(Debug, Error)]
pub enum GravityError {
    /// A face has (near-)zero area.
    #[error("face {face} is degenerate (area {area:e})")]
    DegenerateFace {
        /// Index of the offending face.
        face: usize,
        /// Area computed for the face.
        area: f64,
    },

    /// Orientation or manifold inconsistency found by the integrity checker.
    #[error("invalid mesh: {reason}")]
    InvalidMesh {
        /// Orientation the caller declared.
        declared: NormalOrientation,
        /// Orientation held by the majority of faces.
        majority: NormalOrientation,
        /// Faces disagreeing with the majority, ascending.
        faces: Vec<usize>,
        /// Human readable explanation.
        reason: String,
    },

    /// Malformed raw input.
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    /// A restored cache does not belong to the restored mesh.
    #[error("cached face data covers {actual} faces but the polyhedron has {expected}")]
    CacheMismatch {
        /// Number of faces of the polyhedron.
        expected: usize,
        /// Number of cached faces.
        actual: usize,
    },

    /// A restored cache entry is not derived from its face.
    #[error("cached face data of face {face} does not match the polyhedron")]
    CorruptCache {
        /// Index of the first mismatching face.
        face: usize,
    },

    /// Unit string that is not one of `m`, `km`, `unitless`.
    #[error("unknown metric unit '{0}', expected one of 'm', 'km' or 'unitless'")]
    UnknownUnit(String),

    /// Unknown spelling of an enumerated option.
    #[error("unknown {kind} '{value}'")]
    UnknownOption {
        /// Option family (orientation, integrity).
        kind: &'static str,
        /// Value that failed to parse.
        value: String,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Problems with the raw vertex/face arrays.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    /// No vertices or no faces were given.
    #[error("mesh is empty ({vertices} vertices, {faces} faces)")]
    EmptyMesh {
        /// Number of vertices given.
        vertices: usize,
        /// Number of faces given.
        faces: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        /// Index of the face.
        face: usize,
        /// Offending vertex index.
        index: usize,
        /// Total number of vertices.
        vertex_count: usize,
    },

    /// A face does not have exactly three indices.
    #[error("face {face} has {len} indices, expected 3")]
    NonTriangularFace {
        /// Index of the face.
        face: usize,
        /// Number of indices found.
        len: usize,
    },

    /// A vertex does not have exactly three coordinates.
    #[error("vertex {vertex} has {len} coordinates, expected 3")]
    MalformedVertex {
        /// Index of the vertex.
        vertex: usize,
        /// Number of coordinates found.
        len: usize,
    },

    /// A vertex coordinate is NaN or infinite.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Index of the vertex.
        vertex: usize,
    },

    /// Density is NaN or infinite.
    #[error("density must be finite, got {0}")]
    InvalidDensity(f64),
}
