// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh arrays in, evaluation results out

mod importer;
mod writer;

pub use importer::{import_mesh_file, load_polyhedron, MeshSource};
pub use writer::{export_mesh, export_results, write_results, OutputFormat};
