// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Gravity evaluation engine

pub mod detail;
pub mod evaluable;
pub mod result;

pub use detail::{face_contribution, FaceCache};
pub use evaluable::{EvaluableState, GravityEvaluable};
pub use result::EvaluationResult;
