// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared numeric helpers

pub mod math;

pub use math::{
    is_critical_difference, is_zero, sign_with_tolerance, EPSILON_ZERO_OFFSET,
    GRAVITATIONAL_CONSTANT,
};
