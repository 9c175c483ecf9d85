// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made [`ViewportAdapter`](crate::types::ViewportAdapter) implementations.
//!
//! Enabled via feature flags; browser toolkits provide their own adapter.

#[cfg(any(test, feature = "headless"))]
pub mod headless;
