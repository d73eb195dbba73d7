// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Microbench operator benchmarks
//!
//! Kernels measured through the microbench harness. Each kernel module
//! ships a `register` function that appends its benchmarks to a registry;
//! the driver calls them in a fixed order before running.
//!
//! # Benchmark Families
//!
//! - **Concat CPU**: two `[100, N]` matrices joined on axis 0 or 1
//! - **Concat NHWC**: two `[3, 32, W, 32]` feature maps joined on channels

pub mod concat;
pub mod suite;

pub use concat::{concat, concat_into, concat_into_unchecked, ConcatError, Tensor};
pub use suite::register;
