// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Concat benchmarks registered with the harness.
//!
//! Every body follows the same shape: pause timing, build inputs, warm up,
//! report work volume for the whole trial, resume timing, run.

use std::hint::black_box;

use microbench_core::{BenchmarkRegistry, Trial};
use tracing::error;

use crate::concat::{concat, concat_into_unchecked, Tensor};

/// Leading dimension of the 2-D inputs.
const DIM0: usize = 100;
/// Untimed kernel runs before measurement.
const WARMUP_RUNS: usize = 5;

type Body = fn(&mut Trial, u64);

/// Two `[100, dim1]` inputs joined on `axis`.
const CPU_BENCHMARKS: &[(&str, Body)] = &[
    ("BM_CONCAT_CPU_0_1000", |t, n| concat_2d(t, n, 0, 1000)),
    ("BM_CONCAT_CPU_0_100000", |t, n| concat_2d(t, n, 0, 100_000)),
    ("BM_CONCAT_CPU_1_1000", |t, n| concat_2d(t, n, 1, 1000)),
    ("BM_CONCAT_CPU_1_100000", |t, n| concat_2d(t, n, 1, 100_000)),
];

/// Channels of the NHWC feature maps; the width varies per benchmark.
const NHWC_CHANNELS: usize = 32;

/// Two `[3, 32, W, 32]` feature maps joined on the channel axis.
const NHWC_BENCHMARKS: &[(&str, Body)] = &[
    ("BM_CONCAT_NHWC_3_32_32_32", |t, n| concat_nhwc(t, n, 32)),
    ("BM_CONCAT_NHWC_3_32_32_64", |t, n| concat_nhwc(t, n, 64)),
    ("BM_CONCAT_NHWC_3_32_32_128", |t, n| concat_nhwc(t, n, 128)),
    ("BM_CONCAT_NHWC_3_32_32_256", |t, n| concat_nhwc(t, n, 256)),
];

/// Register every concat benchmark, CPU 2-D cases first.
pub fn register(registry: &mut BenchmarkRegistry<'_>) {
    for (name, body) in CPU_BENCHMARKS.iter().chain(NHWC_BENCHMARKS) {
        registry.register(name, body);
    }
}

fn concat_2d(trial: &mut Trial, iters: u64, axis: usize, dim1: usize) {
    trial.stop_timing();

    let input0 = Tensor::random(&[DIM0, dim1]);
    let input1 = Tensor::random(&[DIM0, dim1]);
    run_concat(trial, iters, &[&input0, &input1], axis);
}

fn concat_nhwc(trial: &mut Trial, iters: u64, width: usize) {
    trial.stop_timing();

    let shape = nhwc_shape(width);
    let input0 = Tensor::random(&shape);
    let input1 = Tensor::random(&shape);
    run_concat(trial, iters, &[&input0, &input1], 3);
}

fn nhwc_shape(width: usize) -> [usize; 4] {
    [3, 32, width, NHWC_CHANNELS]
}

/// Expects timing to be stopped on entry; leaves it running.
fn run_concat(trial: &mut Trial, iters: u64, inputs: &[&Tensor], axis: usize) {
    let mut output = match concat(inputs, axis) {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "Invalid concat benchmark inputs");
            return;
        }
    };

    for _ in 0..WARMUP_RUNS {
        concat_into_unchecked(inputs, axis, &mut output);
    }

    let per_call: i64 = inputs.iter().map(|t| t.len() as i64).sum();
    let total = iters as i64 * per_call;
    trial.set_macc_processed(total);
    trial.set_bytes_processed(total * std::mem::size_of::<f32>() as i64);

    trial.start_timing();
    for _ in 0..iters {
        concat_into_unchecked(black_box(inputs), axis, &mut output);
        black_box(&output);
    }
}
