// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Dense tensor concatenation kernel (CPU, row-major `f32`).

use rand::Rng;
use thiserror::Error;

/// Errors raised by shape validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConcatError {
    #[error("Concat requires at least one input")]
    NoInputs,

    #[error("Axis {axis} out of range for rank {rank}")]
    AxisOutOfRange { axis: usize, rank: usize },

    #[error("Input {index} has rank {actual}, expected {expected}")]
    RankMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Input {index} differs at dim {dim}: {actual} != {expected}")]
    ShapeMismatch {
        index: usize,
        dim: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Output shape {actual:?} does not match expected {expected:?}")]
    OutputShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Data length {len} does not match shape {shape:?}")]
    DataLength { len: usize, shape: Vec<usize> },
}

/// A row-major `f32` tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl Tensor {
    /// Wrap `data` with `shape`, checking the element count.
    pub fn new(shape: &[usize], data: Vec<f32>) -> Result<Self, ConcatError> {
        if data.len() != element_count(shape) {
            return Err(ConcatError::DataLength {
                len: data.len(),
                shape: shape.to_vec(),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            data,
        })
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            data: vec![0.0; element_count(shape)],
        }
    }

    /// Uniform values in `[0, 1)` from the thread RNG.
    pub fn random(shape: &[usize]) -> Self {
        Self::random_with(shape, &mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Self {
        let data = (0..element_count(shape)).map(|_| rng.gen::<f32>()).collect();
        Self {
            shape: shape.to_vec(),
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Shape of concatenating `inputs` along `axis`.
///
/// All inputs must share rank and every dimension except `axis`.
pub fn output_shape(inputs: &[&Tensor], axis: usize) -> Result<Vec<usize>, ConcatError> {
    let first = inputs.first().ok_or(ConcatError::NoInputs)?;
    let rank = first.shape.len();

    if axis >= rank {
        return Err(ConcatError::AxisOutOfRange { axis, rank });
    }

    let mut shape = first.shape.clone();
    for (index, input) in inputs.iter().enumerate().skip(1) {
        if input.shape.len() != rank {
            return Err(ConcatError::RankMismatch {
                index,
                expected: rank,
                actual: input.shape.len(),
            });
        }

        for (dim, (&expected, &actual)) in first.shape.iter().zip(&input.shape).enumerate() {
            if dim != axis && expected != actual {
                return Err(ConcatError::ShapeMismatch {
                    index,
                    dim,
                    expected,
                    actual,
                });
            }
        }

        shape[axis] += input.shape[axis];
    }

    Ok(shape)
}

/// Concatenate `inputs` along `axis` into a fresh tensor.
pub fn concat(inputs: &[&Tensor], axis: usize) -> Result<Tensor, ConcatError> {
    let shape = output_shape(inputs, axis)?;
    let mut output = Tensor::zeros(&shape);
    copy_blocks(inputs, axis, &mut output.data);
    Ok(output)
}

/// Concatenate into an existing tensor of the correct shape.
pub fn concat_into(
    inputs: &[&Tensor],
    axis: usize,
    output: &mut Tensor,
) -> Result<(), ConcatError> {
    let shape = output_shape(inputs, axis)?;
    if output.shape != shape {
        return Err(ConcatError::OutputShape {
            expected: shape,
            actual: output.shape.clone(),
        });
    }
    copy_blocks(inputs, axis, &mut output.data);
    Ok(())
}

/// Concatenate into `output` without re-validating shapes.
///
/// `output` must have the shape [`output_shape`] returned for the same
/// `inputs` and `axis`, e.g. a tensor produced by [`concat`]. Allocates
/// nothing. Panics if `output` cannot hold every input element.
pub fn concat_into_unchecked(inputs: &[&Tensor], axis: usize, output: &mut Tensor) {
    debug_assert_eq!(
        output.len(),
        inputs.iter().map(|t| t.len()).sum::<usize>(),
        "output does not hold every input element"
    );
    copy_blocks(inputs, axis, &mut output.data);
}

/// Shapes must already be validated.
fn copy_blocks(inputs: &[&Tensor], axis: usize, output: &mut [f32]) {
    let outer: usize = inputs[0].shape[..axis].iter().product();
    let mut offset = 0;

    for o in 0..outer {
        for input in inputs {
            let block: usize = input.shape[axis..].iter().product();
            let src = &input.data[o * block..(o + 1) * block];
            output[offset..offset + block].copy_from_slice(src);
            offset += block;
        }
    }
}
