//! Shape transforms: reshape, transpose, axis slicing and flattening.
//!
//! Transpose and slice are computed as strided views over the source buffer
//! and then gathered into a fresh row-major array.

use std::sync::Arc;

use crate::array::NdArray;
use crate::layout::validate_shape;
use crate::{ArrayError, Result};

impl NdArray {
    /// Reinterpret the row-major element sequence under a new shape.
    ///
    /// The element count must be unchanged. The zero-length `[0]` array can
    /// only be reshaped to `[0]`.
    ///
    /// # Errors
    /// `InvalidShape` if `shape` is empty or has a zero extent,
    /// `ShapeMismatch` if its product differs from `self.len()`.
    pub fn reshape(&self, shape: &[usize]) -> Result<NdArray> {
        if self.is_empty() && shape == self.shape() {
            return Ok(self.clone());
        }
        let len = validate_shape(shape)?;
        if len != self.len() {
            return Err(ArrayError::ShapeMismatch(
                self.shape().to_vec(),
                shape.to_vec(),
            ));
        }
        Ok(NdArray::from_parts(self.to_vec(), Arc::from(shape)))
    }

    /// Swap the two axes of a 2-D array.
    pub fn transpose(&self) -> Result<NdArray> {
        Ok(self.view().transpose_2d()?.to_array())
    }

    /// Keep indices `start..end` along `axis`; other axes are kept whole.
    ///
    /// # Errors
    /// `InvalidArgument` if `axis >= ndim`, `IndexOutOfRange` if
    /// `start >= end` or `end` exceeds the axis length.
    pub fn slice(&self, axis: usize, start: usize, end: usize) -> Result<NdArray> {
        Ok(self.view().slice_axis(axis, start..end)?.to_array())
    }

    /// Rank-1 copy of the row-major element sequence.
    pub fn flatten(&self) -> NdArray {
        NdArray::from_vec(self.to_vec())
    }
}

pub fn reshape(a: &NdArray, shape: &[usize]) -> Result<NdArray> {
    a.reshape(shape)
}

pub fn transpose(a: &NdArray) -> Result<NdArray> {
    a.transpose()
}

pub fn slice(a: &NdArray, axis: usize, start: usize, end: usize) -> Result<NdArray> {
    a.slice(axis, start, end)
}

pub fn flatten(a: &NdArray) -> NdArray {
    a.flatten()
}
