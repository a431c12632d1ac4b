//! Shape and stride arithmetic for row-major buffers.
//!
//! Strides are measured in elements. Under row-major ("C") order the last
//! dimension varies fastest, so `strides[d] = product(shape[d+1..])`.

use crate::{ArrayError, Result};

/// Largest element count whose `f64` buffer fits in `isize::MAX` bytes.
pub const MAX_ELEMENTS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Validate a shape and return its element count.
///
/// A valid shape has rank >= 1, no zero-sized dimension, and at most
/// [`MAX_ELEMENTS`] elements.
pub fn validate_shape(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() || shape.contains(&0) {
        return Err(ArrayError::InvalidShape(shape.to_vec()));
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .filter(|&len| len <= MAX_ELEMENTS)
        .ok_or_else(|| ArrayError::InvalidShape(shape.to_vec()))
}

/// Compute row-major strides for a shape.
///
/// # Errors
/// Returns [`ArrayError::InvalidShape`] if the shape is empty or any dimension is 0.
///
/// # Example
/// ```rust
/// use strided_ndarray::compute_strides;
///
/// assert_eq!(compute_strides(&[2, 3, 4]).unwrap(), vec![12, 4, 1]);
/// ```
pub fn compute_strides(shape: &[usize]) -> Result<Vec<isize>> {
    validate_shape(shape)?;
    Ok(row_major_strides(shape))
}

/// Row-major strides without validation.
///
/// Also used for the rank-1 zero-length shape `[0]`, whose stride is `[1]`.
pub(crate) fn row_major_strides(dims: &[usize]) -> Vec<isize> {
    let rank = dims.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1isize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1] as isize;
    }
    strides
}

/// Total number of elements described by `dims`.
#[inline]
pub fn shape_len(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Resolve a multi-index into a flat offset, checking rank and bounds.
pub fn flat_offset(indices: &[usize], dims: &[usize], strides: &[isize]) -> Result<usize> {
    if indices.len() != dims.len() {
        return Err(ArrayError::RankMismatch {
            expected: dims.len(),
            found: indices.len(),
        });
    }
    let mut offset = 0isize;
    for (axis, ((&index, &dim), &stride)) in
        indices.iter().zip(dims.iter()).zip(strides.iter()).enumerate()
    {
        if index >= dim {
            return Err(ArrayError::IndexOutOfRange { axis, index, dim });
        }
        offset += index as isize * stride;
    }
    Ok(offset as usize)
}

/// Whether `strides` are exactly the dense row-major strides of `dims`.
///
/// Dimensions of size 1 are skipped since their stride is never used.
pub fn is_row_major_contiguous(dims: &[usize], strides: &[isize]) -> bool {
    if dims.len() != strides.len() {
        return false;
    }
    let mut expected = 1isize;
    for (&dim, &stride) in dims.iter().rev().zip(strides.iter().rev()) {
        if dim <= 1 {
            continue;
        }
        if stride != expected {
            return false;
        }
        expected = expected.saturating_mul(dim as isize);
    }
    true
}

/// Advance a row-major multi-index by one position.
///
/// Returns `false` once the index wraps past the last element.
#[inline]
pub(crate) fn increment_index(index: &mut [usize], dims: &[usize]) -> bool {
    for d in (0..dims.len()).rev() {
        index[d] += 1;
        if index[d] < dims[d] {
            return true;
        }
        index[d] = 0;
    }
    false
}
