//! Borrowed strided views.
//!
//! [`ArrayView`] describes a window onto a borrowed `f64` buffer by a shape,
//! per-dimension strides and a base offset. Transformations such as
//! [`ArrayView::transpose_2d`], [`ArrayView::permute`] and
//! [`ArrayView::slice_axis`] only rewrite that metadata and never touch the
//! data. [`ArrayView::to_array`] materializes the view in row-major order.

use std::ops::Range;
use std::sync::Arc;

use crate::array::NdArray;
use crate::kernel::gather;
use crate::layout::{increment_index, is_row_major_contiguous, validate_shape};
use crate::{ArrayError, Result};

/// Validate that all reachable offsets stay within `[0, len)`.
fn validate_bounds(len: usize, dims: &[usize], strides: &[isize], offset: isize) -> Result<()> {
    if dims.len() != strides.len() {
        return Err(ArrayError::InvalidArgument(format!(
            "{} strides given for {} dimensions",
            strides.len(),
            dims.len()
        )));
    }
    let overflow = || ArrayError::InvalidArgument("view offset overflow".to_string());
    let mut min_offset = offset;
    let mut max_offset = offset;
    for (&dim, &stride) in dims.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride.checked_mul(dim as isize - 1).ok_or_else(overflow)?;
            if end >= 0 {
                max_offset = max_offset.checked_add(end).ok_or_else(overflow)?;
            } else {
                min_offset = min_offset.checked_add(end).ok_or_else(overflow)?;
            }
        }
    }
    if min_offset < 0 || max_offset < 0 || max_offset as usize >= len {
        return Err(ArrayError::InvalidArgument(format!(
            "view reaches offsets {min_offset}..={max_offset} of a buffer with {len} elements"
        )));
    }
    Ok(())
}

/// Dynamic-rank immutable strided view over borrowed data.
#[derive(Clone)]
pub struct ArrayView<'a> {
    data: &'a [f64],
    dims: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: isize,
}

impl std::fmt::Debug for ArrayView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayView")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a> ArrayView<'a> {
    /// Create a view over `data`.
    ///
    /// # Errors
    /// [`ArrayError::InvalidShape`] if `dims` is not a valid shape,
    /// [`ArrayError::InvalidArgument`] if `strides` and `dims` differ in length
    /// or any reachable element lies outside `data`.
    pub fn new(data: &'a [f64], dims: &[usize], strides: &[isize], offset: isize) -> Result<Self> {
        validate_shape(dims)?;
        validate_bounds(data.len(), dims, strides, offset)?;
        Ok(Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
        })
    }

    /// View over an array's own buffer, sharing its metadata.
    pub(crate) fn from_array_parts(
        data: &'a [f64],
        dims: &Arc<[usize]>,
        strides: &Arc<[isize]>,
    ) -> Self {
        Self {
            data,
            dims: Arc::clone(dims),
            strides: Arc::clone(strides),
            offset: 0,
        }
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|&d| d == 0)
    }

    #[inline]
    pub fn data(&self) -> &'a [f64] {
        self.data
    }

    /// Check if the view covers its elements densely in row-major order.
    pub fn is_contiguous(&self) -> bool {
        is_row_major_contiguous(&self.dims, &self.strides)
    }

    /// The contiguous row-major run this view covers, if any.
    pub fn as_slice(&self) -> Option<&'a [f64]> {
        if !self.is_contiguous() {
            return None;
        }
        let start = self.offset as usize;
        Some(&self.data[start..start + self.len()])
    }

    /// Flat buffer position of a multi-index, without bounds checks.
    #[inline]
    pub(crate) fn linear_index(&self, indices: &[usize]) -> usize {
        let mut idx = self.offset;
        for (&index, &stride) in indices.iter().zip(self.strides.iter()) {
            idx += index as isize * stride;
        }
        idx as usize
    }

    /// Get an element by multi-dimensional index.
    pub fn get(&self, indices: &[usize]) -> Result<f64> {
        if indices.len() != self.dims.len() {
            return Err(ArrayError::RankMismatch {
                expected: self.dims.len(),
                found: indices.len(),
            });
        }
        for (axis, (&index, &dim)) in indices.iter().zip(self.dims.iter()).enumerate() {
            if index >= dim {
                return Err(ArrayError::IndexOutOfRange { axis, index, dim });
            }
        }
        Ok(self.data[self.linear_index(indices)])
    }

    /// Permute dimensions.
    ///
    /// `perm[i]` names the source axis that becomes axis `i`.
    pub fn permute(&self, perm: &[usize]) -> Result<ArrayView<'a>> {
        let rank = self.dims.len();
        if perm.len() != rank {
            return Err(ArrayError::RankMismatch {
                expected: rank,
                found: perm.len(),
            });
        }
        let mut seen = vec![false; rank];
        for &p in perm {
            if p >= rank || seen[p] {
                return Err(ArrayError::InvalidArgument(format!(
                    "{perm:?} is not a permutation of 0..{rank}"
                )));
            }
            seen[p] = true;
        }
        let new_dims: Vec<usize> = perm.iter().map(|&p| self.dims[p]).collect();
        let new_strides: Vec<isize> = perm.iter().map(|&p| self.strides[p]).collect();
        Ok(ArrayView {
            data: self.data,
            dims: Arc::from(new_dims),
            strides: Arc::from(new_strides),
            offset: self.offset,
        })
    }

    /// Transpose a 2D view by swapping dims and strides (zero-copy).
    pub fn transpose_2d(&self) -> Result<ArrayView<'a>> {
        if self.dims.len() != 2 {
            return Err(ArrayError::UnsupportedRank {
                op: "transpose",
                rank: self.dims.len(),
            });
        }
        Ok(ArrayView {
            data: self.data,
            dims: Arc::new([self.dims[1], self.dims[0]]),
            strides: Arc::new([self.strides[1], self.strides[0]]),
            offset: self.offset,
        })
    }

    /// Restrict one axis to `range` (zero-copy).
    ///
    /// # Errors
    /// [`ArrayError::InvalidArgument`] if `axis >= ndim`,
    /// [`ArrayError::IndexOutOfRange`] if the range is empty or ends past the axis.
    pub fn slice_axis(&self, axis: usize, range: Range<usize>) -> Result<ArrayView<'a>> {
        let rank = self.dims.len();
        if axis >= rank {
            return Err(ArrayError::InvalidArgument(format!(
                "axis {axis} out of bounds for rank {rank}"
            )));
        }
        let dim = self.dims[axis];
        if range.end > dim {
            return Err(ArrayError::IndexOutOfRange {
                axis,
                index: range.end,
                dim,
            });
        }
        if range.start >= range.end {
            return Err(ArrayError::IndexOutOfRange {
                axis,
                index: range.start,
                dim,
            });
        }

        let mut new_dims = self.dims.to_vec();
        new_dims[axis] = range.end - range.start;
        let new_offset = self.offset + range.start as isize * self.strides[axis];

        Ok(ArrayView {
            data: self.data,
            dims: Arc::from(new_dims),
            strides: Arc::clone(&self.strides),
            offset: new_offset,
        })
    }

    /// Iterate over elements in row-major logical order.
    pub fn iter(&self) -> ViewIter<'a> {
        ViewIter {
            view: self.clone(),
            index: vec![0; self.dims.len()],
            remaining: self.len(),
        }
    }

    /// Copy the view into a new row-major array.
    pub fn to_array(&self) -> NdArray {
        NdArray::from_parts(gather(self), Arc::clone(&self.dims))
    }
}

/// Row-major iterator over the elements of an [`ArrayView`].
pub struct ViewIter<'a> {
    view: ArrayView<'a>,
    index: Vec<usize>,
    remaining: usize,
}

impl Iterator for ViewIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.view.data[self.view.linear_index(&self.index)];
        self.remaining -= 1;
        increment_index(&mut self.index, &self.view.dims);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ViewIter<'_> {}
