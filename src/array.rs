//! The owned row-major array type.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use crate::layout::{self, flat_offset, increment_index, row_major_strides, validate_shape};
use crate::view::ArrayView;
use crate::{ArrayError, Result};

/// Owned N-dimensional array of `f64` in row-major order.
///
/// The buffer length always equals the product of the shape, and the strides
/// are always the row-major derivation of the shape. Shape and stride metadata
/// live behind `Arc` so that shape-preserving results can share them with
/// their operand.
///
/// # Example
/// ```rust
/// use strided_ndarray::NdArray;
///
/// let mut a = NdArray::matrix(2, 3).unwrap();
/// a.set(&[1, 2], 6.0).unwrap();
/// assert_eq!(a.strides(), &[3, 1]);
/// assert_eq!(a.get(&[1, 2]).unwrap(), 6.0);
/// ```
#[derive(Clone, PartialEq)]
pub struct NdArray {
    data: Vec<f64>,
    dims: Arc<[usize]>,
    strides: Arc<[isize]>,
}

impl fmt::Debug for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdArray")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("data", &self.data)
            .finish()
    }
}

impl NdArray {
    /// Create a zero-filled rank-1 array of `size` elements.
    pub fn new(size: usize) -> Result<Self> {
        Self::from_shape(&[size])
    }

    /// Create a zero-filled `rows x cols` matrix.
    pub fn matrix(rows: usize, cols: usize) -> Result<Self> {
        Self::from_shape(&[rows, cols])
    }

    /// Create a zero-filled array of the given shape.
    pub fn from_shape(shape: &[usize]) -> Result<Self> {
        let total = validate_shape(shape)?;
        Ok(Self::from_parts(vec![0.0; total], Arc::from(shape)))
    }

    /// Wrap a flat vector as a rank-1 array, taking ownership.
    ///
    /// An empty vector yields the rank-1 zero-length array of shape `[0]`.
    pub fn from_vec(data: Vec<f64>) -> Self {
        let dims: Arc<[usize]> = Arc::from([data.len()].as_slice());
        Self::from_parts(data, dims)
    }

    /// Wrap a flat vector with an explicit shape.
    ///
    /// # Errors
    /// [`ArrayError::InvalidShape`] for an invalid shape,
    /// [`ArrayError::SizeMismatch`] if `data.len()` differs from the shape's element count.
    pub fn from_shape_vec(shape: &[usize], data: Vec<f64>) -> Result<Self> {
        let total = validate_shape(shape)?;
        if data.len() != total {
            return Err(ArrayError::SizeMismatch {
                expected: total,
                found: data.len(),
            });
        }
        Ok(Self::from_parts(data, Arc::from(shape)))
    }

    /// Copy a 2-D source, one slice per row, into a row-major matrix.
    ///
    /// All rows must have the same non-zero length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let total = validate_shape(&[nrows, ncols])?;

        let mut data = Vec::with_capacity(total);
        for row in rows {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(ArrayError::ShapeMismatch(vec![ncols], vec![row.len()]));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_parts(data, Arc::from([nrows, ncols].as_slice())))
    }

    /// Create an array with values produced by a function.
    ///
    /// The function is called with indices in row-major iteration order.
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> f64) -> Result<Self> {
        let total = validate_shape(shape)?;
        let mut data = Vec::with_capacity(total);
        let mut idx = vec![0usize; shape.len()];
        for _ in 0..total {
            data.push(f(&idx));
            increment_index(&mut idx, shape);
        }
        Ok(Self::from_parts(data, Arc::from(shape)))
    }

    /// Build from a buffer and already-validated dims, deriving the strides.
    pub(crate) fn from_parts(data: Vec<f64>, dims: Arc<[usize]>) -> Self {
        debug_assert_eq!(data.len(), layout::shape_len(&dims));
        let strides = Arc::from(row_major_strides(&dims));
        Self {
            data,
            dims,
            strides,
        }
    }

    /// New array with the same shape metadata and a different buffer.
    pub(crate) fn with_same_shape(&self, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            data,
            dims: Arc::clone(&self.dims),
            strides: Arc::clone(&self.strides),
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolve a multi-index to its offset in the flat buffer.
    ///
    /// # Errors
    /// [`ArrayError::RankMismatch`] if `indices.len() != self.ndim()`,
    /// [`ArrayError::IndexOutOfRange`] if any index is outside its dimension.
    #[inline]
    pub fn offset_of(&self, indices: &[usize]) -> Result<usize> {
        flat_offset(indices, &self.dims, &self.strides)
    }

    /// Get an element by multi-dimensional index.
    pub fn get(&self, indices: &[usize]) -> Result<f64> {
        let offset = self.offset_of(indices)?;
        Ok(self.data[offset])
    }

    /// Set an element by multi-dimensional index.
    pub fn set(&mut self, indices: &[usize], value: f64) -> Result<()> {
        let offset = self.offset_of(indices)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Replace the whole buffer, keeping the shape.
    ///
    /// # Errors
    /// [`ArrayError::SizeMismatch`] if `data` has a different length.
    pub fn replace_buffer(&mut self, data: Vec<f64>) -> Result<()> {
        if data.len() != self.data.len() {
            return Err(ArrayError::SizeMismatch {
                expected: self.data.len(),
                found: data.len(),
            });
        }
        self.data = data;
        Ok(())
    }

    /// Borrow the buffer in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutably borrow the buffer in row-major order.
    ///
    /// The borrow is exclusive for as long as it lives: no other access to
    /// this array is possible until it is dropped. The buffer length cannot be
    /// changed through it.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Independent copy of the buffer.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Consume the array and return its buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copy a rank-2 array into one `Vec` per row.
    pub fn to_nested(&self) -> Result<Vec<Vec<f64>>> {
        if self.ndim() != 2 {
            return Err(ArrayError::UnsupportedRank {
                op: "to_nested",
                rank: self.ndim(),
            });
        }
        Ok(self
            .data
            .chunks_exact(self.dims[1])
            .map(<[f64]>::to_vec)
            .collect())
    }

    /// Create a zero-copy view over this array.
    pub fn view(&self) -> ArrayView<'_> {
        ArrayView::from_array_parts(&self.data, &self.dims, &self.strides)
    }

    /// Iterate over all elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Mutable iteration over all elements in row-major order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, f64> {
        self.data.iter_mut()
    }
}

impl From<Vec<f64>> for NdArray {
    fn from(data: Vec<f64>) -> Self {
        NdArray::from_vec(data)
    }
}

impl From<NdArray> for Vec<f64> {
    fn from(array: NdArray) -> Self {
        array.into_vec()
    }
}

impl FromIterator<f64> for NdArray {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        NdArray::from_vec(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NdArray {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<&[usize]> for NdArray {
    type Output = f64;

    /// # Panics
    /// Panics if the index has the wrong rank or is out of bounds.
    fn index(&self, indices: &[usize]) -> &f64 {
        match self.offset_of(indices) {
            Ok(offset) => &self.data[offset],
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<&[usize]> for NdArray {
    fn index_mut(&mut self, indices: &[usize]) -> &mut f64 {
        match self.offset_of(indices) {
            Ok(offset) => &mut self.data[offset],
            Err(err) => panic!("{err}"),
        }
    }
}

impl<const N: usize> Index<[usize; N]> for NdArray {
    type Output = f64;

    fn index(&self, indices: [usize; N]) -> &f64 {
        &self[indices.as_slice()]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for NdArray {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut f64 {
        &mut self[indices.as_slice()]
    }
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_axis(f, &self.data, &self.dims)
    }
}

/// Render one axis of a row-major block as nested brackets.
fn fmt_axis(f: &mut fmt::Formatter<'_>, data: &[f64], dims: &[usize]) -> fmt::Result {
    write!(f, "[")?;
    match dims {
        [] | [_] => {
            for (i, value) in data.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{value}")?;
            }
        }
        [outer, inner @ ..] => {
            let block = layout::shape_len(inner);
            for i in 0..*outer {
                if i > 0 {
                    write!(f, ", ")?;
                }
                fmt_axis(f, &data[i * block..(i + 1) * block], inner)?;
            }
        }
    }
    write!(f, "]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_shapes() {
        let a = NdArray::new(4).unwrap();
        assert_eq!(a.shape(), &[4]);
        assert_eq!(a.strides(), &[1]);
        assert_eq!(a.to_vec(), vec![0.0; 4]);

        let m = NdArray::matrix(2, 5).unwrap();
        assert_eq!(m.shape(), &[2, 5]);
        assert_eq!(m.strides(), &[5, 1]);
        assert_eq!(m.len(), 10);

        let t = NdArray::from_shape(&[2, 3, 4]).unwrap();
        assert_eq!(t.ndim(), 3);
        assert_eq!(t.strides(), &[12, 4, 1]);
        assert_eq!(t.len(), 24);
    }

    #[test]
    fn test_constructors_reject_zero_dims() {
        assert_eq!(NdArray::new(0), Err(ArrayError::InvalidShape(vec![0])));
        assert!(NdArray::matrix(3, 0).is_err());
        assert!(NdArray::from_shape(&[]).is_err());
    }

    #[test]
    fn test_from_vec_takes_ownership() {
        let a = NdArray::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.shape(), &[3]);
        assert_eq!(a.into_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_vec_empty() {
        let a = NdArray::from_vec(Vec::new());
        assert_eq!(a.shape(), &[0]);
        assert_eq!(a.strides(), &[1]);
        assert!(a.is_empty());
    }

    #[test]
    fn test_from_shape_vec() {
        let a = NdArray::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.get(&[1, 0]).unwrap(), 3.0);
        assert_eq!(
            NdArray::from_shape_vec(&[2, 2], vec![1.0]),
            Err(ArrayError::SizeMismatch {
                expected: 4,
                found: 1
            })
        );
    }

    #[test]
    fn test_from_rows_row_major() {
        let a = NdArray::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.get(&[1, 1]).unwrap(), 5.0);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            NdArray::from_rows(&rows),
            Err(ArrayError::ShapeMismatch(vec![2], vec![1]))
        );
        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            NdArray::from_rows(&empty),
            Err(ArrayError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_from_fn_row_major_order() {
        let a = NdArray::from_fn(&[2, 3], |idx| (idx[0] * 10 + idx[1]) as f64).unwrap();
        assert_eq!(a.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_get_set() {
        let mut a = NdArray::from_shape(&[2, 3, 4]).unwrap();
        a.set(&[1, 2, 3], 7.5).unwrap();
        assert_eq!(a.get(&[1, 2, 3]).unwrap(), 7.5);
        assert_eq!(a.as_slice()[23], 7.5);
    }

    #[test]
    fn test_get_rank_mismatch() {
        let a = NdArray::matrix(2, 2).unwrap();
        assert_eq!(
            a.get(&[0]),
            Err(ArrayError::RankMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_set_out_of_range_leaves_data() {
        let mut a = NdArray::matrix(2, 2).unwrap();
        assert_eq!(
            a.set(&[2, 0], 1.0),
            Err(ArrayError::IndexOutOfRange {
                axis: 0,
                index: 2,
                dim: 2
            })
        );
        assert_eq!(a.to_vec(), vec![0.0; 4]);
    }

    #[test]
    fn test_replace_buffer() {
        let mut a = NdArray::matrix(2, 2).unwrap();
        a.replace_buffer(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.get(&[1, 1]).unwrap(), 4.0);
        assert_eq!(a.shape(), &[2, 2]);

        assert_eq!(
            a.replace_buffer(vec![1.0; 5]),
            Err(ArrayError::SizeMismatch {
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn test_to_vec_is_independent() {
        let mut a = NdArray::from_vec(vec![1.0, 2.0]);
        let copy = a.to_vec();
        a.as_mut_slice()[0] = 9.0;
        assert_eq!(copy, vec![1.0, 2.0]);
        assert_eq!(a.as_slice(), &[9.0, 2.0]);
    }

    #[test]
    fn test_to_nested() {
        let a = NdArray::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.to_nested().unwrap(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(
            NdArray::new(3).unwrap().to_nested(),
            Err(ArrayError::UnsupportedRank {
                op: "to_nested",
                rank: 1
            })
        );
    }

    #[test]
    fn test_index_operators() {
        let mut a = NdArray::matrix(2, 3).unwrap();
        a[[1, 2]] = 5.0;
        assert_eq!(a[[1, 2]], 5.0);
        assert_eq!(a[&[1usize, 2] as &[usize]], 5.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        let a = NdArray::matrix(2, 3).unwrap();
        let value = a[[2, 0]];
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_display() {
        let a = NdArray::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.5]).unwrap();
        assert_eq!(a.to_string(), "[[1, 2], [3, 4.5]]");
        let b = NdArray::from_vec(vec![0.5, 1.0]);
        assert_eq!(b.to_string(), "[0.5, 1]");
        let c = NdArray::from_shape_vec(&[2, 1, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(c.to_string(), "[[[1, 2]], [[3, 4]]]");
    }

    #[test]
    fn test_collect() {
        let a: NdArray = (0..3).map(f64::from).collect();
        assert_eq!(a.shape(), &[3]);
        assert_eq!(a.as_slice(), &[0.0, 1.0, 2.0]);
    }
}
