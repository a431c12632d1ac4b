//! 2-D matrix multiplication.
//!
//! `C[i, j] = sum_k A[i, k] * B[k, j]`, with every output element accumulated
//! in `f64` in increasing `k` order. The loops run in `i, k, j` order so the
//! innermost loop walks a row of `B` and a row of `C`.

use log::debug;

use crate::array::NdArray;
use crate::view::ArrayView;
use crate::{ArrayError, Result};

/// Matrix product of two 2-D arrays.
///
/// # Errors
/// `UnsupportedRank` unless both operands are 2-D, `ShapeMismatch` if the
/// inner dimensions differ.
///
/// # Example
/// ```rust
/// use strided_ndarray::{array2, dot};
///
/// let a = array2(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let b = array2(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
/// assert_eq!(dot(&a, &b).unwrap().as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn dot(a: &NdArray, b: &NdArray) -> Result<NdArray> {
    dot_views(&a.view(), &b.view())
}

/// Matrix product of two 2-D strided views.
///
/// Either operand may be a transposed or sliced view; the result is always a
/// fresh row-major array.
pub fn dot_views(a: &ArrayView<'_>, b: &ArrayView<'_>) -> Result<NdArray> {
    let (m, k) = matrix_dims(a)?;
    let (k2, n) = matrix_dims(b)?;
    if k != k2 {
        return Err(ArrayError::ShapeMismatch(a.dims().to_vec(), b.dims().to_vec()));
    }
    debug!("dot: [{m}, {k}] x [{k}, {n}]");

    let mut c = vec![0.0f64; m * n];
    match (a.as_slice(), b.as_slice()) {
        (Some(a_data), Some(b_data)) => {
            for i in 0..m {
                let c_row = &mut c[i * n..(i + 1) * n];
                for l in 0..k {
                    let a_il = a_data[i * k + l];
                    let b_row = &b_data[l * n..(l + 1) * n];
                    for (c_ij, &b_lj) in c_row.iter_mut().zip(b_row) {
                        *c_ij += a_il * b_lj;
                    }
                }
            }
        }
        _ => {
            let (a_data, b_data) = (a.data(), b.data());
            let (as0, as1) = (a.strides()[0], a.strides()[1]);
            let (bs0, bs1) = (b.strides()[0], b.strides()[1]);
            for i in 0..m {
                for l in 0..k {
                    let a_il = a_data[(a.offset() + i as isize * as0 + l as isize * as1) as usize];
                    let b_base = b.offset() + l as isize * bs0;
                    for j in 0..n {
                        c[i * n + j] += a_il * b_data[(b_base + j as isize * bs1) as usize];
                    }
                }
            }
        }
    }

    Ok(NdArray::from_parts(c, vec![m, n].into()))
}

fn matrix_dims(view: &ArrayView<'_>) -> Result<(usize, usize)> {
    match view.dims() {
        &[rows, cols] => Ok((rows, cols)),
        dims => Err(ArrayError::UnsupportedRank {
            op: "dot",
            rank: dims.len(),
        }),
    }
}

impl NdArray {
    /// Matrix product `self . other`; see [`dot`].
    pub fn dot(&self, other: &NdArray) -> Result<NdArray> {
        dot(self, other)
    }
}
