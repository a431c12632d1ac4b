//! Whole-buffer reductions.
//!
//! Every reduction folds over all elements in row-major order; there are no
//! per-axis variants. Reducing an array with no elements fails with
//! [`ArrayError::EmptyArray`].

use crate::array::NdArray;
use crate::{ArrayError, Result};

/// Map every element and fold the results left to right.
///
/// # Example
/// ```rust
/// use strided_ndarray::{array, reduce};
///
/// let a = array(vec![1.0, 2.0, 3.0]);
/// let sum_sq = reduce(&a, |x| x * x, |acc, y| acc + y, 0.0).unwrap();
/// assert_eq!(sum_sq, 14.0);
/// ```
pub fn reduce<M, R, U>(src: &NdArray, map_fn: M, reduce_fn: R, init: U) -> Result<U>
where
    M: Fn(f64) -> U,
    R: Fn(U, U) -> U,
{
    if src.is_empty() {
        return Err(ArrayError::EmptyArray);
    }
    let mut acc = init;
    for &x in src.as_slice() {
        acc = reduce_fn(acc, map_fn(x));
    }
    Ok(acc)
}

/// Sum of all elements.
pub fn sum(src: &NdArray) -> Result<f64> {
    reduce(src, |x| x, |a, b| a + b, 0.0)
}

/// Arithmetic mean of all elements.
pub fn mean(src: &NdArray) -> Result<f64> {
    Ok(sum(src)? / src.len() as f64)
}

/// Smallest element. Any `NaN` element makes the result `NaN`.
pub fn min(src: &NdArray) -> Result<f64> {
    reduce(src, |x| x, nan_min, f64::INFINITY)
}

/// Largest element. Any `NaN` element makes the result `NaN`.
pub fn max(src: &NdArray) -> Result<f64> {
    reduce(src, |x| x, nan_max, f64::NEG_INFINITY)
}

/// Population standard deviation, `sqrt(mean((x - mean(x))^2))`.
pub fn std(src: &NdArray) -> Result<f64> {
    let mu = mean(src)?;
    let ss = reduce(src, |x| (x - mu) * (x - mu), |a, b| a + b, 0.0)?;
    Ok((ss / src.len() as f64).sqrt())
}

#[inline]
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

#[inline]
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

impl NdArray {
    pub fn sum(&self) -> Result<f64> {
        sum(self)
    }

    pub fn mean(&self) -> Result<f64> {
        mean(self)
    }

    pub fn min(&self) -> Result<f64> {
        min(self)
    }

    pub fn max(&self) -> Result<f64> {
        max(self)
    }

    pub fn std(&self) -> Result<f64> {
        std(self)
    }
}
