//! Array construction helpers.
//!
//! All factories produce fresh row-major arrays. Shape arguments follow the
//! usual rule (rank >= 1, no zero extent); the only zero-length array is the
//! rank-1 `[0]` produced by an empty [`arange`] or [`array`]`(vec![])`.

use std::borrow::Borrow;
use std::sync::Arc;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::array::NdArray;
use crate::kernel::scatter_blocks;
use crate::layout::{shape_len, validate_shape, MAX_ELEMENTS};
use crate::{random as global, ArrayError, Result};

/// Array of `shape` filled with `0.0`.
pub fn zeros(shape: &[usize]) -> Result<NdArray> {
    full(shape, 0.0)
}

/// Array of `shape` filled with `1.0`.
pub fn ones(shape: &[usize]) -> Result<NdArray> {
    full(shape, 1.0)
}

/// Array of `shape` filled with `value`.
pub fn full(shape: &[usize], value: f64) -> Result<NdArray> {
    let len = validate_shape(shape)?;
    Ok(NdArray::from_parts(vec![value; len], Arc::from(shape)))
}

/// Zeros with the shape of `a`.
pub fn zeros_like(a: &NdArray) -> NdArray {
    a.with_same_shape(vec![0.0; a.len()])
}

/// Ones with the shape of `a`.
pub fn ones_like(a: &NdArray) -> NdArray {
    a.with_same_shape(vec![1.0; a.len()])
}

/// Wrap a vector as a rank-1 array without copying.
pub fn array(data: Vec<f64>) -> NdArray {
    NdArray::from_vec(data)
}

/// Copy equal-length rows into a 2-D array.
///
/// # Errors
/// `InvalidShape` for no rows or empty rows, `ShapeMismatch` for ragged rows.
pub fn array2<R: AsRef<[f64]>>(rows: &[R]) -> Result<NdArray> {
    NdArray::from_rows(rows)
}

/// Evenly spaced values `start, start + step, ...` stopping before `stop`.
///
/// The element count is `floor((stop - start) / step)`. `start == stop`
/// gives an empty rank-1 array.
///
/// # Errors
/// `InvalidArgument` if any argument is non-finite, `step == 0`, `step`
/// points away from `stop`, or the buffer cannot be allocated.
///
/// # Example
/// ```rust
/// use strided_ndarray::arange;
///
/// let a = arange(0.0, 10.0, 2.0).unwrap();
/// assert_eq!(a.as_slice(), &[0.0, 2.0, 4.0, 6.0, 8.0]);
/// ```
pub fn arange(start: f64, stop: f64, step: f64) -> Result<NdArray> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Err(ArrayError::InvalidArgument(format!(
            "arange arguments must be finite, got ({start}, {stop}, {step})"
        )));
    }
    if step == 0.0 {
        return Err(ArrayError::InvalidArgument("arange step must be non-zero".into()));
    }
    let span = stop - start;
    if span != 0.0 && span.is_sign_negative() != step.is_sign_negative() {
        return Err(ArrayError::InvalidArgument(format!(
            "arange step {step} does not move from {start} towards {stop}"
        )));
    }

    let count = (span / step).floor();
    let too_many =
        || ArrayError::InvalidArgument(format!("arange would produce {count} elements"));
    if !(count <= MAX_ELEMENTS as f64) {
        return Err(too_many());
    }
    let count = count as usize;
    let mut data = Vec::new();
    data.try_reserve_exact(count).map_err(|_| too_many())?;
    data.extend((0..count).map(|i| start + i as f64 * step));
    Ok(NdArray::from_vec(data))
}

/// `num` evenly spaced samples over `[start, stop]`, both ends included.
///
/// `num == 1` gives `[start]`. The last sample is exactly `stop`.
///
/// # Errors
/// `InvalidArgument` if `num == 0`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Result<NdArray> {
    match num {
        0 => Err(ArrayError::InvalidArgument(
            "linspace needs at least one sample".into(),
        )),
        1 => Ok(NdArray::from_vec(vec![start])),
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut data: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            data[num - 1] = stop;
            Ok(NdArray::from_vec(data))
        }
    }
}

/// `n x n` identity matrix.
pub fn eye(n: usize) -> Result<NdArray> {
    let mut out = zeros(&[n, n])?;
    let data = out.as_mut_slice();
    for i in 0..n {
        data[i * n + i] = 1.0;
    }
    Ok(out)
}

/// Uniform samples from `[min, max)` drawn from the process-wide generator.
///
/// See [`crate::random`](mod@crate::random) for seeding.
pub fn random(shape: &[usize], min: f64, max: f64) -> Result<NdArray> {
    check_bounds(min, max)?;
    global::with_global_rng(|rng| random_with(rng, shape, min, max))
}

/// Uniform samples from `[min, max)` drawn from `rng`.
///
/// # Errors
/// `InvalidShape` for an invalid shape, `InvalidArgument` if the bounds are
/// non-finite, `min >= max`, or `max - min` overflows.
///
/// # Example
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use strided_ndarray::random_with;
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let a = random_with(&mut rng, &[2, 2], -1.0, 1.0).unwrap();
/// assert!(a.iter().all(|&x| (-1.0..1.0).contains(&x)));
/// ```
pub fn random_with<R: Rng + ?Sized>(
    rng: &mut R,
    shape: &[usize],
    min: f64,
    max: f64,
) -> Result<NdArray> {
    let len = validate_shape(shape)?;
    check_bounds(min, max)?;
    let dist = Uniform::new(min, max);
    let data: Vec<f64> = (0..len).map(|_| dist.sample(rng)).collect();
    Ok(NdArray::from_parts(data, Arc::from(shape)))
}

fn check_bounds(min: f64, max: f64) -> Result<()> {
    if !(min.is_finite() && max.is_finite()) || min >= max || !(max - min).is_finite() {
        return Err(ArrayError::InvalidArgument(format!(
            "invalid sampling range [{min}, {max})"
        )));
    }
    Ok(())
}

/// Join arrays along `axis`.
///
/// Every input must have the same rank and the same extent on every axis
/// other than `axis`. For rank-1 inputs this is plain buffer concatenation.
///
/// # Errors
/// `InvalidArgument` for an empty input list or `axis >= rank`,
/// `ShapeMismatch` when an input's shape is incompatible with the first.
///
/// # Example
/// ```rust
/// use strided_ndarray::{array2, concatenate};
///
/// let a = array2(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let b = array2(&[[5.0], [6.0]]).unwrap();
/// let c = concatenate(&[&a, &b], 1).unwrap();
/// assert_eq!(c.shape(), &[2, 3]);
/// assert_eq!(c.as_slice(), &[1.0, 2.0, 5.0, 3.0, 4.0, 6.0]);
/// ```
pub fn concatenate<A: Borrow<NdArray>>(arrays: &[A], axis: usize) -> Result<NdArray> {
    let first: &NdArray = match arrays.first() {
        Some(a) => a.borrow(),
        None => {
            return Err(ArrayError::InvalidArgument(
                "concatenate needs at least one array".into(),
            ))
        }
    };
    let rank = first.ndim();
    if axis >= rank {
        return Err(ArrayError::InvalidArgument(format!(
            "axis {axis} out of bounds for rank {rank}"
        )));
    }

    let mut axis_len = 0usize;
    for a in arrays {
        let a: &NdArray = a.borrow();
        let shape = a.shape();
        let compatible = shape.len() == rank
            && shape
                .iter()
                .zip(first.shape())
                .enumerate()
                .all(|(d, (x, y))| d == axis || x == y);
        if !compatible {
            return Err(ArrayError::ShapeMismatch(
                first.shape().to_vec(),
                shape.to_vec(),
            ));
        }
        axis_len += shape[axis];
    }

    let mut dims = first.shape().to_vec();
    dims[axis] = axis_len;
    let outer = shape_len(&dims[..axis]);
    let inner = shape_len(&dims[axis + 1..]);
    let dest_stride = axis_len * inner;

    let mut out = vec![0.0; outer * dest_stride];
    let mut offset = 0;
    for a in arrays {
        let a: &NdArray = a.borrow();
        let block = a.shape()[axis] * inner;
        scatter_blocks(&mut out, a.as_slice(), outer, block, offset, dest_stride);
        offset += block;
    }
    Ok(NdArray::from_parts(out, Arc::from(dims)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_constant_fills() {
        assert_eq!(zeros(&[3]).unwrap().as_slice(), &[0.0, 0.0, 0.0]);
        let o = ones(&[2, 2]).unwrap();
        assert_eq!(o.shape(), &[2, 2]);
        assert!(o.iter().all(|&x| x == 1.0));
        let f = full(&[2, 3, 1], 7.5).unwrap();
        assert_eq!(f.len(), 6);
        assert_eq!(f.get(&[1, 2, 0]).unwrap(), 7.5);
        assert_eq!(zeros(&[2, 0]), Err(ArrayError::InvalidShape(vec![2, 0])));
        assert!(ones(&[]).is_err());
    }

    #[test]
    fn test_like() {
        let a = full(&[3, 2], 4.0).unwrap();
        let z = zeros_like(&a);
        assert_eq!(z.shape(), &[3, 2]);
        assert!(z.iter().all(|&x| x == 0.0));
        assert_eq!(ones_like(&a).shape(), a.shape());
    }

    #[test]
    fn test_array2() {
        let a = array2(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.get(&[1, 0]).unwrap(), 4.0);
        let ragged = array2(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(ragged, Err(ArrayError::ShapeMismatch(_, _))));
    }

    #[test]
    fn test_arange() {
        assert_eq!(
            arange(0.0, 10.0, 2.0).unwrap().as_slice(),
            &[0.0, 2.0, 4.0, 6.0, 8.0]
        );
        assert_eq!(arange(5.0, 1.0, -2.0).unwrap().as_slice(), &[5.0, 3.0]);
        assert_eq!(arange(0.0, 1.0, 0.25).unwrap().len(), 4);
        // floor of the span / step ratio
        assert_eq!(arange(0.0, 10.0, 3.0).unwrap().as_slice(), &[0.0, 3.0, 6.0]);
    }

    #[test]
    fn test_arange_empty() {
        let a = arange(2.0, 2.0, 1.0).unwrap();
        assert_eq!(a.shape(), &[0]);
        assert!(a.is_empty());
    }

    #[test]
    fn test_arange_too_large_is_error() {
        assert!(matches!(
            arange(0.0, 1e18, 1.0),
            Err(ArrayError::InvalidArgument(_))
        ));
        assert!(matches!(
            arange(0.0, 1e300, 1.0),
            Err(ArrayError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_huge_shape_is_error() {
        assert_eq!(zeros(&[1 << 61]), Err(ArrayError::InvalidShape(vec![1 << 61])));
        assert!(full(&[1 << 31, 1 << 31], 1.0).is_err());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_with(&mut rng, &[usize::MAX], 0.0, 1.0).is_err());
    }

    #[test]
    fn test_arange_errors() {
        for (start, stop, step) in [
            (0.0, 1.0, 0.0),
            (0.0, 1.0, -1.0),
            (1.0, 0.0, 1.0),
            (0.0, f64::INFINITY, 1.0),
            (f64::NAN, 1.0, 1.0),
        ] {
            assert!(
                matches!(arange(start, stop, step), Err(ArrayError::InvalidArgument(_))),
                "arange({start}, {stop}, {step}) should fail"
            );
        }
    }

    #[test]
    fn test_linspace() {
        let a = linspace(0.0, 1.0, 5).unwrap();
        assert_eq!(a.as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);

        let b = linspace(0.0, 1.0, 7).unwrap();
        assert_eq!(b.as_slice()[6], 1.0);
        assert_relative_eq!(b.as_slice()[3], 0.5, epsilon = 1e-15);

        assert_eq!(linspace(3.0, 9.0, 1).unwrap().as_slice(), &[3.0]);
        assert!(matches!(linspace(0.0, 1.0, 0), Err(ArrayError::InvalidArgument(_))));
    }

    #[test]
    fn test_linspace_descending() {
        let a = linspace(1.0, -1.0, 3).unwrap();
        assert_eq!(a.as_slice(), &[1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_eye() {
        let e = eye(3).unwrap();
        assert_eq!(e.shape(), &[3, 3]);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(e.get(&[i, j]).unwrap(), expected);
            }
        }
        assert_eq!(eye(0), Err(ArrayError::InvalidShape(vec![0, 0])));
    }

    #[test]
    fn test_random_with_seeded() {
        let a = random_with(&mut StdRng::seed_from_u64(42), &[4, 5], -2.0, 3.0).unwrap();
        let b = random_with(&mut StdRng::seed_from_u64(42), &[4, 5], -2.0, 3.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shape(), &[4, 5]);
        assert!(a.iter().all(|&x| (-2.0..3.0).contains(&x)));
    }

    #[test]
    fn test_random_bounds() {
        let a = random(&[100], 10.0, 11.0).unwrap();
        assert!(a.iter().all(|&x| (10.0..11.0).contains(&x)));
    }

    #[test]
    fn test_random_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            random_with(&mut rng, &[2], 1.0, 1.0),
            Err(ArrayError::InvalidArgument(_))
        ));
        assert!(random_with(&mut rng, &[2], 2.0, 1.0).is_err());
        assert!(random_with(&mut rng, &[2], f64::NAN, 1.0).is_err());
        assert!(random_with(&mut rng, &[2], -f64::MAX, f64::MAX).is_err());
        assert!(random(&[0], 0.0, 1.0).is_err());
    }

    #[test]
    fn test_concatenate_1d() {
        let a = array(vec![1.0, 2.0]);
        let b = array(vec![3.0]);
        let c = concatenate(&[&a, &b], 0).unwrap();
        assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(c.shape(), &[3]);
    }

    #[test]
    fn test_concatenate_with_empty() {
        let a = array(vec![1.0, 2.0]);
        let empty = arange(0.0, 0.0, 1.0).unwrap();
        let c = concatenate(&[empty.clone(), a.clone(), empty], 0).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn test_concatenate_axis0() {
        let a = array2(&[[1.0, 2.0]]).unwrap();
        let b = array2(&[[3.0, 4.0], [5.0, 6.0]]).unwrap();
        let c = concatenate(&[&a, &b], 0).unwrap();
        assert_eq!(c.shape(), &[3, 2]);
        assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_concatenate_middle_axis() {
        let a = NdArray::from_shape_vec(&[2, 1, 2], vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let b = full(&[2, 2, 2], 9.0).unwrap();
        let c = concatenate(&[&a, &b], 1).unwrap();
        assert_eq!(c.shape(), &[2, 3, 2]);
        assert_eq!(
            c.as_slice(),
            &[0.0, 1.0, 9.0, 9.0, 9.0, 9.0, 2.0, 3.0, 9.0, 9.0, 9.0, 9.0]
        );
    }

    #[test]
    fn test_concatenate_errors() {
        let a = zeros(&[2, 2]).unwrap();
        let b = zeros(&[3, 3]).unwrap();
        let v = zeros(&[4]).unwrap();
        let none: [&NdArray; 0] = [];
        assert!(matches!(concatenate(&none, 0), Err(ArrayError::InvalidArgument(_))));
        assert!(matches!(concatenate(&[&a], 2), Err(ArrayError::InvalidArgument(_))));
        assert_eq!(
            concatenate(&[&a, &b], 0),
            Err(ArrayError::ShapeMismatch(vec![2, 2], vec![3, 3]))
        );
        assert!(matches!(concatenate(&[&a, &v], 0), Err(ArrayError::ShapeMismatch(_, _))));
    }
}
