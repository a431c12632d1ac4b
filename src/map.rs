//! Elementwise map kernels over dense row-major buffers.
//!
//! Operands of an elementwise operation are always dense arrays of identical
//! shape, so the kernels work on flat slices. With the `parallel` feature the
//! buffers are split across the rayon pool once they exceed
//! [`MIN_THREAD_LENGTH`](crate::MIN_THREAD_LENGTH) elements.

use crate::{ArrayError, Result};

/// Fail with `ShapeMismatch` unless both shapes are element-for-element equal.
pub(crate) fn ensure_same_shape(a: &[usize], b: &[usize]) -> Result<()> {
    if a != b {
        return Err(ArrayError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

/// Whether a kernel over `len` elements should take the sequential path.
#[inline]
fn use_sequential_path(len: usize) -> bool {
    #[cfg(feature = "parallel")]
    {
        len <= crate::MIN_THREAD_LENGTH
    }
    #[cfg(not(feature = "parallel"))]
    {
        let _ = len;
        true
    }
}

/// `dest[i] = f(src[i])`.
pub(crate) fn map_into<F>(dest: &mut [f64], src: &[f64], f: F)
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    debug_assert_eq!(dest.len(), src.len());
    if use_sequential_path(dest.len()) {
        for (d, &s) in dest.iter_mut().zip(src) {
            *d = f(s);
        }
        return;
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        log::trace!("map_into: parallel over {} elements", dest.len());
        dest.par_iter_mut()
            .zip(src.par_iter())
            .for_each(|(d, &s)| *d = f(s));
    }
}

/// `dest[i] = f(a[i], b[i])`.
pub(crate) fn zip_map2_into<F>(dest: &mut [f64], a: &[f64], b: &[f64], f: F)
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    debug_assert_eq!(dest.len(), a.len());
    debug_assert_eq!(dest.len(), b.len());
    if use_sequential_path(dest.len()) {
        for ((d, &x), &y) in dest.iter_mut().zip(a).zip(b) {
            *d = f(x, y);
        }
        return;
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        log::trace!("zip_map2_into: parallel over {} elements", dest.len());
        dest.par_iter_mut()
            .zip(a.par_iter().zip(b.par_iter()))
            .for_each(|(d, (&x, &y))| *d = f(x, y));
    }
}
