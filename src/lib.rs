//! Owned row-major N-dimensional arrays of `f64`.
//!
//! The crate is built around one concrete array type, [`NdArray`], which owns a
//! contiguous buffer together with its shape and the row-major strides derived
//! from that shape. Borrowed [`ArrayView`]s describe strided windows onto a
//! buffer and are how transposes and axis slices are computed before being
//! materialized.
//!
//! # Core Types
//!
//! - [`NdArray`]: Owned array, exclusively owning its buffer
//! - [`ArrayView`]: Zero-copy strided view over borrowed data
//!
//! # API overview
//!
//! ## Factories
//!
//! - [`zeros`], [`ones`], [`full`], [`zeros_like`], [`ones_like`]
//! - [`array`], [`array2`]: Wrap or copy existing data
//! - [`arange`], [`linspace`], [`eye`]
//! - [`random`], [`random_with`]: Uniform samples (see [`mod@random`] for the
//!   process-wide generator)
//! - [`concatenate`]: Join arrays along an axis
//!
//! ## Elementwise operations
//!
//! - [`add`], [`sub`], [`mul`], [`div`]: Shape-checked binary arithmetic
//! - [`add_scalar`], [`sub_scalar`], [`mul_scalar`], [`div_scalar`]
//! - [`sin`], [`cos`], [`exp`], [`log`], [`sqrt`], [`abs`]
//!
//! ## Reductions
//!
//! - [`sum`], [`mean`], [`min`], [`max`], [`std`] over the whole buffer
//! - [`reduce`]: Generic map-reduce
//!
//! ## Shape transforms and linear algebra
//!
//! - [`reshape`], [`transpose`], [`slice`], [`flatten`]
//! - [`dot`], [`dot_views`]: 2-D matrix multiplication
//!
//! Every operation returns a new array and leaves its operands untouched.
//!
//! # Example
//!
//! ```rust
//! use strided_ndarray::{arange, dot, eye};
//!
//! let a = arange(1.0, 7.0, 1.0).unwrap().reshape(&[2, 3]).unwrap();
//! assert_eq!(a.get(&[1, 2]).unwrap(), 6.0);
//!
//! let at = a.transpose().unwrap();
//! assert_eq!(at.shape(), &[3, 2]);
//!
//! let same = dot(&a, &eye(3).unwrap()).unwrap();
//! assert_eq!(same, a);
//! ```
//!
//! # Numeric semantics
//!
//! Division by zero, `log` of a negative number and similar domain issues are
//! not errors. They produce IEEE-754 infinities and NaNs exactly as scalar
//! `f64` arithmetic does.

mod array;
pub mod factory;
mod kernel;
pub mod layout;
pub mod linalg;
mod map;
pub mod ops;
pub mod random;
pub mod reduce;
pub mod transform;
pub mod view;

// ============================================================================
// Core types
// ============================================================================
pub use array::NdArray;
pub use view::{ArrayView, ViewIter};

// ============================================================================
// Layout
// ============================================================================
pub use layout::{compute_strides, validate_shape};

// ============================================================================
// Factories
// ============================================================================
pub use factory::{
    arange, array, array2, concatenate, eye, full, linspace, ones, ones_like, random,
    random_with, zeros, zeros_like,
};

// ============================================================================
// Elementwise operations
// ============================================================================
pub use ops::{
    abs, add, add_scalar, cos, div, div_scalar, exp, log, mul, mul_scalar, sin, sqrt, sub,
    sub_scalar,
};

// ============================================================================
// Reductions
// ============================================================================
pub use reduce::{max, mean, min, reduce, std, sum};

// ============================================================================
// Shape transforms and linear algebra
// ============================================================================
pub use linalg::{dot, dot_views};
pub use transform::{flatten, reshape, slice, transpose};

// ============================================================================
// Constants
// ============================================================================

/// Element count above which elementwise kernels are split across the rayon
/// pool when the `parallel` feature is enabled.
pub const MIN_THREAD_LENGTH: usize = 1 << 15;

/// Environment variable read once to seed the process-wide random generator.
pub const SEED_ENV_VAR: &str = "NDARRAY_SEED";

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during array construction and operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrayError {
    /// A shape is empty or contains a zero-sized dimension.
    #[error("invalid shape {0:?}: rank must be >= 1 and every dimension > 0")]
    InvalidShape(Vec<usize>),

    /// Number of indices does not match the array rank.
    #[error("rank mismatch: expected {expected} indices, got {found}")]
    RankMismatch { expected: usize, found: usize },

    /// An index or slice bound lies outside `[0, dim)` on some axis.
    #[error("index {index} out of range for axis {axis} with size {dim}")]
    IndexOutOfRange { axis: usize, index: usize, dim: usize },

    /// Operand shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Operation is only defined for another rank.
    #[error("{op} requires a rank-2 array, got rank {rank}")]
    UnsupportedRank { op: &'static str, rank: usize },

    /// Replacement buffer has the wrong length.
    #[error("size mismatch: expected {expected} elements, got {found}")]
    SizeMismatch { expected: usize, found: usize },

    /// Reduction over an array with no elements.
    #[error("reduction over an empty array")]
    EmptyArray,

    /// Malformed parameter passed to a factory or transform.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;
