//! Elementwise arithmetic and math functions.
//!
//! Binary operations require operands of identical shape and fail with
//! [`ArrayError::ShapeMismatch`](crate::ArrayError::ShapeMismatch) otherwise;
//! there is no broadcasting. Array-scalar forms apply the scalar to every
//! element. All results are new arrays; operands are never modified.
//!
//! Floating-point domain issues are not errors: `1.0 / 0.0` is `inf`,
//! `log(-1.0)` is `NaN`, exactly as for scalar `f64`.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::array::NdArray;
use crate::map::{ensure_same_shape, map_into, zip_map2_into};
use crate::Result;

impl NdArray {
    /// Apply `f` to every element, returning a new array of the same shape.
    pub fn map<F>(&self, f: F) -> NdArray
    where
        F: Fn(f64) -> f64 + Send + Sync,
    {
        let mut out = vec![0.0; self.len()];
        map_into(&mut out, self.as_slice(), f);
        self.with_same_shape(out)
    }

    /// Combine corresponding elements of two same-shape arrays.
    pub fn zip_map<F>(&self, other: &NdArray, f: F) -> Result<NdArray>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync,
    {
        ensure_same_shape(self.shape(), other.shape())?;
        let mut out = vec![0.0; self.len()];
        zip_map2_into(&mut out, self.as_slice(), other.as_slice(), f);
        Ok(self.with_same_shape(out))
    }

    pub fn add(&self, other: &NdArray) -> Result<NdArray> {
        self.zip_map(other, |x, y| x + y)
    }

    pub fn sub(&self, other: &NdArray) -> Result<NdArray> {
        self.zip_map(other, |x, y| x - y)
    }

    pub fn mul(&self, other: &NdArray) -> Result<NdArray> {
        self.zip_map(other, |x, y| x * y)
    }

    pub fn div(&self, other: &NdArray) -> Result<NdArray> {
        self.zip_map(other, |x, y| x / y)
    }

    pub fn add_scalar(&self, value: f64) -> NdArray {
        self.map(move |x| x + value)
    }

    pub fn sub_scalar(&self, value: f64) -> NdArray {
        self.map(move |x| x - value)
    }

    pub fn mul_scalar(&self, value: f64) -> NdArray {
        self.map(move |x| x * value)
    }

    pub fn div_scalar(&self, value: f64) -> NdArray {
        self.map(move |x| x / value)
    }

    pub fn sin(&self) -> NdArray {
        self.map(f64::sin)
    }

    pub fn cos(&self) -> NdArray {
        self.map(f64::cos)
    }

    pub fn exp(&self) -> NdArray {
        self.map(f64::exp)
    }

    /// Natural logarithm. Negative inputs give `NaN`, zero gives `-inf`.
    pub fn log(&self) -> NdArray {
        self.map(f64::ln)
    }

    pub fn sqrt(&self) -> NdArray {
        self.map(f64::sqrt)
    }

    pub fn abs(&self) -> NdArray {
        self.map(f64::abs)
    }
}

/// Elementwise `a + b`.
pub fn add(a: &NdArray, b: &NdArray) -> Result<NdArray> {
    a.add(b)
}

/// Elementwise `a - b`.
pub fn sub(a: &NdArray, b: &NdArray) -> Result<NdArray> {
    a.sub(b)
}

/// Elementwise `a * b`.
pub fn mul(a: &NdArray, b: &NdArray) -> Result<NdArray> {
    a.mul(b)
}

/// Elementwise `a / b`.
pub fn div(a: &NdArray, b: &NdArray) -> Result<NdArray> {
    a.div(b)
}

pub fn add_scalar(a: &NdArray, value: f64) -> NdArray {
    a.add_scalar(value)
}

pub fn sub_scalar(a: &NdArray, value: f64) -> NdArray {
    a.sub_scalar(value)
}

pub fn mul_scalar(a: &NdArray, value: f64) -> NdArray {
    a.mul_scalar(value)
}

pub fn div_scalar(a: &NdArray, value: f64) -> NdArray {
    a.div_scalar(value)
}

pub fn sin(a: &NdArray) -> NdArray {
    a.sin()
}

pub fn cos(a: &NdArray) -> NdArray {
    a.cos()
}

pub fn exp(a: &NdArray) -> NdArray {
    a.exp()
}

pub fn log(a: &NdArray) -> NdArray {
    a.log()
}

pub fn sqrt(a: &NdArray) -> NdArray {
    a.sqrt()
}

pub fn abs(a: &NdArray) -> NdArray {
    a.abs()
}

// Operator overloads cover only the array-scalar forms; array-array
// arithmetic goes through the fallible named methods.

impl Add<f64> for &NdArray {
    type Output = NdArray;

    fn add(self, rhs: f64) -> NdArray {
        self.add_scalar(rhs)
    }
}

impl Sub<f64> for &NdArray {
    type Output = NdArray;

    fn sub(self, rhs: f64) -> NdArray {
        self.sub_scalar(rhs)
    }
}

impl Mul<f64> for &NdArray {
    type Output = NdArray;

    fn mul(self, rhs: f64) -> NdArray {
        self.mul_scalar(rhs)
    }
}

impl Div<f64> for &NdArray {
    type Output = NdArray;

    fn div(self, rhs: f64) -> NdArray {
        self.div_scalar(rhs)
    }
}

impl Neg for &NdArray {
    type Output = NdArray;

    fn neg(self) -> NdArray {
        self.map(|x| -x)
    }
}
