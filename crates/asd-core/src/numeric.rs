use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// `lo < v < hi`. NaN is never inside.
#[inline]
pub fn in_open_interval(v: Real, lo: Real, hi: Real) -> bool {
    lo < v && v < hi
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

pub fn ensure_open_interval(
    v: Real,
    lo: Real,
    hi: Real,
    what: &'static str,
) -> Result<Real, CoreError> {
    if in_open_interval(v, lo, hi) {
        Ok(v)
    } else {
        Err(CoreError::OutOfRange {
            what,
            value: v,
            lo,
            hi,
        })
    }
}
