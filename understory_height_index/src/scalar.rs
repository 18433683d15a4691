// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction used for tops, heights, and widths.
//!
//! This trait is intentionally small and only implemented for `f32` and `f64`.

use core::fmt::Debug;
use core::ops::{Add, Sub};

/// Scalar type used for item offsets and extents.
///
/// This is currently implemented for `f32` and `f64`. Values handed to a
/// [`HeightIndex`](crate::HeightIndex) are expected to be finite.
pub trait Scalar: Copy + PartialOrd + Debug + Add<Output = Self> + Sub<Output = Self> {
    /// Additive identity (typically `0.0`).
    fn zero() -> Self;

    /// Returns `true` if the value is finite (not NaN or infinite).
    fn is_finite(self) -> bool;

    /// Returns `true` if the value is negative, including `-0.0`.
    fn is_sign_negative(self) -> bool;

    /// Clamps negative values to zero.
    fn clamp_non_negative(self) -> Self {
        if self.is_sign_negative() {
            Self::zero()
        } else {
            self
        }
    }
}

impl Scalar for f32 {
    fn zero() -> Self {
        0.0
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.0
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }
}

/// Normalizes a caller-supplied height: finite in debug builds, never negative.
pub(crate) fn sanitize_height<S: Scalar>(height: S) -> S {
    debug_assert!(
        height.is_finite(),
        "HeightIndex heights must be finite; got {height:?}"
    );
    height.clamp_non_negative()
}
