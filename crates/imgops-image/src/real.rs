//! Real-valued sample types
//!
//! Every pixel of an [`Img`](crate::Img) is a [`RealType`]. The trait is sealed
//! so operation candidates can be registered for a closed set of types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sealed trait to prevent external implementations
pub(crate) mod private {
    pub trait Sealed {}
}

/// Trait for per-pixel sample types
///
/// # Contract
/// - `from_real` and `set_real` clamp to `MIN_VALUE..=MAX_VALUE`
/// - `real` is lossless for every representable value
/// - `Default` is zero
pub trait RealType:
    Copy + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static + private::Sealed
{
    /// Short type name used in operation signatures
    const TYPE_NAME: &'static str;

    /// Smallest representable value
    const MIN_VALUE: f64;

    /// Largest representable value
    const MAX_VALUE: f64;

    /// Create a sample from a real value, clamping to the type's range
    fn from_real(value: f64) -> Self;

    /// Get the sample as a real value
    fn real(&self) -> f64;

    /// Overwrite the sample with a real value, clamping to the type's range
    #[inline]
    fn set_real(&mut self, value: f64) {
        *self = Self::from_real(value);
    }
}

/// 64-bit floating point sample
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoubleType(pub f64);

impl DoubleType {
    /// Create new sample
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the wrapped value
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl private::Sealed for DoubleType {}

impl RealType for DoubleType {
    const TYPE_NAME: &'static str = "DoubleType";
    const MIN_VALUE: f64 = f64::MIN;
    const MAX_VALUE: f64 = f64::MAX;

    #[inline]
    fn from_real(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    fn real(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for DoubleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep a trailing ".0" on whole numbers: 15 prints as "15.0".
        write!(f, "{:?}", self.0)
    }
}

impl From<f64> for DoubleType {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Signed 8-bit sample
///
/// Conversions from real values round to nearest and saturate at
/// `i8::MIN..=i8::MAX`. `NaN` converts to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteType(pub i8);

impl ByteType {
    /// Create new sample
    #[inline]
    #[must_use]
    pub const fn new(value: i8) -> Self {
        Self(value)
    }

    /// Get the wrapped value
    #[inline]
    #[must_use]
    pub const fn get(self) -> i8 {
        self.0
    }
}

impl private::Sealed for ByteType {}

impl RealType for ByteType {
    const TYPE_NAME: &'static str = "ByteType";
    const MIN_VALUE: f64 = i8::MIN as f64;
    const MAX_VALUE: f64 = i8::MAX as f64;

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from_real(value: f64) -> Self {
        if value.is_nan() {
            return Self(0);
        }
        // Float-to-int `as` saturates; clamp first so the intent is explicit.
        Self(value.round().clamp(Self::MIN_VALUE, Self::MAX_VALUE) as i8)
    }

    #[inline]
    fn real(&self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for ByteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i8> for ByteType {
    fn from(value: i8) -> Self {
        Self(value)
    }
}
