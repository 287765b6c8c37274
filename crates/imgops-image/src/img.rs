//! Two-dimensional sample container
//!
//! # Memory Layout
//!
//! Samples are stored in a flat buffer in row-major order:
//!
//! ```text
//! data[y * width + x]
//! ```

use crate::real::{ByteType, DoubleType, RealType};
use std::fmt;

/// Errors raised by image construction and pixel access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImgError {
    /// Buffer length does not match `width * height`
    #[error("buffer of {actual} samples cannot back a {width}x{height} image")]
    LengthMismatch {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// `width * height` does not fit in `usize`
    #[error("image dimensions overflow: {width}x{height} samples do not fit in memory")]
    DimensionsOverflow {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// Coordinate outside the image
    #[error("pixel ({x}, {y}) is outside a {width}x{height} image")]
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Image width
        width: usize,
        /// Image height
        height: usize,
    },

    /// Two images were expected to have equal dimensions
    #[error("dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        /// Dimensions of the checked image
        left: (usize, usize),
        /// Dimensions of the other image
        right: (usize, usize),
    },
}

/// Number of samples in a `width` x `height` image
///
/// # Errors
/// Returns [`ImgError::DimensionsOverflow`] if the product overflows `usize`
fn sample_count(width: usize, height: usize) -> Result<usize, ImgError> {
    width
        .checked_mul(height)
        .ok_or(ImgError::DimensionsOverflow { width, height })
}

/// [`sample_count`] for the infallible constructors
fn checked_sample_count(width: usize, height: usize) -> usize {
    match sample_count(width, height) {
        Ok(count) => count,
        Err(err) => panic!("{err}"),
    }
}

/// Fixed-size 2-D image of [`RealType`] samples
#[derive(Clone, PartialEq)]
pub struct Img<T: RealType> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: RealType> Img<T> {
    /// Create a zero-filled image
    ///
    /// # Panics
    /// If `width * height` overflows `usize`
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Create an image with every sample set to `value`
    ///
    /// # Panics
    /// If `width * height` overflows `usize`
    #[must_use]
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; checked_sample_count(width, height)],
        }
    }

    /// Create an image whose samples are computed from their coordinates
    ///
    /// # Panics
    /// If `width * height` overflows `usize`
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(checked_sample_count(width, height));
        for y in 0..height {
            for x in 0..width {
                data.push(T::from_real(f(x, y)));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing row-major buffer
    ///
    /// # Errors
    /// Returns [`ImgError::DimensionsOverflow`] if `width * height` overflows
    /// `usize`, [`ImgError::LengthMismatch`] if `data.len() != width * height`
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, ImgError> {
        if data.len() != sample_count(width, height)? {
            return Err(ImgError::LengthMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of samples
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the image has no samples
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the sample at `(x, y)`
    ///
    /// # Errors
    /// Returns [`ImgError::OutOfBounds`] for coordinates outside the image
    pub fn get(&self, x: usize, y: usize) -> Result<T, ImgError> {
        let index = self.index_of(x, y)?;
        Ok(self.data[index])
    }

    /// Set the sample at `(x, y)`
    ///
    /// # Errors
    /// Returns [`ImgError::OutOfBounds`] for coordinates outside the image
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), ImgError> {
        let index = self.index_of(x, y)?;
        self.data[index] = value;
        Ok(())
    }

    /// Iterate samples in row-major order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate samples mutably in row-major order
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Borrow the underlying buffer
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Check whether `other` has the same width and height
    #[inline]
    #[must_use]
    pub fn same_dimensions<U: RealType>(&self, other: &Img<U>) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Require that `other` has the same width and height
    ///
    /// # Errors
    /// Returns [`ImgError::DimensionMismatch`] otherwise
    pub fn ensure_same_dimensions<U: RealType>(&self, other: &Img<U>) -> Result<(), ImgError> {
        if self.same_dimensions(other) {
            Ok(())
        } else {
            Err(ImgError::DimensionMismatch {
                left: self.dimensions(),
                right: other.dimensions(),
            })
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, ImgError> {
        if x >= self.width || y >= self.height {
            return Err(ImgError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}

impl<T: RealType> fmt::Debug for Img<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Img")
            .field("type", &T::TYPE_NAME)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl<'a, T: RealType> IntoIterator for &'a Img<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: RealType> IntoIterator for &'a mut Img<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Constructors for array-backed images of common sample types
#[derive(Debug, Clone, Copy)]
pub struct ArrayImgs;

impl ArrayImgs {
    /// Zero-filled image of [`DoubleType`]
    #[inline]
    #[must_use]
    pub fn doubles(width: usize, height: usize) -> Img<DoubleType> {
        Img::new(width, height)
    }

    /// Zero-filled image of [`ByteType`]
    #[inline]
    #[must_use]
    pub fn bytes(width: usize, height: usize) -> Img<ByteType> {
        Img::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_is_zero_filled() {
        let image = ArrayImgs::doubles(4, 3);
        assert_eq!(image.dimensions(), (4, 3));
        assert!(image.iter().all(|p| p.real() == 0.0));
    }

    #[test]
    fn filled_sets_every_sample() {
        let image = Img::filled(2, 2, ByteType(7));
        assert_eq!(image.as_slice(), &[ByteType(7); 4]);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Img::from_vec(2, 2, vec![DoubleType(1.0); 3]).unwrap_err();
        assert_eq!(
            err,
            ImgError::LengthMismatch {
                width: 2,
                height: 2,
                actual: 3
            }
        );
    }

    #[test]
    #[should_panic(expected = "image dimensions overflow")]
    fn new_panics_on_overflowing_dimensions() {
        let _ = ArrayImgs::doubles(usize::MAX, 2);
    }

    #[test]
    #[should_panic(expected = "image dimensions overflow")]
    fn from_fn_panics_on_overflowing_dimensions() {
        let _ = Img::<ByteType>::from_fn(2, usize::MAX / 2 + 1, |_, _| 0.0);
    }

    #[test]
    fn from_vec_rejects_overflowing_dimensions() {
        let err = Img::<DoubleType>::from_vec(usize::MAX, usize::MAX, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            ImgError::DimensionsOverflow {
                width: usize::MAX,
                height: usize::MAX
            }
        );
    }

    #[test]
    fn zero_width_never_overflows() {
        let image = Img::<DoubleType>::from_vec(0, usize::MAX, Vec::new()).unwrap();
        assert!(image.is_empty());
        assert!(image.get(0, 0).is_err());
    }

    #[test]
    fn get_and_set() {
        let mut image = ArrayImgs::doubles(3, 3);
        image.set(2, 1, DoubleType(4.0)).unwrap();
        assert_eq!(image.get(2, 1).unwrap(), DoubleType(4.0));
        assert_eq!(image.as_slice()[5], DoubleType(4.0));
    }

    #[test]
    fn out_of_bounds_access() {
        let mut image = ArrayImgs::bytes(2, 2);
        assert!(matches!(
            image.get(2, 0),
            Err(ImgError::OutOfBounds { x: 2, y: 0, .. })
        ));
        assert!(image.set(0, 5, ByteType(1)).is_err());
    }

    #[test]
    fn from_fn_clamps_bytes() {
        let image = Img::<ByteType>::from_fn(2, 1, |x, _| if x == 0 { -500.0 } else { 500.0 });
        assert_eq!(image.as_slice(), &[ByteType(i8::MIN), ByteType(i8::MAX)]);
    }

    #[test]
    fn dimension_checks() {
        let a = ArrayImgs::doubles(4, 4);
        let b = ArrayImgs::bytes(4, 4);
        let c = ArrayImgs::doubles(4, 5);

        assert!(a.same_dimensions(&b));
        assert!(a.ensure_same_dimensions(&b).is_ok());
        assert_eq!(
            a.ensure_same_dimensions(&c),
            Err(ImgError::DimensionMismatch {
                left: (4, 4),
                right: (4, 5)
            })
        );
    }

    #[test]
    fn empty_image() {
        let image = ArrayImgs::doubles(0, 10);
        assert!(image.is_empty());
        assert_eq!(image.iter().count(), 0);
    }

    #[test]
    fn iter_mut_writes_through() {
        let mut image = ArrayImgs::doubles(2, 2);
        for pixel in &mut image {
            pixel.set_real(3.0);
        }
        assert!((&image).into_iter().all(|p| p.get() == 3.0));
    }

    #[test]
    fn debug_omits_samples() {
        let image = ArrayImgs::doubles(2, 3);
        let debug = format!("{image:?}");
        assert!(debug.contains("DoubleType"));
        assert!(debug.contains("width: 2"));
    }
}
