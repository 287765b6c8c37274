//! imgops image containers
//!
//! Row-major bulk containers of real-valued samples.
//!
//! # Core Concepts
//!
//! - [`RealType`]: Sealed trait for per-pixel sample types
//! - [`DoubleType`]: 64-bit floating point sample
//! - [`ByteType`]: Signed 8-bit sample with saturating conversion
//! - [`Img<T>`]: Fixed-size 2-D container of samples
//! - [`ArrayImgs`]: Shorthand constructors for common sample types
//!
//! # Example
//!
//! ```rust
//! use imgops_image::{ArrayImgs, DoubleType, RealType};
//!
//! let mut image = ArrayImgs::doubles(4, 4);
//! for pixel in image.iter_mut() {
//!     pixel.set_real(2.5);
//! }
//! assert!(image.iter().all(|p| p.real() == 2.5));
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod img;
mod real;

pub use img::{ArrayImgs, Img, ImgError};
pub use real::{ByteType, DoubleType, RealType};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
