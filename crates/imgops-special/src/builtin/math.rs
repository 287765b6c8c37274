//! Constant addition

use crate::descriptor::{OpArgs, OpKind};
use crate::error::ResolutionError;
use crate::op::{UnaryComputerOp, UnaryHybridCF, UnaryInplaceOp, UnaryOutputFactory};
use imgops_image::{Img, RealType};
use std::marker::PhantomData;

/// Adds a constant to a sample, or to every sample of an image
///
/// Results are clamped to the sample type's range.
#[derive(Debug, Clone, Copy)]
pub struct AddConstant<T> {
    constant: f64,
    _sample: PhantomData<fn() -> T>,
}

impl<T: RealType> AddConstant<T> {
    /// Create new add op
    ///
    /// # Errors
    /// Returns [`ResolutionError::InvalidArgument`] for a non-finite constant
    pub fn new(constant: f64) -> Result<Self, ResolutionError> {
        if !constant.is_finite() {
            return Err(ResolutionError::invalid_argument(
                OpKind::MathAdd,
                0,
                format!("constant must be finite, got {constant}"),
            ));
        }
        Ok(Self {
            constant,
            _sample: PhantomData,
        })
    }

    /// Build from resolution arguments `[f64]`
    pub(crate) fn from_args(args: &OpArgs) -> Result<Self, ResolutionError> {
        Self::new(*args.require::<f64>(OpKind::MathAdd, 0)?)
    }

    /// The constant being added
    #[inline]
    #[must_use]
    pub fn constant(&self) -> f64 {
        self.constant
    }

    #[inline]
    fn apply(&self, value: T) -> T {
        T::from_real(value.real() + self.constant)
    }
}

impl<T: RealType> UnaryComputerOp<T, T> for AddConstant<T> {
    #[inline]
    fn compute(&self, input: &T, output: &mut T) {
        *output = self.apply(*input);
    }
}

impl<T: RealType> UnaryInplaceOp<T> for AddConstant<T> {
    #[inline]
    fn mutate(&self, arg: &mut T) {
        *arg = self.apply(*arg);
    }
}

impl<T: RealType> UnaryComputerOp<Img<T>, Img<T>> for AddConstant<T> {
    /// # Panics
    /// If `input` and `output` differ in dimensions
    fn compute(&self, input: &Img<T>, output: &mut Img<T>) {
        assert!(
            input.same_dimensions(output),
            "math.add: input {:?} and output {:?} differ in dimensions",
            input.dimensions(),
            output.dimensions()
        );
        for (src, dst) in input.iter().zip(output.iter_mut()) {
            *dst = self.apply(*src);
        }
    }
}

impl<T: RealType> UnaryOutputFactory<Img<T>, Img<T>> for AddConstant<T> {
    fn create_output(&self, input: &Img<T>) -> Img<T> {
        Img::new(input.width(), input.height())
    }
}

impl<T: RealType> UnaryHybridCF<Img<T>, Img<T>> for AddConstant<T> {}
