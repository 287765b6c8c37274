//! Lookup-per-call shortcuts
//!
//! Every method here resolves its operation, runs it once and drops it.
//! Convenient for one-off calls; for loops, resolve a handle instead.

use crate::descriptor::{OpArgs, OpKind};
use crate::error::ResolutionError;
use crate::service::OpService;
use imgops_image::{DoubleType, Img, RealType};

/// Math operations on an [`OpService`]
#[derive(Debug, Clone, Copy)]
pub struct MathNamespace<'a> {
    ops: &'a OpService,
}

impl<'a> MathNamespace<'a> {
    pub(crate) fn new(ops: &'a OpService) -> Self {
        Self { ops }
    }

    /// Write `input + constant` into `output`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no add is registered for `T`
    pub fn add<T: RealType>(
        &self,
        output: &mut T,
        input: &T,
        constant: f64,
    ) -> Result<(), ResolutionError> {
        let op = self
            .ops
            .resolve_computer::<T, T>(OpKind::MathAdd, &OpArgs::new().with(constant))?;
        op.compute(input, output);
        Ok(())
    }

    /// Return a new image holding `input + constant`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no image add is registered for `T`
    pub fn add_image<T: RealType>(
        &self,
        input: &Img<T>,
        constant: f64,
    ) -> Result<Img<T>, ResolutionError> {
        let op = self
            .ops
            .resolve_function::<Img<T>, Img<T>>(OpKind::MathAdd, &OpArgs::new().with(constant))?;
        Ok(op.calculate(input))
    }
}

/// Statistics on an [`OpService`]
#[derive(Debug, Clone, Copy)]
pub struct StatsNamespace<'a> {
    ops: &'a OpService,
}

impl<'a> StatsNamespace<'a> {
    pub(crate) fn new(ops: &'a OpService) -> Self {
        Self { ops }
    }

    /// Arithmetic mean; `NaN` for an empty image
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no mean is registered for `T`
    pub fn mean<T: RealType>(&self, image: &Img<T>) -> Result<DoubleType, ResolutionError> {
        self.statistic(OpKind::StatsMean, image)
    }

    /// Largest sample; `NaN` for an empty image
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no max is registered for `T`
    pub fn max<T: RealType>(&self, image: &Img<T>) -> Result<DoubleType, ResolutionError> {
        self.statistic(OpKind::StatsMax, image)
    }

    /// Smallest sample; `NaN` for an empty image
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no min is registered for `T`
    pub fn min<T: RealType>(&self, image: &Img<T>) -> Result<DoubleType, ResolutionError> {
        self.statistic(OpKind::StatsMin, image)
    }

    /// Sum of all samples; `0` for an empty image
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no sum is registered for `T`
    pub fn sum<T: RealType>(&self, image: &Img<T>) -> Result<DoubleType, ResolutionError> {
        self.statistic(OpKind::StatsSum, image)
    }

    fn statistic<T: RealType>(
        &self,
        kind: OpKind,
        image: &Img<T>,
    ) -> Result<DoubleType, ResolutionError> {
        let op = self
            .ops
            .resolve_function::<Img<T>, DoubleType>(kind, &OpArgs::new())?;
        Ok(op.calculate(image))
    }
}
