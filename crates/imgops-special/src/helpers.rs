//! Typed resolution helpers
//!
//! Thin wrappers over [`OpService`] that fix the handle types at the call
//! site. [`Computers`], [`Functions`], [`Inplaces`] and [`Hybrids`] take the
//! types as generic parameters; [`RTs`] and [`IIs`] infer them from sample
//! values, which is handy when the types are long.
//!
//! ```rust
//! use imgops_image::DoubleType;
//! use imgops_special::{Computers, OpArgs, OpKind, OpService, UnaryComputerOp};
//!
//! let ops = OpService::with_defaults();
//! let add5 = Computers::unary::<DoubleType, DoubleType>(
//!     &ops,
//!     OpKind::MathAdd,
//!     OpArgs::new().with(5.0_f64),
//! )?;
//!
//! let mut out = DoubleType::default();
//! add5.compute(&DoubleType(10.0), &mut out);
//! assert_eq!(out, DoubleType(15.0));
//! # Ok::<(), imgops_special::ResolutionError>(())
//! ```

use crate::descriptor::{OpArgs, OpKind, OpType};
use crate::error::ResolutionError;
use crate::op::{ComputerHandle, ErasedComputerHandle, FunctionHandle, HybridHandle, InplaceHandle};
use crate::service::OpService;
use imgops_image::{DoubleType, Img, RealType};

/// Computer resolution
#[derive(Debug, Clone, Copy)]
pub struct Computers;

impl Computers {
    /// Resolve a computer `I -> O`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn unary<I: 'static, O: 'static>(
        ops: &OpService,
        kind: OpKind,
        args: OpArgs,
    ) -> Result<ComputerHandle<I, O>, ResolutionError> {
        ops.resolve_computer(kind, &args)
    }

    /// Resolve a computer whose types are taken from sample values
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn unary_like<I: 'static, O: 'static>(
        ops: &OpService,
        kind: OpKind,
        _output: &O,
        _input: &I,
        args: OpArgs,
    ) -> Result<ComputerHandle<I, O>, ResolutionError> {
        ops.resolve_computer(kind, &args)
    }

    /// Resolve a computer from runtime type descriptions
    ///
    /// Nothing ties the handle to Rust types; a wrong container is only
    /// detected when the op runs. Prefer [`Computers::unary`].
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn raw(
        ops: &OpService,
        kind: OpKind,
        output: OpType,
        input: OpType,
        args: OpArgs,
    ) -> Result<ErasedComputerHandle, ResolutionError> {
        ops.resolve_erased(kind, input, output, &args)
    }
}

/// Function resolution
#[derive(Debug, Clone, Copy)]
pub struct Functions;

impl Functions {
    /// Resolve a function `I -> O`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn unary<I: 'static, O: 'static>(
        ops: &OpService,
        kind: OpKind,
        args: OpArgs,
    ) -> Result<FunctionHandle<I, O>, ResolutionError> {
        ops.resolve_function(kind, &args)
    }
}

/// Inplace resolution
#[derive(Debug, Clone, Copy)]
pub struct Inplaces;

impl Inplaces {
    /// Resolve an inplace op on `A`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn unary<A: 'static>(
        ops: &OpService,
        kind: OpKind,
        args: OpArgs,
    ) -> Result<InplaceHandle<A>, ResolutionError> {
        ops.resolve_inplace(kind, &args)
    }
}

/// Hybrid resolution
#[derive(Debug, Clone, Copy)]
pub struct Hybrids;

impl Hybrids {
    /// Resolve a hybrid `I -> O`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn unary_cf<I: 'static, O: 'static>(
        ops: &OpService,
        kind: OpKind,
        args: OpArgs,
    ) -> Result<HybridHandle<I, O>, ResolutionError> {
        ops.resolve_hybrid(kind, &args)
    }
}

/// Helpers for ops whose output is a real-valued sample
#[derive(Debug, Clone, Copy)]
pub struct RTs;

impl RTs {
    /// Resolve a function `Img<T> -> DoubleType`, e.g. a statistic
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn function<T: RealType>(
        ops: &OpService,
        kind: OpKind,
        _input: &Img<T>,
        args: OpArgs,
    ) -> Result<FunctionHandle<Img<T>, DoubleType>, ResolutionError> {
        ops.resolve_function(kind, &args)
    }

    /// Resolve a hybrid `Img<T> -> DoubleType`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn hybrid<T: RealType>(
        ops: &OpService,
        kind: OpKind,
        _input: &Img<T>,
        args: OpArgs,
    ) -> Result<HybridHandle<Img<T>, DoubleType>, ResolutionError> {
        ops.resolve_hybrid(kind, &args)
    }

    /// Resolve a computer `T -> T` on a single sample
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn computer<T: RealType>(
        ops: &OpService,
        kind: OpKind,
        _input: &T,
        args: OpArgs,
    ) -> Result<ComputerHandle<T, T>, ResolutionError> {
        ops.resolve_computer(kind, &args)
    }

    /// Resolve an inplace op on a single sample
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn inplace<T: RealType>(
        ops: &OpService,
        kind: OpKind,
        _arg: &T,
        args: OpArgs,
    ) -> Result<InplaceHandle<T>, ResolutionError> {
        ops.resolve_inplace(kind, &args)
    }
}

/// Helpers for ops whose output is an image
#[derive(Debug, Clone, Copy)]
pub struct IIs;

impl IIs {
    /// Resolve a computer `Img<T> -> Img<T>`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn computer<T: RealType>(
        ops: &OpService,
        kind: OpKind,
        _input: &Img<T>,
        args: OpArgs,
    ) -> Result<ComputerHandle<Img<T>, Img<T>>, ResolutionError> {
        ops.resolve_computer(kind, &args)
    }

    /// Resolve a function `Img<T> -> Img<T>`
    ///
    /// # Errors
    /// Returns [`ResolutionError`] if no candidate fits
    pub fn function<T: RealType>(
        ops: &OpService,
        kind: OpKind,
        _input: &Img<T>,
        args: OpArgs,
    ) -> Result<FunctionHandle<Img<T>, Img<T>>, ResolutionError> {
        ops.resolve_function(kind, &args)
    }
}
