//! Special operation traits
//!
//! Four calling conventions share one underlying computation:
//!
//! - [`UnaryComputerOp`]: write into a caller-supplied output
//! - [`UnaryFunctionOp`]: return a freshly created output
//! - [`UnaryInplaceOp`]: overwrite the argument
//! - [`UnaryHybridCF`]: computer that can also create its own output
//!
//! Resolved operations are handed out as reference-counted trait objects
//! ([`ComputerHandle`], [`FunctionHandle`], ...). A handle is resolved once
//! and invoked any number of times without further lookup.

use crate::descriptor::OpType;
use crate::error::OpError;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// Computes a result into an output the caller owns
pub trait UnaryComputerOp<I: ?Sized, O: ?Sized>: Send + Sync {
    /// Compute `output` from `input`
    ///
    /// Must not modify `input` and must not allocate a new output.
    fn compute(&self, input: &I, output: &mut O);
}

/// Computes and returns a new result
pub trait UnaryFunctionOp<I: ?Sized, O>: Send + Sync {
    /// Compute a new output from `input`
    fn calculate(&self, input: &I) -> O;
}

/// Mutates its argument
pub trait UnaryInplaceOp<A: ?Sized>: Send + Sync {
    /// Overwrite `arg` with the result
    fn mutate(&self, arg: &mut A);
}

/// Creates an output suitable for a given input
pub trait UnaryOutputFactory<I: ?Sized, O> {
    /// Allocate an output for `input`
    fn create_output(&self, input: &I) -> O;
}

/// Computer that can also act as a function
pub trait UnaryHybridCF<I: ?Sized, O>: UnaryComputerOp<I, O> + UnaryOutputFactory<I, O> {
    /// Function convention: create an output, compute into it, return it
    fn run(&self, input: &I) -> O {
        let mut output = self.create_output(input);
        self.compute(input, &mut output);
        output
    }
}

/// Resolved computer
pub type ComputerHandle<I, O> = Arc<dyn UnaryComputerOp<I, O>>;

/// Resolved function
pub type FunctionHandle<I, O> = Arc<dyn UnaryFunctionOp<I, O>>;

/// Resolved inplace op
pub type InplaceHandle<A> = Arc<dyn UnaryInplaceOp<A>>;

/// Resolved hybrid
pub type HybridHandle<I, O> = Arc<dyn UnaryHybridCF<I, O>>;

/// Resolved computer with types checked at call time
pub type ErasedComputerHandle = Arc<dyn ErasedComputer>;

/// Function view of a hybrid
pub(crate) struct FunctionView<H>(pub(crate) H);

impl<I, O, H> UnaryFunctionOp<I, O> for FunctionView<H>
where
    I: ?Sized,
    H: UnaryHybridCF<I, O>,
{
    #[inline]
    fn calculate(&self, input: &I) -> O {
        self.0.run(input)
    }
}

/// Computer whose input and output are checked at call time
///
/// This is the loosely typed path: the compiler cannot see what the op was
/// resolved for, so a wrong container only shows up when the op runs. It
/// reports the mismatch as [`OpError`] rather than touching the data.
pub trait ErasedComputer: Send + Sync {
    /// Type the op was resolved to read
    fn input_type(&self) -> OpType;

    /// Type the op was resolved to write
    fn output_type(&self) -> OpType;

    /// Compute `output` from `input` after checking both types
    ///
    /// # Errors
    /// Returns [`OpError::ArgumentMismatch`] if either value is not of the
    /// resolved type; nothing is written in that case
    fn compute_any(&self, input: &dyn Any, output: &mut dyn Any) -> Result<(), OpError>;
}

/// Erased view of a typed computer
pub(crate) struct ErasedView<I, O, C> {
    inner: C,
    _types: PhantomData<fn(&I, &mut O)>,
}

impl<I, O, C> ErasedView<I, O, C> {
    pub(crate) fn new(inner: C) -> Self {
        Self {
            inner,
            _types: PhantomData,
        }
    }
}

impl<I, O, C> ErasedComputer for ErasedView<I, O, C>
where
    I: 'static,
    O: 'static,
    C: UnaryComputerOp<I, O>,
{
    fn input_type(&self) -> OpType {
        OpType::of::<I>()
    }

    fn output_type(&self) -> OpType {
        OpType::of::<O>()
    }

    fn compute_any(&self, input: &dyn Any, output: &mut dyn Any) -> Result<(), OpError> {
        let input = input
            .downcast_ref::<I>()
            .ok_or_else(|| OpError::ArgumentMismatch {
                slot: "input",
                expected: OpType::of::<I>().short_name(),
            })?;
        let output = output
            .downcast_mut::<O>()
            .ok_or_else(|| OpError::ArgumentMismatch {
                slot: "output",
                expected: OpType::of::<O>().short_name(),
            })?;
        self.inner.compute(input, output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Double;

    impl UnaryComputerOp<i64, i64> for Double {
        fn compute(&self, input: &i64, output: &mut i64) {
            *output = input * 2;
        }
    }

    impl UnaryOutputFactory<i64, i64> for Double {
        fn create_output(&self, _input: &i64) -> i64 {
            0
        }
    }

    impl UnaryHybridCF<i64, i64> for Double {}

    #[test]
    fn hybrid_run_uses_created_output() {
        assert_eq!(Double.run(&21), 42);
    }

    #[test]
    fn function_view_matches_compute() {
        let function: FunctionHandle<i64, i64> = Arc::new(FunctionView(Double));
        let mut output = 0;
        Double.compute(&8, &mut output);
        assert_eq!(function.calculate(&8), output);
    }

    #[test]
    fn erased_accepts_resolved_types() {
        let erased: ErasedComputerHandle = Arc::new(ErasedView::<i64, i64, _>::new(Double));
        let input: i64 = 5;
        let mut output: i64 = 0;
        erased.compute_any(&input, &mut output).unwrap();
        assert_eq!(output, 10);
        assert_eq!(erased.input_type(), OpType::of::<i64>());
    }

    #[test]
    fn erased_rejects_wrong_input() {
        let erased = ErasedView::<i64, i64, _>::new(Double);
        let mut output: i64 = 7;
        let err = erased.compute_any(&"five", &mut output).unwrap_err();
        assert_eq!(
            err,
            OpError::ArgumentMismatch {
                slot: "input",
                expected: "i64".to_string()
            }
        );
        assert_eq!(output, 7);
    }

    #[test]
    fn erased_rejects_wrong_output() {
        let erased = ErasedView::<i64, i64, _>::new(Double);
        let mut output: u8 = 0;
        let err = erased.compute_any(&5_i64, &mut output).unwrap_err();
        assert!(matches!(err, OpError::ArgumentMismatch { slot: "output", .. }));
    }
}
