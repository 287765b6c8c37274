//! Repeated application of an inner computer

use crate::descriptor::{OpArgs, OpKind};
use crate::error::ResolutionError;
use crate::op::{ComputerHandle, UnaryComputerOp, UnaryInplaceOp};

/// Applies an inner `A -> A` computer a fixed number of times
///
/// Each application reads the previous result. Zero iterations leave the
/// value untouched.
///
/// The inner computer cannot read and write the same value, so each call
/// clones one scratch `A` to ping-pong through. The computer form skips the
/// scratch when a single iteration can write straight into `output`. For
/// `Img<T>` the scratch is a heap allocation per call.
pub struct LoopOp<A> {
    inner: ComputerHandle<A, A>,
    iterations: usize,
}

impl<A: Clone + Send + Sync + 'static> LoopOp<A> {
    /// Wrap a resolved step op
    #[inline]
    #[must_use]
    pub fn new(inner: ComputerHandle<A, A>, iterations: usize) -> Self {
        Self { inner, iterations }
    }

    /// Build from resolution arguments `[ComputerHandle<A, A>, usize]`
    pub(crate) fn from_args(args: &OpArgs) -> Result<Self, ResolutionError> {
        let inner = args.require::<ComputerHandle<A, A>>(OpKind::Loop, 0)?;
        let iterations = *args.require::<usize>(OpKind::Loop, 1)?;
        Ok(Self::new(inner.clone(), iterations))
    }

    /// Number of applications
    #[inline]
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl<A: Clone + Send + Sync + 'static> UnaryInplaceOp<A> for LoopOp<A> {
    fn mutate(&self, arg: &mut A) {
        if self.iterations == 0 {
            return;
        }
        let mut scratch = arg.clone();
        for _ in 0..self.iterations {
            self.inner.compute(arg, &mut scratch);
            std::mem::swap(arg, &mut scratch);
        }
    }
}

impl<A: Clone + Send + Sync + 'static> UnaryComputerOp<A, A> for LoopOp<A> {
    fn compute(&self, input: &A, output: &mut A) {
        if self.iterations == 1 {
            self.inner.compute(input, output);
            return;
        }
        output.clone_from(input);
        self.mutate(output);
    }
}
