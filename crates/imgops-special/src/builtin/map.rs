//! Element-wise application of an inner computer

use crate::descriptor::{OpArgs, OpKind};
use crate::error::ResolutionError;
use crate::op::{ComputerHandle, UnaryComputerOp, UnaryHybridCF, UnaryOutputFactory};
use imgops_image::{Img, RealType};

/// Applies an inner `I -> O` computer to every sample of an image
pub struct MapComputer<I, O> {
    inner: ComputerHandle<I, O>,
}

impl<I: RealType, O: RealType> MapComputer<I, O> {
    /// Wrap a resolved element op
    #[inline]
    #[must_use]
    pub fn new(inner: ComputerHandle<I, O>) -> Self {
        Self { inner }
    }

    /// Build from resolution arguments `[ComputerHandle<I, O>]`
    pub(crate) fn from_args(args: &OpArgs) -> Result<Self, ResolutionError> {
        let inner = args.require::<ComputerHandle<I, O>>(OpKind::Map, 0)?;
        Ok(Self::new(inner.clone()))
    }
}

impl<I: RealType, O: RealType> UnaryComputerOp<Img<I>, Img<O>> for MapComputer<I, O> {
    /// # Panics
    /// If `input` and `output` differ in dimensions
    fn compute(&self, input: &Img<I>, output: &mut Img<O>) {
        assert!(
            input.same_dimensions(output),
            "map: input {:?} and output {:?} differ in dimensions",
            input.dimensions(),
            output.dimensions()
        );
        for (src, dst) in input.iter().zip(output.iter_mut()) {
            self.inner.compute(src, dst);
        }
    }
}

impl<I: RealType, O: RealType> UnaryOutputFactory<Img<I>, Img<O>> for MapComputer<I, O> {
    fn create_output(&self, input: &Img<I>) -> Img<O> {
        Img::new(input.width(), input.height())
    }
}

impl<I: RealType, O: RealType> UnaryHybridCF<Img<I>, Img<O>> for MapComputer<I, O> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::math::AddConstant;
    use imgops_image::{ByteType, DoubleType};
    use std::sync::Arc;

    struct ToByte;

    impl UnaryComputerOp<DoubleType, ByteType> for ToByte {
        fn compute(&self, input: &DoubleType, output: &mut ByteType) {
            *output = ByteType::from_real(input.0);
        }
    }

    #[test]
    fn map_adds_to_every_sample() {
        let add: ComputerHandle<DoubleType, DoubleType> =
            Arc::new(AddConstant::<DoubleType>::new(5.0).unwrap());
        let map = MapComputer::new(add);
        let input = Img::filled(4, 4, DoubleType(1.0));
        let mut output = Img::new(4, 4);
        map.compute(&input, &mut output);
        assert!(output.iter().all(|p| *p == DoubleType(6.0)));
        assert!(input.iter().all(|p| *p == DoubleType(1.0)));
    }

    #[test]
    fn map_can_change_sample_type() {
        let map = MapComputer::new(Arc::new(ToByte) as ComputerHandle<DoubleType, ByteType>);
        let input = Img::<DoubleType>::from_fn(3, 1, |x, _| x as f64 * 100.0);
        let output = map.run(&input);
        assert_eq!(
            output.as_slice(),
            &[ByteType(0), ByteType(100), ByteType(i8::MAX)]
        );
    }

    #[test]
    fn from_args_requires_handle() {
        let err = MapComputer::<DoubleType, DoubleType>::from_args(&OpArgs::new().with(5.0_f64))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ResolutionError::InvalidArgument {
                kind: OpKind::Map,
                ..
            }
        ));
    }

    #[test]
    #[should_panic(expected = "differ in dimensions")]
    fn map_rejects_mismatched_output() {
        let add: ComputerHandle<DoubleType, DoubleType> =
            Arc::new(AddConstant::<DoubleType>::new(5.0).unwrap());
        let mut output = Img::new(1, 1);
        MapComputer::new(add).compute(&Img::new(2, 2), &mut output);
    }
}
