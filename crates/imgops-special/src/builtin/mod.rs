//! Built-in operations
//!
//! Registered by [`OpService::with_defaults`] for every sample type:
//!
//! | kind | style | signature |
//! |------|-------|-----------|
//! | `math.add` | computer, inplace | `T`, `f64` |
//! | `math.add` | hybrid | `Img<T> -> Img<T>`, `f64` |
//! | `stats.*` | hybrid | `Img<T> -> DoubleType` |
//! | `map` | hybrid | `Img<T> -> Img<T>`, `ComputerHandle<T, T>` |
//! | `loop` | inplace, computer | `T` and `Img<T>`, `ComputerHandle<A, A>`, `usize` |

mod looping;
mod map;
mod math;
mod stats;

pub use looping::LoopOp;
pub use map::MapComputer;
pub use math::AddConstant;
pub use stats::{Max, Mean, Min, Sum};

use crate::descriptor::{OpKind, OpType};
use crate::op::{ComputerHandle, UnaryHybridCF};
use crate::service::{OpService, Priority};
use imgops_image::{ByteType, DoubleType, Img, RealType};

pub(crate) fn register_defaults(service: &mut OpService) {
    register_sample_type::<DoubleType>(service);
    register_sample_type::<ByteType>(service);
}

fn register_sample_type<T: RealType>(service: &mut OpService) {
    let constant = [OpType::of::<f64>()];

    service.register_computer::<T, T, _, _>(
        OpKind::MathAdd,
        constant,
        Priority::NORMAL,
        AddConstant::<T>::from_args,
    );
    service.register_inplace::<T, _, _>(
        OpKind::MathAdd,
        constant,
        Priority::NORMAL,
        AddConstant::<T>::from_args,
    );
    service.register_hybrid::<Img<T>, Img<T>, _, _>(
        OpKind::MathAdd,
        constant,
        Priority::NORMAL,
        AddConstant::<T>::from_args,
    );

    register_statistic::<T, _>(service, OpKind::StatsMean, Mean);
    register_statistic::<T, _>(service, OpKind::StatsMax, Max);
    register_statistic::<T, _>(service, OpKind::StatsMin, Min);
    register_statistic::<T, _>(service, OpKind::StatsSum, Sum);

    service.register_hybrid::<Img<T>, Img<T>, _, _>(
        OpKind::Map,
        [OpType::of::<ComputerHandle<T, T>>()],
        Priority::NORMAL,
        MapComputer::<T, T>::from_args,
    );

    register_loop::<T>(service);
    register_loop::<Img<T>>(service);
}

fn register_statistic<T, S>(service: &mut OpService, kind: OpKind, statistic: S)
where
    T: RealType,
    S: UnaryHybridCF<Img<T>, DoubleType> + Copy + 'static,
{
    service.register_hybrid::<Img<T>, DoubleType, _, _>(kind, [], Priority::NORMAL, move |_| {
        Ok(statistic)
    });
}

fn register_loop<A: Clone + Send + Sync + 'static>(service: &mut OpService) {
    let args = [OpType::of::<ComputerHandle<A, A>>(), OpType::of::<usize>()];
    service.register_inplace::<A, _, _>(
        OpKind::Loop,
        args,
        Priority::NORMAL,
        LoopOp::<A>::from_args,
    );
    service.register_computer::<A, A, _, _>(
        OpKind::Loop,
        args,
        Priority::NORMAL,
        LoopOp::<A>::from_args,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::OpStyle;

    #[test]
    fn candidate_counts_per_kind() {
        let service = OpService::with_defaults();
        // Two sample types each.
        assert_eq!(service.candidates(OpKind::MathAdd).count(), 6);
        assert_eq!(service.candidates(OpKind::StatsMax).count(), 2);
        assert_eq!(service.candidates(OpKind::Map).count(), 2);
        assert_eq!(service.candidates(OpKind::Loop).count(), 8);
    }

    #[test]
    fn add_candidates_cover_three_styles() {
        let service = OpService::with_defaults();
        let styles: Vec<OpStyle> = service
            .candidates(OpKind::MathAdd)
            .take(3)
            .map(|d| d.style())
            .collect();
        assert_eq!(styles, vec![OpStyle::Computer, OpStyle::Inplace, OpStyle::Hybrid]);
    }
}
