//! imgops special operations
//!
//! Resolve-once, invoke-many operation dispatch over image containers.
//!
//! # Core Concepts
//!
//! - [`OpService`]: Registry of candidates and resolver
//! - [`UnaryComputerOp`]: Writes into a caller-supplied output
//! - [`UnaryFunctionOp`]: Returns a new output
//! - [`UnaryInplaceOp`]: Mutates its argument
//! - [`UnaryHybridCF`]: Computer that can also act as a function
//! - [`Computers`], [`Functions`], [`Inplaces`], [`Hybrids`], [`RTs`], [`IIs`]:
//!   Typed resolution helpers
//!
//! # Example
//!
//! ```rust
//! use imgops_image::DoubleType;
//! use imgops_special::{OpArgs, OpKind, OpService, RTs, UnaryComputerOp, UnaryInplaceOp};
//!
//! let ops = OpService::with_defaults();
//! let mut value = DoubleType(10.0);
//!
//! // Resolve once...
//! let add5 = RTs::computer(&ops, OpKind::MathAdd, &value, OpArgs::new().with(5.0_f64))?;
//!
//! // ...and reuse, here as the body of a loop.
//! let add_loop = RTs::inplace(&ops, OpKind::Loop, &value, OpArgs::new().with(add5).with(4_usize))?;
//! add_loop.mutate(&mut value);
//! assert_eq!(value, DoubleType(30.0));
//! # Ok::<(), imgops_special::ResolutionError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod builtin;
mod descriptor;
mod error;
mod helpers;
mod namespace;
mod op;
mod service;

// Re-exports
pub use descriptor::{ArgTypes, OpArgs, OpDescriptor, OpKind, OpStyle, OpType};
pub use error::{OpError, ResolutionError};
pub use helpers::{Computers, Functions, Hybrids, IIs, Inplaces, RTs};
pub use namespace::{MathNamespace, StatsNamespace};
pub use op::{
    ComputerHandle, ErasedComputer, ErasedComputerHandle, FunctionHandle, HybridHandle,
    InplaceHandle, UnaryComputerOp, UnaryFunctionOp, UnaryHybridCF, UnaryInplaceOp,
    UnaryOutputFactory,
};
pub use service::{OpService, Priority};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use imgops_image::{ArrayImgs, DoubleType, Img};

    #[test]
    fn map_then_mean() {
        let ops = OpService::with_defaults();
        let image = Img::filled(8, 8, DoubleType(2.0));
        let mut output = ArrayImgs::doubles(8, 8);

        let add5 = Computers::unary::<DoubleType, DoubleType>(
            &ops,
            OpKind::MathAdd,
            OpArgs::new().with(5.0_f64),
        )
        .unwrap();
        let map = IIs::computer(&ops, OpKind::Map, &image, OpArgs::new().with(add5)).unwrap();
        map.compute(&image, &mut output);

        let mean = RTs::hybrid(&ops, OpKind::StatsMean, &image, OpArgs::new()).unwrap();
        assert_eq!(mean.run(&image), DoubleType(2.0));
        assert_eq!(mean.run(&output), DoubleType(7.0));
    }

    #[test]
    fn loop_over_resolved_image_add() {
        let ops = OpService::with_defaults();
        let mut image = Img::filled(2, 3, DoubleType(0.0));

        let step = IIs::computer(&ops, OpKind::MathAdd, &image, OpArgs::new().with(1.5_f64))
            .unwrap();
        let looped = Inplaces::unary::<Img<DoubleType>>(
            &ops,
            OpKind::Loop,
            OpArgs::new().with(step).with(2_usize),
        )
        .unwrap();
        looped.mutate(&mut image);
        assert!(image.iter().all(|p| *p == DoubleType(3.0)));
    }
}
