//! Testing utilities for the imgops workspace
//!
//! Shared fixtures and float assertions.

#![allow(missing_docs)]

use imgops_image::{DoubleType, Img, RealType};
use imgops_special::{ComputerHandle, Computers, OpArgs, OpKind, OpService};

/// Tolerance for comparing accumulated floating point results
pub const EPSILON: f64 = 1e-9;

pub fn setup_ops() -> OpService {
    OpService::with_defaults()
}

pub fn uniform_image(width: usize, height: usize, value: f64) -> Img<DoubleType> {
    Img::filled(width, height, DoubleType(value))
}

/// `x + y` at every pixel
pub fn ramp_image(width: usize, height: usize) -> Img<DoubleType> {
    Img::from_fn(width, height, |x, y| (x + y) as f64)
}

pub fn resolve_add(ops: &OpService, constant: f64) -> ComputerHandle<DoubleType, DoubleType> {
    Computers::unary::<DoubleType, DoubleType>(ops, OpKind::MathAdd, OpArgs::new().with(constant))
        .expect("built-in add should resolve")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= EPSILON * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

pub fn assert_all_equal<T: RealType>(image: &Img<T>, expected: T) {
    if let Some((index, value)) = image.iter().enumerate().find(|(_, v)| **v != expected) {
        panic!("sample {index} is {value}, expected {expected}");
    }
}
