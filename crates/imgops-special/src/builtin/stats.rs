//! Whole-image statistics
//!
//! Each statistic is a hybrid `Img<T> -> DoubleType`.

use crate::op::{UnaryComputerOp, UnaryHybridCF, UnaryOutputFactory};
use imgops_image::{DoubleType, Img, RealType};

/// Arithmetic mean of all samples; `NaN` for an empty image
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

/// Largest sample; `NaN` for an empty image
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

/// Smallest sample; `NaN` for an empty image
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

/// Sum of all samples; `0` for an empty image
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

fn sum<T: RealType>(image: &Img<T>) -> f64 {
    image.iter().map(RealType::real).sum()
}

#[allow(clippy::cast_precision_loss)]
fn mean<T: RealType>(image: &Img<T>) -> f64 {
    if image.is_empty() {
        return f64::NAN;
    }
    sum(image) / image.len() as f64
}

fn extreme<T: RealType>(image: &Img<T>, pick: fn(f64, f64) -> f64) -> f64 {
    image
        .iter()
        .map(RealType::real)
        .reduce(pick)
        .unwrap_or(f64::NAN)
}

macro_rules! statistic {
    ($op:ty, $eval:expr) => {
        impl<T: RealType> UnaryComputerOp<Img<T>, DoubleType> for $op {
            #[inline]
            fn compute(&self, input: &Img<T>, output: &mut DoubleType) {
                let eval: fn(&Img<T>) -> f64 = $eval;
                output.0 = eval(input);
            }
        }

        impl<T: RealType> UnaryOutputFactory<Img<T>, DoubleType> for $op {
            #[inline]
            fn create_output(&self, _input: &Img<T>) -> DoubleType {
                DoubleType::default()
            }
        }

        impl<T: RealType> UnaryHybridCF<Img<T>, DoubleType> for $op {}
    };
}

statistic!(Mean, mean);
statistic!(Max, |image| extreme(image, f64::max));
statistic!(Min, |image| extreme(image, f64::min));
statistic!(Sum, sum);

#[cfg(test)]
mod tests {
    use super::*;
    use imgops_image::{ArrayImgs, ByteType};

    fn ramp() -> Img<DoubleType> {
        Img::from_fn(5, 2, |x, y| (x + 5 * y) as f64)
    }

    #[test]
    fn mean_of_ramp() {
        assert_eq!(Mean.run(&ramp()), DoubleType(4.5));
    }

    #[test]
    fn max_and_min_of_ramp() {
        assert_eq!(Max.run(&ramp()), DoubleType(9.0));
        assert_eq!(Min.run(&ramp()), DoubleType(0.0));
    }

    #[test]
    fn sum_of_ramp() {
        assert_eq!(Sum.run(&ramp()), DoubleType(45.0));
    }

    #[test]
    fn byte_statistics() {
        let image = Img::from_vec(3, 1, vec![ByteType(-4), ByteType(0), ByteType(10)]).unwrap();
        assert_eq!(Mean.run(&image), DoubleType(2.0));
        assert_eq!(Min.run(&image), DoubleType(-4.0));
        assert_eq!(Max.run(&image), DoubleType(10.0));
    }

    #[test]
    fn empty_image_statistics() {
        let empty = ArrayImgs::doubles(0, 0);
        assert!(Mean.run(&empty).0.is_nan());
        assert!(Max.run(&empty).0.is_nan());
        assert!(Min.run(&empty).0.is_nan());
        assert_eq!(Sum.run(&empty), DoubleType(0.0));
    }

    #[test]
    fn compute_overwrites_output() {
        let mut output = DoubleType(123.0);
        Mean.compute(&Img::filled(2, 2, DoubleType(1.0)), &mut output);
        assert_eq!(output, DoubleType(1.0));
    }
}
