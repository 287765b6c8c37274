//! Property tests for image containers

use imgops_image::{ByteType, DoubleType, Img, RealType};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_from_fn_matches_get(
        width in 1..16usize,
        height in 1..16usize,
    ) {
        let image = Img::<DoubleType>::from_fn(width, height, |x, y| (x * 31 + y) as f64);
        for y in 0..height {
            for x in 0..width {
                prop_assert_eq!(image.get(x, y).unwrap().real(), (x * 31 + y) as f64);
            }
        }
    }

    #[test]
    fn prop_byte_conversion_stays_in_range(value in proptest::num::f64::ANY) {
        let byte = ByteType::from_real(value);
        prop_assert!(byte.real() >= ByteType::MIN_VALUE);
        prop_assert!(byte.real() <= ByteType::MAX_VALUE);
    }

    #[test]
    fn prop_byte_roundtrip_for_representable(value in any::<i8>()) {
        prop_assert_eq!(ByteType::from_real(f64::from(value)), ByteType(value));
    }
}
