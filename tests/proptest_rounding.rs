use fdl::model::{Dimensions, Direction, Evenness, RoundStrategy, NO_ROUNDING};
use proptest::prelude::*;

mod proptest_helpers;

fn arb_value() -> impl Strategy<Value = f64> {
    (0u32..=10_000_000).prop_map(|v| v as f64 / 1000.0)
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn rounded_values_are_whole_and_close(
        w in arb_value(),
        h in arb_value(),
        rounding in proptest_helpers::arb_rounding(),
    ) {
        let rounded = rounding.round_dimensions(&Dimensions::new(w, h));

        for (value, original) in [(rounded.width, w), (rounded.height, h)] {
            prop_assert_eq!(value.fract(), 0.0);
            let tolerance = match rounding.evenness {
                Some(Evenness::Even) => 2.0,
                _ => 1.0,
            };
            prop_assert!((value - original).abs() <= tolerance);
            if rounding.evenness == Some(Evenness::Even) {
                prop_assert_eq!(value % 2.0, 0.0);
            }
        }
    }

    #[test]
    fn rounding_direction_is_respected(
        w in arb_value(),
        h in arb_value(),
        even in prop_oneof![Just(Evenness::Even), Just(Evenness::Whole)],
    ) {
        let dims = Dimensions::new(w, h);
        let up = RoundStrategy::new(even, Direction::Up).round_dimensions(&dims);
        let down = RoundStrategy::new(even, Direction::Down).round_dimensions(&dims);

        prop_assert!(up.width >= w && up.height >= h);
        prop_assert!(down.width <= w && down.height <= h);
    }

    #[test]
    fn rounding_is_idempotent(
        w in arb_value(),
        h in arb_value(),
        rounding in proptest_helpers::arb_rounding(),
    ) {
        let once = rounding.round_dimensions(&Dimensions::new(w, h));
        let twice = rounding.round_dimensions(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn no_rounding_is_identity(w in arb_value(), h in arb_value()) {
        let dims = Dimensions::new(w, h);
        prop_assert_eq!(NO_ROUNDING.round_dimensions(&dims), dims);
    }
}
