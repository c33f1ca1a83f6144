use fdl::io::{read_from_string, write_to_string};
use fdl::model::Record;
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn fdl_json_roundtrip_is_lossless(fdl in proptest_helpers::arb_fdl(4, 4, 3)) {
        let json = write_to_string(&fdl, true, Some(2)).expect("serialize fdl");
        let restored = read_from_string(&json, true).expect("parse fdl");

        prop_assert_eq!(fdl, restored);
    }

    #[test]
    fn fdl_json_roundtrip_is_idempotent(fdl in proptest_helpers::arb_fdl(4, 4, 3)) {
        let first_json = write_to_string(&fdl, false, None).expect("serialize first pass");
        let first = read_from_string(&first_json, false).expect("parse first pass");

        let second_json = write_to_string(&first, false, None).expect("serialize second pass");
        prop_assert_eq!(first_json, second_json);
    }

    #[test]
    fn mapping_keys_follow_field_order(fdl in proptest_helpers::arb_fdl(2, 2, 2)) {
        let mapping = fdl.to_mapping().expect("to mapping");
        let keys: Vec<&str> = mapping.keys().map(String::as_str).collect();
        let order = fdl::Fdl::enumerated_fields();

        let positions: Vec<usize> = keys
            .iter()
            .map(|k| order.iter().position(|f| f == k).expect("known key"))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
