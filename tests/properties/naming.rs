//! Property tests for site-name normalization.

use proptest::prelude::*;

use silica::naming::normalize_site_name;

fn ascii_segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9]{1,8}").unwrap()
}

fn separator_run() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ \\-\\._()]{1,4}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalizing twice gives the same result as normalizing once.
    #[test]
    fn property_normalize_is_idempotent(name in "(?s).{0,64}") {
        let once = normalize_site_name(&name);
        let twice = normalize_site_name(&once);
        prop_assert_eq!(twice, once);
    }

    /// PROPERTY: Output stays inside [a-z0-9_], with no leading, trailing,
    /// or doubled underscore, for any input whatsoever.
    #[test]
    fn property_normalized_charset_is_closed(name in "(?s).{0,64}") {
        let normalized = normalize_site_name(&name);
        prop_assert!(
            normalized
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "unexpected character in {:?}",
            normalized
        );
        prop_assert!(!normalized.starts_with('_'), "leading underscore in {:?}", normalized);
        prop_assert!(!normalized.ends_with('_'), "trailing underscore in {:?}", normalized);
        prop_assert!(!normalized.contains("__"), "doubled underscore in {:?}", normalized);
    }

    /// PROPERTY: Runs of separator characters between segments collapse to
    /// exactly one underscore.
    #[test]
    fn property_separator_runs_collapse(
        first in ascii_segment(),
        rest in proptest::collection::vec((separator_run(), ascii_segment()), 0..4),
    ) {
        let mut raw = first.clone();
        let mut segments = vec![first];
        for (separator, segment) in rest {
            raw.push_str(&separator);
            raw.push_str(&segment);
            segments.push(segment);
        }

        prop_assert_eq!(normalize_site_name(&raw), segments.join("_"));
    }
}
