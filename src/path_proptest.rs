//! Property-based tests for path manipulation functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{normalize_path, raw_content_url, relative_to};
    use proptest::prelude::*;
    use std::path::PathBuf;

    // ============================================================================
    // normalize_path property tests
    // ============================================================================

    proptest! {
        /// Property: normalize_path never leaves a platform separator behind
        #[test]
        fn normalize_path_has_no_platform_separator(input in ".*") {
            let result = normalize_path(&input);
            if std::path::MAIN_SEPARATOR != '/' {
                prop_assert!(!result.contains(std::path::MAIN_SEPARATOR));
            }
        }

        /// Property: normalize_path is idempotent
        #[test]
        fn normalize_path_is_idempotent(input in ".*") {
            let once = normalize_path(&input);
            let twice = normalize_path(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: forward-slash paths pass through unchanged
        #[test]
        fn normalize_path_preserves_forward_slash_paths(input in "[a-zA-Z0-9._-]+(/[a-zA-Z0-9._-]+)*") {
            prop_assert_eq!(normalize_path(&input), input);
        }
    }

    // ============================================================================
    // raw_content_url property tests
    // ============================================================================

    proptest! {
        /// Property: every file path segment becomes exactly one URL segment
        #[test]
        fn raw_content_url_keeps_segment_count(
            git_ref in "[a-zA-Z0-9][a-zA-Z0-9./ _-]{0,19}",
            segments in prop::collection::vec("[a-zA-Z0-9][a-zA-Z0-9 #?%._-]{0,11}", 1..5),
        ) {
            let path = segments.join("/");
            let url = raw_content_url("acme/template", &git_ref, &path).unwrap();
            let url_segments: Vec<_> = url.path_segments().unwrap().collect();
            // owner + repo + ref + path segments
            prop_assert_eq!(url_segments.len(), 3 + segments.len());
        }

        /// Property: URLs always target the raw content host over HTTPS
        #[test]
        fn raw_content_url_targets_raw_host(path in "[a-zA-Z0-9._-]{1,20}") {
            let url = raw_content_url("acme/template", "main", &path).unwrap();
            prop_assert_eq!(url.scheme(), "https");
            prop_assert_eq!(url.host_str(), Some("raw.githubusercontent.com"));
            prop_assert!(url.query().is_none());
            prop_assert!(url.fragment().is_none());
        }
    }

    // ============================================================================
    // relative_to property tests
    // ============================================================================

    proptest! {
        /// Property: a path below the base is expressed without `..`
        #[test]
        fn relative_to_descendant_is_suffix(
            base in prop::collection::vec("[a-z]{1,8}", 0..4),
            rest in prop::collection::vec("[a-z]{1,8}", 1..4),
        ) {
            let mut base_path = PathBuf::from("/");
            for part in &base {
                base_path.push(part);
            }
            let mut target = base_path.clone();
            for part in &rest {
                target.push(part);
            }
            prop_assert_eq!(relative_to(&base_path, &target), rest.join("/"));
        }
    }
}
