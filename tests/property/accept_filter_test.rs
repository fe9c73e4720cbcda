//! Property-based tests for turning `accept` attributes into dialog filters.

use kioskview::types::file_chooser::{accept_filters, mime_for_extension};
use proptest::prelude::*;

fn arb_accept_entry() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\.[a-zA-Z0-9]{1,6}",
        Just("image/*".to_string()),
        Just("video/*".to_string()),
        Just("application/pdf".to_string()),
        Just("text/csv".to_string()),
        "[a-z]{1,8}/[a-z]{1,8}",
        "[ ]{0,2}",
    ]
}

proptest! {
    #[test]
    fn at_most_one_filter_without_duplicates(accept in proptest::collection::vec(arb_accept_entry(), 0..8)) {
        let filters = accept_filters(&accept);
        prop_assert!(filters.len() <= 1);
        if let Some(filter) = filters.first() {
            prop_assert!(!filter.extensions.is_empty());
            let mut seen = filter.extensions.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), filter.extensions.len());
            for ext in &filter.extensions {
                prop_assert_eq!(ext, &ext.to_ascii_lowercase());
                prop_assert!(!ext.starts_with('.'));
            }
        }
    }

    #[test]
    fn dot_entries_always_included(ext in "[a-z0-9]{1,6}", extra in proptest::collection::vec(arb_accept_entry(), 0..4)) {
        let mut accept = extra;
        accept.push(format!(".{}", ext));
        let filters = accept_filters(&accept);
        prop_assert!(filters[0].extensions.contains(&ext));
    }

    #[test]
    fn known_mime_extensions_map_back_into_family(entry in prop_oneof![Just("image/*"), Just("video/*"), Just("audio/*")]) {
        let family = entry.trim_end_matches("/*");
        let filters = accept_filters(&[entry.to_string()]);
        for ext in &filters[0].extensions {
            let prefix = format!("{}/", family);
            prop_assert!(mime_for_extension(ext).starts_with(&prefix));
        }
    }
}
