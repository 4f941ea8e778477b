//! Property tests for field extraction
//!
//! Every extracted span must slice back to its token, and repeated runs over
//! the same input must produce identical records.

use esdc_core::dataname::crid::{self, CridPatterns};
use esdc_core::dataname::datetime::{DateTimeExtractor, DateTimePatterns};
use esdc_core::dataname::extract::extract_fields;
use esdc_core::dataname::IsoLadder;
use proptest::prelude::*;

const DATE: &str = "(19|20)[0-9]{2}(0[1-9]|1[0-2])(0[1-9]|[12][0-9]|3[01])";
const TIME: &str = "T([01][0-9]|2[0-3])[0-5][0-9][0-5][0-9]Z";

fn granule_name() -> impl Strategy<Value = String> {
    (
        "[A-Za-z0-9é_-]{0,12}",
        DATE,
        proptest::option::of(TIME),
        "[A-Za-z0-9_-]{0,10}",
        proptest::option::of(DATE),
        "(\\.h5|\\.nc|\\.he5)?",
    )
        .prop_map(|(prefix, date, time, middle, second, ext)| {
            format!(
                "{}_{}{}_{}{}{}",
                prefix,
                date,
                time.unwrap_or_default(),
                middle,
                second.map(|d| format!("_{}", d)).unwrap_or_default(),
                ext
            )
        })
}

proptest! {
    #[test]
    fn prop_detected_spans_slice_to_tokens(name in granule_name()) {
        let extractor = DateTimeExtractor::new(IsoLadder::standard().unwrap());
        let info = extractor.validate(&name, &DateTimePatterns::default());

        prop_assert!(info.error.is_none());
        prop_assert!(!info.temporal_extent.is_empty());
        for field in info.temporal_extent.iter().chain(&info.date_time_fields) {
            prop_assert_eq!(&name[field.start..field.end], field.token.as_str());
        }
    }

    #[test]
    fn prop_pattern_spans_slice_to_tokens(
        name in "[a-z0-9é_.-]{0,40}",
        pattern in prop::sample::select(vec![r"\d+", r"[a-z]+_", r"é\d?", r"\.[a-z]+"]),
    ) {
        let fields = extract_fields(pattern, &[], &name).unwrap();
        for field in &fields {
            prop_assert_eq!(&name[field.start..field.end], field.token.as_str());
        }
    }

    #[test]
    fn prop_validation_is_idempotent(name in granule_name()) {
        let extractor = DateTimeExtractor::new(IsoLadder::standard().unwrap());
        let patterns = DateTimePatterns::default();
        let first = serde_json::to_string(&extractor.validate(&name, &patterns)).unwrap();
        let second = serde_json::to_string(&extractor.validate(&name, &patterns)).unwrap();
        prop_assert_eq!(first, second);

        let crid_patterns = CridPatterns {
            crid: Some(r"\d{8}".to_string()),
            major: Some(r"(?P<major>\d{4})".to_string()),
            minor: Some(r"\d{4}(?P<minor>\d{2})".to_string()),
            patch: Some(r"(?P<patch>\d{2})$".to_string()),
            ..Default::default()
        };
        prop_assert_eq!(crid::validate(&name, &crid_patterns), crid::validate(&name, &crid_patterns));
    }
}
