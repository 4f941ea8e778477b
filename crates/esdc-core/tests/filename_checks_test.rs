//! Integration tests for the filename checks
//!
//! These tests run the public entry points end to end on realistic granule
//! names and check the JSON shape handed to report consumers.

use esdc_core::collection::validate_extension_collection;
use esdc_core::dataname::crid::{self, CridPatterns};
use esdc_core::dataname::datetime::{DateTimeExtractor, DateTimePatterns};
use esdc_core::dataname::uniqueness::{self, find_duplicates, UniquenessPatterns};
use esdc_core::dataname::{extension, iso8601, IsoLadder};
use esdc_core::provider::SignatureProvider;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const SMAP: &str = "/data/SMAP/SMAP_L4_SM_gph_20200915T193000_Vv5014_001.h5";
const DEEP_BLUE: &str = "/data/DeepBlue-SeaWiFS_L2_20101210T135954Z_v004-20130525T172725Z.h5";

fn smap_patterns() -> CridPatterns {
    CridPatterns {
        crid: Some(r"Vv\d+_\d+".to_string()),
        major: Some(r"v(?P<major>\d+)".to_string()),
        minor: Some(r"_(?P<minor>\d+)$".to_string()),
        patch: Some(r"p(?P<patch>\d+)".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_smap_crid_end_to_end() {
    let record = crid::validate(SMAP, &smap_patterns());

    let p = &record.partition;
    assert_eq!(p.crid.as_deref(), Some("Vv5014_001"));
    assert_eq!(p.major.as_deref(), Some("5014"));
    assert_eq!(p.minor.as_deref(), Some("001"));
    assert_eq!(p.patch.as_deref(), Some(""));

    let valid = record.valid.as_ref().unwrap();
    assert_eq!(valid.status, Some(false));
    assert!(valid.message.contains("Missing patch."));
    assert!(record.is_failure());

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["dataset_name"], SMAP);
    assert_eq!(json["valid"]["skip"], false);
    assert_eq!(json["valid"]["status"], false);
    assert!(json.get("error").is_none());
}

#[test]
fn test_crid_order_invariant() {
    let patterns = CridPatterns {
        crid: Some(r"Vv\d+_\d+_\d+".to_string()),
        major: Some(r"(?P<major>v\d+)".to_string()),
        minor: Some(r"_(?P<minor>001)".to_string()),
        patch: Some(r"_(?P<patch>002)".to_string()),
        ..Default::default()
    };

    let record = crid::validate("SAT_Vv5014_001_002.h5", &patterns);
    assert_eq!(record.valid.unwrap().status, Some(true));

    let record = crid::validate("SAT_Vv5014_002_001.h5", &patterns);
    let valid = record.valid.unwrap();
    assert_eq!(valid.status, Some(false));
    assert!(valid.message.contains("Incorrect order of major, minor, and patch in CRID."));
}

#[test]
fn test_deep_blue_datetime_end_to_end() {
    let extractor = DateTimeExtractor::new(IsoLadder::standard().unwrap());
    let info = extractor.validate(DEEP_BLUE, &DateTimePatterns::default());

    assert_eq!(info.temporal_begin().unwrap().token, "20101210T135954Z");
    assert_eq!(info.date_time_fields[0].token, "20130525T172725Z");
    let valid = info.valid.as_ref().unwrap();
    assert_eq!(valid.fields_order, Some(true));
    assert_eq!(valid.overall, Some(true));

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["temporal_extent"][0]["field_name"], "temporal_begin");
    assert_eq!(json["temporal_extent"][0]["start"], 20);
    assert_eq!(json["temporal_extent"][0]["iso"], true);
    assert_eq!(json["date_time_fields"][0]["start"], 42);
}

#[test]
fn test_iso_date_time_separator() {
    let dt = iso8601::parse("20101210_123000").unwrap();
    assert_eq!(dt.to_rfc3339(), "2010-12-10T12:30:00+00:00");
    assert!(iso8601::parse("2010T12").is_err());
    assert!(iso8601::parse("2010-12T12").is_err());

    let extractor = DateTimeExtractor::new(IsoLadder::standard().unwrap());
    let patterns = DateTimePatterns {
        datetime_fields: Some(r"\d{8}_\d{6}++_(?P<t>\d{4}T\d{2})\.nc".to_string()),
        datetime_fields_groups: Some(";t".to_string()),
        ..Default::default()
    };
    let info = extractor.validate("GRAN_20101209T000000Z_20101210_123000_2010T12.nc", &patterns);

    let tokens: Vec<_> = info.date_time_fields.iter().map(|f| f.token.as_str()).collect();
    assert_eq!(tokens, vec!["20101210_123000", "2010T12"]);
    assert_eq!(info.date_time_fields[0].iso, Some(true));
    assert_eq!(info.date_time_fields[1].iso, Some(false));
    assert_eq!(info.valid.as_ref().unwrap().iso, Some(false));
}

#[test]
fn test_ladder_first_match_is_finest_level() {
    let ladder = IsoLadder::standard().unwrap();
    let (level, _) = ladder.first_matching("SAT_20230615T120000Z_extra").unwrap();
    assert_eq!(ladder.levels()[level].label, "YYYYMMDDThhmmssZ");

    let extractor = DateTimeExtractor::new(ladder);
    let info = extractor.extract("SAT_20230615T120000Z_extra", &DateTimePatterns::default());
    assert_eq!(info.temporal_begin().unwrap().token, "20230615T120000Z");
}

#[test]
fn test_legacy_ladder_falls_back_on_zero_minutes() {
    let extractor = DateTimeExtractor::new(IsoLadder::legacy().unwrap());
    let info = extractor.extract("SAT_20230615T120000Z_extra", &DateTimePatterns::default());
    assert_eq!(info.temporal_begin().unwrap().token, "20230615");
}

#[test]
fn test_skip_never_reports_failure() {
    let extractor = DateTimeExtractor::new(IsoLadder::standard().unwrap());
    for name in ["granule.h5", "MOD09_20200101.hdf", ""] {
        let info = extractor.validate(name, &DateTimePatterns::default());
        let valid = info.valid.as_ref().unwrap();
        assert!(valid.skip);
        assert!(valid.overall.is_none());
        assert!(!info.is_failure());
    }

    let mut patterns = smap_patterns();
    patterns.major = None;
    let record = crid::validate(SMAP, &patterns);
    assert!(record.valid.as_ref().unwrap().skip);
    assert!(!record.is_failure());
}

#[test]
fn test_duplicate_report_is_complete() {
    let records: Vec<_> = ["A_v1.h5", "B_v1.h5", "A_v1.h5"]
        .iter()
        .map(|name| uniqueness::partition(name, &UniquenessPatterns::default()))
        .collect();

    let dups = find_duplicates(records);
    assert_eq!(dups.len(), 2);
    assert!(dups.iter().all(|r| r.partition.filename == "A_v1.h5"));
}

#[test]
fn test_qualified_dataset_name_uses_basename() {
    let name = r#"NETCDF:"/data/SMAP_L4_SM_gph_20200915T193000_Vv5014_001.nc":/Geophysical_Data/sm_surface"#;
    let record = crid::partition(name, &smap_patterns());
    assert_eq!(record.partition.filename, "SMAP_L4_SM_gph_20200915T193000_Vv5014_001.nc");
    assert_eq!(record.partition.crid.as_deref(), Some("Vv5014_001"));
}

#[test]
fn test_extension_collection_from_files() {
    let dir = TempDir::new().unwrap();

    let mut hdf5 = vec![0u8; 1024];
    hdf5[..8].copy_from_slice(&[0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1A, b'\n']);
    fs::write(dir.path().join("good.h5"), &hdf5).unwrap();
    fs::write(dir.path().join("bad.hdf5"), &hdf5).unwrap();
    fs::write(dir.path().join("classic.nc"), b"CDF\x01rest").unwrap();

    let list = dir.path().join("list.txt");
    let mut file = fs::File::create(&list).unwrap();
    writeln!(file, "{}/*", dir.path().display()).unwrap();
    drop(file);

    let provider = SignatureProvider::new().unwrap();
    let result = validate_extension_collection(list.to_str().unwrap(), &provider);

    assert!(!result.valid.skip);
    // list.txt itself is not a recognised format and is reported as an error
    let names: Vec<_> = result.datasets.iter().map(|r| r.dataset_name.clone()).collect();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("bad.hdf5"));
    assert!(names[1].ends_with("list.txt"));
    assert!(result.datasets[1].error.is_some());

    let good = extension::check(dir.path().join("good.h5").to_str().unwrap(), &provider);
    assert_eq!(good.extension.unwrap().valid, Some(true));
}
