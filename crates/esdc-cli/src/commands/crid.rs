//! CRID command implementation

use crate::cli::CridArgs;
use crate::commands::{run, Finding, Outcome, Settings};
use crate::output::OutputWriter;
use anyhow::Result;
use esdc_core::collection::validate_crid_collection;
use esdc_core::config::{parse_group_name, CliConfigOverrides};
use esdc_core::dataname::crid::{self, CridPatterns};
use esdc_core::models::PartitionRecord;

pub fn execute(args: CridArgs, settings: &Settings, output: &OutputWriter) -> Result<Outcome> {
    let group = |key: &str, value: &Option<String>| -> Result<Option<String>> {
        Ok(value.as_deref().map(|v| parse_group_name(key, v)).transpose()?)
    };

    let config = settings.load(CliConfigOverrides {
        crid_major_group: group("crid_major_group", &args.dataset_crid_major_group)?,
        crid_minor_group: group("crid_minor_group", &args.dataset_crid_minor_group)?,
        crid_patch_group: group("crid_patch_group", &args.dataset_crid_patch_group)?,
        ..Default::default()
    })?;

    let patterns = CridPatterns {
        crid: args.dataset_crid,
        major: args.dataset_crid_major,
        minor: args.dataset_crid_minor,
        patch: args.dataset_crid_patch,
        ..config.crid_patterns()
    };
    if !patterns.is_complete() {
        tracing::debug!("CRID patterns incomplete, the check will be skipped");
    }

    run(
        args.target.target(),
        "CRID",
        output,
        |name| crid::validate(name, &patterns),
        |list| validate_crid_collection(list, &patterns),
    )
}

impl Finding for PartitionRecord {
    fn dataset(&self) -> &str {
        &self.dataset_name
    }

    fn detail(&self) -> String {
        if let Some(ref error) = self.error {
            return error.clone();
        }
        if let Some(ref warning) = self.warning {
            return warning.clone();
        }

        let message = self.valid.as_ref().map(|v| v.message.trim()).unwrap_or_default();
        if !message.is_empty() {
            return message.to_string();
        }

        let p = &self.partition;
        match p.crid.as_deref() {
            Some(crid) if !crid.is_empty() => format!(
                "crid {} (major {}, minor {}, patch {})",
                crid,
                p.major.as_deref().unwrap_or_default(),
                p.minor.as_deref().unwrap_or_default(),
                p.patch.as_deref().unwrap_or_default()
            ),
            _ => p.filename.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> CridPatterns {
        CridPatterns {
            crid: Some(r"Vv\d+_\d+".to_string()),
            major: Some(r"v(?P<major>\d+)".to_string()),
            minor: Some(r"_(?P<minor>\d+)$".to_string()),
            patch: Some(r"p(?P<patch>\d+)".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_detail_prefers_validation_message() {
        let record = crid::validate("SMAP_L4_SM_gph_20200915T193000_Vv5014_001.h5", &patterns());
        assert_eq!(record.detail(), "Missing patch.");
        assert_eq!(record.row().status, "fail");
    }

    #[test]
    fn test_detail_lists_partition() {
        let patterns = CridPatterns {
            crid: Some(r"Vv\d+_\d+_\d+".to_string()),
            major: Some(r"v(?P<major>\d+)".to_string()),
            minor: Some(r"_(?P<minor>\d+)_".to_string()),
            patch: Some(r"_(?P<patch>\d+)$".to_string()),
            ..Default::default()
        };
        let record = crid::validate("SAT_Vv5014_001_002.h5", &patterns);
        assert_eq!(record.detail(), "crid Vv5014_001_002 (major 5014, minor 001, patch 002)");
        assert_eq!(record.row().status, "pass");
    }

    #[test]
    fn test_detail_reports_missing_crid() {
        let record = crid::validate("granule.h5", &patterns());
        assert!(record.detail().starts_with("No crid is extracted"));
        assert_eq!(record.row().status, "skip");
    }
}
