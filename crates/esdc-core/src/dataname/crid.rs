//! Composite release identifier partitioning and validation

use regex::Regex;

use crate::dataname::extract::{extract_group, extract_single};
use crate::dataname::name::DatasetName;
use crate::error::{EsdcError, Result};
use crate::models::{CridValidity, FilenamePartition, PartitionRecord};

pub const DEFAULT_MAJOR_GROUP: &str = "major";
pub const DEFAULT_MINOR_GROUP: &str = "minor";
pub const DEFAULT_PATCH_GROUP: &str = "patch";

pub const NO_CRID_WARNING: &str =
    "No crid is extracted from filename. Regex pattern for crid may be incorrect.";
pub const ORDER_MESSAGE: &str = "Incorrect order of major, minor, and patch in CRID.";

/// Patterns locating the crid in a filename and its parts within the crid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CridPatterns {
    pub crid: Option<String>,
    pub major: Option<String>,
    pub major_group: String,
    pub minor: Option<String>,
    pub minor_group: String,
    pub patch: Option<String>,
    pub patch_group: String,
}

impl Default for CridPatterns {
    fn default() -> Self {
        Self {
            crid: None,
            major: None,
            major_group: DEFAULT_MAJOR_GROUP.to_string(),
            minor: None,
            minor_group: DEFAULT_MINOR_GROUP.to_string(),
            patch: None,
            patch_group: DEFAULT_PATCH_GROUP.to_string(),
        }
    }
}

impl CridPatterns {
    /// All four patterns are supplied
    pub fn is_complete(&self) -> bool {
        self.crid.is_some() && self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }
}

/// Split the basename of `dataset_name` into crid, major, minor and patch.
///
/// Failures are recorded in the returned record's `error`.
pub fn partition(dataset_name: &str, patterns: &CridPatterns) -> PartitionRecord {
    let mut record = PartitionRecord::new(dataset_name);
    record.partition.filename = DatasetName::parse(dataset_name).basename();

    if let Err(e) = partition_filename(&mut record.partition, patterns) {
        record.error = Some(e.to_string());
    }

    record
}

/// Fill `partition` in place so the parts found before a failure are kept
fn partition_filename(partition: &mut FilenamePartition, patterns: &CridPatterns) -> Result<()> {
    let Some(crid_pattern) = &patterns.crid else {
        return Ok(());
    };
    let crid = extract_single(crid_pattern, &partition.filename)?;
    partition.crid = Some(crid.clone());

    // major, minor and patch are searched within the crid only
    if crid.is_empty() {
        return Ok(());
    }

    let part = |pattern: &Option<String>, group: &str| -> Result<Option<String>> {
        pattern.as_deref().map(|p| extract_group(p, group, &crid)).transpose()
    };
    partition.major = part(&patterns.major, &patterns.major_group)?;
    partition.minor = part(&patterns.minor, &patterns.minor_group)?;
    partition.patch = part(&patterns.patch, &patterns.patch_group)?;

    Ok(())
}

/// Partition and then check that major, minor and patch are present and
/// appear in that order inside the crid
pub fn validate(dataset_name: &str, patterns: &CridPatterns) -> PartitionRecord {
    let mut record = partition(dataset_name, patterns);

    if !patterns.is_complete() {
        record.valid = Some(CridValidity::skipped());
        return record;
    }
    if record.error.is_some() {
        return record;
    }

    let p = &record.partition;
    let crid = p.crid.as_deref().unwrap_or_default();
    if crid.is_empty() {
        record.warning = Some(NO_CRID_WARNING.to_string());
        record.valid = Some(CridValidity::skipped());
        return record;
    }

    let major = p.major.as_deref().unwrap_or_default();
    let minor = p.minor.as_deref().unwrap_or_default();
    let patch = p.patch.as_deref().unwrap_or_default();

    let mut valid = CridValidity { skip: false, status: Some(true), message: String::new() };
    for (value, label) in [(major, "major"), (minor, "minor"), (patch, "patch")] {
        if value.is_empty() {
            valid.message.push_str(&format!("Missing {}. ", label));
            valid.status = Some(false);
        }
    }

    match in_order(crid, major, minor, patch) {
        Ok(true) => {}
        Ok(false) => {
            valid.message.push_str(ORDER_MESSAGE);
            valid.status = Some(false);
        }
        Err(e) => {
            record.error = Some(e.to_string());
            return record;
        }
    }

    record.valid = Some(valid);
    record
}

/// True if `major`, `minor` and `patch` occur in the crid in that order
pub fn in_order(crid: &str, major: &str, minor: &str, patch: &str) -> Result<bool> {
    let pattern = format!(
        "^.*{}.*{}.*{}.*",
        regex::escape(major),
        regex::escape(minor),
        regex::escape(patch)
    );
    let re = Regex::new(&pattern).map_err(|e| EsdcError::invalid_pattern(&pattern, e))?;
    Ok(re.is_match(crid))
}
