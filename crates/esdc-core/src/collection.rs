//! Collection drivers
//!
//! A collection is a list file naming one dataset per line. Each line may be
//! a glob pattern; lines that match nothing on disk are used verbatim so that
//! driver-qualified subdataset names still reach the per-file checks.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dataname::crid::{self, CridPatterns};
use crate::dataname::datetime::{DateTimeExtractor, DateTimePatterns};
use crate::dataname::extension;
use crate::dataname::uniqueness::{self, UniquenessPatterns};
use crate::error::{EsdcError, Result};
use crate::models::{
    CollectionResult, CollectionValidity, DateTimeInfo, ExtensionRecord, PartitionRecord,
};
use crate::ports::MetadataProvider;

/// Pass, fail or skip status of a per-file record
pub trait Verdict {
    /// The rule did not apply to this file
    fn is_skipped(&self) -> bool;

    /// The rule applied and was violated
    fn is_failure(&self) -> bool;

    /// The file could not be processed
    fn has_error(&self) -> bool;
}

impl Verdict for PartitionRecord {
    fn is_skipped(&self) -> bool {
        PartitionRecord::is_skipped(self)
    }

    fn is_failure(&self) -> bool {
        PartitionRecord::is_failure(self)
    }

    fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

impl Verdict for DateTimeInfo {
    fn is_skipped(&self) -> bool {
        DateTimeInfo::is_skipped(self) && self.error.is_none()
    }

    fn is_failure(&self) -> bool {
        DateTimeInfo::is_failure(self)
    }

    fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

impl Verdict for ExtensionRecord {
    fn is_skipped(&self) -> bool {
        ExtensionRecord::is_skipped(self) && self.error.is_none()
    }

    fn is_failure(&self) -> bool {
        ExtensionRecord::is_failure(self)
    }

    fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Expand a glob pattern into sorted paths. Invalid patterns and unreadable
/// entries yield nothing. Wildcards do not match a leading dot.
fn expand_glob(pattern: &str) -> Vec<PathBuf> {
    let options = glob::MatchOptions { require_literal_leading_dot: true, ..Default::default() };
    let paths = match glob::glob_with(pattern, options) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::debug!("Not a glob pattern '{}': {}", pattern, e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = paths.filter_map(|entry| entry.ok()).collect();
    files.sort();
    files
}

/// Read a list file and resolve every non-blank line to dataset names
pub fn resolve_list_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| EsdcError::ListFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let matches = expand_glob(line);
        tracing::debug!(line, matches = matches.len(), "resolved list entry");

        if matches.is_empty() {
            names.push(line.to_string());
        } else {
            names.extend(matches.iter().map(|p| p.to_string_lossy().into_owned()));
        }
    }

    Ok(names)
}

/// Run `op` on every dataset of a list file, in list order
pub fn for_each_file<T, F>(list_file: &str, mut op: F) -> CollectionResult<T>
where
    F: FnMut(&str) -> T,
{
    let names = match resolve_list_file(list_file) {
        Ok(names) => names,
        Err(e) => return CollectionResult::with_error(list_file, e),
    };

    let mut result = CollectionResult::new(list_file);
    result.datasets = names.iter().map(|name| op(name.as_str())).collect();
    result
}

/// Keep failed and errored records only. The collection is skipped when every
/// member was skipped, which includes an empty collection.
pub fn retain_failures<T: Verdict>(mut result: CollectionResult<T>) -> CollectionResult<T> {
    if result.error.is_some() {
        return result;
    }

    let skipped = result.datasets.iter().filter(|d| d.is_skipped()).count();
    result.valid = CollectionValidity { skip: skipped == result.datasets.len() };
    result.datasets.retain(|d| d.has_error() || d.is_failure());
    result
}

/// Release identifier check over a collection. Without all four patterns
/// the list file is not read at all.
pub fn validate_crid_collection(list_file: &str, patterns: &CridPatterns) -> CollectionResult<PartitionRecord> {
    if !patterns.is_complete() {
        let mut result = CollectionResult::new(list_file);
        result.valid = CollectionValidity { skip: true };
        return result;
    }

    retain_failures(for_each_file(list_file, |name| crid::validate(name, patterns)))
}

pub fn validate_datetime_collection(
    list_file: &str,
    extractor: &DateTimeExtractor,
    patterns: &DateTimePatterns,
) -> CollectionResult<DateTimeInfo> {
    retain_failures(for_each_file(list_file, |name| extractor.validate(name, patterns)))
}

pub fn validate_extension_collection(
    list_file: &str,
    provider: &dyn MetadataProvider,
) -> CollectionResult<ExtensionRecord> {
    retain_failures(for_each_file(list_file, |name| extension::check(name, provider)))
}

/// Partition every file and report the ones sharing a basename
pub fn uniqueness_collection(list_file: &str, patterns: &UniquenessPatterns) -> CollectionResult<PartitionRecord> {
    let mut result = for_each_file(list_file, |name| uniqueness::partition(name, patterns));
    if result.error.is_some() {
        return result;
    }

    result.valid = CollectionValidity { skip: result.datasets.is_empty() };
    result.datasets = uniqueness::find_duplicates(std::mem::take(&mut result.datasets));
    result
}
