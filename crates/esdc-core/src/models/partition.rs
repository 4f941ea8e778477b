use serde::{Deserialize, Serialize};

/// Substrings partitioned out of a granule filename
///
/// `None` means the corresponding pattern was not supplied (or extraction was
/// never attempted); `Some("")` means the pattern was supplied but matched
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenamePartition {
    /// Basename of the dataset file
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Composite release identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// Production date-time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdt: Option<String>,
}

/// Outcome of the release identifier check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CridValidity {
    /// The rule does not apply (incomplete configuration or no crid found)
    pub skip: bool,

    /// True iff major, minor and patch are present and in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,

    /// Accumulated failure reasons
    #[serde(default)]
    pub message: String,
}

impl CridValidity {
    pub fn skipped() -> Self {
        Self { skip: true, status: None, message: String::new() }
    }
}

/// Per-file partition result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRecord {
    /// Dataset name exactly as supplied
    pub dataset_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    pub partition: FilenamePartition,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<CridValidity>,
}

impl PartitionRecord {
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            error: None,
            warning: None,
            partition: FilenamePartition::default(),
            valid: None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.valid.as_ref().map(|v| v.skip).unwrap_or(false)
    }

    /// Applicable and violated. A skipped record is never a failure.
    pub fn is_failure(&self) -> bool {
        match &self.valid {
            Some(v) if !v.skip => v.status == Some(false),
            _ => false,
        }
    }
}
