use serde::{Deserialize, Serialize};

/// A date-time token located in a filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeField {
    /// "temporal_begin", "temporal_end", a regex group name, or empty
    pub field_name: String,

    /// Exact substring matched
    pub token: String,

    /// Byte offset where the token starts
    pub start: usize,

    /// Byte offset one past the end of the token
    pub end: usize,

    /// Set during ISO-8601 validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<bool>,
}

impl DateTimeField {
    pub fn new(field_name: impl Into<String>, token: impl Into<String>, start: usize, end: usize) -> Self {
        Self { field_name: field_name.into(), token: token.into(), start, end, iso: None }
    }

    /// Same token at the same location, ignoring name and validation state
    pub fn same_span(&self, other: &DateTimeField) -> bool {
        self.token == other.token && self.start == other.start && self.end == other.end
    }
}

/// Outcome of the date-time checks
///
/// When `skip` is true none of the individual checks were run and they are
/// left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeValidity {
    pub skip: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_order: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields_order: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_isoformat: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<bool>,
}

impl DateTimeValidity {
    pub fn skipped() -> Self {
        Self { skip: true, ..Self::default() }
    }
}

/// Per-file date-time extraction result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeInfo {
    pub dataset_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default)]
    pub filename: String,

    /// Begin and, if present, end of the observation period
    pub temporal_extent: Vec<DateTimeField>,

    /// Any other date-time tokens, in extraction order
    pub date_time_fields: Vec<DateTimeField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<DateTimeValidity>,
}

impl DateTimeInfo {
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            error: None,
            filename: String::new(),
            temporal_extent: Vec::new(),
            date_time_fields: Vec::new(),
            valid: None,
        }
    }

    pub fn temporal_begin(&self) -> Option<&DateTimeField> {
        self.temporal_extent.iter().find(|f| f.field_name == "temporal_begin")
    }

    pub fn temporal_end(&self) -> Option<&DateTimeField> {
        self.temporal_extent.iter().find(|f| f.field_name == "temporal_end")
    }

    pub fn is_skipped(&self) -> bool {
        self.valid.as_ref().map(|v| v.skip).unwrap_or(false)
    }

    pub fn is_failure(&self) -> bool {
        match &self.valid {
            Some(v) if !v.skip => v.overall == Some(false),
            _ => false,
        }
    }
}
