use serde::{Deserialize, Serialize};

/// Format information reported by a metadata provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInfo {
    /// Short driver name (e.g., "HDF5", "netCDF", "HDF4")
    pub driver_short_name: String,

    /// HDF-EOS version string, empty when the file is not HDF-EOS
    #[serde(default)]
    pub hdfeos_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionInfo {
    pub driver_short_name: String,

    #[serde(rename = "HDFEOSVersion")]
    pub hdfeos_version: String,

    /// Actual extension including the leading dot, empty if none
    pub extension: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// Unset when the format is outside the rule's scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    pub dataset_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<ExtensionInfo>,
}

impl ExtensionRecord {
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self { dataset_name: dataset_name.into(), error: None, extension: None }
    }

    pub fn is_skipped(&self) -> bool {
        self.extension.as_ref().and_then(|e| e.valid).is_none()
    }

    pub fn is_failure(&self) -> bool {
        self.extension.as_ref().and_then(|e| e.valid) == Some(false)
    }
}
