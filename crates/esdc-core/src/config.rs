use crate::dataname::crid::{
    CridPatterns, DEFAULT_MAJOR_GROUP, DEFAULT_MINOR_GROUP, DEFAULT_PATCH_GROUP,
};
use crate::dataname::iso8601::{IsoLadder, LadderKind};
use crate::error::{EsdcError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

pub const ENV_ISO_LADDER: &str = "ESDC_ISO_LADDER";
pub const ENV_CRID_MAJOR_GROUP: &str = "ESDC_CRID_MAJOR_GROUP";
pub const ENV_CRID_MINOR_GROUP: &str = "ESDC_CRID_MINOR_GROUP";
pub const ENV_CRID_PATCH_GROUP: &str = "ESDC_CRID_PATCH_GROUP";

/// Layered configuration for the checks
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub iso_ladder: ConfigValue<LadderKind>,
    pub crid_major_group: ConfigValue<String>,
    pub crid_minor_group: ConfigValue<String>,
    pub crid_patch_group: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            iso_ladder: ConfigValue::new(LadderKind::Standard, ConfigSource::Default),
            crid_major_group: ConfigValue::new(DEFAULT_MAJOR_GROUP.to_string(), ConfigSource::Default),
            crid_minor_group: ConfigValue::new(DEFAULT_MINOR_GROUP.to_string(), ConfigSource::Default),
            crid_patch_group: ConfigValue::new(DEFAULT_PATCH_GROUP.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| EsdcError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig = toml::from_str(&content).map_err(|e| EsdcError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;

        if let Some(kind) = file_config.iso_ladder {
            self.iso_ladder.update(kind, ConfigSource::File);
        }

        let groups = [
            (file_config.crid_major_group, &mut self.crid_major_group, "crid_major_group"),
            (file_config.crid_minor_group, &mut self.crid_minor_group, "crid_minor_group"),
            (file_config.crid_patch_group, &mut self.crid_patch_group, "crid_patch_group"),
        ];
        for (value, slot, key) in groups {
            if let Some(value) = value {
                slot.update(parse_group_name(key, &value)?, ConfigSource::File);
            }
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // ESDC_ISO_LADDER
        if let Ok(ladder_str) = env::var(ENV_ISO_LADDER) {
            match parse_ladder_kind(&ladder_str) {
                Ok(kind) => self.iso_ladder.update(kind, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected standard or legacy",
                    ENV_ISO_LADDER,
                    ladder_str
                ),
            }
        }

        // ESDC_CRID_{MAJOR,MINOR,PATCH}_GROUP
        let groups = [
            (ENV_CRID_MAJOR_GROUP, &mut self.crid_major_group, "crid_major_group"),
            (ENV_CRID_MINOR_GROUP, &mut self.crid_minor_group, "crid_minor_group"),
            (ENV_CRID_PATCH_GROUP, &mut self.crid_patch_group, "crid_patch_group"),
        ];
        for (var, slot, key) in groups {
            if let Ok(value) = env::var(var) {
                match parse_group_name(key, &value) {
                    Ok(name) => slot.update(name, ConfigSource::Environment),
                    Err(_) => tracing::warn!(
                        "Invalid {} value '{}': expected a regex group name",
                        var,
                        value
                    ),
                }
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(kind) = overrides.iso_ladder {
            self.iso_ladder.update(kind, ConfigSource::Cli);
        }

        if let Some(group) = overrides.crid_major_group {
            self.crid_major_group.update(group, ConfigSource::Cli);
        }

        if let Some(group) = overrides.crid_minor_group {
            self.crid_minor_group.update(group, ConfigSource::Cli);
        }

        if let Some(group) = overrides.crid_patch_group {
            self.crid_patch_group.update(group, ConfigSource::Cli);
        }
    }

    /// Build the ISO ladder selected by `iso_ladder`
    pub fn ladder(&self) -> Result<IsoLadder> {
        IsoLadder::new(self.iso_ladder.value)
    }

    /// CRID patterns carrying the configured group names
    pub fn crid_patterns(&self) -> CridPatterns {
        CridPatterns {
            major_group: self.crid_major_group.value.clone(),
            minor_group: self.crid_minor_group.value.clone(),
            patch_group: self.crid_patch_group.value.clone(),
            ..CridPatterns::default()
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "iso_ladder".to_string(),
            (ladder_kind_name(self.iso_ladder.value).to_string(), self.iso_ladder.source),
        );

        for (key, value) in [
            ("crid_major_group", &self.crid_major_group),
            ("crid_minor_group", &self.crid_minor_group),
            ("crid_patch_group", &self.crid_patch_group),
        ] {
            map.insert(key.to_string(), (value.value.clone(), value.source));
        }

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    iso_ladder: Option<LadderKind>,
    crid_major_group: Option<String>,
    crid_minor_group: Option<String>,
    crid_patch_group: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub iso_ladder: Option<LadderKind>,
    pub crid_major_group: Option<String>,
    pub crid_minor_group: Option<String>,
    pub crid_patch_group: Option<String>,
}

/// Parse ladder kind from string
pub fn parse_ladder_kind(s: &str) -> Result<LadderKind> {
    match s.trim().to_lowercase().as_str() {
        "standard" => Ok(LadderKind::Standard),
        "legacy" => Ok(LadderKind::Legacy),
        _ => Err(EsdcError::ConfigInvalid {
            key: "iso_ladder".to_string(),
            reason: format!("Invalid ISO ladder: {}. Use standard or legacy", s),
        }),
    }
}

pub fn ladder_kind_name(kind: LadderKind) -> &'static str {
    match kind {
        LadderKind::Standard => "standard",
        LadderKind::Legacy => "legacy",
    }
}

/// Validate a regex capture group name
pub fn parse_group_name(key: &str, s: &str) -> Result<String> {
    let name = s.trim();
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        return Err(EsdcError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid group name: '{}'", s),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn clear_env() {
        for var in [ENV_ISO_LADDER, ENV_CRID_MAJOR_GROUP, ENV_CRID_MINOR_GROUP, ENV_CRID_PATCH_GROUP] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.iso_ladder.value, LadderKind::Standard);
        assert_eq!(config.iso_ladder.source, ConfigSource::Default);
        assert_eq!(config.crid_major_group.value, "major");
        assert_eq!(config.crid_minor_group.value, "minor");
        assert_eq!(config.crid_patch_group.value, "patch");
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(LadderKind::Standard, ConfigSource::Default);

        value.update(LadderKind::Legacy, ConfigSource::File);
        assert_eq!(value.source, ConfigSource::File);

        value.update(LadderKind::Standard, ConfigSource::Environment);
        assert_eq!(value.value, LadderKind::Standard);
        assert_eq!(value.source, ConfigSource::Environment);

        value.update(LadderKind::Legacy, ConfigSource::Cli);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(LadderKind::Standard, ConfigSource::File);
        assert_eq!(value.value, LadderKind::Legacy);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
iso_ladder = "legacy"
crid_minor_group = "minor_version"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.iso_ladder.value, LadderKind::Legacy);
        assert_eq!(config.iso_ladder.source, ConfigSource::File);
        assert_eq!(config.crid_minor_group.value, "minor_version");
        assert_eq!(config.crid_minor_group.source, ConfigSource::File);
        assert_eq!(config.crid_major_group.source, ConfigSource::Default);
    }

    #[test]
    fn test_load_from_file_rejects_bad_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"iso_ladder = "lenient""#).unwrap();
        assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"unknown_key = 1"#).unwrap();
        assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());

        assert!(LayeredConfig::with_defaults().load_from_file("/nonexistent/esdc.toml").is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        clear_env();
        env::set_var(ENV_ISO_LADDER, "Legacy");
        env::set_var(ENV_CRID_PATCH_GROUP, "p");

        let config = LayeredConfig::with_defaults().load_from_env();
        assert_eq!(config.iso_ladder.value, LadderKind::Legacy);
        assert_eq!(config.iso_ladder.source, ConfigSource::Environment);
        assert_eq!(config.crid_patch_group.value, "p");
        assert_eq!(config.crid_major_group.source, ConfigSource::Default);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_are_ignored() {
        clear_env();
        env::set_var(ENV_ISO_LADDER, "fuzzy");
        env::set_var(ENV_CRID_MAJOR_GROUP, "1bad");

        let config = LayeredConfig::with_defaults().load_from_env();
        assert_eq!(config.iso_ladder.value, LadderKind::Standard);
        assert_eq!(config.iso_ladder.source, ConfigSource::Default);
        assert_eq!(config.crid_major_group.value, "major");

        clear_env();
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            iso_ladder: Some(LadderKind::Legacy),
            crid_minor_group: Some("mn".to_string()),
            ..Default::default()
        });

        assert_eq!(config.iso_ladder.value, LadderKind::Legacy);
        assert_eq!(config.iso_ladder.source, ConfigSource::Cli);
        assert_eq!(config.crid_minor_group.value, "mn");
        assert_eq!(config.crid_patch_group.source, ConfigSource::Default);

        let patterns = config.crid_patterns();
        assert_eq!(patterns.minor_group, "mn");
        assert!(patterns.crid.is_none());
        assert_eq!(config.ladder().unwrap().kind(), LadderKind::Legacy);
    }

    #[test]
    fn test_parse_ladder_kind() {
        assert_eq!(parse_ladder_kind("standard").unwrap(), LadderKind::Standard);
        assert_eq!(parse_ladder_kind("LEGACY").unwrap(), LadderKind::Legacy);
        assert!(parse_ladder_kind("strict").is_err());
    }

    #[test]
    fn test_parse_group_name() {
        assert_eq!(parse_group_name("k", " major ").unwrap(), "major");
        assert_eq!(parse_group_name("k", "_v2").unwrap(), "_v2");
        assert!(parse_group_name("k", "").is_err());
        assert!(parse_group_name("k", "2x").is_err());
        assert!(parse_group_name("k", "a-b").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert_eq!(map.len(), 4);
        let (ladder, source) = &map["iso_ladder"];
        assert_eq!(ladder, "standard");
        assert_eq!(*source, ConfigSource::Default);
        assert_eq!(map["crid_minor_group"].0, "minor");
    }
}
