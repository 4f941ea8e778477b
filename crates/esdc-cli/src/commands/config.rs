//! Config command implementation

use crate::commands::{Outcome, Settings};
use crate::output::OutputWriter;
use anyhow::Result;
use esdc_core::config::{CliConfigOverrides, ConfigSource};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;

#[derive(Debug, Serialize)]
struct ConfigEntry {
    value: String,
    source: ConfigSource,
}

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(settings: &Settings, output: &OutputWriter) -> Result<Outcome> {
    let config = settings.load(CliConfigOverrides::default())?;

    // Sorted for stable output
    let entries: BTreeMap<String, ConfigEntry> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| (key, ConfigEntry { value, source }))
        .collect();

    if output.is_json() {
        output.result(Outcome::Pass, &entries)?;
        return Ok(Outcome::Pass);
    }

    output.section("Configuration");
    if let Some(ref path) = settings.config_file {
        output.kv("File", path.display());
    }

    let rows: Vec<ConfigRow> = entries
        .into_iter()
        .map(|(key, entry)| ConfigRow {
            key,
            value: entry.value,
            source: format!("{:?}", entry.source),
        })
        .collect();
    output.table(rows);

    Ok(Outcome::Pass)
}
