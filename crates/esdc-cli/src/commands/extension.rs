//! Extension command implementation

use crate::cli::ExtensionArgs;
use crate::commands::{run, Finding, Outcome, Settings};
use crate::output::OutputWriter;
use anyhow::Result;
use esdc_core::collection::validate_extension_collection;
use esdc_core::config::CliConfigOverrides;
use esdc_core::dataname::extension;
use esdc_core::models::ExtensionRecord;
use esdc_core::provider::SignatureProvider;

pub fn execute(args: ExtensionArgs, settings: &Settings, output: &OutputWriter) -> Result<Outcome> {
    // No configuration key applies here; a broken config file still fails
    settings.load(CliConfigOverrides::default())?;
    let provider = SignatureProvider::new()?;

    run(
        args.target.target(),
        "Extension",
        output,
        |name| extension::check(name, &provider),
        |list| validate_extension_collection(list, &provider),
    )
}

impl Finding for ExtensionRecord {
    fn dataset(&self) -> &str {
        &self.dataset_name
    }

    fn detail(&self) -> String {
        if let Some(ref error) = self.error {
            return error.clone();
        }

        let Some(ref info) = self.extension else {
            return String::new();
        };
        let found = if info.extension.is_empty() { "none" } else { info.extension.as_str() };
        match (&info.expected, info.valid) {
            (Some(expected), Some(false)) => format!(
                "{} file should use {} (found {})",
                info.driver_short_name, expected, found
            ),
            (Some(expected), _) => format!("{} file uses {}", info.driver_short_name, expected),
            (None, _) => format!("{} files are not checked", info.driver_short_name),
        }
    }
}
