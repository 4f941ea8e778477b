//! Datetime command implementation

use crate::cli::DateTimeArgs;
use crate::commands::{ladder, run, Finding, Outcome, Settings};
use crate::output::OutputWriter;
use anyhow::Result;
use esdc_core::collection::validate_datetime_collection;
use esdc_core::config::CliConfigOverrides;
use esdc_core::dataname::datetime::{DateTimeExtractor, DateTimePatterns};
use esdc_core::models::{DateTimeField, DateTimeInfo};

pub fn execute(args: DateTimeArgs, settings: &Settings, output: &OutputWriter) -> Result<Outcome> {
    let config = settings.load(CliConfigOverrides::default())?;
    let extractor = DateTimeExtractor::new(ladder(&config)?);
    tracing::debug!(ladder = ?extractor.ladder().kind(), "datetime check");

    let patterns = DateTimePatterns {
        datetime: args.dataset_datetime,
        datetime_group: args.dataset_datetime_group,
        pdt: args.dataset_pdt,
        pdt_group: args.dataset_pdt_group,
        datetime_fields: args.dataset_datetime_fields,
        datetime_fields_groups: args.dataset_datetime_fields_groups,
    };

    run(
        args.target.target(),
        "Datetime",
        output,
        |name| extractor.validate(name, &patterns),
        |list| validate_datetime_collection(list, &extractor, &patterns),
    )
}

fn describe(field: &DateTimeField) -> String {
    let mut text = if field.field_name.is_empty() {
        field.token.clone()
    } else {
        format!("{} {}", field.field_name, field.token)
    };
    text.push_str(&format!("@{}", field.start));
    if field.iso == Some(false) {
        text.push_str(" not ISO-8601");
    }
    text
}

impl Finding for DateTimeInfo {
    fn dataset(&self) -> &str {
        &self.dataset_name
    }

    fn detail(&self) -> String {
        if let Some(ref error) = self.error {
            return error.clone();
        }

        let Some(ref valid) = self.valid else {
            return String::new();
        };
        if valid.skip {
            return "no date-time found".to_string();
        }

        let mut failed = Vec::new();
        for (check, label) in [
            (valid.iso, "iso"),
            (valid.temporal_order, "temporal_order"),
            (valid.fields_order, "fields_order"),
            (valid.same_isoformat, "same_isoformat"),
        ] {
            if check == Some(false) {
                failed.push(label);
            }
        }

        let fields: Vec<String> = self
            .temporal_extent
            .iter()
            .chain(&self.date_time_fields)
            .map(describe)
            .collect();

        if failed.is_empty() {
            fields.join(", ")
        } else {
            format!("failed {} ({})", failed.join(", "), fields.join(", "))
        }
    }
}
