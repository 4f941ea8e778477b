//! Uniqueness command implementation

use crate::cli::UniquenessArgs;
use crate::commands::{summarize, FindingRow, Outcome, Settings};
use crate::output::OutputWriter;
use anyhow::Result;
use esdc_core::collection::uniqueness_collection;
use esdc_core::config::CliConfigOverrides;
use esdc_core::dataname::uniqueness::UniquenessPatterns;
use esdc_core::models::{CollectionResult, PartitionRecord};

pub fn execute(args: UniquenessArgs, settings: &Settings, output: &OutputWriter) -> Result<Outcome> {
    settings.load(CliConfigOverrides::default())?;

    let patterns = UniquenessPatterns {
        id: args.dataset_id,
        crid: args.dataset_crid,
        datetime: args.dataset_datetime,
        pdt: args.dataset_pdt,
    };

    let result = uniqueness_collection(&args.dataset_name_list, &patterns);
    let outcome = verdict(&result);

    if output.is_json() {
        output.result(outcome, &result)?;
        return Ok(outcome);
    }

    output.section("Uniqueness check");
    output.kv("Collection", &result.collection_name);
    if let Some(ref error) = result.error {
        output.kv("Error", error);
    } else if !result.is_empty() {
        output.kv("Duplicates", result.len());
        let rows = result
            .datasets
            .iter()
            .map(|r| FindingRow {
                dataset: r.dataset_name.clone(),
                status: "duplicate".to_string(),
                detail: r.partition.filename.clone(),
            })
            .collect();
        output.table(rows);
    }
    summarize(output, "Uniqueness", outcome);

    Ok(outcome)
}

/// Any duplicated filename fails the collection
fn verdict(result: &CollectionResult<PartitionRecord>) -> Outcome {
    if result.error.is_some() {
        Outcome::Error
    } else if !result.is_empty() {
        Outcome::Fail
    } else if result.valid.skip {
        Outcome::Skip
    } else {
        Outcome::Pass
    }
}
