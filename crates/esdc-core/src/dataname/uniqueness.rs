//! Filename partitioning for the uniqueness check across releases

use std::collections::HashMap;

use crate::dataname::extract::extract_single;
use crate::dataname::name::DatasetName;
use crate::error::Result;
use crate::models::{FilenamePartition, PartitionRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniquenessPatterns {
    pub id: Option<String>,
    pub crid: Option<String>,
    pub datetime: Option<String>,
    pub pdt: Option<String>,
}

/// Partition the basename of `dataset_name` with every supplied pattern
pub fn partition(dataset_name: &str, patterns: &UniquenessPatterns) -> PartitionRecord {
    let mut record = PartitionRecord::new(dataset_name);
    let filename = DatasetName::parse(dataset_name).basename();

    match partition_filename(&filename, patterns) {
        Ok(partition) => record.partition = partition,
        Err(e) => {
            record.partition.filename = filename;
            record.error = Some(e.to_string());
        }
    }

    record
}

fn partition_filename(filename: &str, patterns: &UniquenessPatterns) -> Result<FilenamePartition> {
    let single = |pattern: &Option<String>| -> Result<Option<String>> {
        pattern.as_deref().map(|p| extract_single(p, filename)).transpose()
    };

    Ok(FilenamePartition {
        filename: filename.to_string(),
        id: single(&patterns.id)?,
        crid: single(&patterns.crid)?,
        datetime: single(&patterns.datetime)?,
        pdt: single(&patterns.pdt)?,
        ..Default::default()
    })
}

/// Every record whose basename occurs more than once, in input order
pub fn find_duplicates(records: Vec<PartitionRecord>) -> Vec<PartitionRecord> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in &records {
        *counts.entry(record.partition.filename.as_str()).or_default() += 1;
    }

    let duplicated: Vec<bool> = records
        .iter()
        .map(|r| counts.get(r.partition.filename.as_str()).copied().unwrap_or(0) > 1)
        .collect();

    records
        .into_iter()
        .zip(duplicated)
        .filter_map(|(record, dup)| dup.then_some(record))
        .collect()
}
