//! Date-time extraction from granule filenames and consistency checks
//!
//! Extraction runs each configured pattern and collects the resulting fields
//! into a [`DateTimeInfo`]. When no explicit temporal pattern is configured
//! the ISO ladder is used to find the temporal begin. Validation then checks
//! ISO-8601 conformance, the order of begin and end, the position of the
//! temporal extent relative to other fields and the use of one common format.

use chrono::{DateTime, FixedOffset};

use crate::dataname::extract::{extract_fields, parse_group_names};
use crate::dataname::iso8601::{self, IsoLadder};
use crate::dataname::name::DatasetName;
use crate::error::{EsdcError, Result};
use crate::models::{DateTimeField, DateTimeInfo, DateTimeValidity};

pub const TEMPORAL_BEGIN: &str = "temporal_begin";
pub const TEMPORAL_END: &str = "temporal_end";

/// Separator between the expressions of `datetime_fields`
pub const FIELDS_SEPARATOR: &str = "++";
/// Separator between the group lists of `datetime_fields_groups`
pub const GROUPS_SEPARATOR: char = ';';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimePatterns {
    /// Temporal begin and optionally end
    pub datetime: Option<String>,
    /// Up to two comma-separated group names for `datetime`
    pub datetime_group: Option<String>,
    /// Production date-time
    pub pdt: Option<String>,
    pub pdt_group: Option<String>,
    /// Further expressions joined with `++`
    pub datetime_fields: Option<String>,
    /// One comma-separated group list per expression, joined with `;`
    pub datetime_fields_groups: Option<String>,
}

/// Collected fields before they are placed into a record
#[derive(Debug, Default)]
struct Extraction {
    temporal_extent: Vec<DateTimeField>,
    date_time_fields: Vec<DateTimeField>,
}

pub struct DateTimeExtractor {
    ladder: IsoLadder,
}

impl DateTimeExtractor {
    pub fn new(ladder: IsoLadder) -> Self {
        Self { ladder }
    }

    pub fn ladder(&self) -> &IsoLadder {
        &self.ladder
    }

    /// Extract the date-time fields of `dataset_name`'s basename
    pub fn extract(&self, dataset_name: &str, patterns: &DateTimePatterns) -> DateTimeInfo {
        let mut info = DateTimeInfo::new(dataset_name);
        info.filename = DatasetName::parse(dataset_name).basename();

        match self.extract_filename(&info.filename, patterns) {
            Ok(extraction) => {
                info.temporal_extent = extraction.temporal_extent;
                info.date_time_fields = extraction.date_time_fields;
            }
            Err(e) => info.error = Some(e.to_string()),
        }

        info
    }

    /// Extract and validate
    pub fn validate(&self, dataset_name: &str, patterns: &DateTimePatterns) -> DateTimeInfo {
        self.check(self.extract(dataset_name, patterns))
    }

    /// Run the checks over an extraction result
    pub fn check(&self, mut info: DateTimeInfo) -> DateTimeInfo {
        if info.error.is_some() || info.temporal_extent.is_empty() || info.date_time_fields.is_empty() {
            info.valid = Some(DateTimeValidity::skipped());
            return info;
        }

        let iso = mark_iso(&mut info.temporal_extent) & mark_iso(&mut info.date_time_fields);
        let temporal_order = temporal_order(&info);
        let fields_order = fields_order(&info.temporal_extent, &info.date_time_fields);
        let same_isoformat = self.same_isoformat(&info);

        info.valid = Some(DateTimeValidity {
            skip: false,
            iso: Some(iso),
            temporal_order: Some(temporal_order),
            fields_order: Some(fields_order),
            same_isoformat: Some(same_isoformat),
            overall: Some(iso && temporal_order && fields_order && same_isoformat),
        });
        info
    }

    fn extract_filename(&self, filename: &str, patterns: &DateTimePatterns) -> Result<Extraction> {
        let mut extraction = Extraction::default();

        if let Some(pattern) = &patterns.datetime {
            let groups = group_list(patterns.datetime_group.as_deref());
            let (extent, rest) = temporal_fields(extract_fields(pattern, &groups, filename)?);
            extraction.temporal_extent = extent;
            extraction.date_time_fields.extend(rest);
        }

        if let Some(pattern) = &patterns.pdt {
            let groups = group_list(patterns.pdt_group.as_deref());
            extraction.date_time_fields.extend(extract_fields(pattern, &groups, filename)?);
        }

        if let Some(fields) = &patterns.datetime_fields {
            extraction.date_time_fields.extend(extra_fields(
                fields,
                patterns.datetime_fields_groups.as_deref(),
                filename,
            )?);
        }

        if patterns.datetime.is_none() {
            let mut detected = self.ladder.detect(filename).into_iter();
            if let Some(mut begin) = detected.next() {
                begin.field_name = TEMPORAL_BEGIN.to_string();
                extraction.temporal_extent.push(begin);
            }
            for field in detected {
                if !extraction.date_time_fields.iter().any(|f| f.same_span(&field)) {
                    extraction.date_time_fields.push(field);
                }
            }
        }

        Ok(extraction)
    }

    fn same_isoformat(&self, info: &DateTimeInfo) -> bool {
        let mut format = None;

        for field in info.temporal_extent.iter().chain(&info.date_time_fields) {
            let levels = self.ladder.classify(&field.token);
            let Some(&first) = levels.first() else {
                return false;
            };
            if levels.len() > 1 {
                tracing::warn!("Multiple ISO formats match {}: {:?}", field.token, levels);
            }
            let expected = *format.get_or_insert(first);
            if levels.iter().any(|&level| level != expected) {
                return false;
            }
        }

        true
    }
}

fn group_list(groups: Option<&str>) -> Vec<String> {
    groups.map(parse_group_names).unwrap_or_default()
}

/// First field is the begin, second the end, the rest are ordinary fields
fn temporal_fields(fields: Vec<DateTimeField>) -> (Vec<DateTimeField>, Vec<DateTimeField>) {
    let mut fields = fields.into_iter();
    let mut extent = Vec::with_capacity(2);

    for name in [TEMPORAL_BEGIN, TEMPORAL_END] {
        if let Some(mut field) = fields.next() {
            field.field_name = name.to_string();
            extent.push(field);
        }
    }

    (extent, fields.collect())
}

fn extra_fields(fields: &str, groups: Option<&str>, filename: &str) -> Result<Vec<DateTimeField>> {
    let expressions: Vec<&str> = fields.split(FIELDS_SEPARATOR).collect();

    let group_lists: Vec<Vec<String>> = match groups {
        None => vec![Vec::new(); expressions.len()],
        Some(groups) => {
            let lists: Vec<&str> = groups.split(GROUPS_SEPARATOR).collect();
            if lists.len() != expressions.len() {
                return Err(EsdcError::GroupCountMismatch {
                    groups: groups.to_string(),
                    patterns: fields.to_string(),
                });
            }
            lists.into_iter().map(parse_group_names).collect()
        }
    };

    let mut out = Vec::new();
    for (expression, groups) in expressions.iter().zip(&group_lists) {
        out.extend(extract_fields(expression, groups, filename)?);
    }
    Ok(out)
}

fn parse_token(token: &str) -> Option<DateTime<FixedOffset>> {
    iso8601::parse(token)
        .map_err(|e| tracing::debug!("{}", e))
        .ok()
}

/// Set each field's `iso` flag; true if all are valid
fn mark_iso(fields: &mut [DateTimeField]) -> bool {
    let mut all = true;
    for field in fields.iter_mut() {
        let ok = iso8601::is_valid(&field.token);
        field.iso = Some(ok);
        all &= ok;
    }
    all
}

/// Begin must precede end both in time and in the filename
fn temporal_order(info: &DateTimeInfo) -> bool {
    if info.temporal_extent.len() < 2 {
        return true;
    }
    let (Some(begin), Some(end)) = (info.temporal_begin(), info.temporal_end()) else {
        return true;
    };

    let (Some(begin_value), Some(end_value)) = (parse_token(&begin.token), parse_token(&end.token)) else {
        return false;
    };
    if begin_value > end_value {
        return false;
    }

    begin.start <= end.start && begin.end <= end.start
}

/// The temporal extent must come before every other date-time field
fn fields_order(extent: &[DateTimeField], others: &[DateTimeField]) -> bool {
    let Some(last) = extent.iter().map(|f| f.end).max() else {
        return true;
    };
    others.iter().all(|f| f.start >= last)
}
