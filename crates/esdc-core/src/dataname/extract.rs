//! Regex-driven field extraction from filenames

use regex::Regex;

use crate::error::{EsdcError, Result};
use crate::models::DateTimeField;

/// Compile a user-supplied pattern
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| EsdcError::invalid_pattern(pattern, e))
}

/// Split a comma-separated list of group names
pub fn parse_group_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract fields from every non-overlapping match of `pattern`.
///
/// Without group names each match yields one unnamed field covering the whole
/// match. With group names each match yields one field per named group that
/// took part in that match.
pub fn extract_fields(
    pattern: &str,
    group_names: &[String],
    filename: &str,
) -> Result<Vec<DateTimeField>> {
    let re = compile(pattern)?;
    Ok(extract_fields_with(&re, group_names, filename))
}

/// Same as [`extract_fields`] for an already compiled expression
pub fn extract_fields_with(re: &Regex, group_names: &[String], filename: &str) -> Vec<DateTimeField> {
    let mut fields = Vec::new();

    for caps in re.captures_iter(filename) {
        if group_names.is_empty() {
            // group 0 always participates
            if let Some(m) = caps.get(0) {
                fields.push(DateTimeField::new("", m.as_str(), m.start(), m.end()));
            }
            continue;
        }

        for name in group_names {
            if let Some(m) = caps.name(name) {
                fields.push(DateTimeField::new(name.as_str(), m.as_str(), m.start(), m.end()));
            }
        }
    }

    tracing::debug!(pattern = re.as_str(), count = fields.len(), "extracted fields");
    fields
}

/// Extract a single value from a filename.
///
/// Patterns with capture groups yield the first group of the first match,
/// otherwise the whole first match. Returns an empty string when nothing
/// matches; several matches are reported as an ambiguous pattern and the
/// first one is used.
pub fn extract_single(pattern: &str, filename: &str) -> Result<String> {
    let re = compile(pattern)?;
    let has_groups = re.captures_len() > 1;

    let mut matches = re.captures_iter(filename);
    let Some(first) = matches.next() else {
        return Ok(String::new());
    };

    if matches.next().is_some() {
        tracing::warn!("Ambiguous pattern: pattern={} filename={}", pattern, filename);
    }

    let index = if has_groups { 1 } else { 0 };
    let value = first.get(index).map(|m| m.as_str()).unwrap_or_default();
    if value.is_empty() {
        return Err(EsdcError::EmptyCapture {
            pattern: pattern.to_string(),
            input: filename.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Extract a named group from the first match of `pattern` in `substring`.
///
/// Returns an empty string when the pattern does not match or the group did
/// not take part in the match.
pub fn extract_group(pattern: &str, group: &str, substring: &str) -> Result<String> {
    let re = compile(pattern)?;
    if !re.capture_names().flatten().any(|n| n == group) {
        return Err(EsdcError::UnknownGroup {
            pattern: pattern.to_string(),
            group: group.to_string(),
        });
    }

    let Some(caps) = re.captures(substring) else {
        return Ok(String::new());
    };

    match caps.name(group) {
        Some(m) if m.as_str().is_empty() => Err(EsdcError::EmptyCapture {
            pattern: pattern.to_string(),
            input: substring.to_string(),
        }),
        Some(m) => Ok(m.as_str().to_string()),
        None => Ok(String::new()),
    }
}
