//! ISO-8601 handling for filename date-time tokens
//!
//! Two independent tools live here:
//!
//! * [`IsoLadder`] - an ordered list of compact ISO-8601 shapes, from a full
//!   timestamp with fractional seconds down to a bare year, used to detect
//!   date-time tokens in filenames and to classify their format.
//! * [`parse`] - a general ISO-8601 parser used to decide whether a token is
//!   a valid date-time at all.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dataname::extract::extract_fields_with;
use crate::error::{EsdcError, Result};
use crate::models::DateTimeField;

/// Which set of component ranges the ladder uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LadderKind {
    /// Hours 00-23, minutes and seconds 00-59, months 01-12
    #[default]
    Standard,
    /// Hours, minutes and seconds 01-59 and months 01-09, 11, 12 (and a
    /// literal comma), exactly as published with the first checker release
    Legacy,
}

/// One rung of the ladder
#[derive(Debug, Clone)]
pub struct LadderLevel {
    /// Human readable shape, e.g. "YYYYMMDDThhmmssZ"
    pub label: &'static str,
    search: Regex,
    exact: Regex,
}

impl LadderLevel {
    fn new(label: &'static str, pattern: &str) -> Result<Self> {
        let search = Regex::new(pattern).map_err(|e| EsdcError::invalid_pattern(pattern, e))?;
        let anchored = format!("^(?:{})$", pattern);
        let exact = Regex::new(&anchored).map_err(|e| EsdcError::invalid_pattern(&anchored, e))?;
        Ok(Self { label, search, exact })
    }

    pub fn pattern(&self) -> &str {
        self.search.as_str()
    }

    pub fn search(&self) -> &Regex {
        &self.search
    }

    pub fn matches_exactly(&self, token: &str) -> bool {
        self.exact.is_match(token)
    }
}

struct Components {
    year: &'static str,
    month: &'static str,
    day: &'static str,
    hour: &'static str,
    minute: &'static str,
    second: &'static str,
}

const STANDARD: Components = Components {
    year: r"(?P<YYYY>(19|20)[0-9]{2})",
    month: r"(?P<MM>0[1-9]|1[0-2])",
    day: r"(?P<DD>0[1-9]|[12][0-9]|3[01])",
    hour: r"(?P<hh>[01][0-9]|2[0-3])",
    minute: r"(?P<mm>[0-5][0-9])",
    second: r"(?P<ss>[0-5][0-9])",
};

const LEGACY: Components = Components {
    year: r"(?P<YYYY>(19|20)[0-9]{2})",
    month: r"(?P<MM>0[1-9]|1[1,2])",
    day: r"(?P<DD>0[1-9]|[12][0-9]|3[01])",
    hour: r"(?P<hh>0[1-9]|[1-5][0-9])",
    minute: r"(?P<mm>0[1-9]|[1-5][0-9])",
    second: r"(?P<ss>0[1-9]|[1-5][0-9])",
};

const FRACTION: &str = r"[,.](?P<f>[0-9]+)";

/// Ordered ISO-8601 shapes, most specific first
#[derive(Debug, Clone)]
pub struct IsoLadder {
    kind: LadderKind,
    levels: Vec<LadderLevel>,
}

impl IsoLadder {
    pub fn new(kind: LadderKind) -> Result<Self> {
        let c = match kind {
            LadderKind::Standard => &STANDARD,
            LadderKind::Legacy => &LEGACY,
        };
        let date = format!("{}{}{}", c.year, c.month, c.day);

        let levels = vec![
            LadderLevel::new(
                "YYYYMMDDThhmmss[,.]fZ",
                &format!("{date}T{}{}{}{FRACTION}Z", c.hour, c.minute, c.second),
            )?,
            LadderLevel::new(
                "YYYYMMDDThhmmssZ",
                &format!("{date}T{}{}{}Z", c.hour, c.minute, c.second),
            )?,
            LadderLevel::new("YYYYMMDDThhmmZ", &format!("{date}T{}{}Z", c.hour, c.minute))?,
            LadderLevel::new("YYYYMMDDThhZ", &format!("{date}T{}Z", c.hour))?,
            LadderLevel::new("YYYYMMDD", &date)?,
            LadderLevel::new("YYYYMM", &format!("{}{}", c.year, c.month))?,
            LadderLevel::new("YYYY", c.year)?,
        ];

        Ok(Self { kind, levels })
    }

    pub fn standard() -> Result<Self> {
        Self::new(LadderKind::Standard)
    }

    pub fn legacy() -> Result<Self> {
        Self::new(LadderKind::Legacy)
    }

    pub fn kind(&self) -> LadderKind {
        self.kind
    }

    pub fn levels(&self) -> &[LadderLevel] {
        &self.levels
    }

    /// Walk the ladder and return the index of the first level that matches
    /// anywhere in `filename` together with that level's expression.
    pub fn first_matching(&self, filename: &str) -> Option<(usize, &LadderLevel)> {
        self.levels
            .iter()
            .enumerate()
            .find(|(_, level)| level.search.is_match(filename))
    }

    /// All matches of the first level that matches anywhere in `filename`,
    /// as unnamed fields
    pub fn detect(&self, filename: &str) -> Vec<DateTimeField> {
        self.first_matching(filename)
            .map(|(_, level)| extract_fields_with(level.search(), &[], filename))
            .unwrap_or_default()
    }

    /// Indices of every level the token matches exactly
    pub fn classify(&self, token: &str) -> Vec<usize> {
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, level)| level.matches_exactly(token))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Calendar date layouts tried in order, complete dates first. Reduced
/// precision dates take no time of day and start on the first month or day.
const DATE_FORMATS: &[(&str, usize)] = &[
    ("%Y-%m-%d", 10),
    ("%Y%m%d", 8),
    ("%Y-%m", 7),
    ("%Y", 4),
];

/// Time of day layouts, extended before basic. `%.f` is optional.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%H%M%S%.f", "%H%M", "%H"];

const ZONE_FORMATS: &[&str] = &["%:z", "%z", "%#z"];

/// Parse an ISO-8601 date or date-time.
///
/// Accepted dates are `YYYY`, `YYYY-MM`, `YYYYMMDD` and `YYYY-MM-DD`; the
/// basic `YYYYMM` form is rejected because it cannot be told apart from a
/// truncated `YYMMDD`. A time may only follow a complete date, after any
/// single separator other than a digit or `-`, as `hh[[:]mm[[:]ss[[.,]f]]]`
/// optionally followed by `Z`, `±hh`, `±hhmm` or `±hh:mm`. Values without an
/// offset are taken as UTC.
pub fn parse(token: &str) -> Result<DateTime<FixedOffset>> {
    let invalid = |reason: &str| EsdcError::InvalidDateTime {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    if !token.is_ascii() {
        return Err(invalid("non-ASCII characters"));
    }
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("expected a year"));
    }

    for &(layout, len) in DATE_FORMATS {
        let Some(date) = token.get(..len).and_then(|part| parse_date(part, layout)) else {
            continue;
        };

        let rest = &token[len..];
        if rest.is_empty() {
            return Ok(utc().from_utc_datetime(&date.and_time(NaiveTime::MIN)));
        }

        let sep = rest.as_bytes()[0];
        if !layout.contains("%d") || sep.is_ascii_digit() || sep == b'-' {
            continue;
        }
        return parse_time_of_day(date, &rest[1..]).ok_or_else(|| invalid("invalid time of day"));
    }

    Err(invalid("not an ISO-8601 calendar date"))
}

/// True if `token` parses as an ISO-8601 date-time
pub fn is_valid(token: &str) -> bool {
    match parse(token) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!("Not ISO-8601: {}", e);
            false
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn parse_items(s: &str, layout: &str) -> Option<Parsed> {
    if s.bytes().any(|b| b.is_ascii_whitespace()) {
        return None;
    }
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, s, StrftimeItems::new(layout)).ok()?;
    Some(parsed)
}

fn parse_date(s: &str, layout: &str) -> Option<NaiveDate> {
    let mut parsed = parse_items(s, layout)?;
    if !layout.contains("%m") {
        parsed.set_month(1).ok()?;
    }
    if !layout.contains("%d") {
        parsed.set_day(1).ok()?;
    }
    parsed.to_naive_date().ok()
}

fn parse_clock(s: &str) -> Option<NaiveTime> {
    TIME_FORMATS.iter().find_map(|layout| {
        let mut parsed = parse_items(s, layout)?;
        if !layout.contains("%M") {
            parsed.set_minute(0).ok()?;
        }
        parsed.to_naive_time().ok()
    })
}

fn parse_zone(s: &str) -> Option<FixedOffset> {
    if s.is_empty() || s.eq_ignore_ascii_case("z") {
        return Some(utc());
    }
    ZONE_FORMATS
        .iter()
        .find_map(|layout| parse_items(s, layout)?.to_fixed_offset().ok())
}

fn parse_time_of_day(date: NaiveDate, s: &str) -> Option<DateTime<FixedOffset>> {
    let (clock, zone) = s.split_at(s.find(['Z', 'z', '+', '-']).unwrap_or(s.len()));
    let clock = clock.replacen(',', ".", 1);

    // 24:00 is the midnight ending `date`
    let (clock, end_of_day) = match clock.strip_prefix("24") {
        Some(rest) => (format!("00{}", rest), true),
        None => (clock, false),
    };
    let time = parse_clock(&clock)?;
    if end_of_day && time != NaiveTime::MIN {
        return None;
    }

    let mut naive = date.and_time(time);
    if end_of_day {
        naive += Duration::days(1);
    }
    naive.and_local_timezone(parse_zone(zone)?).single()
}
