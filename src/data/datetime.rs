// src/data/datetime.rs

//! Functions to recognize datetime strings in several sub-formats and
//! transform them to chrono [`NaiveDateTime`] instances.
//!
//! The accepted sub-formats are declared as an ordered list of
//! [`DateTimeParseInstr`], each pairing one anchored regular expression
//! with one parse routine ([`DATETIME_PARSE_DATAS`]). The first regular
//! expression matching the entire input wins; its parse routine either
//! produces a datetime or the whole attempt resolves to `None`. Matching
//! never raises an error. Callers treat `None` as "no bound".
//!
//! Timezone offsets are parsed but then dropped; comparisons happen on the
//! wall-clock value as written, so a log line stamped `+0000` and a filter
//! bound given as `+00:00` compare the way a human reading both expects.
//!
//! [`NaiveDateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.NaiveDateTime.html
//! [`DATETIME_PARSE_DATAS`]: self::DATETIME_PARSE_DATAS

#![allow(non_camel_case_types)]

use std::fmt;

use ::chrono::{
    DateTime,
    Datelike, // adds method `.year()` onto `DateTime`
    Local,
    NaiveDate,
    NaiveDateTime,
    Weekday,
};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::Regex;
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime typing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A _Year_ in a date.
pub type Year = i32;

/// The one datetime type used for comparing and filtering; `L` for
/// _Local_ wall-clock (offsets are dropped after parsing).
pub type DateTimeL = NaiveDateTime;

/// An optional [`DateTimeL`]; `None` means "no bound".
pub type DateTimeLOpt = Option<DateTimeL>;

/// Regular expression pattern string, passed to [`regex::Regex`].
///
/// [`regex::Regex`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html
pub type DateTimeRegex_str = str;

/// One attempt at turning an already regex-validated string into a
/// [`DateTimeL`].
pub type DateTimeParseFn = fn(&str) -> DateTimeLOpt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// regex pattern fragments and whole sub-format patterns
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `R`egex `P`attern fragment, calendar date `YYYY-MM-DD`.
const RP_DATE: &DateTimeRegex_str = r"\d{4}-\d{2}-\d{2}";

/// `R`egex `P`attern fragment, clock time `HH:MM:SS`.
const RP_TIME: &DateTimeRegex_str = r"\d{2}:\d{2}:\d{2}";

/// nginx/Apache access-log timestamp field, e.g.
/// `17/May/2015:08:05:32 +0000`.
pub const DTP_ACCESSLOG: &DateTimeRegex_str =
    concatcp!("^", r"\d{2}/[A-Za-z]{3}/\d{4}:", RP_TIME, r" [+\-]\d{4}$");

/// ISO 8601 offset or zoned datetime, e.g. `2024-11-04T10:15:30+03:00`
/// or `2024-11-04T10:15:30Z`.
pub const DTP_OFFSET_DATETIME: &DateTimeRegex_str =
    concatcp!("^", RP_DATE, "T", RP_TIME, r"([+\-]\d{2}:\d{2}|Z)$");

/// ISO 8601 basic (compact) zoned datetime, e.g. `20241104T101530Z`.
pub const DTP_BASIC_ZONED: &DateTimeRegex_str = r"^\d{8}T\d{6}Z$";

/// plain local date, e.g. `2024-11-04`; midnight implied.
pub const DTP_LOCAL_DATE: &DateTimeRegex_str = concatcp!("^", RP_DATE, "$");

/// ISO 8601 week date, e.g. `2024-W45` or `2024-W45-2`;
/// a missing day-of-week means Monday.
pub const DTP_WEEK_DATE: &DateTimeRegex_str = r"^\d{4}-W\d{2}(-[1-7])?$";

/// ISO 8601 ordinal date, e.g. `2024-309`.
pub const DTP_ORDINAL_DATE: &DateTimeRegex_str = r"^\d{4}-\d{3}$";

/// ISO 8601 month-day with no year, e.g. `--11-04`;
/// the year defaults to the current calendar year.
pub const DTP_MONTH_DAY: &DateTimeRegex_str = r"^--\d{2}-\d{2}$";

/// chrono strftime pattern for [`DTP_ACCESSLOG`].
pub const CLF_DATETIME_PATTERN: &str = "%d/%b/%Y:%H:%M:%S %z";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTimeParseInstr
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One datetime sub-format: an anchored regex gating one parse routine.
pub struct DateTimeParseInstr {
    /// Anchored regex tested against the entire input.
    pub regex: Regex,
    /// Parse routine run when (and only when) `regex` matches.
    pub parser: DateTimeParseFn,
    /// The pattern `regex` was compiled from, for debug display.
    pub regex_pattern: &'static DateTimeRegex_str,
}

impl fmt::Debug for DateTimeParseInstr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("DateTimeParseInstr")
            .field("regex_pattern", &self.regex_pattern)
            .finish()
    }
}

fn parse_accesslog(dts: &str) -> DateTimeLOpt {
    DateTime::parse_from_str(dts, CLF_DATETIME_PATTERN)
        .ok()
        .map(|dt| dt.naive_local())
}

fn parse_offset_datetime(dts: &str) -> DateTimeLOpt {
    DateTime::parse_from_rfc3339(dts)
        .ok()
        .map(|dt| dt.naive_local())
}

fn parse_basic_zoned(dts: &str) -> DateTimeLOpt {
    NaiveDateTime::parse_from_str(dts, "%Y%m%dT%H%M%SZ").ok()
}

fn parse_local_date(dts: &str) -> DateTimeLOpt {
    NaiveDate::parse_from_str(dts, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
}

/// `YYYY-Wnn` or `YYYY-Wnn-D`; the regex guarantees the slice offsets.
fn parse_week_date(dts: &str) -> DateTimeLOpt {
    let year: Year = dts.get(0..4)?.parse().ok()?;
    let week: u32 = dts.get(6..8)?.parse().ok()?;
    let weekday: Weekday = match dts.get(9..10) {
        Some("1") | None => Weekday::Mon,
        Some("2") => Weekday::Tue,
        Some("3") => Weekday::Wed,
        Some("4") => Weekday::Thu,
        Some("5") => Weekday::Fri,
        Some("6") => Weekday::Sat,
        Some("7") => Weekday::Sun,
        Some(_) => return None,
    };
    NaiveDate::from_isoywd_opt(year, week, weekday)?.and_hms_opt(0, 0, 0)
}

fn parse_ordinal_date(dts: &str) -> DateTimeLOpt {
    NaiveDate::parse_from_str(dts, "%Y-%j")
        .ok()?
        .and_hms_opt(0, 0, 0)
}

/// `--MM-DD` taken in the current calendar year.
fn parse_month_day(dts: &str) -> DateTimeLOpt {
    let month: u32 = dts.get(2..4)?.parse().ok()?;
    let day: u32 = dts.get(5..7)?.parse().ok()?;
    NaiveDate::from_ymd_opt(Local::now().year(), month, day)?.and_hms_opt(0, 0, 0)
}

/// Number of entries in [`DATETIME_PARSE_DATAS`].
pub const DATETIME_PARSE_DATAS_LEN: usize = 7;

lazy_static! {
    /// The ordered sub-format list. Tried first to last; the first regex
    /// matching the entire input selects the parse routine. The
    /// access-log entry leads because it is by far the most frequent
    /// call: every parsed log line passes through here once.
    pub static ref DATETIME_PARSE_DATAS: [DateTimeParseInstr; DATETIME_PARSE_DATAS_LEN] = [
        DateTimeParseInstr {
            regex: Regex::new(DTP_ACCESSLOG).unwrap(),
            parser: parse_accesslog,
            regex_pattern: DTP_ACCESSLOG,
        },
        DateTimeParseInstr {
            regex: Regex::new(DTP_OFFSET_DATETIME).unwrap(),
            parser: parse_offset_datetime,
            regex_pattern: DTP_OFFSET_DATETIME,
        },
        DateTimeParseInstr {
            regex: Regex::new(DTP_BASIC_ZONED).unwrap(),
            parser: parse_basic_zoned,
            regex_pattern: DTP_BASIC_ZONED,
        },
        DateTimeParseInstr {
            regex: Regex::new(DTP_LOCAL_DATE).unwrap(),
            parser: parse_local_date,
            regex_pattern: DTP_LOCAL_DATE,
        },
        DateTimeParseInstr {
            regex: Regex::new(DTP_WEEK_DATE).unwrap(),
            parser: parse_week_date,
            regex_pattern: DTP_WEEK_DATE,
        },
        DateTimeParseInstr {
            regex: Regex::new(DTP_ORDINAL_DATE).unwrap(),
            parser: parse_ordinal_date,
            regex_pattern: DTP_ORDINAL_DATE,
        },
        DateTimeParseInstr {
            regex: Regex::new(DTP_MONTH_DAY).unwrap(),
            parser: parse_month_day,
            regex_pattern: DTP_MONTH_DAY,
        },
    ];
}

/// shorthand for chrono `NaiveDate::from_ymd_opt().and_hms_opt()`;
/// arguments known-good at the call site (tests, mostly).
pub fn ymdhms(
    year: Year,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTimeL {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// parsing and filtering entry points
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Try every [`DateTimeParseInstr`] in declaration order against `dts`.
///
/// The first structural (regex) match wins. A structural match whose
/// parse routine then rejects the text (e.g. `2024-02-30`) resolves to
/// `None`; later sub-formats are not retried.
pub fn datetime_sniff_parse(dts: &str) -> DateTimeLOpt {
    defn!("({:?})", dts);
    for dtpi in DATETIME_PARSE_DATAS.iter() {
        if dtpi.regex.is_match(dts) {
            defo!("matched {:?}", dtpi);
            let dt = (dtpi.parser)(dts);
            defx!("return {:?}", dt);
            return dt;
        }
    }
    defx!("return None (no sub-format matched)");

    None
}

/// Does `dt` pass both optional bounds? Inclusive on both ends.
pub fn dt_pass_filters(
    dt: &DateTimeL,
    dt_after: &DateTimeLOpt,
    dt_before: &DateTimeLOpt,
) -> bool {
    defñ!("({:?}, {:?}, {:?})", dt, dt_after, dt_before);
    if let Some(after) = dt_after {
        if dt < after {
            return false;
        }
    }
    if let Some(before) = dt_before {
        if dt > before {
            return false;
        }
    }

    true
}
