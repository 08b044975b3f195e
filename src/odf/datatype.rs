//! ODF data type conversions (Boolean, Timestamp, Duration).
//!
//! Converts the string forms found in `office:boolean-value`,
//! `office:date-value` and `office:time-value` attributes into Rust values.

use crate::common::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

// ============================================================================
// BOOLEAN CONVERSION
// ============================================================================

/// Boolean data type conversion utilities
pub struct Boolean;

impl Boolean {
    /// Decode an XML schema boolean (`true`, `false`, `1`, `0`).
    ///
    /// # Examples
    ///
    /// ```
    /// use odfgrid::odf::datatype::Boolean;
    ///
    /// assert_eq!(Boolean::decode("true").unwrap(), true);
    /// assert_eq!(Boolean::decode("0").unwrap(), false);
    /// assert!(Boolean::decode("yes").is_err());
    /// ```
    pub fn decode(data: &str) -> Result<bool> {
        match data.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(Error::ParseError(format!(
                "boolean '{}' is invalid, expected 'true' or 'false'",
                data
            ))),
        }
    }
}

// ============================================================================
// TIMESTAMP CONVERSION
// ============================================================================

/// Calendar date/time conversion utilities
pub struct Timestamp;

impl Timestamp {
    /// Decode an ISO 8601 date or date-time into a naive timestamp.
    ///
    /// Plain dates decode to midnight. Values carrying a UTC offset are
    /// converted to UTC wall-clock time.
    ///
    /// # Examples
    ///
    /// ```
    /// use odfgrid::odf::datatype::Timestamp;
    /// use chrono::NaiveDate;
    ///
    /// let ts = Timestamp::decode("2003-01-02").unwrap();
    /// assert_eq!(ts, NaiveDate::from_ymd_opt(2003, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap());
    /// ```
    pub fn decode(data: &str) -> Result<NaiveDateTime> {
        let data = data.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(data) {
            return Ok(dt.naive_utc());
        }

        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(data, "%Y-%m-%dT%H:%M:%S") {
            return Ok(naive_dt);
        }

        // Try with fractional seconds
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(data, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive_dt);
        }

        if let Ok(date) = NaiveDate::parse_from_str(data, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).ok_or_else(|| {
                Error::ParseError(format!("Failed to parse ODF date '{}'", data))
            });
        }

        Err(Error::ParseError(format!("Failed to parse ODF date '{}'", data)))
    }
}

// ============================================================================
// DURATION CONVERSION
// ============================================================================

/// Duration data type conversion utilities
///
/// ODF stores `time` cells as XML schema durations, `[-]PnYnMnDTnHnMnS`. Only
/// the day and time-of-day components are supported; a nonzero year or month
/// has no fixed length and is rejected rather than approximated.
pub struct DurationOdf;

/// Components collected while scanning a duration string.
#[derive(Debug, Default)]
struct DurationParts {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl DurationOdf {
    /// Decode an ODF duration string into a signed `TimeDelta`.
    ///
    /// A `-` anywhere in the string marks the whole duration negative, so
    /// `P-1D` and `PT1H-` read as minus one day and minus one hour. Repeated
    /// signs do not cancel.
    ///
    /// # Examples
    ///
    /// ```
    /// use odfgrid::odf::datatype::DurationOdf;
    /// use chrono::TimeDelta;
    ///
    /// assert_eq!(DurationOdf::decode("-P120D").unwrap(), TimeDelta::days(-120));
    /// assert_eq!(DurationOdf::decode("P0Y0M3D").unwrap(), TimeDelta::days(3));
    /// assert_eq!(
    ///     DurationOdf::decode("PT1H30M55S").unwrap(),
    ///     TimeDelta::hours(1) + TimeDelta::minutes(30) + TimeDelta::seconds(55)
    /// );
    /// ```
    pub fn decode(duration: &str) -> Result<TimeDelta> {
        let mut parts = DurationParts::default();
        let mut in_time = false;
        let mut is_negative = false;
        // Start of the pending digit run
        let mut start = 0;

        for (i, c) in duration.char_indices() {
            let slot = match c {
                '-' => {
                    is_negative = true;
                    None
                },
                'P' => None,
                'T' => {
                    in_time = true;
                    None
                },
                'Y' => Some(&mut parts.years),
                'M' if !in_time => Some(&mut parts.months),
                'D' => Some(&mut parts.days),
                'H' => Some(&mut parts.hours),
                'M' => Some(&mut parts.minutes),
                'S' => Some(&mut parts.seconds),
                c if c.is_ascii_digit() => continue,
                other => {
                    return Err(Error::DurationFormat {
                        character: other,
                        input: duration.to_string(),
                    });
                },
            };

            if let Some(slot) = slot {
                *slot = Self::component(duration, start, i, c)?;
            }
            start = i + c.len_utf8();
        }

        if start < duration.len() {
            return Err(Error::ParseError(format!(
                "Trailing digits without a unit in duration '{}'",
                duration
            )));
        }

        if parts.years != 0 {
            return Err(Error::Unsupported(format!(
                "year component in duration '{}'",
                duration
            )));
        }
        if parts.months != 0 {
            return Err(Error::Unsupported(format!(
                "month component in duration '{}'",
                duration
            )));
        }

        let delta = Self::compose(&parts).ok_or_else(|| {
            Error::ParseError(format!("Duration '{}' is out of range", duration))
        })?;

        Ok(if is_negative { -delta } else { delta })
    }

    /// Parse the digit run `[start, end)` preceding `unit`.
    fn component(duration: &str, start: usize, end: usize, unit: char) -> Result<i64> {
        duration[start..end].parse::<i64>().map_err(|_| {
            Error::ParseError(format!(
                "Missing or invalid number before '{}' in duration '{}'",
                unit, duration
            ))
        })
    }

    fn compose(parts: &DurationParts) -> Option<TimeDelta> {
        TimeDelta::try_days(parts.days)?
            .checked_add(&TimeDelta::try_hours(parts.hours)?)?
            .checked_add(&TimeDelta::try_minutes(parts.minutes)?)?
            .checked_add(&TimeDelta::try_seconds(parts.seconds)?)
    }

    /// Encode a `TimeDelta` as a canonical ODF duration (`[-]PnDTnHnMnS`).
    ///
    /// Sub-second precision is truncated.
    ///
    /// # Examples
    ///
    /// ```
    /// use odfgrid::odf::datatype::DurationOdf;
    /// use chrono::TimeDelta;
    ///
    /// assert_eq!(DurationOdf::encode(&TimeDelta::minutes(90)), "P0DT1H30M0S");
    /// assert_eq!(DurationOdf::encode(&TimeDelta::days(-120)), "-P120DT0H0M0S");
    /// ```
    pub fn encode(value: &TimeDelta) -> String {
        let total_seconds = value.num_seconds();
        let sign = if total_seconds < 0 { "-" } else { "" };
        let abs_seconds = total_seconds.unsigned_abs();

        let days = abs_seconds / 86_400;
        let hours = (abs_seconds % 86_400) / 3_600;
        let minutes = (abs_seconds % 3_600) / 60;
        let seconds = abs_seconds % 60;

        format!("{}P{}DT{}H{}M{}S", sign, days, hours, minutes, seconds)
    }
}
