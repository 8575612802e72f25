//! Conversions from raw option values to their typed forms. Every converter takes the option name
//! as written so that errors can report it.

use std::time::Duration;

use crate::{
    error::{Error, Result, ValueType},
    selection_criteria::{Tag, TagSet},
};

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;

/// A closed enumeration whose members can be named in a connection string.
pub(crate) trait UriEnum: Copy + PartialEq + 'static {
    /// Reported as the expected type when a value matches no member.
    const TYPE_NAME: &'static str;

    /// Canonical member names. Lookups ignore case.
    const MEMBERS: &'static [(&'static str, Self)];

    fn lookup(name: &str) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .find(|(member, _)| member.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    fn name_of(value: Self) -> &'static str {
        Self::MEMBERS
            .iter()
            .find(|(_, member)| *member == value)
            .map(|(name, _)| *name)
            .unwrap_or(Self::TYPE_NAME)
    }
}

pub(crate) fn parse_bool(option: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::invalid_option_value(option, value, ValueType::Boolean)),
    }
}

pub(crate) fn parse_i32(option: &str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::invalid_option_value(option, value, ValueType::Int32))
}

pub(crate) fn parse_enum<T: UriEnum>(option: &str, value: &str) -> Result<T> {
    T::lookup(value)
        .ok_or_else(|| Error::invalid_option_value(option, value, ValueType::Enum(T::TYPE_NAME)))
}

/// Parses a duration. The unit is resolved in this order:
///
/// 1. an option name ending in `ms` means the value is a bare number of milliseconds;
/// 2. a value ending in `ms`, `s`, `m` or `h` is in that unit;
/// 3. a value containing `:` is positional, `[d.]hh:mm[:ss[.fffffff]]`;
/// 4. anything else is a number of seconds.
pub(crate) fn parse_duration(option: &str, value: &str) -> Result<Duration> {
    let invalid = || Error::invalid_option_value(option, value, ValueType::Duration);

    let lower_option = option.to_lowercase();
    let lower_value = value.to_lowercase();

    let (magnitude, multiplier) = if lower_option.ends_with("ms") {
        (lower_value.as_str(), 1.0)
    } else if let Some(stripped) = lower_value.strip_suffix("ms") {
        (stripped, 1.0)
    } else if let Some(stripped) = lower_value.strip_suffix('s') {
        (stripped, MILLIS_PER_SECOND)
    } else if let Some(stripped) = lower_value.strip_suffix('m') {
        (stripped, MILLIS_PER_MINUTE)
    } else if let Some(stripped) = lower_value.strip_suffix('h') {
        (stripped, MILLIS_PER_HOUR)
    } else if lower_value.contains(':') {
        return parse_positional_duration(&lower_value).ok_or_else(invalid);
    } else {
        (lower_value.as_str(), MILLIS_PER_SECOND)
    };

    let magnitude = parse_decimal(magnitude).ok_or_else(invalid)?;
    millis_to_duration(magnitude * multiplier).ok_or_else(invalid)
}

/// Plain decimal numbers only; `f64::from_str` would also accept `inf` and `NaN`.
fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty()
        || !digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        || !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn millis_to_duration(millis: f64) -> Option<Duration> {
    if !millis.is_finite() || millis < 0.0 || millis > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_millis(millis.round() as u64))
}

/// Accepts `[d.]hh:mm[:ss[.fffffff]]` and `d:hh:mm:ss[.fffffff]`.
fn parse_positional_duration(s: &str) -> Option<Duration> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    let (days, hours, minutes, seconds) = match parts.as_slice() {
        [first, minutes] => {
            let (days, hours) = split_days(first)?;
            (days, hours, *minutes, None)
        }
        [first, minutes, seconds] => {
            let (days, hours) = split_days(first)?;
            (days, hours, *minutes, Some(*seconds))
        }
        [days, hours, minutes, seconds] => (
            parse_component(days, u32::MAX)?,
            *hours,
            *minutes,
            Some(*seconds),
        ),
        _ => return None,
    };

    let hours = parse_component(hours, 23)?;
    let minutes = parse_component(minutes, 59)?;

    let (seconds, fraction) = match seconds {
        Some(seconds) => match seconds.split_once('.') {
            Some((whole, fraction)) => (parse_component(whole, 59)?, parse_fraction(fraction)?),
            None => (parse_component(seconds, 59)?, 0.0),
        },
        None => (0, 0.0),
    };

    let millis = f64::from(days) * MILLIS_PER_DAY
        + f64::from(hours) * MILLIS_PER_HOUR
        + f64::from(minutes) * MILLIS_PER_MINUTE
        + (f64::from(seconds) + fraction) * MILLIS_PER_SECOND;
    millis_to_duration(millis)
}

fn split_days(first: &str) -> Option<(u32, &str)> {
    match first.split_once('.') {
        Some((days, hours)) => Some((parse_component(days, u32::MAX)?, hours)),
        None => Some((0, first)),
    }
}

fn parse_component(s: &str, max: u32) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|n| *n <= max)
}

fn parse_fraction(s: &str) -> Option<f64> {
    if s.is_empty() || s.len() > 7 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    format!("0.{s}").parse().ok()
}

/// Parses one `readPreferenceTags` value: comma-separated `key:value` pairs, each side trimmed.
pub(crate) fn parse_tag_set(option: &str, value: &str) -> Result<TagSet> {
    let mut tag_set = TagSet::new();
    for tag in value.split(',') {
        let mut parts = tag.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(tag_value), None) => {
                tag_set.add(Tag::new(name.trim(), tag_value.trim()));
            }
            _ => return Err(Error::invalid_option_value(option, value, ValueType::TagSet)),
        }
    }
    Ok(tag_set)
}
