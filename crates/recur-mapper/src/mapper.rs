//! RRULE <-> widget settings mapping.
//!
//! The grammar work (tokenizing, value parsing, validation against a DTSTART) is done
//! by the `rrule` crate. This module only decides which rule parts the widget reads
//! and writes, and how they map onto [`RecurrenceSettings`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rrule::{NWeekday, RRule, Unvalidated};
use std::collections::BTreeSet;

use crate::error::{MapperError, Result};
use crate::settings::{EndCondition, Frequency, RecurrenceSettings, WeekOrdinal, Weekday};

/// Decode a recurrence rule into the settings the widget should display.
///
/// `rule` may be a bare body (`"FREQ=WEEKLY;BYDAY=MO"`), an `RRULE:` line, or a
/// multi-line block that also carries `DTSTART`/`EXDATE` lines. Only the first RRULE
/// is mapped; any further rules are ignored.
///
/// `reference` is the DTSTART the rule is anchored to. Decoding only reads rule parts,
/// so a rule whose UNTIL lies before the reference still decodes.
///
/// # Errors
/// Returns `MapperError::InvalidRule` if no rule is present or the grammar parser
/// rejects it, and `MapperError::UnsupportedOrdinal` if BYDAY uses an ordinal other
/// than -1 or +1..+5.
pub fn from_rule(rule: &str, reference: DateTime<Utc>) -> Result<RecurrenceSettings> {
    // BYDAY codes and keywords are case-insensitive.
    let body = first_rule_body(rule)?.to_ascii_uppercase();

    // Parts are read from the unvalidated rule: building it against a DTSTART would
    // inject BYxxx defaults and reject rules that ended before that DTSTART.
    let parsed: RRule<Unvalidated> = body
        .parse()
        .map_err(|e| MapperError::InvalidRule(format!("{}", e)))?;

    let frequency = Frequency::from(parsed.get_freq());
    let mut settings = RecurrenceSettings::new(frequency);
    settings.interval = parsed.get_interval();

    // The calendar date in the zone UNTIL was written in: UTC for `...Z`, floating
    // otherwise. Converting a floating value through the host zone could shift the day.
    let until = parsed.get_until().map(|until| until.date_naive());
    apply_end_condition(&mut settings, parsed.get_count(), until);

    for nweekday in parsed.get_by_weekday() {
        match nweekday {
            NWeekday::Every(day) => {
                settings.weekdays.insert(Weekday::from(*day));
            }
            NWeekday::Nth(n, day) => {
                let ordinal =
                    WeekOrdinal::from_offset(*n).ok_or(MapperError::UnsupportedOrdinal(*n))?;
                settings.week_ordinals.insert(ordinal);
                settings.weekdays.insert(Weekday::from(*day));
            }
        }
    }

    settings.months_of_year = parsed.get_by_month().iter().copied().collect();

    tracing::debug!(
        frequency = %frequency,
        interval = settings.interval,
        end = ?settings.end_condition,
        reference = %reference,
        "decoded RRULE into widget settings"
    );

    Ok(settings)
}

/// Encode widget settings as an `RRULE:`-labelled rule string.
///
/// Parts are emitted in a fixed order: FREQ, INTERVAL, COUNT or UNTIL, BYDAY, BYMONTH.
/// BYDAY is only written for monthly and weekly frequencies. When week ordinals are
/// selected, every ordinal is paired with every weekday (ordinal-major).
///
/// A count end condition without an occurrence count (or with a zero count), and a
/// date end condition without a date, produce no end part at all.
///
/// # Errors
/// Returns `MapperError::MissingFrequency` if no frequency is selected,
/// `MapperError::InvalidInterval` / `MapperError::InvalidMonth` for values the grammar
/// cannot express, and `MapperError::InvalidRule` if the grammar parser rejects the
/// serialized rule.
pub fn to_rule(settings: &RecurrenceSettings) -> Result<String> {
    let frequency = settings.frequency.ok_or(MapperError::MissingFrequency)?;
    if settings.interval == 0 {
        return Err(MapperError::InvalidInterval(settings.interval));
    }

    let mut parts: Vec<(&str, String)> = vec![
        ("FREQ", frequency.to_string()),
        ("INTERVAL", settings.interval.to_string()),
    ];

    match settings.end_condition {
        EndCondition::Never => {}
        EndCondition::Count => {
            if let Some(count) = settings.occurrence_count.filter(|c| *c > 0) {
                parts.push(("COUNT", count.to_string()));
            }
        }
        EndCondition::Date => {
            if let Some(date) = settings.until_date {
                parts.push(("UNTIL", format_until(date)));
            }
        }
    }

    if frequency.supports_weekdays() && !settings.weekdays.is_empty() {
        parts.push((
            "BYDAY",
            format_by_day(&settings.week_ordinals, &settings.weekdays),
        ));
    }

    if !settings.months_of_year.is_empty() {
        if let Some(month) = settings
            .months_of_year
            .iter()
            .find(|m| !(1..=12).contains(*m))
        {
            return Err(MapperError::InvalidMonth(*month));
        }
        let months: Vec<String> = settings
            .months_of_year
            .iter()
            .map(|m| m.to_string())
            .collect();
        parts.push(("BYMONTH", months.join(",")));
    }

    let body = parts
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(";");

    // The emitted rule must parse back through the grammar.
    body.parse::<RRule<Unvalidated>>()
        .map_err(|e| MapperError::InvalidRule(format!("{}", e)))?;

    tracing::debug!(rule = %body, "encoded widget settings as RRULE");

    Ok(format!("RRULE:{}", body))
}

/// Resolve a reference DTSTART given as text.
///
/// Accepts RFC 3339 (`"2026-02-17T14:00:00+01:00"`), a local date-time
/// (`"2026-02-17T14:00:00"`) or a bare date (`"2026-02-17"`, midnight). Local values
/// are interpreted in the IANA `timezone`.
///
/// # Errors
/// Returns `MapperError::InvalidTimezone` for an unknown zone and
/// `MapperError::InvalidReference` for unparseable or non-existent local times.
pub fn parse_reference(dtstart: &str, timezone: &str) -> Result<DateTime<Utc>> {
    let tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| MapperError::InvalidTimezone(timezone.to_string()))?;

    let trimmed = dtstart.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|e| MapperError::InvalidReference(format!("'{}': {}", dtstart, e)))?;

    // Spring-forward gaps have no local instant; ambiguous times take the earlier one.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            MapperError::InvalidReference(format!("'{}' does not exist in {}", dtstart, timezone))
        })
}

/// Pick the body of the first RRULE in `text`.
fn first_rule_body(text: &str) -> Result<&str> {
    let mut bodies = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(rule_body);

    let first = bodies
        .next()
        .ok_or_else(|| MapperError::InvalidRule("no RRULE found".to_string()))?;

    let ignored = bodies.count();
    if ignored > 0 {
        tracing::warn!(ignored, "only the first RRULE is mapped; ignoring the rest");
    }

    Ok(first)
}

/// `RRULE:...` and bare `FREQ=...` lines yield their body; other properties
/// (`DTSTART`, `EXDATE`, ...) yield nothing.
fn rule_body(line: &str) -> Option<&str> {
    match line.split_once(':') {
        Some((name, body)) => {
            let property = name.split(';').next().unwrap_or(name);
            property.eq_ignore_ascii_case("RRULE").then_some(body)
        }
        None => Some(line),
    }
}

/// A zero COUNT counts as absent, so it falls through to UNTIL.
fn apply_end_condition(
    settings: &mut RecurrenceSettings,
    count: Option<u32>,
    until: Option<NaiveDate>,
) {
    if let Some(count) = count.filter(|c| *c > 0) {
        settings.end_condition = EndCondition::Count;
        settings.occurrence_count = Some(count);
    } else if let Some(date) = until {
        settings.end_condition = EndCondition::Date;
        settings.until_date = Some(date);
    } else {
        settings.end_condition = EndCondition::Never;
    }
}

/// UNTIL is written as the last second of the day in UTC, so the until date itself
/// is still included.
fn format_until(date: NaiveDate) -> String {
    format!("{}T235959Z", date.format("%Y%m%d"))
}

fn format_by_day(ordinals: &BTreeSet<WeekOrdinal>, weekdays: &BTreeSet<Weekday>) -> String {
    if ordinals.is_empty() {
        return weekdays
            .iter()
            .map(|day| day.code())
            .collect::<Vec<_>>()
            .join(",");
    }

    let mut tokens = Vec::with_capacity(ordinals.len() * weekdays.len());
    for ordinal in ordinals {
        for day in weekdays {
            tokens.push(format!("{}{}", ordinal, day));
        }
    }
    tokens.join(",")
}
