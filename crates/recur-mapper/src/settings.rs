//! Widget-side representation of a recurrence: the values an editor picks in the form.
//!
//! Every type here serializes with serde so that submitted form values (JSON from a
//! UI layer, TOML fixtures, ...) deserialize straight into [`RecurrenceSettings`].
//! Missing fields fall back to the widget defaults.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MapperError;

/// Recurrence frequency (the `FREQ` rule part).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
    Minutely,
    Secondly,
}

impl Frequency {
    /// All frequencies in the order the "Repeat" select lists them.
    pub const ALL: [Frequency; 7] = [
        Frequency::Yearly,
        Frequency::Monthly,
        Frequency::Weekly,
        Frequency::Daily,
        Frequency::Hourly,
        Frequency::Minutely,
        Frequency::Secondly,
    ];

    /// The RFC 5545 keyword, e.g. `"WEEKLY"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Yearly => "YEARLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Daily => "DAILY",
            Frequency::Hourly => "HOURLY",
            Frequency::Minutely => "MINUTELY",
            Frequency::Secondly => "SECONDLY",
        }
    }

    /// Whether BYDAY (weekday and week-ordinal) selections apply.
    pub fn supports_weekdays(self) -> bool {
        matches!(self, Frequency::Monthly | Frequency::Weekly)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == upper)
            .ok_or_else(|| MapperError::UnknownFrequency(s.to_string()))
    }
}

impl From<rrule::Frequency> for Frequency {
    fn from(freq: rrule::Frequency) -> Self {
        match freq {
            rrule::Frequency::Yearly => Frequency::Yearly,
            rrule::Frequency::Monthly => Frequency::Monthly,
            rrule::Frequency::Weekly => Frequency::Weekly,
            rrule::Frequency::Daily => Frequency::Daily,
            rrule::Frequency::Hourly => Frequency::Hourly,
            rrule::Frequency::Minutely => Frequency::Minutely,
            rrule::Frequency::Secondly => Frequency::Secondly,
        }
    }
}

/// How a recurrence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndCondition {
    /// Repeats forever.
    #[default]
    Never,
    /// Stops after `occurrence_count` instances.
    Count,
    /// Stops on `until_date`.
    Date,
}

/// Day of the week, ordered Monday first. Serializes as the two-letter RFC 5545 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mo,
        Weekday::Tu,
        Weekday::We,
        Weekday::Th,
        Weekday::Fr,
        Weekday::Sa,
        Weekday::Su,
    ];

    /// Two-letter code used in BYDAY, e.g. `"MO"`.
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Mo => "MO",
            Weekday::Tu => "TU",
            Weekday::We => "WE",
            Weekday::Th => "TH",
            Weekday::Fr => "FR",
            Weekday::Sa => "SA",
            Weekday::Su => "SU",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Weekday {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Weekday::ALL
            .into_iter()
            .find(|d| d.code() == upper)
            .ok_or_else(|| MapperError::UnknownWeekday(s.to_string()))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Mo,
            chrono::Weekday::Tue => Weekday::Tu,
            chrono::Weekday::Wed => Weekday::We,
            chrono::Weekday::Thu => Weekday::Th,
            chrono::Weekday::Fri => Weekday::Fr,
            chrono::Weekday::Sat => Weekday::Sa,
            chrono::Weekday::Sun => Weekday::Su,
        }
    }
}

/// Which occurrence of a weekday within the period a BYDAY entry selects.
///
/// Only the ordinals the widget offers are representable: the first five weeks
/// and the last one. Serializes as the signed offset (`1`, `2`, ..., `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum WeekOrdinal {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Last,
}

impl WeekOrdinal {
    pub const ALL: [WeekOrdinal; 6] = [
        WeekOrdinal::First,
        WeekOrdinal::Second,
        WeekOrdinal::Third,
        WeekOrdinal::Fourth,
        WeekOrdinal::Fifth,
        WeekOrdinal::Last,
    ];

    pub fn offset(self) -> i8 {
        match self {
            WeekOrdinal::First => 1,
            WeekOrdinal::Second => 2,
            WeekOrdinal::Third => 3,
            WeekOrdinal::Fourth => 4,
            WeekOrdinal::Fifth => 5,
            WeekOrdinal::Last => -1,
        }
    }

    /// Look up the ordinal for a BYDAY offset, if the widget supports it.
    pub fn from_offset(offset: i16) -> Option<Self> {
        WeekOrdinal::ALL
            .into_iter()
            .find(|o| i16::from(o.offset()) == offset)
    }
}

/// Renders the signed prefix used in BYDAY, e.g. `"+2"` or `"-1"`.
impl fmt::Display for WeekOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.offset())
    }
}

impl FromStr for WeekOrdinal {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let offset: i16 = trimmed
            .strip_prefix('+')
            .unwrap_or(trimmed)
            .parse()
            .map_err(|_| MapperError::InvalidRule(format!("invalid week ordinal '{}'", s)))?;
        WeekOrdinal::from_offset(offset).ok_or(MapperError::UnsupportedOrdinal(offset))
    }
}

impl TryFrom<i8> for WeekOrdinal {
    type Error = MapperError;

    fn try_from(offset: i8) -> Result<Self, Self::Error> {
        WeekOrdinal::from_offset(i16::from(offset))
            .ok_or(MapperError::UnsupportedOrdinal(i16::from(offset)))
    }
}

impl From<WeekOrdinal> for i8 {
    fn from(ordinal: WeekOrdinal) -> Self {
        ordinal.offset()
    }
}

/// Everything the recurring-date widget lets an editor configure.
///
/// `Default` yields the widget's initial state: no frequency, an interval of 1,
/// never ending, and no weekday/week/month constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceSettings {
    /// `None` means the field does not repeat.
    pub frequency: Option<Frequency>,
    pub interval: u16,
    pub end_condition: EndCondition,
    /// Only read when `end_condition` is [`EndCondition::Count`].
    pub occurrence_count: Option<u32>,
    /// Only read when `end_condition` is [`EndCondition::Date`].
    pub until_date: Option<NaiveDate>,
    /// Only read for monthly and weekly frequencies.
    pub weekdays: BTreeSet<Weekday>,
    /// Only read for monthly and weekly frequencies, alongside `weekdays`.
    pub week_ordinals: BTreeSet<WeekOrdinal>,
    pub months_of_year: BTreeSet<u8>,
}

impl Default for RecurrenceSettings {
    fn default() -> Self {
        Self {
            frequency: None,
            interval: 1,
            end_condition: EndCondition::Never,
            occurrence_count: None,
            until_date: None,
            weekdays: BTreeSet::new(),
            week_ordinals: BTreeSet::new(),
            months_of_year: BTreeSet::new(),
        }
    }
}

impl RecurrenceSettings {
    /// Settings for `frequency` with every other field at its default.
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency: Some(frequency),
            ..Self::default()
        }
    }

    /// True when a frequency is selected, i.e. the field should carry an RRULE.
    pub fn is_recurring(&self) -> bool {
        self.frequency.is_some()
    }
}
