//! Widget configuration and the option lists a UI layer renders.
//!
//! Nothing here builds markup. It answers the questions a form needs answered: which
//! frequencies to offer, what to call them, and which settings inputs apply to the
//! chosen frequency.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MapperError, Result};
use crate::settings::{EndCondition, Frequency, WeekOrdinal, Weekday};

/// Per-field widget configuration.
///
/// ```toml
/// allowed_frequencies = ["WEEKLY", "MONTHLY"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub allowed_frequencies: BTreeSet<Frequency>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            allowed_frequencies: Frequency::ALL.into_iter().collect(),
        }
    }
}

impl WidgetConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| MapperError::Config(e.to_string()))
    }

    /// Load a config file; a missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Frequencies offered in the "Repeat" select, in canonical order.
///
/// A field whose stored rule uses a frequency that has since been disallowed still
/// offers it, so editing the field does not silently drop its value.
pub fn repeat_options(config: &WidgetConfig, current: Option<Frequency>) -> Vec<Frequency> {
    Frequency::ALL
        .into_iter()
        .filter(|f| config.allowed_frequencies.contains(f) || current == Some(*f))
        .collect()
}

/// Which settings inputs apply to a frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Controls {
    pub interval: bool,
    pub end_condition: bool,
    pub weekdays: bool,
    pub week_ordinals: bool,
    pub months_of_year: bool,
}

impl Controls {
    /// With no frequency the whole settings group is hidden.
    pub fn for_frequency(frequency: Option<Frequency>) -> Self {
        match frequency {
            None => Self::default(),
            Some(f) => Self {
                interval: true,
                end_condition: true,
                weekdays: f.supports_weekdays(),
                week_ordinals: f == Frequency::Monthly,
                months_of_year: f == Frequency::Monthly,
            },
        }
    }
}

/// A value/label pair for a select, radio or checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl OptionItem {
    fn new(value: impl ToString, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

pub fn frequency_label(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::Yearly => "Yearly",
        Frequency::Monthly => "Monthly",
        Frequency::Weekly => "Weekly",
        Frequency::Daily => "Daily",
        Frequency::Hourly => "Hourly",
        Frequency::Minutely => "Minutely",
        Frequency::Secondly => "Secondly",
    }
}

/// Suffix shown after the interval input ("Every 2 Week(s)").
pub fn interval_unit(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::Yearly => "Year(s)",
        Frequency::Monthly => "Month(s)",
        Frequency::Weekly => "Week(s)",
        Frequency::Daily => "Day(s)",
        Frequency::Hourly => "Hour(s)",
        Frequency::Minutely => "Minute(s)",
        Frequency::Secondly => "Second(s)",
    }
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mo => "Monday",
        Weekday::Tu => "Tuesday",
        Weekday::We => "Wednesday",
        Weekday::Th => "Thursday",
        Weekday::Fr => "Friday",
        Weekday::Sa => "Saturday",
        Weekday::Su => "Sunday",
    }
}

pub fn week_ordinal_label(ordinal: WeekOrdinal) -> &'static str {
    match ordinal {
        WeekOrdinal::First => "First",
        WeekOrdinal::Second => "Second",
        WeekOrdinal::Third => "Third",
        WeekOrdinal::Fourth => "Fourth",
        WeekOrdinal::Fifth => "Fifth",
        WeekOrdinal::Last => "Last",
    }
}

pub fn end_condition_label(end: EndCondition) -> &'static str {
    match end {
        EndCondition::Never => "Never",
        EndCondition::Count => "After",
        EndCondition::Date => "Date",
    }
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Abbreviated month name for 1-12.
pub fn month_label(month: u8) -> Option<&'static str> {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREVIATIONS.get(i))
        .copied()
}

/// Everything a UI layer needs to render the settings group for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetOptions {
    pub repeat: Vec<OptionItem>,
    /// Interval suffix for the selected frequency, if any.
    pub interval_unit: Option<String>,
    pub controls: Controls,
    pub end_conditions: Vec<OptionItem>,
    pub weekdays: Vec<OptionItem>,
    pub week_ordinals: Vec<OptionItem>,
    pub months_of_year: Vec<OptionItem>,
}

impl WidgetOptions {
    /// Option lists for a field currently set to `current`. Groups whose control does
    /// not apply are left empty.
    pub fn build(config: &WidgetConfig, current: Option<Frequency>) -> Self {
        let controls = Controls::for_frequency(current);

        let repeat = repeat_options(config, current)
            .into_iter()
            .map(|f| OptionItem::new(f, frequency_label(f)))
            .collect();

        let end_conditions = if controls.end_condition {
            [EndCondition::Never, EndCondition::Count, EndCondition::Date]
                .into_iter()
                .map(|e| OptionItem::new(end_condition_value(e), end_condition_label(e)))
                .collect()
        } else {
            Vec::new()
        };

        let weekdays = if controls.weekdays {
            Weekday::ALL
                .into_iter()
                .map(|d| OptionItem::new(d, weekday_label(d)))
                .collect()
        } else {
            Vec::new()
        };

        let week_ordinals = if controls.week_ordinals {
            WeekOrdinal::ALL
                .into_iter()
                .map(|o| OptionItem::new(o, week_ordinal_label(o)))
                .collect()
        } else {
            Vec::new()
        };

        let months_of_year = if controls.months_of_year {
            (1..=12u8)
                .filter_map(|m| month_label(m).map(|label| OptionItem::new(m, label)))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            repeat,
            interval_unit: current.map(|f| interval_unit(f).to_string()),
            controls,
            end_conditions,
            weekdays,
            week_ordinals,
            months_of_year,
        }
    }
}

fn end_condition_value(end: EndCondition) -> &'static str {
    match end {
        EndCondition::Never => "never",
        EndCondition::Count => "count",
        EndCondition::Date => "date",
    }
}
