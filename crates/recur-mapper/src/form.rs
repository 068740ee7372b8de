//! Submitted form values and request-scoped widget state.
//!
//! A recurring-date field can hold several items (deltas). On submission each item
//! with a frequency gets its `rrule` computed from its settings; on render the widget
//! seeds its inputs from the stored rule, the submitted values, or the defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mapper::{from_rule, to_rule};
use crate::settings::{Frequency, RecurrenceSettings};

/// One item of a recurring-date field as the form submits it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldItem {
    #[serde(flatten)]
    pub settings: RecurrenceSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,
}

impl FieldItem {
    pub fn new(settings: RecurrenceSettings) -> Self {
        Self {
            settings,
            rrule: None,
        }
    }
}

/// Compute the `rrule` of every item that has a frequency selected.
///
/// Items without a frequency are passed through untouched, including any `rrule`
/// they already carry.
///
/// # Errors
/// Fails on the first item whose settings cannot be encoded (see [`to_rule`]).
pub fn massage_values(items: Vec<FieldItem>) -> Result<Vec<FieldItem>> {
    items
        .into_iter()
        .enumerate()
        .map(|(delta, mut item)| -> Result<FieldItem> {
            if item.settings.is_recurring() {
                let rule = to_rule(&item.settings)?;
                tracing::debug!(delta, rule = %rule, "computed RRULE for field item");
                item.rrule = Some(rule);
            }
            Ok(item)
        })
        .collect()
}

/// State carried across partial rebuilds of one widget within a request.
///
/// When the editor changes the "Repeat" select the form is rebuilt before it is
/// submitted; the choice is remembered here so the rebuilt settings group matches it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    repeat: Option<Option<Frequency>>,
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the frequency picked in the "Repeat" select (`None` for no repeat).
    pub fn remember_repeat(&mut self, choice: Option<Frequency>) {
        self.repeat = Some(choice);
    }

    /// The remembered choice, if the select was changed during this request.
    pub fn remembered_repeat(&self) -> Option<Option<Frequency>> {
        self.repeat
    }

    /// Settings the widget should display.
    ///
    /// Submitted values win over the stored rule, which wins over the widget defaults.
    /// A remembered "Repeat" choice then replaces the frequency.
    ///
    /// # Errors
    /// Returns the [`from_rule`] error if the stored rule has to be decoded and is invalid.
    pub fn seed_settings(
        &self,
        stored_rule: Option<&str>,
        submitted: Option<RecurrenceSettings>,
        reference: DateTime<Utc>,
    ) -> Result<RecurrenceSettings> {
        let mut settings = match (submitted, stored_rule) {
            (Some(submitted), _) => submitted,
            (None, Some(rule)) if !rule.trim().is_empty() => from_rule(rule, reference)?,
            (None, _) => RecurrenceSettings::default(),
        };

        if let Some(choice) = self.repeat {
            settings.frequency = choice;
        }

        Ok(settings)
    }
}
