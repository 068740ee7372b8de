//! # recur-python
//!
//! Python bindings for recur-mapper, built with PyO3.
//!
//! Exposes the following functions to Python as the `_native` module:
//!
//! - `from_rule(rule, dtstart, timezone)` -- RRULE -> settings JSON string
//! - `to_rule(settings_json)` -- settings JSON string -> RRULE string
//! - `massage_values(items_json)` -- field items JSON -> field items JSON with `rrule`
//! - `widget_options(config_json, current)` -- repeat options and controls as JSON

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use recur_mapper::{FieldItem, Frequency, RecurrenceSettings, WidgetConfig, WidgetOptions};

fn value_error(e: impl ToString) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Decode an RRULE into widget settings, returned as a JSON string.
///
/// Args:
///     rule: RRULE body (e.g., "FREQ=WEEKLY;BYDAY=MO,WE"), `RRULE:` line or block.
///     dtstart: DTSTART the rule is anchored to (e.g., "2026-02-17T14:00:00").
///     timezone: IANA timezone for a local `dtstart`. Default: "UTC".
///
/// Returns:
///     A JSON object with `frequency`, `interval`, `end_condition`, `occurrence_count`,
///     `until_date`, `weekdays`, `week_ordinals` and `months_of_year`.
///
/// Raises:
///     ValueError: If the rule, dtstart or timezone is invalid.
#[pyfunction]
#[pyo3(signature = (rule, dtstart, timezone="UTC"))]
fn from_rule(rule: &str, dtstart: &str, timezone: &str) -> PyResult<String> {
    let reference = recur_mapper::parse_reference(dtstart, timezone).map_err(value_error)?;
    let settings = recur_mapper::from_rule(rule, reference).map_err(value_error)?;
    serde_json::to_string(&settings).map_err(value_error)
}

/// Encode widget settings as an `RRULE:` string.
///
/// Args:
///     settings_json: JSON object of settings; missing fields take widget defaults.
///
/// Raises:
///     ValueError: If the JSON is malformed or the settings cannot be encoded.
#[pyfunction]
fn to_rule(settings_json: &str) -> PyResult<String> {
    let settings: RecurrenceSettings = serde_json::from_str(settings_json).map_err(value_error)?;
    recur_mapper::to_rule(&settings).map_err(value_error)
}

/// Compute the `rrule` of every recurring item in a JSON array of field items.
#[pyfunction]
fn massage_values(items_json: &str) -> PyResult<String> {
    let items: Vec<FieldItem> = serde_json::from_str(items_json).map_err(value_error)?;
    let items = recur_mapper::massage_values(items).map_err(value_error)?;
    serde_json::to_string(&items).map_err(value_error)
}

/// Repeat options, labels and visible controls for a field, as a JSON string.
///
/// Args:
///     config_json: Optional `{"allowed_frequencies": [...]}`. Default: all allowed.
///     current: Optional frequency the field is currently set to.
#[pyfunction]
#[pyo3(signature = (config_json=None, current=None))]
fn widget_options(config_json: Option<&str>, current: Option<&str>) -> PyResult<String> {
    let config = match config_json {
        Some(json) => serde_json::from_str::<WidgetConfig>(json).map_err(value_error)?,
        None => WidgetConfig::default(),
    };
    let current = current
        .map(str::parse::<Frequency>)
        .transpose()
        .map_err(value_error)?;
    serde_json::to_string(&WidgetOptions::build(&config, current)).map_err(value_error)
}

#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(from_rule, m)?)?;
    m.add_function(wrap_pyfunction!(to_rule, m)?)?;
    m.add_function(wrap_pyfunction!(massage_values, m)?)?;
    m.add_function(wrap_pyfunction!(widget_options, m)?)?;
    Ok(())
}
