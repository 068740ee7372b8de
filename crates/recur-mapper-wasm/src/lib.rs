//! WASM bindings for recur-mapper.
//!
//! Exposes the RRULE <-> widget settings mapping to JavaScript via `wasm-bindgen`.
//! Settings, field items and widget options cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p recur-mapper-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/recur-mapper-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/recur_mapper_wasm.wasm
//! ```

use recur_mapper::{FieldItem, Frequency, RecurrenceSettings, WidgetConfig, WidgetOptions};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON-in / JSON-out implementations (kept free of JsValue so they run natively)
// ---------------------------------------------------------------------------

fn from_rule_json(rule: &str, dtstart: &str, timezone: &str) -> Result<String, String> {
    let reference = recur_mapper::parse_reference(dtstart, timezone).map_err(|e| e.to_string())?;
    let settings = recur_mapper::from_rule(rule, reference).map_err(|e| e.to_string())?;
    serde_json::to_string(&settings).map_err(|e| format!("Serialization error: {}", e))
}

fn to_rule_json(settings_json: &str) -> Result<String, String> {
    let settings: RecurrenceSettings = serde_json::from_str(settings_json)
        .map_err(|e| format!("Invalid settings JSON: {}", e))?;
    recur_mapper::to_rule(&settings).map_err(|e| e.to_string())
}

fn massage_values_json(items_json: &str) -> Result<String, String> {
    let items: Vec<FieldItem> = serde_json::from_str(items_json)
        .map_err(|e| format!("Invalid field items JSON: {}", e))?;
    let items = recur_mapper::massage_values(items).map_err(|e| e.to_string())?;
    serde_json::to_string(&items).map_err(|e| format!("Serialization error: {}", e))
}

fn widget_options_json(config_json: Option<&str>, current: Option<&str>) -> Result<String, String> {
    let config = match config_json {
        Some(json) => serde_json::from_str::<WidgetConfig>(json)
            .map_err(|e| format!("Invalid widget config JSON: {}", e))?,
        None => WidgetConfig::default(),
    };
    let current = current
        .map(str::parse::<Frequency>)
        .transpose()
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&WidgetOptions::build(&config, current))
        .map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Decode an RRULE into widget settings.
///
/// Returns the settings as a JSON string.
///
/// # Arguments
/// - `rule` -- RRULE body, `RRULE:` line, or multi-line block
/// - `dtstart` -- DTSTART the rule is anchored to (e.g., "2026-02-17T14:00:00")
/// - `timezone` -- IANA timezone for a local `dtstart` (e.g., "Europe/Berlin")
#[wasm_bindgen(js_name = "fromRule")]
pub fn from_rule(rule: &str, dtstart: &str, timezone: &str) -> Result<String, JsValue> {
    from_rule_json(rule, dtstart, timezone).map_err(|e| JsValue::from_str(&e))
}

/// Encode widget settings (JSON) as an `RRULE:` string.
#[wasm_bindgen(js_name = "toRule")]
pub fn to_rule(settings_json: &str) -> Result<String, JsValue> {
    to_rule_json(settings_json).map_err(|e| JsValue::from_str(&e))
}

/// Fill in the `rrule` of every recurring item in a JSON array of field items.
#[wasm_bindgen(js_name = "massageValues")]
pub fn massage_values(items_json: &str) -> Result<String, JsValue> {
    massage_values_json(items_json).map_err(|e| JsValue::from_str(&e))
}

/// Repeat options, labels and visible controls for a field.
///
/// `config_json` is `{"allowed_frequencies": [...]}`; all frequencies are allowed
/// when omitted. `current` is the frequency the field is set to, if any.
#[wasm_bindgen(js_name = "widgetOptions")]
pub fn widget_options(
    config_json: Option<String>,
    current: Option<String>,
) -> Result<String, JsValue> {
    widget_options_json(config_json.as_deref(), current.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}
