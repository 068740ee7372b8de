//! # recur-mapper
//!
//! Maps the settings of a recurring-date form widget to and from RFC 5545 RRULE
//! strings.
//!
//! Parsing and validation of the rule grammar are delegated to the `rrule` crate;
//! this crate decides which rule parts the widget reads and writes.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use recur_mapper::{from_rule, to_rule, Frequency};
//!
//! let reference = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
//! let settings = from_rule("FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE", reference).unwrap();
//! assert_eq!(settings.frequency, Some(Frequency::Weekly));
//! assert_eq!(settings.interval, 2);
//!
//! let rule = to_rule(&settings).unwrap();
//! assert_eq!(rule, "RRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE");
//! ```
//!
//! ## Modules
//!
//! - [`mapper`] -- `from_rule` / `to_rule`
//! - [`settings`] -- `RecurrenceSettings` and its value types
//! - [`options`] -- widget config, option labels, visible controls
//! - [`form`] -- submitted field items and request-scoped widget state
//! - [`error`] -- Error types

pub mod error;
pub mod form;
pub mod mapper;
pub mod options;
pub mod settings;

pub use error::MapperError;
pub use form::{massage_values, FieldItem, WidgetState};
pub use mapper::{from_rule, parse_reference, to_rule};
pub use options::{repeat_options, Controls, WidgetConfig, WidgetOptions};
pub use settings::{EndCondition, Frequency, RecurrenceSettings, WeekOrdinal, Weekday};
