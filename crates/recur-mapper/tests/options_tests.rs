//! Tests for widget config, repeat options and visible controls.

use recur_mapper::options::{frequency_label, interval_unit, OptionItem};
use recur_mapper::{repeat_options, Controls, Frequency, WidgetConfig, WidgetOptions};

fn config(frequencies: &[Frequency]) -> WidgetConfig {
    WidgetConfig {
        allowed_frequencies: frequencies.iter().copied().collect(),
    }
}

#[test]
fn default_config_offers_all_frequencies_in_order() {
    let offered = repeat_options(&WidgetConfig::default(), None);
    assert_eq!(offered, Frequency::ALL.to_vec());
}

#[test]
fn restricted_config_offers_only_allowed() {
    let cfg = config(&[Frequency::Weekly, Frequency::Monthly]);
    assert_eq!(
        repeat_options(&cfg, None),
        vec![Frequency::Monthly, Frequency::Weekly]
    );
}

#[test]
fn stored_frequency_is_offered_even_if_disallowed() {
    let cfg = config(&[Frequency::Weekly]);
    assert_eq!(
        repeat_options(&cfg, Some(Frequency::Hourly)),
        vec![Frequency::Weekly, Frequency::Hourly]
    );
}

#[test]
fn config_loads_from_toml() {
    let cfg = WidgetConfig::from_toml_str(r#"allowed_frequencies = ["DAILY", "YEARLY"]"#).unwrap();
    assert_eq!(cfg, config(&[Frequency::Daily, Frequency::Yearly]));
}

#[test]
fn config_loads_from_file_and_defaults_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widget.toml");

    assert_eq!(WidgetConfig::load(&path).unwrap(), WidgetConfig::default());

    std::fs::write(&path, "allowed_frequencies = [\"MONTHLY\"]\n").unwrap();
    assert_eq!(
        WidgetConfig::load(&path).unwrap(),
        config(&[Frequency::Monthly])
    );
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

#[test]
fn no_frequency_hides_every_control() {
    assert_eq!(Controls::for_frequency(None), Controls::default());
}

#[test]
fn weekly_shows_weekdays_but_not_ordinals_or_months() {
    let controls = Controls::for_frequency(Some(Frequency::Weekly));
    assert!(controls.interval);
    assert!(controls.end_condition);
    assert!(controls.weekdays);
    assert!(!controls.week_ordinals);
    assert!(!controls.months_of_year);
}

#[test]
fn monthly_shows_everything() {
    let controls = Controls::for_frequency(Some(Frequency::Monthly));
    assert!(controls.weekdays && controls.week_ordinals && controls.months_of_year);
}

#[test]
fn daily_shows_only_interval_and_end() {
    let controls = Controls::for_frequency(Some(Frequency::Daily));
    assert!(controls.interval && controls.end_condition);
    assert!(!controls.weekdays && !controls.week_ordinals && !controls.months_of_year);
}

// ---------------------------------------------------------------------------
// Labels / WidgetOptions
// ---------------------------------------------------------------------------

#[test]
fn labels_match_frequency() {
    assert_eq!(frequency_label(Frequency::Monthly), "Monthly");
    assert_eq!(interval_unit(Frequency::Weekly), "Week(s)");
    assert_eq!(interval_unit(Frequency::Secondly), "Second(s)");
}

#[test]
fn monthly_widget_options_list_every_group() {
    let options = WidgetOptions::build(&WidgetConfig::default(), Some(Frequency::Monthly));

    assert_eq!(options.repeat.len(), 7);
    assert_eq!(options.interval_unit.as_deref(), Some("Month(s)"));
    assert_eq!(options.end_conditions.len(), 3);
    assert_eq!(options.weekdays.len(), 7);
    assert_eq!(
        options.week_ordinals.first(),
        Some(&OptionItem {
            value: "+1".to_string(),
            label: "First".to_string()
        })
    );
    assert_eq!(
        options.week_ordinals.last(),
        Some(&OptionItem {
            value: "-1".to_string(),
            label: "Last".to_string()
        })
    );
    assert_eq!(options.months_of_year.len(), 12);
    assert_eq!(options.months_of_year[0].label, "Jan");
}

#[test]
fn empty_frequency_widget_options_only_list_repeat() {
    let options = WidgetOptions::build(&WidgetConfig::default(), None);

    assert_eq!(options.repeat.len(), 7);
    assert_eq!(options.interval_unit, None);
    assert!(options.end_conditions.is_empty());
    assert!(options.weekdays.is_empty());
    assert!(options.week_ordinals.is_empty());
    assert!(options.months_of_year.is_empty());
}
