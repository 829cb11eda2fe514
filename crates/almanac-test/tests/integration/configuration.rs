//! Settings flowing into serializer options and logging.

use almanac_test::component::config::{ParameterOrder, Settings};
use almanac_test::component::ical::{SerializeOptions, parse, serialize_with};
use almanac_test::logging;

use super::helpers::*;

#[test]
fn settings_drive_serializer_options() {
    let settings = Settings::from_toml(
        "[logging]\nlevel = \"debug\"\n\n[serializer]\nfold_lines = false\nparameter_order = \"legacy\"\n",
    )
    .expect("settings parse");
    logging::init(&settings.logging);

    let options = SerializeOptions::from(&settings.serializer);
    assert_eq!(options.parameter_order, ParameterOrder::Legacy);
    assert!(!options.fold_lines);

    let long = "y".repeat(100);
    let calendars =
        parse(&event_calendar(&["UID:cfg-1", &format!("SUMMARY:{long}")])).expect("input parses");
    assert!(serialize_with(&calendars, &options).contains(&format!("SUMMARY:{long}\r\n")));
}

#[test_log::test]
fn default_settings_match_default_options() {
    let settings = Settings::from_toml("").expect("defaults load");
    assert_eq!(
        SerializeOptions::from(&settings.serializer),
        SerializeOptions::default()
    );
    assert_eq!(
        SerializeOptions::from(&Settings::default().serializer),
        SerializeOptions::default()
    );
}

#[test_log::test]
fn invalid_settings_are_rejected() {
    assert!(Settings::from_toml("[serializer]\nparameter_order = \"alphabetical\"\n").is_err());
    assert!(Settings::from_toml("[logging]\nlevel = \"chatty\"\n").is_err());
}
