// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;
use yare::parameterized;

#[test]
fn entry_serializes_with_short_field_names() {
    let entry = LogEntry::new("2024-01-01 00:00:00.000", "[\"hi\"]", Level::Warn);
    let json = serde_json::to_string(&entry).unwrap();
    assert_eq!(
        json,
        r#"{"date":"2024-01-01 00:00:00.000","txt":"[\"hi\"]","lv":"w"}"#
    );
}

#[test]
fn entry_with_details_uses_err_infos_key() {
    let entry = LogEntry::new("d", "t", Level::Error).with_error_details(vec![ErrorDetails {
        message: "boom".to_string(),
        stack: "at x".to_string(),
        source_locations: vec![SourceLocation {
            file: "https://a.test/app.js".to_string(),
            line: 1,
            column: 2,
        }],
    }]);
    let value: serde_json::Value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["errInfos"][0]["message"], "boom");
    assert_eq!(value["errInfos"][0]["sourceLocations"][0]["line"], 1);
}

#[test]
fn empty_details_are_dropped() {
    let entry = LogEntry::new("d", "t", Level::Error).with_error_details(vec![]);
    assert!(entry.err_infos.is_none());
}

#[test]
fn from_stored_roundtrips_entries() {
    let entry = LogEntry::new("d", "[1,2]", Level::UnhandledRejection);
    let text = serde_json::to_string(&entry).unwrap();
    assert_eq!(LogEntry::from_stored(&text), entry);
}

#[test]
fn from_stored_keeps_unparsable_text() {
    let entry = LogEntry::from_stored("__json-err__ : cycle");
    assert_eq!(entry.lv, Level::None);
    assert_eq!(entry.txt, "__json-err__ : cycle");
    assert_eq!(entry.date, "");
}

#[test]
fn same_as_ignores_error_details() {
    let a = LogEntry::new("d", "t", Level::Error);
    let b = a.clone().with_error_details(vec![ErrorDetails {
        message: "m".to_string(),
        stack: String::new(),
        source_locations: vec![],
    }]);
    assert!(a.same_as(&b));
    assert!(!a.same_as(&LogEntry::new("d", "t", Level::Warn)));
    assert!(!a.same_as(&LogEntry::new("d2", "t", Level::Error)));
}

#[parameterized(
    log = { "log", Level::Log },
    short_warn = { "w", Level::Warn },
    upper_error = { "ERROR", Level::Error },
    rejection = { "pe", Level::UnhandledRejection },
    none = { "none", Level::None },
)]
fn level_parses(input: &str, expected: Level) {
    assert_eq!(input.parse::<Level>().unwrap(), expected);
}

#[test]
fn level_rejects_unknown_names() {
    assert!("fatal".parse::<Level>().is_err());
}

#[test]
fn timestamp_has_millisecond_precision() {
    let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).single().unwrap();
    assert_eq!(render_timestamp(at), "2024-03-09 07:05:01.000");
}
