use crate::TaskPriority;

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn given_priority_strings_when_parsed_then_round_trip() {
    for priority in [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ] {
        assert_that!(
            TaskPriority::from_str(priority.as_str()).unwrap(),
            eq(priority)
        );
    }
}

#[test]
fn given_unknown_priority_string_when_parsed_then_error() {
    assert_that!(TaskPriority::from_str("critical"), err(anything()));
}

#[test]
fn given_priority_when_serialized_then_snake_case_json() {
    let json = serde_json::to_string(&TaskPriority::Urgent).unwrap();
    assert_that!(json, eq("\"urgent\""));
}
