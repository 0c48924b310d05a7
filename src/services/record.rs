// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Lenient lookups over untyped upstream JSON records.

use serde_json::{Map, Value};

/// One upstream result with no guaranteed schema
pub type ResultRecord = Map<String, Value>;

/// String value of `key`, if it is a string and not empty
pub fn non_empty_str<'a>(record: &'a ResultRecord, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// First key in `keys` holding a non-empty string
pub fn first_non_empty_str<'a>(record: &'a ResultRecord, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| non_empty_str(record, key))
}

/// Nested object under `key`
pub fn object_field<'a>(record: &'a ResultRecord, key: &str) -> Option<&'a ResultRecord> {
    record.get(key).and_then(Value::as_object)
}

/// Keep only the object elements of an array, dropping everything else
pub fn only_objects(items: Vec<Value>) -> Vec<ResultRecord> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}
