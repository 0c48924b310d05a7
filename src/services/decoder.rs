// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::error::DecodeError;
use crate::services::record::{only_objects, ResultRecord};
use serde_json::Value;

/// Object keys that may wrap the result list, checked in order
const RESULT_LIST_KEYS: &[&str] = &["results", "data"];

/// Pull the per-URL result records out of an upstream payload.
///
/// Accepts a bare array, an object wrapping an array under `results` or
/// `data`, or a bare object standing for a single result. Non-object array
/// elements are dropped, so an empty list is a valid outcome. Scalars and
/// `null` are `UnrecognizedStructure`.
pub fn decode_results(payload: Value) -> Result<Vec<ResultRecord>, DecodeError> {
    match payload {
        Value::Array(items) => Ok(only_objects(items)),
        Value::Object(mut object) => {
            let list_key = RESULT_LIST_KEYS
                .iter()
                .find(|key| object.get(**key).is_some_and(Value::is_array));

            if let Some(Value::Array(items)) = list_key.and_then(|key| object.remove(*key)) {
                return Ok(only_objects(items));
            }

            Ok(vec![object])
        }
        _ => Err(DecodeError::UnrecognizedStructure),
    }
}
