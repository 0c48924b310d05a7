// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Turns decoded upstream records into client-facing documents.

use crate::models::crawler::CrawlResponseItem;
use crate::services::record::{first_non_empty_str, non_empty_str, object_field, ResultRecord};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level content fields, best first
const CONTENT_KEYS: &[&str] = &[
    "filtered_markdown",
    "fit_markdown",
    "markdown",
    "raw_markdown",
    "content",
    "page_content",
];

/// Fields of a nested `markdown` object, best first
const NESTED_MARKDOWN_KEYS: &[&str] = &[
    "filtered_markdown",
    "fit_markdown",
    "markdown",
    "raw_markdown",
];

/// Best available page content, or an empty string when none is present
pub fn extract_content(record: &ResultRecord) -> String {
    first_non_empty_str(record, CONTENT_KEYS)
        .or_else(|| {
            object_field(record, "markdown")
                .and_then(|markdown| first_non_empty_str(markdown, NESTED_MARKDOWN_KEYS))
        })
        .unwrap_or_default()
        .to_string()
}

/// String-only metadata for a record, with `source` set from its `url`
pub fn assemble_metadata(record: &ResultRecord) -> BTreeMap<String, String> {
    let mut metadata: BTreeMap<String, String> = object_field(record, "metadata")
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| match value {
            Value::String(text) if !text.is_empty() => Some((key.clone(), text.clone())),
            _ => None,
        })
        .collect();

    if let Some(url) = non_empty_str(record, "url") {
        metadata.insert("source".to_string(), url.to_string());
    }

    metadata
}

pub fn to_response_item(record: &ResultRecord) -> CrawlResponseItem {
    CrawlResponseItem {
        content: extract_content(record),
        metadata: assemble_metadata(record),
    }
}
