// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Crawl request as posted by the client.
///
/// Both fields are optional and neither is trusted; `null` list entries are
/// accepted and treated like empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlRequest {
    /// URLs to crawl, in the order the client wants them back
    #[serde(default)]
    pub urls: Option<Vec<Option<String>>>,
    /// A single URL, appended after `urls`
    #[serde(default)]
    pub url: Option<String>,
}

/// One crawled document returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResponseItem {
    pub content: String,
    pub metadata: BTreeMap<String, String>,
}

/// Error body shared by every non-200 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Browser options sent with every upstream crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserConfig {
    pub text_mode: bool,
}

/// Run options sent with every upstream crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerRunConfig {
    pub remove_overlay_elements: bool,
    pub magic: bool,
    pub exclude_all_images: bool,
}

/// Request body for the upstream crawl API.
///
/// Exactly one of `url` and `urls` is set, depending on the payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(rename = "browserConfig")]
    pub browser_config: BrowserConfig,
    #[serde(rename = "crawlerRunConfig")]
    pub crawler_run_config: CrawlerRunConfig,
}
