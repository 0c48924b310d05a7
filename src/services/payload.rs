// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Alternate request encodings for the upstream crawl API.
//!
//! Deployed crawl4ai versions disagree on whether a single page is requested
//! as `{"url": ...}` or `{"urls": [...]}`, so a single URL is offered in both
//! shapes. Several URLs only have the list encoding.

use crate::models::crawler::{BrowserConfig, CrawlApiRequest, CrawlerRunConfig};
use std::fmt;

/// Which field carries the URLs in a candidate payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    SingleUrl,
    UrlList,
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadShape::SingleUrl => write!(f, "url"),
            PayloadShape::UrlList => write!(f, "urls"),
        }
    }
}

/// One request body to try against the upstream API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadCandidate {
    pub shape: PayloadShape,
    pub request: CrawlApiRequest,
}

impl PayloadCandidate {
    fn new(shape: PayloadShape, urls: &[String]) -> Self {
        let (url, urls) = match shape {
            PayloadShape::SingleUrl => (urls.first().cloned(), None),
            PayloadShape::UrlList => (None, Some(urls.to_vec())),
        };

        Self {
            shape,
            request: CrawlApiRequest {
                url,
                urls,
                browser_config: default_browser_config(),
                crawler_run_config: default_crawler_run_config(),
            },
        }
    }
}

pub fn default_browser_config() -> BrowserConfig {
    BrowserConfig { text_mode: true }
}

pub fn default_crawler_run_config() -> CrawlerRunConfig {
    CrawlerRunConfig {
        remove_overlay_elements: true,
        magic: true,
        exclude_all_images: true,
    }
}

/// Shapes to try, in order, for a request of `url_count` URLs
pub fn candidate_shapes(url_count: usize) -> &'static [PayloadShape] {
    match url_count {
        0 => &[],
        1 => &[PayloadShape::SingleUrl, PayloadShape::UrlList],
        _ => &[PayloadShape::UrlList],
    }
}

/// Build the ordered candidate list for `urls`
pub fn payload_candidates(urls: &[String]) -> Vec<PayloadCandidate> {
    candidate_shapes(urls.len())
        .iter()
        .map(|shape| PayloadCandidate::new(*shape, urls))
        .collect()
}
