// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::error::ApiError;
use crate::models::crawler::CrawlRequest;

/// Flatten a client request into the ordered list of URLs to crawl.
///
/// Entries of `urls` come first with empties dropped, then `url` if set.
/// Duplicates are kept. Fails with `InvalidRequest` when nothing usable is left.
pub fn normalize_urls(request: &CrawlRequest) -> Result<Vec<String>, ApiError> {
    let listed = request
        .urls
        .iter()
        .flatten()
        .filter_map(|url| url.as_deref());

    let urls: Vec<String> = listed
        .chain(request.url.as_deref())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(ApiError::InvalidRequest);
    }

    Ok(urls)
}
