// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! HTTP relay that accepts client crawl requests, forwards them to a crawl4ai
//! style scraping service, and reshapes whatever comes back into a flat list of
//! `{content, metadata}` documents.

pub mod app;
pub mod error;
pub mod models;
pub mod services;
