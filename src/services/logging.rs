// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Logging setup and helpers for keeping upstream bodies out of logs and
//! responses at full length.

use tracing_subscriber::{fmt as tfmt, EnvFilter};

/// Maximum number of characters of an upstream body kept for diagnostics
pub const BODY_PREVIEW_CHARS: usize = 300;

/// Install the global tracing subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

/// Trimmed, length-capped preview of a response body.
/// Appends "..." when the body had to be cut.
pub fn preview_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    match text.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
