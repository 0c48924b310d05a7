// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{Context, Result};
use crawl_relay::app::{bind_listener, create_router, AppState, VERSION};
use crawl_relay::models::settings::Settings;
use crawl_relay::services::logging::init_tracing;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Read once; nothing below mutates the settings
    let settings = Settings::load();

    let state = AppState::from_settings(&settings)?;
    info!(endpoint = %state.crawl_api.endpoint(), "Forwarding crawls to crawl API");

    let app = create_router(state);

    let listener = bind_listener(&settings).await?;

    info!(
        address = %listener.local_addr()?,
        "crawl-relay v{} listening",
        VERSION
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server terminated")?;

    Ok(())
}
