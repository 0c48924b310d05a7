// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use clap::Parser;
use std::env;
use tracing::warn;

/// Default upstream endpoint, matching the crawl4ai container's markdown route.
pub const DEFAULT_CRAWL4AI_ENDPOINT: &str = "http://crawl4ai:11235/md";

pub const DEFAULT_LISTEN_PORT: u16 = 8000;

/// Command-line overrides. Anything not given here comes from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "crawl-relay", version = env!("CRAWL_RELAY_VERSION"))]
pub struct CliArgs {
    /// Interface to bind (overrides LISTEN_IP)
    #[arg(long)]
    pub listen_ip: Option<String>,

    /// Port to bind (overrides LISTEN_PORT)
    #[arg(long)]
    pub listen_port: Option<u16>,

    /// Upstream crawl API endpoint (overrides CRAWL4AI_ENDPOINT)
    #[arg(long)]
    pub crawl4ai_endpoint: Option<String>,
}

/// Process configuration, read once at startup.
///
/// Environment variables that are unset or empty keep their default, and a
/// `LISTEN_PORT` that is not a valid port is ignored with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Interface to bind; empty means every interface, IPv6 included
    pub listen_ip: String,
    pub listen_port: u16,
    pub crawl4ai_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_ip: String::new(),
            listen_port: DEFAULT_LISTEN_PORT,
            crawl4ai_endpoint: DEFAULT_CRAWL4AI_ENDPOINT.to_string(),
        }
    }
}

impl Settings {
    /// Environment first, then command-line flags on top
    pub fn load() -> Self {
        Self::from_env().with_cli(CliArgs::parse())
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut settings = Self::default();

        if let Some(ip) = var("LISTEN_IP") {
            settings.listen_ip = ip;
        }

        if let Some(port) = var("LISTEN_PORT") {
            match port.parse() {
                Ok(port) => settings.listen_port = port,
                Err(e) => warn!(
                    value = %port,
                    error = %e,
                    default = DEFAULT_LISTEN_PORT,
                    "LISTEN_PORT is not a valid port, keeping default"
                ),
            }
        }

        if let Some(endpoint) = var("CRAWL4AI_ENDPOINT") {
            settings.crawl4ai_endpoint = endpoint;
        }

        settings
    }

    /// Apply flags given on the command line; empty strings are ignored
    pub fn with_cli(mut self, cli: CliArgs) -> Self {
        if let Some(ip) = cli.listen_ip.filter(|ip| !ip.is_empty()) {
            self.listen_ip = ip;
        }
        if let Some(port) = cli.listen_port {
            self.listen_port = port;
        }
        if let Some(endpoint) = cli.crawl4ai_endpoint.filter(|e| !e.is_empty()) {
            self.crawl4ai_endpoint = endpoint;
        }
        self
    }

    /// `host:port` string used in log and error messages
    pub fn listen_address(&self) -> String {
        if self.listen_ip.is_empty() {
            format!("*:{}", self.listen_port)
        } else if self.listen_ip.contains(':') {
            format!("[{}]:{}", self.listen_ip, self.listen_port)
        } else {
            format!("{}:{}", self.listen_ip, self.listen_port)
        }
    }
}
