// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{get_setting, set_setting};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Checked in order; the first non-empty one wins over the stored key.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const KEY_API_KEY: &str = "assistant_api_key";
const KEY_MODEL: &str = "assistant_model";
const KEY_ENDPOINT: &str = "assistant_endpoint";
const KEY_TIMEOUT: &str = "assistant_timeout_secs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl AssistantConfig {
    pub fn load(conn: &Connection) -> Result<Self> {
        Self::load_with_env(conn, |name| std::env::var(name).ok())
    }

    pub fn load_with_env(conn: &Connection, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let from_env = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env(name))
            .find(|v| !v.trim().is_empty());
        let api_key = match from_env {
            Some(k) => Some(k),
            None => get_setting(conn, KEY_API_KEY)?.filter(|v| !v.trim().is_empty()),
        };
        let model = get_setting(conn, KEY_MODEL)?.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint =
            get_setting(conn, KEY_ENDPOINT)?.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout_secs = match get_setting(conn, KEY_TIMEOUT)? {
            Some(s) => s
                .parse::<u64>()
                .with_context(|| format!("Invalid {} '{}'", KEY_TIMEOUT, s))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            api_key,
            model,
            endpoint,
            timeout_secs,
        })
    }

    /// The key with everything but its last four characters hidden.
    pub fn masked_key(&self) -> String {
        match &self.api_key {
            None => "(not set)".to_string(),
            Some(k) => {
                let chars: Vec<char> = k.chars().collect();
                let keep = chars.len().min(4);
                let tail: String = chars[chars.len() - keep..].iter().collect();
                format!("{}{}", "*".repeat(chars.len() - keep), tail)
            }
        }
    }
}

pub fn set_api_key(conn: &Connection, key: &str) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }
    set_setting(conn, KEY_API_KEY, key)
}

pub fn set_model(conn: &Connection, model: &str) -> Result<()> {
    let model = model.trim();
    if model.is_empty() {
        bail!("Model name must not be empty");
    }
    set_setting(conn, KEY_MODEL, model)
}

pub fn set_endpoint(conn: &Connection, url: &str) -> Result<()> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("Endpoint must be an http(s) URL, got '{}'", url);
    }
    set_setting(conn, KEY_ENDPOINT, url)
}

pub fn set_timeout(conn: &Connection, secs: u64) -> Result<()> {
    if secs == 0 {
        bail!("Timeout must be at least one second");
    }
    set_setting(conn, KEY_TIMEOUT, &secs.to_string())
}
