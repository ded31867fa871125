use crate::context::SYSTEM_PROMPT;
use anyhow::{anyhow, Context, Result};
use mindcare_core::config::{get_default_config_file, GeminiConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const APP_NAME: &str = "mindcare";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to; all interfaces so `PORT` alone exposes it
    pub http_addr: SocketAddr,
    /// Upper bound for a single model call
    pub request_timeout_secs: u64,
    pub gemini: GeminiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            request_timeout_secs: 30,
            gemini: GeminiConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads `~/.config/mindcare/config.toml` if present, otherwise defaults.
    pub fn load_from_default() -> Result<Self> {
        let path = get_default_config_file(APP_NAME).map_err(|e| anyhow!(e))?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies `GEMINI_API_KEY`, `GEMINI_MODEL` and `PORT` from the given lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = GeminiConfig {
            api_key: lookup("GEMINI_API_KEY").filter(|v| !v.trim().is_empty()),
            system_prompt: None,
            model_name: lookup("GEMINI_MODEL").filter(|v| !v.trim().is_empty()),
            temperature: None,
        };
        self.gemini = self.gemini.merge(&overrides);

        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
            self.http_addr.set_port(port);
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// The instruction preamble: the configured override or the built-in prompt.
    pub fn system_prompt(&self) -> &str {
        self.gemini
            .system_prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(SYSTEM_PROMPT)
    }
}
