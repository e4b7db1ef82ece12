use crate::mcp::contracts::{DEFAULT_API_BASE, DEFAULT_SSE_ADDR};
use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_API_BASE: &str = "CHATPPT_API_BASE";
pub const ENV_SSE_ADDR: &str = "CHATPPT_SSE_ADDR";

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub sse_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY);
        let api_base = lookup(ENV_API_BASE)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let sse_addr = lookup(ENV_SSE_ADDR).unwrap_or_else(|| DEFAULT_SSE_ADDR.to_string());
        let sse_addr = sse_addr
            .parse()
            .with_context(|| format!("{ENV_SSE_ADDR} is not a socket address: {sse_addr}"))?;

        Ok(Self::new(api_key, api_base, sse_addr))
    }

    pub fn new(api_key: Option<String>, api_base: impl Into<String>, sse_addr: SocketAddr) -> Self {
        let api_base = api_base.into().trim().trim_end_matches('/').to_string();
        Self {
            api_key,
            api_base,
            sse_addr,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}
