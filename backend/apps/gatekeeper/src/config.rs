//! Server settings from the environment

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use gate::GateConfig;
use gate::config::SameSite;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug)]
pub struct Settings {
    pub listen_addr: SocketAddr,
    /// Credential document loaded before the listener starts
    pub credentials_file: Option<PathBuf>,
    pub gate: GateConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = get("GATE_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("GATE_LISTEN_ADDR is not a socket address")?;

        let mut gate = GateConfig::default();

        if let Some(v) = get("GATE_COOKIE_NAME") {
            gate.session_cookie_name = v;
        }
        if let Some(v) = get("GATE_COOKIE_SECURE") {
            gate.cookie_secure = parse_flag("GATE_COOKIE_SECURE", &v)?;
        }
        if let Some(v) = get("GATE_COOKIE_SAME_SITE") {
            gate.cookie_same_site = Some(
                v.parse::<SameSite>()
                    .map_err(|e| anyhow!("GATE_COOKIE_SAME_SITE: {e}"))?,
            );
        }
        if let Some(v) = get("GATE_CLEAR_STALE_COOKIE") {
            gate.clear_stale_cookie = parse_flag("GATE_CLEAR_STALE_COOKIE", &v)?;
        }
        if let Some(v) = get("GATE_TRUST_FORWARDED_FOR") {
            gate.trust_forwarded_for = parse_flag("GATE_TRUST_FORWARDED_FOR", &v)?;
        }
        if let Some(v) = get("GATE_SWEEP_INTERVAL_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .context("GATE_SWEEP_INTERVAL_SECS is not a number of seconds")?;
            if secs == 0 {
                bail!("GATE_SWEEP_INTERVAL_SECS must be greater than zero");
            }
            gate.sweep_interval = Some(Duration::from_secs(secs));
        }

        gate.validate().context("GATE_COOKIE_NAME")?;

        Ok(Self {
            listen_addr,
            credentials_file: get("GATE_CREDENTIALS_FILE").map(PathBuf::from),
            gate,
        })
    }
}

fn parse_flag(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key}: expected true or false, got {other:?}"),
    }
}
