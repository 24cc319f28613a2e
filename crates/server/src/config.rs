use std::{fs, net::SocketAddr};

use anyhow::Context;
use mail_integration::RESEND_API_URL;
use server_api::DEFAULT_SENDER;
use toml::{Table, Value};
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub resend_api_key: Option<String>,
    pub resend_base_url: String,
    pub contact_email: Option<String>,
    pub contact_sender: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            resend_api_key: None,
            resend_base_url: RESEND_API_URL.into(),
            contact_email: None,
            contact_sender: DEFAULT_SENDER.into(),
            max_body_bytes: 16 * 1024,
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server_bind
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.server_bind))
    }
}

pub fn load_settings() -> Settings {
    let raw_file = fs::read_to_string(SETTINGS_FILE).ok();
    layered_settings(raw_file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml`, then environment; later layers win and
/// blank values count as absent.
pub(crate) fn layered_settings(
    raw_file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        match raw.parse::<Table>() {
            Ok(file_cfg) => apply_file(&mut settings, &file_cfg),
            Err(err) => {
                warn!(error = %err, file = SETTINGS_FILE, "ignoring unreadable settings file");
            }
        }
    }

    let lookup = |key: &str| non_blank(env(key));

    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("RESEND_API_KEY") {
        settings.resend_api_key = Some(v);
    }
    if let Some(v) = lookup("APP__RESEND_API_KEY") {
        settings.resend_api_key = Some(v);
    }

    if let Some(v) = lookup("RESEND_BASE_URL") {
        settings.resend_base_url = v;
    }

    if let Some(v) = lookup("CONTACT_EMAIL") {
        settings.contact_email = Some(v);
    }
    if let Some(v) = lookup("APP__CONTACT_EMAIL") {
        settings.contact_email = Some(v);
    }

    if let Some(v) = lookup("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: &Table) {
    if let Some(v) = file_text(file_cfg, "bind_addr") {
        settings.server_bind = v;
    }
    if let Some(v) = file_text(file_cfg, "contact_email") {
        settings.contact_email = Some(v);
    }
    if let Some(v) = file_text(file_cfg, "contact_sender") {
        settings.contact_sender = v;
    }
    if let Some(v) = file_text(file_cfg, "resend_base_url") {
        settings.resend_base_url = v;
    }

    match file_cfg.get("max_body_bytes") {
        None => {}
        Some(Value::Integer(n)) => match usize::try_from(*n) {
            Ok(limit) if limit > 0 => settings.max_body_bytes = limit,
            _ => warn!(value = n, file = SETTINGS_FILE, "ignoring invalid max_body_bytes"),
        },
        Some(other) => {
            warn!(value = %other, file = SETTINGS_FILE, "ignoring invalid max_body_bytes");
        }
    }
}

fn file_text(file_cfg: &Table, key: &str) -> Option<String> {
    let value = file_cfg.get(key)?;
    let Some(text) = value.as_str() else {
        warn!(key, value = %value, file = SETTINGS_FILE, "ignoring non-string setting");
        return None;
    };
    non_blank(Some(text.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
