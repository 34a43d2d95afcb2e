use anyhow::{Result, bail};
use reqwest::Url;

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    match Url::parse(cfg.api.base_url.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            if url.query().is_some() {
                errors.push("api.base_url must not carry a query string".to_string());
            }
        }
        Ok(url) => errors.push(format!(
            "api.base_url must use http or https (got {})",
            url.scheme()
        )),
        Err(err) => errors.push(format!(
            "api.base_url is not a valid URL ({}): {err}",
            cfg.api.base_url
        )),
    }

    if cfg.console.status_decay_ms == 0 {
        errors.push("console.status_decay_ms must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid console config:\n- {}", errors.join("\n- "))
}
