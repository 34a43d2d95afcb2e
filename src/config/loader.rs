use std::path::{Path, PathBuf};

use ::config as config_rs;
use anyhow::{Context, Result};

use super::{AppConfig, validate};

/// Environment prefix, e.g. `APP_API__BASE_URL`.
pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";
/// Optional TOML/YAML/JSON file layered underneath the environment. Kept
/// outside the `APP_` namespace so it never reaches the typed config.
pub const CONFIG_FILE_VAR: &str = "LEAGUE_CONSOLE_CONFIG";

pub fn load() -> Result<AppConfig> {
    load_dotenv();
    let file = std::env::var_os(CONFIG_FILE_VAR).map(PathBuf::from);
    load_from(file.as_deref())
}

pub fn load_from(file: Option<&Path>) -> Result<AppConfig> {
    let mut builder = config_rs::Config::builder();

    if let Some(path) = file {
        tracing::debug!(path = %path.display(), "layering config file");
        builder = builder.add_source(config_rs::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            config_rs::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()
        .context("failed to read console configuration")?;

    let cfg = settings
        .try_deserialize::<AppConfig>()
        .context("failed to deserialize console configuration")?;

    validate::validate(&cfg)?;
    Ok(cfg)
}

fn load_dotenv() {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
}
