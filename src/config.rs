//! Loading the optional logo bank (extra logo items) from TOML.
//!
//! See `LogoBankConfig` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct LogoBankConfig {
  #[serde(default)]
  pub logos: Vec<LogoCfg>,
}

/// Logo entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct LogoCfg {
  #[serde(default)] pub id: Option<String>,
  pub name: String,
  pub image_url: String,
  #[serde(default = "default_category")] pub category: String,
  #[serde(default = "default_active")] pub is_active: bool,
  #[serde(default)] pub updated_at: Option<String>,
}

fn default_category() -> String {
  crate::domain::DEFAULT_CATEGORY.into()
}

fn default_active() -> bool {
  true
}

/// Attempt to load the bank from LOGO_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_logo_bank_from_env() -> Option<LogoBankConfig> {
  let path = std::env::var("LOGO_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<LogoBankConfig>(&s) {
      Ok(cfg) => {
        info!(target: "findairline_backend", %path, logos = cfg.logos.len(), "Loaded logo bank (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "findairline_backend", %path, error = %e, "Failed to parse TOML logo bank");
        None
      }
    },
    Err(e) => {
      error!(target: "findairline_backend", %path, error = %e, "Failed to read TOML logo bank file");
      None
    }
  }
}
