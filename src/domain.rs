//! Domain models used by the backend: logo items and where they came from.

use serde::{Deserialize, Serialize};

/// Category every built-in item belongs to, and the one assumed when a
/// request does not name one.
pub const DEFAULT_CATEGORY: &str = "airline";

/// Where did we get the logo item from?
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LogoSource {
  LocalBank, // from user-provided TOML bank
  Seed,      // built-in seeds
}

/// A single learnable entity: airline name + image reference + metadata.
/// Immutable from the quiz's perspective; rows are loaded once at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogoItem {
  pub id: String,
  pub name: String,
  pub image_url: String,
  pub category: String,
  pub source: LogoSource,
  pub is_active: bool,
  pub updated_at: String,
}
