//! Seed data: built-in airline logo items.

use crate::domain::{LogoItem, LogoSource, DEFAULT_CATEGORY};

/// Timestamp stamped on built-in items; bank items may carry their own.
pub const SEED_UPDATED_AT: &str = "2025-01-15T00:00:00Z";

fn seed(id: &str, name: &str, image_url: &str) -> LogoItem {
  LogoItem {
    id: id.into(),
    name: name.into(),
    image_url: image_url.into(),
    category: DEFAULT_CATEGORY.into(),
    source: LogoSource::Seed,
    is_active: true,
    updated_at: SEED_UPDATED_AT.into(),
  }
}

/// Built-in logos that keep the app useful without an external bank.
/// Quiz mode needs at least four active items per category.
pub fn seed_logo_items() -> Vec<LogoItem> {
  vec![
    seed("a001", "Emirates", "https://upload.wikimedia.org/wikipedia/commons/d/d0/Emirates_logo.svg"),
    seed("a002", "Qatar Airways", "https://upload.wikimedia.org/wikipedia/commons/f/f6/Qatar_Airways_logo.svg"),
    seed("a003", "Delta Air Lines", "https://upload.wikimedia.org/wikipedia/commons/d/d1/Delta_logo.svg"),
    seed("a004", "Japan Airlines", "https://upload.wikimedia.org/wikipedia/commons/8/8c/Japan_Airlines_logo.svg"),
    seed("a005", "Lufthansa", "https://upload.wikimedia.org/wikipedia/commons/b/b8/Lufthansa_Logo_2018.svg"),
    seed("a006", "Singapore Airlines", "https://upload.wikimedia.org/wikipedia/commons/6/6b/Singapore_Airlines_Logo_2.svg"),
    seed("a007", "Air France", "https://upload.wikimedia.org/wikipedia/commons/4/44/Air_France_Logo.svg"),
    seed("a008", "British Airways", "https://upload.wikimedia.org/wikipedia/commons/4/42/British_Airways_Logo.svg"),
    seed("a009", "Ryanair", "https://upload.wikimedia.org/wikipedia/commons/6/63/Ryanair_logo.svg"),
    seed("a010", "Turkish Airlines", "https://upload.wikimedia.org/wikipedia/commons/0/0f/Turkish_Airlines_logo_2019_compact.svg"),
    seed("a011", "KLM", "https://upload.wikimedia.org/wikipedia/commons/c/c7/KLM_logo.svg"),
    seed("a012", "Qantas", "https://upload.wikimedia.org/wikipedia/commons/0/0b/Qantas_Airways_logo_2016.svg"),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn seeds_support_quiz_mode() {
    let items = seed_logo_items();
    assert!(items.len() >= 4, "quiz mode needs at least four seeds");

    let ids: HashSet<&str> = items.iter().map(|it| it.id.as_str()).collect();
    assert_eq!(ids.len(), items.len(), "seed ids must be unique");

    let names: HashSet<&str> = items.iter().map(|it| it.name.as_str()).collect();
    assert_eq!(names.len(), items.len(), "seed names must be unique");

    for it in &items {
      assert!(it.is_active);
      assert_eq!(it.category, DEFAULT_CATEGORY);
      assert!(it.image_url.starts_with("https://"));
    }
  }
}
