//! Application state: in-memory stores and the pool supplier.
//!
//! This module owns:
//!   - the logo store (by id), filled from the TOML bank and built-in seeds
//!   - open quiz rounds (question id -> generated question)
//!   - the shared HTTP client used by the logo proxy and health check
//!
//! A round stays open until it is scored; scoring consumes it, so every
//! question is scored at most once.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::config::load_logo_bank_from_env;
use crate::domain::{LogoItem, LogoSource};
use crate::images::ImageFetcher;
use crate::quiz::Question;
use crate::seeds::{seed_logo_items, SEED_UPDATED_AT};

#[derive(Clone)]
pub struct AppState {
    pub logos_by_id: Arc<RwLock<HashMap<String, LogoItem>>>,
    pub open_questions: Arc<RwLock<HashMap<String, Question>>>,
    pub fetcher: Option<ImageFetcher>,
}

impl AppState {
    /// Build state from env: load the bank, insert seeds, build the HTTP client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let bank = load_logo_bank_from_env();

        let mut by_id = HashMap::<String, LogoItem>::new();

        // Insert bank-based items (if any).
        if let Some(cfg) = &bank {
            for lc in &cfg.logos {
                let id = lc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
                let name = lc.name.trim().to_string();
                let image_url = lc.image_url.trim().to_string();
                if name.is_empty() || image_url.is_empty() {
                    error!(target: "logos", %id, "Skipping bank item: blank name or image_url.");
                    continue;
                }
                let item = LogoItem {
                    id: id.clone(),
                    name,
                    image_url,
                    category: lc.category.clone(),
                    source: LogoSource::LocalBank,
                    is_active: lc.is_active,
                    updated_at: lc
                        .updated_at
                        .clone()
                        .unwrap_or_else(|| SEED_UPDATED_AT.to_string()),
                };
                by_id.insert(id, item);
            }
        }

        // Always insert built-in seeds, but don't overwrite existing ids.
        for item in seed_logo_items() {
            by_id.entry(item.id.clone()).or_insert(item);
        }

        // Inventory summary by category/source.
        let mut count_by_cat: HashMap<String, (usize, usize)> = HashMap::new();
        for item in by_id.values() {
            let entry = count_by_cat.entry(item.category.clone()).or_insert((0, 0));
            match item.source {
                LogoSource::LocalBank => entry.0 += 1,
                LogoSource::Seed => entry.1 += 1,
            }
        }
        for (category, (bank_n, seed_n)) in count_by_cat {
            info!(target: "logos", %category, local_bank = bank_n, seed = seed_n, "Startup logo inventory");
        }

        let fetcher = ImageFetcher::new();
        if fetcher.is_none() {
            error!(target: "findairline_backend", "HTTP client init failed; logo proxy and health check disabled.");
        }

        Self {
            logos_by_id: Arc::new(RwLock::new(by_id)),
            open_questions: Arc::new(RwLock::new(HashMap::new())),
            fetcher,
        }
    }

    /// Everything a quiz or learn session may draw from: active items in the
    /// requested category. Order is irrelevant, callers randomize.
    #[instrument(level = "debug", skip(self), fields(%category))]
    pub async fn active_pool(&self, category: &str) -> Vec<LogoItem> {
        let by_id = self.logos_by_id.read().await;
        by_id
            .values()
            .filter(|it| it.is_active && it.category == category)
            .cloned()
            .collect()
    }

    /// Every active item regardless of category; the logo health check
    /// probes all of them.
    #[instrument(level = "debug", skip(self))]
    pub async fn all_active(&self) -> Vec<LogoItem> {
        let by_id = self.logos_by_id.read().await;
        by_id.values().filter(|it| it.is_active).cloned().collect()
    }

    /// Whether a URL belongs to a stored item. The logo proxy replays known
    /// URLs only, so it cannot be used as an open relay.
    #[instrument(level = "debug", skip_all)]
    pub async fn knows_image_url(&self, url: &str) -> bool {
        let by_id = self.logos_by_id.read().await;
        by_id.values().any(|it| it.image_url == url)
    }

    /// Register a freshly generated round and return its id.
    #[instrument(level = "debug", skip(self, question))]
    pub async fn open_question(&self, question: Question) -> String {
        let id = Uuid::new_v4().to_string();
        self.open_questions.write().await.insert(id.clone(), question);
        id
    }

    /// Look at an open round without consuming it.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_question(&self, id: &str) -> Option<Question> {
        self.open_questions.read().await.get(id).cloned()
    }

    /// Consume an open round. A question is scored at most once.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn take_question(&self, id: &str) -> Option<Question> {
        self.open_questions.write().await.remove(id)
    }
}
