use crate::config::Config;
use crate::services::{ConversationStore, TemplateEngine};
use anyhow::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub conversations: ConversationStore,
    pub templates: Arc<TemplateEngine>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        tracing::info!("[STATE] Initializing AppState...");
        tracing::info!("[STATE]   Upstream enabled: {}", config.upstream_enabled);
        tracing::info!("[STATE]   Upstream base URL: {}", config.upstream_base_url);
        tracing::info!("[STATE]   Fallback enabled: {}", config.fallback_enabled);

        let templates = TemplateEngine::new()?;

        Ok(Self {
            config: Arc::new(config),
            conversations: ConversationStore::new(),
            templates: Arc::new(templates),
        })
    }
}
