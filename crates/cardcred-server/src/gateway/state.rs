use std::sync::Arc;

use cardcred::client::CompletionClient;
use cardcred::config::Config;
use cardcred::service::ScoringService;

pub struct AppState<C: CompletionClient + 'static> {
    pub service: Arc<ScoringService<C>>,

    /// Used when a search request omits `max_urls`.
    pub default_max_urls: usize,

    /// Used when a request omits `dry_run`.
    pub default_dry_run: bool,
}

// Manual impl: `C` itself need not be `Clone`.
impl<C: CompletionClient + 'static> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            default_max_urls: self.default_max_urls,
            default_dry_run: self.default_dry_run,
        }
    }
}

impl<C: CompletionClient + 'static> AppState<C> {
    pub fn new(service: ScoringService<C>, config: &Config) -> Self {
        Self {
            service: Arc::new(service),
            default_max_urls: config.max_urls,
            default_dry_run: config.dry_run,
        }
    }
}
