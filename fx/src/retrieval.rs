//! Cache-first retrieval of currencies and exchange edges.

use std::sync::Arc;

use ratepath_common::{currencies_of, Currency, ExchangeEdge};
use tracing::{debug, warn};

use crate::cache::TieredCache;
use crate::error::FxResult;
use crate::provider::RateSource;

/// Resolves currencies and edges from the cache, falling back to the rate source.
///
/// Currencies are always a projection of exchange edges; the source is never
/// asked for them directly.
pub struct RateRetrieval {
    cache: Arc<TieredCache>,
    source: Arc<dyn RateSource>,
}

impl RateRetrieval {
    pub fn new(cache: Arc<TieredCache>, source: Arc<dyn RateSource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &Arc<TieredCache> {
        &self.cache
    }

    /// Get all known currencies.
    ///
    /// Order: `currency` entry, then currencies derived from the
    /// `currencyExchange` entry, then currencies derived from a source fetch.
    pub async fn get_all_currencies(&self) -> FxResult<Vec<Currency>> {
        if let Some(currencies) = self.cache.get_currencies().filter(|c| !c.is_empty()) {
            return Ok(currencies);
        }

        let edges = match self.cache.get_exchanges().filter(|e| !e.is_empty()) {
            Some(edges) => {
                debug!("Deriving currencies from cached exchanges");
                edges
            }
            None => self.get_all_exchanges().await?,
        };

        let currencies = currencies_of(&edges);
        self.cache.set_currencies(currencies.clone());
        Ok(currencies)
    }

    /// Get all known exchange edges.
    pub async fn get_all_exchanges(&self) -> FxResult<Vec<ExchangeEdge>> {
        if let Some(edges) = self.cache.get_exchanges().filter(|e| !e.is_empty()) {
            return Ok(edges);
        }

        // No cache lock is held across this await.
        let edges = self.source.fetch_all_exchanges().await.map_err(|e| {
            warn!(source = self.source.name(), error = %e, "Rate source fetch failed");
            e
        })?;

        debug!(
            source = self.source.name(),
            count = edges.len(),
            "Fetched exchanges from rate source"
        );
        self.cache.set_exchanges(edges.clone());
        Ok(edges)
    }
}
