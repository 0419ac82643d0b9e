//! Conversion orchestration.

use std::fmt;
use std::sync::Arc;

use ratepath_common::{ConversionStep, Currency, ExchangeEdge};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheStats, TieredCache};
use crate::config::FxEngineConfig;
use crate::conversion::{calculate, Conversion};
use crate::error::{FxError, FxResult};
use crate::graph::RateGraph;
use crate::path::find_path;
use crate::provider::RateSource;
use crate::retrieval::RateRetrieval;

/// Stage of a single conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    Validating,
    Retrieving,
    Building,
    PathFinding,
    Calculating,
    Done,
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversionStage::Validating => "validating",
            ConversionStage::Retrieving => "retrieving",
            ConversionStage::Building => "building",
            ConversionStage::PathFinding => "path_finding",
            ConversionStage::Calculating => "calculating",
            ConversionStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// The conversion engine.
///
/// Shared across requests behind an `Arc`; the only mutable state is the
/// cache, which locks per entry.
pub struct FxEngine {
    retrieval: RateRetrieval,
}

impl FxEngine {
    /// Create a new engine with its own cache, sized by `config`.
    pub fn new(source: Arc<dyn RateSource>, config: FxEngineConfig) -> Self {
        let cache = Arc::new(TieredCache::with_config(config.cache));
        Self::with_cache(source, cache)
    }

    /// Create an engine over an existing cache.
    pub fn with_cache(source: Arc<dyn RateSource>, cache: Arc<TieredCache>) -> Self {
        Self {
            retrieval: RateRetrieval::new(cache, source),
        }
    }

    /// Get all known currencies (cache or derivation order, not sorted).
    #[instrument(skip(self))]
    pub async fn get_all_currencies(&self) -> FxResult<Vec<Currency>> {
        self.retrieval.get_all_currencies().await
    }

    /// Get all known exchange edges.
    #[instrument(skip(self))]
    pub async fn get_all_exchanges(&self) -> FxResult<Vec<ExchangeEdge>> {
        self.retrieval.get_all_exchanges().await
    }

    /// Convert `amount` of `from` into `to`, returning every hop.
    ///
    /// Codes are case-insensitive. Input is validated before any cache or
    /// source access. A same-currency request yields one identity step.
    pub async fn convert(&self, from: &str, to: &str, amount: Decimal) -> FxResult<Vec<ConversionStep>> {
        self.convert_detailed(from, to, amount)
            .await
            .map(|conversion| conversion.steps)
    }

    /// Convert and wrap the steps with the normalized request.
    #[instrument(skip(self))]
    pub async fn convert_detailed(&self, from: &str, to: &str, amount: Decimal) -> FxResult<Conversion> {
        let mut stage = ConversionStage::Validating;
        let result = self.run(from, to, amount, &mut stage).await;

        match &result {
            Ok(conversion) => info!(hops = conversion.hops(), "Conversion completed"),
            Err(e) => warn!(stage = %stage, code = e.error_code(), error = %e, "Conversion failed"),
        }

        result
    }

    /// Get engine statistics.
    pub fn stats(&self) -> FxEngineStats {
        FxEngineStats {
            cache_stats: self.retrieval.cache().stats(),
        }
    }

    /// Drop all cached data.
    pub fn clear_cache(&self) {
        self.retrieval.cache().clear();
    }

    async fn run(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
        stage: &mut ConversionStage,
    ) -> FxResult<Conversion> {
        let (from, to) = Self::validate(from, to, amount)?;

        if from == to {
            *stage = ConversionStage::Done;
            let steps = vec![ConversionStep::identity(from.clone(), amount)];
            return Ok(Conversion::new(from, to, amount, steps));
        }

        Self::advance(stage, ConversionStage::Retrieving);
        let edges = self.retrieval.get_all_exchanges().await?;
        if edges.is_empty() {
            return Err(FxError::NoExchangeDataAvailable);
        }

        Self::advance(stage, ConversionStage::Building);
        let graph = RateGraph::build(&edges);

        Self::advance(stage, ConversionStage::PathFinding);
        let path = find_path(&graph, &from, &to)?;

        Self::advance(stage, ConversionStage::Calculating);
        let steps = calculate(&path, amount, &graph)?;

        Self::advance(stage, ConversionStage::Done);
        Ok(Conversion::new(from, to, amount, steps))
    }

    /// Normalize both codes and check the amount.
    fn validate(from: &str, to: &str, amount: Decimal) -> FxResult<(Currency, Currency)> {
        let from = Currency::parse(from)?;
        let to = Currency::parse(to)?;

        if amount <= Decimal::ZERO {
            return Err(FxError::InvalidAmount(amount));
        }

        Ok((from, to))
    }

    fn advance(stage: &mut ConversionStage, next: ConversionStage) {
        debug!(from = %stage, to = %next, "Conversion stage");
        *stage = next;
    }
}

/// Engine statistics.
#[derive(Debug, Clone)]
pub struct FxEngineStats {
    pub cache_stats: CacheStats,
}
