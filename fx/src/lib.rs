//! ratepath FX Engine
//!
//! Converts amounts between currencies by chaining directed exchange edges.
//!
//! # Features
//!
//! - Tiered cache of currencies and exchange edges with independent TTLs
//! - Cache-first retrieval with fallback to a pluggable rate source
//! - Fewest-hop path discovery over the directed rate graph
//! - Stepwise decimal conversion along the discovered path
//!
//! # Example
//!
//! ```rust,ignore
//! use ratepath_fx::{FxEngine, FxEngineConfig, JsonFileRateSource};
//! use rust_decimal_macros::dec;
//!
//! let source = Arc::new(JsonFileRateSource::new("rates.json"));
//! let engine = FxEngine::new(source, FxEngineConfig::default());
//!
//! // USD -> EUR -> GBP
//! let steps = engine.convert("usd", "gbp", dec!(100)).await?;
//! ```

pub mod cache;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod graph;
pub mod path;
pub mod provider;
pub mod retrieval;

pub use cache::{TieredCache, TieredCacheConfig};
pub use config::FxEngineConfig;
pub use conversion::{calculate, Conversion};
pub use engine::{ConversionStage, FxEngine};
pub use error::{FxError, FxResult};
pub use graph::RateGraph;
pub use path::find_path;
pub use provider::{JsonFileRateSource, RateSource, StaticRateSource};
pub use retrieval::RateRetrieval;

#[cfg(any(test, feature = "test-utils"))]
pub use provider::MockRateSource;
