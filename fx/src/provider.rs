//! Rate source trait and implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::RwLock;
use ratepath_common::ExchangeEdge;
use tracing::{debug, warn};

use crate::error::{FxError, FxResult};

/// Authoritative (and usually slow) supplier of exchange edges.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Get the source name.
    fn name(&self) -> &str;

    /// Fetch every known exchange edge. An empty list is a valid answer.
    async fn fetch_all_exchanges(&self) -> FxResult<Vec<ExchangeEdge>>;
}

/// In-memory rate source whose edges can be swapped at runtime.
pub struct StaticRateSource {
    name: String,
    edges: RwLock<Vec<ExchangeEdge>>,
}

impl StaticRateSource {
    /// Create a new static source.
    pub fn new(name: impl Into<String>, edges: Vec<ExchangeEdge>) -> Self {
        Self {
            name: name.into(),
            edges: RwLock::new(edges),
        }
    }

    /// Replace the served edges.
    pub fn replace(&self, edges: Vec<ExchangeEdge>) {
        *self.edges.write() = edges;
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_all_exchanges(&self) -> FxResult<Vec<ExchangeEdge>> {
        Ok(self.edges.read().clone())
    }
}

/// Reads a JSON array of `{"from", "to", "rate"}` objects from disk on every fetch.
pub struct JsonFileRateSource {
    path: PathBuf,
}

impl JsonFileRateSource {
    /// Create a source backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse edges from a JSON document.
    pub fn parse(&self, contents: &str) -> FxResult<Vec<ExchangeEdge>> {
        serde_json::from_str(contents).map_err(|e| FxError::source_unavailable(self.name(), e))
    }
}

#[async_trait]
impl RateSource for JsonFileRateSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn fetch_all_exchanges(&self) -> FxResult<Vec<ExchangeEdge>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to read rate file");
            FxError::source_unavailable(self.name(), e)
        })?;

        let edges = self.parse(&contents)?;
        debug!(path = %self.path.display(), count = edges.len(), "Loaded exchange edges");
        Ok(edges)
    }
}

/// Mock rate source for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateSource {
    edges: RwLock<Vec<ExchangeEdge>>,
    failing: std::sync::atomic::AtomicBool,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateSource {
    /// Create a new mock source.
    pub fn new(edges: Vec<ExchangeEdge>) -> Self {
        Self {
            edges: RwLock::new(edges),
            failing: std::sync::atomic::AtomicBool::new(false),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Replace the served edges.
    pub fn set_edges(&self, edges: Vec<ExchangeEdge>) {
        *self.edges.write() = edges;
    }

    /// Make subsequent fetches fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing
            .store(failing, std::sync::atomic::Ordering::SeqCst);
    }

    /// Number of fetches so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateSource for MockRateSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_all_exchanges(&self) -> FxResult<Vec<ExchangeEdge>> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(FxError::source_unavailable(self.name(), "mock failure"));
        }
        Ok(self.edges.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratepath_common::Currency;
    use rust_decimal_macros::dec;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ratepath-{}-{}.json", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_static_source() {
        let edge = ExchangeEdge::new(Currency::usd(), Currency::eur(), dec!(0.85));
        let source = StaticRateSource::new("static", vec![edge.clone()]);

        assert_eq!(source.fetch_all_exchanges().await.unwrap(), vec![edge]);

        source.replace(Vec::new());
        assert!(source.fetch_all_exchanges().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let path = temp_path("valid");
        tokio::fs::write(
            &path,
            r#"[{"from": "USD", "to": "EUR", "rate": "0.85"},
                {"from": "eur", "to": "gbp", "rate": 0.9}]"#,
        )
        .await
        .unwrap();

        let source = JsonFileRateSource::new(&path);
        let edges = source.fetch_all_exchanges().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].from, Currency::eur());
        assert_eq!(edges[1].to, Currency::gbp());
        assert_eq!(edges[1].rate, dec!(0.9));
    }

    #[tokio::test]
    async fn test_json_file_source_empty_array() {
        let path = temp_path("empty");
        tokio::fs::write(&path, "[]").await.unwrap();

        let source = JsonFileRateSource::new(&path);
        let edges = source.fetch_all_exchanges().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(edges.is_empty());
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileRateSource::new(temp_path("missing"));
        let result = source.fetch_all_exchanges().await;

        assert!(matches!(result, Err(FxError::RateSourceUnavailable { .. })));
    }

    #[test]
    fn test_json_file_source_malformed() {
        let source = JsonFileRateSource::new("unused.json");

        assert!(matches!(
            source.parse("{not json"),
            Err(FxError::RateSourceUnavailable { .. })
        ));
        assert!(matches!(
            source.parse(r#"[{"from": "U$D", "to": "EUR", "rate": "1"}]"#),
            Err(FxError::RateSourceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_source_counts_and_fails() {
        let source = MockRateSource::new(Vec::new());
        source.fetch_all_exchanges().await.unwrap();
        source.set_failing(true);

        assert!(source.fetch_all_exchanges().await.is_err());
        assert_eq!(source.calls(), 2);
    }
}
