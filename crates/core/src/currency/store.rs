//! Process-wide currency precision cache using Moka.
//!
//! The store fetches the full precision map from a [`CurrencyMetadataSource`]
//! on first use and keeps it until it expires or is invalidated. A source
//! that fails, times out, or answers with malformed data is replaced by the
//! static table; lookups never fail.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use centime_shared::{CurrencyCode, CurrencyConfig};
use moka::Expiry;
use moka::future::Cache;
use tracing::{debug, info, warn};

use super::error::SourceError;
use super::metadata::{
    CachedPrecisionMap, CurrencyMetadataSource, MapOrigin, PrecisionMap, PrecisionTier, Resolution,
};

/// Default upper bound for one source fetch.
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Default lifetime of a static-fallback map before the source is retried.
const DEFAULT_FALLBACK_RETRY: Duration = Duration::from_secs(60);

/// Generations kept at once; older ones are invalidated anyway.
const CACHE_CAPACITY: u64 = 4;

/// Timing settings for [`CurrencyMetadataStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Upper bound for one source fetch.
    pub fetch_timeout: Duration,
    /// Lifetime of a source-backed map; `None` means until invalidated.
    pub cache_ttl: Option<Duration>,
    /// Lifetime of a static-fallback map.
    pub fallback_retry: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            cache_ttl: None,
            fallback_retry: DEFAULT_FALLBACK_RETRY,
        }
    }
}

impl From<&CurrencyConfig> for StoreSettings {
    fn from(config: &CurrencyConfig) -> Self {
        Self {
            fetch_timeout: Duration::from_millis(config.fetch_timeout_ms),
            cache_ttl: config.cache_ttl_secs.map(Duration::from_secs),
            fallback_retry: Duration::from_secs(config.fallback_retry_secs),
        }
    }
}

/// Per-entry expiry: source maps live for the configured TTL, fallback maps
/// only until the next retry.
struct PrecisionExpiry {
    cache_ttl: Option<Duration>,
    fallback_retry: Duration,
}

impl Expiry<u64, Arc<CachedPrecisionMap>> for PrecisionExpiry {
    fn expire_after_create(
        &self,
        _generation: &u64,
        value: &Arc<CachedPrecisionMap>,
        _created_at: Instant,
    ) -> Option<Duration> {
        match value.origin {
            MapOrigin::Source => self.cache_ttl,
            MapOrigin::StaticFallback => Some(self.fallback_retry),
        }
    }
}

/// Answers "how many decimal places does currency X use?".
///
/// Cached maps are keyed by a generation counter. Invalidation bumps the
/// generation, so a load that started before invalidation can never be read
/// by a lookup that starts after it. Concurrent cold lookups share one fetch.
pub struct CurrencyMetadataStore {
    source: Arc<dyn CurrencyMetadataSource>,
    cache: Cache<u64, Arc<CachedPrecisionMap>>,
    generation: AtomicU64,
    fetch_timeout: Duration,
}

impl CurrencyMetadataStore {
    /// Creates a store over the given source.
    #[must_use]
    pub fn new(source: Arc<dyn CurrencyMetadataSource>, settings: StoreSettings) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .expire_after(PrecisionExpiry {
                cache_ttl: settings.cache_ttl,
                fallback_retry: settings.fallback_retry,
            })
            .build();

        Self {
            source,
            cache,
            generation: AtomicU64::new(0),
            fetch_timeout: settings.fetch_timeout,
        }
    }

    /// Returns the precision for a currency code. Never fails.
    ///
    /// Codes are matched case-insensitively; unknown codes get
    /// [`DEFAULT_DECIMALS`](super::fallback::DEFAULT_DECIMALS).
    pub async fn get_decimals(&self, currency: &str) -> u32 {
        self.resolve(currency).await.decimals
    }

    /// Resolves a currency code, reporting which tier answered.
    pub async fn resolve(&self, currency: &str) -> Resolution {
        let code = CurrencyCode::new(currency);
        let resolution = self.precision_map().await.resolve(&code);
        if resolution.tier == PrecisionTier::Default {
            debug!(
                currency = %code,
                decimals = resolution.decimals,
                "Unknown currency, using default precision"
            );
        }
        resolution
    }

    /// Returns the current precision map, loading it on first use.
    pub async fn precision_map(&self) -> Arc<CachedPrecisionMap> {
        let generation = self.generation.load(Ordering::Acquire);
        self.cache
            .get_with(generation, async {
                Arc::new(self.load_precision_map().await)
            })
            .await
    }

    /// Fetches the full map from the source, or the static table if that
    /// fails for any reason.
    pub async fn load_precision_map(&self) -> CachedPrecisionMap {
        match self.fetch_validated().await {
            Ok(map) => {
                debug!(
                    currencies = map.len(),
                    "Loaded precision map from metadata source"
                );
                CachedPrecisionMap::from_source(map)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Currency metadata source unavailable, using static precision table"
                );
                CachedPrecisionMap::static_fallback()
            }
        }
    }

    async fn fetch_validated(&self) -> Result<PrecisionMap, SourceError> {
        let raw = tokio::time::timeout(self.fetch_timeout, self.source.fetch_precision_map())
            .await
            .map_err(|_| SourceError::Timeout(self.fetch_timeout))??;
        PrecisionMap::from_raw(raw)
    }

    /// Discards the cached map (and the source's own cache) so the next
    /// lookup fetches fresh data.
    ///
    /// Lookups already in flight may finish with the old map.
    pub async fn invalidate_cache(&self) {
        self.source.invalidate().await;
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.cache.invalidate_all();
        info!(generation, "Currency precision cache invalidated");
    }
}
