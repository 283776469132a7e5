//! Precision maps and the metadata source seam.
//!
//! Lookups resolve through three tiers:
//!
//! 1. the cached map loaded from the metadata source
//! 2. the built-in static table
//! 3. [`DEFAULT_DECIMALS`]

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use centime_shared::CurrencyCode;

use super::error::SourceError;
use super::fallback::{self, DEFAULT_DECIMALS};

/// Largest accepted precision. Keeps `10^precision` within an `i64`.
pub const MAX_DECIMALS: u32 = 18;

/// Authoritative store of currency precisions.
///
/// Implementations own their own caching; the metadata store layers a
/// process-local cache on top and calls [`invalidate`](Self::invalidate)
/// when metadata changes administratively.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrencyMetadataSource: Send + Sync {
    /// Fetches the full code to decimal-places mapping, as stored.
    async fn fetch_precision_map(&self) -> Result<HashMap<String, i64>, SourceError>;

    /// Drops any cache the source keeps.
    async fn invalidate(&self) {}
}

/// Immutable mapping from canonical currency code to precision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecisionMap {
    entries: HashMap<CurrencyCode, u32>,
}

impl PrecisionMap {
    /// Validates raw source rows and builds a map from them.
    ///
    /// Rejects the whole map if it is empty, if a code is not three letters,
    /// if a precision is outside `0..=MAX_DECIMALS`, or if two rows collapse
    /// to the same code with different precisions.
    pub fn from_raw(raw: HashMap<String, i64>) -> Result<Self, SourceError> {
        if raw.is_empty() {
            return Err(SourceError::Malformed("empty precision map".to_string()));
        }

        let mut entries = HashMap::with_capacity(raw.len());
        for (raw_code, raw_decimals) in raw {
            let code = CurrencyCode::new(&raw_code);
            if !code.is_well_formed() {
                return Err(SourceError::Malformed(format!(
                    "invalid currency code '{raw_code}'"
                )));
            }

            let decimals = u32::try_from(raw_decimals)
                .ok()
                .filter(|d| *d <= MAX_DECIMALS)
                .ok_or_else(|| {
                    SourceError::Malformed(format!(
                        "precision {raw_decimals} for {code} is outside 0..={MAX_DECIMALS}"
                    ))
                })?;

            match entries.entry(code) {
                Entry::Vacant(slot) => {
                    slot.insert(decimals);
                }
                Entry::Occupied(slot) if *slot.get() != decimals => {
                    return Err(SourceError::Malformed(format!(
                        "conflicting precisions for {}",
                        slot.key()
                    )));
                }
                Entry::Occupied(_) => {}
            }
        }

        Ok(Self { entries })
    }

    /// Returns the precision recorded for a code.
    #[must_use]
    pub fn get(&self, code: &CurrencyCode) -> Option<u32> {
        self.entries.get(code).copied()
    }

    /// Number of currencies in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no currencies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(code, precision)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, u32)> {
        self.entries.iter().map(|(code, decimals)| (code, *decimals))
    }
}

impl FromIterator<(CurrencyCode, u32)> for PrecisionMap {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, u32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Where a cached precision map came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOrigin {
    /// Loaded from the metadata source.
    Source,
    /// The source failed; the static table stands in.
    StaticFallback,
}

/// Which tier answered a precision lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionTier {
    /// The map loaded from the metadata source.
    Live,
    /// The built-in static table.
    Static,
    /// Neither knew the code.
    Default,
}

/// Outcome of a precision lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Decimal places to use.
    pub decimals: u32,
    /// Tier that supplied them.
    pub tier: PrecisionTier,
}

/// A fully built precision map as held by the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPrecisionMap {
    /// The map itself.
    pub map: PrecisionMap,
    /// How it was obtained.
    pub origin: MapOrigin,
}

impl CachedPrecisionMap {
    /// Wraps a map loaded from the source.
    #[must_use]
    pub const fn from_source(map: PrecisionMap) -> Self {
        Self {
            map,
            origin: MapOrigin::Source,
        }
    }

    /// The static table, standing in for an unreachable source.
    #[must_use]
    pub fn static_fallback() -> Self {
        Self {
            map: fallback::static_map(),
            origin: MapOrigin::StaticFallback,
        }
    }

    /// Resolves a canonical code through all three tiers.
    #[must_use]
    pub fn resolve(&self, code: &CurrencyCode) -> Resolution {
        if let Some(decimals) = self.map.get(code) {
            let tier = match self.origin {
                MapOrigin::Source => PrecisionTier::Live,
                MapOrigin::StaticFallback => PrecisionTier::Static,
            };
            return Resolution { decimals, tier };
        }

        if let Some(decimals) = fallback::static_decimals(code) {
            return Resolution {
                decimals,
                tier: PrecisionTier::Static,
            };
        }

        Resolution {
            decimals: DEFAULT_DECIMALS,
            tier: PrecisionTier::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries
            .iter()
            .map(|(code, decimals)| ((*code).to_string(), *decimals))
            .collect()
    }

    #[test]
    fn test_from_raw_canonicalizes_codes() {
        let map = PrecisionMap::from_raw(raw(&[("usd", 2), ("JPY", 0)])).unwrap();
        assert_eq!(map.get(&CurrencyCode::new("USD")), Some(2));
        assert_eq!(map.get(&CurrencyCode::new("jpy")), Some(0));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_from_raw_rejects_empty_map() {
        let err = PrecisionMap::from_raw(HashMap::new()).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[test]
    fn test_from_raw_rejects_bad_code() {
        let err = PrecisionMap::from_raw(raw(&[("US", 2)])).unwrap_err();
        assert!(err.to_string().contains("invalid currency code 'US'"));
    }

    #[test]
    fn test_from_raw_rejects_out_of_range_precision() {
        assert!(PrecisionMap::from_raw(raw(&[("USD", -1)])).is_err());
        assert!(PrecisionMap::from_raw(raw(&[("USD", 19)])).is_err());
        assert!(PrecisionMap::from_raw(raw(&[("USD", 18)])).is_ok());
    }

    #[test]
    fn test_from_raw_rejects_conflicting_duplicates() {
        let err = PrecisionMap::from_raw(raw(&[("usd", 2), ("USD", 3)])).unwrap_err();
        assert!(err.to_string().contains("conflicting precisions for USD"));

        let ok = PrecisionMap::from_raw(raw(&[("usd", 2), ("USD", 2)])).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn test_resolve_tier_one_live_map() {
        let cached = CachedPrecisionMap::from_source(
            PrecisionMap::from_raw(raw(&[("USD", 2), ("JPY", 1)])).unwrap(),
        );
        // The live map wins over the static table.
        let resolution = cached.resolve(&CurrencyCode::new("JPY"));
        assert_eq!(resolution.decimals, 1);
        assert_eq!(resolution.tier, PrecisionTier::Live);
    }

    #[test]
    fn test_resolve_tier_two_static_table() {
        let cached =
            CachedPrecisionMap::from_source(PrecisionMap::from_raw(raw(&[("USD", 2)])).unwrap());
        let resolution = cached.resolve(&CurrencyCode::new("BHD"));
        assert_eq!(resolution.decimals, 3);
        assert_eq!(resolution.tier, PrecisionTier::Static);
    }

    #[test]
    fn test_resolve_tier_three_default() {
        let cached =
            CachedPrecisionMap::from_source(PrecisionMap::from_raw(raw(&[("USD", 2)])).unwrap());
        let resolution = cached.resolve(&CurrencyCode::new("XYZ"));
        assert_eq!(resolution.decimals, DEFAULT_DECIMALS);
        assert_eq!(resolution.tier, PrecisionTier::Default);
    }

    #[test]
    fn test_static_fallback_reports_static_tier() {
        let cached = CachedPrecisionMap::static_fallback();
        assert_eq!(cached.origin, MapOrigin::StaticFallback);

        let jpy = cached.resolve(&CurrencyCode::new("JPY"));
        assert_eq!(jpy.decimals, 0);
        assert_eq!(jpy.tier, PrecisionTier::Static);

        let usd = cached.resolve(&CurrencyCode::new("USD"));
        assert_eq!(usd.decimals, 2);
        assert_eq!(usd.tier, PrecisionTier::Default);
    }
}
