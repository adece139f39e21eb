//! Fluent cache builder that specification records project onto.
//!
//! [`CacheBuilder`] holds the same options as [`CacheSpec`], set one call at a time.
//! [`CacheSpec::to_builder`] maps each parsed option onto exactly one builder call, so
//! a builder produced from `"maximumSize=100,weakKeys"` compares equal to
//! `CacheBuilder::new().maximum_size(100).weak_keys()`.
//!
//! [`CacheBuilder::build`] validates the combination and freezes it into
//! [`CacheSettings`], which a cache engine consumes.
//!
//! # Examples
//!
//! ```
//! use cache_spec::{Bound, CacheBuilder, CacheSpec};
//!
//! let spec = CacheSpec::parse("maximumWeight=1000,recordStats").unwrap();
//!
//! // Weight-bounded caches need a weigher before they can be built
//! assert!(spec.to_builder::<String, Vec<u8>>().build().is_err());
//!
//! let settings = CacheBuilder::from_spec(&spec)
//!     .weigher(|_key: &String, value: &Vec<u8>| value.len() as u32)
//!     .build()
//!     .unwrap();
//! assert!(matches!(settings.bound, Some(Bound::Weight { maximum: 1000, .. })));
//! assert_eq!(settings.weigh(&"k".to_string(), &vec![0u8; 42]), 42);
//! ```

use alloc::sync::Arc;
use core::fmt;
use core::time::Duration;

use tracing::{debug, warn};

use crate::error::{BuildError, SpecError};
use crate::spec::CacheSpec;
use crate::strength::Strength;

/// Shared function measuring the weight of one entry.
pub type Weigher<K, V> = Arc<dyn Fn(&K, &V) -> u32 + Send + Sync>;

/// Fluent configuration for a cache.
///
/// Setters consume and return the builder. Calling a setter again replaces the earlier
/// value. Conflicting combinations are reported by [`build`](CacheBuilder::build), not
/// by the setters.
///
/// Equality compares every option. For the weigher it compares only whether one is
/// present, since closures have no identity.
pub struct CacheBuilder<K, V> {
    initial_capacity: Option<u64>,
    maximum_size: Option<u64>,
    maximum_weight: Option<u64>,
    key_strength: Option<Strength>,
    value_strength: Option<Strength>,
    expire_after_write: Option<Duration>,
    expire_after_access: Option<Duration>,
    refresh_after_write: Option<Duration>,
    record_stats: bool,
    weigher: Option<Weigher<K, V>>,
}

impl<K, V> CacheBuilder<K, V> {
    /// Creates a builder with every option at its default.
    pub fn new() -> Self {
        CacheBuilder {
            initial_capacity: None,
            maximum_size: None,
            maximum_weight: None,
            key_strength: None,
            value_strength: None,
            expire_after_write: None,
            expire_after_access: None,
            refresh_after_write: None,
            record_stats: false,
            weigher: None,
        }
    }

    /// Creates a builder configured from a parsed specification.
    pub fn from_spec(spec: &CacheSpec) -> Self {
        spec.to_builder()
    }

    /// Parses `specification` and creates a builder configured from it.
    ///
    /// # Errors
    ///
    /// Returns the [`SpecError`] from [`CacheSpec::parse`].
    pub fn parse(specification: &str) -> Result<Self, SpecError> {
        CacheSpec::parse(specification).map(|spec| spec.to_builder())
    }

    /// Sets the number of entries to size internal tables for.
    pub fn initial_capacity(mut self, capacity: u64) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Bounds the cache by entry count.
    pub fn maximum_size(mut self, size: u64) -> Self {
        self.maximum_size = Some(size);
        self
    }

    /// Bounds the cache by total weight, as measured by the [weigher](Self::weigher).
    pub fn maximum_weight(mut self, weight: u64) -> Self {
        self.maximum_weight = Some(weight);
        self
    }

    /// Holds keys weakly.
    pub fn weak_keys(mut self) -> Self {
        self.key_strength = Some(Strength::Weak);
        self
    }

    /// Holds values weakly.
    pub fn weak_values(mut self) -> Self {
        self.value_strength = Some(Strength::Weak);
        self
    }

    /// Holds values softly.
    pub fn soft_values(mut self) -> Self {
        self.value_strength = Some(Strength::Soft);
        self
    }

    /// Expires entries this long after they were created or last replaced.
    pub fn expire_after_write(mut self, duration: Duration) -> Self {
        self.expire_after_write = Some(duration);
        self
    }

    /// Expires entries this long after they were last read or written.
    pub fn expire_after_access(mut self, duration: Duration) -> Self {
        self.expire_after_access = Some(duration);
        self
    }

    /// Refreshes entries this long after they were created or last replaced.
    pub fn refresh_after_write(mut self, duration: Duration) -> Self {
        self.refresh_after_write = Some(duration);
        self
    }

    /// Enables hit/miss statistics.
    pub fn record_stats(mut self) -> Self {
        self.record_stats = true;
        self
    }

    /// Sets the function used to weigh entries against
    /// [`maximum_weight`](Self::maximum_weight).
    pub fn weigher<F>(mut self, weigher: F) -> Self
    where
        F: Fn(&K, &V) -> u32 + Send + Sync + 'static,
    {
        self.weigher = Some(Arc::new(weigher));
        self
    }

    /// Returns the configured initial capacity.
    pub fn get_initial_capacity(&self) -> Option<u64> {
        self.initial_capacity
    }

    /// Returns the configured maximum size.
    pub fn get_maximum_size(&self) -> Option<u64> {
        self.maximum_size
    }

    /// Returns the configured maximum weight.
    pub fn get_maximum_weight(&self) -> Option<u64> {
        self.maximum_weight
    }

    /// Returns the configured key strength.
    pub fn get_key_strength(&self) -> Option<Strength> {
        self.key_strength
    }

    /// Returns the configured value strength.
    pub fn get_value_strength(&self) -> Option<Strength> {
        self.value_strength
    }

    /// Returns the configured write expiration.
    pub fn get_expire_after_write(&self) -> Option<Duration> {
        self.expire_after_write
    }

    /// Returns the configured access expiration.
    pub fn get_expire_after_access(&self) -> Option<Duration> {
        self.expire_after_access
    }

    /// Returns the configured refresh interval.
    pub fn get_refresh_after_write(&self) -> Option<Duration> {
        self.refresh_after_write
    }

    /// Returns `true` if statistics are enabled.
    pub fn is_recording_stats(&self) -> bool {
        self.record_stats
    }

    /// Returns `true` if a weigher has been set.
    pub fn has_weigher(&self) -> bool {
        self.weigher.is_some()
    }

    /// Validates the options and freezes them into [`CacheSettings`].
    ///
    /// A weigher without a maximum weight has nothing to measure against; it is dropped
    /// with a warning rather than rejected.
    ///
    /// # Errors
    ///
    /// - [`BuildError::ConflictingBounds`] if both a maximum size and a maximum weight are set
    /// - [`BuildError::MissingWeigher`] if a maximum weight is set without a weigher
    pub fn build(self) -> Result<CacheSettings<K, V>, BuildError> {
        let bound = match (self.maximum_size, self.maximum_weight, self.weigher) {
            (Some(_), Some(_), _) => return Err(BuildError::ConflictingBounds),
            (_, Some(_), None) => return Err(BuildError::MissingWeigher),
            (_, Some(maximum), Some(weigher)) => Some(Bound::Weight { maximum, weigher }),
            (size, None, weigher) => {
                if weigher.is_some() {
                    warn!("ignoring weigher specified without maximum weight");
                }
                size.map(Bound::Entries)
            }
        };

        let settings = CacheSettings {
            initial_capacity: self.initial_capacity,
            bound,
            key_strength: self.key_strength,
            value_strength: self.value_strength,
            expire_after_write: self.expire_after_write,
            expire_after_access: self.expire_after_access,
            refresh_after_write: self.refresh_after_write,
            record_stats: self.record_stats,
        };
        debug!(?settings, "built cache settings");
        Ok(settings)
    }
}

impl<K, V> Default for CacheBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for CacheBuilder<K, V> {
    fn clone(&self) -> Self {
        CacheBuilder {
            initial_capacity: self.initial_capacity,
            maximum_size: self.maximum_size,
            maximum_weight: self.maximum_weight,
            key_strength: self.key_strength,
            value_strength: self.value_strength,
            expire_after_write: self.expire_after_write,
            expire_after_access: self.expire_after_access,
            refresh_after_write: self.refresh_after_write,
            record_stats: self.record_stats,
            weigher: self.weigher.clone(),
        }
    }
}

impl<K, V> PartialEq for CacheBuilder<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.initial_capacity == other.initial_capacity
            && self.maximum_size == other.maximum_size
            && self.maximum_weight == other.maximum_weight
            && self.key_strength == other.key_strength
            && self.value_strength == other.value_strength
            && self.expire_after_write == other.expire_after_write
            && self.expire_after_access == other.expire_after_access
            && self.refresh_after_write == other.refresh_after_write
            && self.record_stats == other.record_stats
            && self.has_weigher() == other.has_weigher()
    }
}

impl<K, V> fmt::Debug for CacheBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("initial_capacity", &self.initial_capacity)
            .field("maximum_size", &self.maximum_size)
            .field("maximum_weight", &self.maximum_weight)
            .field("key_strength", &self.key_strength)
            .field("value_strength", &self.value_strength)
            .field("expire_after_write", &self.expire_after_write)
            .field("expire_after_access", &self.expire_after_access)
            .field("refresh_after_write", &self.refresh_after_write)
            .field("record_stats", &self.record_stats)
            .field("weigher", &self.has_weigher())
            .finish()
    }
}

/// How the cache limits its contents.
pub enum Bound<K, V> {
    /// At most this many entries.
    Entries(u64),
    /// At most this much total weight.
    Weight {
        /// Upper bound on the sum of entry weights.
        maximum: u64,
        /// Measures one entry.
        weigher: Weigher<K, V>,
    },
}

impl<K, V> Clone for Bound<K, V> {
    fn clone(&self) -> Self {
        match self {
            Bound::Entries(n) => Bound::Entries(*n),
            Bound::Weight { maximum, weigher } => Bound::Weight {
                maximum: *maximum,
                weigher: Arc::clone(weigher),
            },
        }
    }
}

impl<K, V> fmt::Debug for Bound<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Entries(n) => f.debug_tuple("Entries").field(n).finish(),
            Bound::Weight { maximum, .. } => f
                .debug_struct("Weight")
                .field("maximum", maximum)
                .finish_non_exhaustive(),
        }
    }
}

/// Validated cache options produced by [`CacheBuilder::build`].
///
/// All fields are public so a cache engine can read them directly; the type itself
/// guarantees that size and weight bounds are never both present.
pub struct CacheSettings<K, V> {
    /// Number of entries to size internal tables for.
    pub initial_capacity: Option<u64>,
    /// Entry-count or weight limit, if any.
    pub bound: Option<Bound<K, V>>,
    /// Reference strength for keys.
    pub key_strength: Option<Strength>,
    /// Reference strength for values.
    pub value_strength: Option<Strength>,
    /// Time-to-live measured from the last write.
    pub expire_after_write: Option<Duration>,
    /// Time-to-idle measured from the last access.
    pub expire_after_access: Option<Duration>,
    /// Refresh interval measured from the last write.
    pub refresh_after_write: Option<Duration>,
    /// Whether statistics are recorded.
    pub record_stats: bool,
}

impl<K, V> CacheSettings<K, V> {
    /// Returns the weight of one entry: the weigher's result for weight-bounded caches,
    /// otherwise `1`.
    pub fn weigh(&self, key: &K, value: &V) -> u32 {
        match &self.bound {
            Some(Bound::Weight { weigher, .. }) => weigher(key, value),
            _ => 1,
        }
    }

    /// Returns `true` if entries are evicted to honour a size or weight bound.
    pub fn evicts(&self) -> bool {
        self.bound.is_some()
    }

    /// Returns `true` if entries expire on a timer.
    pub fn expires(&self) -> bool {
        self.expire_after_write.is_some() || self.expire_after_access.is_some()
    }
}

impl<K, V> Clone for CacheSettings<K, V> {
    fn clone(&self) -> Self {
        CacheSettings {
            initial_capacity: self.initial_capacity,
            bound: self.bound.clone(),
            key_strength: self.key_strength,
            value_strength: self.value_strength,
            expire_after_write: self.expire_after_write,
            expire_after_access: self.expire_after_access,
            refresh_after_write: self.refresh_after_write,
            record_stats: self.record_stats,
        }
    }
}

impl<K, V> fmt::Debug for CacheSettings<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSettings")
            .field("initial_capacity", &self.initial_capacity)
            .field("bound", &self.bound)
            .field("key_strength", &self.key_strength)
            .field("value_strength", &self.value_strength)
            .field("expire_after_write", &self.expire_after_write)
            .field("expire_after_access", &self.expire_after_access)
            .field("refresh_after_write", &self.refresh_after_write)
            .field("record_stats", &self.record_stats)
            .finish()
    }
}
