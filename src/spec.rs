//! The parsed cache specification record.
//!
//! [`CacheSpec::parse`] runs a single left-to-right pass over the tokens of a
//! specification string. Each token is looked up in the [key table](crate::key), its value
//! is converted to the key's type, and the target field is claimed. The first violation
//! ends the parse. There is no partial result.
//!
//! # Examples
//!
//! ```
//! use cache_spec::{CacheSpec, Strength};
//! use core::time::Duration;
//!
//! let spec = CacheSpec::parse("maximumSize=10000, expireAfterWrite=10m, weakKeys").unwrap();
//! assert_eq!(spec.maximum_size(), Some(10_000));
//! assert_eq!(spec.expire_after_write(), Some(Duration::from_secs(600)));
//! assert_eq!(spec.key_strength(), Some(Strength::Weak));
//! assert_eq!(spec.initial_capacity(), None);
//!
//! // Equality ignores how a value was written
//! assert_eq!(
//!     CacheSpec::parse("expireAfterAccess=60s").unwrap(),
//!     CacheSpec::parse("expireAfterAccess=1m").unwrap(),
//! );
//! ```

use alloc::string::{String, ToString};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use core::time::Duration;

use tracing::debug;

use crate::builder::CacheBuilder;
use crate::duration::{self, DisplayDuration};
use crate::error::{FormatIssue, SpecError};
use crate::key::{self, ExclusionGroup, KeyEntry, KeyKind, SpecKey, KEYS};
use crate::strength::Strength;
use crate::token::{tokenize, Token};

/// Every compared field, in declaration order.
type Fields = (
    Option<u64>,
    Option<u64>,
    Option<u64>,
    Option<Strength>,
    Option<Strength>,
    Option<Duration>,
    Option<Duration>,
    Option<Duration>,
    bool,
);

/// An immutable, validated cache configuration parsed from a specification string.
///
/// Every optional field starts unset (`None`), which is distinct from an explicit zero.
/// Equality and hashing cover every field but not the original text, so two strings that
/// describe the same configuration produce equal records.
///
/// A `CacheSpec` never changes after [`parse`](CacheSpec::parse) returns it and can be
/// shared between threads freely.
#[derive(Clone, Default)]
pub struct CacheSpec {
    specification: String,
    initial_capacity: Option<u64>,
    maximum_size: Option<u64>,
    maximum_weight: Option<u64>,
    key_strength: Option<Strength>,
    value_strength: Option<Strength>,
    expire_after_write: Option<Duration>,
    expire_after_access: Option<Duration>,
    refresh_after_write: Option<Duration>,
    record_stats: bool,
}

impl CacheSpec {
    /// Parses a specification string.
    ///
    /// The empty string is valid and yields a record with every field unset. Empty
    /// options between commas (`"weakKeys,"`, `",weakKeys"`, `"a,,b"`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`SpecError`] encountered:
    ///
    /// - [`UnknownKey`](SpecError::UnknownKey) for an unrecognized option name
    /// - [`DuplicateKey`](SpecError::DuplicateKey) when an option repeats
    /// - [`ConflictingKeys`](SpecError::ConflictingKeys) for `maximumSize` with
    ///   `maximumWeight`, or `weakValues` with `softValues`
    /// - [`InvalidFormat`](SpecError::InvalidFormat) for a missing, unexpected or
    ///   malformed value
    pub fn parse(specification: &str) -> Result<Self, SpecError> {
        let mut parser = SpecParser::new(specification);
        for token in tokenize(specification) {
            if let Err(err) = parser.apply(token) {
                debug!(%err, "rejected cache specification");
                return Err(err);
            }
        }
        Ok(parser.finish())
    }

    /// Returns the text this record was parsed from.
    ///
    /// The text is kept for diagnostics only and takes no part in equality.
    #[inline]
    pub fn specification(&self) -> &str {
        &self.specification
    }

    /// Returns the `initialCapacity` option.
    #[inline]
    pub fn initial_capacity(&self) -> Option<u64> {
        self.initial_capacity
    }

    /// Returns the `maximumSize` option.
    #[inline]
    pub fn maximum_size(&self) -> Option<u64> {
        self.maximum_size
    }

    /// Returns the `maximumWeight` option.
    #[inline]
    pub fn maximum_weight(&self) -> Option<u64> {
        self.maximum_weight
    }

    /// Returns the key strength; only `weakKeys` sets one.
    #[inline]
    pub fn key_strength(&self) -> Option<Strength> {
        self.key_strength
    }

    /// Returns the value strength set by `weakValues` or `softValues`.
    #[inline]
    pub fn value_strength(&self) -> Option<Strength> {
        self.value_strength
    }

    /// Returns the `expireAfterWrite` option.
    #[inline]
    pub fn expire_after_write(&self) -> Option<Duration> {
        self.expire_after_write
    }

    /// Returns the `expireAfterAccess` option.
    #[inline]
    pub fn expire_after_access(&self) -> Option<Duration> {
        self.expire_after_access
    }

    /// Returns the `refreshAfterWrite` option.
    #[inline]
    pub fn refresh_after_write(&self) -> Option<Duration> {
        self.refresh_after_write
    }

    /// Returns `true` if `recordStats` was given.
    #[inline]
    pub fn record_stats(&self) -> bool {
        self.record_stats
    }

    /// Returns the canonical text of this record.
    ///
    /// Options appear in a fixed order, and durations use the largest unit that
    /// represents them exactly. Parsing the result yields an equal record.
    ///
    /// ```
    /// use cache_spec::CacheSpec;
    ///
    /// let spec = CacheSpec::parse(" recordStats , expireAfterWrite = 3600s ,maximumSize=5").unwrap();
    /// assert_eq!(spec.to_parsable_string(), "maximumSize=5,expireAfterWrite=1h,recordStats");
    /// ```
    pub fn to_parsable_string(&self) -> String {
        self.to_string()
    }

    /// Projects this record onto a [`CacheBuilder`].
    ///
    /// Each set field becomes exactly one builder call; unset fields leave the builder's
    /// defaults in place. A record with `maximumWeight` needs
    /// [`CacheBuilder::weigher`] before [`CacheBuilder::build`] will succeed.
    pub fn to_builder<K, V>(&self) -> CacheBuilder<K, V> {
        let mut builder = CacheBuilder::new();
        if let Some(capacity) = self.initial_capacity {
            builder = builder.initial_capacity(capacity);
        }
        if let Some(size) = self.maximum_size {
            builder = builder.maximum_size(size);
        }
        if let Some(weight) = self.maximum_weight {
            builder = builder.maximum_weight(weight);
        }
        if self.key_strength == Some(Strength::Weak) {
            builder = builder.weak_keys();
        }
        match self.value_strength {
            Some(Strength::Weak) => builder = builder.weak_values(),
            Some(Strength::Soft) => builder = builder.soft_values(),
            None => {}
        }
        if let Some(duration) = self.expire_after_write {
            builder = builder.expire_after_write(duration);
        }
        if let Some(duration) = self.expire_after_access {
            builder = builder.expire_after_access(duration);
        }
        if let Some(duration) = self.refresh_after_write {
            builder = builder.refresh_after_write(duration);
        }
        if self.record_stats {
            builder = builder.record_stats();
        }
        builder
    }

    /// Returns `true` if the field written by `key` holds a value.
    pub(crate) fn is_set(&self, key: SpecKey) -> bool {
        match key {
            SpecKey::InitialCapacity => self.initial_capacity.is_some(),
            SpecKey::MaximumSize => self.maximum_size.is_some(),
            SpecKey::MaximumWeight => self.maximum_weight.is_some(),
            SpecKey::WeakKeys => self.key_strength.is_some(),
            SpecKey::WeakValues => self.value_strength == Some(Strength::Weak),
            SpecKey::SoftValues => self.value_strength == Some(Strength::Soft),
            SpecKey::ExpireAfterAccess => self.expire_after_access.is_some(),
            SpecKey::ExpireAfterWrite => self.expire_after_write.is_some(),
            SpecKey::RefreshAfterWrite => self.refresh_after_write.is_some(),
            SpecKey::RecordStats => self.record_stats,
        }
    }

    fn fields(&self) -> Fields {
        (
            self.initial_capacity,
            self.maximum_size,
            self.maximum_weight,
            self.key_strength,
            self.value_strength,
            self.expire_after_write,
            self.expire_after_access,
            self.refresh_after_write,
            self.record_stats,
        )
    }
}

impl PartialEq for CacheSpec {
    fn eq(&self, other: &Self) -> bool {
        self.fields() == other.fields()
    }
}

impl Eq for CacheSpec {}

impl Hash for CacheSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fields().hash(state);
    }
}

impl fmt::Debug for CacheSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSpec")
            .field("initial_capacity", &self.initial_capacity)
            .field("maximum_size", &self.maximum_size)
            .field("maximum_weight", &self.maximum_weight)
            .field("key_strength", &self.key_strength)
            .field("value_strength", &self.value_strength)
            .field("expire_after_write", &self.expire_after_write)
            .field("expire_after_access", &self.expire_after_access)
            .field("refresh_after_write", &self.refresh_after_write)
            .field("record_stats", &self.record_stats)
            .finish()
    }
}

impl fmt::Display for CacheSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for entry in KEYS.iter().filter(|e| self.is_set(e.key)) {
            f.write_str(separator)?;
            separator = ",";
            match entry.kind {
                KeyKind::Flag => f.write_str(entry.name)?,
                _ => write!(f, "{}={}", entry.name, FieldValue::new(self, entry.key))?,
            }
        }
        Ok(())
    }
}

impl FromStr for CacheSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheSpec::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CacheSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CacheSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize<'de>>::deserialize(deserializer)?;
        CacheSpec::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Renders the current value of one field, as it would appear after `=`.
struct FieldValue<'a> {
    spec: &'a CacheSpec,
    key: SpecKey,
}

impl<'a> FieldValue<'a> {
    fn new(spec: &'a CacheSpec, key: SpecKey) -> Self {
        Self { spec, key }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.spec;
        let integer = |value: Option<u64>, f: &mut fmt::Formatter<'_>| match value {
            Some(n) => write!(f, "{n}"),
            None => Ok(()),
        };
        let duration = |value: Option<Duration>, f: &mut fmt::Formatter<'_>| match value {
            Some(d) => write!(f, "{}", DisplayDuration(d)),
            None => Ok(()),
        };
        match self.key {
            SpecKey::InitialCapacity => integer(spec.initial_capacity, f),
            SpecKey::MaximumSize => integer(spec.maximum_size, f),
            SpecKey::MaximumWeight => integer(spec.maximum_weight, f),
            SpecKey::WeakKeys => match spec.key_strength {
                Some(strength) => write!(f, "{strength}"),
                None => Ok(()),
            },
            SpecKey::WeakValues | SpecKey::SoftValues => match spec.value_strength {
                Some(strength) => write!(f, "{strength}"),
                None => Ok(()),
            },
            SpecKey::ExpireAfterAccess => duration(spec.expire_after_access, f),
            SpecKey::ExpireAfterWrite => duration(spec.expire_after_write, f),
            SpecKey::RefreshAfterWrite => duration(spec.refresh_after_write, f),
            SpecKey::RecordStats => write!(f, "{}", spec.record_stats),
        }
    }
}

/// A converted option value, ready to be stored.
#[derive(Debug, Clone, Copy)]
enum Value {
    Flag,
    Integer(u64),
    Duration(Duration),
}

/// Accumulates fields for one `parse` call.
struct SpecParser {
    spec: CacheSpec,
}

impl SpecParser {
    fn new(specification: &str) -> Self {
        Self {
            spec: CacheSpec {
                specification: specification.to_string(),
                ..CacheSpec::default()
            },
        }
    }

    fn apply(&mut self, token: Token<'_>) -> Result<(), SpecError> {
        if token.is_empty() {
            return Ok(());
        }

        let (name, raw_value) = token.split();
        let invalid = |reason| SpecError::InvalidFormat {
            key: name.to_string(),
            token: token.as_str().to_string(),
            reason,
        };
        if token.has_extra_separator() {
            return Err(invalid(FormatIssue::MultipleEquals));
        }

        let entry = key::lookup(name).ok_or_else(|| SpecError::UnknownKey {
            key: name.to_string(),
        })?;

        let value = match (entry.kind, raw_value) {
            (KeyKind::Flag, None) => Value::Flag,
            (KeyKind::Flag, Some(_)) => return Err(invalid(FormatIssue::UnexpectedValue)),
            (_, None | Some("")) => return Err(invalid(FormatIssue::MissingValue)),
            (KeyKind::Integer, Some(raw)) => Value::Integer(
                duration::digits(raw).ok_or_else(|| invalid(FormatIssue::NotAnInteger))?,
            ),
            (KeyKind::Duration, Some(raw)) => {
                Value::Duration(duration::parse_duration(raw).map_err(invalid)?)
            }
        };

        self.claim(entry)?;
        debug!(key = entry.name, ?value, "applied cache option");
        self.store(entry.key, value);
        Ok(())
    }

    /// Fails if the field, or another key of the same exclusion group, is already set.
    fn claim(&self, entry: &KeyEntry) -> Result<(), SpecError> {
        let holder = match entry.group {
            Some(group) => self.group_holder(group),
            None => self.spec.is_set(entry.key).then_some(entry.key),
        };
        match holder {
            None => Ok(()),
            Some(existing) if existing == entry.key => Err(SpecError::DuplicateKey {
                key: entry.name.to_string(),
                previous: FieldValue::new(&self.spec, existing).to_string(),
            }),
            Some(existing) => Err(SpecError::ConflictingKeys {
                key: entry.name.to_string(),
                existing: existing.name(),
            }),
        }
    }

    fn group_holder(&self, group: ExclusionGroup) -> Option<SpecKey> {
        KEYS.iter()
            .find(|e| e.group == Some(group) && self.spec.is_set(e.key))
            .map(|e| e.key)
    }

    fn store(&mut self, key: SpecKey, value: Value) {
        let spec = &mut self.spec;
        match (key, value) {
            (SpecKey::InitialCapacity, Value::Integer(n)) => spec.initial_capacity = Some(n),
            (SpecKey::MaximumSize, Value::Integer(n)) => spec.maximum_size = Some(n),
            (SpecKey::MaximumWeight, Value::Integer(n)) => spec.maximum_weight = Some(n),
            (SpecKey::WeakKeys, Value::Flag) => spec.key_strength = Some(Strength::Weak),
            (SpecKey::WeakValues, Value::Flag) => spec.value_strength = Some(Strength::Weak),
            (SpecKey::SoftValues, Value::Flag) => spec.value_strength = Some(Strength::Soft),
            (SpecKey::ExpireAfterAccess, Value::Duration(d)) => spec.expire_after_access = Some(d),
            (SpecKey::ExpireAfterWrite, Value::Duration(d)) => spec.expire_after_write = Some(d),
            (SpecKey::RefreshAfterWrite, Value::Duration(d)) => spec.refresh_after_write = Some(d),
            (SpecKey::RecordStats, Value::Flag) => spec.record_stats = true,
            // KEYS pairs every key with exactly one kind, and `apply` converts by kind.
            (key, value) => unreachable!("{key:?} cannot hold {value:?}"),
        }
    }

    fn finish(self) -> CacheSpec {
        self.spec
    }
}
