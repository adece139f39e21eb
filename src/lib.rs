#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Grammar
//!
//! ```text
//! spec  := "" | token ("," token)*
//! token := key | key "=" value
//! ```
//!
//! ASCII whitespace is tolerated around tokens, keys, `=` and values. Empty tokens
//! (`"weakKeys,"`, `"a,,b"`) are ignored.
//!
//! ## Options
//!
//! | Key | Value | Record field | Builder call |
//! |-----|-------|--------------|--------------|
//! | `initialCapacity`   | integer  | [`initial_capacity`](CacheSpec::initial_capacity) | [`initial_capacity`](CacheBuilder::initial_capacity) |
//! | `maximumSize`       | integer  | [`maximum_size`](CacheSpec::maximum_size) | [`maximum_size`](CacheBuilder::maximum_size) |
//! | `maximumWeight`     | integer  | [`maximum_weight`](CacheSpec::maximum_weight) | [`maximum_weight`](CacheBuilder::maximum_weight) |
//! | `weakKeys`          | -        | [`key_strength`](CacheSpec::key_strength) | [`weak_keys`](CacheBuilder::weak_keys) |
//! | `weakValues`        | -        | [`value_strength`](CacheSpec::value_strength) | [`weak_values`](CacheBuilder::weak_values) |
//! | `softValues`        | -        | [`value_strength`](CacheSpec::value_strength) | [`soft_values`](CacheBuilder::soft_values) |
//! | `expireAfterAccess` | duration | [`expire_after_access`](CacheSpec::expire_after_access) | [`expire_after_access`](CacheBuilder::expire_after_access) |
//! | `expireAfterWrite`  | duration | [`expire_after_write`](CacheSpec::expire_after_write) | [`expire_after_write`](CacheBuilder::expire_after_write) |
//! | `refreshAfterWrite` | duration | [`refresh_after_write`](CacheSpec::refresh_after_write) | [`refresh_after_write`](CacheBuilder::refresh_after_write) |
//! | `recordStats`       | -        | [`record_stats`](CacheSpec::record_stats) | [`record_stats`](CacheBuilder::record_stats) |
//!
//! `maximumSize` and `maximumWeight` exclude each other, as do `weakValues` and
//! `softValues`. Every key may appear at most once.
//!
//! ## Durations
//!
//! `10d`, `150h`, `10m`, `15s` (unit letter case-insensitive), or ISO-8601 such as
//! `PT10M` and `P1DT12H`. See [`duration`].
//!
//! ## Errors
//!
//! ```rust
//! use cache_spec::{CacheSpec, SpecError};
//!
//! assert!(matches!(CacheSpec::parse("foo=17"), Err(SpecError::UnknownKey { .. })));
//! assert!(matches!(
//!     CacheSpec::parse("maximumSize=10,maximumWeight=20"),
//!     Err(SpecError::ConflictingKeys { .. })
//! ));
//! assert!(matches!(
//!     CacheSpec::parse("recordStats,recordStats"),
//!     Err(SpecError::DuplicateKey { .. })
//! ));
//! assert!(matches!(
//!     CacheSpec::parse("weakKeys=true"),
//!     Err(SpecError::InvalidFormat { .. })
//! ));
//! ```
//!
//! ## Modules
//!
//! - [`token`]: Splitting a specification string into trimmed tokens
//! - [`key`]: The table of recognized option keys
//! - [`duration`]: Duration values and their canonical rendering
//! - [`spec`]: The parsed [`CacheSpec`] record
//! - [`builder`]: The [`CacheBuilder`] that records project onto
//! - [`error`]: [`SpecError`] and [`BuildError`]

#![no_std]

extern crate alloc;

/// Tokenizer for specification strings.
///
/// Splits on commas and trims whitespace. It never fails.
pub mod token;

/// Table of recognized option keys.
///
/// Maps each key name to its value kind, target field and exclusion group.
pub mod key;

/// Duration parsing and formatting.
pub mod duration;

/// Reference strength of keys and values.
pub mod strength;

/// Error types.
pub mod error;

/// The parsed specification record.
///
/// Provides [`CacheSpec`], its parser, equality, hashing and canonical form.
pub mod spec;

/// Fluent cache builder.
///
/// Provides [`CacheBuilder`], the target of [`CacheSpec::to_builder`], and the
/// [`CacheSettings`] it validates into.
pub mod builder;

pub use builder::{Bound, CacheBuilder, CacheSettings, Weigher};
pub use error::{BuildError, FormatIssue, SpecError};
pub use spec::CacheSpec;
pub use strength::Strength;
