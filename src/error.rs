//! Error types for specification parsing and builder validation.
//!
//! | Error | Raised by | Meaning |
//! |-------|-----------|---------|
//! | [`SpecError`] | [`CacheSpec::parse`](crate::CacheSpec::parse) | The specification string is malformed or ambiguous |
//! | [`BuildError`] | [`CacheBuilder::build`](crate::CacheBuilder::build) | The builder settings cannot describe a cache |
//!
//! Parsing is deterministic, so none of these errors is worth retrying: feeding the same
//! string again reproduces the same failure.

use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// Why a value (or its absence) was rejected for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatIssue {
    /// A flag key such as `weakKeys` was given `=value`.
    UnexpectedValue,
    /// A key that needs a value was given none, or an empty one.
    MissingValue,
    /// The value is not a base-10 non-negative integer that fits in 64 bits.
    NotAnInteger,
    /// The value does not match `<integer><unit>` or an ISO-8601 duration.
    InvalidDuration,
    /// The duration ends in a unit other than `d`, `h`, `m` or `s`.
    UnknownTimeUnit,
    /// The token holds more than one `=`.
    MultipleEquals,
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FormatIssue::UnexpectedValue => "does not take a value",
            FormatIssue::MissingValue => "requires a value",
            FormatIssue::NotAnInteger => "must be a non-negative integer",
            FormatIssue::InvalidDuration => {
                "must be a duration such as 10s, 5m, 2h, 1d or an ISO-8601 form like PT5M"
            }
            FormatIssue::UnknownTimeUnit => "must end with one of [dDhHmMsS]",
            FormatIssue::MultipleEquals => "has more than one '=' sign",
        };
        f.write_str(msg)
    }
}

/// Error returned when a specification string cannot be parsed.
///
/// Every variant names the offending key so callers can produce a diagnostic without
/// re-scanning the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// The key is not one of the recognized option names.
    #[error("unknown key `{key}`")]
    UnknownKey {
        /// Key as written in the specification.
        key: String,
    },

    /// The key was already applied by an earlier token.
    #[error("key `{key}` was already set to {previous}")]
    DuplicateKey {
        /// Key as written in the specification.
        key: String,
        /// Rendering of the value applied first.
        previous: String,
    },

    /// Another key from the same exclusion group was already applied.
    #[error("key `{key}` conflicts with previously set `{existing}`")]
    ConflictingKeys {
        /// Key as written in the specification.
        key: String,
        /// Key that claimed the exclusion group first.
        existing: &'static str,
    },

    /// The value attached to the key is missing, unexpected or malformed.
    #[error("key `{key}` {reason} (token: `{token}`)")]
    InvalidFormat {
        /// Key as written in the specification.
        key: String,
        /// Trimmed token the key came from.
        token: String,
        /// What was wrong with it.
        reason: FormatIssue,
    },
}

impl SpecError {
    /// Returns the key the error refers to.
    pub fn key(&self) -> &str {
        match self {
            SpecError::UnknownKey { key }
            | SpecError::DuplicateKey { key, .. }
            | SpecError::ConflictingKeys { key, .. }
            | SpecError::InvalidFormat { key, .. } => key,
        }
    }
}

/// Error returned when builder settings are inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Both `maximum_size` and `maximum_weight` were configured.
    #[error("maximum size and maximum weight cannot both be set")]
    ConflictingBounds,
    /// `maximum_weight` was configured without a weigher to measure entries.
    #[error("maximum weight requires a weigher")]
    MissingWeigher,
}
