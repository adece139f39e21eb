//! The table of recognized option keys.
//!
//! Every option the parser understands is one [`KeyEntry`] in [`KEYS`]. An entry names
//! the key, says what kind of value it takes and which exclusion group (if any) it shares
//! with other keys. The parser consults this table uniformly, so adding an option is a
//! one-entry change plus the field it writes.
//!
//! | Key | Kind | Exclusion group |
//! |-----|------|-----------------|
//! | `initialCapacity`   | integer  | - |
//! | `maximumSize`       | integer  | `Bound` |
//! | `maximumWeight`     | integer  | `Bound` |
//! | `weakKeys`          | flag     | - |
//! | `weakValues`        | flag     | `ValueStrength` |
//! | `softValues`        | flag     | `ValueStrength` |
//! | `expireAfterAccess` | duration | - |
//! | `expireAfterWrite`  | duration | - |
//! | `refreshAfterWrite` | duration | - |
//! | `recordStats`       | flag     | - |

/// Identifies the record field an option writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKey {
    /// `initialCapacity=<n>`
    InitialCapacity,
    /// `maximumSize=<n>`
    MaximumSize,
    /// `maximumWeight=<n>`
    MaximumWeight,
    /// `weakKeys`
    WeakKeys,
    /// `weakValues`
    WeakValues,
    /// `softValues`
    SoftValues,
    /// `expireAfterAccess=<duration>`
    ExpireAfterAccess,
    /// `expireAfterWrite=<duration>`
    ExpireAfterWrite,
    /// `refreshAfterWrite=<duration>`
    RefreshAfterWrite,
    /// `recordStats`
    RecordStats,
}

/// The shape of value an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Bare key, no value allowed.
    Flag,
    /// Base-10 non-negative integer.
    Integer,
    /// `<integer><unit>` or ISO-8601 duration.
    Duration,
}

/// A set of keys of which at most one may appear in a specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExclusionGroup {
    /// `maximumSize` / `maximumWeight`
    Bound,
    /// `weakValues` / `softValues`
    ValueStrength,
}

/// One row of the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    /// Name as written in a specification.
    pub name: &'static str,
    /// Field the option writes.
    pub key: SpecKey,
    /// Value shape.
    pub kind: KeyKind,
    /// Exclusion group shared with other keys.
    pub group: Option<ExclusionGroup>,
}

const fn entry(
    name: &'static str,
    key: SpecKey,
    kind: KeyKind,
    group: Option<ExclusionGroup>,
) -> KeyEntry {
    KeyEntry {
        name,
        key,
        kind,
        group,
    }
}

/// Every option the parser recognizes, in canonical output order.
pub const KEYS: &[KeyEntry] = &[
    entry("initialCapacity", SpecKey::InitialCapacity, KeyKind::Integer, None),
    entry(
        "maximumSize",
        SpecKey::MaximumSize,
        KeyKind::Integer,
        Some(ExclusionGroup::Bound),
    ),
    entry(
        "maximumWeight",
        SpecKey::MaximumWeight,
        KeyKind::Integer,
        Some(ExclusionGroup::Bound),
    ),
    entry("weakKeys", SpecKey::WeakKeys, KeyKind::Flag, None),
    entry(
        "weakValues",
        SpecKey::WeakValues,
        KeyKind::Flag,
        Some(ExclusionGroup::ValueStrength),
    ),
    entry(
        "softValues",
        SpecKey::SoftValues,
        KeyKind::Flag,
        Some(ExclusionGroup::ValueStrength),
    ),
    entry("expireAfterAccess", SpecKey::ExpireAfterAccess, KeyKind::Duration, None),
    entry("expireAfterWrite", SpecKey::ExpireAfterWrite, KeyKind::Duration, None),
    entry("refreshAfterWrite", SpecKey::RefreshAfterWrite, KeyKind::Duration, None),
    entry("recordStats", SpecKey::RecordStats, KeyKind::Flag, None),
];

/// Looks up a key by its exact (case-sensitive) name.
pub fn lookup(name: &str) -> Option<&'static KeyEntry> {
    KEYS.iter().find(|e| e.name == name)
}

impl SpecKey {
    /// Returns the table row for this key.
    pub fn entry(self) -> &'static KeyEntry {
        // KEYS holds exactly one row per variant, in declaration order.
        &KEYS[self as usize]
    }

    /// Returns the name as written in a specification.
    #[inline]
    pub fn name(self) -> &'static str {
        self.entry().name
    }
}
