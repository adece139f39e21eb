//! Reference strength of cached keys and values.

use core::fmt;

/// How strongly a cache holds on to its keys or values.
///
/// Anything not listed here is held strongly, which is represented by the absence of a
/// strength (`None`) on [`CacheSpec`](crate::CacheSpec) and
/// [`CacheBuilder`](crate::CacheBuilder).
///
/// | Strength | Keys | Values | Reclaimed when |
/// |----------|------|--------|----------------|
/// | `Weak`   | yes  | yes    | no strong reference remains |
/// | `Soft`   | no   | yes    | the host is under memory pressure |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strength {
    /// Entries may be reclaimed as soon as nothing else references them.
    Weak,
    /// Entries may be reclaimed in response to memory demand.
    Soft,
}

impl Strength {
    /// Returns the lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Soft => "soft",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
