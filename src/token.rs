//! Tokenizer for specification strings.
//!
//! A specification is a comma separated list of options:
//!
//! ```text
//! spec  := "" | token ("," token)*
//! token := key | key "=" value
//! ```
//!
//! The tokenizer only splits and trims. It never rejects anything. Empty tokens
//! (from `",weakKeys"` or `"a,,b"`) are yielded as-is and the parser decides what to do
//! with them.
//!
//! ```
//! use cache_spec::token::tokenize;
//!
//! let keys: Vec<_> = tokenize(" weakKeys , maximumSize = 10 ")
//!     .map(|t| t.split().0)
//!     .collect();
//! assert_eq!(keys, ["weakKeys", "maximumSize"]);
//! ```

use core::iter::FusedIterator;
use core::str::Split;

/// Separator between options.
pub const OPTION_SEPARATOR: char = ',';

/// Separator between a key and its value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// One trimmed, comma-delimited unit of a specification string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    raw: &'a str,
}

impl<'a> Token<'a> {
    /// Returns the token text with surrounding whitespace removed.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Returns `true` if nothing but whitespace sat between the separators.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Splits the token on its first `=` into a trimmed key and optional trimmed value.
    ///
    /// Anything after the first `=` belongs to the value, including further `=` signs;
    /// see [`Token::has_extra_separator`].
    pub fn split(&self) -> (&'a str, Option<&'a str>) {
        match self.raw.split_once(KEY_VALUE_SEPARATOR) {
            Some((key, value)) => (key.trim_end(), Some(value.trim_start())),
            None => (self.raw, None),
        }
    }

    /// Returns `true` if the token holds more than one `=`.
    pub fn has_extra_separator(&self) -> bool {
        self.raw.matches(KEY_VALUE_SEPARATOR).nth(1).is_some()
    }
}

/// Lazy iterator over the tokens of a specification string.
///
/// Created by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    inner: Option<Split<'a, char>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let piece = self.inner.as_mut()?.next()?;
        Some(Token { raw: piece.trim() })
    }
}

impl FusedIterator for Tokens<'_> {}

/// Splits `spec` into trimmed tokens.
///
/// An empty string yields no tokens at all (not one empty token). A string made only of
/// whitespace yields a single empty token.
pub fn tokenize(spec: &str) -> Tokens<'_> {
    let inner = if spec.is_empty() {
        None
    } else {
        Some(spec.split(OPTION_SEPARATOR))
    };
    Tokens { inner }
}
