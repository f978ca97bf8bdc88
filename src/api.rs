use crate::compile;
use crate::matcher;
use crate::nfa::Nfa;
use crate::types;

use core::str::FromStr;

pub use crate::types::Error;

/// Limits applied during compilation.
/// The defaults are generous; lower them when patterns come from an
/// untrusted source. Nested bounded repetition can produce automatons
/// exponential in pattern length, so `max_states` is what makes such a
/// pattern fail fast instead of exhausting memory.
#[derive(Debug, Copy, Clone)]
pub struct Limits {
    /// Maximum number of automaton states before compilation fails with
    /// [`Error::TooLarge`].
    pub max_states: usize,

    /// Maximum group nesting depth before compilation fails with
    /// [`Error::NestingLimitExceeded`].
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_states: types::MAX_STATES,
            max_depth: types::MAX_NESTING,
        }
    }
}

/// A Regex is the compiled version of a pattern, ready for prefix
/// matching. It is immutable once compiled and may be shared freely
/// between threads; matching allocates only per-call scratch.
#[derive(Debug, Clone)]
pub struct Regex {
    nfa: Nfa,
}

impl Regex {
    /// Construct a regex by compiling `pattern` with the default limits.
    /// An Error may be returned if the syntax is invalid.
    /// Note this is relatively expensive; prefer to cache a Regex which
    /// is intended to be used more than once.
    #[inline]
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        Self::with_limits(pattern, Limits::default())
    }

    /// Construct a regex by compiling `pattern` with explicit `limits`.
    /// An Error may be returned if the syntax is invalid or a limit is
    /// exceeded.
    pub fn with_limits(pattern: &str, limits: Limits) -> Result<Regex, Error> {
        Ok(Regex {
            nfa: compile::compile(pattern, &limits)?,
        })
    }

    /// Search for the longest prefix of `text` the pattern matches.
    /// Returns `None` if no prefix matches, and `Some(prefix)` otherwise;
    /// the prefix may be empty, for patterns like `a*` which match the
    /// zero-length string. Trailing unmatched input is not an error.
    ///
    /// ```rust
    /// use lexre::Regex;
    /// let re = Regex::new("ab+c?").unwrap();
    /// assert_eq!(re.matching_prefix("abbbc-and-the-rest"), Some("abbbc"));
    /// assert_eq!(re.matching_prefix("a"), None);
    /// ```
    #[inline]
    pub fn matching_prefix<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.matching_prefix_len(text).map(|len| &text[..len])
    }

    /// Like [`Regex::matching_prefix`], but returns the byte length of
    /// the matched prefix. The length always falls on a char boundary.
    #[inline]
    pub fn matching_prefix_len(&self, text: &str) -> Option<usize> {
        matcher::longest_prefix(&self.nfa, text)
    }

    /// The number of states in the compiled automaton.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.nfa.state_count()
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to compile a string into a regular expression.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::new(s)
    }
}
