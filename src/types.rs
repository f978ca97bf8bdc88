use core::fmt;

/// The default maximum number of automaton states.
/// Compilation fails with [`Error::TooLarge`] past this, so a pathological
/// pattern (deeply nested bounded repetition) fails fast instead of
/// exhausting memory.
pub const MAX_STATES: usize = 1 << 16;

/// The default maximum group nesting depth.
pub const MAX_NESTING: usize = 64;

/// Represents an error encountered during pattern compilation.
/// Matching itself never fails; a non-matching input is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern ended while a `(`, `[`, or `{` was still open.
    UnclosedDelimiter { open: char },

    /// A closing delimiter did not match the innermost open kind.
    MismatchedDelimiter { expected: char, found: char },

    /// The pattern ended immediately after a `\`.
    UnterminatedEscape,

    /// The body of a `{...}` quantifier could not be classified.
    InvalidQuantifier { body: String },

    /// A quantifier appeared with nothing preceding it to repeat.
    QuantifierWithNoOperand,

    /// A `|` appeared with no operand on one of its sides.
    AlternationMissingOperand,

    /// A bounded repetition with `max < min`.
    InvalidRepetitionBounds { min: usize, max: usize },

    /// Group nesting exceeded the configured depth limit.
    NestingLimitExceeded,

    /// The automaton exceeded the configured state limit.
    TooLarge { limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnclosedDelimiter { open } => {
                write!(f, "Unclosed delimiter: `{}`", open)
            }
            Error::MismatchedDelimiter { expected, found } => {
                write!(
                    f,
                    "Mismatched delimiter: expected `{}`, found `{}`",
                    expected, found
                )
            }
            Error::UnterminatedEscape => f.write_str("Unterminated escape"),
            Error::InvalidQuantifier { body } => {
                write!(f, "Invalid quantifier: `{{{}}}`", body)
            }
            Error::QuantifierWithNoOperand => f.write_str("Quantifier with no operand"),
            Error::AlternationMissingOperand => f.write_str("Alternation missing an operand"),
            Error::InvalidRepetitionBounds { min, max } => {
                write!(f, "Invalid repetition bounds: `{{{},{}}}`", min, max)
            }
            Error::NestingLimitExceeded => f.write_str("Group nesting limit exceeded"),
            Error::TooLarge { limit } => {
                write!(f, "Automaton exceeds the state limit of {}", limit)
            }
        }
    }
}

impl std::error::Error for Error {}
