//! Scanner from pattern text to symbol sequences.
//!
//! The scanner only slices the pattern into typed symbols; all structure
//! (operator binding, group recursion) is applied by the compiler.

use crate::types::Error;

/// A repetition count attached to an operand by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `?`
    ZeroOrOne,
    /// `*`
    ZeroOrMany,
    /// `+`
    OneOrMany,
    /// `{n}`
    Exactly(usize),
    /// `{min,max}`, with `None` meaning unbounded (`{min,}`).
    Range(usize, Option<usize>),
}

/// The contents of a `[...]` character class: individual characters plus
/// inclusive ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassContents {
    pub chars: Vec<char>,
    pub ranges: Vec<(char, char)>,
}

/// A typed symbol produced by scanning a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A single character to be matched verbatim.
    Literal(char),
    /// `.`, matching any one character.
    AnyChar,
    /// A `[...]` class.
    CharClass(ClassContents),
    /// A `(...)` group, carrying the inner text with delimiters excluded.
    /// The compiler recurses into scan+build for it.
    Group(String),
    /// `|`
    Alternation,
    /// A quantifier, shorthand or bounded.
    Quantifier(Quantifier),
}

/// \return the closing delimiter matching an opening one.
fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        _ => panic!("not an opening delimiter: {}", open),
    }
}

/// Scan a delimited run starting at `chars[0]`, which must be an opening
/// delimiter. Nested delimiters of all three kinds are tracked on a stack,
/// and a close must match the innermost open kind specifically. A `\`
/// suppresses any special meaning of the following character.
/// \return the inner text (delimiters excluded) and the total number of
/// characters consumed, including both delimiters.
fn delimited_text(chars: &[char]) -> Result<(String, usize), Error> {
    debug_assert!(matches!(chars[0], '(' | '[' | '{'));
    let mut opens = vec![chars[0]];
    let mut i = 1;
    while let Some(&open) = opens.last() {
        let Some(&c) = chars.get(i) else {
            return Err(Error::UnclosedDelimiter { open });
        };
        match c {
            '\\' => i += 1,
            '(' | '[' | '{' => opens.push(c),
            ')' | ']' | '}' => {
                let expected = closing_delimiter(open);
                if c == expected {
                    opens.pop();
                } else {
                    return Err(Error::MismatchedDelimiter { expected, found: c });
                }
            }
            _ => {}
        }
        i += 1;
    }
    Ok((chars[1..i - 1].iter().collect(), i))
}

/// Classify the body of a `{...}` quantifier.
/// Accepted forms are `{n}`, `{min,max}`, and `{min,}`; a `-` may be used
/// in place of the `,`. The `max < min` case is deliberately not rejected
/// here: bounds are validated when the quantifier is attached to an
/// operand.
fn classify_quantifier(body: &str) -> Result<Quantifier, Error> {
    let invalid = || Error::InvalidQuantifier {
        body: body.to_string(),
    };
    let parse_count = |text: &str| text.parse::<usize>().map_err(|_| invalid());

    let mut parts = body.splitn(2, [',', '-']);
    let min_text = parts.next().unwrap_or_default();
    match parts.next() {
        None => Ok(Quantifier::Exactly(parse_count(min_text)?)),
        Some("") => Ok(Quantifier::Range(parse_count(min_text)?, None)),
        Some(max_text) => {
            // A second separator in the max half is malformed.
            if max_text.contains([',', '-']) {
                return Err(invalid());
            }
            Ok(Quantifier::Range(
                parse_count(min_text)?,
                Some(parse_count(max_text)?),
            ))
        }
    }
}

/// Parse the inner text of a `[...]` class into characters and ranges.
/// A `-` at the very start or end is a plain character, and `\` escapes
/// the next character.
fn parse_class(text: &str) -> ClassContents {
    let chars: Vec<char> = text.chars().collect();
    let mut contents = ClassContents::default();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() {
            contents.chars.push(chars[i + 1]);
            i += 2;
        } else if i + 2 < chars.len() && chars[i + 1] == '-' {
            contents.ranges.push((chars[i], chars[i + 2]));
            i += 3;
        } else if i + 2 == chars.len() && chars[i + 1] == '-' {
            // Trailing `-` is a plain character.
            contents.chars.push(chars[i]);
            contents.chars.push('-');
            i += 2;
        } else {
            contents.chars.push(chars[i]);
            i += 1;
        }
    }
    contents
}

/// Scan a pattern into its symbol sequence.
pub fn scan(pattern: &str) -> Result<Vec<Symbol>, Error> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut symbols = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '(' => {
                let (inner, consumed) = delimited_text(&chars[i..])?;
                symbols.push(Symbol::Group(inner));
                i += consumed;
            }
            '[' => {
                let (inner, consumed) = delimited_text(&chars[i..])?;
                symbols.push(Symbol::CharClass(parse_class(&inner)));
                i += consumed;
            }
            '{' => {
                let (inner, consumed) = delimited_text(&chars[i..])?;
                symbols.push(Symbol::Quantifier(classify_quantifier(&inner)?));
                i += consumed;
            }
            '.' => {
                symbols.push(Symbol::AnyChar);
                i += 1;
            }
            '\\' => match chars.get(i + 1) {
                // Escape disables any special meaning of the next character.
                Some(&c) => {
                    symbols.push(Symbol::Literal(c));
                    i += 2;
                }
                None => return Err(Error::UnterminatedEscape),
            },
            '?' => {
                symbols.push(Symbol::Quantifier(Quantifier::ZeroOrOne));
                i += 1;
            }
            '*' => {
                symbols.push(Symbol::Quantifier(Quantifier::ZeroOrMany));
                i += 1;
            }
            '+' => {
                symbols.push(Symbol::Quantifier(Quantifier::OneOrMany));
                i += 1;
            }
            '|' => {
                symbols.push(Symbol::Alternation);
                i += 1;
            }
            c => {
                symbols.push(Symbol::Literal(c));
                i += 1;
            }
        }
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan1(pattern: &str) -> Symbol {
        let mut symbols = scan(pattern).expect("pattern should scan");
        assert_eq!(symbols.len(), 1, "expected one symbol for {:?}", pattern);
        symbols.pop().unwrap()
    }

    #[test]
    fn literals_and_shorthands() {
        assert_eq!(
            scan("ab+").unwrap(),
            vec![
                Symbol::Literal('a'),
                Symbol::Literal('b'),
                Symbol::Quantifier(Quantifier::OneOrMany),
            ]
        );
        assert_eq!(scan1("."), Symbol::AnyChar);
        assert_eq!(scan1("?"), Symbol::Quantifier(Quantifier::ZeroOrOne));
        assert_eq!(scan1("*"), Symbol::Quantifier(Quantifier::ZeroOrMany));
        assert_eq!(scan1("|"), Symbol::Alternation);
    }

    #[test]
    fn escapes() {
        assert_eq!(scan1(r"\*"), Symbol::Literal('*'));
        assert_eq!(scan1(r"\\"), Symbol::Literal('\\'));
        assert_eq!(scan1(r"\a"), Symbol::Literal('a'));
        assert_eq!(scan("a\\"), Err(Error::UnterminatedEscape));
    }

    #[test]
    fn groups() {
        assert_eq!(scan1("(abc)"), Symbol::Group("abc".to_string()));
        assert_eq!(scan1("(a(b)c)"), Symbol::Group("a(b)c".to_string()));
        // Escaped delimiters do not affect depth tracking.
        assert_eq!(scan1(r"(a\)b)"), Symbol::Group(r"a\)b".to_string()));
        assert_eq!(
            scan("(abc"),
            Err(Error::UnclosedDelimiter { open: '(' })
        );
        assert_eq!(
            scan("(a]"),
            Err(Error::MismatchedDelimiter {
                expected: ')',
                found: ']'
            })
        );
        assert_eq!(
            scan("([a)]"),
            Err(Error::MismatchedDelimiter {
                expected: ']',
                found: ')'
            })
        );
    }

    #[test]
    fn classes() {
        assert_eq!(
            scan1("[ab]"),
            Symbol::CharClass(ClassContents {
                chars: vec!['a', 'b'],
                ranges: vec![],
            })
        );
        assert_eq!(
            scan1("[a-z0]"),
            Symbol::CharClass(ClassContents {
                chars: vec!['0'],
                ranges: vec![('a', 'z')],
            })
        );
        // Leading and trailing `-` are plain characters.
        assert_eq!(
            scan1("[-a]"),
            Symbol::CharClass(ClassContents {
                chars: vec!['-', 'a'],
                ranges: vec![],
            })
        );
        assert_eq!(
            scan1("[a-]"),
            Symbol::CharClass(ClassContents {
                chars: vec!['a', '-'],
                ranges: vec![],
            })
        );
        // An escaped `]` stays inside the class.
        assert_eq!(
            scan1(r"[\]]"),
            Symbol::CharClass(ClassContents {
                chars: vec![']'],
                ranges: vec![],
            })
        );
    }

    #[test]
    fn quantifier_bodies() {
        assert_eq!(scan1("{3}"), Symbol::Quantifier(Quantifier::Exactly(3)));
        assert_eq!(
            scan1("{2,5}"),
            Symbol::Quantifier(Quantifier::Range(2, Some(5)))
        );
        assert_eq!(
            scan1("{2-5}"),
            Symbol::Quantifier(Quantifier::Range(2, Some(5)))
        );
        assert_eq!(
            scan1("{2,}"),
            Symbol::Quantifier(Quantifier::Range(2, None))
        );
        // Reversed bounds scan fine; the compiler rejects them.
        assert_eq!(
            scan1("{2,1}"),
            Symbol::Quantifier(Quantifier::Range(2, Some(1)))
        );
        for bad in ["{}", "{a}", "{1,2,3}", "{-}", "{1,b}"] {
            assert!(
                matches!(scan(bad), Err(Error::InvalidQuantifier { .. })),
                "expected invalid quantifier for {:?}",
                bad
            );
        }
        assert_eq!(scan("{2"), Err(Error::UnclosedDelimiter { open: '{' }));
    }
}
