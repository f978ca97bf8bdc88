/*!

# lexre - longest-prefix regular expression matching

This crate provides a small regular expression engine whose matcher
reports the longest prefix of the input that the pattern matches, the
way a lexer consumes a token from the front of its input.

# Example: match a prefix

```rust
use lexre::Regex;
let re = Regex::new("ab+c?").unwrap();
assert_eq!(re.matching_prefix("abbbc then more"), Some("abbbc"));
assert_eq!(re.matching_prefix("xabc"), None);
```

# Example: greedy matching

Among all matching prefixes, the longest wins:

```rust
use lexre::Regex;
let re = Regex::new("a*").unwrap();
assert_eq!(re.matching_prefix("aaab"), Some("aaa"));
```

# Supported syntax

- Literal characters; `\` escapes the next character unconditionally
- `.` matching any single character
- `[...]` character classes with `a-z` style ranges
- `(...)` groups
- `|` alternation, combining pairwise left to right
- `?`, `*`, `+` and bounded repetition `{n}`, `{min,max}`, `{min,}`

There are no capture groups, backreferences, lookaround, or anchors:
matching is always anchored at the start of the input, and trailing
unmatched input is simply left unconsumed.

# Architecture

A scanner slices the pattern into typed symbols, a stack-machine
compiler composes automaton fragments out of them (Thompson style), and
the matcher walks the resulting nondeterministic automaton with an
epsilon-closure frontier, recording the last offset at which the
accepting condition was reached.

Compilation is guarded by configurable [`Limits`]: patterns whose
automaton would exceed the state bound fail fast with
[`Error::TooLarge`] rather than exhausting memory.

A compiled [`Regex`] is immutable and may be shared across threads for
concurrent matching without synchronization.

*/

#![warn(clippy::all)]

pub use crate::api::*;

mod api;
mod compile;
mod matcher;
mod nfa;
mod scan;
mod types;
