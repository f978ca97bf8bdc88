//! Compilation from symbol sequences to a finished automaton.
//!
//! This is a single left-to-right stack machine over the scanner's
//! symbols. Each base symbol pushes a fragment; quantifiers pop and wrap
//! the most recent fragment; a pending-alternation flag combines the
//! operands on either side of `|`; whatever remains on the stack is
//! concatenated in stack order. Precedence is procedural, not grammatical.

use crate::api::Limits;
use crate::nfa::{CharMatch, Nfa, State, StateHandle, ENTRY_STATE};
use crate::scan::{self, ClassContents, Quantifier, Symbol};
use crate::types::Error;

/// The label on a fragment's pending output edge.
#[derive(Debug, Clone, Copy)]
enum OutLabel {
    Eps,
    Char(CharMatch),
}

/// A partially built automaton: locally numbered states whose entry is
/// state 0, plus one pending output edge. Composition resolves the
/// pending edge into a real transition targeting the appended fragment's
/// entry, renumbering the appended states by offset.
#[derive(Debug, Clone)]
struct Fragment {
    states: Vec<State>,
    /// The state the pending output edge leaves from.
    out_from: StateHandle,
    /// The label carried by the pending output edge.
    out_label: OutLabel,
}

impl Fragment {
    /// The fragment matching the zero-length prefix.
    fn empty() -> Fragment {
        Fragment {
            states: vec![State::default()],
            out_from: ENTRY_STATE,
            out_label: OutLabel::Eps,
        }
    }

    /// A fragment consuming exactly one character satisfying `cm`.
    fn single(cm: CharMatch) -> Fragment {
        Fragment {
            states: vec![State::default()],
            out_from: ENTRY_STATE,
            out_label: OutLabel::Char(cm),
        }
    }

    /// A fragment that can never reach its output, for empty classes.
    fn never() -> Fragment {
        Fragment {
            states: vec![State::default(), State::default()],
            out_from: 1,
            out_label: OutLabel::Eps,
        }
    }

    /// Normalize the pending output edge to an epsilon leaving a dedicated
    /// state, materializing a character-labeled edge into a fresh state if
    /// needed. The looping operators require a real state to splice onto.
    fn with_eps_out(mut self) -> Fragment {
        if let OutLabel::Char(cm) = self.out_label {
            let exit = self.states.len() as StateHandle;
            self.states.push(State::default());
            self.states[self.out_from as usize].add_labeled(cm, exit);
            self.out_from = exit;
            self.out_label = OutLabel::Eps;
        }
        self
    }

    /// Finish compilation: fold the pending output edge into the state
    /// list and mark the state it reaches as the accepting condition.
    fn into_nfa(mut self) -> Nfa {
        let accept = match self.out_label {
            OutLabel::Eps => self.out_from,
            OutLabel::Char(cm) => {
                let accept = self.states.len() as StateHandle;
                self.states.push(State::default());
                self.states[self.out_from as usize].add_labeled(cm, accept);
                accept
            }
        };
        Nfa::new(self.states, accept)
    }
}

/// Resolve a pending output edge into a real transition to `target`.
fn resolve_out(states: &mut [State], from: StateHandle, label: OutLabel, target: StateHandle) {
    match label {
        OutLabel::Eps => states[from as usize].add_eps(target),
        OutLabel::Char(cm) => states[from as usize].add_labeled(cm, target),
    }
}

/// Concatenate two fragments: `a`'s pending edge becomes a real
/// transition into `b`'s entry; the result inherits `b`'s pending edge.
fn concat(a: Fragment, b: Fragment) -> Fragment {
    let Fragment {
        states: mut a_states,
        out_from: a_out,
        out_label: a_label,
    } = a;
    let offset = a_states.len() as StateHandle;
    resolve_out(&mut a_states, a_out, a_label, offset);
    a_states.extend(b.states.into_iter().map(|s| s.offset_by(offset)));
    Fragment {
        states: a_states,
        out_from: b.out_from + offset,
        out_label: b.out_label,
    }
}

/// Alternate two fragments: a new entry forks to both operands' entries
/// and both outputs converge on one new shared exit.
fn alternate(a: Fragment, b: Fragment) -> Fragment {
    let a_offset = 1;
    let b_offset = 1 + a.states.len() as StateHandle;
    let exit = b_offset + b.states.len() as StateHandle;
    let mut states = Vec::with_capacity((exit + 1) as usize);
    let mut entry = State::default();
    entry.add_eps(a_offset);
    entry.add_eps(b_offset);
    states.push(entry);
    let (a_out, a_label) = (a.out_from, a.out_label);
    let (b_out, b_label) = (b.out_from, b.out_label);
    states.extend(a.states.into_iter().map(|s| s.offset_by(a_offset)));
    states.extend(b.states.into_iter().map(|s| s.offset_by(b_offset)));
    states.push(State::default());
    resolve_out(&mut states, a_out + a_offset, a_label, exit);
    resolve_out(&mut states, b_out + b_offset, b_label, exit);
    Fragment {
        states,
        out_from: exit,
        out_label: OutLabel::Eps,
    }
}

/// `?`: an epsilon from the entry bypasses the body.
fn zero_or_one(a: Fragment) -> Fragment {
    let mut a = a.with_eps_out();
    let out = a.out_from;
    if out != ENTRY_STATE {
        a.states[ENTRY_STATE as usize].add_eps(out);
    }
    a
}

/// Shared shape of `*` and `+`: wrap the body in a new entry and exit,
/// loop the body's output back to its own entry, and let it leave to the
/// exit. With `bypass` the entry also forks straight to the exit.
fn wrap_loop(a: Fragment, bypass: bool) -> Fragment {
    let a = a.with_eps_out();
    let body_entry = 1;
    let exit = 1 + a.states.len() as StateHandle;
    let mut states = Vec::with_capacity((exit + 1) as usize);
    let mut entry = State::default();
    entry.add_eps(body_entry);
    if bypass {
        entry.add_eps(exit);
    }
    states.push(entry);
    let body_out = (a.out_from + 1) as usize;
    states.extend(a.states.into_iter().map(|s| s.offset_by(1)));
    states.push(State::default());
    states[body_out].add_eps(body_entry);
    states[body_out].add_eps(exit);
    Fragment {
        states,
        out_from: exit,
        out_label: OutLabel::Eps,
    }
}

/// `*`
fn zero_or_many(a: Fragment) -> Fragment {
    wrap_loop(a, true)
}

/// `+`
fn one_or_many(a: Fragment) -> Fragment {
    wrap_loop(a, false)
}

fn check_size(states: usize, limits: &Limits) -> Result<(), Error> {
    if states > limits.max_states {
        return Err(Error::TooLarge {
            limit: limits.max_states,
        });
    }
    Ok(())
}

fn append(
    result: Option<Fragment>,
    fragment: Fragment,
    limits: &Limits,
) -> Result<Option<Fragment>, Error> {
    let combined = match result {
        None => fragment,
        Some(result) => concat(result, fragment),
    };
    check_size(combined.states.len(), limits)?;
    Ok(Some(combined))
}

/// Generalized bounded repetition: `min` independent copies, then either
/// one `zero_or_many` copy (unbounded) or `max - min` copies each wrapped
/// in `zero_or_one`. Every copy is renumbered fresh, so no states are
/// shared between repetitions.
fn repeat(
    a: Fragment,
    min: usize,
    max: Option<usize>,
    limits: &Limits,
) -> Result<Fragment, Error> {
    if let Some(max) = max {
        if max < min {
            return Err(Error::InvalidRepetitionBounds { min, max });
        }
    }
    let mut result = None;
    for _ in 0..min {
        result = append(result, a.clone(), limits)?;
    }
    match max {
        None => result = append(result, zero_or_many(a), limits)?,
        Some(max) => {
            for _ in min..max {
                result = append(result, zero_or_one(a.clone()), limits)?;
            }
        }
    }
    Ok(result.unwrap_or_else(Fragment::empty))
}

fn apply_quantifier(
    operand: Fragment,
    quantifier: Quantifier,
    limits: &Limits,
) -> Result<Fragment, Error> {
    Ok(match quantifier {
        Quantifier::ZeroOrOne => zero_or_one(operand),
        Quantifier::ZeroOrMany => zero_or_many(operand),
        Quantifier::OneOrMany => one_or_many(operand),
        Quantifier::Exactly(n) => repeat(operand, n, Some(n), limits)?,
        Quantifier::Range(min, max) => repeat(operand, min, max, limits)?,
    })
}

/// A class is the pairwise alternation of its members.
fn class_fragment(contents: ClassContents) -> Fragment {
    contents
        .chars
        .iter()
        .map(|&c| CharMatch::Literal(c))
        .chain(
            contents
                .ranges
                .iter()
                .map(|&(lo, hi)| CharMatch::Range(lo, hi)),
        )
        .map(Fragment::single)
        .reduce(alternate)
        .unwrap_or_else(Fragment::never)
}

fn push_operand(stack: &mut Vec<Fragment>, pending_alt: &mut bool, operand: Fragment) {
    if *pending_alt {
        *pending_alt = false;
        // The alternation marker is only accepted with a fragment on the
        // stack, so the pop succeeds.
        if let Some(lhs) = stack.pop() {
            stack.push(alternate(lhs, operand));
            return;
        }
    }
    stack.push(operand);
}

fn build(symbols: Vec<Symbol>, limits: &Limits, depth: usize) -> Result<Fragment, Error> {
    let mut stack: Vec<Fragment> = Vec::new();
    let mut pending_alt = false;
    for symbol in symbols {
        match symbol {
            Symbol::Literal(c) => {
                push_operand(&mut stack, &mut pending_alt, Fragment::single(CharMatch::Literal(c)))
            }
            Symbol::AnyChar => {
                push_operand(&mut stack, &mut pending_alt, Fragment::single(CharMatch::Wildcard))
            }
            Symbol::CharClass(contents) => {
                push_operand(&mut stack, &mut pending_alt, class_fragment(contents))
            }
            Symbol::Group(text) => {
                let fragment = compile_subpattern(&text, limits, depth + 1)?;
                push_operand(&mut stack, &mut pending_alt, fragment);
            }
            Symbol::Quantifier(quantifier) => {
                let operand = stack.pop().ok_or(Error::QuantifierWithNoOperand)?;
                stack.push(apply_quantifier(operand, quantifier, limits)?);
            }
            Symbol::Alternation => {
                if stack.is_empty() || pending_alt {
                    return Err(Error::AlternationMissingOperand);
                }
                pending_alt = true;
            }
        }
        let total = stack.iter().map(|f| f.states.len()).sum();
        check_size(total, limits)?;
    }
    // A trailing `|` never received its right operand.
    if pending_alt {
        return Err(Error::AlternationMissingOperand);
    }
    Ok(stack.into_iter().reduce(concat).unwrap_or_else(Fragment::empty))
}

fn compile_subpattern(pattern: &str, limits: &Limits, depth: usize) -> Result<Fragment, Error> {
    if depth > limits.max_depth {
        return Err(Error::NestingLimitExceeded);
    }
    build(scan::scan(pattern)?, limits, depth)
}

/// Compile a pattern to its automaton: scanner, stack machine, and accept
/// materialization. Surfaces the first error encountered.
pub(crate) fn compile(pattern: &str, limits: &Limits) -> Result<Nfa, Error> {
    Ok(compile_subpattern(pattern, limits, 0)?.into_nfa())
}
