//! The nondeterministic automaton shared by the compiler and the matcher.
//!
//! States live in an arena indexed by integer handles, so the epsilon
//! cycles introduced by `*` and `+` need no owned references; traversal
//! keys its visited set by the same handles.

use smallvec::SmallVec;

/// A handle to a state in the automaton, used as an index into its state
/// list.
pub type StateHandle = u32;

/// The entry state of every automaton and fragment.
pub const ENTRY_STATE: StateHandle = 0;

/// The character test carried by a labeled transition. Epsilon edges are
/// stored separately and carry no label at all, so no character value is
/// reserved as a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharMatch {
    /// Matches exactly one specific character.
    Literal(char),
    /// Matches any character in an inclusive range.
    Range(char, char),
    /// Matches any single character.
    Wildcard,
}

impl CharMatch {
    #[inline]
    pub fn matches(self, c: char) -> bool {
        match self {
            CharMatch::Literal(l) => l == c,
            CharMatch::Range(lo, hi) => lo <= c && c <= hi,
            CharMatch::Wildcard => true,
        }
    }
}

/// A single automaton state. Most states have one or two outgoing edges.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Epsilon transitions to other states, traversable without consuming
    /// input.
    pub eps: SmallVec<[StateHandle; 2]>,

    /// Labeled transitions, each consuming one input character.
    pub labeled: SmallVec<[(CharMatch, StateHandle); 2]>,
}

impl State {
    /// Add an epsilon transition to another state.
    pub fn add_eps(&mut self, target: StateHandle) {
        self.eps.push(target);
    }

    /// Add a labeled transition to another state.
    pub fn add_labeled(&mut self, cm: CharMatch, target: StateHandle) {
        self.labeled.push((cm, target));
    }

    /// Renumber every target by `delta`, for splicing this state into a
    /// larger fragment.
    pub(crate) fn offset_by(mut self, delta: StateHandle) -> State {
        for target in &mut self.eps {
            *target += delta;
        }
        for (_, target) in &mut self.labeled {
            *target += delta;
        }
        self
    }
}

/// A compiled automaton. The entry is [`ENTRY_STATE`]; reaching `accept`
/// is the single accepting condition (alternation branches converge on it
/// through epsilon edges). Immutable once compiled: matching only reads.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Box<[State]>,
    accept: StateHandle,
}

impl Nfa {
    pub(crate) fn new(states: Vec<State>, accept: StateHandle) -> Nfa {
        debug_assert!((accept as usize) < states.len());
        Nfa {
            states: states.into_boxed_slice(),
            accept,
        }
    }

    #[inline]
    pub(crate) fn state(&self, handle: StateHandle) -> &State {
        &self.states[handle as usize]
    }

    #[inline]
    pub(crate) fn accept(&self) -> StateHandle {
        self.accept
    }

    /// The number of states in the automaton.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}
