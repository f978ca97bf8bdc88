//! Longest-prefix execution of a compiled automaton.
//!
//! The walk is breadth-style: at each input position the frontier is the
//! epsilon closure of the states reached so far, recomputed fresh with a
//! visited set keyed by state handle so the epsilon cycles from `*` and
//! `+` terminate. Acceptance at a position records the best-known match
//! length; later, longer matches overwrite it (greedy longest-prefix).

use crate::nfa::{Nfa, StateHandle, ENTRY_STATE};

/// Expand `seeds` into its epsilon closure. `visited` must be all-false
/// on entry and is used both as the cycle guard and, afterwards, as a
/// by-handle membership test on the closure.
fn eps_close(nfa: &Nfa, seeds: &[StateHandle], closure: &mut Vec<StateHandle>, visited: &mut [bool]) {
    closure.clear();
    let mut work: Vec<StateHandle> = seeds.to_vec();
    while let Some(handle) = work.pop() {
        if visited[handle as usize] {
            continue;
        }
        visited[handle as usize] = true;
        closure.push(handle);
        for &target in &nfa.state(handle).eps {
            if !visited[target as usize] {
                work.push(target);
            }
        }
    }
}

/// \return the byte length of the longest matching prefix of `input`, or
/// None if no prefix (not even the empty one) reaches the accepting
/// condition. The returned length always falls on a char boundary.
pub(crate) fn longest_prefix(nfa: &Nfa, input: &str) -> Option<usize> {
    let accept = nfa.accept() as usize;
    let mut frontier: Vec<StateHandle> = Vec::new();
    let mut seeds: Vec<StateHandle> = vec![ENTRY_STATE];
    let mut visited = vec![false; nfa.state_count()];

    eps_close(nfa, &seeds, &mut frontier, &mut visited);
    let mut best = visited[accept].then_some(0);

    for (offset, c) in input.char_indices() {
        // Advance every frontier state with a matching labeled transition;
        // the union of destinations seeds the next closure.
        seeds.clear();
        for &handle in &frontier {
            for &(cm, target) in &nfa.state(handle).labeled {
                if cm.matches(c) {
                    seeds.push(target);
                }
            }
        }
        if seeds.is_empty() {
            // No further progress is possible.
            break;
        }
        visited.fill(false);
        eps_close(nfa, &seeds, &mut frontier, &mut visited);
        if visited[accept] {
            best = Some(offset + c.len_utf8());
        }
    }
    best
}
