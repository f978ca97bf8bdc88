//! End-to-end prefix-matching behavior.

use lexre::Regex;

#[track_caller]
fn prefix(pattern: &str, input: &str) -> Option<String> {
    let re = Regex::new(pattern)
        .unwrap_or_else(|err| panic!("Pattern {:?} failed to compile: {}", pattern, err));
    re.matching_prefix(input).map(str::to_string)
}

#[track_caller]
fn assert_prefix(pattern: &str, input: &str, expected: &str) {
    assert_eq!(
        prefix(pattern, input).as_deref(),
        Some(expected),
        "pattern {:?} against input {:?}",
        pattern,
        input
    );
}

#[track_caller]
fn assert_no_match(pattern: &str, input: &str) {
    assert_eq!(
        prefix(pattern, input),
        None,
        "pattern {:?} should not match input {:?}",
        pattern,
        input
    );
}

#[test]
fn test_literals() {
    assert_prefix("a", "a", "a");
    assert_no_match("a", "b");
    assert_prefix("ab", "ab", "ab");
    assert_prefix("ab", "abc", "ab");
    assert_no_match("ab", "ba");
    // A closing delimiter with no open is an ordinary character.
    assert_prefix(")", ")", ")");
}

#[test]
fn test_empty_pattern() {
    assert_prefix("", "", "");
    assert_prefix("", "abc", "");
}

#[test]
fn test_zero_or_one() {
    assert_prefix("a?", "a", "a");
    assert_prefix("a?", "", "");
    // The empty prefix still matches when the input starts elsewhere.
    assert_prefix("a?", "b", "");
    assert_prefix("a?", "aa", "a");
}

#[test]
fn test_one_or_many() {
    assert_no_match("a+", "");
    assert_no_match("a+", "b");
    assert_prefix("a+", "a", "a");
    assert_prefix("a+", "aa", "aa");
    assert_prefix("a+", "aaab", "aaa");
}

#[test]
fn test_zero_or_many() {
    assert_prefix("a*", "", "");
    assert_prefix("a*", "b", "");
    assert_prefix("a*", "aa", "aa");
    // Greedy longest-prefix, not first-match.
    assert_prefix("a*", "aaab", "aaa");
    assert_prefix("a*a", "aaa", "aaa");
}

#[test]
fn test_bounded_repetition() {
    assert_prefix("a{3}", "aaa", "aaa");
    assert_prefix("a{3}", "aaaa", "aaa");
    assert_no_match("a{3}", "aa");

    assert_prefix("a{2,3}", "aa", "aa");
    assert_prefix("a{2,3}", "aaa", "aaa");
    // Greedy up to the cap, never past it.
    assert_prefix("a{2,3}", "aaaa", "aaa");
    assert_no_match("a{2,3}", "a");

    assert_prefix("a{2,}", "aaaaa", "aaaaa");
    assert_no_match("a{2,}", "a");

    // The `-` separator spelling is equivalent.
    assert_prefix("a{2-3}", "aaaa", "aaa");

    // Zero repetitions is the empty match.
    assert_prefix("a{0}", "aaa", "");
    assert_prefix("a{0,0}", "aaa", "");
}

#[test]
fn test_alternation() {
    assert_prefix("a|b", "a", "a");
    assert_prefix("a|b", "b", "b");
    assert_no_match("a|b", "c");
    assert_prefix("a|b", "ab", "a");
    // Chains combine pairwise left to right.
    assert_prefix("a|b|c", "c", "c");
    // `|` binds the single atoms on either side.
    assert_prefix("ab|cd", "abd", "abd");
    assert_prefix("ab|cd", "acd", "acd");
    assert_no_match("ab|cd", "cd");
    // Group the operands for whole-word alternation.
    assert_prefix("(ab)|(cd)", "cd", "cd");
    assert_prefix("(ab)|(cd)", "abx", "ab");
}

#[test]
fn test_wildcard() {
    assert_prefix("a.c", "axc", "axc");
    assert_prefix("...", "xyz", "xyz");
    assert_no_match(".", "");
    assert_prefix(".*", "anything", "anything");
}

#[test]
fn test_escapes() {
    assert_prefix(r"\*", "*", "*");
    assert_no_match(r"\*", "a");
    assert_prefix(r"\\", "\\", "\\");
    assert_prefix(r"\(a\)", "(a)", "(a)");
}

#[test]
fn test_classes() {
    assert_prefix("[abc]", "b", "b");
    assert_no_match("[abc]", "d");
    assert_prefix("[abc]+", "cabx", "cab");
    assert_prefix("[a-z]+", "hello world", "hello");
    assert_prefix("[0-9]{2,4}", "12345", "1234");
    // `-` at the edges is a plain character.
    assert_prefix("[-a]", "-", "-");
    assert_prefix("[a-]+", "a-a", "a-a");
    // A reversed range never matches.
    assert_no_match("[z-a]", "m");
}

#[test]
fn test_groups() {
    assert_prefix("(ab)", "ab", "ab");
    assert_prefix("(ab)+", "ababx", "abab");
    assert_no_match("(ab)+", "a");
    assert_prefix("(a|b)*c", "abbac", "abbac");
    assert_prefix("((a)(b))", "ab", "ab");
    assert_prefix("(a(b)?c)+", "acabcx", "acabc");
}

#[test]
fn test_end_to_end_scenario() {
    assert_prefix("ab+c?", "abbbc", "abbbc");
    assert_prefix("ab+c?", "ab", "ab");
    assert_prefix("ab+c?", "abc", "abc");
    // `a` alone does not satisfy `b+`.
    assert_no_match("ab+c?", "a");
}

#[test]
fn test_unicode_input() {
    assert_prefix("[α-ω]+", "αβγx", "αβγ");
    // Prefix lengths fall on char boundaries, not byte counts.
    assert_prefix(".{2}", "日本語", "日本");
    assert_prefix("日+", "日日本", "日日");
}

#[test]
fn test_concatenated_patterns_compose() {
    // Matching p1 then p2 on the remainder covers the same prefix as the
    // concatenated pattern, absent alternation spanning the boundary.
    let cases = [("a+", "b?", "aab"), ("[0-9]{2}", "x*", "12xxy")];
    for (p1, p2, input) in cases {
        let first = prefix(p1, input).unwrap();
        let second = prefix(p2, &input[first.len()..]).unwrap();
        let combined = prefix(&format!("{}{}", p1, p2), input).unwrap();
        assert_eq!(combined.len(), first.len() + second.len());
    }
}

#[test]
fn test_deterministic() {
    let re = Regex::new("(a|b)+c{2,3}").unwrap();
    let first = re.matching_prefix("abbacccx");
    for _ in 0..10 {
        assert_eq!(re.matching_prefix("abbacccx"), first);
    }
    let again = Regex::new("(a|b)+c{2,3}").unwrap();
    assert_eq!(again.matching_prefix("abbacccx"), first);
}

#[test]
fn test_shared_between_threads() {
    let re = Regex::new("(ab)*").unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(re.matching_prefix("ababX"), Some("abab"));
            });
        }
    });
}

#[test]
fn test_prefix_len() {
    let re = Regex::new("ab*").unwrap();
    assert_eq!(re.matching_prefix_len("abbbc"), Some(4));
    assert_eq!(re.matching_prefix_len("xa"), None);
}
