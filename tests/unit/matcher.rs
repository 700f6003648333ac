use super::*;

#[test]
fn literal_match_ignores_case() {
    assert!(matches("Signature1", "signature1"));
    assert!(!matches("Signature1", "Signature12"));
    assert!(matches("", ""));
    assert!(!matches("", "x"));
}

#[test]
fn star_matches_any_run() {
    assert!(matches("sig*", "Signature"));
    assert!(matches("*ture", "Signature"));
    assert!(matches("s*n*e", "Signature"));
    assert!(matches("*", ""));
    assert!(matches("**", "abc"));
    assert!(!matches("sig*x", "Signature"));
}

#[test]
fn question_mark_matches_exactly_one() {
    assert!(matches("field?", "Field7"));
    assert!(!matches("field?", "Field"));
    assert!(!matches("field?", "Field77"));
    assert!(matches("?", "a"));
    assert!(matches("a?c*", "abcdef"));
}

#[test]
fn backtracking_finds_later_alignment() {
    assert!(matches("*ab", "aaab"));
    assert!(matches("*a*b", "xaxxb"));
    assert!(!matches("*a*b", "xaxxc"));
}

#[test]
fn select_uses_exact_match_for_literals() {
    let names = ["Sig1", "sig1", "Sig2", "Date"];
    assert_eq!(
        select("Sig1", names),
        BTreeSet::from(["Sig1".to_string()])
    );
    assert_eq!(select("sig?", names).len(), 3);
    assert!(select("nothing", names).is_empty());
}

#[test]
fn select_all_is_a_union() {
    let names = vec!["Sig1", "Sig2", "Date", "Trace"];
    let got = select_all(["sig*", "date"], names.iter());
    assert_eq!(
        got,
        BTreeSet::from(["Sig1".to_string(), "Sig2".to_string()])
    );
    let got = select_all(["sig*", "Date"], names.iter());
    assert_eq!(got.len(), 3);
}

#[test]
fn matches_any_short_circuits() {
    assert!(matches_any("d*", ["Sig", "Date"]));
    assert!(!matches_any("x*", ["Sig", "Date"]));
    assert!(is_pattern("a*"));
    assert!(!is_pattern("abc"));
}
