//! Case-insensitive wildcard matching of field names.
//!
//! `*` matches any run of characters (including none) and `?` exactly one.

use std::collections::BTreeSet;

/// Whether `pattern` contains a wildcard.
pub fn is_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Whether `candidate` matches `pattern`, ignoring case.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    let p: Vec<char> = pattern.chars().flat_map(char::to_lowercase).collect();
    let c: Vec<char> = candidate.chars().flat_map(char::to_lowercase).collect();

    // Greedy scan, backtracking to the most recent `*`.
    let (mut pi, mut ci) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while ci < c.len() {
        match p.get(pi) {
            Some('*') => {
                star = Some((pi, ci));
                pi += 1;
            }
            Some(&pc) if pc == '?' || pc == c[ci] => {
                pi += 1;
                ci += 1;
            }
            _ => match star {
                Some((sp, sc)) => {
                    pi = sp + 1;
                    ci = sc + 1;
                    star = Some((sp, sc + 1));
                }
                None => return false,
            },
        }
    }
    p[pi..].iter().all(|&ch| ch == '*')
}

/// Whether any of `names` matches `pattern`.
pub fn matches_any<I, S>(pattern: &str, names: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().any(|n| matches(pattern, n.as_ref()))
}

/// Names selected by `pattern`.
///
/// A pattern without wildcards selects the identical name only, case included.
pub fn select<I, S>(pattern: &str, names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let wildcard = is_pattern(pattern);
    names
        .into_iter()
        .filter(|n| {
            if wildcard {
                matches(pattern, n.as_ref())
            } else {
                n.as_ref() == pattern
            }
        })
        .map(|n| n.as_ref().to_owned())
        .collect()
}

/// Union of [`select`] over every pattern.
pub fn select_all<P, I, S>(patterns: P, names: I) -> BTreeSet<String>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .flat_map(|p| select(p.as_ref(), names.clone()))
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/matcher.rs"]
mod tests;
