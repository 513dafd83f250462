//! Sequential matcher over an ordered list of anchored patterns.
//!
//! At every offset the patterns are tried in declaration order and the first
//! one that matches wins, even when a later pattern would match a longer
//! stretch of input. Zero-length matches never count, since they would stall
//! the scan.

use regex::Regex;

use crate::error::RuleError;

/// A rule pattern compiled for anchored matching.
#[derive(Debug, Clone)]
pub(crate) struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub(crate) fn new(name: &str, pattern: &str) -> Result<Self, RuleError> {
        let regex =
            Regex::new(&format!(r"\A(?:{pattern})")).map_err(|source| RuleError::InvalidPattern {
                name: name.to_string(),
                source,
            })?;
        Ok(Self { regex })
    }

    /// Length of the match at the start of `tail`, if any.
    fn match_len(&self, tail: &str) -> Option<usize> {
        self.regex
            .find(tail)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

/// One match produced by the [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawMatch {
    /// Index of the winning rule.
    pub rule: usize,
    /// Absolute byte offset of the first matched byte.
    pub start: usize,
    /// Absolute byte offset one past the last matched byte.
    pub end: usize,
}

/// Yields successive non-overlapping matches over `input`.
pub(crate) struct Scanner<'m, 's> {
    matchers: &'m [Matcher],
    input: &'s str,
    pos: usize,
    current: Option<usize>,
}

impl<'m, 's> Scanner<'m, 's> {
    pub(crate) fn new(matchers: &'m [Matcher], input: &'s str) -> Self {
        Self {
            matchers,
            input,
            pos: 0,
            current: None,
        }
    }

    /// Advances past the next match. Returns `None` at the end of input or
    /// when no rule matches at the current offset.
    pub(crate) fn next_match(&mut self) -> Option<RawMatch> {
        if self.pos >= self.input.len() {
            self.current = None;
            return None;
        }
        let tail = &self.input[self.pos..];
        let Some((rule, len)) = self
            .matchers
            .iter()
            .enumerate()
            .find_map(|(i, m)| m.match_len(tail).map(|len| (i, len)))
        else {
            self.current = None;
            return None;
        };

        let start = self.pos;
        self.pos += len;
        self.current = Some(start);
        Some(RawMatch {
            rule,
            start,
            end: self.pos,
        })
    }

    /// Offset the scan has reached.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once the whole input has been consumed.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Start offset of the match most recently returned, while it is being
    /// processed.
    pub(crate) fn current_start(&self) -> Option<usize> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchers(patterns: &[&str]) -> Vec<Matcher> {
        patterns
            .iter()
            .enumerate()
            .map(|(i, p)| Matcher::new(&format!("r{i}"), p).unwrap())
            .collect()
    }

    fn collect(matchers: &[Matcher], input: &str) -> (Vec<RawMatch>, usize, bool) {
        let mut scanner = Scanner::new(matchers, input);
        let mut out = Vec::new();
        while let Some(m) = scanner.next_match() {
            assert_eq!(scanner.current_start(), Some(m.start));
            out.push(m);
        }
        (out, scanner.position(), scanner.is_exhausted())
    }

    #[test]
    fn first_declared_rule_wins_over_longer_match() {
        let m = matchers(&["a", "ab", "b"]);
        let (found, pos, done) = collect(&m, "ab");
        assert_eq!(
            found,
            vec![
                RawMatch { rule: 0, start: 0, end: 1 },
                RawMatch { rule: 2, start: 1, end: 2 },
            ]
        );
        assert_eq!(pos, 2);
        assert!(done);
    }

    #[test]
    fn stops_at_unrecognized_input() {
        let m = matchers(&["[0-9]+", " +"]);
        let (found, pos, done) = collect(&m, "12 34x5");
        assert_eq!(found.len(), 3);
        assert_eq!(pos, 5);
        assert!(!done);
    }

    #[test]
    fn zero_length_matches_are_skipped() {
        let m = matchers(&["x*", "y"]);
        let (found, _, done) = collect(&m, "yxx");
        assert_eq!(
            found,
            vec![
                RawMatch { rule: 1, start: 0, end: 1 },
                RawMatch { rule: 0, start: 1, end: 3 },
            ]
        );
        assert!(done);
    }

    #[test]
    fn patterns_are_anchored_at_the_current_offset() {
        let m = matchers(&["b"]);
        let (found, pos, done) = collect(&m, "ab");
        assert!(found.is_empty());
        assert_eq!(pos, 0);
        assert!(!done);
    }

    #[test]
    fn alternations_inside_a_rule_stay_grouped() {
        let m = matchers(&["a|b", "c"]);
        let (found, _, done) = collect(&m, "bca");
        assert_eq!(found.iter().map(|m| m.rule).collect::<Vec<_>>(), [0, 1, 0]);
        assert!(done);
    }

    #[test]
    fn invalid_pattern_names_the_rule() {
        let err = Matcher::new("broken", "(").unwrap_err();
        assert!(err.to_string().contains("`broken`"));
    }
}
