//! Gestalt pattern matching (Ratcliff/Obershelp) over character sequences.
//!
//! Finds the longest contiguous matching block, then repeats on the unmatched
//! left and right remainders. `ratio = 2 * M / T` where `M` is the total size of
//! all matching blocks and `T` the combined length of both sequences.
//!
//! When the second sequence has at least 200 elements, characters that make up
//! more than 1% of it are "popular": they are left out of the lookup index so
//! they never seed a match, but a match may still extend across them.

use std::collections::{HashMap, HashSet};

const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// For every indexed char of `b`, its positions in ascending order.
    b2j: HashMap<char, Vec<usize>>,
    popular: HashSet<char>,
}

impl SequenceMatcher {
    /// Creates a matcher with the popular-element heuristic enabled.
    pub fn new(a: &str, b: &str) -> Self {
        Self::with_autojunk(a, b, true)
    }

    pub fn with_autojunk(a: &str, b: &str, autojunk: bool) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        let mut popular = HashSet::new();
        if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            b2j.retain(|&c, positions| {
                if positions.len() > threshold {
                    popular.insert(c);
                    false
                } else {
                    true
                }
            });
        }

        Self { a, b, b2j, popular }
    }

    /// Characters excluded from the index by the popularity heuristic.
    pub fn popular(&self) -> &HashSet<char> {
        &self.popular
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks the one starting earliest in `a` wins, and of
    /// those the one starting earliest in `b`. Returns a zero-sized match at
    /// `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // j2len[j] = length of the longest match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            next_j2len.clear();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            std::mem::swap(&mut j2len, &mut next_j2len);
        }

        // Grow the block over equal neighbours, popular chars included.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    /// All matching blocks, ordered by position, adjacent blocks merged.
    /// The last element is always the zero-sized sentinel `(len(a), len(b), 0)`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut pending = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                pending.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                pending.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        blocks.sort_unstable();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match {
            a: la,
            b: lb,
            size: 0,
        });
        merged
    }

    /// Similarity in `[0.0, 1.0]`. Two empty sequences are identical (`1.0`).
    pub fn ratio(&self) -> f64 {
        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * matched as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences() {
        assert_eq!(SequenceMatcher::new("rust engineer", "rust engineer").ratio(), 1.0);
    }

    #[test]
    fn test_both_empty_is_one() {
        assert_eq!(SequenceMatcher::new("", "").ratio(), 1.0);
    }

    #[test]
    fn test_one_empty_is_zero() {
        assert_eq!(SequenceMatcher::new("", "abc").ratio(), 0.0);
        assert_eq!(SequenceMatcher::new("abc", "").ratio(), 0.0);
    }

    #[test]
    fn test_disjoint_sequences() {
        assert_eq!(SequenceMatcher::new("abc", "xyz").ratio(), 0.0);
    }

    #[test]
    fn test_rotation() {
        // "bcd" matches, leaving "a" vs "" and "" vs "a".
        assert!((SequenceMatcher::new("abcd", "bcda").ratio() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_kitten_sitting() {
        // Blocks "itt" and "n": 2 * 4 / 13
        let ratio = SequenceMatcher::new("kitten", "sitting").ratio();
        assert!((ratio - 8.0 / 13.0).abs() < 1e-12, "ratio was {ratio}");
    }

    #[test]
    fn test_find_longest_match_prefers_earliest_in_a() {
        let m = SequenceMatcher::new(" abcd", "abcd abcd").find_longest_match(0, 5, 0, 9);
        assert_eq!(m, Match { a: 0, b: 4, size: 5 });
    }

    #[test]
    fn test_find_longest_match_none() {
        let m = SequenceMatcher::new("abc", "xyz").find_longest_match(0, 3, 0, 3);
        assert_eq!(m, Match { a: 0, b: 0, size: 0 });
    }

    #[test]
    fn test_matching_blocks_merged_and_terminated() {
        let blocks = SequenceMatcher::new("abxcd", "abcd").matching_blocks();
        assert_eq!(
            blocks,
            vec![
                Match { a: 0, b: 0, size: 2 },
                Match { a: 3, b: 2, size: 2 },
                Match { a: 5, b: 4, size: 0 },
            ]
        );
    }

    #[test]
    fn test_short_sequences_have_no_popular_chars() {
        let matcher = SequenceMatcher::new("aaaa", "aaaaaaaaaa");
        assert!(matcher.popular().is_empty());
    }

    #[test]
    fn test_popular_chars_in_long_sequence() {
        let b = format!("{}ab", "x".repeat(198));
        let matcher = SequenceMatcher::new("zx", &b);
        assert!(matcher.popular().contains(&'x'));
        assert!(!matcher.popular().contains(&'a'));
        // 'x' can no longer seed a match.
        assert_eq!(matcher.ratio(), 0.0);
    }

    #[test]
    fn test_autojunk_disabled_keeps_index() {
        let b = "x".repeat(250);
        let matcher = SequenceMatcher::with_autojunk("x", &b, false);
        assert!(matcher.popular().is_empty());
        assert!(matcher.ratio() > 0.0);
    }

    #[test]
    fn test_match_extends_across_popular_chars() {
        let b = format!("{}{}", "ab ".repeat(100), "zq");
        let a = "zq";
        let matcher = SequenceMatcher::new(a, &b);
        assert!(matcher.popular().contains(&' '));
        let m = matcher.find_longest_match(0, 2, 0, b.chars().count());
        assert_eq!(m.size, 2);
    }

    #[test]
    fn test_multibyte_chars_counted_once() {
        let ratio = SequenceMatcher::new("café", "cafe").ratio();
        assert!((ratio - 0.75).abs() < 1e-12);
    }
}
