use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    #[error("Candidate count must be greater than zero")]
    ZeroCandidates,
    #[error("Cutoff must be within [0.0, 1.0], got {0}")]
    Cutoff(f64),
}

/// Sequences at least this long have their over-represented characters
/// excluded from seeding matches.
const POPULAR_MIN_LEN: usize = 200;

/// Ratcliff/Obershelp block matcher over two char sequences.
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Longest common block inside `a[alo..ahi]` and `b[blo..bhi]`,
    /// as `(i, j, size)`. Ties resolve to the earliest `i`, then earliest `j`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
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
                        .and_then(|prev| run_ending_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            run_ending_at = next;
        }

        // Popular characters never seed a block but still extend one.
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

        (best_i, best_j, best_size)
    }

    /// Total size of all matching blocks.
    fn matched_len(&self) -> usize {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut total = 0;

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

/// Similarity in `[0.0, 1.0]`: twice the matched characters over the combined length.
/// Two empty strings are identical (1.0).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = BlockMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Up to `n` possibilities scoring at least `cutoff` against `word`, best first.
/// Equal scores order by the possibility itself, descending.
pub fn close_matches<'a, I>(
    word: &str,
    possibilities: I,
    n: usize,
    cutoff: f64,
) -> Result<Vec<&'a str>, SimilarityError>
where
    I: IntoIterator<Item = &'a str>,
{
    if n == 0 {
        return Err(SimilarityError::ZeroCandidates);
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(SimilarityError::Cutoff(cutoff));
    }

    let mut scored: Vec<(f64, &'a str)> = possibilities
        .into_iter()
        .map(|candidate| (ratio(candidate, word), candidate))
        .filter(|(score, _)| *score >= cutoff)
        .collect();

    scored.sort_by(|x, y| y.0.total_cmp(&x.0).then_with(|| y.1.cmp(x.1)));
    scored.truncate(n);

    Ok(scored.into_iter().map(|(_, candidate)| candidate).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(ratio("three", "three"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn empty_against_nonempty_scores_zero() {
        assert_eq!(ratio("", "abc"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn overlapping_block() {
        assert_eq!(ratio("abcd", "bcde"), 0.75);
    }

    #[test]
    fn blocks_on_both_sides_are_counted() {
        // "on" + "e" match around the inserted "x".
        assert_eq!(ratio("one", "onxe"), 6.0 / 7.0);
    }

    #[test]
    fn single_typo_clears_default_cutoff() {
        assert!(ratio("one", "onr") >= 0.6);
        assert_eq!(ratio("one", "onr"), 4.0 / 6.0);
    }

    #[test]
    fn popular_characters_do_not_seed_long_sequences() {
        // 'a' fills most of `b`, so only the trailing 'b' can seed a block.
        let b = format!("c{}xb", "a".repeat(197));
        assert_eq!(b.chars().count(), 200);
        assert_eq!(ratio("aab", &b), 2.0 / 203.0);
    }

    #[test]
    fn close_matches_orders_best_first() {
        let found = close_matches("appel", ["ape", "apple", "peach", "puppy"], 3, 0.6).unwrap();
        assert_eq!(found, vec!["apple", "ape"]);
    }

    #[test]
    fn close_matches_respects_limit() {
        let found = close_matches("appel", ["ape", "apple", "peach", "puppy"], 1, 0.6).unwrap();
        assert_eq!(found, vec!["apple"]);
    }

    #[test]
    fn close_matches_tie_prefers_larger_candidate() {
        // "o" scores 2/3 against both "on" and "no".
        let found = close_matches("o", ["no", "on"], 2, 0.6).unwrap();
        assert_eq!(found, vec!["on", "no"]);
    }

    #[test]
    fn close_matches_below_cutoff_is_empty() {
        let found = close_matches("xyzzy", ["one", "two"], 1, 0.6).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn close_matches_rejects_bad_arguments() {
        assert_eq!(
            close_matches("a", ["a"], 0, 0.6),
            Err(SimilarityError::ZeroCandidates)
        );
        assert_eq!(
            close_matches("a", ["a"], 1, 1.5),
            Err(SimilarityError::Cutoff(1.5))
        );
    }
}
