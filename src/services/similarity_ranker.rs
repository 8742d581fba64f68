use crate::structs::closed_issue_ref::ClosedIssueRef;
use crate::structs::similar_issue::SimilarIssue;

/// Minimum ratio a candidate must exceed to be considered similar.
const SIMILARITY_CUTOFF: f64 = 0.5;

/// Ratcliff/Obershelp similarity over the characters of two strings:
/// find the longest common contiguous block, recurse on the pieces to the
/// left and right of it, then `2 * matched / (len_a + len_b)`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    (2.0 * matched as f64) / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..start_a], &b[..start_b])
        + matching_chars(&a[start_a + len..], &b[start_b + len..])
}

fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    if a.is_empty() || b.is_empty() {
        return (0, 0, 0);
    }
    let mut best = (0, 0, 0);
    // lengths of common suffixes ending at (i, j), one row at a time
    let mut prev = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let len = prev[j] + 1;
                row[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = row;
    }
    best
}

/// Rank candidate issues by title similarity to `target_title`. Candidates
/// at or below the cutoff are discarded; the rest are sorted descending
/// (stable, so input order breaks ties) and truncated to `limit`.
pub fn rank_similar(
    target_title: &str,
    candidates: &[ClosedIssueRef],
    limit: usize,
) -> Vec<SimilarIssue> {
    let mut ranked: Vec<SimilarIssue> = candidates
        .iter()
        .map(|c| SimilarIssue {
            number: c.number,
            title: c.title.clone(),
            score: similarity_ratio(target_title, &c.title),
        })
        .filter(|s| s.score > SIMILARITY_CUTOFF)
        .collect();
    ranked.sort_by(|x, y| y.score.partial_cmp(&x.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(limit);
    ranked
}
