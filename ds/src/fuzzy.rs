//! Approximate substring matching
//!
//! Sellers' variant of the Levenshtein dynamic program: the pattern may begin
//! at any text position for free, so the last row of each column holds the
//! edit distance of the best pattern occurrence ending at that position. Each
//! cell also carries the text position its alignment started at, which gives
//! the span without a traceback. Memory is two columns of `pattern.len() + 1`.

use std::cmp::Reverse;
use std::collections::BTreeMap;

/// An approximate occurrence of the pattern in the text (char offsets, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub start: usize,
    pub end: usize,
    pub distance: usize,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: usize,
    start: usize,
}

/// Find every non-overlapping occurrence of `pattern` in `text` within `max_distance` edits
///
/// Overlapping candidates are resolved greedily: lowest distance first, then
/// earliest start, then longest span. The result is ordered by start.
pub fn find_matches(pattern: &[char], text: &[char], max_distance: usize) -> Vec<FuzzyMatch> {
    let m = pattern.len();
    if m == 0 || text.is_empty() || max_distance >= m {
        return Vec::new();
    }

    let mut column: Vec<Cell> = (0..=m).map(|i| Cell { cost: i, start: 0 }).collect();
    let mut next = column.clone();
    let mut candidates = Vec::new();

    for (j, &t) in text.iter().enumerate() {
        next[0] = Cell { cost: 0, start: j + 1 };
        for i in 1..=m {
            let substitution = Cell {
                cost: column[i - 1].cost + usize::from(pattern[i - 1] != t),
                start: column[i - 1].start,
            };
            // text char left unmatched
            let insertion = Cell {
                cost: column[i].cost + 1,
                start: column[i].start,
            };
            // pattern char left unmatched
            let deletion = Cell {
                cost: next[i - 1].cost + 1,
                start: next[i - 1].start,
            };

            let mut best = substitution;
            for cell in [insertion, deletion] {
                if cell.cost < best.cost {
                    best = cell;
                }
            }
            next[i] = best;
        }
        std::mem::swap(&mut column, &mut next);

        let end = j + 1;
        let cell = column[m];
        if cell.cost <= max_distance && cell.start < end {
            candidates.push(FuzzyMatch {
                start: cell.start,
                end,
                distance: cell.cost,
            });
        }
    }

    select_non_overlapping(candidates)
}

fn select_non_overlapping(mut candidates: Vec<FuzzyMatch>) -> Vec<FuzzyMatch> {
    candidates.sort_by_key(|c| (c.distance, c.start, Reverse(c.end)));

    // keyed by start; accepted spans never overlap, so only the nearest
    // span starting before a candidate's end can collide with it
    let mut accepted: BTreeMap<usize, FuzzyMatch> = BTreeMap::new();
    for candidate in candidates {
        let overlaps = accepted
            .range(..candidate.end)
            .next_back()
            .is_some_and(|(_, prev)| prev.end > candidate.start);
        if !overlaps {
            accepted.insert(candidate.start, candidate);
        }
    }

    accepted.into_values().collect()
}
