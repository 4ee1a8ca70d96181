//! Code-length assignment and length limiting.
//!
//! Converts raw tree depths into a set of canonical-ready code lengths: no
//! length exceeds [`crate::L_MAX`], and the set as a whole satisfies
//! Kraft's inequality `Σ 2^(−ℓ) ≤ 1`.

use crate::{SymbolRecord, L_MAX, SYM_NUM};
use fg2019_core::error::Result;

/// Build length-limited, canonical-ready symbol records from a frequency
/// vector.
///
/// Runs the tree builder, extracts depths, then applies the three-pass
/// length-limiting heuristic (cap / inflate / deflate). The returned
/// records are sorted by `(code_length, symbol)`, ready for
/// [`crate::canonical::assign_code_values`]; `code_value` is left at 0.
pub fn build_lengths(freqs: &[u64; SYM_NUM]) -> Result<Vec<SymbolRecord>> {
    let (arena, root) = crate::tree::build_tree(freqs)?;

    let mut lengths = [0u8; SYM_NUM];
    crate::tree::assign_depths(&arena, root, &mut lengths);
    drop(arena);

    // A live symbol with depth 0 only happens when it is the sole symbol in
    // the tree (a one-node tree has no edges to descend).
    for (symbol, &freq) in freqs.iter().enumerate() {
        if freq > 0 && lengths[symbol] == 0 {
            lengths[symbol] = 1;
        }
    }

    // `limit_lengths` must walk symbols in order of increasing code length,
    // exactly as `original_source/src/codes.c` requires of its input
    // (`qsort(symbols, SYM_NUM, sizeof(symbolT), lenComp)` runs before
    // `limitCodeLens`). Ties break on symbol value for a deterministic,
    // reproducible pass order.
    let mut sorted: Vec<(u16, u8)> = (0..SYM_NUM)
        .map(|symbol| (symbol as u16, lengths[symbol]))
        .collect();
    sorted.sort_by_key(|&(symbol, len)| (len, symbol));

    limit_lengths(&mut sorted);

    // Lengths changed during limiting, so the length-only order above is
    // stale; re-sort by `(length, symbol)` before handing records on to
    // canonical code assignment, matching the original's second
    // `qsort(..., lenThenLexComp)` call between `limitCodeLens` and
    // `computeCodeVals`.
    let mut records: Vec<SymbolRecord> = sorted
        .into_iter()
        .map(|(symbol, code_length)| SymbolRecord { symbol, code_length, code_value: 0 })
        .collect();
    records.sort_by_key(|r| (r.code_length, r.symbol));

    Ok(records)
}

/// Apply the cap / inflate / deflate heuristic in place.
///
/// `sorted` must be sorted by increasing code length on entry (ties broken
/// by symbol); the inflate and deflate passes below walk it by *position*,
/// not by symbol value, and each position is revisited with a `while` loop
/// until it stops qualifying — both match `spec.md` §4.C and
/// `original_source/src/codes.c`'s `limitCodeLens`, which assumes the same
/// pre-sorted input and loops with `while`, not a single conditional, at
/// each array slot.
fn limit_lengths(sorted: &mut [(u16, u8)]) {
    for (_, len) in sorted.iter_mut() {
        if *len > L_MAX {
            *len = L_MAX;
        }
    }

    let mut kraft = kraft_sum(sorted);

    // Inflate from the tail of the length-sorted list: walk in decreasing
    // array position, lengthening a code as many times as it takes to help
    // bring an over-full Kraft sum back down to 1 before moving on.
    for pos in (0..sorted.len()).rev() {
        while sorted[pos].1 != 0 && sorted[pos].1 < L_MAX && kraft > 1.0 {
            sorted[pos].1 += 1;
            kraft -= kraft_term(sorted[pos].1);
        }
    }

    // Deflate from the head of the length-sorted list: walk in increasing
    // array position, shortening a code as many times as the Kraft sum has
    // slack for before moving on.
    for pos in 0..sorted.len() {
        while sorted[pos].1 != 0 && kraft + kraft_term(sorted[pos].1) <= 1.0 {
            kraft += kraft_term(sorted[pos].1);
            sorted[pos].1 -= 1;
        }
    }
}

fn kraft_term(len: u8) -> f64 {
    2f64.powi(-(len as i32))
}

fn kraft_sum(pairs: &[(u16, u8)]) -> f64 {
    pairs.iter().filter(|&&(_, l)| l > 0).map(|&(_, l)| kraft_term(l)).sum()
}
