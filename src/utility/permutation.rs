//! Permutation application by in-place cycle-following.
//!
//! The convention throughout the crate is "final position -> source
//! position": `perm[i]` names the index the element ending up at `i`
//! comes from.

use std::ptr;

/// Whether `perm` maps `0..perm.len()` onto itself bijectively.
pub fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    perm.iter()
        .all(|&p| p < seen.len() && !std::mem::replace(&mut seen[p], true))
}

/// Inverse of `perm`, so that `invert_permutation(&p)[p[i]] == i`.
///
/// # Panics
///
/// Panics if `perm` is not a permutation.
pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    assert!(
        is_permutation(perm),
        "invert_permutation requires a bijection on 0..len"
    );
    let mut inverse = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

/// Number of element moves [`apply_permutation`] will perform for `perm`:
/// a cycle of length `L` costs `L + 1` moves (one into the temporary,
/// `L - 1` direct, one back out), and identity positions cost nothing.
pub fn count_moves(perm: &[usize]) -> u64 {
    let mut visited = vec![false; perm.len()];
    let mut moves = 0u64;
    for start in 0..perm.len() {
        if visited[start] || perm[start] == start {
            continue;
        }
        let mut cycle_len = 0u64;
        let mut cur = start;
        while !visited[cur] {
            visited[cur] = true;
            cycle_len += 1;
            cur = perm[cur];
        }
        moves += cycle_len + 1;
    }
    moves
}

/// Commits `perm` onto `v`, moving each element directly into its final
/// slot by cycle-following: exactly one data move per displaced element,
/// no element-sized scratch. `perm` is consumed and left as the identity.
///
/// # Panics
///
/// Panics if `perm` and `v` differ in length or `perm` is not a
/// bijection on `0..v.len()`. Supplying external indices is a programmer
/// error the boundary check turns into a panic rather than corruption.
pub fn apply_permutation<T>(v: &mut [T], perm: &mut [usize]) {
    assert_eq!(
        v.len(),
        perm.len(),
        "permutation length must match the sequence length"
    );
    assert!(
        is_permutation(perm),
        "apply_permutation requires a bijection on 0..len"
    );

    let base = v.as_mut_ptr();
    for start in 0..perm.len() {
        if perm[start] == start {
            continue;
        }
        // SAFETY: `perm` is a bijection (checked above), so every index is
        // in bounds and each cycle visits each of its positions exactly
        // once. `tmp` plugs the hole opened at `start` until the cycle
        // closes, so every element of `v` is owned exactly once at all
        // times and no drop runs in between.
        unsafe {
            let tmp = ptr::read(base.add(start));
            let mut cur = start;
            loop {
                let next = perm[cur];
                perm[cur] = cur;
                if next == start {
                    ptr::write(base.add(cur), tmp);
                    break;
                }
                ptr::copy_nonoverlapping(base.add(next), base.add(cur), 1);
                cur = next;
            }
        }
    }
}
