use std::cmp::Ordering;
use std::mem;
use std::ops::Range;
use std::ptr;

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::sequence::Sequence;
use crate::sorter::{contiguous_or_mismatch, SortAlgorithm};
use crate::sorters::insertion::insertion_sort;

/// Top-down merge sort with an insertion-sorted base case and a half-size
/// scratch buffer. Always stable; the usual substitute when an unstable
/// strategy has to be made stable by replacement rather than wrapping.
#[derive(Copy, Clone, Debug, Default)]
pub struct MergeSorter;

impl MergeSorter {
    pub const fn new() -> Self {
        MergeSorter
    }
}

impl SortAlgorithm for MergeSorter {
    type Output = ();

    const REQUIRES: Capability = Capability::Contiguous;
    const STABILITY: Stability = Stability::Always;

    fn name() -> String {
        "merge".into()
    }

    fn run<Q, C>(&self, seq: &mut Q, range: Range<usize>, mut compare: C) -> Result<(), SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        let slice = contiguous_or_mismatch(seq, Self::name)?;
        merge_sort(&mut slice[range], &mut compare)
    }
}

/// Runs at or below this length are insertion sorted.
const INSERTION_RUN: usize = 20;

fn merge_sort<T, C>(v: &mut [T], compare: &mut C) -> Result<(), SortError>
where
    C: FnMut(&T, &T) -> Ordering,
{
    if v.len() < 2 {
        return Ok(());
    }
    // ZSTs carry no data to buffer, and the pointer arithmetic below is
    // meaningless for them.
    if mem::size_of::<T>() == 0 || v.len() <= INSERTION_RUN {
        insertion_sort(v, compare);
        return Ok(());
    }

    let scratch_len = v.len() / 2;
    let mut scratch: Vec<T> = Vec::new();
    scratch
        .try_reserve_exact(scratch_len)
        .map_err(|_| SortError::allocation_failed(scratch_len))?;
    sort_halves(v, scratch.as_mut_ptr(), compare);
    Ok(())
}

fn sort_halves<T, C>(v: &mut [T], buf: *mut T, compare: &mut C)
where
    C: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len <= INSERTION_RUN {
        insertion_sort(v, compare);
        return;
    }
    let mid = len / 2;
    sort_halves(&mut v[..mid], buf, compare);
    sort_halves(&mut v[mid..], buf, compare);
    if compare(&v[mid], &v[mid - 1]) == Ordering::Less {
        // SAFETY: `buf` was reserved for `total_len / 2` elements and the
        // shorter of the two runs never exceeds half of the current
        // sub-slice, which is at most `total_len`.
        unsafe { merge(v, mid, buf, compare) };
    }
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]` using `buf` as
/// temporary storage for the shorter run.
///
/// # Safety
///
/// `buf` must be valid for writes of `min(mid, v.len() - mid)` elements,
/// and `0 < mid < v.len()`.
unsafe fn merge<T, C>(v: &mut [T], mid: usize, buf: *mut T, compare: &mut C)
where
    C: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    let v = v.as_mut_ptr();
    // SAFETY: mid and len are in bounds per the caller contract.
    let (v_mid, v_end) = unsafe { (v.add(mid), v.add(len)) };

    // The buffered run is a "hole" in `v`. The drop impl fills the hole
    // with the unmerged remainder, which also makes a comparator panic
    // leave `v` holding each original element exactly once.
    let mut hole;

    if mid <= len - mid {
        // The left run is shorter. Merge forwards, taking the smaller
        // element first; ties go left to keep the merge stable.
        // SAFETY: `buf` has room for `mid` elements.
        unsafe {
            ptr::copy_nonoverlapping(v, buf, mid);
            hole = MergeHole {
                start: buf,
                end: buf.add(mid),
                dest: v,
            };
        }
        let mut right = v_mid;
        while hole.start < hole.end && right < v_end {
            // SAFETY: both cursors point at live elements and `dest`
            // never overtakes `right`.
            unsafe {
                let to_copy = if compare(&*right, &*hole.start) == Ordering::Less {
                    get_and_increment(&mut right)
                } else {
                    get_and_increment(&mut hole.start)
                };
                ptr::copy_nonoverlapping(to_copy, get_and_increment(&mut hole.dest), 1);
            }
        }
    } else {
        // The right run is shorter. Merge backwards, taking the larger
        // element first; ties go right, which again keeps equal elements
        // in their original relative order. `hole.dest` doubles as the
        // left cursor so the drop impl lands the remainder correctly.
        // SAFETY: `buf` has room for `len - mid` elements.
        unsafe {
            ptr::copy_nonoverlapping(v_mid, buf, len - mid);
            hole = MergeHole {
                start: buf,
                end: buf.add(len - mid),
                dest: v_mid,
            };
        }
        let mut out = v_end;
        while v < hole.dest && buf < hole.end {
            // SAFETY: both runs are non-empty here, so `out` stays
            // strictly above `dest` and every read is of a live element.
            unsafe {
                let to_copy = if compare(&*hole.end.sub(1), &*hole.dest.sub(1)) == Ordering::Less {
                    decrement_and_get(&mut hole.dest)
                } else {
                    decrement_and_get(&mut hole.end)
                };
                ptr::copy_nonoverlapping(to_copy, decrement_and_get(&mut out), 1);
            }
        }
    }
    // `hole` is dropped here, copying the rest of the buffered run back.
}

unsafe fn get_and_increment<T>(ptr: &mut *mut T) -> *mut T {
    let old = *ptr;
    // SAFETY: the caller keeps the cursor inside its run.
    *ptr = unsafe { old.add(1) };
    old
}

unsafe fn decrement_and_get<T>(ptr: &mut *mut T) -> *mut T {
    // SAFETY: the caller keeps the cursor inside its run.
    *ptr = unsafe { ptr.sub(1) };
    *ptr
}

struct MergeHole<T> {
    start: *mut T,
    end: *mut T,
    dest: *mut T,
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // SAFETY: `start..end` is the still-buffered remainder and `dest`
        // is the gap in `v` it belongs in; the two never overlap.
        unsafe {
            let remaining = self.end.offset_from(self.start) as usize;
            ptr::copy_nonoverlapping(self.start, self.dest, remaining);
        }
    }
}
