//! Shared correctness suite, driven through the [`Sort`] facade.
//!
//! Every test sorts pattern inputs and checks the outcome against the
//! standard library sort. The process-wide seed is printed once per test
//! binary before the first check, so a crashing run still shows how to
//! reproduce it with `OVERRIDE_SEED`.

use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::patterns;
use crate::Sort;

#[cfg(miri)]
const TEST_SIZES: &[usize] = &[0, 1, 2, 3, 5, 8, 13, 20, 24, 50, 100, 250];

#[cfg(all(not(miri), not(feature = "large_test_sizes")))]
const TEST_SIZES: &[usize] = &[
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 13, 16, 19, 20, 21, 24, 25, 30, 35, 50, 100, 200, 500,
    1_000, 2_048, 5_000, 10_000,
];

#[cfg(all(not(miri), feature = "large_test_sizes"))]
const TEST_SIZES: &[usize] = &[
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 13, 16, 19, 20, 21, 24, 25, 30, 35, 50, 100, 200, 500,
    1_000, 2_048, 5_000, 10_000, 100_000, 1_000_000,
];

fn announce_seed<S: Sort>() -> u64 {
    static ANNOUNCE: Once = Once::new();
    let seed = patterns::random_init_seed();
    ANNOUNCE.call_once(|| {
        // Printed before the first check so a crash still shows it.
        println!(
            "seed: {seed} (pin with OVERRIDE_SEED), sorting with: {}",
            S::name()
        );
    });
    seed
}

fn check_against_std<T: Ord + Clone + Debug, S: Sort>(v: &mut [T]) {
    announce_seed::<S>();

    let original = v.to_vec();
    let mut expected = v.to_vec();
    expected.sort();

    S::sort(v);

    if *v != *expected {
        if v.len() <= 100 {
            eprintln!("input:    {original:?}");
            eprintln!("expected: {expected:?}");
            eprintln!("got:      {v:?}");
        } else {
            let divergence = v.iter().zip(&expected).position(|(a, b)| a != b);
            eprintln!(
                "output diverges from the standard library sort at index {divergence:?}, len {}",
                v.len()
            );
        }
        panic!("sort produced the wrong order");
    }
}

fn for_each_size<T, S, G>(mut generate: G)
where
    T: Ord + Clone + Debug,
    S: Sort,
    G: FnMut(usize) -> Vec<T>,
{
    for &len in TEST_SIZES {
        let mut test_data = generate(len);
        check_against_std::<T, S>(&mut test_data);
    }
}

/// Pattern sweep for the property tests. Sizes below 2 are skipped and
/// the largest sizes are left to the plain pattern tests.
fn for_each_pattern(mut test_fn: impl FnMut(usize, fn(usize) -> Vec<i32>)) {
    let pattern_fns: &[fn(usize) -> Vec<i32>] = &[
        patterns::random,
        |len| patterns::random_uniform(len, 0..=1),
        |len| patterns::random_uniform(len, 0..=(len.max(2) as f64).log2() as i32),
        patterns::ascending,
        patterns::descending,
        |len| patterns::saw_mixed(len, (len / 20).max(2)),
        patterns::pipe_organ,
    ];

    for pattern_fn in pattern_fns {
        for &len in &TEST_SIZES[..TEST_SIZES.len() - 2] {
            if len >= 2 {
                test_fn(len, *pattern_fn);
            }
        }
    }
}

/// A kilobyte per element catches data movement that only works for
/// register-sized values.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OneKiloByte {
    value: i32,
    _padding: [u64; 127],
}

impl OneKiloByte {
    fn new(value: i32) -> Self {
        OneKiloByte {
            value,
            _padding: [0; 127],
        }
    }
}

/// Comparator argument that tallies how often it is handed to the
/// comparator. If a sort compares through a stale copy of an element,
/// the per-element tallies stop adding up.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Tally {
    val: i32,
    seen: Cell<u64>,
}

impl Tally {
    fn new(val: i32) -> Self {
        Tally {
            val,
            seen: Cell::new(0),
        }
    }

    fn bump(&self) {
        self.seen.set(self.seen.get() + 1);
    }
}

/// Key in the high half, arrival tag in the low half. The packed value
/// stays trivially movable and the tag never reaches the comparator.
/// Keys must be non-negative.
fn tag_occurrences(keys: &[i32]) -> Vec<u64> {
    let mut counts: HashMap<i32, u32> = HashMap::new();
    keys.iter()
        .map(|&key| {
            debug_assert!(key >= 0);
            let tag = counts.entry(key).or_default();
            *tag += 1;
            ((key as u64) << 32) | u64::from(*tag)
        })
        .collect()
}

fn packed_key(packed: u64) -> i32 {
    (packed >> 32) as i32
}

/// Comparisons one full run of `S` makes on `v`, observed on a clone.
fn comps_used<T, S, C>(v: &[T], mut compare: C) -> u64
where
    T: Clone,
    S: Sort,
    C: FnMut(&T, &T) -> Ordering,
{
    let mut count = 0;
    let mut clone = v.to_vec();
    S::sort_by(&mut clone, |a, b| {
        count += 1;
        compare(a, b)
    });
    count
}

pub fn basic<S: Sort>() {
    check_against_std::<i32, S>(&mut []);
    check_against_std::<(), S>(&mut []);
    check_against_std::<(), S>(&mut [()]);
    check_against_std::<(), S>(&mut [(), (), ()]);
    check_against_std::<i32, S>(&mut [77]);
    check_against_std::<i32, S>(&mut [2, 1]);
    check_against_std::<i32, S>(&mut [10, 0, 10]);
    check_against_std::<i32, S>(&mut [1, 4, 1, 5, 9, 2, 6]);
    check_against_std::<i32, S>(&mut [-3, i32::MIN, 3, -1, -3, -1, 7]);
}

pub fn fixed_seed<S: Sort>() {
    let initial_seed = patterns::random_init_seed();
    assert_eq!(patterns::random_init_seed(), initial_seed);
}

pub fn random<S: Sort>() {
    for_each_size::<i32, S, _>(patterns::random);
}

pub fn random_type_u64<S: Sort>() {
    for_each_size::<u64, S, _>(|len| {
        patterns::random(len)
            .into_iter()
            // Sign-flip into u64, preserving relative order.
            .map(|val| (val as i64 as u64) ^ (1u64 << 63))
            .collect()
    });
}

pub fn random_boxed_str<S: Sort>() {
    // Heap-owning values catch implementations that assume Copy elements.
    for_each_size::<Box<str>, S, _>(|len| {
        patterns::random(len)
            .into_iter()
            .map(|val| format!("{val:011}").into_boxed_str())
            .collect()
    });
}

pub fn random_large_val<S: Sort>() {
    for_each_size::<OneKiloByte, S, _>(|len| {
        if len > 10_000 {
            // One kilobyte per element gets too slow beyond this.
            return Vec::new();
        }
        patterns::random(len).into_iter().map(OneKiloByte::new).collect()
    });
}

pub fn random_binary<S: Sort>() {
    for_each_size::<i32, S, _>(|len| patterns::random_uniform(len, 0..=1));
}

pub fn random_dense<S: Sort>() {
    // log2(n) distinct values, so runs of equals grow with the input.
    for_each_size::<i32, S, _>(|len| {
        patterns::random_uniform(len, 0..=(len.max(2) as f64).log2() as i32)
    });
}

pub fn random_d20<S: Sort>() {
    for_each_size::<i32, S, _>(|len| patterns::random_uniform(len, 0..20));
}

pub fn random_d1000<S: Sort>() {
    for_each_size::<i32, S, _>(|len| patterns::random_uniform(len, 0..1000));
}

pub fn random_zipf<S: Sort>() {
    for_each_size::<i32, S, _>(|len| {
        if len < 4 {
            return Vec::new();
        }
        patterns::random_zipf(len, 1.0)
    });
}

pub fn random_half_sorted<S: Sort>() {
    for_each_size::<i32, S, _>(|len| patterns::random_sorted(len, 50.0));
}

pub fn random_mostly_sorted<S: Sort>() {
    for_each_size::<i32, S, _>(|len| patterns::random_sorted(len, 95.0));
}

pub fn all_equal<S: Sort>() {
    for_each_size::<i32, S, _>(patterns::all_equal);
}

pub fn ascending<S: Sort>() {
    for_each_size::<i32, S, _>(patterns::ascending);
}

pub fn descending<S: Sort>() {
    for_each_size::<i32, S, _>(patterns::descending);
}

pub fn saw_mixed<S: Sort>() {
    for_each_size::<i32, S, _>(|len| patterns::saw_mixed(len, (len / 25).max(2)));
}

pub fn pipe_organ<S: Sort>() {
    for_each_size::<i32, S, _>(patterns::pipe_organ);
}

pub fn stability<S: Sort>() {
    announce_seed::<S>();
    if S::name().contains("unstable") {
        // The implementation under test opted out of stability.
        return;
    }

    for_each_pattern(|len, pattern_fn| {
        let keys: Vec<i32> = pattern_fn(len)
            .into_iter()
            .map(|val| val.rem_euclid(16))
            .collect();
        let mut test_data = tag_occurrences(&keys);
        S::sort_by(&mut test_data, |a, b| packed_key(*a).cmp(&packed_key(*b)));
        // Equal keys keep arrival order exactly when the packed values
        // ascend as a whole.
        assert!(test_data.windows(2).all(|w| w[0] <= w[1]));
    });
}

pub fn stability_dense<S: Sort>() {
    announce_seed::<S>();
    if S::name().contains("unstable") {
        return;
    }

    // Few distinct keys, and every length around typical small-input
    // cutoffs.
    for len in 2..70 {
        let keys = patterns::random_uniform(len, 0..=9);
        let mut test_data = tag_occurrences(&keys);
        S::sort_by(&mut test_data, |a, b| packed_key(*a).cmp(&packed_key(*b)));
        assert!(test_data.windows(2).all(|w| w[0] <= w[1]));
    }
}

pub fn observable_is_less<S: Sort>() {
    announce_seed::<S>();

    for_each_pattern(|len, pattern_fn| {
        let mut test_input: Vec<Tally> =
            pattern_fn(len).into_iter().map(Tally::new).collect();

        let mut total = 0u64;
        S::sort_by(&mut test_input, |a, b| {
            a.bump();
            b.bump();
            total += 1;
            a.val.cmp(&b.val)
        });

        let per_element: u64 = test_input.iter().map(|t| t.seen.get()).sum();
        assert_eq!(per_element, total * 2);
    });
}

pub fn comp_panic<S: Sort>() {
    let seed = announce_seed::<S>();

    // Elements with a non-trivial destructor, so a leak or double drop
    // caused by the unwinding comparison surfaces under miri.
    for_each_pattern(|len, pattern_fn| {
        let mut test_data: Vec<Vec<i32>> = pattern_fn(len)
            .into_iter()
            .map(|val| vec![val; 3])
            .collect();

        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            S::sort_by(&mut test_data, |a, b| {
                if a[0].unsigned_abs() < (u32::MAX / len as u32) {
                    panic!("comparison panicked, seed: {seed}, len: {len}");
                }
                a[0].cmp(&b[0])
            });
        }));
    });
}

pub fn panic_retain_original_set<S: Sort>() {
    announce_seed::<S>();

    for_each_pattern(|len, pattern_fn| {
        let mut test_data = pattern_fn(len);
        let sum_before: i64 = test_data.iter().map(|&x| i64::from(x)).sum();

        // Panic at a random one of the comparisons the run makes, so
        // repeated runs cover early and late unwinding points alike.
        let total = comps_used::<i32, S, _>(&test_data, i32::cmp);
        let panic_at = patterns::random_uniform(1, 1..=total.max(1) as i32)[0] as u64;

        let mut made = 0u64;
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            S::sort_by(&mut test_data, |a, b| {
                made += 1;
                if made == panic_at {
                    panic!();
                }
                a.cmp(b)
            });
        }));
        assert!(res.is_err());

        // Unwinding may leave any order, but the element set must
        // survive.
        let sum_after: i64 = test_data.iter().map(|&x| i64::from(x)).sum();
        assert_eq!(sum_after, sum_before);
    });
}

pub fn panic_observable_is_less<S: Sort>() {
    announce_seed::<S>();

    for_each_pattern(|len, pattern_fn| {
        let pattern = pattern_fn(len);
        let mut test_input: Vec<Tally> = pattern.iter().copied().map(Tally::new).collect();
        let sum_before: i64 = pattern.iter().map(|&x| i64::from(x)).sum();

        let total = comps_used::<Tally, S, _>(&test_input, |a, b| a.val.cmp(&b.val));
        let panic_at = patterns::random_uniform(1, 1..=total.max(1) as i32)[0] as u64;

        let mut made = 0u64;
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            S::sort_by(&mut test_input, |a, b| {
                if made == panic_at - 1 {
                    panic!();
                }
                a.bump();
                b.bump();
                made += 1;
                a.val.cmp(&b.val)
            });
        }));
        assert!(res.is_err());

        // Tallies must reflect exactly the comparisons that completed
        // before the unwind, and no element may be lost.
        let per_element: u64 = test_input.iter().map(|t| t.seen.get()).sum();
        assert_eq!(per_element, made * 2);

        let sum_after: i64 = test_input.iter().map(|t| i64::from(t.val)).sum();
        assert_eq!(sum_after, sum_before);
    });
}

pub fn violate_ord_retain_original_set<S: Sort>() {
    announce_seed::<S>();

    // Comparators that are not strict weak orders. Sorting with them may
    // produce any order or panic, but the element set must survive.
    let random_orders = patterns::random_uniform(5_000, 0..3);
    let mut order_idx = 0usize;
    let mut next_random_order = move || {
        let raw = random_orders[order_idx % random_orders.len()];
        order_idx += 1;
        [Ordering::Less, Ordering::Equal, Ordering::Greater][raw as usize]
    };

    let mut sampled_counter = 0u32;
    let mut streak_counter = 0u32;

    let mut hostile_comparators: Vec<Box<dyn FnMut(&i32, &i32) -> Ordering>> = vec![
        Box::new(move |_a, _b| next_random_order()),
        Box::new(|_a, _b| Ordering::Less),
        Box::new(|_a, _b| Ordering::Equal),
        Box::new(|_a, _b| Ordering::Greater),
        Box::new(|a, b| if a == b { Ordering::Less } else { Ordering::Greater }),
        Box::new(move |a, b| {
            // Every hundredth comparison answers backwards.
            sampled_counter += 1;
            if sampled_counter % 100 == 0 {
                b.cmp(a)
            } else {
                a.cmp(b)
            }
        }),
        Box::new(move |a, b| {
            // Correct answers in streaks of fifty, then constant Less.
            // Streaks push comparison-guided cursors further off course
            // than evenly sampled wrong answers.
            streak_counter += 1;
            if (streak_counter / 50) % 2 == 0 {
                a.cmp(b)
            } else {
                Ordering::Less
            }
        }),
    ];

    for comp in &mut hostile_comparators {
        for_each_pattern(|len, pattern_fn| {
            let mut test_data = pattern_fn(len);
            let sum_before: i64 = test_data.iter().map(|&x| i64::from(x)).sum();

            let _ = panic::catch_unwind(AssertUnwindSafe(|| {
                S::sort_by(&mut test_data, &mut **comp);
            }));

            let sum_after: i64 = test_data.iter().map(|&x| i64::from(x)).sum();
            assert_eq!(sum_after, sum_before);
        });

        if cfg!(miri) {
            // One hostile comparator keeps the miri run tractable.
            break;
        }
    }
}

pub fn sort_vs_sort_by<S: Sort>() {
    announce_seed::<S>();

    let input = [300, -800, 5, -801, -3, 67, 0, 200, 50, 7, 10];
    let mut expected = input.to_vec();
    expected.sort();

    let mut by_natural_order = input.to_vec();
    S::sort(&mut by_natural_order);

    let mut by_comparator = input.to_vec();
    S::sort_by(&mut by_comparator, |a, b| a.cmp(b));

    assert_eq!(by_natural_order, expected);
    assert_eq!(by_comparator, expected);
}

pub fn int_edge<S: Sort>() {
    announce_seed::<S>();

    check_against_std::<i32, S>(&mut [i32::MIN, i32::MAX]);
    check_against_std::<i32, S>(&mut [i32::MAX, i32::MIN]);
    check_against_std::<i32, S>(&mut [i32::MIN, -3, i32::MAX, i32::MIN, 5]);
    check_against_std::<u64, S>(&mut [u64::MAX, 3, u64::MIN, 5, u64::MAX - 3]);

    let mut large = patterns::random(5_000);
    large.extend([i32::MAX, i32::MIN, i32::MAX]);
    check_against_std::<i32, S>(&mut large);
}

#[macro_export]
macro_rules! instantiate_sort_test_impl_inner {
    ($sort_impl:ty, miri_yes, $test_fn:ident) => {
        #[test]
        fn $test_fn() {
            $crate::tests::$test_fn::<$sort_impl>();
        }
    };
    ($sort_impl:ty, miri_no, $test_fn:ident) => {
        #[test]
        #[cfg(not(miri))]
        fn $test_fn() {
            $crate::tests::$test_fn::<$sort_impl>();
        }
    };
}

#[macro_export]
macro_rules! instantiate_sort_test_impl {
    ($sort_impl:ty, [$(($miri:ident, $test_fn:ident)),* $(,)?]) => {
        $(
            $crate::instantiate_sort_test_impl_inner!($sort_impl, $miri, $test_fn);
        )*
    };
}

/// Instantiates the whole suite as `#[test]` functions for `$sort_impl`.
/// Tests too slow for miri are compiled out under it.
#[macro_export]
macro_rules! instantiate_sort_tests {
    ($sort_impl:ty) => {
        $crate::instantiate_sort_test_impl!(
            $sort_impl,
            [
                (miri_no, all_equal),
                (miri_yes, ascending),
                (miri_yes, basic),
                (miri_yes, comp_panic),
                (miri_yes, descending),
                (miri_yes, fixed_seed),
                (miri_yes, int_edge),
                (miri_yes, observable_is_less),
                (miri_yes, panic_observable_is_less),
                (miri_yes, panic_retain_original_set),
                (miri_yes, pipe_organ),
                (miri_yes, random),
                (miri_no, random_binary),
                (miri_yes, random_boxed_str),
                (miri_no, random_d20),
                (miri_yes, random_d1000),
                (miri_yes, random_dense),
                (miri_yes, random_half_sorted),
                (miri_no, random_large_val),
                (miri_yes, random_mostly_sorted),
                (miri_yes, random_type_u64),
                (miri_yes, random_zipf),
                (miri_yes, saw_mixed),
                (miri_yes, sort_vs_sort_by),
                (miri_yes, stability),
                (miri_yes, stability_dense),
                (miri_yes, violate_ord_retain_original_set),
            ]
        );
    };
}
