//! Input generators for the test suite and benchmarks.
//!
//! All generators produce `Vec<i32>` and derive from one process-wide
//! seed, so a failing test run can be reproduced by exporting
//! `OVERRIDE_SEED` with the seed the harness printed.

use std::env;
use std::str::FromStr;
use std::sync::Mutex;

use rand::prelude::*;

use zipf::ZipfDistribution;

enum SeedMode {
    /// One seed for the whole process. `external` records whether it came
    /// from `OVERRIDE_SEED`.
    Fixed { seed: u64, external: bool },
    /// A fresh seed per generator call. Benchmarks want this; tests rely
    /// on repeatability and must never enable it.
    FreshEachCall,
}

static SEED_MODE: Mutex<Option<SeedMode>> = Mutex::new(None);

fn initial_mode() -> SeedMode {
    match env::var("OVERRIDE_SEED") {
        Ok(raw) => SeedMode::Fixed {
            seed: u64::from_str(&raw).expect("OVERRIDE_SEED must be a u64"),
            external: true,
        },
        Err(_) => SeedMode::Fixed {
            seed: thread_rng().gen(),
            external: false,
        },
    }
}

/// The seed the generators currently derive from. Stable within the
/// process unless [`use_random_seed_each_time`] was called.
pub fn random_init_seed() -> u64 {
    match *SEED_MODE.lock().unwrap().get_or_insert_with(initial_mode) {
        SeedMode::Fixed { seed, .. } => seed,
        SeedMode::FreshEachCall => thread_rng().gen(),
    }
}

/// Switches every generator call to fresh random values.
///
/// # Panics
///
/// Panics if `OVERRIDE_SEED` is set; an external seed and per-call
/// randomness contradict each other.
pub fn use_random_seed_each_time() {
    let mut guard = SEED_MODE.lock().unwrap();
    if let SeedMode::Fixed { external: true, .. } = guard.get_or_insert_with(initial_mode) {
        panic!("use_random_seed_each_time conflicts with OVERRIDE_SEED");
    }
    *guard = Some(SeedMode::FreshEachCall);
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

/// Uniform over the whole `i32` range.
pub fn random(len: usize) -> Vec<i32> {
    let mut rng = rng();
    (0..len).map(|_| rng.gen()).collect()
}

/// Uniform over `range`; narrow ranges give long runs of equal values.
pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    let dist = range.into();
    let mut rng = rng();
    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

/// Zipf-distributed values: a handful of values dominate, with a long
/// tail of rare ones.
pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    let dist = ZipfDistribution::new(len.max(1), exponent).unwrap();
    let mut rng = rng();
    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

/// Random values with the first `sorted_percent` percent pre-sorted.
pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len].sort_unstable();
    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    (0..len as i32).rev().collect()
}

/// Random values arranged into roughly `saw_count` runs of alternating
/// direction.
pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    let mut v = random(len);
    if len == 0 {
        return v;
    }
    let run_len = (len / saw_count.max(1)).max(1);
    for (i, run) in v.chunks_mut(run_len).enumerate() {
        if i % 2 == 0 {
            run.sort_unstable();
        } else {
            run.sort_unstable_by_key(|&val| std::cmp::Reverse(val));
        }
    }
    v
}

/// Ascending first half, descending second half.
pub fn pipe_organ(len: usize) -> Vec<i32> {
    let mut v = random(len);
    let mid = len / 2;
    v[..mid].sort_unstable();
    v[mid..].sort_unstable_by_key(|&val| std::cmp::Reverse(val));
    v
}
