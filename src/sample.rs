use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

pub const SAMPLE_MAX_COUNT: u64 = 1000;

/// Seed-locked sample calendar: `days` consecutive dates from `start`, each
/// with a pseudo-random count in `0..=SAMPLE_MAX_COUNT`. Same seed, same
/// calendar, so demo renders are reproducible.
pub fn sample_contributions(seed: u64, start: NaiveDate, days: u32) -> BTreeMap<NaiveDate, u64> {
    let mut contributions = BTreeMap::new();
    let mut date = start;
    for day in 0..days {
        let count = mix64(seed ^ (u64::from(day).wrapping_mul(0x9e37_79b9_7f4a_7c15)))
            % (SAMPLE_MAX_COUNT + 1);
        contributions.insert(date, count);
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    contributions
}

// splitmix64 finalizer
fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
