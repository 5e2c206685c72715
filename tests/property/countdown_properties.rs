// Property-based tests for the countdown core
// Random instants exercise decomposition and progress invariants

#[path = "../fixtures/mod.rs"]
mod fixtures;

use chrono::Duration;
use fixtures::dates::at_millis;
use proptest::prelude::*;
use rust_countdown::services::countdown::{
    decompose, displayed_progress, progress, TimeRemaining, MS_PER_DAY,
};

// Roughly 1970..2100 in milliseconds
const MAX_INSTANT: i64 = 4_102_444_800_000;
const TEN_YEARS_MS: i64 = 3_650 * MS_PER_DAY;

proptest! {
    /// Property: a target at or before now is expired with all units zero
    #[test]
    fn prop_past_targets_are_expired(
        now in 0..MAX_INSTANT,
        behind in 0..TEN_YEARS_MS,
    ) {
        let now = at_millis(now);
        let remaining = decompose(now - Duration::milliseconds(behind), now);
        prop_assert_eq!(remaining, TimeRemaining::EXPIRED);
    }

    /// Property: units stay in range and reconstruct the delta to within a second
    #[test]
    fn prop_units_reconstruct_delta(
        now in 0..MAX_INSTANT,
        ahead in 1..TEN_YEARS_MS,
    ) {
        let now = at_millis(now);
        let remaining = decompose(now + Duration::milliseconds(ahead), now);

        prop_assert!(!remaining.is_expired);
        prop_assert!(remaining.hours < 24);
        prop_assert!(remaining.minutes < 60);
        prop_assert!(remaining.seconds < 60);
        let gap = ahead - remaining.total_millis();
        prop_assert!((0..1_000).contains(&gap), "gap was {}ms", gap);
    }

    /// Property: identical inputs give identical breakdowns
    #[test]
    fn prop_decompose_is_idempotent(
        target in 0..MAX_INSTANT,
        now in 0..MAX_INSTANT,
    ) {
        let (target, now) = (at_millis(target), at_millis(now));
        prop_assert_eq!(decompose(target, now), decompose(target, now));
    }

    /// Property: progress stays within [0, 100] for any three instants
    #[test]
    fn prop_progress_is_bounded(
        created in 0..MAX_INSTANT,
        target in 0..MAX_INSTANT,
        now in 0..MAX_INSTANT,
    ) {
        let value = progress(at_millis(created), at_millis(target), at_millis(now));
        prop_assert!((0.0..=100.0).contains(&value), "progress was {}", value);
    }

    /// Property: a target not after creation always reads 0%
    #[test]
    fn prop_degenerate_span_is_zero(
        created in 0..MAX_INSTANT,
        back in 0..TEN_YEARS_MS,
        now in 0..MAX_INSTANT,
    ) {
        let created = at_millis(created);
        let target = created - Duration::milliseconds(back);
        prop_assert_eq!(progress(created, target, at_millis(now)), 0.0);
    }

    /// Property: progress never decreases as now moves toward the target
    #[test]
    fn prop_progress_is_monotonic(
        created in 0..MAX_INSTANT,
        span in 1..TEN_YEARS_MS,
        first in 0.0..=1.0f64,
        second in 0.0..=1.0f64,
    ) {
        let created = at_millis(created);
        let target = created + Duration::milliseconds(span);
        let (early, late) = if first <= second { (first, second) } else { (second, first) };
        let at = |fraction: f64| created + Duration::milliseconds((span as f64 * fraction) as i64);

        prop_assert!(progress(created, target, at(early)) <= progress(created, target, at(late)));
    }

    /// Property: once expired the displayed progress is full
    #[test]
    fn prop_expired_displays_full(
        created in 0..MAX_INSTANT,
        target in 0..MAX_INSTANT,
        after in 0..TEN_YEARS_MS,
    ) {
        let target = at_millis(target);
        let now = target + Duration::milliseconds(after);
        let remaining = decompose(target, now);
        prop_assert_eq!(displayed_progress(&remaining, at_millis(created), target, now), 100.0);
    }
}

#[cfg(test)]
mod additional_tests {
    use super::*;
    use fixtures::dates::day;

    #[test]
    fn test_ten_day_span_steps_by_whole_days() {
        let values: Vec<f64> = (0..=10)
            .map(|n| progress(day(0), day(10), day(n)))
            .collect();
        let expected: Vec<f64> = (0..=10).map(|n| n as f64 * 10.0).collect();
        for (value, expected) in values.iter().zip(expected) {
            assert!((value - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_plateau_within_a_day() {
        let morning = progress(day(0), day(10), day(4) + Duration::hours(1));
        let evening = progress(day(0), day(10), day(4) + Duration::hours(23));
        assert_eq!(morning, evening);
    }
}
