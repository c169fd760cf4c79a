//! Property-based invariant tests for the filter, normalizer, and wrapper.
//!
//! Buffers are built from tokens that a filtered host can actually hold:
//! plain words, spaces, pivots, manual breaks, and leftover soft breaks.
//! A lone `\r` never reaches the buffer through the entry filter, so it is
//! not generated.

use proptest::prelude::*;
use wrapedit_core::constants::PIVOT_MARKER;
use wrapedit_core::normalize::check_normalized;
use wrapedit_core::{
    filter_char, logical_text, normalize, refresh, MonospaceMeasure, RefreshOptions,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn token_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        4 => Just("a"),
        3 => Just("bb"),
        1 => Just("ccccccc"),
        4 => Just(" "),
        1 => Just("\n"),
        1 => Just("\r\n"),
        1 => Just("\u{07FF}"),
        1 => Just("é"),
        1 => Just("漢"),
    ]
}

fn buffer_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(token_strategy(), 0..48).prop_map(|tokens| tokens.concat())
}

fn width_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![
        (1u16..24).prop_map(f32::from),
        Just(f32::INFINITY),
        Just(0.0),
    ]
}

fn refreshed(mut text: String, width: f32) -> String {
    let mut measure = MonospaceMeasure::cells();
    refresh(&mut text, RefreshOptions::new(width, true), Some(&mut measure));
    text
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Entry filter substitutes exactly the manual-break key
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn filter_maps_only_the_break_key(c in any::<char>().prop_filter("pivot", |c| *c != PIVOT_MARKER)) {
        let out = filter_char(c);
        prop_assert_eq!(out == PIVOT_MARKER, c == '\n');
        if c != '\n' {
            prop_assert_eq!(out, c);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Normalize postcondition and idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_leaves_only_shielded_breaks(input in buffer_strategy()) {
        let mut text = input.clone();
        normalize(&mut text);
        prop_assert_eq!(check_normalized(&text), Ok(()), "input: {:?}", input);
    }

    #[test]
    fn normalize_is_idempotent(input in buffer_strategy()) {
        let mut once = input;
        normalize(&mut once);
        let mut twice = once.clone();
        let report = normalize(&mut twice);
        prop_assert_eq!(&twice, &once);
        prop_assert!(!report.modified());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Refresh is stable under a fixed width
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn refresh_is_idempotent(input in buffer_strategy(), width in width_strategy()) {
        let once = refreshed(input, width);
        let mut twice = once.clone();
        let mut measure = MonospaceMeasure::cells();
        let report = refresh(&mut twice, RefreshOptions::new(width, true), Some(&mut measure));
        prop_assert_eq!(&twice, &once);
        prop_assert!(!report.content_changed());
    }

    #[test]
    fn refresh_preserves_what_the_user_typed(
        input in buffer_strategy(),
        first in width_strategy(),
        second in width_strategy(),
    ) {
        let expected = logical_text(&input);
        let wrapped = refreshed(input, first);
        prop_assert_eq!(logical_text(&wrapped), expected.clone());
        let rewrapped = refreshed(wrapped, second);
        prop_assert_eq!(logical_text(&rewrapped), expected);
    }

    #[test]
    fn refresh_never_leaves_pivots(input in buffer_strategy(), width in width_strategy()) {
        let text = refreshed(input, width);
        prop_assert!(!text.contains(PIVOT_MARKER));
    }
}
