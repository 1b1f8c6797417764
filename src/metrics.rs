//! Pure scoring functions shared by the session engine and the renderer.
//!
//! Words per minute use the whitespace convention: the number of
//! whitespace-delimited tokens in the trimmed entered text, divided by the
//! elapsed minutes and rounded. "ab cd" is two words no matter how long
//! the words are.

use itertools::{EitherOrBoth, Itertools};
use std::time::Duration;

/// Thresholds for the five bars of the speed indicator
pub const SPEED_BAR_THRESHOLDS: [u32; 5] = [20, 40, 60, 80, 100];

/// How a single target character currently reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Incorrect,
    Pending,
}

/// Percentage of entered characters that match the target at the same position.
///
/// Empty input is 100. Characters typed past the end of the target never match.
pub fn accuracy(entered: &str, target: &str) -> u8 {
    let mut typed = 0usize;
    let mut matches = 0usize;

    for pair in entered.chars().zip_longest(target.chars()) {
        match pair {
            EitherOrBoth::Both(e, t) => {
                typed += 1;
                if e == t {
                    matches += 1;
                }
            }
            EitherOrBoth::Left(_) => typed += 1,
            EitherOrBoth::Right(_) => break,
        }
    }

    if typed == 0 {
        return 100;
    }

    ((matches as f64 / typed as f64) * 100.0).round() as u8
}

pub fn word_count(entered: &str) -> usize {
    entered.split_whitespace().count()
}

/// Words per minute over `elapsed`; 0 before any time has passed
pub fn wpm(entered: &str, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0;
    }

    let ratio = word_count(entered) as f64 / minutes;
    if ratio.is_finite() {
        ratio.round() as u32
    } else {
        0
    }
}

/// Correctness of each target character given what has been entered so far
pub fn classify(entered: &str, target: &str) -> Vec<(char, CharState)> {
    target
        .chars()
        .zip_longest(entered.chars())
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(t, e) if t == e => Some((t, CharState::Correct)),
            EitherOrBoth::Both(t, _) => Some((t, CharState::Incorrect)),
            EitherOrBoth::Left(t) => Some((t, CharState::Pending)),
            EitherOrBoth::Right(_) => None,
        })
        .collect()
}

/// Fraction of the target covered by the entered text, clamped to [0, 1]
pub fn progress(entered: &str, target: &str) -> f64 {
    let total = target.chars().count();
    if total == 0 {
        return 0.0;
    }
    (entered.chars().count() as f64 / total as f64).min(1.0)
}

/// Colour band of the speed indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SpeedTier {
    Warming,
    Steady,
    Fast,
    Blazing,
}

impl SpeedTier {
    pub fn from_wpm(wpm: u32) -> Self {
        match wpm {
            w if w > 80 => SpeedTier::Blazing,
            w if w > 60 => SpeedTier::Fast,
            w if w > 40 => SpeedTier::Steady,
            _ => SpeedTier::Warming,
        }
    }
}

/// Number of speed bars lit for `wpm`, 0..=5
pub fn lit_bars(wpm: u32) -> usize {
    SPEED_BAR_THRESHOLDS.iter().filter(|&&t| wpm > t).count()
}
