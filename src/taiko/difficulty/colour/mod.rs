use std::ops::Range;

use crate::taiko::object::HitType;

mod preprocessor;

/// Colour encodings that start at a difficulty object.
///
/// Only the first object of an encoding references it, all values are
/// indices into the [`ColourEncoding`] of the map.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaikoDifficultyColour {
    pub mono_streak: Option<usize>,
    pub alternating_mono_pattern: Option<usize>,
    pub repeating_hit_patterns: Option<usize>,
}

/// All colour encodings of a map.
///
/// Each level groups consecutive entries of the level below so every
/// encoding is stored as a range.
#[derive(Clone, Debug, Default)]
pub struct ColourEncoding {
    pub mono_streaks: Vec<MonoStreak>,
    pub alternating_mono_patterns: Vec<AlternatingMonoPattern>,
    pub repeating_hit_patterns: Vec<RepeatingHitPatterns>,
}

/// Consecutive objects of the same colour.
#[derive(Clone, Debug)]
pub struct MonoStreak {
    /// Indices of the difficulty objects.
    pub objects: Range<usize>,
    pub hit_type: HitType,
    pub parent: usize,
    /// Position within the parent.
    pub idx: usize,
}

impl MonoStreak {
    pub fn run_len(&self) -> usize {
        self.objects.len()
    }
}

/// Consecutive [`MonoStreak`]s of equal length.
#[derive(Clone, Debug)]
pub struct AlternatingMonoPattern {
    pub mono_streaks: Range<usize>,
    pub parent: usize,
    /// Position within the parent.
    pub idx: usize,
}

/// [`AlternatingMonoPattern`]s that repeat.
#[derive(Clone, Debug)]
pub struct RepeatingHitPatterns {
    pub alternating_mono_patterns: Range<usize>,
    /// How many patterns back the closest repetition of this one is.
    pub repetition_interval: usize,
}

impl RepeatingHitPatterns {
    pub const MAX_REPETITION_INTERVAL: usize = 16;
}

impl ColourEncoding {
    fn first_mono_streak(&self, pattern: &AlternatingMonoPattern) -> Option<&MonoStreak> {
        self.mono_streaks.get(pattern.mono_streaks.start)
    }

    fn has_identical_mono_len(&self, a: usize, b: usize) -> bool {
        let run_len = |idx: usize| {
            self.alternating_mono_patterns
                .get(idx)
                .and_then(|pattern| self.first_mono_streak(pattern))
                .map(MonoStreak::run_len)
        };

        run_len(a) == run_len(b)
    }

    /// Whether two alternating mono patterns have the same shape and start
    /// with the same colour.
    fn is_alternating_repetition(&self, a: usize, b: usize) -> bool {
        let (Some(pattern_a), Some(pattern_b)) = (
            self.alternating_mono_patterns.get(a),
            self.alternating_mono_patterns.get(b),
        ) else {
            return false;
        };

        let hit_type = |pattern: &AlternatingMonoPattern| {
            self.first_mono_streak(pattern).map(|streak| streak.hit_type)
        };

        self.has_identical_mono_len(a, b)
            && pattern_a.mono_streaks.len() == pattern_b.mono_streaks.len()
            && hit_type(pattern_a) == hit_type(pattern_b)
    }

    fn is_repeating_repetition(&self, a: usize, b: usize) -> bool {
        let (Some(pattern_a), Some(pattern_b)) = (
            self.repeating_hit_patterns.get(a),
            self.repeating_hit_patterns.get(b),
        ) else {
            return false;
        };

        let range_a = pattern_a.alternating_mono_patterns.clone();
        let range_b = pattern_b.alternating_mono_patterns.clone();

        range_a.len() == range_b.len()
            && range_a
                .zip(range_b)
                .take(2)
                .all(|(a, b)| self.has_identical_mono_len(a, b))
    }

    /// Walk back through previous repeating hit patterns until one is a
    /// repetition of the pattern at `idx`.
    fn find_repetition_interval(&self, idx: usize) -> usize {
        const MAX: usize = RepeatingHitPatterns::MAX_REPETITION_INTERVAL;

        let Some(mut other) = idx.checked_sub(1) else {
            return MAX + 1;
        };

        let mut interval = 1;

        while interval < MAX {
            if self.is_repeating_repetition(idx, other) {
                return interval;
            }

            let Some(prev) = other.checked_sub(1) else {
                break;
            };

            other = prev;
            interval += 1;
        }

        MAX + 1
    }
}
