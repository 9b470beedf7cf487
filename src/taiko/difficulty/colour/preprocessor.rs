use crate::taiko::{difficulty::object::TaikoDifficultyObject, object::HitType};

use super::{AlternatingMonoPattern, ColourEncoding, MonoStreak, RepeatingHitPatterns};

impl ColourEncoding {
    /// Encode the colours of all objects and assign each encoding to the
    /// first object it contains.
    pub fn new(diff_objects: &mut [TaikoDifficultyObject]) -> Self {
        let mut encoding = Self {
            mono_streaks: encode_mono_streaks(diff_objects),
            ..Self::default()
        };

        encoding.encode_alternating_mono_patterns();
        encoding.encode_repeating_hit_patterns();
        encoding.assign(diff_objects);

        encoding
    }

    fn encode_alternating_mono_patterns(&mut self) {
        let mut prev_run_len = None;

        for (i, streak) in self.mono_streaks.iter().enumerate() {
            let run_len = streak.run_len();

            match self.alternating_mono_patterns.last_mut() {
                Some(pattern) if prev_run_len == Some(run_len) => pattern.mono_streaks.end = i + 1,
                _ => self.alternating_mono_patterns.push(AlternatingMonoPattern {
                    mono_streaks: i..i + 1,
                    parent: 0,
                    idx: 0,
                }),
            }

            prev_run_len = Some(run_len);
        }
    }

    fn encode_repeating_hit_patterns(&mut self) {
        let len = self.alternating_mono_patterns.len();
        let is_coupled = |i: usize| i + 2 < len && self.is_alternating_repetition(i, i + 2);

        let mut ranges = Vec::new();
        let mut i = 0;

        while i < len {
            let start = i;

            if is_coupled(i) {
                while is_coupled(i) {
                    i += 1;
                }

                i = (i + 2).min(len);
            } else {
                i += 1;
            }

            ranges.push(start..i);
        }

        self.repeating_hit_patterns = ranges
            .into_iter()
            .map(|alternating_mono_patterns| RepeatingHitPatterns {
                alternating_mono_patterns,
                repetition_interval: 0,
            })
            .collect();

        for i in 0..self.repeating_hit_patterns.len() {
            self.repeating_hit_patterns[i].repetition_interval = self.find_repetition_interval(i);
        }
    }

    fn assign(&mut self, diff_objects: &mut [TaikoDifficultyObject]) {
        for (i, repeating) in self.repeating_hit_patterns.iter().enumerate() {
            for (j, pattern_idx) in repeating.alternating_mono_patterns.clone().enumerate() {
                let pattern = &mut self.alternating_mono_patterns[pattern_idx];
                pattern.parent = i;
                pattern.idx = j;

                for (k, streak_idx) in pattern.mono_streaks.clone().enumerate() {
                    let streak = &mut self.mono_streaks[streak_idx];
                    streak.parent = pattern_idx;
                    streak.idx = k;

                    let Some(first) = diff_objects.get_mut(streak.objects.start) else {
                        continue;
                    };

                    first.colour.mono_streak = Some(streak_idx);

                    if k == 0 {
                        first.colour.alternating_mono_pattern = Some(pattern_idx);

                        if j == 0 {
                            first.colour.repeating_hit_patterns = Some(i);
                        }
                    }
                }
            }
        }
    }
}

/// Group objects into streaks of the same colour.
///
/// Non-hits always start a new streak. A hit continues the current streak
/// if the previous hit, ignoring non-hits, has the same colour.
fn encode_mono_streaks(diff_objects: &[TaikoDifficultyObject]) -> Vec<MonoStreak> {
    let mut mono_streaks: Vec<MonoStreak> = Vec::new();
    let mut prev_note: Option<HitType> = None;

    for (i, h) in diff_objects.iter().enumerate() {
        let continues = h.is_hit() && prev_note == Some(h.base_hit_type);

        match mono_streaks.last_mut() {
            Some(streak) if continues => streak.objects.end = i + 1,
            _ => mono_streaks.push(MonoStreak {
                objects: i..i + 1,
                hit_type: h.base_hit_type,
                parent: 0,
                idx: 0,
            }),
        }

        if h.is_hit() {
            prev_note = Some(h.base_hit_type);
        }
    }

    mono_streaks
}

#[cfg(test)]
mod tests {
    use crate::taiko::{
        difficulty::colour::TaikoDifficultyColour,
        object::{HitType, TaikoObject},
    };

    use super::*;

    const D: HitType = HitType::Center;
    const K: HitType = HitType::Rim;

    fn diff_objects(hit_types: &[HitType]) -> Vec<TaikoDifficultyObject> {
        let objects: Vec<_> = [D, D]
            .iter()
            .chain(hit_types)
            .enumerate()
            .map(|(i, &hit_type)| TaikoObject {
                start_time: 100.0 * i as f64,
                end_time: 100.0 * i as f64,
                hit_type,
            })
            .collect();

        objects
            .windows(3)
            .enumerate()
            .map(|(i, w)| TaikoDifficultyObject::new(&w[2], &w[1], &w[0], 1.0, i))
            .collect()
    }

    fn run_lens(encoding: &ColourEncoding) -> Vec<usize> {
        encoding.mono_streaks.iter().map(MonoStreak::run_len).collect()
    }

    #[test]
    fn empty() {
        let encoding = ColourEncoding::new(&mut []);

        assert!(encoding.mono_streaks.is_empty());
        assert!(encoding.alternating_mono_patterns.is_empty());
        assert!(encoding.repeating_hit_patterns.is_empty());
    }

    #[test]
    fn mono_streaks_by_colour() {
        let mut objects = diff_objects(&[D, D, K, K, K, D]);
        let encoding = ColourEncoding::new(&mut objects);

        assert_eq!(run_lens(&encoding), [2, 3, 1]);
        assert_eq!(encoding.mono_streaks[1].hit_type, K);
    }

    #[test]
    fn non_hits_start_new_streaks() {
        let mut objects = diff_objects(&[D, HitType::NonHit, D, D]);
        let encoding = ColourEncoding::new(&mut objects);

        // The hits after the swell continue the swell's streak
        assert_eq!(run_lens(&encoding), [1, 3]);
    }

    #[test]
    fn alternating_patterns_group_equal_lengths() {
        let mut objects = diff_objects(&[D, K, D, K, D, D, K, K]);
        let encoding = ColourEncoding::new(&mut objects);

        let patterns: Vec<_> = encoding
            .alternating_mono_patterns
            .iter()
            .map(|pattern| pattern.mono_streaks.len())
            .collect();

        assert_eq!(patterns, [4, 2]);
    }

    #[test]
    fn first_objects_reference_encodings() {
        let mut objects = diff_objects(&[D, K, K, D]);
        let encoding = ColourEncoding::new(&mut objects);

        assert_eq!(
            objects[0].colour,
            TaikoDifficultyColour {
                mono_streak: Some(0),
                alternating_mono_pattern: Some(0),
                repeating_hit_patterns: Some(0),
            }
        );

        assert_eq!(objects[1].colour.mono_streak, Some(1));
        assert_eq!(objects[2].colour, TaikoDifficultyColour::default());

        for (i, streak) in encoding.mono_streaks.iter().enumerate() {
            let pattern = &encoding.alternating_mono_patterns[streak.parent];
            assert_eq!(pattern.mono_streaks.start + streak.idx, i);
        }
    }

    #[test]
    fn repetition_interval() {
        // Streak lengths cycle through 1, 2, 3 with alternating colours
        let cycle = [D, K, K, D, D, D, K, D, D, K, K, K];
        let hit_types: Vec<_> = cycle.iter().copied().cycle().take(36).collect();
        let mut objects = diff_objects(&hit_types);
        let encoding = ColourEncoding::new(&mut objects);

        assert_eq!(encoding.repeating_hit_patterns.len(), 18);

        let intervals: Vec<_> = encoding
            .repeating_hit_patterns
            .iter()
            .map(|pattern| pattern.repetition_interval)
            .collect();

        let max = RepeatingHitPatterns::MAX_REPETITION_INTERVAL;

        assert!(intervals[..3].iter().all(|&interval| interval == max + 1));
        assert!(intervals[3..].iter().all(|&interval| interval == 3), "{intervals:?}");
    }
}
