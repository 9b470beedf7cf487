use crate::{
    any::difficulty::mode::ModeDifficulty,
    model::beatmap::Beatmap,
    taiko::{attributes::TaikoDifficultyAttributes, object::TaikoObject},
};

use super::{object::TaikoDifficultyObject, skills::TaikoSkills, DifficultyValues};

/// Lazily calculate the difficulty of an osu!taiko map after every object.
///
/// Each item is the clock rate adjusted end time of the last processed
/// object alongside the attributes up to that object.
pub struct TaikoTimedDifficulty {
    skills: TaikoSkills,
    attrs: TaikoDifficultyAttributes,
    taiko_objects: Box<[TaikoObject]>,
    diff_objects: Box<[TaikoDifficultyObject]>,
    clock_rate: f64,
    idx: usize,
}

impl TaikoTimedDifficulty {
    pub fn new(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let clock_rate = difficulty.get_clock_rate();
        let taiko_objects = TaikoObject::from_map(map);

        let (encoding, diff_objects) =
            DifficultyValues::create_difficulty_objects(&taiko_objects, clock_rate);

        Self {
            skills: TaikoSkills::new(encoding),
            attrs: DifficultyValues::initial_attrs(difficulty, map),
            taiko_objects,
            diff_objects,
            clock_rate,
            idx: 0,
        }
    }
}

impl Iterator for TaikoTimedDifficulty {
    type Item = (f64, TaikoDifficultyAttributes);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.taiko_objects.get(self.idx)?;
        self.attrs.max_combo += u32::from(h.is_hit());
        let time = h.end_time / self.clock_rate;

        // The first two objects have no difficulty object
        if let Some(curr) = self
            .idx
            .checked_sub(2)
            .and_then(|i| self.diff_objects.get(i))
        {
            self.skills.process(curr, &self.diff_objects);
        }

        self.idx += 1;
        DifficultyValues::eval(&mut self.attrs, &self.skills);

        Some((time, self.attrs.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();

        (len, Some(len))
    }
}

impl ExactSizeIterator for TaikoTimedDifficulty {
    fn len(&self) -> usize {
        self.taiko_objects.len() - self.idx
    }
}

#[cfg(test)]
mod tests {
    use crate::taiko::difficulty::{difficulty, tests::ddkk};

    use super::*;

    #[test]
    fn last_item_matches_full_calculation() {
        let map = ddkk(64, 120.0);
        let mode_difficulty = ModeDifficulty::new().mods(64);

        let timed = TaikoTimedDifficulty::new(&mode_difficulty, &map);
        assert_eq!(timed.len(), 64);

        let (time, last) = timed.last().unwrap();

        assert!((time - (1000.0 + 63.0 * 120.0) / 1.5).abs() < 1e-9);
        assert_eq!(last, difficulty(&mode_difficulty, &map));
    }

    #[test]
    fn each_item_matches_partial_calculation() {
        let map = ddkk(32, 120.0);
        let timed = TaikoTimedDifficulty::new(&ModeDifficulty::new(), &map);

        for (i, (_, attrs)) in timed.enumerate() {
            let expected = difficulty(&ModeDifficulty::new().passed_objects(i + 1), &map);

            assert_eq!(attrs.max_combo, expected.max_combo);
            assert!((attrs.stars - expected.stars).abs() < 1e-9, "object {i}");
        }
    }

    #[test]
    fn first_two_items_have_no_stars() {
        let mut timed = TaikoTimedDifficulty::new(&ModeDifficulty::new(), &ddkk(8, 120.0));

        for _ in 0..2 {
            let (_, attrs) = timed.next().unwrap();
            assert_eq!(attrs.stars, 0.0);
        }

        assert_eq!(timed.len(), 6);
    }
}
