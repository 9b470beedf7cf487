use crate::{
    any::difficulty::{mode::ModeDifficulty, skills::Skill},
    catch::{
        attributes::CatchDifficultyAttributes, convert::convert_objects,
        object::palpable::PalpableObject,
    },
    model::beatmap::Beatmap,
};

use super::{
    object::CatchDifficultyObject,
    skills::movement::{Movement, MovementStrain},
    DifficultyValues,
};

/// Lazily calculate the difficulty of an osu!catch map after every fruit and
/// droplet.
///
/// Tiny droplets are counted alongside the fruit or droplet that follows
/// them.
pub struct CatchTimedDifficulty {
    movement: Skill<Movement>,
    attrs: CatchDifficultyAttributes,
    palpable_objects: Box<[PalpableObject]>,
    diff_objects: Box<[CatchDifficultyObject]>,
    clock_rate: f64,
    idx: usize,
}

impl CatchTimedDifficulty {
    pub fn new(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let clock_rate = difficulty.get_clock_rate();
        let map_attrs = map.attributes().difficulty(difficulty).build();

        let palpable_objects: Box<[_]> =
            convert_objects(map, difficulty.get_mods().hr(), map_attrs.cs as f32).into();

        let (half_catcher_width, diff_objects) =
            DifficultyValues::create_difficulty_objects(&map_attrs, clock_rate, &palpable_objects);

        Self {
            movement: Skill::new(Movement::new(MovementStrain::new(
                half_catcher_width,
                clock_rate,
            ))),
            attrs: DifficultyValues::initial_attrs(difficulty, map, &map_attrs),
            palpable_objects,
            diff_objects,
            clock_rate,
            idx: 0,
        }
    }
}

impl Iterator for CatchTimedDifficulty {
    type Item = (f64, CatchDifficultyAttributes);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.palpable_objects.get(self.idx)?;
        self.attrs.add_object(h);
        let time = h.start_time / self.clock_rate;

        if let Some(curr) = self
            .idx
            .checked_sub(1)
            .and_then(|i| self.diff_objects.get(i))
        {
            self.movement.process(curr, &self.diff_objects);
        }

        self.idx += 1;
        DifficultyValues::eval(&mut self.attrs, &self.movement);

        Some((time, self.attrs.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();

        (len, Some(len))
    }
}

impl ExactSizeIterator for CatchTimedDifficulty {
    fn len(&self) -> usize {
        self.palpable_objects.len() - self.idx
    }
}
