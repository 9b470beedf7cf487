use std::cmp;

use crate::{
    any::difficulty::{mode::ModeDifficulty, skills::Skill},
    catch::{
        attributes::CatchDifficultyAttributes, catcher::Catcher, convert::convert_objects,
        object::palpable::PalpableObject,
    },
    model::beatmap::{Beatmap, BeatmapAttributes},
};

use self::{
    object::CatchDifficultyObject,
    skills::movement::{Movement, MovementStrain},
};

pub mod object;
pub mod skills;
pub mod timed;

const STAR_SCALING_FACTOR: f64 = 0.153;

pub fn difficulty(difficulty: &ModeDifficulty, map: &Beatmap) -> CatchDifficultyAttributes {
    let DifficultyValues {
        movement,
        mut attrs,
    } = DifficultyValues::calculate(difficulty, map);

    DifficultyValues::eval(&mut attrs, &movement);

    attrs
}

pub struct DifficultyValues {
    pub movement: Skill<Movement>,
    pub attrs: CatchDifficultyAttributes,
}

impl DifficultyValues {
    pub fn calculate(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let take = difficulty.get_passed_objects();
        let clock_rate = difficulty.get_clock_rate();

        let map_attrs = map.attributes().difficulty(difficulty).build();
        let mut attrs = Self::initial_attrs(difficulty, map, &map_attrs);

        let palpable_objects =
            convert_objects(map, difficulty.get_mods().hr(), map_attrs.cs as f32);

        for h in palpable_objects.iter().take(take) {
            attrs.add_object(h);
        }

        let (half_catcher_width, diff_objects) =
            Self::create_difficulty_objects(&map_attrs, clock_rate, &palpable_objects);

        let mut movement = Skill::new(Movement::new(MovementStrain::new(
            half_catcher_width,
            clock_rate,
        )));

        // The first object has no difficulty object
        let take_diff_objects = cmp::min(palpable_objects.len(), take).saturating_sub(1);

        for curr in diff_objects.iter().take(take_diff_objects) {
            movement.process(curr, &diff_objects);
        }

        Self { movement, attrs }
    }

    /// Attributes that do not depend on the processed objects.
    pub fn initial_attrs(
        difficulty: &ModeDifficulty,
        map: &Beatmap,
        map_attrs: &BeatmapAttributes,
    ) -> CatchDifficultyAttributes {
        CatchDifficultyAttributes {
            ar: map_attrs.ar,
            is_convert: map.is_convert,
            mods: difficulty.get_mods().clone(),
            ..Default::default()
        }
    }

    /// Process the difficulty values and store the results in `attrs`.
    pub fn eval(attrs: &mut CatchDifficultyAttributes, movement: &Skill<Movement>) {
        attrs.stars = movement.difficulty_value().sqrt() * STAR_SCALING_FACTOR;
    }

    /// Create a difficulty object for every object but the first.
    ///
    /// Also returns the half catcher width that was used to normalize
    /// positions.
    pub fn create_difficulty_objects(
        map_attrs: &BeatmapAttributes,
        clock_rate: f64,
        palpable_objects: &[PalpableObject],
    ) -> (f32, Box<[CatchDifficultyObject]>) {
        let cs = map_attrs.cs as f32;

        let mut half_catcher_width = Catcher::calculate_catch_width(cs) * 0.5;
        half_catcher_width *= 1.0 - ((cs - 5.5).max(0.0) * 0.0625);

        let scaling_factor =
            CatchDifficultyObject::NORMALIZED_HITOBJECT_RADIUS / half_catcher_width;

        let diff_objects = palpable_objects
            .windows(2)
            .enumerate()
            .map(|(i, w)| CatchDifficultyObject::new(&w[1], &w[0], clock_rate, scaling_factor, i))
            .collect();

        (half_catcher_width, diff_objects)
    }
}
