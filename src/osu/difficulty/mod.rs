use std::cmp;

use crate::{
    any::difficulty::mode::ModeDifficulty,
    model::{beatmap::Beatmap, beatmap::BeatmapAttributes},
    osu::{
        convert::convert_objects,
        difficulty::{object::OsuDifficultyObject, scaling_factor::ScalingFactor},
        object::OsuObject,
    },
};

use self::skills::OsuSkills;

use super::attributes::OsuDifficultyAttributes;

pub mod object;
pub mod scaling_factor;
pub mod skills;
pub mod timed;

const DIFFICULTY_MULTIPLIER: f64 = 0.0675;
const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.14;

const HD_FADE_IN_DURATION_MULTIPLIER: f64 = 0.4;
const HD_FADE_OUT_DURATION_MULTIPLIER: f64 = 0.3;

pub fn difficulty(difficulty: &ModeDifficulty, map: &Beatmap) -> OsuDifficultyAttributes {
    // Without objects even the rating floor of aim and speed must not count
    if map.hit_objects.is_empty() || difficulty.get_passed_objects() == 0 {
        return OsuDifficultyAttributes {
            mods: difficulty.get_mods().clone(),
            ..Default::default()
        };
    }

    let DifficultyValues { skills, mut attrs } = DifficultyValues::calculate(difficulty, map);

    DifficultyValues::eval(&mut attrs, &skills);

    attrs
}

/// Values that every calculation on a map derives from mods and clock rate.
pub struct OsuDifficultySetup {
    pub scaling_factor: ScalingFactor,
    pub map_attrs: BeatmapAttributes,
    pub attrs: OsuDifficultyAttributes,
    pub time_preempt: f64,
}

impl OsuDifficultySetup {
    pub fn new(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let clock_rate = difficulty.get_clock_rate();
        let map_attrs = map.attributes().difficulty(difficulty).build();
        let scaling_factor = ScalingFactor::new(map_attrs.cs);

        let attrs = OsuDifficultyAttributes {
            ar: map_attrs.ar,
            hp: map_attrs.hp,
            od: map_attrs.od,
            mods: difficulty.get_mods().clone(),
            ..Default::default()
        };

        let time_preempt = f64::from((map_attrs.hit_windows.ar * clock_rate) as f32);

        Self {
            scaling_factor,
            map_attrs,
            attrs,
            time_preempt,
        }
    }

    /// Create the skills and all difficulty objects of the map.
    ///
    /// Only the first `take` objects are counted in the attributes.
    pub fn prepare(
        &mut self,
        difficulty: &ModeDifficulty,
        map: &Beatmap,
        take: usize,
    ) -> (OsuSkills, Box<[OsuObject]>, Box<[OsuDifficultyObject]>) {
        let mods = difficulty.get_mods();

        let mut osu_objects = convert_objects(
            map,
            &self.scaling_factor,
            mods.hr(),
            self.time_preempt,
            take,
            &mut self.attrs,
        );

        let diff_objects = DifficultyValues::create_difficulty_objects(
            difficulty.get_clock_rate(),
            &self.scaling_factor,
            &mut osu_objects,
        );

        let skills = OsuSkills::new(
            mods,
            &self.scaling_factor,
            &self.map_attrs,
            self.time_preempt,
        );

        (skills, osu_objects, diff_objects)
    }
}

pub struct DifficultyValues {
    pub skills: OsuSkills,
    pub attrs: OsuDifficultyAttributes,
}

impl DifficultyValues {
    pub fn calculate(difficulty: &ModeDifficulty, map: &Beatmap) -> Self {
        let take = difficulty.get_passed_objects();

        let mut setup = OsuDifficultySetup::new(difficulty, map);
        let (mut skills, _, diff_objects) = setup.prepare(difficulty, map, take);

        // The first hit object has no difficulty object
        let take_diff_objects = cmp::min(map.hit_objects.len(), take).saturating_sub(1);

        for curr in diff_objects.iter().take(take_diff_objects) {
            skills.process(curr, &diff_objects);
        }

        Self {
            skills,
            attrs: setup.attrs,
        }
    }

    /// Process the difficulty values and store the results in `attrs`.
    pub fn eval(attrs: &mut OsuDifficultyAttributes, skills: &OsuSkills) {
        let mods = &attrs.mods;

        let aim_difficulty_value = skills.aim.difficulty_value();
        let aim_no_sliders_difficulty_value = skills.aim_no_sliders.difficulty_value();
        let speed_difficulty_value = skills.speed.difficulty_value();
        let flashlight_difficulty_value = skills
            .flashlight
            .as_ref()
            .map_or(0.0, |flashlight| flashlight.difficulty_value());

        let mut aim_rating = aim_difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER;
        let aim_rating_no_sliders = aim_no_sliders_difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER;
        let mut speed_rating = speed_difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER;
        let mut flashlight_rating = flashlight_difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER;

        let slider_factor = if aim_rating > 0.0 {
            aim_rating_no_sliders / aim_rating
        } else {
            1.0
        };

        if mods.td() {
            aim_rating = aim_rating.powf(0.8);
            flashlight_rating = flashlight_rating.powf(0.8);
        }

        if mods.rx() {
            aim_rating *= 0.9;
            speed_rating = 0.0;
            flashlight_rating *= 0.7;
        }

        let base_aim_performance = base_performance(aim_rating);
        let base_speed_performance = base_performance(speed_rating);

        let base_flashlight_performance = if mods.fl() {
            flashlight_rating.powi(2) * 25.0
        } else {
            0.0
        };

        let base_performance = (base_aim_performance.powf(1.1)
            + base_speed_performance.powf(1.1)
            + base_flashlight_performance.powf(1.1))
        .powf(1.0 / 1.1);

        let star_rating = if base_performance > 0.00001 {
            PERFORMANCE_BASE_MULTIPLIER.cbrt()
                * 0.027
                * ((100_000.0 / 2.0_f64.powf(1.0 / 1.1) * base_performance).cbrt() + 4.0)
        } else {
            0.0
        };

        attrs.aim = aim_rating;
        attrs.speed = speed_rating;
        attrs.flashlight = flashlight_rating;
        attrs.slider_factor = slider_factor;
        attrs.stars = star_rating;
        attrs.speed_note_count = skills.speed.inner.relevant_note_count();
    }

    /// Compute the lazy slider cursor of every object, then create a
    /// difficulty object for every object but the first.
    pub fn create_difficulty_objects(
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
        osu_objects: &mut [OsuObject],
    ) -> Box<[OsuDifficultyObject]> {
        for h in osu_objects.iter_mut() {
            OsuDifficultyObject::compute_slider_cursor_pos(h, scaling_factor.radius);
        }

        let osu_objects = &*osu_objects;

        osu_objects
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, h)| {
                let last = &osu_objects[i - 1];
                let last_last = i.checked_sub(2).map(|j| &osu_objects[j]);

                OsuDifficultyObject::new(h, last, last_last, clock_rate, i - 1, scaling_factor)
            })
            .collect()
    }
}

fn base_performance(rating: f64) -> f64 {
    (5.0 * (rating / DIFFICULTY_MULTIPLIER).max(1.0) - 4.0).powi(3) / 100_000.0
}
