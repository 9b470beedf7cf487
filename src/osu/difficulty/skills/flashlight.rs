use crate::{
    any::difficulty::{
        object::IDifficultyObject,
        skills::{Decaying, StrainDecaySkill},
    },
    model::mods::ModCombination,
    osu::difficulty::object::{OsuBaseObjectKind, OsuDifficultyObject},
    util::strains_vec::StrainsVec,
};

use super::strain::OsuStrainSkill;

/// Memorisation of object positions while only a small area is visible.
pub type Flashlight = Decaying<FlashlightStrain>;

#[derive(Clone, Debug)]
pub struct FlashlightStrain {
    has_hidden_mod: bool,
    scaling_factor: f64,
    time_preempt: f64,
    time_fade_in: f64,
}

impl FlashlightStrain {
    pub fn new(mods: &ModCombination, radius: f64, time_preempt: f64, time_fade_in: f64) -> Self {
        Self {
            has_hidden_mod: mods.hd(),
            scaling_factor: 52.0 / radius,
            time_preempt,
            time_fade_in,
        }
    }
}

impl StrainDecaySkill for FlashlightStrain {
    type DifficultyObject = OsuDifficultyObject;

    const SKILL_MULTIPLIER: f64 = 0.052;
    const STRAIN_DECAY_BASE: f64 = 0.15;

    fn strain_value_of(
        &mut self,
        curr: &OsuDifficultyObject,
        diff_objects: &[OsuDifficultyObject],
    ) -> f64 {
        FlashlightEvaluator::evaluate_diff_of(curr, diff_objects, self)
    }

    // Peaks are summed up instead of weighted.
    fn difficulty_value(&self, peaks: StrainsVec) -> f64 {
        peaks.sum() * Self::DIFFICULTY_MULTIPLIER
    }
}

impl OsuStrainSkill for FlashlightStrain {}

struct FlashlightEvaluator;

impl FlashlightEvaluator {
    const MAX_OPACITY_BONUS: f64 = 0.4;
    const HIDDEN_BONUS: f64 = 0.2;

    const MIN_VELOCITY: f64 = 0.5;
    const SLIDER_MULTIPLIER: f64 = 1.3;

    const MIN_ANGLE_MULTIPLIER: f64 = 0.2;

    fn evaluate_diff_of(
        curr: &OsuDifficultyObject,
        diff_objects: &[OsuDifficultyObject],
        skill: &FlashlightStrain,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let FlashlightStrain {
            has_hidden_mod: hidden,
            scaling_factor,
            time_preempt,
            time_fade_in,
        } = *skill;

        let osu_curr = curr;
        let osu_hit_obj = &curr.base;

        let mut small_dist_nerf = 1.0;
        let mut cumulative_strain_time = 0.0;

        let mut result = 0.0;

        let mut last_obj = osu_curr;

        let mut angle_repeat_count = 0.0;

        // * This is iterating backwards in time from the current object.
        for i in 0..curr.idx.min(10) {
            let Some(curr_obj) = curr.previous(i, diff_objects) else {
                break;
            };

            let curr_hit_obj = &curr_obj.base;

            if !curr_hit_obj.is_spinner() {
                let jump_dist =
                    f64::from((osu_hit_obj.stacked_pos - curr_hit_obj.stacked_end_pos).length());
                cumulative_strain_time += last_obj.strain_time;

                // * We want to nerf objects that can be easily seen within the Flashlight circle radius.
                if i == 0 {
                    small_dist_nerf = (jump_dist / 75.0).min(1.0);
                }

                // * We also want to nerf stacks so that only the first object of the stack is accounted for.
                let stack_nerf = ((curr_obj.lazy_jump_dist / scaling_factor) / 25.0).min(1.0);

                // * Bonus based on how visible the object is.
                let opacity_bonus = 1.0
                    + Self::MAX_OPACITY_BONUS
                        * (1.0
                            - osu_curr.opacity_at(
                                curr_hit_obj.start_time,
                                hidden,
                                time_preempt,
                                time_fade_in,
                            ));

                result += stack_nerf * opacity_bonus * scaling_factor * jump_dist
                    / cumulative_strain_time;

                if let Some((curr_obj_angle, osu_curr_angle)) = curr_obj.angle.zip(osu_curr.angle)
                {
                    // * Objects further back in time should count less for the nerf.
                    if (curr_obj_angle - osu_curr_angle).abs() < 0.02 {
                        angle_repeat_count += (1.0 - 0.1 * i as f64).max(0.0);
                    }
                }
            }

            last_obj = curr_obj;
        }

        let base = small_dist_nerf * result;
        result = base * base;

        // * Additional bonus for Hidden due to there being no approach circles.
        if hidden {
            result *= 1.0 + Self::HIDDEN_BONUS;
        }

        // * Nerf patterns with repeated angles.
        result *= Self::MIN_ANGLE_MULTIPLIER
            + (1.0 - Self::MIN_ANGLE_MULTIPLIER) / (angle_repeat_count + 1.0);

        let mut slider_bonus = 0.0;

        if let OsuBaseObjectKind::Slider {
            repeat_count,
            lazy_travel_dist,
        } = osu_curr.base.kind
        {
            // * Invert the scaling factor to determine the true travel distance independent of circle size.
            let pixel_travel_dist = f64::from(lazy_travel_dist) / scaling_factor;

            // * Reward sliders based on velocity.
            slider_bonus = (pixel_travel_dist / osu_curr.travel_time - Self::MIN_VELOCITY)
                .max(0.0)
                .sqrt();

            // * Longer sliders require more memorisation.
            slider_bonus *= pixel_travel_dist;

            // * Nerf sliders with repeats, as less memorisation is required.
            if repeat_count > 0 {
                slider_bonus /= (repeat_count + 1) as f64;
            }
        }

        result += slider_bonus * Self::SLIDER_MULTIPLIER;

        result
    }
}
