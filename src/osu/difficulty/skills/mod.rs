use crate::{
    any::difficulty::skills::Skill,
    model::{beatmap::BeatmapAttributes, mods::ModCombination},
    osu::object::OsuObject,
};

use self::{
    aim::{Aim, AimStrain},
    flashlight::{Flashlight, FlashlightStrain},
    speed::Speed,
};

use super::{
    object::OsuDifficultyObject, scaling_factor::ScalingFactor, HD_FADE_IN_DURATION_MULTIPLIER,
};

pub mod aim;
pub mod flashlight;
pub mod speed;
pub mod strain;

pub struct OsuSkills {
    pub aim: Skill<Aim>,
    pub aim_no_sliders: Skill<Aim>,
    pub speed: Skill<Speed>,
    /// Only present with the flashlight mod.
    pub flashlight: Option<Skill<Flashlight>>,
}

impl OsuSkills {
    pub fn new(
        mods: &ModCombination,
        scaling_factor: &ScalingFactor,
        map_attrs: &BeatmapAttributes,
        time_preempt: f64,
    ) -> Self {
        // * Preempt time can go below 450ms. Normally, this is achieved via the DT mod
        // * which uniformly speeds up all animations game wide regardless of AR.
        // * This uniform speedup is hard to match 1:1, however we can at least make
        // * AR>10 (via mods) feel good by extending the upper linear function above.
        // * Note that this doesn't exactly match the AR>10 visuals as they're
        // * classically known, but it feels good.
        // * This adjustment is necessary for AR>10, otherwise TimePreempt can
        // * become smaller leading to hitcircles not fully fading in.
        let time_fade_in = if mods.hd() {
            time_preempt * HD_FADE_IN_DURATION_MULTIPLIER
        } else {
            400.0 * (time_preempt / OsuObject::PREEMPT_MIN).min(1.0)
        };

        let flashlight = mods.fl().then(|| {
            let inner =
                FlashlightStrain::new(mods, scaling_factor.radius, time_preempt, time_fade_in);

            Skill::new(Flashlight::new(inner))
        });

        Self {
            aim: Skill::new(Aim::new(AimStrain::new(true))),
            aim_no_sliders: Skill::new(Aim::new(AimStrain::new(false))),
            speed: Skill::new(Speed::new(map_attrs.hit_windows.od)),
            flashlight,
        }
    }

    pub fn process(&mut self, curr: &OsuDifficultyObject, diff_objects: &[OsuDifficultyObject]) {
        self.aim.process(curr, diff_objects);
        self.aim_no_sliders.process(curr, diff_objects);
        self.speed.process(curr, diff_objects);

        if let Some(ref mut flashlight) = self.flashlight {
            flashlight.process(curr, diff_objects);
        }
    }
}
