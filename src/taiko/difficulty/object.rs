use crate::{
    any::difficulty::object::IDifficultyObject,
    taiko::object::{HitType, TaikoObject},
};

use super::{colour::TaikoDifficultyColour, rhythm::HitObjectRhythm};

#[derive(Clone, Debug)]
pub struct TaikoDifficultyObject {
    pub idx: usize,
    pub start_time: f64,
    pub delta_time: f64,
    pub base_hit_type: HitType,
    pub rhythm: HitObjectRhythm,
    /// Filled in once all objects are created.
    pub colour: TaikoDifficultyColour,
}

impl TaikoDifficultyObject {
    pub fn new(
        h: &TaikoObject,
        last: &TaikoObject,
        last_last: &TaikoObject,
        clock_rate: f64,
        idx: usize,
    ) -> Self {
        let delta_time = (h.start_time - last.start_time) / clock_rate;
        let prev_delta_time = (last.start_time - last_last.start_time) / clock_rate;

        Self {
            idx,
            start_time: h.start_time / clock_rate,
            delta_time,
            base_hit_type: h.hit_type,
            rhythm: HitObjectRhythm::closest(delta_time, prev_delta_time),
            colour: TaikoDifficultyColour::default(),
        }
    }

    pub const fn is_hit(&self) -> bool {
        self.base_hit_type.is_hit()
    }
}

impl IDifficultyObject for TaikoDifficultyObject {
    fn idx(&self) -> usize {
        self.idx
    }

    fn start_time(&self) -> f64 {
        self.start_time
    }

    fn delta_time(&self) -> f64 {
        self.delta_time
    }
}
