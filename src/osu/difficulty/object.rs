use crate::{
    any::difficulty::object::IDifficultyObject,
    model::hit_object::Pos,
    osu::object::{OsuObject, OsuObjectKind},
};

use super::{scaling_factor::ScalingFactor, HD_FADE_OUT_DURATION_MULTIPLIER};

/// The data of an [`OsuObject`] that skills read.
///
/// Copied so that difficulty objects don't borrow the converted objects.
#[derive(Copy, Clone, Debug)]
pub struct OsuBaseObject {
    /// Start time without clock rate adjustments.
    pub start_time: f64,
    pub stacked_pos: Pos,
    pub stacked_end_pos: Pos,
    pub kind: OsuBaseObjectKind,
}

#[derive(Copy, Clone, Debug)]
pub enum OsuBaseObjectKind {
    Circle,
    Slider {
        repeat_count: usize,
        lazy_travel_dist: f32,
    },
    Spinner,
}

impl OsuBaseObject {
    fn new(h: &OsuObject) -> Self {
        let kind = match h.kind {
            OsuObjectKind::Circle => OsuBaseObjectKind::Circle,
            OsuObjectKind::Slider(ref slider) => OsuBaseObjectKind::Slider {
                repeat_count: slider.repeat_count(),
                lazy_travel_dist: slider.lazy_travel_dist,
            },
            OsuObjectKind::Spinner { .. } => OsuBaseObjectKind::Spinner,
        };

        Self {
            start_time: h.start_time,
            stacked_pos: h.stacked_pos(),
            stacked_end_pos: h.stacked_end_pos(),
            kind,
        }
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, OsuBaseObjectKind::Slider { .. })
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, OsuBaseObjectKind::Spinner)
    }
}

pub struct OsuDifficultyObject {
    pub idx: usize,
    pub base: OsuBaseObject,
    pub start_time: f64,
    pub delta_time: f64,

    pub strain_time: f64,
    pub lazy_jump_dist: f64,
    pub min_jump_dist: f64,
    pub min_jump_time: f64,
    pub travel_dist: f64,
    pub travel_time: f64,
    pub angle: Option<f64>,
}

impl OsuDifficultyObject {
    pub const NORMALIZED_RADIUS: i32 = 50;

    pub const MIN_DELTA_TIME: f64 = 25.0;
    const MAX_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 2.4;
    const ASSUMED_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 1.8;

    pub fn new(
        hit_object: &OsuObject,
        last_object: &OsuObject,
        last_last_object: Option<&OsuObject>,
        clock_rate: f64,
        idx: usize,
        scaling_factor: &ScalingFactor,
    ) -> Self {
        let delta_time = (hit_object.start_time - last_object.start_time) / clock_rate;
        let start_time = hit_object.start_time / clock_rate;

        // * Capped to 25ms to prevent difficulty calculation breaking from simultaneous objects.
        let strain_time = delta_time.max(Self::MIN_DELTA_TIME);

        let mut this = Self {
            idx,
            base: OsuBaseObject::new(hit_object),
            start_time,
            delta_time,
            strain_time,
            lazy_jump_dist: 0.0,
            min_jump_dist: 0.0,
            min_jump_time: 0.0,
            travel_dist: 0.0,
            travel_time: 0.0,
            angle: None,
        };

        this.set_distances(
            hit_object,
            last_object,
            last_last_object,
            clock_rate,
            scaling_factor,
        );

        this
    }

    pub fn opacity_at(&self, time: f64, hidden: bool, time_preempt: f64, time_fade_in: f64) -> f64 {
        if time > self.base.start_time {
            // * Consider a hitobject as being invisible when its start time is passed.
            // * In reality the hitobject will be visible beyond its start time up until its hittable window has passed,
            // * but this is an approximation and such a case is unlikely to be hit where this function is used.
            return 0.0;
        }

        let fade_in_start_time = self.base.start_time - time_preempt;
        let fade_in_duration = time_fade_in;

        if hidden {
            // * Taken from OsuModHidden.
            let fade_out_start_time = self.base.start_time - time_preempt + time_fade_in;
            let fade_out_duration = time_preempt * HD_FADE_OUT_DURATION_MULTIPLIER;

            (((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0))
                .min(1.0 - ((time - fade_out_start_time) / fade_out_duration).clamp(0.0, 1.0))
        } else {
            ((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0)
        }
    }

    fn set_distances(
        &mut self,
        hit_object: &OsuObject,
        last_object: &OsuObject,
        last_last_object: Option<&OsuObject>,
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) {
        if let OsuObjectKind::Slider(ref slider) = hit_object.kind {
            self.travel_dist = f64::from(
                slider.lazy_travel_dist
                    * ((1.0 + slider.repeat_count() as f64 / 2.5).powf(1.0 / 2.5)) as f32,
            );

            self.travel_time =
                (hit_object.lazy_travel_time() / clock_rate).max(Self::MIN_DELTA_TIME);
        }

        if hit_object.is_spinner() || last_object.is_spinner() {
            return;
        }

        let scaling_factor = scaling_factor.factor;

        let last_cursor_pos = Self::get_end_cursor_pos(last_object);

        self.lazy_jump_dist = f64::from(
            (hit_object.stacked_pos() * scaling_factor - last_cursor_pos * scaling_factor).length(),
        );
        self.min_jump_time = self.strain_time;
        self.min_jump_dist = self.lazy_jump_dist;

        if let OsuObjectKind::Slider(ref last_slider) = last_object.kind {
            let last_travel_time =
                (last_object.lazy_travel_time() / clock_rate).max(Self::MIN_DELTA_TIME);
            self.min_jump_time = (self.strain_time - last_travel_time).max(Self::MIN_DELTA_TIME);

            // * There are two types of slider-to-object patterns to consider in order to better approximate the real movement a player will take to jump between the hitobjects.
            // *
            // * 1. The anti-flow pattern, where players cut the slider short in order to move to the next hitobject.
            // *
            // *      <======o==>  ← slider
            // *             |     ← most natural jump path
            // *             o     ← a follow-up hitcircle
            // *
            // * In this case the most natural jump path is approximated by LazyJumpDistance.
            // *
            // * 2. The flow pattern, where players follow through the slider to its visual extent into the next hitobject.
            // *
            // *      <======o==>---o
            // *                  ↑
            // *        most natural jump path
            // *
            // * In this case the most natural jump path is better approximated by a new distance called "tailJumpDistance" - the distance between the slider's tail and the next hitobject.
            // *
            // * Thus, the player is assumed to jump the minimum of these two distances in all cases.
            let tail_pos = last_slider.tail().map_or(last_object.pos, |tail| tail.pos);
            let stacked_tail_pos = tail_pos + last_object.stack_offset;

            let tail_jump_dist =
                (stacked_tail_pos - hit_object.stacked_pos()).length() * scaling_factor;

            let diff = f64::from(Self::MAX_SLIDER_RADIUS - Self::ASSUMED_SLIDER_RADIUS);
            let min = f64::from(tail_jump_dist - Self::MAX_SLIDER_RADIUS);
            self.min_jump_dist = ((self.lazy_jump_dist - diff).min(min)).max(0.0);
        }

        if let Some(last_last_object) = last_last_object.filter(|h| !h.is_spinner()) {
            let last_last_cursor_pos = Self::get_end_cursor_pos(last_last_object);

            let v1 = last_last_cursor_pos - last_object.stacked_pos();
            let v2 = hit_object.stacked_pos() - last_cursor_pos;

            let dot = v1.dot(v2);
            let det = v1.x * v2.y - v1.y * v2.x;

            self.angle = Some((f64::from(det).atan2(f64::from(dot))).abs());
        }
    }

    /// Move a lazy cursor along the slider's nested objects and store the
    /// resulting end position and travel distance.
    ///
    /// Must run once per object after stacking and before any
    /// [`OsuDifficultyObject`] is created.
    pub fn compute_slider_cursor_pos(h: &mut OsuObject, radius: f64) {
        let pos = h.pos;
        let stack_offset = h.stack_offset;

        let OsuObjectKind::Slider(ref mut slider) = h.kind else {
            return;
        };

        let mut curr_cursor_pos = pos + stack_offset;
        let scaling_factor = f64::from(Self::NORMALIZED_RADIUS) / radius;
        let nested_len = slider.nested_objects.len();

        for (i, curr_movement_obj) in slider.nested_objects.iter().enumerate() {
            let is_last = i + 1 == nested_len;

            let mut curr_movement = curr_movement_obj.pos + stack_offset - curr_cursor_pos;
            let mut curr_movement_len = scaling_factor * f64::from(curr_movement.length());

            // * Amount of movement required so that the cursor position needs to be updated.
            let mut required_movement = f64::from(Self::ASSUMED_SLIDER_RADIUS);

            if is_last {
                // * The end of a slider has special aim rules due to the relaxed time constraint on position.
                // * There is both a lazy end position as well as the actual end slider position. We assume the player takes the simpler movement.
                // * For sliders that are circular, the lazy end position may actually be farther away than the sliders true end.
                // * This code is designed to prevent buffing situations where lazy end is actually a less efficient movement.
                let lazy_movement = slider.lazy_end_pos - curr_cursor_pos;

                if lazy_movement.length() < curr_movement.length() {
                    curr_movement = lazy_movement;
                }

                curr_movement_len = scaling_factor * f64::from(curr_movement.length());
            } else if curr_movement_obj.is_repeat() {
                // * For a slider repeat, assume a tighter movement threshold to better assess repeat sliders.
                required_movement = f64::from(Self::NORMALIZED_RADIUS);
            }

            if curr_movement_len > required_movement {
                // * this finds the positional delta from the required radius and the current position, and updates the currCursorPosition accordingly, as well as rewarding distance.
                curr_cursor_pos += curr_movement
                    * ((curr_movement_len - required_movement) / curr_movement_len) as f32;
                curr_movement_len *= (curr_movement_len - required_movement) / curr_movement_len;
                slider.lazy_travel_dist += curr_movement_len as f32;
            }

            if is_last {
                slider.lazy_end_pos = curr_cursor_pos;
            }
        }
    }

    fn get_end_cursor_pos(hit_object: &OsuObject) -> Pos {
        if let OsuObjectKind::Slider(ref slider) = hit_object.kind {
            slider.lazy_end_pos
        } else {
            hit_object.stacked_pos()
        }
    }
}

impl IDifficultyObject for OsuDifficultyObject {
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
