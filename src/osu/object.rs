use crate::model::{
    beatmap::Beatmap,
    control_point::{DifficultyPoint, TimingPoint},
    curve::CurveBuffers,
    hit_object::{HitObject, HitObjectKind, HoldNote, Pos, Slider, Spinner},
};

use super::PLAYFIELD_BASE_SIZE;

pub struct OsuObject {
    pub pos: Pos,
    pub start_time: f64,
    pub stack_height: i32,
    pub stack_offset: Pos,
    pub kind: OsuObjectKind,
}

impl OsuObject {
    pub const OBJECT_RADIUS: f32 = 64.0;
    pub const PREEMPT_MIN: f64 = 450.0;

    const BASE_SCORING_DIST: f32 = 100.0;

    pub fn new(
        h: &HitObject,
        map: &Beatmap,
        curve_bufs: &mut CurveBuffers,
        ticks_buf: &mut Vec<(Pos, f64)>,
    ) -> Self {
        let kind = match h.kind {
            HitObjectKind::Circle => OsuObjectKind::Circle,
            HitObjectKind::Slider(ref slider) => {
                OsuObjectKind::Slider(OsuSlider::new(h, slider, map, curve_bufs, ticks_buf))
            }
            HitObjectKind::Spinner(Spinner { duration })
            | HitObjectKind::Hold(HoldNote { duration }) => OsuObjectKind::Spinner {
                end_time: h.start_time + duration,
            },
        };

        Self {
            pos: h.pos,
            start_time: h.start_time,
            stack_height: 0,
            stack_offset: Pos::default(),
            kind,
        }
    }

    pub fn reflect_vertically(&mut self) {
        fn reflect_y(y: &mut f32) {
            *y = PLAYFIELD_BASE_SIZE.y - *y;
        }

        reflect_y(&mut self.pos.y);

        if let OsuObjectKind::Slider(ref mut slider) = self.kind {
            // Requires `stack_offset` so we can't add `h.pos` just yet
            slider.lazy_end_pos.y = -slider.lazy_end_pos.y;

            for nested in slider.nested_objects.iter_mut() {
                if let NestedSliderObjectKind::Tail = nested.kind {
                    // The tail is still relative to the head
                    nested.pos = self.pos + Pos::new(nested.pos.x, -nested.pos.y);
                } else {
                    reflect_y(&mut nested.pos.y);
                }
            }
        }
    }

    pub fn finalize_tail(&mut self) {
        if let OsuObjectKind::Slider(ref mut slider) = self.kind {
            if let Some(tail) = slider.tail_mut() {
                tail.pos += self.pos;
            }
        }
    }

    pub const fn end_time(&self) -> f64 {
        match self.kind {
            OsuObjectKind::Circle => self.start_time,
            OsuObjectKind::Slider(ref slider) => slider.end_time,
            OsuObjectKind::Spinner { end_time } => end_time,
        }
    }

    pub fn stacked_pos(&self) -> Pos {
        self.pos + self.stack_offset
    }

    pub fn end_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => self.pos,
            OsuObjectKind::Slider(ref slider) => slider.tail().map_or(self.pos, |tail| tail.pos),
        }
    }

    pub fn stacked_end_pos(&self) -> Pos {
        self.end_pos() + self.stack_offset
    }

    pub fn lazy_travel_time(&self) -> f64 {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => 0.0,
            OsuObjectKind::Slider(ref slider) => slider
                .nested_objects
                // Here we really want the last nested object which is not
                // necessarily the tail
                .last()
                .map_or(0.0, |nested| nested.start_time - self.start_time),
        }
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Slider(_))
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Spinner { .. })
    }
}

pub enum OsuObjectKind {
    Circle,
    Slider(OsuSlider),
    Spinner { end_time: f64 },
}

pub struct OsuSlider {
    pub end_time: f64,
    pub lazy_end_pos: Pos,
    pub lazy_travel_dist: f32,
    pub nested_objects: Vec<NestedSliderObject>,
}

impl OsuSlider {
    const LEGACY_LAST_TICK_OFFSET: f64 = 36.0;

    /// * A very lenient maximum length of a slider for ticks to be generated.
    /// * This exists for edge cases such as /b/1573664 where the beatmap has
    /// * been edited by the user, and should never be reached in normal usage.
    const MAX_LEN: f64 = 100_000.0;

    fn new(
        h: &HitObject,
        slider: &Slider,
        map: &Beatmap,
        curve_bufs: &mut CurveBuffers,
        ticks_buf: &mut Vec<(Pos, f64)>,
    ) -> Self {
        let start_time = h.start_time;

        let beat_len = map
            .timing_point_at(start_time)
            .map_or(TimingPoint::DEFAULT_BEAT_LEN, |point| point.beat_len);

        let (slider_velocity, generate_ticks) = map.difficulty_point_at(start_time).map_or(
            (
                DifficultyPoint::DEFAULT_SLIDER_VELOCITY,
                DifficultyPoint::DEFAULT_GENERATE_TICKS,
            ),
            |point| (point.slider_velocity, point.generate_ticks),
        );

        let path = slider.curve(curve_bufs);

        let span_count = slider.span_count() as f64;

        let scoring_dist =
            f64::from(OsuObject::BASE_SCORING_DIST) * map.slider_multiplier * slider_velocity;
        let velocity = scoring_dist / beat_len;

        let end_time = start_time + span_count * path.dist() / velocity;
        let duration = end_time - start_time;
        let span_duration = duration / span_count;

        // * prior to v8, speed multipliers don't adjust for how many ticks are generated over the same distance.
        // * this results in more (or less) ticks being generated in <v8 maps for the same time duration.
        let tick_dist_multiplier = if map.version < 8 {
            slider_velocity.recip()
        } else {
            1.0
        };

        let len = path.dist().min(Self::MAX_LEN);

        let tick_dist = if generate_ticks {
            scoring_dist / map.slider_tick_rate * tick_dist_multiplier
        } else {
            f64::INFINITY
        }
        .clamp(0.0, len);

        let min_dist_from_end = velocity * 10.0;

        ticks_buf.clear();

        // Ticks of the first span; the other spans reuse their positions
        if tick_dist > 0.0 {
            let mut curr_dist = tick_dist;

            while curr_dist < len - min_dist_from_end {
                let progress = curr_dist / len;

                ticks_buf.push((
                    h.pos + path.position_at(progress),
                    start_time + progress * span_duration,
                ));

                curr_dist += tick_dist;
            }
        }

        let mut nested_objects = Vec::with_capacity(ticks_buf.len() * slider.span_count() + 1);

        let ticks_iter = ticks_buf.iter().map(|&(pos, time)| NestedSliderObject {
            pos,
            start_time: time,
            kind: NestedSliderObjectKind::Tick,
        });

        nested_objects.extend(ticks_iter);

        for span_idx in 1..slider.span_count() {
            let reversed = span_idx % 2 == 1;
            let span_offset = span_idx as f64 * span_duration;

            nested_objects.push(NestedSliderObject {
                pos: h.pos + path.position_at(if reversed { 1.0 } else { 0.0 }),
                start_time: start_time + span_offset,
                kind: NestedSliderObjectKind::Repeat,
            });

            if reversed {
                // A tick at time `t` of the first span appears at
                // `start + (span_idx + 1) * span_duration - (t - start)`
                let base = start_time + start_time + span_duration;

                let ticks_iter = ticks_buf.iter().rev().map(|&(pos, time)| NestedSliderObject {
                    pos,
                    start_time: span_offset + base - time,
                    kind: NestedSliderObjectKind::Tick,
                });

                nested_objects.extend(ticks_iter);
            } else {
                let ticks_iter = ticks_buf.iter().map(|&(pos, time)| NestedSliderObject {
                    pos,
                    start_time: time + span_offset,
                    kind: NestedSliderObjectKind::Tick,
                });

                nested_objects.extend(ticks_iter);
            }
        }

        let final_span_start_time = start_time + slider.repeats as f64 * span_duration;
        let final_span_end_time = (start_time + duration / 2.0)
            .max(final_span_start_time + span_duration - Self::LEGACY_LAST_TICK_OFFSET);

        // * we need to use the LegacyLastTick here for compatibility reasons (difficulty).
        // * it is *okay* to use this because the TailCircle is not used for any meaningful purpose in gameplay.
        // * if this is to change, we should revisit this.
        let legacy_last_tick = NestedSliderObject {
            // no `h.pos` yet to keep order of float operations
            pos: path.position_at(if slider.repeats % 2 == 0 { 1.0 } else { 0.0 }),
            start_time: final_span_end_time,
            kind: NestedSliderObjectKind::Tail,
        };

        // On very short buzz sliders the legacy last tick is not necessarily
        // the last nested object
        let tail_idx = nested_objects
            .iter()
            .rposition(|nested| nested.start_time <= final_span_end_time)
            .map_or(0, |idx| idx + 1);

        nested_objects.insert(tail_idx, legacy_last_tick);

        let lazy_travel_time = nested_objects
            .last()
            .map_or(0.0, |nested| nested.start_time - start_time);

        let mut end_time_min = lazy_travel_time / span_duration;

        if end_time_min % 2.0 >= 1.0 {
            end_time_min = 1.0 - end_time_min % 1.0;
        } else {
            end_time_min %= 1.0;
        }

        // * temporary lazy end position until a real result can be derived.
        let lazy_end_pos = path.position_at(end_time_min);

        Self {
            end_time,
            lazy_end_pos,
            lazy_travel_dist: 0.0,
            nested_objects,
        }
    }

    pub fn repeat_count(&self) -> usize {
        self.nested_objects
            .iter()
            .filter(|nested| nested.is_repeat())
            .count()
    }

    pub fn tail(&self) -> Option<&NestedSliderObject> {
        self.nested_objects
            .iter()
            .rfind(|nested| matches!(nested.kind, NestedSliderObjectKind::Tail))
    }

    fn tail_mut(&mut self) -> Option<&mut NestedSliderObject> {
        self.nested_objects
            .iter_mut()
            .rfind(|nested| matches!(nested.kind, NestedSliderObjectKind::Tail))
    }
}

pub struct NestedSliderObject {
    pub pos: Pos,
    pub start_time: f64,
    pub kind: NestedSliderObjectKind,
}

impl NestedSliderObject {
    pub const fn is_repeat(&self) -> bool {
        matches!(self.kind, NestedSliderObjectKind::Repeat)
    }
}

pub enum NestedSliderObjectKind {
    Repeat,
    Tail,
    Tick,
}

#[cfg(test)]
mod tests {
    use crate::model::hit_object::{HitSoundType, PathControlPoint};

    use super::*;

    fn slider(repeats: usize, len: f32) -> HitObject {
        let control_points = vec![
            PathControlPoint::new(Pos::new(0.0, 0.0)),
            PathControlPoint::new(Pos::new(len, 0.0)),
        ];

        HitObject {
            pos: Pos::new(100.0, 100.0),
            start_time: 1000.0,
            kind: HitObjectKind::Slider(Slider {
                expected_dist: Some(f64::from(len)),
                repeats,
                control_points: control_points.into_boxed_slice(),
                node_sounds: vec![HitSoundType::default(); repeats + 2].into_boxed_slice(),
            }),
        }
    }

    fn convert(h: &HitObject) -> OsuObject {
        let map = Beatmap {
            timing_points: vec![TimingPoint::new(0.0, 500.0)],
            ..Default::default()
        };

        let mut h = OsuObject::new(h, &map, &mut CurveBuffers::default(), &mut Vec::new());
        h.finalize_tail();

        h
    }

    #[test]
    fn slider_nested_objects() {
        // velocity = 140 / 500 = 0.28 px/ms; tick distance = 140px
        let h = convert(&slider(1, 280.0));

        let OsuObjectKind::Slider(ref slider) = h.kind else {
            panic!("expected slider");
        };

        // 1000ms per span: tick, repeat, tick, legacy last tick
        assert_eq!(slider.nested_objects.len(), 4);
        assert_eq!(slider.repeat_count(), 1);
        assert!((h.end_time() - 3000.0).abs() < 1e-9);

        let times: Vec<_> = slider.nested_objects.iter().map(|n| n.start_time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]), "{times:?}");

        let tail = slider.tail().unwrap();
        assert!((tail.start_time - 2964.0).abs() < 1e-9);
        assert_eq!(tail.pos, Pos::new(100.0, 100.0));
    }

    #[test]
    fn reflected_slider() {
        let map = Beatmap::default();
        let mut h = OsuObject::new(
            &slider(0, 100.0),
            &map,
            &mut CurveBuffers::default(),
            &mut Vec::new(),
        );

        h.reflect_vertically();

        assert!((h.pos.y - (PLAYFIELD_BASE_SIZE.y - 100.0)).abs() < f32::EPSILON);
        assert_eq!(h.end_pos(), Pos::new(200.0, PLAYFIELD_BASE_SIZE.y - 100.0));
    }
}
