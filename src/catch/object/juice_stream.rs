use crate::{
    catch::PLAYFIELD_WIDTH,
    model::{
        beatmap::Beatmap,
        control_point::{DifficultyPoint, TimingPoint},
        curve::CurveBuffers,
        hit_object::{HitObject, Slider},
    },
};

use super::palpable::{PalpableKind, PalpableObject};

/// Summary of a slider after its fruits and droplets have been created.
pub struct JuiceStream {
    /// Horizontal position of the last control point.
    pub end_x: f32,
    /// Amount of droplets and tiny droplets.
    pub n_droplets: usize,
}

impl JuiceStream {
    pub const BASE_SCORING_DIST: f64 = 100.0;

    /// Push the fruits and droplets of the slider onto `objects`.
    pub fn new(
        h: &HitObject,
        slider: &Slider,
        map: &Beatmap,
        bufs: &mut JuiceStreamBufs,
        objects: &mut Vec<PalpableObject>,
    ) -> Self {
        let start_time = h.start_time;
        let x = clamp_to_playfield(h.pos.x);

        let beat_len = map
            .timing_point_at(start_time)
            .map_or(TimingPoint::DEFAULT_BEAT_LEN, |point| point.beat_len);

        let slider_velocity = map
            .difficulty_point_at(start_time)
            .map_or(DifficultyPoint::DEFAULT_SLIDER_VELOCITY, |point| {
                point.slider_velocity
            });

        let path = slider.curve(&mut bufs.curve);

        let velocity =
            Self::BASE_SCORING_DIST * map.slider_multiplier / beat_len * slider_velocity;
        let tick_dist = Self::BASE_SCORING_DIST * map.slider_multiplier / map.slider_tick_rate
            * slider_velocity;

        let span_duration = path.dist() / velocity;

        SliderEvent::generate(
            start_time,
            span_duration,
            velocity,
            tick_dist,
            path.dist(),
            slider.span_count(),
            &mut bufs.events,
        );

        let mut n_droplets = 0;
        let mut last_event_time = None;

        for e in bufs.events.iter() {
            let tiny_droplets = last_event_time.map_or(0, |last| tiny_droplets_within(e.time - last));
            last_event_time = Some(e.time);
            n_droplets += tiny_droplets as usize;

            let kind = if let SliderEventKind::Tick = e.kind {
                n_droplets += 1;

                PalpableKind::Droplet
            } else {
                PalpableKind::Fruit
            };

            let pos = clamp_to_playfield(x + path.position_at(e.path_progress).x);

            objects.push(PalpableObject {
                tiny_droplets,
                ..PalpableObject::new(pos, e.time, kind)
            });
        }

        let end_x = h.pos.x
            + slider
                .control_points
                .last()
                .map_or(0.0, |point| point.pos.x);

        Self { end_x, n_droplets }
    }
}

fn clamp_to_playfield(value: f32) -> f32 {
    value.clamp(0.0, PLAYFIELD_WIDTH)
}

fn tiny_droplets_within(since_last_tick: f64) -> u32 {
    if since_last_tick <= 80.0 {
        return 0;
    }

    let mut time_between_tiny = since_last_tick;

    while time_between_tiny > 100.0 {
        time_between_tiny /= 2.0;
    }

    let mut t = time_between_tiny;
    let mut count = 0;

    while t < since_last_tick {
        count += 1;
        t += time_between_tiny;
    }

    count
}

/// Buffers that are reused across all juice streams of a map.
#[derive(Default)]
pub struct JuiceStreamBufs {
    pub curve: CurveBuffers,
    events: Vec<SliderEvent>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SliderEventKind {
    Head,
    Tick,
    Repeat,
    Tail,
}

#[derive(Copy, Clone, Debug)]
struct SliderEvent {
    kind: SliderEventKind,
    time: f64,
    path_progress: f64,
}

impl SliderEvent {
    /// * A very lenient maximum length of a slider for ticks to be generated.
    const MAX_LEN: f64 = 100_000.0;

    /// Fill `events` with the head, ticks, repeats, and tail of a slider in
    /// chronological order.
    fn generate(
        start_time: f64,
        span_duration: f64,
        velocity: f64,
        tick_dist: f64,
        total_dist: f64,
        span_count: usize,
        events: &mut Vec<Self>,
    ) {
        events.clear();

        events.push(Self {
            kind: SliderEventKind::Head,
            time: start_time,
            path_progress: 0.0,
        });

        let len = total_dist.min(Self::MAX_LEN);
        let tick_dist = tick_dist.clamp(0.0, len);
        let min_dist_from_end = velocity * 10.0;

        for span in 0..span_count {
            let span_start_time = start_time + span as f64 * span_duration;
            let reversed = span % 2 == 1;
            let ticks_start = events.len();

            if tick_dist > 0.0 {
                let mut d = tick_dist;

                while d <= len && d < len - min_dist_from_end {
                    let path_progress = d / len;
                    let time_progress = if reversed {
                        1.0 - path_progress
                    } else {
                        path_progress
                    };

                    events.push(Self {
                        kind: SliderEventKind::Tick,
                        time: span_start_time + time_progress * span_duration,
                        path_progress,
                    });

                    d += tick_dist;
                }
            }

            if reversed {
                events[ticks_start..].reverse();
            }

            if span < span_count - 1 {
                events.push(Self {
                    kind: SliderEventKind::Repeat,
                    time: span_start_time + span_duration,
                    path_progress: ((span + 1) % 2) as f64,
                });
            }
        }

        events.push(Self {
            kind: SliderEventKind::Tail,
            time: start_time + span_count as f64 * span_duration,
            path_progress: (span_count % 2) as f64,
        });
    }
}
