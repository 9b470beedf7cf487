use crate::{
    error::{Error, Result},
    model::{
        beatmap::Beatmap,
        control_point::{DifficultyPoint, TimingPoint},
        hit_object::{HitObject, HitObjectKind, HitSoundType, Pos, Slider, Spinner},
        mode::GameMode,
    },
    util::float_ext::FloatExt,
};

const VELOCITY_MULTIPLIER: f32 = 1.4;
const OSU_BASE_SCORING_DIST: f32 = 100.0;

/// Create an osu!taiko copy of an osu!standard map.
///
/// Sliders that are short enough turn into a series of hits, all other
/// sliders stay as drum rolls. Hold notes become swells.
pub fn convert(map: &Beatmap) -> Result<Beatmap> {
    if map.mode != GameMode::Osu || map.is_convert {
        return Err(Error::IncompatibleMode {
            from: map.mode,
            to: GameMode::Taiko,
        });
    }

    let mut objects = Vec::with_capacity(map.hit_objects.len());

    for (idx, h) in map.hit_objects.iter().enumerate() {
        let sound = map.hit_sound(idx);

        match h.kind {
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => objects.push((h.clone(), sound)),
            HitObjectKind::Slider(ref slider) => {
                let params = SliderParams::new(map, h.start_time, slider);

                if params.converts_to_hits {
                    push_hit_series(&mut objects, h.start_time, slider, sound, &params);
                } else {
                    objects.push((h.clone(), sound));
                }
            }
            HitObjectKind::Hold(hold) => {
                let swell = HitObject {
                    pos: h.pos,
                    start_time: h.start_time,
                    kind: HitObjectKind::Spinner(Spinner {
                        duration: hold.duration,
                    }),
                };

                objects.push((swell, sound));
            }
        }
    }

    // Stable so that simultaneous objects keep their order
    objects.sort_by(|(a, _), (b, _)| a.start_time.total_cmp(&b.start_time));

    let (hit_objects, hit_sounds) = objects.into_iter().unzip();

    Ok(Beatmap {
        mode: GameMode::Taiko,
        is_convert: true,
        hit_objects,
        hit_sounds,
        ..map.clone_without_objects()
    })
}

fn push_hit_series(
    objects: &mut Vec<(HitObject, HitSoundType)>,
    start_time: f64,
    slider: &Slider,
    sound: HitSoundType,
    params: &SliderParams,
) {
    let end_time = start_time + params.duration + params.tick_spacing / 8.0;
    let edge_sound_count = slider.node_sounds.len().max(1);

    let mut time = start_time;
    let mut i = 0;

    while time <= end_time {
        let sound = slider.node_sounds.get(i).copied().unwrap_or(sound);
        objects.push((HitObject::circle(Pos::default(), time), sound));

        if params.tick_spacing.eq(0.0) {
            break;
        }

        time += params.tick_spacing;
        i = (i + 1) % edge_sound_count;
    }
}

struct SliderParams {
    duration: f64,
    tick_spacing: f64,
    converts_to_hits: bool,
}

impl SliderParams {
    fn new(map: &Beatmap, start_time: f64, slider: &Slider) -> Self {
        // * The true distance, accounting for any repeats. This ends up being the drum roll distance later
        let spans = slider.span_count() as f64;
        let mut dist = slider.expected_dist.unwrap_or(0.0);

        // * Do not combine the following two lines!
        dist *= f64::from(VELOCITY_MULTIPLIER);
        dist *= spans;

        let timing_beat_len = map
            .timing_point_at(start_time)
            .map_or(TimingPoint::DEFAULT_BEAT_LEN, |point| point.beat_len);

        let slider_velocity = map
            .difficulty_point_at(start_time)
            .map_or(DifficultyPoint::DEFAULT_SLIDER_VELOCITY, |point| {
                point.slider_velocity
            });

        let mut beat_len = precision_adjusted_beat_len(slider_velocity, timing_beat_len);

        let slider_scoring_point_dist = f64::from(OSU_BASE_SCORING_DIST)
            * (map.slider_multiplier * f64::from(VELOCITY_MULTIPLIER))
            / map.slider_tick_rate;

        // * The velocity and duration of the taiko hit object - calculated as the velocity of a drum roll.
        let taiko_vel = slider_scoring_point_dist * map.slider_tick_rate;
        let duration = f64::from((dist / taiko_vel * beat_len) as u32);

        let osu_vel = taiko_vel * (f64::from(1000.0_f32) / beat_len);

        // * osu-stable always uses the speed-adjusted beatlength to determine the osu! velocity, but only uses it for conversion if beatmap version < 8
        if map.version >= 8 {
            beat_len = timing_beat_len;
        }

        // * If the drum roll is to be split into hit circles, assume the ticks are 1/8 spaced within the duration of one beat
        let tick_spacing = (beat_len / map.slider_tick_rate).min(duration / spans);

        Self {
            duration,
            tick_spacing,
            converts_to_hits: tick_spacing > 0.0 && dist / osu_vel * 1000.0 < 2.0 * beat_len,
        }
    }
}

fn precision_adjusted_beat_len(slider_velocity: f64, beat_len: f64) -> f64 {
    let slider_velocity_as_beat_len = -100.0 / slider_velocity;

    let bpm_multiplier = if slider_velocity_as_beat_len < 0.0 {
        f64::from(((-slider_velocity_as_beat_len) as f32).clamp(10.0, 10_000.0)) / 100.0
    } else {
        1.0
    };

    beat_len * bpm_multiplier
}
