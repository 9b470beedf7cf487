use crate::{
    error::{Error, Result},
    model::{
        beatmap::Beatmap,
        hit_object::{HitObjectKind, HoldNote, Spinner},
        mode::GameMode,
    },
    util::{float_ext::FloatExt, random::osu::Random},
};

use super::{
    catcher::Catcher,
    object::{
        banana_shower::BananaShower,
        juice_stream::{JuiceStream, JuiceStreamBufs},
        palpable::{PalpableKind, PalpableObject},
    },
    PLAYFIELD_WIDTH,
};

const RNG_SEED: i32 = 1337;

/// Create an osu!catch copy of an osu!standard map.
///
/// Objects stay as they are, they are only turned into fruits and droplets
/// once the mods of a calculation are known.
pub fn convert(map: &Beatmap) -> Result<Beatmap> {
    if map.mode != GameMode::Osu || map.is_convert {
        return Err(Error::IncompatibleMode {
            from: map.mode,
            to: GameMode::Catch,
        });
    }

    Ok(Beatmap {
        mode: GameMode::Catch,
        is_convert: true,
        ..map.clone()
    })
}

/// Turn all hit objects into fruits and droplets, sorted by start time and
/// with hyper dashes initialized.
pub fn convert_objects(map: &Beatmap, hr_offsets: bool, cs: f32) -> Vec<PalpableObject> {
    let mut palpable_objects = Vec::with_capacity(map.hit_objects.len());
    let mut bufs = JuiceStreamBufs::default();

    let mut rng = Random::new(RNG_SEED);
    let mut last_pos = None;
    let mut last_start_time = 0.0;

    for h in map.hit_objects.iter() {
        match h.kind {
            HitObjectKind::Circle => {
                let mut fruit = PalpableObject::new(h.pos.x, h.start_time, PalpableKind::Fruit);

                if hr_offsets {
                    apply_hr_offset(&mut fruit, &mut last_pos, &mut last_start_time, &mut rng);
                }

                palpable_objects.push(fruit);
            }
            HitObjectKind::Slider(ref slider) => {
                let stream = JuiceStream::new(h, slider, map, &mut bufs, &mut palpable_objects);

                last_pos = Some(stream.end_x);
                last_start_time = h.start_time;

                for _ in 0..stream.n_droplets {
                    rng.next_int();
                }
            }
            HitObjectKind::Spinner(Spinner { duration })
            | HitObjectKind::Hold(HoldNote { duration }) => {
                let shower = BananaShower::new(h.start_time, h.start_time + duration);

                for _ in 0..shower.n_bananas {
                    rng.next_double();
                    rng.next_int();
                    rng.next_int();
                    rng.next_int();
                }
            }
        }
    }

    palpable_objects.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    initialize_hyper_dash(cs, &mut palpable_objects);

    palpable_objects
}

fn apply_hr_offset(
    fruit: &mut PalpableObject,
    last_pos: &mut Option<f32>,
    last_start_time: &mut f64,
    rng: &mut Random,
) {
    let mut offset_pos = fruit.x;

    let last = match *last_pos {
        Some(pos) if pos.abs() >= f32::EPSILON => pos,
        Some(_) | None => {
            *last_pos = Some(offset_pos);
            *last_start_time = fruit.start_time;

            return;
        }
    };

    let pos_diff = offset_pos - last;
    let time_diff = (fruit.start_time - *last_start_time) as i32;

    if time_diff > 1000 {
        *last_pos = Some(offset_pos);
        *last_start_time = fruit.start_time;

        return;
    }

    if pos_diff.eq(0.0) {
        apply_random_offset(&mut offset_pos, f64::from(time_diff) / 4.0, rng);
        fruit.x_offset = offset_pos - fruit.x;

        return;
    }

    if pos_diff.abs() < (time_diff / 3) as f32 {
        apply_offset(&mut offset_pos, pos_diff);
    }

    fruit.x_offset = offset_pos - fruit.x;

    *last_pos = Some(offset_pos);
    *last_start_time = fruit.start_time;
}

fn apply_random_offset(pos: &mut f32, max_offset: f64, rng: &mut Random) {
    let right = rng.next_bool();
    let rand = (rng.next_double_range(0.0, max_offset.max(0.0)) as f32).min(20.0);

    if right {
        if *pos + rand <= PLAYFIELD_WIDTH {
            *pos += rand;
        } else {
            *pos -= rand;
        }
    } else if *pos - rand >= 0.0 {
        *pos -= rand;
    } else {
        *pos += rand;
    }
}

fn apply_offset(pos: &mut f32, amount: f32) {
    if amount > 0.0 {
        if *pos + amount < PLAYFIELD_WIDTH {
            *pos += amount;
        }
    } else if *pos + amount > 0.0 {
        *pos += amount;
    }
}

fn initialize_hyper_dash(cs: f32, palpable_objects: &mut [PalpableObject]) {
    let half_catcher_width = f64::from(Catcher::calculate_catch_width(cs) / 2.0)
        / f64::from(Catcher::ALLOWED_CATCH_RANGE);

    let mut last_dir = 0;
    let mut last_excess = half_catcher_width;

    for i in 0..palpable_objects.len().saturating_sub(1) {
        let next = &palpable_objects[i + 1];
        let curr = &palpable_objects[i];

        let this_dir = if next.effective_x() > curr.effective_x() {
            1
        } else {
            -1
        };

        // * Int truncation added to match osu!stable.
        let time_to_next = f64::from(
            (next.start_time as i32 - curr.start_time as i32) as f32 - 1000.0 / 60.0 / 4.0,
        );

        let dist_to_next = f64::from((next.effective_x() - curr.effective_x()).abs())
            - if last_dir == this_dir {
                last_excess
            } else {
                half_catcher_width
            };

        let dist_to_hyper = (time_to_next * Catcher::BASE_SPEED - dist_to_next) as f32;

        let curr = &mut palpable_objects[i];

        if dist_to_hyper < 0.0 {
            curr.hyper_dash = true;
            last_excess = half_catcher_width;
        } else {
            curr.dist_to_hyper_dash = dist_to_hyper;
            last_excess = f64::from(dist_to_hyper).clamp(0.0, half_catcher_width);
        }

        last_dir = this_dir;
    }
}

#[cfg(test)]
mod tests {
    use crate::model::hit_object::{HitObject, Pos};

    use super::*;

    fn fruits(positions: &[(f32, f64)]) -> Beatmap {
        Beatmap {
            hit_objects: positions
                .iter()
                .map(|&(x, time)| HitObject::circle(Pos::new(x, 0.0), time))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn convert_keeps_objects() {
        let map = fruits(&[(0.0, 0.0), (512.0, 100.0)]);
        let converted = convert(&map).unwrap();

        assert_eq!(converted.mode, GameMode::Catch);
        assert!(converted.is_convert);
        assert_eq!(converted.hit_objects, map.hit_objects);
        assert!(convert(&converted).is_err());
    }

    #[test]
    fn far_jumps_are_hyper_dashes() {
        let map = fruits(&[(0.0, 0.0), (512.0, 100.0), (512.0, 2000.0)]);
        let objects = convert_objects(&map, false, 5.0);

        assert!(objects[0].hyper_dash);
        assert!(!objects[1].hyper_dash);
        assert!(objects[1].dist_to_hyper_dash > 0.0);
        assert!(!objects[2].hyper_dash);
    }

    #[test]
    fn hr_offsets_move_stacked_fruits() {
        let map = fruits(&[(256.0, 0.0), (256.0, 200.0), (256.0, 400.0)]);

        let plain = convert_objects(&map, false, 5.0);
        assert!(plain.iter().all(|h| h.x_offset.eq(0.0)));

        let hr = convert_objects(&map, true, 5.0);
        assert!(hr[0].x_offset.eq(0.0));
        assert!(hr.iter().all(|h| h.x_offset.abs() <= 20.0));
        assert!(hr.iter().all(|h| h.x.eq(256.0)));
    }

    #[test]
    fn bananas_are_not_palpable() {
        let mut map = fruits(&[(100.0, 0.0)]);

        map.hit_objects.push(HitObject {
            pos: Pos::new(256.0, 192.0),
            start_time: 500.0,
            kind: HitObjectKind::Spinner(Spinner { duration: 1000.0 }),
        });

        assert_eq!(convert_objects(&map, true, 5.0).len(), 1);
    }
}
