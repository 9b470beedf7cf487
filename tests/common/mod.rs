#![allow(dead_code)]

use rosu_sr::model::{
    beatmap::Beatmap,
    control_point::TimingPoint,
    hit_object::{
        HitObject, HitObjectKind, HitSoundType, HoldNote, PathControlPoint, Pos, Slider, Spinner,
    },
    mode::GameMode,
};

/// Assert that two floats differ by less than `margin`.
#[track_caller]
pub fn assert_eq_float(actual: f64, expected: f64, margin: f64) {
    assert!(
        (actual - expected).abs() < margin,
        "\nCalculated: {actual} | Expected: {expected}\n \
        => {diff} difference ({margin} allowed)\n",
        diff = (actual - expected).abs(),
    );
}

/// A hit sound from its bitflags as stored in `.osu` files.
pub fn hit_sound(bits: u8) -> HitSoundType {
    bits.to_string().parse().unwrap()
}

pub fn slider(pos: Pos, start_time: f64, end: Pos, repeats: usize) -> HitObject {
    let offset = end - pos;

    HitObject {
        pos,
        start_time,
        kind: HitObjectKind::Slider(Slider {
            expected_dist: Some(f64::from(offset.length())),
            repeats,
            control_points: vec![
                PathControlPoint::new(Pos::new(0.0, 0.0)),
                PathControlPoint::new(offset),
            ]
            .into_boxed_slice(),
            node_sounds: vec![HitSoundType::default(); repeats + 2].into_boxed_slice(),
        }),
    }
}

pub fn spinner(start_time: f64, duration: f64) -> HitObject {
    HitObject {
        pos: Pos::new(256.0, 192.0),
        start_time,
        kind: HitObjectKind::Spinner(Spinner { duration }),
    }
}

/// An osu!standard map of `n` objects with jumps, a slider every fifth
/// object, and a final spinner.
pub fn osu_map(n: usize) -> Beatmap {
    let mut hit_objects = Vec::with_capacity(n + 1);
    let mut time = 1000.0;

    for i in 0..n {
        let x = if i % 2 == 0 { 96.0 } else { 416.0 };
        let pos = Pos::new(x, 96.0 + 8.0 * (i % 24) as f32);

        if i % 5 == 4 {
            hit_objects.push(slider(pos, time, Pos::new(256.0, 192.0), i % 2));
            time += 600.0;
        } else {
            hit_objects.push(HitObject::circle(pos, time));
            time += 250.0;
        }
    }

    hit_objects.push(spinner(time + 500.0, 2000.0));

    Beatmap {
        od: 8.0,
        ar: 9.0,
        timing_points: vec![TimingPoint::new(0.0, 500.0)],
        hit_objects,
        ..Default::default()
    }
}

/// An osu!taiko map of `n` hits alternating in pairs of centres and rims.
pub fn taiko_map(n: usize) -> Beatmap {
    let hit_objects = (0..n)
        .map(|i| HitObject::circle(Pos::new(256.0, 192.0), 1000.0 + 150.0 * i as f64))
        .collect();

    let hit_sounds = (0..n)
        .map(|i| {
            if i % 4 < 2 {
                hit_sound(HitSoundType::NORMAL)
            } else {
                hit_sound(HitSoundType::CLAP)
            }
        })
        .collect();

    Beatmap {
        mode: GameMode::Taiko,
        timing_points: vec![TimingPoint::new(0.0, 600.0)],
        hit_objects,
        hit_sounds,
        ..Default::default()
    }
}

/// An osu!mania map of `n` notes rolling over `keys` columns with a hold
/// note every eighth object.
pub fn mania_map(keys: u8, n: usize) -> Beatmap {
    let column_width = 512.0 / f32::from(keys);

    let hit_objects = (0..n)
        .map(|i| {
            let column = (i % usize::from(keys)) as f32;
            let pos = Pos::new(column_width * (column + 0.5), 192.0);
            let start_time = 1000.0 + 120.0 * i as f64;

            if i % 8 == 7 {
                HitObject {
                    pos,
                    start_time,
                    kind: HitObjectKind::Hold(HoldNote { duration: 400.0 }),
                }
            } else {
                HitObject::circle(pos, start_time)
            }
        })
        .collect();

    Beatmap {
        mode: GameMode::Mania,
        cs: f32::from(keys),
        od: 8.0,
        timing_points: vec![TimingPoint::new(0.0, 500.0)],
        hit_objects,
        ..Default::default()
    }
}

/// An empty map of the given mode.
pub fn empty_map(mode: GameMode) -> Beatmap {
    Beatmap {
        mode,
        ..Default::default()
    }
}
