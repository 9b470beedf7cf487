use crate::model::{
    beatmap::Beatmap,
    hit_object::{HitObject, HitSoundType},
};

/// A hit object reduced to what osu!taiko difficulty cares about.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TaikoObject {
    pub start_time: f64,
    pub end_time: f64,
    pub hit_type: HitType,
}

impl TaikoObject {
    pub fn new(h: &HitObject, is_rim: bool) -> Self {
        Self {
            start_time: h.start_time,
            end_time: h.end_time(),
            hit_type: if !h.is_circle() {
                HitType::NonHit
            } else if is_rim {
                HitType::Rim
            } else {
                HitType::Center
            },
        }
    }

    /// All objects of a map, rim-ness is read from the hit sounds.
    pub fn from_map(map: &Beatmap) -> Box<[Self]> {
        map.hit_objects
            .iter()
            .enumerate()
            .map(|(i, h)| Self::new(h, is_rim(map.hit_sound(i))))
            .collect()
    }

    pub const fn is_hit(&self) -> bool {
        self.hit_type.is_hit()
    }
}

/// Claps and whistles turn a hit into a rim.
pub fn is_rim(sound: HitSoundType) -> bool {
    sound.has_flag(HitSoundType::CLAP | HitSoundType::WHISTLE)
}

/// A hit sound from its bitflags as stored in `.osu` files.
#[cfg(test)]
pub(crate) fn hit_sound(bits: u8) -> HitSoundType {
    bits.to_string().parse().unwrap()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitType {
    Center,
    Rim,
    NonHit,
}

impl HitType {
    pub const fn is_hit(self) -> bool {
        !matches!(self, Self::NonHit)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::hit_object::{HitObjectKind, Pos, Spinner};

    use super::*;

    #[test]
    fn hit_types_from_sounds() {
        let map = Beatmap {
            hit_objects: vec![
                HitObject::circle(Pos::default(), 0.0),
                HitObject::circle(Pos::default(), 100.0),
                HitObject {
                    pos: Pos::default(),
                    start_time: 200.0,
                    kind: HitObjectKind::Spinner(Spinner { duration: 500.0 }),
                },
            ],
            hit_sounds: vec![hit_sound(HitSoundType::NORMAL), hit_sound(HitSoundType::CLAP)],
            ..Default::default()
        };

        let objects = TaikoObject::from_map(&map);

        assert_eq!(objects[0].hit_type, HitType::Center);
        assert_eq!(objects[1].hit_type, HitType::Rim);
        assert_eq!(objects[2].hit_type, HitType::NonHit);
        assert!((objects[2].end_time - 700.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rim_sounds() {
        assert!(!is_rim(HitSoundType::default()));
        assert!(!is_rim(hit_sound(HitSoundType::FINISH)));
        assert!(is_rim(hit_sound(HitSoundType::WHISTLE)));
        assert!(is_rim(hit_sound(HitSoundType::CLAP | HitSoundType::FINISH)));
    }
}
