use crate::{
    model::{
        beatmap::Beatmap,
        control_point::{DifficultyPoint, TimingPoint},
        curve::CurveBuffers,
        hit_object::{HitObject, HitObjectKind, HoldNote, Spinner},
    },
    util::sort,
};

/// A note or hold note in a column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ManiaObject {
    pub start_time: f64,
    pub end_time: f64,
    pub column: usize,
}

impl ManiaObject {
    const BASE_SCORING_DIST: f64 = 100.0;

    pub fn new(h: &HitObject, total_columns: f32, params: &mut ObjectParams<'_>) -> Self {
        let column = Self::column(h.pos.x, total_columns);

        let duration = match h.kind {
            HitObjectKind::Circle => 0.0,
            HitObjectKind::Slider(ref slider) => {
                let dist = slider.curve(&mut params.curve_bufs).dist();

                let beat_len = params
                    .map
                    .timing_point_at(h.start_time)
                    .map_or(TimingPoint::DEFAULT_BEAT_LEN, |point| point.beat_len);

                let slider_velocity = params
                    .map
                    .difficulty_point_at(h.start_time)
                    .map_or(DifficultyPoint::DEFAULT_SLIDER_VELOCITY, |point| {
                        point.slider_velocity
                    });

                let scoring_dist =
                    Self::BASE_SCORING_DIST * params.map.slider_multiplier * slider_velocity;
                let velocity = scoring_dist / beat_len;

                (slider.span_count() as f64) * dist / velocity
            }
            HitObjectKind::Spinner(Spinner { duration })
            | HitObjectKind::Hold(HoldNote { duration }) => duration,
        };

        Self {
            start_time: h.start_time,
            end_time: h.start_time + duration,
            column,
        }
    }

    /// All objects of a map sorted by their rounded start time.
    pub fn from_map(map: &Beatmap) -> Box<[Self]> {
        let total_columns = Self::total_columns(map);
        let mut params = ObjectParams::new(map);

        let mut objects: Vec<_> = map
            .hit_objects
            .iter()
            .map(|h| Self::new(h, total_columns, &mut params))
            .collect();

        sort::osu_legacy(&mut objects, |a, b| {
            let rounded = |h: &Self| h.start_time.round_ties_even() as i32;

            rounded(a).cmp(&rounded(b))
        });

        objects.into_boxed_slice()
    }

    /// The combo of the note plus a hold tick every 100ms.
    pub fn max_combo(&self) -> u32 {
        1 + ((self.end_time - self.start_time) / 100.0) as u32
    }

    pub fn total_columns(map: &Beatmap) -> f32 {
        map.cs.round_ties_even().max(1.0)
    }

    pub fn column(x: f32, total_columns: f32) -> usize {
        let x_divisor = 512.0 / total_columns;

        (x / x_divisor).floor().clamp(0.0, total_columns - 1.0) as usize
    }
}

pub struct ObjectParams<'a> {
    map: &'a Beatmap,
    curve_bufs: CurveBuffers,
}

impl<'a> ObjectParams<'a> {
    pub fn new(map: &'a Beatmap) -> Self {
        Self {
            map,
            curve_bufs: CurveBuffers::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::hit_object::Pos;

    use super::*;

    #[test]
    fn columns() {
        assert_eq!(ManiaObject::column(0.0, 4.0), 0);
        assert_eq!(ManiaObject::column(127.0, 4.0), 0);
        assert_eq!(ManiaObject::column(128.0, 4.0), 1);
        assert_eq!(ManiaObject::column(512.0, 4.0), 3);
        assert_eq!(ManiaObject::column(-5.0, 7.0), 0);
    }

    #[test]
    fn holds_add_combo() {
        let map = Beatmap {
            cs: 4.0,
            hit_objects: vec![
                HitObject::circle(Pos::new(64.0, 192.0), 0.0),
                HitObject {
                    pos: Pos::new(192.0, 192.0),
                    start_time: 100.0,
                    kind: HitObjectKind::Hold(HoldNote { duration: 550.0 }),
                },
            ],
            ..Default::default()
        };

        let objects = ManiaObject::from_map(&map);
        let max_combo: u32 = objects.iter().map(ManiaObject::max_combo).sum();

        assert_eq!(max_combo, 2 + 5);
        assert_eq!(objects[1].column, 1);
        assert!((objects[1].end_time - 650.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sorted_by_rounded_start_time() {
        let map = Beatmap {
            cs: 4.0,
            hit_objects: vec![
                HitObject::circle(Pos::new(448.0, 192.0), 100.4),
                HitObject::circle(Pos::new(64.0, 192.0), 99.6),
                HitObject::circle(Pos::new(192.0, 192.0), 50.0),
            ],
            ..Default::default()
        };

        let objects = ManiaObject::from_map(&map);
        let columns: Vec<_> = objects.iter().map(|h| h.column).collect();

        // 100.4 and 99.6 both round to 100
        assert_eq!(columns, [1, 3, 0]);
    }
}
