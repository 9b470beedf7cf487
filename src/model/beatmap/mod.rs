use crate::{
    catch::Catch,
    error::{Error, Result},
    model::mode::IGameMode,
    taiko::Taiko,
};

pub use self::attributes::{BeatmapAttributes, BeatmapAttributesBuilder, HitWindows};

use super::{
    control_point::{difficulty_point_at, timing_point_at, DifficultyPoint, TimingPoint},
    hit_object::{HitObject, HitSoundType},
    mode::{can_convert, GameMode},
};

mod attributes;

/// All beatmap data that is relevant for difficulty calculation.
///
/// Decoding `.osu` files is not part of this crate so the fields are public
/// to build maps programmatically.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    pub version: i32,
    pub is_convert: bool,

    // General
    pub stack_leniency: f32,
    pub mode: GameMode,

    // Difficulty
    pub ar: f32,
    pub cs: f32,
    pub hp: f32,
    pub od: f32,
    pub slider_multiplier: f64,
    pub slider_tick_rate: f64,

    // TimingPoints
    pub timing_points: Vec<TimingPoint>,
    pub difficulty_points: Vec<DifficultyPoint>,

    // HitObjects
    pub hit_objects: Vec<HitObject>,
    pub hit_sounds: Vec<HitSoundType>,
}

impl Beatmap {
    /// Returns a [`BeatmapAttributesBuilder`] to calculate modified beatmap
    /// attributes.
    pub fn attributes(&self) -> BeatmapAttributesBuilder {
        BeatmapAttributesBuilder::new().map(self)
    }

    /// Finds the [`TimingPoint`] that is active at the given time.
    pub(crate) fn timing_point_at(&self, time: f64) -> Option<&TimingPoint> {
        timing_point_at(&self.timing_points, time)
    }

    /// Finds the [`DifficultyPoint`] that is active at the given time.
    pub(crate) fn difficulty_point_at(&self, time: f64) -> Option<&DifficultyPoint> {
        difficulty_point_at(&self.difficulty_points, time)
    }

    /// The hit sound of the object at the given index.
    pub(crate) fn hit_sound(&self, idx: usize) -> HitSoundType {
        self.hit_sounds.get(idx).copied().unwrap_or_default()
    }

    /// A copy of all metadata without any objects.
    pub(crate) fn clone_without_objects(&self) -> Self {
        Self {
            timing_points: self.timing_points.clone(),
            difficulty_points: self.difficulty_points.clone(),
            hit_objects: Vec::new(),
            hit_sounds: Vec::new(),
            ..*self
        }
    }

    /// Create a copy of the map converted to the given mode.
    ///
    /// Conversions always start from the map as is, converting an already
    /// converted map fails.
    pub fn convert(&self, mode: GameMode) -> Result<Self> {
        let incompatible = Error::IncompatibleMode {
            from: self.mode,
            to: mode,
        };

        if self.mode == mode {
            return Ok(self.clone());
        } else if self.is_convert || !can_convert(self.mode, mode) {
            return Err(incompatible);
        }

        match mode {
            GameMode::Taiko => Taiko::convert(self),
            GameMode::Catch => Catch::convert(self),
            GameMode::Osu | GameMode::Mania => Err(incompatible),
        }
    }
}

const DEFAULT_STACK_LENIENCY: f32 = 0.7;
const LATEST_FORMAT_VERSION: i32 = 14;

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            version: LATEST_FORMAT_VERSION,
            is_convert: false,
            stack_leniency: DEFAULT_STACK_LENIENCY,
            mode: GameMode::default(),
            ar: 5.0,
            cs: 5.0,
            hp: 5.0,
            od: 5.0,
            slider_multiplier: 1.4,
            slider_tick_rate: 1.0,
            timing_points: Vec::default(),
            difficulty_points: Vec::default(),
            hit_objects: Vec::default(),
            hit_sounds: Vec::default(),
        }
    }
}
