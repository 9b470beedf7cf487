use crate::{
    any::{ModeDifficulty, TimedDifficulty},
    error::{Error, Result},
    model::{
        beatmap::Beatmap,
        hit_object::Pos,
        mode::{GameMode, IGameMode},
        mods::GameMod,
    },
};

pub use self::{
    attributes::OsuDifficultyAttributes, difficulty::timed::OsuTimedDifficulty,
    strains::OsuStrains,
};

mod attributes;
mod convert;
mod difficulty;
mod object;
mod strains;

const PLAYFIELD_BASE_SIZE: Pos = Pos::new(512.0, 384.0);

/// Marker type for [`GameMode::Osu`].
pub struct Osu;

impl IGameMode for Osu {
    const MODE: GameMode = GameMode::Osu;

    type DifficultyAttributes = OsuDifficultyAttributes;
    type Strains = OsuStrains;

    fn difficulty_mods() -> &'static [&'static [GameMod]] {
        &[
            &[GameMod::TOUCH_DEVICE],
            &[GameMod::DOUBLE_TIME],
            &[GameMod::HALF_TIME],
            &[GameMod::EASY],
            &[GameMod::HARD_ROCK],
            &[GameMod::FLASHLIGHT],
            &[GameMod::FLASHLIGHT, GameMod::HIDDEN],
        ]
    }

    fn convert(map: &Beatmap) -> Result<Beatmap> {
        Err(Error::IncompatibleMode {
            from: map.mode,
            to: GameMode::Osu,
        })
    }

    fn difficulty(difficulty: &ModeDifficulty, map: &Beatmap) -> Self::DifficultyAttributes {
        difficulty::difficulty(difficulty, map)
    }

    fn strains(difficulty: &ModeDifficulty, map: &Beatmap) -> Self::Strains {
        strains::strains(difficulty, map)
    }

    fn timed(difficulty: ModeDifficulty, map: &Beatmap) -> TimedDifficulty {
        TimedDifficulty::Osu(OsuTimedDifficulty::new(&difficulty, map))
    }
}
