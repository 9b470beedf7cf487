use crate::{
    catch::CatchDifficultyAttributes,
    mania::ManiaDifficultyAttributes,
    model::{mode::GameMode, mods::ModCombination},
    osu::OsuDifficultyAttributes,
    taiko::TaikoDifficultyAttributes,
};

/// The result of a difficulty calculation based on the mode.
#[derive(Clone, Debug, PartialEq)]
pub enum DifficultyAttributes {
    /// osu!standard difficulty calculation result.
    Osu(OsuDifficultyAttributes),
    /// osu!taiko difficulty calculation result.
    Taiko(TaikoDifficultyAttributes),
    /// osu!catch difficulty calculation result.
    Catch(CatchDifficultyAttributes),
    /// osu!mania difficulty calculation result.
    Mania(ManiaDifficultyAttributes),
}

impl DifficultyAttributes {
    /// The star value.
    pub const fn stars(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.stars,
            Self::Taiko(attrs) => attrs.stars,
            Self::Catch(attrs) => attrs.stars,
            Self::Mania(attrs) => attrs.stars,
        }
    }

    /// The maximum combo of the map.
    pub const fn max_combo(&self) -> u32 {
        match self {
            Self::Osu(attrs) => attrs.max_combo,
            Self::Taiko(attrs) => attrs.max_combo,
            Self::Catch(attrs) => attrs.max_combo(),
            Self::Mania(attrs) => attrs.max_combo,
        }
    }

    /// The mods that were used for the calculation.
    pub const fn mods(&self) -> &ModCombination {
        match self {
            Self::Osu(attrs) => &attrs.mods,
            Self::Taiko(attrs) => &attrs.mods,
            Self::Catch(attrs) => &attrs.mods,
            Self::Mania(attrs) => &attrs.mods,
        }
    }

    /// The mode of the calculation.
    pub const fn mode(&self) -> GameMode {
        match self {
            Self::Osu(_) => GameMode::Osu,
            Self::Taiko(_) => GameMode::Taiko,
            Self::Catch(_) => GameMode::Catch,
            Self::Mania(_) => GameMode::Mania,
        }
    }
}

macro_rules! from_mode_attrs {
    ( $mode:ident: $attrs:ident ) => {
        impl From<$attrs> for DifficultyAttributes {
            fn from(attrs: $attrs) -> Self {
                Self::$mode(attrs)
            }
        }
    };
}

from_mode_attrs!(Osu: OsuDifficultyAttributes);
from_mode_attrs!(Taiko: TaikoDifficultyAttributes);
from_mode_attrs!(Catch: CatchDifficultyAttributes);
from_mode_attrs!(Mania: ManiaDifficultyAttributes);
