use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use rosu_mods::GameModsLegacy;

/// Broad categories of what a mod changes about gameplay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModCapability {
    /// Changes the playback speed.
    AdjustsRate,
    /// Changes the beatmap's difficulty settings.
    AdjustsDifficulty,
    /// Changes positions or kinds of hit objects.
    AdjustsObjects,
    /// Changes how much of the playfield is visible.
    AdjustsVisibility,
    /// Changes how the player interacts with the game.
    AdjustsInput,
}

/// A single legacy gameplay modifier.
#[derive(Copy, Clone, PartialEq)]
pub struct GameMod {
    pub acronym: &'static str,
    /// The legacy bit value.
    pub bits: GameModsLegacy,
    /// Bits of all mods that cannot be combined with this one.
    pub incompatible: u32,
    /// Score multiplier.
    pub multiplier: f64,
    pub capabilities: &'static [ModCapability],
}

macro_rules! game_mod {
    ( $name:ident, $acronym:literal, $bits:ident, $incompatible:expr, $multiplier:literal, [ $( $capability:ident ),* ] ) => {
        pub const $name: Self = Self {
            acronym: $acronym,
            bits: GameModsLegacy::$bits,
            incompatible: $incompatible,
            multiplier: $multiplier,
            capabilities: &[ $( ModCapability::$capability ),* ],
        };
    };
}

impl GameMod {
    game_mod!(NO_FAIL, "NF", NoFail, Self::SD | Self::RX | Self::AP | Self::PF, 0.5, [AdjustsInput]);
    game_mod!(EASY, "EZ", Easy, Self::HR, 0.5, [AdjustsDifficulty]);
    game_mod!(TOUCH_DEVICE, "TD", TouchDevice, 0, 1.0, [AdjustsInput]);
    game_mod!(HIDDEN, "HD", Hidden, 0, 1.06, [AdjustsVisibility]);
    game_mod!(HARD_ROCK, "HR", HardRock, Self::EZ, 1.06, [AdjustsDifficulty, AdjustsObjects]);
    game_mod!(SUDDEN_DEATH, "SD", SuddenDeath, Self::NF | Self::RX | Self::AP | Self::PF, 1.0, []);
    game_mod!(DOUBLE_TIME, "DT", DoubleTime, Self::HT | Self::NC, 1.12, [AdjustsRate]);
    game_mod!(RELAX, "RX", Relax, Self::NF | Self::SD | Self::AP | Self::PF, 0.0, [AdjustsInput]);
    game_mod!(HALF_TIME, "HT", HalfTime, Self::DT | Self::NC, 0.3, [AdjustsRate]);
    game_mod!(NIGHTCORE, "NC", Nightcore, Self::DT | Self::HT, 1.12, [AdjustsRate]);
    game_mod!(FLASHLIGHT, "FL", Flashlight, 0, 1.12, [AdjustsVisibility]);
    game_mod!(SPUN_OUT, "SO", SpunOut, Self::AP, 0.9, [AdjustsInput]);
    game_mod!(AUTOPILOT, "AP", Autopilot, Self::NF | Self::SD | Self::RX | Self::PF | Self::SO, 0.0, [AdjustsInput]);
    game_mod!(PERFECT, "PF", Perfect, Self::NF | Self::SD | Self::RX | Self::AP, 1.0, []);

    const EZ: u32 = 1 << 1;
    const HR: u32 = 1 << 4;
    const SD: u32 = 1 << 5;
    const NF: u32 = 1 << 0;
    const DT: u32 = 1 << 6;
    const RX: u32 = 1 << 7;
    const HT: u32 = 1 << 8;
    const NC: u32 = 1 << 9;
    const SO: u32 = 1 << 12;
    const AP: u32 = 1 << 13;
    const PF: u32 = 1 << 14;

    /// All known mods in order of their bits.
    pub const ALL: [Self; 14] = [
        Self::NO_FAIL,
        Self::EASY,
        Self::TOUCH_DEVICE,
        Self::HIDDEN,
        Self::HARD_ROCK,
        Self::SUDDEN_DEATH,
        Self::DOUBLE_TIME,
        Self::RELAX,
        Self::HALF_TIME,
        Self::NIGHTCORE,
        Self::FLASHLIGHT,
        Self::SPUN_OUT,
        Self::AUTOPILOT,
        Self::PERFECT,
    ];

    /// Whether the two mods may be enabled at the same time.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.incompatible & other.bits.bits() == 0 && other.incompatible & self.bits.bits() == 0
    }

    pub fn has_capability(&self, capability: ModCapability) -> bool {
        self.capabilities.contains(&capability)
    }
}

impl Debug for GameMod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.acronym)
    }
}

impl Display for GameMod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.acronym)
    }
}

/// An immutable set of mods and their combined bits.
#[derive(Clone, PartialEq)]
pub struct ModCombination {
    mods: Vec<GameMod>,
    bits: GameModsLegacy,
}

impl ModCombination {
    /// The combination without any mods.
    pub const fn new() -> Self {
        Self {
            mods: Vec::new(),
            bits: GameModsLegacy::NoMod,
        }
    }

    /// Collect all known mods whose bits are set.
    ///
    /// Unknown bits are ignored.
    pub fn from_bits(bits: u32) -> Self {
        Self::from_legacy(GameModsLegacy::from_bits(bits))
    }

    /// Collect all mods of `legacy` that are part of [`GameMod::ALL`].
    pub fn from_legacy(legacy: GameModsLegacy) -> Self {
        let mods: Vec<_> = GameMod::ALL
            .into_iter()
            .filter(|m| legacy.contains(m.bits))
            .collect();

        let bits = mods
            .iter()
            .fold(GameModsLegacy::NoMod, |bits, m| bits | m.bits);

        Self { mods, bits }
    }

    /// The union of all contained mods' bits.
    pub fn bits(&self) -> u32 {
        self.bits.bits()
    }

    pub const fn legacy(&self) -> GameModsLegacy {
        self.bits
    }

    /// Whether all mods of `legacy` are contained.
    pub fn has(&self, legacy: GameModsLegacy) -> bool {
        self.bits.contains(legacy)
    }

    pub fn mods(&self) -> &[GameMod] {
        &self.mods
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Playback rate of the contained rate adjusting mod, `1.0` if there is
    /// none.
    pub fn clock_rate(&self) -> f64 {
        self.bits.clock_rate()
    }

    /// Product of all score multipliers.
    pub fn multiplier(&self) -> f64 {
        self.mods.iter().map(|m| m.multiplier).product()
    }

    /// Whether `m` is compatible with every contained mod and not contained
    /// already.
    pub fn accepts(&self, m: &GameMod) -> bool {
        self.bits() & m.bits.bits() == 0 && self.mods.iter().all(|curr| curr.is_compatible_with(m))
    }

    /// Add a mod.
    ///
    /// Returns `false` and leaves the combination unchanged if the mod is not
    /// [accepted].
    ///
    /// [accepted]: ModCombination::accepts
    pub fn push(&mut self, m: GameMod) -> bool {
        if !self.accepts(&m) {
            return false;
        }

        self.bits = self.bits | m.bits;
        self.mods.push(m);

        true
    }

    pub fn any_capability(&self, capability: ModCapability) -> bool {
        self.mods.iter().any(|m| m.has_capability(capability))
    }

    pub fn nf(&self) -> bool {
        self.has(GameModsLegacy::NoFail)
    }

    pub fn ez(&self) -> bool {
        self.has(GameModsLegacy::Easy)
    }

    pub fn td(&self) -> bool {
        self.has(GameModsLegacy::TouchDevice)
    }

    pub fn hd(&self) -> bool {
        self.has(GameModsLegacy::Hidden)
    }

    pub fn hr(&self) -> bool {
        self.has(GameModsLegacy::HardRock)
    }

    pub fn rx(&self) -> bool {
        self.has(GameModsLegacy::Relax)
    }

    pub fn fl(&self) -> bool {
        self.has(GameModsLegacy::Flashlight)
    }

    pub fn so(&self) -> bool {
        self.has(GameModsLegacy::SpunOut)
    }

    /// Difficulty settings multiplier of EZ and HR.
    pub fn od_ar_hp_multiplier(&self) -> f64 {
        if self.hr() {
            1.4
        } else if self.ez() {
            0.5
        } else {
            1.0
        }
    }
}

impl Debug for ModCombination {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(&self.mods).finish()
    }
}

impl Display for ModCombination {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.mods.is_empty() {
            return f.write_str("NM");
        }

        for m in self.mods.iter() {
            f.write_str(m.acronym)?;
        }

        Ok(())
    }
}

impl Default for ModCombination {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u32> for ModCombination {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl From<GameModsLegacy> for ModCombination {
    fn from(legacy: GameModsLegacy) -> Self {
        Self::from_legacy(legacy)
    }
}

struct Frame {
    combination: ModCombination,
    next: usize,
}

/// Lazy enumeration of all combinations of the given mod groups.
///
/// The empty combination comes first. Afterwards, every combination is
/// extended by each later group that is compatible with it, depth first.
/// A group is skipped if any of its mods is incompatible with, or already
/// part of, the combination so far.
pub struct ModCombinations<'a> {
    groups: &'a [&'a [GameMod]],
    stack: Vec<Frame>,
    started: bool,
}

impl<'a> ModCombinations<'a> {
    pub fn new(groups: &'a [&'a [GameMod]]) -> Self {
        Self {
            groups,
            stack: Vec::with_capacity(groups.len() + 1),
            started: false,
        }
    }

    fn extend(combination: &ModCombination, group: &[GameMod]) -> Option<ModCombination> {
        let mut next = combination.clone();

        group.iter().all(|m| next.push(*m)).then_some(next)
    }
}

impl Iterator for ModCombinations<'_> {
    type Item = ModCombination;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            self.stack.push(Frame {
                combination: ModCombination::new(),
                next: 0,
            });

            return Some(ModCombination::new());
        }

        loop {
            let frame = self.stack.last_mut()?;

            let Some(group) = self.groups.get(frame.next) else {
                self.stack.pop();

                continue;
            };

            frame.next += 1;

            let Some(combination) = Self::extend(&frame.combination, group) else {
                continue;
            };

            let next = frame.next;

            self.stack.push(Frame {
                combination: combination.clone(),
                next,
            });

            return Some(combination);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn bits_of(groups: &[&[GameMod]]) -> Vec<u32> {
        ModCombinations::new(groups).map(|c| c.bits()).collect()
    }

    #[test]
    fn from_bits_ignores_unknown() {
        let mods = ModCombination::from_bits(8 + 16 + (1 << 30));

        assert_eq!(mods.bits(), 24);
        assert!(mods.hd() && mods.hr());
        assert_eq!(mods.to_string(), "HDHR");
    }

    #[test]
    fn legacy_conversion() {
        let legacy = GameModsLegacy::Hidden | GameModsLegacy::DoubleTime;
        let mods = ModCombination::from(legacy);

        assert_eq!(mods.legacy(), legacy);
        assert_eq!(mods.to_string(), "HDDT");
        assert!(mods.has(GameModsLegacy::DoubleTime));
        assert!(!mods.has(GameModsLegacy::DoubleTime | GameModsLegacy::HardRock));
    }

    #[test]
    fn clock_rates() {
        assert!((ModCombination::from_bits(64).clock_rate() - 1.5).abs() < f64::EPSILON);
        assert!((ModCombination::from_bits(256).clock_rate() - 0.75).abs() < f64::EPSILON);
        assert!((ModCombination::new().clock_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn push_rejects_incompatible() {
        let mut mods = ModCombination::new();

        assert!(mods.push(GameMod::EASY));
        assert!(!mods.push(GameMod::HARD_ROCK));
        assert!(!mods.push(GameMod::EASY));
        assert_eq!(mods.legacy(), GameModsLegacy::Easy);
    }

    #[test]
    fn three_compatible_mods() {
        let groups: &[&[GameMod]] = &[
            &[GameMod::HIDDEN],
            &[GameMod::HARD_ROCK],
            &[GameMod::DOUBLE_TIME],
        ];

        let bits = bits_of(groups);

        assert_eq!(bits.len(), 8);
        assert_eq!(bits[0], 0);
        assert_eq!(bits.iter().collect::<HashSet<_>>().len(), 8);
    }

    #[test]
    fn incompatible_pair_reduces_count() {
        let groups: &[&[GameMod]] = &[
            &[GameMod::HIDDEN],
            &[GameMod::EASY],
            &[GameMod::HARD_ROCK],
        ];

        // Every subset except those with both EZ and HR
        assert_eq!(bits_of(groups).len(), 6);
    }

    #[test]
    fn shared_flag_groups() {
        let groups: &[&[GameMod]] = &[
            &[GameMod::FLASHLIGHT],
            &[GameMod::FLASHLIGHT, GameMod::HIDDEN],
        ];

        assert_eq!(bits_of(groups), [0, 1024, 1024 + 8]);
    }

    #[test]
    fn independent_iterators() {
        let groups: &[&[GameMod]] = &[&[GameMod::DOUBLE_TIME], &[GameMod::HALF_TIME]];

        let mut a = ModCombinations::new(groups);
        let b = ModCombinations::new(groups);

        assert_eq!(a.next().map(|c| c.bits()), Some(0));
        assert_eq!(b.map(|c| c.bits()).collect::<Vec<_>>(), [0, 64, 256]);
        assert_eq!(a.map(|c| c.bits()).collect::<Vec<_>>(), [64, 256]);
    }

    proptest! {
        #[test]
        fn no_duplicates_and_all_compatible(
            subset in prop::sample::subsequence(GameMod::ALL.to_vec(), 0..=8)
        ) {
            let singles: Vec<[GameMod; 1]> = subset.into_iter().map(|m| [m]).collect();
            let groups: Vec<&[GameMod]> = singles.iter().map(|m| m.as_slice()).collect();

            let mut seen = HashSet::new();

            for combination in ModCombinations::new(&groups) {
                prop_assert!(seen.insert(combination.bits()));

                for (i, a) in combination.mods().iter().enumerate() {
                    for b in combination.mods()[i + 1..].iter() {
                        prop_assert!(a.is_compatible_with(b));
                    }
                }
            }

            // Sets of pairwise compatible mods are closed under removal so
            // counting them directly must agree
            let n = groups.len();
            let expected = (0_u32..1 << n)
                .filter(|subset| {
                    (0..n).all(|i| {
                        (i + 1..n).all(|j| {
                            subset & (1 << i) == 0
                                || subset & (1 << j) == 0
                                || singles[i][0].is_compatible_with(&singles[j][0])
                        })
                    })
                })
                .count();

            prop_assert_eq!(seen.len(), expected);
        }
    }
}
