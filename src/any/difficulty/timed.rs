use std::cmp::Ordering;

use crate::{
    any::DifficultyAttributes,
    catch::CatchTimedDifficulty,
    mania::ManiaTimedDifficulty,
    osu::OsuTimedDifficulty,
    taiko::TaikoTimedDifficulty,
};

/// Difficulty attributes after processing all objects up to `time`.
///
/// Instances are ordered by their time only. Non-finite times are ordered
/// after all finite times.
#[derive(Clone, Debug)]
pub struct TimedDifficultyAttributes {
    /// Clock rate adjusted end time of the last processed object.
    pub time: f64,
    pub attributes: DifficultyAttributes,
}

impl PartialEq for TimedDifficultyAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimedDifficultyAttributes {}

impl PartialOrd for TimedDifficultyAttributes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimedDifficultyAttributes {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.time.is_finite(), other.time.is_finite()) {
            (true, true) => self.time.total_cmp(&other.time),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
    }
}

/// Lazily calculate difficulty attributes after every object.
///
/// Each call of [`Iterator::next`] processes one more object and returns the
/// attributes of everything processed so far.
pub enum TimedDifficulty {
    Osu(OsuTimedDifficulty),
    Taiko(TaikoTimedDifficulty),
    Catch(CatchTimedDifficulty),
    Mania(ManiaTimedDifficulty),
}

macro_rules! dispatch {
    ( $self:ident, $timed:ident => $expr:expr ) => {
        match $self {
            Self::Osu($timed) => $expr,
            Self::Taiko($timed) => $expr,
            Self::Catch($timed) => $expr,
            Self::Mania($timed) => $expr,
        }
    };
}

impl Iterator for TimedDifficulty {
    type Item = TimedDifficultyAttributes;

    fn next(&mut self) -> Option<Self::Item> {
        dispatch!(self, timed => timed.next().map(|(time, attrs)| TimedDifficultyAttributes {
            time,
            attributes: attrs.into(),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();

        (len, Some(len))
    }
}

impl ExactSizeIterator for TimedDifficulty {
    fn len(&self) -> usize {
        dispatch!(self, timed => timed.len())
    }
}
