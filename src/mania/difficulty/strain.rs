use crate::{
    any::difficulty::{
        object::IDifficultyObject,
        skills::{strain_decay, StrainSkill},
    },
    mania::difficulty::object::ManiaDifficultyObject,
};

const INDIVIDUAL_DECAY_BASE: f64 = 0.125;
const OVERALL_DECAY_BASE: f64 = 0.3;
const RELEASE_THRESHOLD: f64 = 30.0;

const SKILL_MULTIPLIER: f64 = 1.0;
const STRAIN_DECAY_BASE: f64 = 1.0;

/// Strain of individual columns and of all columns combined.
#[allow(clippy::struct_field_names)]
#[derive(Clone, Debug)]
pub struct Strain {
    start_times: Box<[f64]>,
    end_times: Box<[f64]>,
    individual_strains: Box<[f64]>,

    individual_strain: f64,
    overall_strain: f64,

    curr_strain: f64,
}

impl Strain {
    pub fn new(total_columns: usize) -> Self {
        Self {
            start_times: vec![0.0; total_columns].into_boxed_slice(),
            end_times: vec![0.0; total_columns].into_boxed_slice(),
            individual_strains: vec![0.0; total_columns].into_boxed_slice(),
            individual_strain: 0.0,
            overall_strain: 1.0,
            curr_strain: 0.0,
        }
    }

    fn strain_value_of(&mut self, curr: &ManiaDifficultyObject) -> f64 {
        let start_time = curr.start_time;
        let end_time = curr.end_time;
        let column = curr.base_column;
        let mut is_overlapping = false;

        // * Lowest value we can assume with the current information
        let mut closest_end_time = (end_time - start_time).abs();
        // * Factor to all additional strains in case something else is held
        let mut hold_factor = 1.0;
        // * Addition to the current note in case it's a hold and has to be released awkwardly
        let mut hold_addition = 0.0;

        for (&col_start_time, &col_end_time) in self.start_times.iter().zip(self.end_times.iter())
        {
            // * The current note is overlapped if a previous note or end is overlapping the current note body
            is_overlapping |= col_end_time > start_time + 1.0
                && end_time > col_end_time + 1.0
                && start_time > col_start_time + 1.0;

            // * We give a slight bonus to everything if something is held meanwhile
            if col_end_time > end_time + 1.0 && start_time > col_start_time + 1.0 {
                hold_factor = 1.25;
            }

            closest_end_time = (end_time - col_end_time).abs().min(closest_end_time);
        }

        // * The hold addition is given if there was an overlap, however it is only valid if there are no other note with a similar ending.
        // * Releasing multiple notes is just as easy as releasing 1. Nerfs the hold addition by half if the closest release is release_threshold away.
        if is_overlapping {
            hold_addition = (1.0 + (0.27 * (RELEASE_THRESHOLD - closest_end_time)).exp()).recip();
        }

        // * Decay and increase individualStrains in own column
        self.individual_strains[column] = apply_decay(
            self.individual_strains[column],
            start_time - self.start_times[column],
            INDIVIDUAL_DECAY_BASE,
        );
        self.individual_strains[column] += 2.0 * hold_factor;

        // * For notes at the same time (in a chord), the individualStrain should be the hardest individualStrain out of those columns
        self.individual_strain = if curr.delta_time <= 1.0 {
            self.individual_strain.max(self.individual_strains[column])
        } else {
            self.individual_strains[column]
        };

        // * Decay and increase overallStrain
        self.overall_strain = apply_decay(self.overall_strain, curr.delta_time, OVERALL_DECAY_BASE);
        self.overall_strain += (1.0 + hold_addition) * hold_factor;

        self.start_times[column] = start_time;
        self.end_times[column] = end_time;

        // * By subtracting CurrentStrain, this skill effectively only considers the maximum strain of any one hitobject within each strain section.
        self.individual_strain + self.overall_strain - self.curr_strain
    }
}

impl StrainSkill for Strain {
    type DifficultyObject = ManiaDifficultyObject;

    fn strain_value_at(
        &mut self,
        curr: &ManiaDifficultyObject,
        _: &[ManiaDifficultyObject],
    ) -> f64 {
        self.curr_strain *= strain_decay(curr.delta_time, STRAIN_DECAY_BASE);
        self.curr_strain += self.strain_value_of(curr) * SKILL_MULTIPLIER;

        self.curr_strain
    }

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &ManiaDifficultyObject,
        diff_objects: &[ManiaDifficultyObject],
    ) -> f64 {
        let prev_start_time = curr
            .previous(0, diff_objects)
            .map_or(0.0, |prev| prev.start_time);

        let delta = time - prev_start_time;

        apply_decay(self.individual_strain, delta, INDIVIDUAL_DECAY_BASE)
            + apply_decay(self.overall_strain, delta, OVERALL_DECAY_BASE)
    }
}

fn apply_decay(value: f64, delta_time: f64, decay_base: f64) -> f64 {
    value * decay_base.powf(delta_time / 1000.0)
}

#[cfg(test)]
mod tests {
    use crate::{any::difficulty::skills::Skill, mania::object::ManiaObject};

    use super::*;

    fn diff_objects(notes: &[(f64, f64, usize)]) -> Vec<ManiaDifficultyObject> {
        let objects: Vec<_> = notes
            .iter()
            .map(|&(start_time, end_time, column)| ManiaObject {
                start_time,
                end_time,
                column,
            })
            .collect();

        objects
            .windows(2)
            .enumerate()
            .map(|(i, w)| ManiaDifficultyObject::new(&w[1], &w[0], 1.0, i))
            .collect()
    }

    fn peak(notes: &[(f64, f64, usize)]) -> f64 {
        let objects = diff_objects(notes);
        let mut strain = Skill::new(Strain::new(4));

        for curr in objects.iter() {
            strain.process(curr, &objects);
        }

        strain.difficulty_value()
    }

    #[test]
    fn jacks_are_harder_than_trills() {
        let note = |i: i32, column: usize| (f64::from(i) * 100.0, f64::from(i) * 100.0, column);

        let jack: Vec<_> = (0..32).map(|i| note(i, 0)).collect();
        let trill: Vec<_> = (0..32).map(|i| note(i, (i % 2) as usize)).collect();

        assert!(peak(&jack) > peak(&trill));
    }

    #[test]
    fn chords_take_the_hardest_column() {
        let objects = diff_objects(&[(0.0, 0.0, 0), (500.0, 500.0, 0), (500.0, 500.0, 1)]);
        let mut strain = Strain::new(4);

        let first = strain.strain_value_at(&objects[0], &objects);
        let chord = strain.strain_value_at(&objects[1], &objects);

        assert!(first > 0.0);
        assert!(chord > 0.0);
        assert!(strain.individual_strain >= strain.individual_strains[1]);
    }

    #[test]
    fn held_notes_add_strain() {
        let tapped = peak(&[(0.0, 0.0, 3), (100.0, 100.0, 0), (200.0, 200.0, 1)]);
        let held = peak(&[(0.0, 0.0, 3), (100.0, 1100.0, 0), (200.0, 200.0, 1)]);

        assert!(held > tapped);
    }
}
