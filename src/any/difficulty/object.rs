/// A gameplay object prepared for difficulty calculation.
///
/// All difficulty objects of a calculation are stored in one slice and an
/// object only knows its own index in that slice. Neighbors are resolved
/// through that index so no object ever borrows another.
pub trait IDifficultyObject: Sized {
    /// Position in the slice of all difficulty objects.
    fn idx(&self) -> usize;

    /// Clock rate adjusted start time.
    fn start_time(&self) -> f64;

    /// Clock rate adjusted time since the previous object.
    fn delta_time(&self) -> f64;

    /// The object `backwards_idx + 1` positions before this one.
    fn previous<'a>(&self, backwards_idx: usize, diff_objects: &'a [Self]) -> Option<&'a Self> {
        self.idx()
            .checked_sub(backwards_idx + 1)
            .and_then(|idx| diff_objects.get(idx))
    }

    /// The object `forwards_idx + 1` positions after this one.
    fn next<'a>(&self, forwards_idx: usize, diff_objects: &'a [Self]) -> Option<&'a Self> {
        diff_objects.get(self.idx() + (forwards_idx + 1))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::IDifficultyObject;

    /// Minimal difficulty object for engine tests.
    #[derive(Clone, Debug)]
    pub struct TestObject {
        pub idx: usize,
        pub start_time: f64,
        pub delta_time: f64,
    }

    impl IDifficultyObject for TestObject {
        fn idx(&self) -> usize {
            self.idx
        }

        fn start_time(&self) -> f64 {
            self.start_time
        }

        fn delta_time(&self) -> f64 {
            self.delta_time
        }
    }

    /// Difficulty objects at the given times.
    pub fn objects_at(times: &[f64]) -> Vec<TestObject> {
        times
            .iter()
            .enumerate()
            .map(|(idx, &start_time)| TestObject {
                idx,
                start_time,
                delta_time: idx.checked_sub(1).map_or(0.0, |prev| start_time - times[prev]),
            })
            .collect()
    }

    #[test]
    fn relative_links() {
        let objects = objects_at(&[0.0, 100.0, 200.0, 300.0]);
        let curr = &objects[2];

        assert_eq!(curr.previous(0, &objects).map(|h| h.idx), Some(1));
        assert_eq!(curr.previous(1, &objects).map(|h| h.idx), Some(0));
        assert!(curr.previous(2, &objects).is_none());

        assert_eq!(curr.next(0, &objects).map(|h| h.idx), Some(3));
        assert!(curr.next(1, &objects).is_none());
    }
}
