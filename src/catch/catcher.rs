/// Dimensions of the catcher.
pub struct Catcher;

const AREA_CATCHER_SIZE: f32 = 106.75;

impl Catcher {
    pub const BASE_SPEED: f64 = 1.0;
    pub const ALLOWED_CATCH_RANGE: f32 = 0.8;

    /// Width of the catcher's catchable area for the given circle size.
    pub fn calculate_catch_width(cs: f32) -> f32 {
        AREA_CATCHER_SIZE * Self::calculate_scale(cs).abs() * Self::ALLOWED_CATCH_RANGE
    }

    fn calculate_scale(cs: f32) -> f32 {
        (1.0 - 0.7 * ((f64::from(cs) - 5.0) / 5.0)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_cs_is_narrower() {
        let wide = Catcher::calculate_catch_width(2.0);
        let narrow = Catcher::calculate_catch_width(7.0);

        assert!(narrow < wide);
        assert!((Catcher::calculate_catch_width(5.0) - 106.75 * 0.8).abs() < 1e-4);
    }
}
