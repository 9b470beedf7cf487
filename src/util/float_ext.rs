pub trait FloatExt: Sized {
    /// `self == other`
    fn eq(self, other: Self) -> bool;

    /// `|self - other| <= acceptable_difference`
    fn almost_eq(self, other: Self, acceptable_difference: Self) -> bool;
}

macro_rules! impl_float_ext {
    ( $ty:ty ) => {
        impl FloatExt for $ty {
            fn eq(self, other: Self) -> bool {
                (self - other).abs() < <$ty>::EPSILON
            }

            fn almost_eq(self, other: Self, acceptable_difference: Self) -> bool {
                (self - other).abs() <= acceptable_difference
            }
        }
    };
}

impl_float_ext!(f32);
impl_float_ext!(f64);
