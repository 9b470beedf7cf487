//! Approximation of sparse path control points into dense polylines.
//!
//! Every approximator appends to a caller-provided output so that buffers can
//! be reused across sliders.

use super::hit_object::{PathType, Pos, SplineType};

pub use self::{
    bezier::BezierBuffers,
    path::{Curve, CurveBuffers},
};

mod bezier;
mod catmull;
mod circular_arc;
mod path;

pub(crate) use self::{
    bezier::{approximate_bezier, approximate_bspline},
    catmull::approximate_catmull,
    circular_arc::approximate_circular_arc,
};

/// Maximum deviation of a flattened bezier segment.
pub const BEZIER_TOLERANCE: f32 = 0.25;

/// Maximum deviation of a flattened circular arc.
pub const CIRCULAR_ARC_TOLERANCE: f32 = 0.1;

/// Sub-steps per Catmull-Rom segment.
pub const CATMULL_DETAIL: usize = 50;

/// Approximate the control points of a single segment.
///
/// Perfect curves that are not made of exactly three points, or whose points
/// are (nearly) collinear, fall back to the bezier approximation.
pub fn approximate(
    path_type: PathType,
    points: &[Pos],
    output: &mut Vec<Pos>,
    bufs: &mut BezierBuffers,
) {
    match path_type.kind {
        SplineType::Linear => approximate_linear(points, output),
        SplineType::Catmull => approximate_catmull(points, output),
        SplineType::PerfectCurve if points.len() == 3 => {
            if !approximate_circular_arc(points, output) {
                log_debug!(?points, "degenerate circular arc, falling back to bezier");
                approximate_bezier(points, output, bufs);
            }
        }
        SplineType::PerfectCurve => approximate_bezier(points, output, bufs),
        SplineType::BSpline => match path_type.degree.map(|degree| usize::try_from(degree.get())) {
            Some(Ok(degree)) => approximate_bspline(points, degree, output, bufs),
            Some(Err(_)) | None => approximate_bezier(points, output, bufs),
        },
    }
}

/// The identity approximation.
pub fn approximate_linear(points: &[Pos], output: &mut Vec<Pos>) {
    output.extend_from_slice(points);
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn pos() -> impl Strategy<Value = Pos> {
        (-512.0_f32..512.0, -384.0_f32..384.0).prop_map(|(x, y)| Pos::new(x, y))
    }

    fn approximated(path_type: PathType, points: &[Pos]) -> Vec<Pos> {
        let mut output = Vec::new();
        approximate(path_type, points, &mut output, &mut BezierBuffers::default());

        output
    }

    fn assert_close(a: Pos, b: Pos) {
        assert!((a - b).length() < 1e-2, "{a:?} != {b:?}");
    }

    #[test]
    fn collinear_arc_is_bezier() {
        let points = [Pos::new(0.0, 0.0), Pos::new(50.0, 50.0), Pos::new(100.0, 100.0)];

        let arc = approximated(PathType::PERFECT_CURVE, &points);
        let bezier = approximated(PathType::BEZIER, &points);

        assert_eq!(arc, bezier);
    }

    #[test]
    fn four_point_perfect_curve_is_bezier() {
        let points = [
            Pos::new(0.0, 0.0),
            Pos::new(50.0, 80.0),
            Pos::new(120.0, 30.0),
            Pos::new(200.0, 0.0),
        ];

        assert_eq!(
            approximated(PathType::PERFECT_CURVE, &points),
            approximated(PathType::BEZIER, &points)
        );
    }

    #[test]
    fn empty_input() {
        for path_type in [
            PathType::LINEAR,
            PathType::BEZIER,
            PathType::CATMULL,
            PathType::PERFECT_CURVE,
            PathType::new_b_spline(std::num::NonZeroI32::new(3).unwrap()),
        ] {
            assert!(approximated(path_type, &[]).is_empty());
        }
    }

    proptest! {
        #[test]
        fn linear_identity(points in prop::collection::vec(pos(), 0..20)) {
            prop_assert_eq!(approximated(PathType::LINEAR, &points), points);
        }

        #[test]
        fn endpoints(
            points in prop::collection::vec(pos(), 1..12),
            degree in 1_u8..5,
            kind in 0_u8..3,
        ) {
            let path_type = match kind {
                0 => PathType::BEZIER,
                1 => PathType::CATMULL,
                _ => PathType::new_b_spline(std::num::NonZeroI32::new(i32::from(degree)).unwrap()),
            };

            let output = approximated(path_type, &points);

            prop_assert!(!output.is_empty());
            assert_close(output[0], points[0]);
            assert_close(output[output.len() - 1], points[points.len() - 1]);
        }

        #[test]
        fn finite_arc(points in prop::collection::vec(pos(), 3..=3)) {
            let output = approximated(PathType::PERFECT_CURVE, &points);

            prop_assert!(output.len() >= 2);
            prop_assert!(output.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }
}
