use std::f64::consts::PI;

use proptest::prelude::*;
use rosu_sr::model::{
    curve::{approximate, BezierBuffers, Curve, CurveBuffers},
    hit_object::{PathControlPoint, PathType, Pos},
};

use self::common::assert_eq_float;

mod common;

fn typed(pos: Pos, path_type: PathType) -> PathControlPoint {
    let mut point = PathControlPoint::new(pos);
    point.path_type = Some(path_type);

    point
}

fn approximated(path_type: PathType, points: &[(f32, f32)]) -> Vec<Pos> {
    let points: Vec<_> = points.iter().map(|&(x, y)| Pos::new(x, y)).collect();
    let mut output = Vec::new();
    approximate(path_type, &points, &mut output, &mut BezierBuffers::default());

    output
}

#[track_caller]
fn assert_pos(actual: Pos, x: f32, y: f32, margin: f32) {
    assert!(
        (actual.x - x).abs() <= margin && (actual.y - y).abs() <= margin,
        "{actual:?} != ({x}, {y})"
    );
}

fn control_points(first_type: PathType, points: &[(f32, f32)]) -> Vec<PathControlPoint> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            if i == 0 {
                typed(Pos::new(x, y), first_type)
            } else {
                PathControlPoint::new(Pos::new(x, y))
            }
        })
        .collect()
}

fn curve(first_type: PathType, points: &[(f32, f32)], expected_dist: Option<f64>) -> Curve {
    Curve::new(
        &control_points(first_type, points),
        expected_dist,
        &mut CurveBuffers::default(),
    )
}

#[test]
fn no_control_points() {
    let curve = Curve::new(&[], Some(100.0), &mut CurveBuffers::default());

    assert_eq!(curve.dist(), 0.0);
    assert_eq!(curve.position_at(0.5), Pos::default());
}

#[test]
fn perfect_curve_is_an_arc() {
    let semicircle = curve(
        PathType::PERFECT_CURVE,
        &[(0.0, 0.0), (100.0, 100.0), (200.0, 0.0)],
        None,
    );

    assert_eq_float(semicircle.dist(), PI * 100.0, 0.5);

    let apex = semicircle.position_at(0.5);
    assert_eq_float(f64::from(apex.x), 100.0, 0.5);
    assert_eq_float(f64::from(apex.y), 100.0, 0.5);
}

#[test]
fn collinear_perfect_curve_falls_back() {
    let line = curve(
        PathType::PERFECT_CURVE,
        &[(0.0, 0.0), (100.0, 0.0), (200.0, 0.0)],
        None,
    );

    assert_eq_float(line.dist(), 200.0, 1e-3);
    assert!(line.path().iter().all(|pos| pos.y.abs() < 1e-3));
}

#[test]
fn degenerate_arc_matches_bezier() {
    let points = [Pos::new(10.0, 10.0), Pos::new(60.0, 35.0), Pos::new(110.0, 60.0)];
    let mut bufs = BezierBuffers::default();

    let mut arc = Vec::new();
    approximate(PathType::PERFECT_CURVE, &points, &mut arc, &mut bufs);

    let mut bezier = Vec::new();
    approximate(PathType::BEZIER, &points, &mut bezier, &mut bufs);

    assert_eq!(arc, bezier);
}

#[test]
fn linear_is_identity() {
    let points = [Pos::new(3.0, 4.0), Pos::new(-20.0, 7.5), Pos::new(3.0, 4.0)];
    let mut output = vec![Pos::new(1.0, 1.0)];

    approximate(PathType::LINEAR, &points, &mut output, &mut BezierBuffers::default());

    assert_eq!(output[1..], points);
}

#[test]
fn bezier_keeps_endpoints() {
    let points = [Pos::new(0.0, 0.0), Pos::new(50.0, 150.0), Pos::new(120.0, -40.0), Pos::new(200.0, 0.0)];
    let mut output = Vec::new();

    approximate(PathType::BEZIER, &points, &mut output, &mut BezierBuffers::default());

    assert!(output.len() > points.len());
    assert_eq!(output.first(), points.first());
    assert_eq!(output.last(), points.last());
}

#[test]
fn catmull_passes_through_control_points() {
    let points = [(0.0, 0.0), (100.0, 50.0), (200.0, 0.0)];
    let curve = curve(PathType::CATMULL, &points, None);

    for (x, y) in points {
        let target = Pos::new(x, y);

        assert!(
            curve.path().iter().any(|pos| pos.distance(target) < 1e-3),
            "{target:?} not on path"
        );
    }
}

#[test]
fn segments_are_joined() {
    // A linear segment followed by a perfect curve starting at its end
    let control_points = [
        typed(Pos::new(0.0, 0.0), PathType::LINEAR),
        typed(Pos::new(100.0, 0.0), PathType::PERFECT_CURVE),
        PathControlPoint::new(Pos::new(200.0, 100.0)),
        PathControlPoint::new(Pos::new(300.0, 0.0)),
    ];

    let curve = Curve::new(&control_points, None, &mut CurveBuffers::default());

    assert_eq_float(curve.dist(), 100.0 + PI * 100.0, 0.5);
    assert!(curve.path().windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn repeated_last_point_prevents_extension() {
    let points = [(0.0, 0.0), (100.0, 0.0), (100.0, 0.0)];

    let curve = curve(PathType::LINEAR, &points, Some(300.0));
    assert_eq_float(curve.dist(), 100.0, 1e-6);

    let points = [(0.0, 0.0), (100.0, 0.0)];
    let curve = self::curve(PathType::LINEAR, &points, Some(300.0));
    assert_eq_float(curve.dist(), 300.0, 1e-6);

    let end = curve.position_at(1.0);
    assert_eq_float(f64::from(end.x), 300.0, 1e-3);
}

#[test]
fn quadratic_bezier_points() {
    let output = approximated(PathType::BEZIER, &[(0.0, 0.0), (100.0, 200.0), (200.0, 0.0)]);

    // 32 flat pieces with two points each plus the final control point
    assert_eq!(output.len(), 65);
    assert_eq!(output[0], Pos::new(0.0, 0.0));
    assert_eq!(output[1], Pos::new(3.125, 6.152_343_75));
    assert_eq!(output[31], Pos::new(96.875, 99.902_343_75));
    assert_eq!(output[32], Pos::new(100.0, 100.0));
    assert_eq!(output[63], Pos::new(196.875, 6.152_343_75));
    assert_eq!(output[64], Pos::new(200.0, 0.0));
}

#[test]
fn quadratic_bspline_points() {
    let points = [(0.0, 0.0), (50.0, 100.0), (100.0, 0.0), (150.0, 100.0), (200.0, 0.0)];
    let output = approximated(PathType::new_b_spline(std::num::NonZeroI32::new(2).unwrap()), &points);

    assert_eq!(output.len(), 161);
    assert_pos(output[1], 1.556_396_5, 3.088_379, 1e-4);
    assert_pos(output[80], 100.0, 25.0, 1e-4);
    assert_pos(output[160], 200.0, 0.0, 0.0);
}

#[test]
fn semicircle_points() {
    let output = approximated(PathType::PERFECT_CURVE, &[(0.0, 0.0), (100.0, 100.0), (200.0, 0.0)]);

    // ceil(PI / (2 * acos(1 - 0.1 / 100)))
    assert_eq!(output.len(), 36);
    assert_pos(output[0], 0.0, 0.0, 1e-4);
    assert_pos(output[1], 0.402_572_6, 8.963_93, 1e-3);
    assert_pos(output[17], 95.513_52, 99.899_31, 1e-3);
    assert_pos(output[18], 104.486_48, 99.899_31, 1e-3);
    assert_pos(output[35], 200.0, 0.0, 1e-4);
}

#[test]
fn catmull_points() {
    let output = approximated(PathType::CATMULL, &[(0.0, 0.0), (100.0, 50.0), (200.0, 0.0)]);

    // Two segments of 50 sub-steps with two points each
    assert_eq!(output.len(), 200);
    assert_eq!(output[0], Pos::new(0.0, 0.0));
    assert_eq!(output[50], Pos::new(43.75, 28.125));
    assert_eq!(output[99], Pos::new(100.0, 50.0));
    assert_eq!(output[150], Pos::new(150.0, 31.25));
    assert_eq!(output[199], Pos::new(200.0, 0.0));
}

#[test]
fn bezier_with_repeated_end_is_extended() {
    let points = [(0.0, 0.0), (100.0, 100.0), (200.0, 0.0), (200.0, 0.0)];

    let unextended = curve(PathType::BEZIER, &points, None);
    assert_eq!(unextended.path().len(), 64);
    assert_eq_float(unextended.dist(), 224.344, 1e-2);

    let extended = curve(PathType::BEZIER, &points, Some(400.0));
    assert_eq_float(extended.dist(), 400.0, 1e-9);
    assert_pos(extended.position_at(1.0), 324.605, -123.808, 0.1);
}

fn linear_points() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((1.0_f32..50.0, -50.0_f32..50.0), 1..16).prop_map(|steps| {
        let mut x = 0.0;
        let mut points = vec![(0.0, 0.0)];

        for (dx, y) in steps {
            x += dx;
            points.push((x, y));
        }

        points
    })
}

fn polyline_len(points: &[(f32, f32)]) -> f64 {
    points
        .windows(2)
        .map(|w| f64::from(Pos::new(w[1].0, w[1].1).distance(Pos::new(w[0].0, w[0].1))))
        .sum()
}

proptest! {
    #[test]
    fn linear_length(points in linear_points()) {
        let curve = curve(PathType::LINEAR, &points, None);
        let expected = polyline_len(&points);

        prop_assert!((curve.dist() - expected).abs() < 1e-3 * expected.max(1.0));
        prop_assert_eq!(curve.path().len(), points.len());
        prop_assert_eq!(curve.position_at(0.0), Pos::new(0.0, 0.0));
    }

    #[test]
    fn trimmed_to_expected_dist(points in linear_points(), ratio in 0.05_f64..0.95) {
        let expected = polyline_len(&points) * ratio;
        let curve = curve(PathType::LINEAR, &points, Some(expected));

        prop_assert!((curve.dist() - expected).abs() < 1e-6 * expected.max(1.0));

        let lengths = curve.lengths();
        prop_assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(lengths.len(), curve.path().len());
    }

    #[test]
    fn positions_stay_on_path(points in linear_points(), progress in 0.0_f64..=1.0) {
        let curve = curve(PathType::LINEAR, &points, None);
        let pos = curve.position_at(progress);

        let max_x = points.last().map_or(0.0, |&(x, _)| x);

        prop_assert!(pos.x.is_finite() && pos.y.is_finite());
        prop_assert!(pos.x >= -1e-3 && pos.x <= max_x + 1e-3);
    }
}
