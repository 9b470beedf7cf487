use std::mem;

use crate::model::hit_object::Pos;

use super::BEZIER_TOLERANCE;

/// Work buffers of the bezier approximation.
///
/// Reusing the same buffers across sliders avoids most allocations.
#[derive(Clone, Debug, Default)]
pub struct BezierBuffers {
    /// Segments that are not flat enough yet.
    to_flatten: Vec<Vec<Pos>>,
    /// Segment buffers that can be reused.
    free: Vec<Vec<Pos>>,
    /// Copy of the control points that is modified by knot insertion.
    points: Vec<Pos>,
    midpoints: Vec<Pos>,
    left: Vec<Pos>,
    right: Vec<Pos>,
}

impl BezierBuffers {
    fn segment(&mut self, len: usize) -> Vec<Pos> {
        let mut segment = self.free.pop().unwrap_or_default();
        segment.clear();
        segment.resize(len, Pos::default());

        segment
    }

    fn reset(&mut self, degree: usize) {
        let BezierBuffers {
            to_flatten,
            free,
            points: _,
            midpoints,
            left,
            right,
        } = self;

        free.append(to_flatten);

        midpoints.clear();
        midpoints.resize(degree + 1, Pos::default());
        left.clear();
        left.resize(degree * 2 + 1, Pos::default());
        right.clear();
        right.resize(degree + 1, Pos::default());
    }
}

/// Approximate a single bezier curve through all control points.
pub fn approximate_bezier(control_points: &[Pos], output: &mut Vec<Pos>, bufs: &mut BezierBuffers) {
    approximate_bspline(control_points, control_points.len(), output, bufs);
}

/// Approximate a B-spline of the given degree.
///
/// The spline is first split into bezier segments which are then
/// subdivided until they are flat enough.
pub fn approximate_bspline(
    control_points: &[Pos],
    degree: usize,
    output: &mut Vec<Pos>,
    bufs: &mut BezierBuffers,
) {
    if control_points.len() < 2 {
        output.extend_from_slice(control_points);

        return;
    }

    let point_count = control_points.len() - 1;
    let degree = degree.clamp(1, point_count);

    bufs.reset(degree);
    bspline_to_bezier(control_points, degree, bufs);

    let count = degree + 1;

    // Explicit stack instead of recursion, the order of processed segments
    // stays the same.
    while let Some(mut parent) = bufs.to_flatten.pop() {
        if is_flat_enough(&parent) {
            approximate(&parent, output, bufs, count);
            bufs.free.push(parent);

            continue;
        }

        let mut right_child = bufs.segment(count);

        let BezierBuffers {
            midpoints, left, ..
        } = bufs;

        subdivide(&parent, left, &mut right_child, midpoints, count);

        // The parent's buffer is reused for the left child
        parent[..count].copy_from_slice(&left[..count]);

        bufs.to_flatten.push(right_child);
        bufs.to_flatten.push(parent);
    }

    output.push(control_points[point_count]);
}

/// Split a B-spline into bezier segments by inserting every internal knot
/// `degree - 1` times (Boehm's algorithm).
///
/// The segments are pushed onto `bufs.to_flatten` such that the first
/// segment is popped first.
fn bspline_to_bezier(control_points: &[Pos], degree: usize, bufs: &mut BezierBuffers) {
    let point_count = control_points.len() - 1;

    let mut points = mem::take(&mut bufs.points);
    points.clear();
    points.extend_from_slice(control_points);

    if degree == point_count {
        let mut segment = bufs.segment(points.len());
        segment.copy_from_slice(&points);
        bufs.to_flatten.push(segment);
    } else {
        for i in 0..point_count - degree {
            let mut sub_bezier = bufs.segment(degree + 1);
            sub_bezier[0] = points[i];

            for j in 0..degree - 1 {
                sub_bezier[j + 1] = points[i + 1];

                for k in 1..degree - j {
                    let l = k.min(point_count - degree - i);
                    points[i + k] = (points[i + k] * l as f32 + points[i + k + 1]) / (l + 1) as f32;
                }
            }

            sub_bezier[degree] = points[i + 1];
            bufs.to_flatten.push(sub_bezier);
        }

        let mut last = bufs.segment(degree + 1);
        last.copy_from_slice(&points[point_count - degree..]);
        bufs.to_flatten.push(last);

        bufs.to_flatten.reverse();
    }

    bufs.points = points;
}

/// Whether the discrete second derivative is small enough everywhere.
fn is_flat_enough(control_points: &[Pos]) -> bool {
    const MAX_LEN_SQ: f32 = BEZIER_TOLERANCE * BEZIER_TOLERANCE * 4.0;

    control_points.windows(3).all(|window| {
        let [prev, curr, next] = [window[0], window[1], window[2]];

        (prev - curr * 2.0 + next).length_squared() <= MAX_LEN_SQ
    })
}

/// Split a bezier curve into two halves via de Casteljau's algorithm.
fn subdivide(
    control_points: &[Pos],
    left: &mut [Pos],
    right: &mut [Pos],
    midpoints: &mut [Pos],
    count: usize,
) {
    midpoints[..count].copy_from_slice(&control_points[..count]);

    for i in 0..count {
        left[i] = midpoints[0];
        right[count - i - 1] = midpoints[count - i - 1];

        for j in 0..count - i - 1 {
            midpoints[j] = (midpoints[j] + midpoints[j + 1]) / 2.0;
        }
    }
}

/// Piecewise-linear approximation of a sufficiently flat bezier curve with
/// as many points as there are control points.
fn approximate(control_points: &[Pos], output: &mut Vec<Pos>, bufs: &mut BezierBuffers, count: usize) {
    let BezierBuffers {
        midpoints,
        left,
        right,
        ..
    } = bufs;

    subdivide(control_points, left, right, midpoints, count);

    for i in 0..count - 1 {
        left[count + i] = right[i + 1];
    }

    output.push(control_points[0]);

    for i in 1..count - 1 {
        let idx = 2 * i;
        let p = (left[idx - 1] + left[idx] * 2.0 + left[idx + 1]) * 0.25;
        output.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bezier(points: &[Pos]) -> Vec<Pos> {
        let mut output = Vec::new();
        approximate_bezier(points, &mut output, &mut BezierBuffers::default());

        output
    }

    #[test]
    fn straight_line_stays_on_line() {
        let points = [Pos::new(0.0, 0.0), Pos::new(100.0, 0.0), Pos::new(200.0, 0.0)];
        let output = bezier(&points);

        assert!(output.len() >= 3);
        assert!(output.iter().all(|p| p.y.abs() < f32::EPSILON));
        assert!(output.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn curved_segment_is_subdivided() {
        let points = [Pos::new(0.0, 0.0), Pos::new(100.0, 200.0), Pos::new(200.0, 0.0)];
        let output = bezier(&points);

        // A single flat pass would only produce three points
        assert!(output.len() > 3);
        assert_eq!(output[0], points[0]);
        assert_eq!(output[output.len() - 1], points[2]);

        // The apex of a quadratic bezier lies at half the control point's height
        let max_y = output.iter().map(|p| p.y).fold(0.0, f32::max);
        assert!((max_y - 100.0).abs() < 1.0, "{max_y}");
    }

    #[test]
    fn buffers_are_reusable() {
        let mut bufs = BezierBuffers::default();
        let a = [Pos::new(0.0, 0.0), Pos::new(30.0, 90.0), Pos::new(60.0, 0.0)];
        let b = [
            Pos::new(0.0, 0.0),
            Pos::new(10.0, 50.0),
            Pos::new(80.0, 60.0),
            Pos::new(100.0, 0.0),
        ];

        let mut first = Vec::new();
        approximate_bezier(&a, &mut first, &mut bufs);
        let mut second = Vec::new();
        approximate_bezier(&b, &mut second, &mut bufs);
        let mut third = Vec::new();
        approximate_bezier(&a, &mut third, &mut bufs);

        assert_eq!(first, third);
        assert_eq!(second, bezier(&b));
    }

    #[test]
    fn bspline_segments_connect() {
        let points = [
            Pos::new(0.0, 0.0),
            Pos::new(50.0, 100.0),
            Pos::new(100.0, 0.0),
            Pos::new(150.0, 100.0),
            Pos::new(200.0, 0.0),
        ];

        let mut output = Vec::new();
        approximate_bspline(&points, 2, &mut output, &mut BezierBuffers::default());

        assert_eq!(output[0], points[0]);
        assert_eq!(output[output.len() - 1], points[4]);

        let max_step = output
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .fold(0.0, f32::max);

        assert!(max_step < 50.0, "{max_step}");
    }
}
