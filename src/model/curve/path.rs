use crate::{
    model::hit_object::{PathControlPoint, PathType, Pos},
    util::float_ext::FloatExt,
};

use super::{approximate, BezierBuffers};

/// Buffers that can be reused across the construction of multiple curves.
#[derive(Clone, Debug, Default)]
pub struct CurveBuffers {
    vertices: Vec<Pos>,
    bezier: BezierBuffers,
}

/// The dense polyline of a slider path, trimmed or extended to the expected
/// distance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    path: Vec<Pos>,
    lengths: Vec<f64>,
}

impl Curve {
    /// Approximate all segments of the control points.
    ///
    /// `expected_dist` of `None` keeps the calculated length.
    pub fn new(
        control_points: &[PathControlPoint],
        expected_dist: Option<f64>,
        bufs: &mut CurveBuffers,
    ) -> Self {
        let mut path = Vec::new();
        calculate_path(control_points, &mut path, bufs);

        let mut lengths = Vec::with_capacity(path.len());
        calculate_length(&mut path, &mut lengths, expected_dist);

        Self { path, lengths }
    }

    /// The full length of the path.
    pub fn dist(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// The dense points of the path.
    pub fn path(&self) -> &[Pos] {
        &self.path
    }

    /// Cumulative length at each point of the path.
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Position on the path at `progress` in `0.0..=1.0`, relative to the
    /// first control point.
    pub fn position_at(&self, progress: f64) -> Pos {
        let d = progress.clamp(0.0, 1.0) * self.dist();
        let i = self.idx_of_dist(d);

        self.interpolate_vertices(i, d)
    }

    fn idx_of_dist(&self, d: f64) -> usize {
        self.lengths
            .binary_search_by(|len| len.total_cmp(&d))
            .unwrap_or_else(|idx| idx)
    }

    fn interpolate_vertices(&self, i: usize, d: f64) -> Pos {
        let Some(&first) = self.path.first() else {
            return Pos::default();
        };

        if i == 0 {
            return first;
        } else if i >= self.path.len() {
            return self.path[self.path.len() - 1];
        }

        let p0 = self.path[i - 1];
        let p1 = self.path[i];

        let d0 = self.lengths[i - 1];
        let d1 = self.lengths[i];

        if d0.almost_eq(d1, 1e-7) {
            return p0;
        }

        let w = (d - d0) / (d1 - d0);

        p0 + (p1 - p0) * w as f32
    }
}

fn calculate_path(control_points: &[PathControlPoint], path: &mut Vec<Pos>, bufs: &mut CurveBuffers) {
    if control_points.is_empty() {
        log_warn!("slider path without control points");

        return;
    }

    let CurveBuffers { vertices, bezier } = bufs;

    vertices.clear();
    vertices.extend(control_points.iter().map(|p| p.pos));

    let mut start = 0;

    for i in 0..control_points.len() {
        if control_points[i].path_type.is_none() && i < control_points.len() - 1 {
            continue;
        }

        // The current vertex ends the segment and may start the next one
        let segment_vertices = &vertices[start..=i];

        let segment_type = control_points[start]
            .path_type
            .unwrap_or(PathType::LINEAR);

        if segment_vertices.len() == 1 {
            // Single vertex segments only come up through a typed last point
            path.push(segment_vertices[0]);
        } else if segment_vertices.len() > 1 {
            let subpath_start = path.len();
            approximate(segment_type, segment_vertices, path, bezier);

            // Skip the first vertex if it is the same as the last vertex of
            // the previous segment
            if subpath_start > 0 && path.get(subpath_start) == path.get(subpath_start - 1) {
                path.remove(subpath_start);
            }
        }

        start = i;
    }
}

fn calculate_length(
    path: &mut Vec<Pos>,
    lengths: &mut Vec<f64>,
    expected_dist: Option<f64>,
) {
    let mut calculated_len = 0.0;
    lengths.clear();
    lengths.push(0.0);

    for window in path.windows(2) {
        let diff = window[1] - window[0];
        calculated_len += f64::from(diff.length());
        lengths.push(calculated_len);
    }

    let Some(expected_dist) = expected_dist else {
        return;
    };

    if let [.., second_last, last] = path.as_slice() {
        // Equal final path points signal that the path should not be
        // extended to the expected distance
        if second_last == last && expected_dist > calculated_len {
            return;
        }
    }

    lengths.pop();
    let mut path_end_idx = path.len() as isize - 1;

    while lengths.last().is_some_and(|&len| len >= expected_dist) {
        lengths.pop();
        path.pop();
        path_end_idx -= 1;
    }

    if path_end_idx <= 0 {
        lengths.push(0.0);

        return;
    }

    let end_idx = path_end_idx as usize;
    let last_len = lengths.last().copied().unwrap_or(0.0);

    let dir = (path[end_idx] - path[end_idx - 1]).normalize();
    path[end_idx] = path[end_idx - 1] + dir * (expected_dist - last_len) as f32;
    lengths.push(expected_dist);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32) -> PathControlPoint {
        PathControlPoint::new(Pos::new(x, y))
    }

    fn typed(x: f32, y: f32, path_type: PathType) -> PathControlPoint {
        let mut point = point(x, y);
        point.path_type = Some(path_type);

        point
    }

    fn curve(points: &[PathControlPoint], expected: Option<f64>) -> Curve {
        Curve::new(points, expected, &mut CurveBuffers::default())
    }

    #[test]
    fn untyped_points_are_linear() {
        let c = curve(&[point(0.0, 0.0), point(100.0, 0.0), point(100.0, 50.0)], None);

        assert_eq!(c.path().len(), 3);
        assert!(c.dist().almost_eq(150.0, 1e-9));
    }

    #[test]
    fn shortened_to_expected_dist() {
        let c = curve(&[point(0.0, 0.0), point(100.0, 0.0), point(100.0, 50.0)], Some(120.0));

        assert!(c.dist().almost_eq(120.0, 1e-9));
        assert_eq!(c.path().len(), 3);

        let end = c.position_at(1.0);
        assert!((end - Pos::new(100.0, 20.0)).length() < 1e-3, "{end:?}");
    }

    #[test]
    fn extended_to_expected_dist() {
        let c = curve(&[point(0.0, 0.0), point(100.0, 0.0)], Some(150.0));

        assert!(c.dist().almost_eq(150.0, 1e-9));
        assert!((c.position_at(1.0) - Pos::new(150.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn repeated_last_point_prevents_extension() {
        let c = curve(
            &[point(0.0, 0.0), point(100.0, 0.0), point(100.0, 0.0)],
            Some(150.0),
        );

        assert!(c.dist().almost_eq(100.0, 1e-9));
    }

    #[test]
    fn repeated_last_control_point_of_bezier_still_extends() {
        // The bezier approximation never emits the repeated point twice
        let c = curve(
            &[
                typed(0.0, 0.0, PathType::BEZIER),
                point(100.0, 100.0),
                point(200.0, 0.0),
                point(200.0, 0.0),
            ],
            Some(400.0),
        );

        assert!(c.dist().almost_eq(400.0, 1e-9), "{}", c.dist());

        let [.., second_last, last] = c.path() else {
            panic!("expected at least two path points");
        };

        assert!(second_last != last);
    }

    #[test]
    fn position_at_progress() {
        let c = curve(&[point(0.0, 0.0), point(200.0, 0.0)], None);

        assert_eq!(c.position_at(0.0), Pos::new(0.0, 0.0));
        assert!((c.position_at(0.25) - Pos::new(50.0, 0.0)).length() < 1e-3);
        assert!((c.position_at(2.0) - Pos::new(200.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn typed_points_split_segments() {
        let points = [
            typed(0.0, 0.0, PathType::LINEAR),
            point(50.0, 0.0),
            typed(100.0, 0.0, PathType::PERFECT_CURVE),
            point(150.0, 50.0),
            point(200.0, 0.0),
        ];

        let c = curve(&points, None);

        // No duplicated vertex at the segment boundary
        assert!(c.path().windows(2).all(|w| w[0] != w[1]));
        assert!(c.dist() > 200.0);
    }

    #[test]
    fn empty_control_points() {
        let c = curve(&[], Some(100.0));

        assert!(c.path().is_empty());
        assert!(FloatExt::eq(c.dist(), 0.0));
        assert_eq!(c.position_at(0.5), Pos::default());
    }
}
