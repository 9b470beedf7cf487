use crate::model::hit_object::Pos;

use super::CATMULL_DETAIL;

/// Approximate a Catmull-Rom spline through all control points.
///
/// Missing neighbors at either end are extrapolated linearly.
pub fn approximate_catmull(control_points: &[Pos], output: &mut Vec<Pos>) {
    if control_points.len() < 2 {
        output.extend_from_slice(control_points);

        return;
    }

    let len = control_points.len();
    output.reserve((len - 1) * CATMULL_DETAIL * 2);

    for i in 0..len - 1 {
        let v1 = if i > 0 {
            control_points[i - 1]
        } else {
            control_points[i]
        };

        let v2 = control_points[i];

        let v3 = if i < len - 1 {
            control_points[i + 1]
        } else {
            v2 + v2 - v1
        };

        let v4 = if i < len - 2 {
            control_points[i + 2]
        } else {
            v3 + v3 - v2
        };

        for c in 0..CATMULL_DETAIL {
            let t0 = c as f32 / CATMULL_DETAIL as f32;
            let t1 = (c + 1) as f32 / CATMULL_DETAIL as f32;

            output.push(catmull_find_point(v1, v2, v3, v4, t0));
            output.push(catmull_find_point(v1, v2, v3, v4, t1));
        }
    }
}

fn catmull_find_point(v1: Pos, v2: Pos, v3: Pos, v4: Pos, t: f32) -> Pos {
    let t2 = t * t;
    let t3 = t * t2;

    Pos {
        x: catmull(v1.x, v2.x, v3.x, v4.x, t, t2, t3),
        y: catmull(v1.y, v2.y, v3.y, v4.y, t, t2, t3),
    }
}

fn catmull(v1: f32, v2: f32, v3: f32, v4: f32, t: f32, t2: f32, t3: f32) -> f32 {
    0.5 * (2.0 * v2
        + (-v1 + v3) * t
        + (2.0 * v1 - 5.0 * v2 + 4.0 * v3 - v4) * t2
        + (-v1 + 3.0 * v2 - 3.0 * v3 + v4) * t3)
}
