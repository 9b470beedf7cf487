use std::f64::consts::PI;

use crate::{model::hit_object::Pos, util::float_ext::FloatExt};

use super::CIRCULAR_ARC_TOLERANCE;

/// Approximate the circular arc through exactly three points.
///
/// Returns `false` without touching `output` if no arc can be fit through the
/// points, in which case the caller should fall back to a bezier
/// approximation.
pub fn approximate_circular_arc(points: &[Pos], output: &mut Vec<Pos>) -> bool {
    let Some(pr) = CircularArcProperties::new(points) else {
        return false;
    };

    // The exact angle required to meet the tolerance is 2 * acos(1 - TOLERANCE / r).
    // Extremely short sliders can have a radius smaller than the tolerance.
    let amount_points = if 2.0 * pr.radius <= CIRCULAR_ARC_TOLERANCE {
        2
    } else {
        let step = 2.0 * f64::from(1.0 - CIRCULAR_ARC_TOLERANCE / pr.radius).acos();
        let amount = (pr.theta_range / step).ceil();

        // Huge radii round the step down to zero
        if amount.is_finite() {
            (amount as usize).max(2)
        } else {
            2
        }
    };

    output.reserve(amount_points);

    for i in 0..amount_points {
        let fract = i as f64 / (amount_points - 1) as f64;
        let theta = pr.theta_start + pr.direction * fract * pr.theta_range;
        let o = Pos::new(theta.cos() as f32, theta.sin() as f32) * pr.radius;
        output.push(pr.centre + o);
    }

    true
}

struct CircularArcProperties {
    theta_start: f64,
    theta_range: f64,
    direction: f64,
    radius: f32,
    centre: Pos,
}

impl CircularArcProperties {
    fn new(points: &[Pos]) -> Option<Self> {
        let [a, b, c] = match points {
            [a, b, c] => [*a, *b, *c],
            _ => return None,
        };

        // Collinear or degenerate triangle
        let area = (b.y - a.y) * (c.x - a.x) - (b.x - a.x) * (c.y - a.y);

        if area.almost_eq(0.0, 1e-3) {
            return None;
        }

        let d = 2.0 * (a.x * (b - c).y + b.x * (c - a).y + c.x * (a - b).y);
        let a_sq = a.length_squared();
        let b_sq = b.length_squared();
        let c_sq = c.length_squared();

        let centre = Pos::new(
            a_sq * (b - c).y + b_sq * (c - a).y + c_sq * (a - b).y,
            a_sq * (c - b).x + b_sq * (a - c).x + c_sq * (b - a).x,
        ) / d;

        let d_a = a - centre;
        let d_c = c - centre;

        let radius = d_a.length();

        let theta_start = f64::from(d_a.y).atan2(f64::from(d_a.x));
        let mut theta_end = f64::from(d_c.y).atan2(f64::from(d_c.x));

        while theta_end < theta_start {
            theta_end += 2.0 * PI;
        }

        let mut direction = 1.0;
        let mut theta_range = theta_end - theta_start;

        // Decide in which direction to draw the circle, depending on which
        // side of AC B lies.
        let ortho_a_to_c = c - a;
        let ortho_a_to_c = Pos::new(ortho_a_to_c.y, -ortho_a_to_c.x);

        if ortho_a_to_c.dot(b - a) < 0.0 {
            direction = -direction;
            theta_range = 2.0 * PI - theta_range;
        }

        Some(Self {
            theta_start,
            theta_range,
            direction,
            radius,
            centre,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_circle() {
        let points = [Pos::new(0.0, 0.0), Pos::new(50.0, 50.0), Pos::new(100.0, 0.0)];
        let mut output = Vec::new();

        assert!(approximate_circular_arc(&points, &mut output));

        let centre = Pos::new(50.0, 0.0);

        for p in output.iter() {
            assert!((p.distance(centre) - 50.0).abs() < 1e-3);
        }

        assert!(output[0].distance(points[0]) < 1e-3);
        assert!(output[output.len() - 1].distance(points[2]) < 1e-3);

        // The arc passes through the middle point's side
        assert!(output.iter().all(|p| p.y >= -1e-3));
    }

    #[test]
    fn collinear_rejected() {
        let points = [Pos::new(0.0, 0.0), Pos::new(1.0, 1.0), Pos::new(2.0, 2.0)];
        let mut output = Vec::new();

        assert!(!approximate_circular_arc(&points, &mut output));
        assert!(output.is_empty());
    }

    #[test]
    fn tiny_radius() {
        let points = [Pos::new(0.0, 0.0), Pos::new(0.04, 0.04), Pos::new(0.08, 0.0)];
        let mut output = Vec::new();

        assert!(approximate_circular_arc(&points, &mut output));
        assert_eq!(output.len(), 2);
    }
}
