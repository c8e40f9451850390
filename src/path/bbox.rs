use super::command::Command;
use super::cursor::CursorState;
use super::tessellate::{cubic, quadratic, resolve, ArcSegment, Primitive};
use crate::geometry::{BoundingBox, BoundingBoxBuilder, Point};

/// Exact bounds of the path geometry, including curve and arc extrema.
///
/// MoveTo targets contribute to the bounds even if nothing is drawn from
/// them. Returns `None` for an empty path.
pub fn path_bbox(commands: &[Command]) -> Option<BoundingBox> {
    let mut cursor = CursorState::default();
    let mut bbb = BoundingBoxBuilder::new();
    for command in commands {
        let (primitive, next) = resolve(command, cursor);
        cursor = next;
        for point in primitive_extent(&primitive) {
            bbb.include(point);
        }
    }
    bbb.build()
}

fn primitive_extent(primitive: &Primitive) -> Vec<Point> {
    match *primitive {
        Primitive::Move(p) => vec![p],
        Primitive::Line(from, to) => vec![from, to],
        Primitive::Cubic {
            from,
            ctrl1,
            ctrl2,
            to,
        } => {
            let mut points = vec![from, to];
            points.extend(cubic_extrema(from, ctrl1, ctrl2, to));
            points
        }
        Primitive::Quadratic { from, ctrl, to } => {
            let mut points = vec![from, to];
            points.extend(quadratic_extrema(from, ctrl, to));
            points
        }
        Primitive::Arc(ref arc) => {
            let mut points = vec![arc.from, arc.to];
            points.extend(arc_extrema(arc));
            points
        }
    }
}

const EPSILON: f32 = 1e-6;

fn in_curve(t: &f32) -> bool {
    *t > 0.0 && *t < 1.0
}

/// Parameter values where a quadratic Bezier coordinate is stationary.
fn quadratic_roots(p0: f32, p1: f32, p2: f32) -> Vec<f32> {
    // derivative is linear: 2(p1-p0) + 2t(p0-2p1+p2)
    let curvature = p0 - 2.0 * p1 + p2;
    if curvature.abs() < EPSILON {
        return vec![];
    }
    Some((p0 - p1) / curvature).into_iter().filter(in_curve).collect()
}

/// Parameter values where a cubic Bezier coordinate is stationary.
fn cubic_roots(p0: f32, p1: f32, p2: f32, p3: f32) -> Vec<f32> {
    // derivative as a quadratic in t: a t^2 + b t + c
    let a = 3.0 * (p3 - p0) + 9.0 * (p1 - p2);
    let b = 6.0 * (p0 - 2.0 * p1 + p2);
    let c = 3.0 * (p1 - p0);

    let roots = if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            vec![]
        } else {
            vec![-c / b]
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            vec![]
        } else {
            let root = disc.sqrt();
            let inv_2a = 1.0 / (2.0 * a);
            vec![(-b + root) * inv_2a, (-b - root) * inv_2a]
        }
    };
    roots.into_iter().filter(in_curve).collect()
}

fn quadratic_extrema(from: Point, ctrl: Point, to: Point) -> Vec<Point> {
    let mut ts = quadratic_roots(from.x, ctrl.x, to.x);
    ts.extend(quadratic_roots(from.y, ctrl.y, to.y));
    ts.into_iter()
        .map(|t| {
            Point::new(
                quadratic(t, from.x, ctrl.x, to.x),
                quadratic(t, from.y, ctrl.y, to.y),
            )
        })
        .collect()
}

fn cubic_extrema(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Vec<Point> {
    let mut ts = cubic_roots(from.x, ctrl1.x, ctrl2.x, to.x);
    ts.extend(cubic_roots(from.y, ctrl1.y, ctrl2.y, to.y));
    ts.into_iter()
        .map(|t| {
            Point::new(
                cubic(t, from.x, ctrl1.x, ctrl2.x, to.x),
                cubic(t, from.y, ctrl1.y, ctrl2.y, to.y),
            )
        })
        .collect()
}

fn arc_extrema(arc: &ArcSegment) -> Vec<Point> {
    use std::f32::consts::PI;

    let Some(center) = arc.center_form() else {
        return vec![];
    };
    let (rx, ry, phi) = (center.rx, center.ry, center.phi);

    let mut angles = Vec::new();
    if phi.abs() < EPSILON
        || (phi - PI).abs() < EPSILON
        || (phi - PI / 2.0).abs() < EPSILON
        || (phi - 3.0 * PI / 2.0).abs() < EPSILON
    {
        // axis-aligned (or quarter-turn) ellipses have extrema at the
        // cardinal parameter angles
        angles.extend([0.0, PI / 2.0, PI, 3.0 * PI / 2.0]);
    } else {
        // dx/dt = 0: tan(t) = -ry*sin(phi) / (rx*cos(phi))
        let tan_t = -ry * phi.sin() / (rx * phi.cos());
        angles.extend([tan_t.atan(), tan_t.atan() + PI]);

        // dy/dt = 0: tan(t) = ry*cos(phi) / (rx*sin(phi))
        let tan_t = ry * phi.cos() / (rx * phi.sin());
        angles.extend([tan_t.atan(), tan_t.atan() + PI]);
    }

    fn fround(v: f32) -> f32 {
        const SCALE: f32 = 65536.0;
        (v * SCALE).round() / SCALE
    }

    angles
        .into_iter()
        .filter(|angle| angle_in_sweep(*angle, center.start_angle, center.sweep_angle))
        .map(|angle| {
            let p = center.point_at(angle);
            Point::new(fround(p.x), fround(p.y))
        })
        .collect()
}

/// Whether `angle` lies within the sweep starting at `start_angle`.
fn angle_in_sweep(angle: f32, start_angle: f32, sweep_angle: f32) -> bool {
    use std::f32::consts::{PI, TAU};

    if sweep_angle.abs() < EPSILON {
        return false;
    }
    // offset from the start, in [-PI, PI)
    let delta = ((angle - start_angle + PI) % TAU) - PI;
    if sweep_angle > 0.0 {
        let forward = if delta < 0.0 { delta + TAU } else { delta };
        forward <= sweep_angle
    } else {
        let backward = if delta > 0.0 { delta - TAU } else { delta };
        backward >= sweep_angle
    }
}
