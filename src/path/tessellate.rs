use log::trace;

use super::command::Command;
use super::cursor::{CurveFamily, CursorState};
use crate::errors::{Error, Result};
use crate::geometry::Point;
use crate::{check_curve_samples, ArcMode, CloseMode, TessellationConfig};

/// A command's geometry with every point resolved to document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Move(Point),
    Line(Point, Point),
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    Arc(ArcSegment),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub from: Point,
    pub rx: f32,
    pub ry: f32,
    /// x-axis rotation in degrees
    pub rotation: f32,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

/// Centre parameterisation of an arc, per
/// https://www.w3.org/TR/SVG2/implnote.html#ArcConversionEndpointToCenter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCenter {
    pub center: Point,
    pub rx: f32,
    pub ry: f32,
    /// x-axis rotation in radians
    pub phi: f32,
    pub start_angle: f32,
    pub sweep_angle: f32,
}

/// Resolve `command` against `cursor`, returning its absolute geometry and
/// the cursor for the following command. This never fails; whether a
/// primitive can be tessellated is decided by `tessellate_command`.
pub fn resolve(command: &Command, cursor: CursorState) -> (Primitive, CursorState) {
    let start = cursor.current;
    match *command {
        Command::MoveTo { to, relative } => {
            let target = cursor.resolve(to, relative);
            (Primitive::Move(target), cursor.moved_to(target))
        }
        Command::LineTo { to, relative } => {
            let end = cursor.resolve(to, relative);
            (Primitive::Line(start, end), cursor.line_to(end))
        }
        Command::HorizontalLineTo { x, relative } => {
            let end = Point::new(cursor.resolve_x(x, relative), start.y);
            (Primitive::Line(start, end), cursor.line_to(end))
        }
        Command::VerticalLineTo { y, relative } => {
            let end = Point::new(start.x, cursor.resolve_y(y, relative));
            (Primitive::Line(start, end), cursor.line_to(end))
        }
        Command::CubicCurveTo {
            ctrl1,
            ctrl2,
            to,
            relative,
        } => {
            let ctrl1 = cursor.resolve(ctrl1, relative);
            let ctrl2 = cursor.resolve(ctrl2, relative);
            let end = cursor.resolve(to, relative);
            (
                Primitive::Cubic {
                    from: start,
                    ctrl1,
                    ctrl2,
                    to: end,
                },
                cursor.curve_to(end, ctrl2, CurveFamily::Cubic),
            )
        }
        Command::SmoothCubicCurveTo {
            ctrl2,
            to,
            relative,
        } => {
            let ctrl1 = cursor.smooth_control(CurveFamily::Cubic);
            let ctrl2 = cursor.resolve(ctrl2, relative);
            let end = cursor.resolve(to, relative);
            (
                Primitive::Cubic {
                    from: start,
                    ctrl1,
                    ctrl2,
                    to: end,
                },
                cursor.curve_to(end, ctrl2, CurveFamily::Cubic),
            )
        }
        Command::QuadraticCurveTo { ctrl, to, relative } => {
            let ctrl = cursor.resolve(ctrl, relative);
            let end = cursor.resolve(to, relative);
            (
                Primitive::Quadratic {
                    from: start,
                    ctrl,
                    to: end,
                },
                cursor.curve_to(end, ctrl, CurveFamily::Quadratic),
            )
        }
        Command::SmoothQuadraticCurveTo { to, relative } => {
            let ctrl = cursor.smooth_control(CurveFamily::Quadratic);
            let end = cursor.resolve(to, relative);
            (
                Primitive::Quadratic {
                    from: start,
                    ctrl,
                    to: end,
                },
                cursor.curve_to(end, ctrl, CurveFamily::Quadratic),
            )
        }
        Command::EllipticalArcTo {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to,
            relative,
        } => {
            let end = cursor.resolve(to, relative);
            (
                Primitive::Arc(ArcSegment {
                    from: start,
                    rx: rx as f32,
                    ry: ry as f32,
                    rotation: rotation as f32,
                    large_arc,
                    sweep,
                    to: end,
                }),
                cursor.line_to(end),
            )
        }
        Command::ClosePath => {
            let end = cursor.subpath_start;
            (Primitive::Line(start, end), cursor.line_to(end))
        }
    }
}

/// Tessellate a single command.
///
/// Lines produce their two endpoints; curves produce `curve_samples` points
/// with t stepped uniformly over [0, 1); moves produce nothing. The
/// returned cursor must be passed to the next command of the same path.
pub fn tessellate_command(
    command: &Command,
    cursor: CursorState,
    config: &TessellationConfig,
) -> Result<(Vec<Point>, CursorState)> {
    let samples = check_curve_samples(config.curve_samples)?;
    match command {
        Command::EllipticalArcTo { .. } if config.arc_mode == ArcMode::Reject => {
            return Err(Error::UnsupportedFeature(
                "elliptical arc tessellation".to_string(),
            ));
        }
        Command::ClosePath if config.close_mode == CloseMode::Reject => {
            return Err(Error::UnsupportedFeature(
                "close-path connection".to_string(),
            ));
        }
        _ => {}
    }

    let (primitive, next) = resolve(command, cursor);
    let points = match primitive {
        Primitive::Move(_) => Vec::new(),
        Primitive::Line(from, to) => vec![from, to],
        Primitive::Cubic {
            from,
            ctrl1,
            ctrl2,
            to,
        } => sample(samples, |t| cubic_point(t, from, ctrl1, ctrl2, to)),
        Primitive::Quadratic { from, ctrl, to } => {
            sample(samples, |t| quadratic_point(t, from, ctrl, to))
        }
        Primitive::Arc(arc) => match arc.center_form() {
            Some(c) => sample(samples, |t| {
                c.point_at(c.start_angle + c.sweep_angle * t)
            }),
            // "If rx = 0 or ry = 0, then treat this as a straight line
            // segment joining the endpoints."
            None => vec![arc.from, arc.to],
        },
    };
    trace!("{command} -> {} vertices", points.len());
    Ok((points, next))
}

fn sample(count: usize, f: impl Fn(f32) -> Point) -> Vec<Point> {
    (0..count).map(|i| f(i as f32 / count as f32)).collect()
}

/// Evaluate cubic Bezier for a single coordinate
pub(super) fn cubic(t: f32, p0: f32, p1: f32, p2: f32, p3: f32) -> f32 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

/// Evaluate quadratic Bezier for a single coordinate
pub(super) fn quadratic(t: f32, p0: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    mt * mt * p0 + 2.0 * mt * t * p1 + t * t * p2
}

pub fn cubic_point(t: f32, from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Point {
    Point::new(
        cubic(t, from.x, ctrl1.x, ctrl2.x, to.x),
        cubic(t, from.y, ctrl1.y, ctrl2.y, to.y),
    )
}

pub fn quadratic_point(t: f32, from: Point, ctrl: Point, to: Point) -> Point {
    Point::new(
        quadratic(t, from.x, ctrl.x, to.x),
        quadratic(t, from.y, ctrl.y, to.y),
    )
}

impl ArcSegment {
    /// Convert to centre form, scaling radii up if they are too small to
    /// reach the endpoint. Returns `None` for arcs which degenerate to a
    /// straight line (or to nothing).
    pub fn center_form(&self) -> Option<ArcCenter> {
        const EPSILON: f32 = 1e-6;
        use std::f32::consts::PI;

        let (start, end) = (self.from, self.to);
        if self.rx.abs() < EPSILON || self.ry.abs() < EPSILON || start.distance(end) < EPSILON
        {
            return None;
        }

        let (rx, ry) = (self.rx.abs(), self.ry.abs());
        let phi = self.rotation.to_radians();
        let cos_phi = phi.cos();
        let sin_phi = phi.sin();

        // half the chord, in the ellipse's unrotated frame
        let half = (start - end) * 0.5;
        let x1_prime = cos_phi * half.x + sin_phi * half.y;
        let y1_prime = -sin_phi * half.x + cos_phi * half.y;

        // Scale radii if required to reach the endpoint
        // https://www.w3.org/TR/SVG2/implnote.html#ArcCorrectionOutOfRangeRadii
        let lambda = (x1_prime * x1_prime) / (rx * rx) + (y1_prime * y1_prime) / (ry * ry);
        let (rx, ry) = if lambda > 1.0 {
            (rx * lambda.sqrt(), ry * lambda.sqrt())
        } else {
            (rx, ry)
        };

        // centre in the unrotated frame
        let sign = if self.large_arc != self.sweep {
            1.0
        } else {
            -1.0
        };
        let coeff_sq = ((rx * ry).powi(2) - (rx * y1_prime).powi(2) - (ry * x1_prime).powi(2))
            / ((rx * y1_prime).powi(2) + (ry * x1_prime).powi(2));
        let coeff = sign * coeff_sq.max(0.0).sqrt();
        let cx_prime = coeff * (rx * y1_prime) / ry;
        let cy_prime = coeff * -(ry * x1_prime) / rx;

        let mid = (start + end) * 0.5;
        let center = Point::new(
            cos_phi * cx_prime - sin_phi * cy_prime + mid.x,
            sin_phi * cx_prime + cos_phi * cy_prime + mid.y,
        );

        fn angle_between(ux: f32, uy: f32, vx: f32, vy: f32) -> f32 {
            let dot = ux * vx + uy * vy;
            let det = ux * vy - uy * vx;
            // atan2 rather than the arccos form in the SVG implementation notes
            det.atan2(dot)
        }

        let theta1 = angle_between(
            1.0,
            0.0,
            (x1_prime - cx_prime) / rx,
            (y1_prime - cy_prime) / ry,
        );
        let mut delta_theta = angle_between(
            (x1_prime - cx_prime) / rx,
            (y1_prime - cy_prime) / ry,
            (-x1_prime - cx_prime) / rx,
            (-y1_prime - cy_prime) / ry,
        );

        if self.sweep && delta_theta < 0.0 {
            delta_theta += 2.0 * PI;
        } else if !self.sweep && delta_theta > 0.0 {
            delta_theta -= 2.0 * PI;
        }

        Some(ArcCenter {
            center,
            rx,
            ry,
            phi,
            start_angle: theta1,
            sweep_angle: delta_theta,
        })
    }
}

impl ArcCenter {
    pub fn point_at(&self, angle: f32) -> Point {
        let (cos_t, sin_t) = (angle.cos(), angle.sin());
        let (cos_phi, sin_phi) = (self.phi.cos(), self.phi.sin());

        Point::new(
            self.center.x + self.rx * cos_t * cos_phi - self.ry * sin_t * sin_phi,
            self.center.y + self.rx * cos_t * sin_phi + self.ry * sin_t * cos_phi,
        )
    }
}
