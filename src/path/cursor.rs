use crate::geometry::Point;

use super::command::Coord;

/// Which kind of curve last set the implicit control point.
///
/// Smooth cubic commands only reflect a control point left by a cubic
/// command, and smooth quadratics only one left by a quadratic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFamily {
    Cubic,
    Quadratic,
}

/// State threaded from one command to the next while evaluating a path.
///
/// This is an ordinary value: each path evaluation starts from its own
/// `CursorState::default()` (the path-local origin), and nothing is shared
/// between paths.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    /// Point the next command starts from
    pub current: Point,
    /// Control point mirrored by smooth curve variants; equal to `current`
    /// unless a curve chain is in progress.
    pub implicit_control: Point,
    /// Family of the curve chain in progress, if any
    pub chain: Option<CurveFamily>,
    /// Target of the most recent MoveTo, where a close-path returns to
    pub subpath_start: Point,
}

impl CursorState {
    pub fn at(origin: Point) -> Self {
        Self {
            current: origin,
            implicit_control: origin,
            chain: None,
            subpath_start: origin,
        }
    }

    /// Resolve a coordinate pair against the cursor.
    pub fn resolve(&self, coord: Coord, relative: bool) -> Point {
        if relative {
            self.current + coord.to_point()
        } else {
            coord.to_point()
        }
    }

    pub fn resolve_x(&self, x: i32, relative: bool) -> f32 {
        if relative {
            self.current.x + x as f32
        } else {
            x as f32
        }
    }

    pub fn resolve_y(&self, y: i32, relative: bool) -> f32 {
        if relative {
            self.current.y + y as f32
        } else {
            y as f32
        }
    }

    /// First control point for a smooth curve of the given family: the
    /// implicit control reflected through the current point if the chain
    /// continues, otherwise coincident with the current point.
    pub fn smooth_control(&self, family: CurveFamily) -> Point {
        if self.chain == Some(family) {
            self.implicit_control.reflect_about(self.current)
        } else {
            self.current
        }
    }

    pub fn moved_to(self, target: Point) -> Self {
        Self {
            subpath_start: target,
            ..Self::at(target)
        }
    }

    /// Cursor after any non-curve drawing command ending at `end`.
    pub fn line_to(self, end: Point) -> Self {
        Self {
            current: end,
            implicit_control: end,
            chain: None,
            subpath_start: self.subpath_start,
        }
    }

    /// Cursor after a curve of `family` ending at `end`, whose final
    /// control point was `control`.
    pub fn curve_to(self, end: Point, control: Point, family: CurveFamily) -> Self {
        Self {
            current: end,
            implicit_control: Point::new(
                implicit_offset(end.x, control.x),
                implicit_offset(end.y, control.y),
            ),
            chain: Some(family),
            subpath_start: self.subpath_start,
        }
    }
}

/// Per-axis implicit control value carried to the next smooth curve.
///
/// This is not the geometric reflection: when the end coordinate exceeds
/// the control coordinate the two are summed, when it is smaller the
/// control is subtracted from it, and when equal the end coordinate is
/// used. Existing documents' output depends on exactly these values.
pub fn implicit_offset(end: f32, control: f32) -> f32 {
    if end > control {
        end + control
    } else if end < control {
        end - control
    } else {
        end
    }
}
