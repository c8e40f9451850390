use std::fmt;

use crate::geometry::Point;

/// An integer coordinate pair as written in path data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A single path-data drawing command.
///
/// `relative` records the letter case the command was written with; it is
/// never resolved against the cursor at parse time and never changes after
/// construction. Editing operations rewrite the numeric fields only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveTo {
        to: Coord,
        relative: bool,
    },
    LineTo {
        to: Coord,
        relative: bool,
    },
    HorizontalLineTo {
        x: i32,
        relative: bool,
    },
    VerticalLineTo {
        y: i32,
        relative: bool,
    },
    CubicCurveTo {
        ctrl1: Coord,
        ctrl2: Coord,
        to: Coord,
        relative: bool,
    },
    SmoothCubicCurveTo {
        ctrl2: Coord,
        to: Coord,
        relative: bool,
    },
    QuadraticCurveTo {
        ctrl: Coord,
        to: Coord,
        relative: bool,
    },
    SmoothQuadraticCurveTo {
        to: Coord,
        relative: bool,
    },
    EllipticalArcTo {
        rx: i32,
        ry: i32,
        rotation: i32,
        large_arc: bool,
        sweep: bool,
        to: Coord,
        relative: bool,
    },
    ClosePath,
}

impl From<(i32, i32)> for Command {
    /// Shorthand for an absolute `LineTo`
    fn from(value: (i32, i32)) -> Self {
        Command::LineTo {
            to: Coord::new(value.0, value.1),
            relative: false,
        }
    }
}

impl Command {
    /// The canonical (absolute-form) letter for this command, lowercased
    /// for relative commands.
    pub fn letter(&self) -> char {
        let upper = match self {
            Command::MoveTo { .. } => 'M',
            Command::LineTo { .. } => 'L',
            Command::HorizontalLineTo { .. } => 'H',
            Command::VerticalLineTo { .. } => 'V',
            Command::CubicCurveTo { .. } => 'C',
            Command::SmoothCubicCurveTo { .. } => 'S',
            Command::QuadraticCurveTo { .. } => 'Q',
            Command::SmoothQuadraticCurveTo { .. } => 'T',
            Command::EllipticalArcTo { .. } => 'A',
            Command::ClosePath => 'Z',
        };
        if self.is_relative() {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }

    pub fn is_relative(&self) -> bool {
        match *self {
            Command::MoveTo { relative, .. }
            | Command::LineTo { relative, .. }
            | Command::HorizontalLineTo { relative, .. }
            | Command::VerticalLineTo { relative, .. }
            | Command::CubicCurveTo { relative, .. }
            | Command::SmoothCubicCurveTo { relative, .. }
            | Command::QuadraticCurveTo { relative, .. }
            | Command::SmoothQuadraticCurveTo { relative, .. }
            | Command::EllipticalArcTo { relative, .. } => relative,
            Command::ClosePath => false,
        }
    }

    /// Shift all absolute coordinates by the given amount.
    ///
    /// Relative commands are left alone; their geometry moves with the
    /// cursor they are resolved against.
    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        if !self.is_relative() {
            self.shift(dx, dy);
        }
    }

    /// Add (`dx`, `dy`) to every coordinate regardless of relativity.
    pub(crate) fn shift(&mut self, dx: i32, dy: i32) {
        match self {
            Command::MoveTo { to, .. }
            | Command::LineTo { to, .. }
            | Command::SmoothQuadraticCurveTo { to, .. }
            | Command::EllipticalArcTo { to, .. } => to.shift(dx, dy),
            Command::HorizontalLineTo { x, .. } => *x = x.saturating_add(dx),
            Command::VerticalLineTo { y, .. } => *y = y.saturating_add(dy),
            Command::CubicCurveTo {
                ctrl1, ctrl2, to, ..
            } => {
                ctrl1.shift(dx, dy);
                ctrl2.shift(dx, dy);
                to.shift(dx, dy);
            }
            Command::SmoothCubicCurveTo { ctrl2, to, .. } => {
                ctrl2.shift(dx, dy);
                to.shift(dx, dy);
            }
            Command::QuadraticCurveTo { ctrl, to, .. } => {
                ctrl.shift(dx, dy);
                to.shift(dx, dy);
            }
            Command::ClosePath => {}
        }
    }

    /// Scale coordinates by (`sx`, `sy`) about `origin`.
    ///
    /// Absolute coordinates are mapped about the origin; relative deltas and
    /// arc radii are simply multiplied. Results are rounded to integers.
    pub(crate) fn scale(&mut self, origin: Point, sx: f32, sy: f32) {
        self.scale_as(self.is_relative(), origin, sx, sy);
    }

    /// As `scale`, but treating the coordinates as relative deltas or
    /// absolute positions as given.
    pub(crate) fn scale_as(&mut self, relative: bool, origin: Point, sx: f32, sy: f32) {
        let map_x = |v: i32| -> i32 {
            if relative {
                (v as f32 * sx).round() as i32
            } else {
                (origin.x + (v as f32 - origin.x) * sx).round() as i32
            }
        };
        let map_y = |v: i32| -> i32 {
            if relative {
                (v as f32 * sy).round() as i32
            } else {
                (origin.y + (v as f32 - origin.y) * sy).round() as i32
            }
        };
        let map = |c: &mut Coord| {
            c.x = map_x(c.x);
            c.y = map_y(c.y);
        };
        match self {
            Command::MoveTo { to, .. }
            | Command::LineTo { to, .. }
            | Command::SmoothQuadraticCurveTo { to, .. } => map(to),
            Command::HorizontalLineTo { x, .. } => *x = map_x(*x),
            Command::VerticalLineTo { y, .. } => *y = map_y(*y),
            Command::CubicCurveTo {
                ctrl1, ctrl2, to, ..
            } => {
                map(ctrl1);
                map(ctrl2);
                map(to);
            }
            Command::SmoothCubicCurveTo { ctrl2, to, .. } => {
                map(ctrl2);
                map(to);
            }
            Command::QuadraticCurveTo { ctrl, to, .. } => {
                map(ctrl);
                map(to);
            }
            Command::EllipticalArcTo { rx, ry, to, .. } => {
                *rx = (*rx as f32 * sx).round() as i32;
                *ry = (*ry as f32 * sy).round() as i32;
                map(to);
            }
            Command::ClosePath => {}
        }
    }
}

impl fmt::Display for Command {
    /// Canonical path-data text for this command, e.g. `C 0,100 200,100 180,0`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.letter();
        match self {
            Command::MoveTo { to, .. }
            | Command::LineTo { to, .. }
            | Command::SmoothQuadraticCurveTo { to, .. } => write!(f, "{letter} {to}"),
            Command::HorizontalLineTo { x, .. } => write!(f, "{letter} {x}"),
            Command::VerticalLineTo { y, .. } => write!(f, "{letter} {y}"),
            Command::CubicCurveTo {
                ctrl1, ctrl2, to, ..
            } => write!(f, "{letter} {ctrl1} {ctrl2} {to}"),
            Command::SmoothCubicCurveTo { ctrl2, to, .. } => write!(f, "{letter} {ctrl2} {to}"),
            Command::QuadraticCurveTo { ctrl, to, .. } => write!(f, "{letter} {ctrl} {to}"),
            Command::EllipticalArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
                ..
            } => write!(
                f,
                "{letter} {rx},{ry} {rotation} {},{} {to}",
                u8::from(*large_arc),
                u8::from(*sweep)
            ),
            Command::ClosePath => write!(f, "{letter}"),
        }
    }
}
