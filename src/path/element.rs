use std::cell::OnceCell;
use std::fmt;
use std::str::FromStr;

use log::debug;

use super::assemble::{assemble, to_text, Segment, Tessellation};
use super::bbox::path_bbox;
use super::command::Command;
use super::syntax::parse_path_data;
use crate::errors::{Error, Result};
use crate::geometry::BoundingBox;
use crate::TessellationConfig;

/// An ordered sequence of path commands, together with the tessellation
/// settings used to render it.
///
/// Tessellation is computed on first request and cached until the commands
/// or configuration change.
#[derive(Debug, Clone, Default)]
pub struct Path {
    commands: Vec<Command>,
    config: TessellationConfig,
    cache: OnceCell<Tessellation>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.commands == other.commands && self.config == other.config
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<Vec<Command>> for Path {
    fn from(commands: Vec<Command>) -> Self {
        Self::from_commands(commands)
    }
}

impl Path {
    /// Parse path data text. Fails on the first malformed command.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_commands(parse_path_data(text)?))
    }

    pub fn from_commands(commands: Vec<Command>) -> Self {
        Self {
            commands,
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: TessellationConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn config(&self) -> &TessellationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TessellationConfig) {
        if config != self.config {
            self.config = config;
            self.invalidate();
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Mutable access to the command list; any cached tessellation is
    /// discarded.
    pub fn commands_mut(&mut self) -> &mut Vec<Command> {
        self.invalidate();
        &mut self.commands
    }

    pub fn push(&mut self, command: Command) {
        self.invalidate();
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether a tessellation is currently cached.
    pub fn is_tessellated(&self) -> bool {
        self.cache.get().is_some()
    }

    fn invalidate(&mut self) {
        self.cache.take();
    }

    /// Tessellate the path, or return the cached result.
    ///
    /// Errors are not cached; a failing path fails again on the next call.
    pub fn tessellation(&self) -> Result<&Tessellation> {
        if let Some(tess) = self.cache.get() {
            return Ok(tess);
        }
        let tess = assemble(&self.commands, &self.config)?;
        Ok(self.cache.get_or_init(|| tess))
    }

    pub fn vertices(&self) -> Result<&[f32]> {
        Ok(&self.tessellation()?.vertices)
    }

    pub fn indices(&self) -> Result<&[u32]> {
        Ok(&self.tessellation()?.indices)
    }

    pub fn segments(&self) -> Result<&[Segment]> {
        Ok(&self.tessellation()?.segments)
    }

    /// Canonical path data: one command per token group, separated by a
    /// single space.
    pub fn to_text(&self) -> String {
        to_text(&self.commands)
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        path_bbox(&self.commands)
    }

    /// Whether the path opens with a relative MoveTo, which is resolved
    /// against the path-local origin and so behaves as an absolute anchor.
    fn anchored_start(&self) -> bool {
        matches!(
            self.commands.first(),
            Some(Command::MoveTo { relative: true, .. })
        )
    }

    /// Move the path by (`dx`, `dy`).
    ///
    /// Absolute coordinates are shifted; relative commands follow along
    /// with the cursor. A path which does not open with a MoveTo keeps its
    /// initial point at the origin.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let anchored = self.anchored_start();
        for (idx, command) in self.commands.iter_mut().enumerate() {
            if idx == 0 && anchored {
                command.shift(dx, dy);
            } else {
                command.translate(dx, dy);
            }
        }
        self.invalidate();
    }

    /// Grow (or shrink) the path's bounding box by (`dw`, `dh`), scaling
    /// about the box's minimum corner.
    ///
    /// An axis with zero extent is left unscaled. Fails if the new size
    /// would not be positive, or if a rotated elliptical arc would need
    /// non-uniform scaling.
    pub fn resize(&mut self, dw: i32, dh: i32) -> Result<()> {
        let Some(bbox) = self.bbox() else {
            return Ok(());
        };
        let scale_factor = |extent: f32, delta: i32| -> Result<f32> {
            if extent <= 0.0 {
                return Ok(1.0);
            }
            let target = extent + delta as f32;
            if target <= 0.0 {
                return Err(Error::InvalidValue(
                    "resize".to_string(),
                    format!("{dw},{dh}"),
                ));
            }
            Ok(target / extent)
        };
        let sx = scale_factor(bbox.width(), dw)?;
        let sy = scale_factor(bbox.height(), dh)?;

        let rotated_arc = self.commands.iter().any(
            |c| matches!(c, Command::EllipticalArcTo { rotation, .. } if rotation % 180 != 0),
        );
        if rotated_arc && (sx - sy).abs() > f32::EPSILON {
            return Err(Error::UnsupportedFeature(
                "non-uniform resize of a rotated elliptical arc".to_string(),
            ));
        }

        debug!("resizing path by ({dw}, {dh}): scale ({sx}, {sy})");
        let origin = bbox.min();
        let anchored = self.anchored_start();
        for (idx, command) in self.commands.iter_mut().enumerate() {
            if idx == 0 && anchored {
                command.scale_as(false, origin, sx, sy);
            } else {
                command.scale(origin, sx, sy);
            }
        }
        self.invalidate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Coord;
    use crate::ArcMode;

    #[test]
    fn test_parse_and_text() {
        let path = Path::parse("M10 20l5,5 h-3 V 0 Z").unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.to_text(), "M 10,20 l 5,5 h -3 V 0 Z");
        assert_eq!(path.to_string(), path.to_text());
        assert_eq!(Path::parse(&path.to_text()).unwrap(), path);
    }

    #[test]
    fn test_tessellation_cached() {
        let path: Path = "M 0,0 L 10,0".parse().unwrap();
        assert!(!path.is_tessellated());
        let first = path.tessellation().unwrap() as *const Tessellation;
        assert!(path.is_tessellated());
        let second = path.tessellation().unwrap() as *const Tessellation;
        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_invalidated() {
        let mut path = Path::parse("M 0,0 L 10,0").unwrap();
        assert_eq!(path.vertices().unwrap(), &[0., 0., 10., 0.]);

        path.push(Command::from((10, 10)));
        assert!(!path.is_tessellated());
        assert_eq!(path.vertices().unwrap(), &[0., 0., 10., 0., 10., 0., 10., 10.]);

        path.commands_mut()[1] = Command::from((5, 0));
        assert_eq!(path.vertices().unwrap()[2], 5.);

        path.translate(1, 1);
        assert!(!path.is_tessellated());
        assert_eq!(&path.vertices().unwrap()[..2], &[1., 1.]);
    }

    #[test]
    fn test_config_change_invalidates() {
        let mut path = Path::parse("M 0,0 Q 5,5 10,0").unwrap();
        assert_eq!(path.vertices().unwrap().len(), 200);
        path.set_config(TessellationConfig {
            curve_samples: 4,
            ..Default::default()
        });
        assert!(!path.is_tessellated());
        assert_eq!(path.vertices().unwrap().len(), 8);
    }

    #[test]
    fn test_failure_not_cached() {
        let mut path = Path::parse("M 0,0 A 5,5 0 0,1 10,0").unwrap();
        assert!(matches!(
            path.tessellation(),
            Err(Error::UnsupportedFeature(_))
        ));
        assert!(!path.is_tessellated());
        path.set_config(TessellationConfig {
            arc_mode: ArcMode::Sample,
            ..Default::default()
        });
        assert!(path.tessellation().is_ok());
    }

    #[test]
    fn test_translate() {
        let mut path = Path::parse("M 10,10 l 5,0 H 30 v 5").unwrap();
        path.translate(-10, 5);
        assert_eq!(path.to_text(), "M 0,15 l 5,0 H 20 v 5");
        assert_eq!(path.bbox(), Some(BoundingBox::new(0., 15., 20., 20.)));
    }

    #[test]
    fn test_translate_relative_start() {
        let mut path = Path::parse("m 10,10 l 5,0 m 5,5 l 1,1").unwrap();
        let before = path.bbox().unwrap();
        path.translate(3, 4);
        // only the opening move changes
        assert_eq!(path.to_text(), "m 13,14 l 5,0 m 5,5 l 1,1");
        assert_eq!(path.bbox(), Some(before.translated(3., 4.)));
    }

    #[test]
    fn test_resize() {
        let mut path = Path::parse("M 0,0 L 10,0 L 10,20").unwrap();
        path.resize(10, -10).unwrap();
        assert_eq!(path.to_text(), "M 0,0 L 20,0 L 20,10");

        let mut path = Path::parse("M 10,10 l 10,10").unwrap();
        path.resize(10, 10).unwrap();
        assert_eq!(path.to_text(), "M 10,10 l 20,20");
        assert_eq!(path.bbox(), Some(BoundingBox::new(10., 10., 30., 30.)));
    }

    #[test]
    fn test_resize_degenerate_axis() {
        // zero height: y is left alone
        let mut path = Path::parse("M 5,5 H 15").unwrap();
        path.resize(10, 10).unwrap();
        assert_eq!(path.to_text(), "M 5,5 H 25");
    }

    #[test]
    fn test_resize_invalid() {
        let mut path = Path::parse("M 0,0 L 10,10").unwrap();
        let orig = path.clone();
        assert!(matches!(
            path.resize(-10, 0),
            Err(Error::InvalidValue(..))
        ));
        assert!(matches!(
            path.resize(0, -20),
            Err(Error::InvalidValue(..))
        ));
        assert_eq!(path, orig);
    }

    #[test]
    fn test_resize_rotated_arc() {
        let mut path = Path::parse("M 0,0 A 10,5 30 0,1 20,0 L 20,20").unwrap();
        assert!(matches!(
            path.resize(10, 0),
            Err(Error::UnsupportedFeature(_))
        ));

        // axis-aligned arcs scale their radii independently
        let mut path = Path::parse("M 0,0 A 10,5 0 0,1 20,0").unwrap();
        assert_eq!(path.bbox(), Some(BoundingBox::new(0., -5., 20., 0.)));
        path.resize(20, 0).unwrap();
        assert_eq!(path.to_text(), "M 0,0 A 20,5 0 0,1 40,0");
    }

    #[test]
    fn test_resize_empty() {
        let mut path = Path::default();
        assert!(path.resize(10, 10).is_ok());
        assert!(path.is_empty());
    }

    #[test]
    fn test_from_commands() {
        let path = Path::from(vec![
            Command::MoveTo {
                to: Coord::new(1, 1),
                relative: false,
            },
            Command::from((4, 5)),
        ]);
        assert_eq!(path.to_text(), "M 1,1 L 4,5");
        assert_eq!(path.indices().unwrap(), &[0, 1]);
        assert_eq!(path.segments().unwrap().len(), 1);
    }
}
