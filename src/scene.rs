use std::thread;

use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::geometry::BoundingBox;
use crate::path::Path;
use crate::TessellationConfig;

/// A path with an optional identifier (e.g. an SVG element `id`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub id: Option<String>,
    pub path: Path,
}

impl Shape {
    pub fn new(path: Path) -> Self {
        Self { id: None, path }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Identifier for messages: the id if present, else `#index`.
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{index}"),
        }
    }
}

/// An ordered collection of independent paths.
///
/// Each path owns its cursor state, so paths may be tessellated in any
/// order or concurrently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id.as_deref() == Some(id))
    }

    /// Apply `config` to every path in the scene.
    pub fn set_config(&mut self, config: &TessellationConfig) {
        for shape in &mut self.shapes {
            shape.path.set_config(config.clone());
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::union(self.shapes.iter().filter_map(|s| s.path.bbox()))
    }

    /// Tessellate every path in order, returning the failures keyed by
    /// shape index. A failing path does not prevent the others.
    pub fn tessellate_all(&self) -> Vec<(usize, Error)> {
        self.shapes
            .iter()
            .enumerate()
            .filter_map(|(idx, shape)| shape.path.tessellation().err().map(|e| (idx, e)))
            .inspect(|(idx, e)| warn!("shape {idx} failed to tessellate: {e}"))
            .collect()
    }

    /// As `tessellate_all`, spreading the shapes across up to `workers`
    /// threads. Results are cached in each path as normal.
    pub fn tessellate_parallel(&mut self, workers: usize) -> Vec<(usize, Error)> {
        let workers = workers.max(1);
        if workers == 1 || self.shapes.len() < 2 {
            return self.tessellate_all();
        }
        let chunk_size = self.shapes.len().div_ceil(workers);
        debug!(
            "tessellating {} shapes on {} threads",
            self.shapes.len(),
            self.shapes.len().div_ceil(chunk_size)
        );

        let mut failures: Vec<(usize, Error)> = thread::scope(|s| {
            let handles: Vec<_> = self
                .shapes
                .chunks_mut(chunk_size)
                .enumerate()
                .map(|(chunk_idx, chunk)| {
                    s.spawn(move || {
                        let mut errors = Vec::new();
                        for (i, shape) in chunk.iter().enumerate() {
                            if let Err(e) = shape.path.tessellation() {
                                errors.push((chunk_idx * chunk_size + i, e));
                            }
                        }
                        errors
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });
        failures.sort_by_key(|(idx, _)| *idx);
        for (idx, e) in &failures {
            warn!("shape {idx} failed to tessellate: {e}");
        }
        failures
    }

    /// Tessellate every path, failing with all errors if any path fails.
    pub fn tessellate_strict(&self) -> Result<()> {
        let failures = self.tessellate_all();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Multi(failures))
        }
    }
}

impl FromIterator<Shape> for Scene {
    fn from_iter<T: IntoIterator<Item = Shape>>(iter: T) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Path> for Scene {
    fn from_iter<T: IntoIterator<Item = Path>>(iter: T) -> Self {
        iter.into_iter().map(Shape::new).collect()
    }
}
