use std::ops::Range;

use itertools::Itertools;
use log::debug;

use super::command::Command;
use super::cursor::CursorState;
use super::tessellate::tessellate_command;
use crate::errors::Result;
use crate::geometry::Point;
use crate::TessellationConfig;

/// One sub-path's share of the vertex and index buffers.
///
/// `vertices` is in units of vertices (not `f32` values).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde_derive::Serialize))]
pub struct Segment {
    pub vertices: Range<usize>,
    pub indices: Range<usize>,
}

/// Renderable output of a whole path.
///
/// `vertices` holds flattened x,y pairs; `indices` is a line list, i.e.
/// each consecutive pair of indices is one edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellation {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub segments: Vec<Segment>,
    /// Cursor after the final command
    pub cursor: CursorState,
}

impl Tessellation {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn vertex(&self, index: u32) -> Option<Point> {
        let i = index as usize * 2;
        Some(Point::new(*self.vertices.get(i)?, *self.vertices.get(i + 1)?))
    }

    /// Edges as index pairs
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.indices.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Segment containing the given vertex index
    pub fn segment_of(&self, index: u32) -> Option<usize> {
        self.segments
            .iter()
            .position(|seg| seg.vertices.contains(&(index as usize)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    Idle,
    MoveTo,
    Drawing,
    Close,
    Done,
}

#[derive(Debug, Clone, Copy)]
struct SegmentStart {
    vertex: usize,
    index: usize,
}

struct Assembler<'a> {
    config: &'a TessellationConfig,
    state: AssemblerState,
    cursor: CursorState,
    out: Tessellation,
    open: Option<SegmentStart>,
    // index and position of the most recent vertex in the open segment
    last_vertex: Option<(u32, Point)>,
}

impl<'a> Assembler<'a> {
    fn new(config: &'a TessellationConfig) -> Self {
        Self {
            config,
            state: AssemblerState::Idle,
            cursor: CursorState::default(),
            out: Tessellation::default(),
            open: None,
            last_vertex: None,
        }
    }

    fn step(&mut self, command: &Command) -> Result<()> {
        debug_assert_ne!(self.state, AssemblerState::Done);
        let (points, next) = tessellate_command(command, self.cursor, self.config)?;
        self.cursor = next;

        match command {
            Command::MoveTo { .. } => {
                if matches!(self.state, AssemblerState::Drawing | AssemblerState::Close) {
                    self.bridge();
                }
                self.end_segment();
                self.state = AssemblerState::MoveTo;
            }
            Command::ClosePath => {
                self.append_run(&points);
                self.state = AssemblerState::Close;
            }
            _ => {
                self.append_run(&points);
                self.state = AssemblerState::Drawing;
            }
        }
        Ok(())
    }

    /// Duplicate the last index so the segment about to start is not
    /// joined to the previous one. In a line list this is a zero-length
    /// edge on the final vertex of the closing segment.
    fn bridge(&mut self) {
        if let Some(&last) = self.out.indices.last() {
            self.out.indices.extend([last, last]);
        }
    }

    fn end_segment(&mut self) {
        if let Some(start) = self.open.take() {
            self.out.segments.push(Segment {
                vertices: start.vertex..self.out.vertex_count(),
                indices: start.index..self.out.indices.len(),
            });
        }
        self.last_vertex = None;
    }

    fn append_run(&mut self, points: &[Point]) {
        let Some(&last_point) = points.last() else {
            return;
        };
        if self.open.is_none() {
            self.open = Some(SegmentStart {
                vertex: self.out.vertex_count(),
                index: self.out.indices.len(),
            });
        }
        let base = self.out.vertex_count() as u32;
        for p in points {
            self.out.vertices.extend([p.x, p.y]);
        }
        // stitch to the previous run unless it already ends where this starts
        if let Some((prev_idx, prev_point)) = self.last_vertex {
            if prev_point != points[0] {
                self.out.indices.extend([prev_idx, base]);
            }
        }
        for i in 1..points.len() as u32 {
            self.out.indices.extend([base + i - 1, base + i]);
        }
        self.last_vertex = Some((base + points.len() as u32 - 1, last_point));
    }

    fn finish(mut self) -> Tessellation {
        self.end_segment();
        self.state = AssemblerState::Done;
        self.out.cursor = self.cursor;
        self.out
    }
}

/// Evaluate a command sequence from a fresh cursor at the path-local origin.
///
/// Any command which fails to tessellate aborts the whole path.
pub fn assemble(commands: &[Command], config: &TessellationConfig) -> Result<Tessellation> {
    let mut assembler = Assembler::new(config);
    for command in commands {
        assembler.step(command)?;
    }
    let tess = assembler.finish();
    debug!(
        "assembled {} commands: {} vertices, {} indices, {} segments",
        commands.len(),
        tess.vertex_count(),
        tess.indices.len(),
        tess.segments.len()
    );
    Ok(tess)
}

/// Canonical path data text for a command sequence.
pub fn to_text(commands: &[Command]) -> String {
    commands.iter().join(" ")
}
