//! Path data: parsing, evaluation and tessellation of SVG-style path
//! commands with integer arguments.

mod assemble;
mod bbox;
mod command;
mod cursor;
mod element;
mod syntax;
mod tessellate;

pub use assemble::{assemble, to_text, Segment, Tessellation};
pub use bbox::path_bbox;
pub use command::{Command, Coord};
pub use cursor::{implicit_offset, CurveFamily, CursorState};
pub use element::Path;
pub use syntax::{next_command, parse_path_data, CommandReader};
pub use tessellate::{
    cubic_point, quadratic_point, resolve, tessellate_command, ArcCenter, ArcSegment, Primitive,
};
