use super::command::{Command, Coord};
use crate::errors::{Error, Result};

const COMMAND_LETTERS: &str = "MmLlHhVvZzCcSsQqTtAa";

fn is_command_letter(c: char) -> bool {
    COMMAND_LETTERS.contains(c)
}

/// Character-level cursor over path data text.
///
/// Offsets reported in errors are character (not byte) offsets into the
/// original attribute text.
pub struct SvgPathSyntax {
    data: Vec<char>,
    index: usize,
}

impl SvgPathSyntax {
    pub fn new(data: &str) -> Self {
        Self::at(data, 0)
    }

    pub fn at(data: &str, index: usize) -> Self {
        Self {
            data: data.chars().collect(),
            index,
        }
    }
}

impl PathSyntax for SvgPathSyntax {
    fn current(&self) -> Option<char> {
        self.data.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn position(&self) -> usize {
        self.index
    }
}

pub trait PathSyntax {
    fn current(&self) -> Option<char>;
    fn advance(&mut self);
    fn position(&self) -> usize;

    fn at_end(&self) -> bool {
        self.current().is_none()
    }

    fn skip_wsp_comma(&mut self) {
        // SVG definition of whitespace is 0x20, 0x9, 0xA, 0xD. Rust's is_ascii_whitespace()
        // also includes 0xC, but is close enough and convenient.
        while let Some(c) = self.current() {
            if c.is_ascii_whitespace() || c == ',' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn at_number(&self) -> bool {
        matches!(self.current(), Some('0'..='9' | '-' | '+'))
    }

    /// Failure for a position where a numeric argument of `command` was
    /// expected. A stray letter which isn't a command at all is reported
    /// as such, since that's the more useful diagnostic.
    fn argument_error(&self, command: char, offset: usize) -> Error {
        match self.current() {
            Some(c) if c.is_ascii_alphabetic() && !is_command_letter(c) => Error::UnknownCommand {
                command: c,
                offset: self.position(),
            },
            _ => Error::MissingArgument { command, offset },
        }
    }

    fn read_int(&mut self, command: char) -> Result<i32> {
        self.skip_wsp_comma();
        let offset = self.position();
        let mut s = String::new();
        if let Some(sign @ ('-' | '+')) = self.current() {
            s.push(sign);
            self.advance();
        }
        let mut digits = 0;
        while let Some(ch @ '0'..='9') = self.current() {
            s.push(ch);
            self.advance();
            digits += 1;
        }
        if digits == 0 {
            return Err(self.argument_error(command, offset));
        }
        // only integers are valid here; '1.5' or '1e3' is malformed rather
        // than two separate numbers.
        if matches!(self.current(), Some('.' | 'e' | 'E')) {
            return Err(Error::MissingArgument { command, offset });
        }
        s.parse()
            .map_err(|_| Error::MissingArgument { command, offset })
    }

    fn read_flag(&mut self, command: char) -> Result<bool> {
        self.skip_wsp_comma();
        let offset = self.position();
        // per the grammar for `a`/`A`, could have '00' etc for
        // the two adjacent flags...
        let res = match self.current() {
            Some('0') => false,
            Some('1') => true,
            _ => return Err(self.argument_error(command, offset)),
        };
        self.advance();
        Ok(res)
    }

    fn read_coord(&mut self, command: char) -> Result<Coord> {
        let x = self.read_int(command)?;
        let y = self.read_int(command)?;
        Ok(Coord::new(x, y))
    }

    /// Read the argument group for `letter`, which must be a valid command letter.
    fn read_arguments(&mut self, letter: char) -> Result<Command> {
        let relative = letter.is_ascii_lowercase();
        let cmd = match letter.to_ascii_uppercase() {
            'M' => Command::MoveTo {
                to: self.read_coord(letter)?,
                relative,
            },
            'L' => Command::LineTo {
                to: self.read_coord(letter)?,
                relative,
            },
            'H' => Command::HorizontalLineTo {
                x: self.read_int(letter)?,
                relative,
            },
            'V' => Command::VerticalLineTo {
                y: self.read_int(letter)?,
                relative,
            },
            'C' => Command::CubicCurveTo {
                ctrl1: self.read_coord(letter)?,
                ctrl2: self.read_coord(letter)?,
                to: self.read_coord(letter)?,
                relative,
            },
            'S' => Command::SmoothCubicCurveTo {
                ctrl2: self.read_coord(letter)?,
                to: self.read_coord(letter)?,
                relative,
            },
            'Q' => Command::QuadraticCurveTo {
                ctrl: self.read_coord(letter)?,
                to: self.read_coord(letter)?,
                relative,
            },
            'T' => Command::SmoothQuadraticCurveTo {
                to: self.read_coord(letter)?,
                relative,
            },
            'A' => Command::EllipticalArcTo {
                rx: self.read_int(letter)?,
                ry: self.read_int(letter)?,
                rotation: self.read_int(letter)?,
                large_arc: self.read_flag(letter)?,
                sweep: self.read_flag(letter)?,
                to: self.read_coord(letter)?,
                relative,
            },
            'Z' => Command::ClosePath,
            _ => {
                return Err(Error::UnknownCommand {
                    command: letter,
                    offset: self.position().saturating_sub(1),
                })
            }
        };
        Ok(cmd)
    }
}

/// Reads successive commands from path data.
///
/// "The command letter can be eliminated on subsequent commands if the same
/// command is used multiple times in a row", so the previous letter is kept
/// to expand implicit repeats. Each repeat yields its own `Command`.
pub struct CommandReader {
    tokens: SvgPathSyntax,
    prev_letter: Option<char>,
}

impl CommandReader {
    pub fn new(data: &str) -> Self {
        Self::at(data, 0)
    }

    pub fn at(data: &str, pos: usize) -> Self {
        Self {
            tokens: SvgPathSyntax::at(data, pos),
            prev_letter: None,
        }
    }

    pub fn position(&self) -> usize {
        self.tokens.position()
    }

    pub fn read_command(&mut self) -> Result<Option<Command>> {
        self.tokens.skip_wsp_comma();
        let offset = self.tokens.position();
        let Some(c) = self.tokens.current() else {
            return Ok(None);
        };

        let letter = if is_command_letter(c) {
            self.tokens.advance();
            c
        } else if self.tokens.at_number() {
            match self.prev_letter {
                // "If a moveto is followed by multiple pairs of coordinates,
                // the subsequent pairs are treated as implicit lineto commands."
                Some('M') => 'L',
                Some('m') => 'l',
                Some(prev) if prev != 'Z' && prev != 'z' => prev,
                _ => return Err(Error::UnknownCommand { command: c, offset }),
            }
        } else {
            return Err(Error::UnknownCommand { command: c, offset });
        };

        let cmd = self.tokens.read_arguments(letter)?;
        self.prev_letter = Some(letter);
        Ok(Some(cmd))
    }
}

impl Iterator for CommandReader {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_command().transpose()
    }
}

/// Recognise the command starting at (or after separators following) `pos`
/// in `text`, returning it with the position just past its arguments.
///
/// Returns `Ok(None)` if only separators remain. An explicit command letter
/// is required; implicit repeats are only recognised by `parse_path_data`.
///
/// `pos` and the returned position are character offsets (as in error
/// offsets), not byte offsets. Each call re-reads `text` from the start,
/// so walking a long path this way is quadratic; use `CommandReader` or
/// `parse_path_data` to read a whole path.
pub fn next_command(text: &str, pos: usize) -> Result<Option<(Command, usize)>> {
    let mut reader = CommandReader::at(text, pos);
    Ok(reader.read_command()?.map(|cmd| (cmd, reader.position())))
}

/// Parse a complete path data attribute into its ordered command sequence.
///
/// Any unrecognised command letter or malformed argument fails the whole
/// path; nothing is skipped.
pub fn parse_path_data(text: &str) -> Result<Vec<Command>> {
    CommandReader::new(text).collect()
}
