// Terminal canvas
//
// The dashboard never touches the terminal directly; it goes through the
// Canvas trait, whose core operation is writing a fixed-width cell at an
// absolute (row, column) position. Screen clearing and cursor parking are
// session-level hooks that default to no-ops. Tests swap in a recording
// implementation and assert on captured writes.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Absolute-positioned cell writer
///
/// Rows and columns are 1-based, matching VT100 cursor addressing. A
/// `width` of zero writes the text as-is; a positive width pads with
/// trailing spaces (by display columns) so a shorter value erases the
/// stale tail of a longer one.
pub trait Canvas {
    fn write_cell(&mut self, row: u16, col: u16, text: &str, width: usize) -> io::Result<()>;

    /// Clear the backing screen before the first frame paint
    fn clear_all(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Leave the cursor at the start of `row` so ordinary prints scroll
    /// below the fixed frame
    fn park(&mut self, row: u16) -> io::Result<()> {
        let _ = row;
        Ok(())
    }

    /// Push queued writes out to the device
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Pad `text` with trailing spaces to `width` display columns
fn pad_to_width(text: &str, width: usize) -> String {
    let cols = UnicodeWidthStr::width(text);
    if width == 0 || cols >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - cols))
    }
}

/// Crossterm-backed canvas writing to any `io::Write` sink
pub struct TerminalCanvas<W: Write> {
    out: W,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn write_cell(&mut self, row: u16, col: u16, text: &str, width: usize) -> io::Result<()> {
        let padded = pad_to_width(text, width);
        // MoveTo is 0-based; the layout constants are 1-based VT100 coords
        queue!(
            self.out,
            MoveTo(col.saturating_sub(1), row.saturating_sub(1)),
            Print(padded)
        )
    }

    fn clear_all(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn park(&mut self, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(0, row.saturating_sub(1)))?;
        self.out.flush()
    }
}

/// Captures cell writes for render tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub writes: Vec<CellWrite>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub row: u16,
    pub col: u16,
    pub text: String,
    pub width: usize,
}

#[cfg(test)]
impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent text written at (row, col), if any
    pub fn cell_at(&self, row: u16, col: u16) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.row == row && w.col == col)
            .map(|w| w.text.as_str())
    }

    pub fn writes_at(&self, row: u16, col: u16) -> usize {
        self.writes
            .iter()
            .filter(|w| w.row == row && w.col == col)
            .count()
    }
}

#[cfg(test)]
impl Canvas for RecordingCanvas {
    fn write_cell(&mut self, row: u16, col: u16, text: &str, width: usize) -> io::Result<()> {
        self.writes.push(CellWrite {
            row,
            col,
            text: text.to_string(),
            width,
        });
        Ok(())
    }
}
