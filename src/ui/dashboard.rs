// Dashboard rendering
//
// Paints the fixed box-drawing frame exactly once, then overwrites only
// the dynamic cells in place on every accepted record. All cell positions
// are 1-based VT100 coordinates collected here as layout constants so the
// render loop carries no magic numbers.

use crate::app::SessionState;
use crate::telemetry::Record;
use crate::ui::canvas::Canvas;
use chrono::Local;
use std::io;
use unicode_width::UnicodeWidthStr;

/// Inner width of the frame between the `║` borders, in display columns
const FRAME_INNER_WIDTH: usize = 58;

/// Display columns between the left border and a row's unit suffix
const UNIT_OFFSET: usize = 51;

/// First row of the scrolling region below the frame, where the session
/// summary is printed
pub const SCROLL_REGION_ROW: u16 = 22;

/// A dynamic cell: fixed position plus the pad width that erases stale
/// longer values
struct Cell {
    row: u16,
    col: u16,
    width: usize,
}

const TIME_CELL: Cell = Cell { row: 4, col: 9, width: 25 };
const SERVER_CELL: Cell = Cell { row: 5, col: 11, width: 25 };
const MESSAGES_CELL: Cell = Cell { row: 6, col: 13, width: 15 };
const RATE_CELL: Cell = Cell { row: 6, col: 38, width: 15 };
const SLED_CURRENT_CELL: Cell = Cell { row: 9, col: 19, width: 15 };
const SLED_TEMP_CELL: Cell = Cell { row: 10, col: 16, width: 15 };
const TEC_CURRENT_CELL: Cell = Cell { row: 11, col: 18, width: 15 };
const PHOTO_CURRENT_CELL: Cell = Cell { row: 14, col: 20, width: 15 };
const SAG_POWER_CELL: Cell = Cell { row: 15, col: 16, width: 15 };
const TARGET_SAG_POWER_CELL: Cell = Cell { row: 16, col: 21, width: 15 };
const STATUS_CELL: Cell = Cell { row: 18, col: 13, width: 20 };

/// Fixed-layout telemetry dashboard
pub struct Dashboard {
    endpoint: String,
    frame_drawn: bool,
}

impl Dashboard {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            endpoint: format!("{host}:{port}"),
            frame_drawn: false,
        }
    }

    pub fn frame_drawn(&self) -> bool {
        self.frame_drawn
    }

    /// Render one accepted record
    ///
    /// The first call paints the static frame; every call overwrites the
    /// dynamic cells at their fixed coordinates.
    pub fn render<C: Canvas>(
        &mut self,
        canvas: &mut C,
        record: &Record,
        session: &SessionState,
    ) -> io::Result<()> {
        if !self.frame_drawn {
            self.draw_frame(canvas)?;
            self.frame_drawn = true;
        }

        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        self.write(canvas, &TIME_CELL, &timestamp)?;
        self.write(canvas, &SERVER_CELL, &self.endpoint)?;
        self.write(canvas, &MESSAGES_CELL, &session.message_count.to_string())?;
        self.write(canvas, &RATE_CELL, &format!("{:.1} Hz", session.current_rate()))?;

        self.write(canvas, &SLED_CURRENT_CELL, &format!("{:8.2}", record.sled_current_ma))?;
        self.write(canvas, &SLED_TEMP_CELL, &format!("{:8.2}", record.sled_temp_c))?;
        self.write(canvas, &TEC_CURRENT_CELL, &format!("{:8.2}", record.tec_current_ma))?;

        self.write(canvas, &PHOTO_CURRENT_CELL, &format!("{:8.2}", record.photo_current_ua))?;
        self.write(canvas, &SAG_POWER_CELL, &format!("{:8.4}", record.sag_power_v))?;
        self.write(canvas, &TARGET_SAG_POWER_CELL, &format!("{:8.4}", record.target_sag_power_v))?;

        self.write(canvas, &STATUS_CELL, session.link_quality().label())?;
        canvas.flush()
    }

    /// Overwrite the status cell with a termination message
    ///
    /// No-op when no record ever arrived (the frame was never painted).
    pub fn show_status<C: Canvas>(&self, canvas: &mut C, text: &str) -> io::Result<()> {
        if !self.frame_drawn {
            return Ok(());
        }
        self.write(canvas, &STATUS_CELL, text)?;
        canvas.flush()
    }

    fn write<C: Canvas>(&self, canvas: &mut C, cell: &Cell, text: &str) -> io::Result<()> {
        canvas.write_cell(cell.row, cell.col, text, cell.width)
    }

    fn draw_frame<C: Canvas>(&self, canvas: &mut C) -> io::Result<()> {
        let horizontal = "═".repeat(FRAME_INNER_WIDTH);
        let rows: Vec<String> = vec![
            format!("╔{horizontal}╗"),
            centered("🔬 SiPhOG Data Monitor"),
            format!("╠{horizontal}╣"),
            boxed(" Time:"),
            boxed(" Server:"),
            boxed(" Messages:                    Rate:"),
            format!("╠{horizontal}╣"),
            boxed(" 📊 LASER & CONTROL:"),
            unit_row("   SLED Current:", "mA"),
            unit_row("   SLED Temp:", "°C"),
            unit_row("   TEC Current:", "mA"),
            boxed(""),
            boxed(" ⚡ OPTICAL POWER:"),
            unit_row("   Photo Current:", "µA"),
            unit_row("   SAG Power:", "V"),
            unit_row("   Target SAG PWR:", "V"),
            boxed(""),
            boxed(" 📈 STATUS: Streaming..."),
            boxed(""),
            boxed(" 💡 Press Ctrl+C or q to stop"),
            format!("╚{horizontal}╝"),
        ];
        for (i, row) in rows.iter().enumerate() {
            canvas.write_cell(i as u16 + 1, 1, row, 0)?;
        }
        Ok(())
    }
}

/// Wrap content in `║` borders, padded to the frame's inner width
///
/// Padding counts display columns, not chars, so rows carrying emoji keep
/// the right border aligned with the plain rows.
fn boxed(content: &str) -> String {
    let pad = FRAME_INNER_WIDTH.saturating_sub(UnicodeWidthStr::width(content));
    format!("║{content}{}║", " ".repeat(pad))
}

/// Center content between the borders by display width
fn centered(content: &str) -> String {
    let pad = FRAME_INNER_WIDTH.saturating_sub(UnicodeWidthStr::width(content));
    let left = pad / 2;
    format!("║{}{content}{}║", " ".repeat(left), " ".repeat(pad - left))
}

/// Label row with its unit suffix at a fixed column
fn unit_row(label: &str, unit: &str) -> String {
    let pad = UNIT_OFFSET.saturating_sub(UnicodeWidthStr::width(label));
    boxed(&format!("{label}{}{unit}", " ".repeat(pad)))
}
