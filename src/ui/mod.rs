// UI rendering module
//
// The canvas submodule isolates terminal escape-sequence output behind a
// cell-writing trait; the dashboard submodule owns the fixed layout and
// the in-place repaint of dynamic cells.

pub mod canvas;
pub mod dashboard;

pub use canvas::{Canvas, TerminalCanvas};
pub use dashboard::{Dashboard, SCROLL_REGION_ROW};
