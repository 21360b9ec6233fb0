//! Windowing: long panel → row-per-window table with regime diagnostics.

pub mod engine;
pub mod labels;
pub mod schema;

pub use engine::{make_windows, make_windows_multi, SkippedWindow, WindowRow, WindowSet};
pub use labels::{summarize_window_states, WindowLabels, MODE_UNDEFINED, PURITY_THRESHOLD};
pub use schema::{validate_columns, WindowColumns, WindowError};
