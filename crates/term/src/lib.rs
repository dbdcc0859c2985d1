//! Terminal rendering for the sorting game.
//!
//! [`SortView`] turns a session snapshot into styled lines without any I/O;
//! [`TerminalRenderer`] writes those lines to the terminal with crossterm,
//! redrawing only rows that changed.

pub mod renderer;
pub mod view;

pub use eco_sorter_core as core;
pub use eco_sorter_types as types;

pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{star_glyphs, summary_lines, Line, SortView, Style};
