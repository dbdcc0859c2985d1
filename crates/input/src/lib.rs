//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::PlayerAction`]. Bins are
//! picked by number (`1`-`5`) or by initial; there is no pointer dragging in a
//! terminal, so a "drop" is a single key press.

pub mod map;

pub use eco_sorter_types as types;

pub use map::{bin_key, handle_key_event, should_quit};
