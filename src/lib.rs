//! Eco Sorter (workspace facade crate).
//!
//! Re-exports the workspace crates under one name:
//! `eco_sorter::{core, input, runtime, term, types}`.

pub use eco_sorter_core as core;
pub use eco_sorter_input as input;
pub use eco_sorter_runtime as runtime;
pub use eco_sorter_term as term;
pub use eco_sorter_types as types;
