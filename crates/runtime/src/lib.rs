//! Async runtime around the session core.
//!
//! - [`driver`]: single-owner command loop around the session controller
//! - [`ticker`]: the one-second session clock
//! - [`store`]: high-score persistence with retry on failure
//! - [`flavor`]: fun facts about the current item, with a fallback
//! - [`config`]: environment configuration
//! - [`runtime`]: sync bridge for the terminal loop

pub mod config;
pub mod driver;
pub mod flavor;
pub mod runtime;
pub mod store;
pub mod ticker;

pub use eco_sorter_core as core;
pub use eco_sorter_types as types;

pub use config::GameConfig;
pub use driver::{DriverHandle, GameCommand, GameDriver, GameEvent, Services};
pub use flavor::{CannedFlavorText, FlavorTextError, FlavorTextSource, FALLBACK_TEXT};
pub use runtime::GameHandle;
pub use store::{HighScoreSaver, HighScoreStore, JsonFileStore, MemoryStore, StoreError};
pub use ticker::{IntervalTicker, ManualTicker, Ticker, TickerHandle};
