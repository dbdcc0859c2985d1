//! Core session logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the sorting game: the item catalog, the
//! seedable item supplier, scoring, and the session state machine. It has
//! **no I/O**: no terminal, no storage, no timers. That makes it:
//!
//! - **Deterministic**: the same seed yields the same item sequence
//! - **Testable**: time is advanced by calling `tick()`, not by waiting
//! - **Portable**: runs under the terminal front end, in tests, or headless
//!
//! # Module Structure
//!
//! - [`catalog`]: the fixed set of trash items, three per category
//! - [`rng`]: seeded LCG, the [`RandomSource`] seam and the [`ItemSupplier`]
//! - [`scoring`]: points, streak bonus, accuracy, stars and rule policies
//! - [`session`]: the [`SessionController`] state machine
//! - [`feedback`]: player-facing messages for drop results
//! - [`snapshot`]: point-in-time copies for rendering
//!
//! # Game Rules
//!
//! - **Countdown**: 60 seconds, one `tick()` per second
//! - **Scoring**: +10 for a correct bin, -5 for a wrong one, never below 0
//! - **Streak bonus**: every 5th consecutive correct drop adds 5 seconds
//! - **Stars**: 3/2/1 stars at 90/70/50 percent accuracy (configurable)
//! - **Score cap** (optional policy): reaching 100 wins immediately
//!
//! # Example
//!
//! ```
//! use eco_sorter_core::{DropOutcome, SessionController};
//! use eco_sorter_types::{Category, EndReason};
//!
//! let mut session = SessionController::new(12345);
//! session.start();
//!
//! let result = session.resolve_drop(Category::Plastic, Category::Plastic);
//! assert_eq!(result.outcome(), Some(DropOutcome::Correct));
//! assert_eq!(session.state().score(), 10);
//!
//! let summary = session.end(EndReason::Aborted);
//! assert_eq!(summary.stars, 3);
//! ```

pub mod catalog;
pub mod error;
pub mod feedback;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use eco_sorter_types as types;

// Re-export commonly used types for convenience
pub use catalog::CATALOG;
pub use error::SessionError;
pub use feedback::{feedback_for_drop, streak_banner, Feedback, Tone};
pub use rng::{ItemSupplier, RandomSource, SimpleRng};
pub use scoring::{calculate_stars, BonusMessage, RulePolicy, StarThresholds};
pub use session::{
    DropOutcome, DropReport, DropResult, SessionController, SessionState, SessionSummary,
    TickResult,
};
pub use snapshot::SessionSnapshot;
