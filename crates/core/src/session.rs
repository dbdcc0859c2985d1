//! Session module - the play-session state machine
//!
//! A [`SessionController`] owns one [`SessionState`] at a time and moves it
//! through `Idle -> Playing -> Ended`. Every transition returns a plain result
//! value ([`TickResult`], [`DropResult`], [`SessionSummary`]) for the
//! presentation layer to render.
//!
//! The controller does no locking and no I/O. Callers serialize ticks and
//! drops (one command queue) and hand high scores to storage themselves via
//! [`SessionController::take_pending_high_score`].

use serde::Serialize;
use tracing::debug;

use crate::error::SessionError;
use crate::rng::{ItemSupplier, RandomSource, SimpleRng};
use crate::scoring::{
    accuracy, is_bonus_milestone, score_after_correct, score_after_incorrect,
    streak_bonus_seconds, RulePolicy,
};
use crate::snapshot::SessionSnapshot;
use crate::types::*;

/// Mutable state of one play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    score: u32,
    time_remaining: u32,
    streak: u32,
    correct_attempts: u32,
    total_attempts: u32,
    current_item: Option<Item>,
    phase: Phase,
    /// Carried across sessions.
    high_score: u32,
}

impl SessionState {
    fn fresh(high_score: u32) -> Self {
        Self {
            score: 0,
            time_remaining: SESSION_SECONDS,
            streak: 0,
            correct_attempts: 0,
            total_attempts: 0,
            current_item: None,
            phase: Phase::Idle,
            high_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn correct_attempts(&self) -> u32 {
        self.correct_attempts
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn current_item(&self) -> Option<Item> {
        self.current_item
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Countdown is in its final seconds.
    pub fn time_warning(&self) -> bool {
        self.is_playing() && self.time_remaining <= TIME_WARNING_SECONDS
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::fresh(0)
    }
}

/// Final result of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub score: u32,
    pub correct_attempts: u32,
    pub total_attempts: u32,
    /// Ratio in `[0, 1]`.
    pub accuracy: f64,
    pub stars: u8,
    pub reason: EndReason,
    /// High score after this session was recorded.
    pub high_score: u32,
    /// This session beat the previous high score.
    pub new_high_score: bool,
}

impl SessionSummary {
    /// Accuracy as a percentage.
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }
}

/// What happened to a dropped item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutcome {
    Correct,
    /// Correct, and the streak hit a bonus milestone.
    CorrectWithBonus,
    Incorrect,
    /// Released outside every bin; nothing is scored.
    OffTarget,
    /// Correct, and the score cap ended the session.
    Won,
}

impl DropOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(
            self,
            DropOutcome::Correct | DropOutcome::CorrectWithBonus | DropOutcome::Won
        )
    }
}

/// Details of a resolved drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropReport {
    pub outcome: DropOutcome,
    /// The item that was on screen when the drop happened.
    pub item: Item,
    pub dropped: Category,
    /// `None` for off-target drops.
    pub accepted: Option<Category>,
    pub score: u32,
    pub streak: u32,
    pub time_remaining: u32,
    /// Seconds added by this drop (0 unless a milestone was reached).
    pub bonus_seconds: u32,
    /// Item presented after this drop; `None` once the session ended.
    pub next_item: Option<Item>,
    /// Set when this drop ended the session.
    pub summary: Option<SessionSummary>,
}

/// Result of [`SessionController::resolve_drop`] and friends.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropResult {
    /// No session in progress.
    Ignored,
    Resolved(DropReport),
}

impl DropResult {
    pub fn report(&self) -> Option<&DropReport> {
        match self {
            DropResult::Ignored => None,
            DropResult::Resolved(report) => Some(report),
        }
    }

    pub fn outcome(&self) -> Option<DropOutcome> {
        self.report().map(|r| r.outcome)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, DropResult::Ignored)
    }
}

/// Result of [`SessionController::tick`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TickResult {
    /// No session in progress.
    Ignored,
    Running { time_remaining: u32 },
    /// The countdown ran out on this tick.
    Ended {
        time_remaining: u32,
        summary: SessionSummary,
    },
}

impl TickResult {
    pub fn time_remaining(&self) -> Option<u32> {
        match self {
            TickResult::Ignored => None,
            TickResult::Running { time_remaining } | TickResult::Ended { time_remaining, .. } => {
                Some(*time_remaining)
            }
        }
    }

    /// The session ended on this tick; the caller should stop its ticker.
    pub fn ended(&self) -> bool {
        matches!(self, TickResult::Ended { .. })
    }
}

/// Owns the session state and applies the game rules to it.
#[derive(Debug, Clone)]
pub struct SessionController<R = SimpleRng> {
    state: SessionState,
    supplier: ItemSupplier,
    rng: R,
    policy: RulePolicy,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    /// Cached result of the first `end` call of this session.
    summary: Option<SessionSummary>,
    /// Beaten high score not yet handed to storage.
    pending_high_score: Option<u32>,
}

impl SessionController<SimpleRng> {
    /// Controller with the built-in catalog, canonical rules and a seeded LCG.
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed), RulePolicy::CANONICAL)
    }
}

impl<R: RandomSource> SessionController<R> {
    /// Controller drawing from `rng` under `policy`.
    pub fn with_rng(rng: R, policy: RulePolicy) -> Self {
        Self {
            state: SessionState::default(),
            supplier: ItemSupplier::standard(),
            rng,
            policy,
            session_id: 0,
            summary: None,
            pending_high_score: None,
        }
    }

    /// Replace the item supplier (custom catalogs).
    pub fn with_supplier(mut self, supplier: ItemSupplier) -> Self {
        self.supplier = supplier;
        self
    }

    pub fn with_policy(mut self, policy: RulePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Summary of the current session, once it has ended.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Merge a high score loaded from storage.
    ///
    /// Keeps the larger of the stored and in-memory values, so a late load
    /// never lowers a score beaten in the meantime.
    pub fn restore_high_score(&mut self, stored: u32) {
        self.state.high_score = self.state.high_score.max(stored);
    }

    /// Take the high score that still needs saving, if any.
    pub fn take_pending_high_score(&mut self) -> Option<u32> {
        self.pending_high_score.take()
    }

    /// Begin a new session, discarding the current one.
    pub fn start(&mut self) -> &SessionState {
        self.state = SessionState::fresh(self.state.high_score);
        self.state.phase = Phase::Playing;
        self.state.current_item = Some(self.supplier.next(&mut self.rng));
        self.summary = None;
        self.session_id = self.session_id.wrapping_add(1);

        debug!(session_id = self.session_id, "session started");
        &self.state
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickResult {
        if !self.state.is_playing() {
            return TickResult::Ignored;
        }

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);

        if self.state.time_remaining == 0 {
            let summary = self.end(EndReason::TimedOut);
            return TickResult::Ended {
                time_remaining: 0,
                summary,
            };
        }

        TickResult::Running {
            time_remaining: self.state.time_remaining,
        }
    }

    /// Judge a drop of an item of category `dropped` into a bin accepting `accepted`.
    pub fn resolve_drop(&mut self, dropped: Category, accepted: Category) -> DropResult {
        let Some(item) = self.playing_item() else {
            return DropResult::Ignored;
        };

        self.state.total_attempts += 1;

        let mut bonus_seconds = 0;
        let outcome = if Bin::new(accepted).accepts(dropped) {
            self.state.correct_attempts += 1;
            self.state.score = score_after_correct(self.state.score);
            self.state.streak += 1;

            // A winning drop ends the session, so no bonus time is granted.
            if self.policy.is_winning_score(self.state.score) {
                self.state.score = SCORE_CAP;
                DropOutcome::Won
            } else if is_bonus_milestone(self.state.streak) {
                bonus_seconds = streak_bonus_seconds(self.state.streak);
                self.state.time_remaining += bonus_seconds;
                DropOutcome::CorrectWithBonus
            } else {
                DropOutcome::Correct
            }
        } else {
            self.state.streak = 0;
            self.state.score = score_after_incorrect(self.state.score);
            DropOutcome::Incorrect
        };

        let mut summary = None;
        if outcome == DropOutcome::Won {
            summary = Some(self.end(EndReason::Won));
        } else {
            self.state.current_item = Some(self.supplier.next(&mut self.rng));
        }

        DropResult::Resolved(DropReport {
            outcome,
            item,
            dropped,
            accepted: Some(accepted),
            score: self.state.score,
            streak: self.state.streak,
            time_remaining: self.state.time_remaining,
            bonus_seconds,
            next_item: self.state.current_item,
            summary,
        })
    }

    /// Drop the current item into a bin accepting `accepted`.
    pub fn drop_current(&mut self, accepted: Category) -> DropResult {
        match self.playing_item() {
            Some(item) => self.resolve_drop(item.category, accepted),
            None => DropResult::Ignored,
        }
    }

    /// [`resolve_drop`](Self::resolve_drop) with category names from an external source.
    pub fn resolve_drop_named(
        &mut self,
        dropped: &str,
        accepted: &str,
    ) -> Result<DropResult, SessionError> {
        let dropped = parse_category(dropped)?;
        let accepted = parse_category(accepted)?;
        Ok(self.resolve_drop(dropped, accepted))
    }

    /// The current item was released outside every bin.
    ///
    /// No attempt is recorded and the streak survives; a fresh item replaces it.
    pub fn discard_current(&mut self) -> DropResult {
        let Some(item) = self.playing_item() else {
            return DropResult::Ignored;
        };

        self.state.current_item = Some(self.supplier.next(&mut self.rng));

        DropResult::Resolved(DropReport {
            outcome: DropOutcome::OffTarget,
            item,
            dropped: item.category,
            accepted: None,
            score: self.state.score,
            streak: self.state.streak,
            time_remaining: self.state.time_remaining,
            bonus_seconds: 0,
            next_item: self.state.current_item,
            summary: None,
        })
    }

    /// Finish the session.
    ///
    /// Idempotent: later calls return the first summary unchanged, whatever
    /// `reason` they pass.
    pub fn end(&mut self, reason: EndReason) -> SessionSummary {
        if let Some(summary) = &self.summary {
            return summary.clone();
        }

        self.state.phase = Phase::Ended;
        self.state.current_item = None;

        let new_high_score = self.state.score > self.state.high_score;
        if new_high_score {
            self.state.high_score = self.state.score;
            self.pending_high_score = Some(self.state.score);
        }

        let correct = self.state.correct_attempts;
        let total = self.state.total_attempts;
        let summary = SessionSummary {
            score: self.state.score,
            correct_attempts: correct,
            total_attempts: total,
            accuracy: accuracy(correct, total),
            stars: self.policy.star_thresholds.stars(correct, total),
            reason,
            high_score: self.state.high_score,
            new_high_score,
        };

        debug!(
            session_id = self.session_id,
            reason = reason.as_str(),
            score = summary.score,
            stars = summary.stars,
            "session ended"
        );

        self.summary = Some(summary.clone());
        summary
    }

    /// Point-in-time copy for presentation.
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.session_id = self.session_id;
        out.phase = self.state.phase;
        out.score = self.state.score;
        out.high_score = self.state.high_score;
        out.time_remaining = self.state.time_remaining;
        out.time_warning = self.state.time_warning();
        out.streak = self.state.streak;
        out.correct_attempts = self.state.correct_attempts;
        out.total_attempts = self.state.total_attempts;
        out.current_item = self.state.current_item;
        out.summary.clone_from(&self.summary);
    }

    fn playing_item(&self) -> Option<Item> {
        if !self.state.is_playing() {
            return None;
        }
        self.state.current_item
    }
}

fn parse_category(name: &str) -> Result<Category, SessionError> {
    Category::from_str(name).ok_or_else(|| SessionError::InvalidCategory(name.to_string()))
}

impl Default for SessionController<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
