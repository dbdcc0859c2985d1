//! Game driver.
//!
//! Owns the [`SessionController`] and serializes every input through one
//! command queue: player actions, clock ticks and results of background work
//! (high-score loads) all arrive as [`GameCommand`]s and are applied one at a
//! time. Results go out as [`GameEvent`]s.
//!
//! Background work (high-score load and save, fun facts) runs on a `JoinSet`
//! owned by the driver and never mutates the session directly.

use std::ops::ControlFlow;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::core::{
    feedback_for_drop, DropResult, Feedback, SessionController, SessionSnapshot, SessionSummary,
    TickResult,
};
use crate::flavor::{describe_or_fallback, FlavorTextSource};
use crate::store::{HighScoreSaver, HighScoreStore};
use crate::ticker::{Ticker, TickerHandle};
use crate::types::{Category, EndReason, Item};

/// Input to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Start,
    /// Drop the current item into the bin accepting `accepted`.
    Drop { accepted: Category },
    /// Drop with category names from an external source.
    DropNamed { dropped: String, accepted: String },
    /// Release the current item outside every bin.
    Discard,
    /// One second elapsed (manual clock).
    Tick,
    /// One second elapsed on the clock started for `session_id`.
    TimerTick { session_id: u32 },
    End,
    RequestFlavorText,
    /// Stored high score arrived.
    HighScoreLoaded(u32),
    Shutdown,
}

/// Output of the driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Started {
        snapshot: SessionSnapshot,
        feedback: Feedback,
    },
    Ticked {
        result: TickResult,
        snapshot: SessionSnapshot,
    },
    Dropped {
        result: DropResult,
        feedback: Vec<Feedback>,
        snapshot: SessionSnapshot,
    },
    /// A command could not be applied.
    Rejected { reason: String },
    Ended {
        summary: SessionSummary,
        snapshot: SessionSnapshot,
    },
    FlavorText {
        session_id: u32,
        item: Item,
        text: String,
    },
    HighScoreLoaded { snapshot: SessionSnapshot },
}

/// Collaborators the driver talks to.
pub struct Services {
    pub store: Arc<dyn HighScoreStore>,
    pub flavor: Arc<dyn FlavorTextSource>,
    pub ticker: Box<dyn Ticker>,
    pub user_id: String,
}

pub struct GameDriver {
    session: SessionController,
    saver: Arc<HighScoreSaver>,
    flavor: Arc<dyn FlavorTextSource>,
    ticker: Box<dyn Ticker>,
    clock: TickerHandle,
    /// Weak so the queue closes once every outside sender is gone.
    commands: mpsc::WeakSender<GameCommand>,
    events: mpsc::UnboundedSender<GameEvent>,
    /// High-score writes; awaited on shutdown.
    saves: JoinSet<()>,
    /// Loads and fun facts; aborted on shutdown.
    background: JoinSet<()>,
}

impl GameDriver {
    pub fn new(
        session: SessionController,
        services: Services,
        commands: &mpsc::Sender<GameCommand>,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            saver: Arc::new(HighScoreSaver::new(services.store, services.user_id)),
            flavor: services.flavor,
            ticker: services.ticker,
            clock: TickerHandle::idle(),
            commands: commands.downgrade(),
            events,
            saves: JoinSet::new(),
            background: JoinSet::new(),
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Whether a session clock is running.
    pub fn clock_active(&self) -> bool {
        self.clock.is_active()
    }

    /// Process commands until `Shutdown` or until every sender is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<GameCommand>) {
        info!(user = %self.saver.user_id(), "game driver started");
        self.load_high_score();

        while let Some(command) = commands.recv().await {
            if self.handle(command).is_break() {
                break;
            }
        }

        self.shutdown().await;
        info!("game driver stopped");
    }

    /// Kick off the background load of the stored high score.
    pub fn load_high_score(&mut self) {
        let Some(commands) = self.commands.upgrade() else {
            return;
        };
        let saver = self.saver.clone();
        self.background.spawn(async move {
            let score = saver.load().await;
            let _ = commands.send(GameCommand::HighScoreLoaded(score)).await;
        });
    }

    /// Apply one command. Must run inside a tokio runtime.
    pub fn handle(&mut self, command: GameCommand) -> ControlFlow<()> {
        self.reap_background();

        match command {
            GameCommand::Start => self.start(),
            GameCommand::Drop { accepted } => {
                let result = self.session.drop_current(accepted);
                self.after_drop(result);
            }
            GameCommand::DropNamed { dropped, accepted } => {
                match self.session.resolve_drop_named(&dropped, &accepted) {
                    Ok(result) => self.after_drop(result),
                    Err(error) => {
                        warn!(%error, "drop rejected");
                        self.emit(GameEvent::Rejected {
                            reason: error.to_string(),
                        });
                    }
                }
            }
            GameCommand::Discard => {
                let result = self.session.discard_current();
                self.after_drop(result);
            }
            GameCommand::Tick => self.tick(),
            GameCommand::TimerTick { session_id } => {
                if session_id == self.session.session_id() {
                    self.tick();
                } else {
                    debug!(
                        session_id,
                        current = self.session.session_id(),
                        "stale tick dropped"
                    );
                }
            }
            GameCommand::End => {
                if self.session.state().is_playing() {
                    let summary = self.session.end(EndReason::Aborted);
                    self.finish(summary);
                }
            }
            GameCommand::RequestFlavorText => self.request_flavor_text(),
            GameCommand::HighScoreLoaded(score) => {
                self.session.restore_high_score(score);
                debug!(score, "high score loaded");
                self.emit(GameEvent::HighScoreLoaded {
                    snapshot: self.session.snapshot(),
                });
            }
            GameCommand::Shutdown => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }

    /// Stop the clock, drop unfinished background work and wait for saves.
    pub async fn shutdown(&mut self) {
        self.clock.cancel();
        self.background.abort_all();
        while self.background.join_next().await.is_some() {}
        while let Some(result) = self.saves.join_next().await {
            if let Err(error) = result {
                warn!(%error, "high score save task failed");
            }
        }
    }

    fn start(&mut self) {
        self.clock.cancel();
        self.session.start();

        let session_id = self.session.session_id();
        self.clock = match self.commands.upgrade() {
            Some(commands) => self.ticker.spawn(session_id, commands),
            None => TickerHandle::idle(),
        };

        info!(session_id, "session started");
        self.emit(GameEvent::Started {
            snapshot: self.session.snapshot(),
            feedback: Feedback::start(),
        });
    }

    fn tick(&mut self) {
        let result = self.session.tick();
        if let TickResult::Ignored = result {
            return;
        }

        let ended = match &result {
            TickResult::Ended { summary, .. } => Some(summary.clone()),
            _ => None,
        };

        self.emit(GameEvent::Ticked {
            result,
            snapshot: self.session.snapshot(),
        });

        if let Some(summary) = ended {
            self.finish(summary);
        }
    }

    fn after_drop(&mut self, result: DropResult) {
        let Some(report) = result.report() else {
            return;
        };

        let style = self.session.policy().bonus_message;
        let feedback = feedback_for_drop(report, style).into_iter().collect();
        let ended = report.summary.clone();

        self.emit(GameEvent::Dropped {
            result,
            feedback,
            snapshot: self.session.snapshot(),
        });

        if let Some(summary) = ended {
            self.finish(summary);
        }
    }

    fn finish(&mut self, summary: SessionSummary) {
        self.clock.cancel();

        if let Some(score) = self.session.take_pending_high_score() {
            let saver = self.saver.clone();
            self.saves.spawn(async move {
                saver.save(score).await;
            });
        }

        info!(
            session_id = self.session.session_id(),
            reason = summary.reason.as_str(),
            score = summary.score,
            stars = summary.stars,
            "session ended"
        );
        self.emit(GameEvent::Ended {
            summary,
            snapshot: self.session.snapshot(),
        });
    }

    fn request_flavor_text(&mut self) {
        let Some(item) = self.session.state().current_item() else {
            debug!("fun fact requested with no item on screen");
            return;
        };

        let session_id = self.session.session_id();
        let source = self.flavor.clone();
        let events = self.events.clone();
        self.background.spawn(async move {
            let text = describe_or_fallback(&*source, &item).await;
            let _ = events.send(GameEvent::FlavorText {
                session_id,
                item,
                text,
            });
        });
    }

    fn reap_background(&mut self) {
        while let Some(result) = self.background.try_join_next() {
            if let Err(error) = result {
                if !error.is_cancelled() {
                    warn!(%error, "background task failed");
                }
            }
        }
        while let Some(result) = self.saves.try_join_next() {
            if let Err(error) = result {
                warn!(%error, "high score save task failed");
            }
        }
    }

    fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }
}

/// Channels and task of a spawned driver.
pub struct DriverHandle {
    pub commands: mpsc::Sender<GameCommand>,
    pub events: mpsc::UnboundedReceiver<GameEvent>,
    pub task: JoinHandle<()>,
}

/// Spawn a driver on the current tokio runtime.
pub fn spawn(session: SessionController, services: Services, max_pending: usize) -> DriverHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(max_pending.max(1));
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let driver = GameDriver::new(session, services, &cmd_tx, event_tx);
    let task = tokio::spawn(driver.run(cmd_rx));

    DriverHandle {
        commands: cmd_tx,
        events: event_rx,
        task,
    }
}
