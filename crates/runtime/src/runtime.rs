//! Sync bridge.
//!
//! The terminal loop is synchronous; [`GameHandle`] owns a tokio runtime with
//! the driver on it and exposes non-blocking send/receive.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::GameConfig;
use crate::core::SessionController;
use crate::driver::{self, GameCommand, GameEvent, Services};
use crate::flavor::CannedFlavorText;
use crate::ticker::IntervalTicker;

/// How long shutdown waits for pending high-score writes.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Running driver plus the runtime it lives on.
pub struct GameHandle {
    rt: Runtime,
    commands: mpsc::Sender<GameCommand>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    driver: Option<JoinHandle<()>>,
}

impl GameHandle {
    /// Start with the real clock, built-in fun facts and the configured store.
    pub fn start(config: &GameConfig) -> io::Result<Self> {
        let services = Services {
            store: config.build_store(),
            flavor: Arc::new(CannedFlavorText),
            ticker: Box::new(IntervalTicker::default()),
            user_id: config.user_id.clone(),
        };
        Self::with_services(config, services)
    }

    pub fn with_services(config: &GameConfig, services: Services) -> io::Result<Self> {
        let rt = Runtime::new()?;
        let session = SessionController::new(config.seed_or_random()).with_policy(config.policy);

        let handle = {
            let _guard = rt.enter();
            driver::spawn(session, services, config.max_pending_commands)
        };

        Ok(Self {
            rt,
            commands: handle.commands,
            events: handle.events,
            driver: Some(handle.task),
        })
    }

    /// Queue a command without blocking. Returns `false` if it was dropped.
    pub fn send(&self, command: GameCommand) -> bool {
        match self.commands.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                warn!(?command, "command queue full, dropping command");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    pub fn try_recv(&mut self) -> Option<GameEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the driver, waiting briefly for pending saves.
    pub fn shutdown(&mut self) {
        let Some(driver) = self.driver.take() else {
            return;
        };

        let commands = self.commands.clone();
        let finished = self.rt.block_on(async move {
            let _ = commands.send(GameCommand::Shutdown).await;
            tokio::time::timeout(SHUTDOWN_GRACE, driver).await
        });
        if finished.is_err() {
            warn!("driver did not stop in time");
        }
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
