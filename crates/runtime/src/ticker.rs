//! Session clock.
//!
//! A [`Ticker`] turns elapsed time into `TimerTick` commands on the driver's
//! queue. Each tick carries the id of the session it was started for, so a
//! tick that was already queued when its session ended is dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::driver::GameCommand;
use crate::types::TICK_MS;

/// Starts a clock for one session.
pub trait Ticker: Send + Sync {
    /// Must be called from within a tokio runtime.
    fn spawn(&self, session_id: u32, commands: mpsc::Sender<GameCommand>) -> TickerHandle;
}

/// Running clock. Cancelled on [`TickerHandle::cancel`] or drop.
#[derive(Debug, Default)]
pub struct TickerHandle {
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Handle with no clock behind it.
    pub fn idle() -> Self {
        Self { task: None }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Real clock: one tick per period, first tick one period after start.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTicker {
    period: Duration,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_MS as u64))
    }
}

impl Ticker for IntervalTicker {
    fn spawn(&self, session_id: u32, commands: mpsc::Sender<GameCommand>) -> TickerHandle {
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if commands
                    .send(GameCommand::TimerTick { session_id })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
        TickerHandle { task: Some(task) }
    }
}

/// Clock that never fires; callers push `GameCommand::Tick` themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTicker;

impl Ticker for ManualTicker {
    fn spawn(&self, _session_id: u32, _commands: mpsc::Sender<GameCommand>) -> TickerHandle {
        TickerHandle::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticker_fires_once_per_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let _handle = IntervalTicker::default().spawn(3, tx);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.recv().await {
            Some(GameCommand::TimerTick { session_id }) => assert_eq!(session_id, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut handle = IntervalTicker::default().spawn(1, tx);
        assert!(handle.is_active());

        handle.cancel();
        assert!(!handle.is_active());

        tokio::time::sleep(Duration::from_secs(5)).await;
        // The aborted task dropped its sender.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_manual_ticker_is_idle() {
        let (tx, _rx) = mpsc::channel(1);
        let handle = ManualTicker.spawn(1, tx);
        assert!(!handle.is_active());
    }
}
