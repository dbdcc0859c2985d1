use serde::Serialize;

use crate::session::SessionSummary;
use crate::types::{Item, Phase, SESSION_SECONDS};

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: u32,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub time_remaining: u32,
    pub time_warning: bool,
    pub streak: u32,
    pub correct_attempts: u32,
    pub total_attempts: u32,
    pub current_item: Option<Item>,
    pub summary: Option<SessionSummary>,
}

impl SessionSnapshot {
    pub fn playing(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            session_id: 0,
            phase: Phase::Idle,
            score: 0,
            high_score: 0,
            time_remaining: SESSION_SECONDS,
            time_warning: false,
            streak: 0,
            correct_attempts: 0,
            total_attempts: 0,
            current_item: None,
            summary: None,
        }
    }
}
