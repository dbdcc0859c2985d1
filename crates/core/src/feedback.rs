//! Feedback module - player-facing messages for session results
//!
//! Maps drop reports to short messages with a tone. A drop yields at most two
//! messages (correct + bonus under [`BonusMessage::Append`]), so the result is
//! an inline `ArrayVec`.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::scoring::BonusMessage;
use crate::session::{DropOutcome, DropReport};
use crate::types::CORRECT_POINTS;

/// Prompt shown when a session starts.
pub const START_PROMPT: &str = "Drag the trash into the right bin!";

/// Message tone, mapped to colors by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub tone: Tone,
    pub text: String,
}

impl Feedback {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    pub fn start() -> Self {
        Self::new(Tone::Info, START_PROMPT)
    }
}

/// Messages for one drop, in display order.
pub fn feedback_for_drop(report: &DropReport, style: BonusMessage) -> ArrayVec<Feedback, 2> {
    let mut out = ArrayVec::new();

    match report.outcome {
        DropOutcome::Correct | DropOutcome::Won => out.push(correct_message()),
        DropOutcome::CorrectWithBonus => {
            if style == BonusMessage::Append {
                out.push(correct_message());
            }
            out.push(Feedback::new(
                Tone::Success,
                format!(
                    "+{}s bonus for {} in a row!",
                    report.bonus_seconds, report.streak
                ),
            ));
        }
        // Name what was actually dropped when it is not the item on screen.
        DropOutcome::Incorrect if report.dropped != report.item.category => {
            let bin = report.accepted.map_or("that bin", |c| c.display_name());
            out.push(Feedback::new(
                Tone::Error,
                format!(
                    "Oops! {} does not go in {}.",
                    report.dropped.display_name(),
                    bin
                ),
            ));
        }
        DropOutcome::Incorrect => out.push(Feedback::new(
            Tone::Error,
            format!(
                "Oops! {} is {}.",
                report.item.label,
                report.item.category.display_name()
            ),
        )),
        DropOutcome::OffTarget => {}
    }

    out
}

/// Banner for a running streak (shown from two in a row).
pub fn streak_banner(streak: u32) -> Option<String> {
    (streak > 1).then(|| format!("🔥 {streak} in a row!"))
}

fn correct_message() -> Feedback {
    Feedback::new(
        Tone::Success,
        format!("Correct! +{CORRECT_POINTS} points!"),
    )
}
