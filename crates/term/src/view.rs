//! SortView: maps a `core::SessionSnapshot` into styled text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{streak_banner, Feedback, SessionSnapshot, SessionSummary, Tone};
use crate::types::{format_clock, Category, Phase};

/// Line color role, mapped to terminal colors by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Plain,
    Title,
    Dim,
    Info,
    Success,
    Error,
    Warning,
}

impl From<Tone> for Style {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Info => Style::Info,
            Tone::Success => Style::Success,
            Tone::Error => Style::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub style: Style,
    pub text: String,
}

impl Line {
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }
}

/// `★★☆` for two of three stars.
pub fn star_glyphs(stars: u8) -> String {
    let filled = usize::from(stars.min(3));
    format!("{}{}", "★".repeat(filled), "☆".repeat(3 - filled))
}

/// End-screen lines for a finished session.
pub fn summary_lines(summary: &SessionSummary) -> Vec<Line> {
    let mut lines = vec![
        Line::new(Style::Title, summary.reason.title()),
        Line::new(Style::Plain, format!("Score: {}", summary.score)),
        Line::new(
            Style::Plain,
            format!(
                "Hits: {} of {} ({:.1}%)",
                summary.correct_attempts,
                summary.total_attempts,
                summary.accuracy_percent()
            ),
        ),
        Line::new(Style::Warning, star_glyphs(summary.stars)),
    ];
    if summary.new_high_score {
        lines.push(Line::new(Style::Success, "New high score!"));
    }
    lines.push(Line::new(
        Style::Dim,
        format!("Best: {}", summary.high_score),
    ));
    lines
}

/// Everything on screen, kept between frames.
#[derive(Debug, Clone, Default)]
pub struct SortView {
    snapshot: SessionSnapshot,
    feedback: Vec<Feedback>,
    fun_fact: Option<String>,
    /// Key hint per bin, in bin order.
    bin_keys: Option<[char; 5]>,
}

impl SortView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show key hints under the bins.
    pub fn with_bin_keys(mut self, keys: [char; 5]) -> Self {
        self.bin_keys = Some(keys);
        self
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    pub fn set_snapshot(&mut self, snapshot: SessionSnapshot) {
        if snapshot.session_id != self.snapshot.session_id
            || snapshot.current_item != self.snapshot.current_item
        {
            self.fun_fact = None;
        }
        self.snapshot = snapshot;
    }

    /// Replace the feedback area.
    pub fn set_feedback(&mut self, feedback: impl IntoIterator<Item = Feedback>) {
        self.feedback.clear();
        self.feedback.extend(feedback);
    }

    pub fn set_fun_fact(&mut self, text: impl Into<String>) {
        self.fun_fact = Some(text.into());
    }

    pub fn render_lines(&self) -> Vec<Line> {
        let snap = &self.snapshot;
        let mut lines = vec![Line::new(Style::Title, "♻  Eco Sorter"), Line::blank()];

        let clock_style = if snap.time_warning {
            Style::Warning
        } else {
            Style::Plain
        };
        lines.push(Line::new(
            clock_style,
            format!(
                "Time {}   Score {}   Best {}",
                format_clock(snap.time_remaining),
                snap.score,
                snap.high_score
            ),
        ));
        lines.push(match streak_banner(snap.streak) {
            Some(banner) if snap.playing() => Line::new(Style::Warning, banner),
            _ => Line::blank(),
        });
        lines.push(Line::blank());

        match snap.phase {
            Phase::Idle => {
                lines.push(Line::new(Style::Info, "Press S to start."));
            }
            Phase::Playing => {
                let item = match snap.current_item {
                    Some(item) => format!("Sort this: {} {}", item.glyph, item.label),
                    None => String::new(),
                };
                lines.push(Line::new(Style::Plain, item));
                lines.push(Line::blank());
                lines.push(Line::new(Style::Plain, self.bins_line()));
            }
            Phase::Ended => {
                if let Some(summary) = &snap.summary {
                    lines.extend(summary_lines(summary));
                }
                lines.push(Line::blank());
                lines.push(Line::new(Style::Info, "Press S to play again."));
            }
        }

        lines.push(Line::blank());
        for feedback in &self.feedback {
            lines.push(Line::new(feedback.tone.into(), feedback.text.clone()));
        }
        if let Some(fact) = &self.fun_fact {
            lines.push(Line::new(Style::Dim, format!("💡 {fact}")));
        }

        lines.push(Line::blank());
        lines.push(Line::new(
            Style::Dim,
            "1-5 / P L G O M: bin   Space: miss   F: fun fact   E: end   Q: quit",
        ));
        lines
    }

    fn bins_line(&self) -> String {
        let bins: Vec<String> = Category::ALL
            .iter()
            .map(|category| match self.bin_keys {
                Some(keys) => format!("[{}] {}", keys[category.index()], category.display_name()),
                None => format!("[{}]", category.display_name()),
            })
            .collect();
        bins.join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EndReason, Item};

    fn texts(view: &SortView) -> Vec<String> {
        view.render_lines().into_iter().map(|l| l.text).collect()
    }

    fn playing() -> SessionSnapshot {
        SessionSnapshot {
            session_id: 1,
            phase: Phase::Playing,
            current_item: Some(Item::new(Category::Paper, "Newspaper", "📰")),
            ..SessionSnapshot::default()
        }
    }

    fn summary(correct: u32, total: u32, stars: u8) -> SessionSummary {
        SessionSummary {
            score: correct * 10,
            correct_attempts: correct,
            total_attempts: total,
            accuracy: if total == 0 {
                0.0
            } else {
                correct as f64 / total as f64
            },
            stars,
            reason: EndReason::TimedOut,
            high_score: correct * 10,
            new_high_score: true,
        }
    }

    #[test]
    fn test_star_glyphs() {
        assert_eq!(star_glyphs(0), "☆☆☆");
        assert_eq!(star_glyphs(2), "★★☆");
        assert_eq!(star_glyphs(3), "★★★");
        assert_eq!(star_glyphs(9), "★★★");
    }

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(&summary(9, 10, 3));
        let text: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(text[0], "Time's up!");
        assert_eq!(text[1], "Score: 90");
        assert_eq!(text[2], "Hits: 9 of 10 (90.0%)");
        assert_eq!(text[3], "★★★");
        assert_eq!(text[4], "New high score!");
        assert_eq!(text[5], "Best: 90");
    }

    #[test]
    fn test_summary_with_no_attempts() {
        let lines = summary_lines(&summary(0, 0, 0));
        assert_eq!(lines[2].text, "Hits: 0 of 0 (0.0%)");
        assert_eq!(lines[3].text, "☆☆☆");
    }

    #[test]
    fn test_idle_screen_prompts_start() {
        let view = SortView::new();
        let text = texts(&view);
        assert!(text.contains(&"Time 01:00   Score 0   Best 0".to_string()));
        assert!(text.contains(&"Press S to start.".to_string()));
    }

    #[test]
    fn test_playing_screen_shows_item_and_bins() {
        let mut view = SortView::new().with_bin_keys(['1', '2', '3', '4', '5']);
        view.set_snapshot(playing());
        let text = texts(&view);
        assert!(text.contains(&"Sort this: 📰 Newspaper".to_string()));
        assert!(text
            .iter()
            .any(|l| l.starts_with("[1] Paper  [2] Plastic")));
    }

    #[test]
    fn test_time_warning_and_streak_styles() {
        let mut view = SortView::new();
        view.set_snapshot(SessionSnapshot {
            time_remaining: 9,
            time_warning: true,
            streak: 3,
            ..playing()
        });
        let lines = view.render_lines();
        let clock = lines.iter().find(|l| l.text.starts_with("Time")).unwrap();
        assert_eq!(clock.style, Style::Warning);
        assert_eq!(clock.text, "Time 00:09   Score 0   Best 0");
        assert!(lines.iter().any(|l| l.text == "🔥 3 in a row!"));
    }

    #[test]
    fn test_feedback_uses_tone_style() {
        let mut view = SortView::new();
        view.set_snapshot(playing());
        view.set_feedback([Feedback::new(Tone::Error, "Oops! Newspaper is Paper.")]);
        let lines = view.render_lines();
        let line = lines
            .iter()
            .find(|l| l.text == "Oops! Newspaper is Paper.")
            .unwrap();
        assert_eq!(line.style, Style::Error);
    }

    #[test]
    fn test_fun_fact_cleared_with_new_item() {
        let mut view = SortView::new();
        view.set_snapshot(playing());
        view.set_fun_fact("Paper is recyclable.");
        assert!(texts(&view).iter().any(|l| l.contains("Paper is recyclable.")));

        view.set_snapshot(SessionSnapshot {
            current_item: Some(Item::new(Category::Metal, "Soda can", "🥫")),
            ..playing()
        });
        assert!(!texts(&view).iter().any(|l| l.contains("Paper is recyclable.")));
    }

    #[test]
    fn test_ended_screen_shows_summary() {
        let mut view = SortView::new();
        view.set_snapshot(SessionSnapshot {
            phase: Phase::Ended,
            current_item: None,
            summary: Some(summary(7, 10, 2)),
            ..playing()
        });
        let text = texts(&view);
        assert!(text.contains(&"Hits: 7 of 10 (70.0%)".to_string()));
        assert!(text.contains(&"★★☆".to_string()));
        assert!(text.contains(&"Press S to play again.".to_string()));
    }
}
