//! Scoring module - points, streak bonus, accuracy and star rating
//!
//! Rule notes:
//! - A correct drop is worth `CORRECT_POINTS`; a wrong one costs `INCORRECT_PENALTY`.
//! - The score never goes below zero (clamped after every delta).
//! - Every `STREAK_BONUS_EVERY`-th consecutive correct drop adds bonus seconds.
//! - Stars are computed from accuracy percent, compared with integer math so
//!   9 of 10 lands exactly on 90%.

use serde::{Deserialize, Serialize};

use crate::types::{
    CORRECT_POINTS, INCORRECT_PENALTY, SCORE_CAP, STREAK_BONUS_EVERY, STREAK_BONUS_SECONDS,
};

/// Accuracy thresholds (percent) for one, two and three stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarThresholds {
    pub three: u32,
    pub two: u32,
    pub one: u32,
}

impl StarThresholds {
    /// 90 / 70 / 50.
    pub const STANDARD: StarThresholds = StarThresholds {
        three: 90,
        two: 70,
        one: 50,
    };

    /// 100 / 75 / 50.
    pub const STRICT: StarThresholds = StarThresholds {
        three: 100,
        two: 75,
        one: 50,
    };

    /// Stars earned for `correct` hits out of `total` attempts.
    ///
    /// No attempts means no stars.
    pub fn stars(&self, correct: u32, total: u32) -> u8 {
        if total == 0 {
            return 0;
        }
        let scaled = correct as u64 * 100;
        let meets = |pct: u32| scaled >= pct as u64 * total as u64;

        if meets(self.three) {
            3
        } else if meets(self.two) {
            2
        } else if meets(self.one) {
            1
        } else {
            0
        }
    }
}

impl Default for StarThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// How the streak bonus is announced next to the plain "correct" feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusMessage {
    /// The bonus message is shown instead of the correct message.
    #[default]
    Replace,
    /// Both messages are shown, correct first.
    Append,
}

/// Rule variations a session can be played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulePolicy {
    /// Reaching `SCORE_CAP` ends the session as a win.
    pub score_cap_ends_game: bool,
    pub star_thresholds: StarThresholds,
    pub bonus_message: BonusMessage,
}

impl RulePolicy {
    /// Timeout-only play, 90/70/50 stars, bonus message replaces the correct one.
    pub const CANONICAL: RulePolicy = RulePolicy {
        score_cap_ends_game: false,
        star_thresholds: StarThresholds::STANDARD,
        bonus_message: BonusMessage::Replace,
    };

    /// Score cap wins the game and stars use 100/75/50.
    pub const SCORE_CAP: RulePolicy = RulePolicy {
        score_cap_ends_game: true,
        star_thresholds: StarThresholds::STRICT,
        bonus_message: BonusMessage::Append,
    };

    /// Whether `score` has reached the winning score under this policy.
    pub fn is_winning_score(&self, score: u32) -> bool {
        self.score_cap_ends_game && score >= SCORE_CAP
    }
}

/// Apply a signed delta to a score, clamping at zero.
pub fn apply_delta(score: u32, delta: i32) -> u32 {
    if delta >= 0 {
        score.saturating_add(delta as u32)
    } else {
        score.saturating_sub(delta.unsigned_abs())
    }
}

/// Score after a correct drop.
pub fn score_after_correct(score: u32) -> u32 {
    apply_delta(score, CORRECT_POINTS as i32)
}

/// Score after an incorrect drop.
pub fn score_after_incorrect(score: u32) -> u32 {
    apply_delta(score, -(INCORRECT_PENALTY as i32))
}

/// Whether `streak` sits on a bonus milestone (5, 10, 15, ...).
pub fn is_bonus_milestone(streak: u32) -> bool {
    streak > 0 && streak % STREAK_BONUS_EVERY == 0
}

/// Bonus seconds earned by reaching `streak`.
pub fn streak_bonus_seconds(streak: u32) -> u32 {
    if is_bonus_milestone(streak) {
        STREAK_BONUS_SECONDS
    } else {
        0
    }
}

/// Ratio of correct attempts, `0.0` when nothing was attempted.
pub fn accuracy(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64
}

/// Stars with the standard thresholds.
pub fn calculate_stars(correct: u32, total: u32) -> u8 {
    StarThresholds::STANDARD.stars(correct, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_delta_clamps_at_zero() {
        assert_eq!(apply_delta(0, -5), 0);
        assert_eq!(apply_delta(3, -5), 0);
        assert_eq!(apply_delta(10, -5), 5);
        assert_eq!(apply_delta(10, 10), 20);
        assert_eq!(apply_delta(u32::MAX, 10), u32::MAX);
    }

    #[test]
    fn test_correct_and_incorrect_scores() {
        assert_eq!(score_after_correct(0), 10);
        assert_eq!(score_after_incorrect(10), 5);
        assert_eq!(score_after_incorrect(0), 0);
    }

    #[test]
    fn test_bonus_milestones() {
        assert!(!is_bonus_milestone(0));
        assert!(!is_bonus_milestone(4));
        assert!(is_bonus_milestone(5));
        assert!(!is_bonus_milestone(6));
        assert!(is_bonus_milestone(10));
        assert!(is_bonus_milestone(15));

        assert_eq!(streak_bonus_seconds(5), 5);
        assert_eq!(streak_bonus_seconds(7), 0);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(9, 10), 0.9);
        assert_eq!(accuracy(3, 3), 1.0);
    }

    #[test]
    fn test_standard_stars() {
        assert_eq!(calculate_stars(9, 10), 3);
        assert_eq!(calculate_stars(10, 10), 3);
        assert_eq!(calculate_stars(7, 10), 2);
        assert_eq!(calculate_stars(6, 10), 1);
        assert_eq!(calculate_stars(5, 10), 1);
        assert_eq!(calculate_stars(4, 10), 0);
        assert_eq!(calculate_stars(0, 0), 0);
    }

    #[test]
    fn test_stars_near_thresholds() {
        // 8/9 = 88.9% is below 90.
        assert_eq!(calculate_stars(8, 9), 2);
        // 2/3 = 66.7% is below 70.
        assert_eq!(calculate_stars(2, 3), 1);
        // 1/2 = 50% is exactly one star.
        assert_eq!(calculate_stars(1, 2), 1);
    }

    #[test]
    fn test_strict_stars() {
        let strict = StarThresholds::STRICT;
        assert_eq!(strict.stars(10, 10), 3);
        assert_eq!(strict.stars(9, 10), 2);
        assert_eq!(strict.stars(3, 4), 2);
        assert_eq!(strict.stars(7, 10), 1);
        assert_eq!(strict.stars(4, 10), 0);
        assert_eq!(strict.stars(0, 0), 0);
    }

    #[test]
    fn test_policy_winning_score() {
        assert!(!RulePolicy::CANONICAL.is_winning_score(100));
        assert!(RulePolicy::SCORE_CAP.is_winning_score(100));
        assert!(!RulePolicy::SCORE_CAP.is_winning_score(95));
        assert_eq!(RulePolicy::default(), RulePolicy::CANONICAL);
    }
}
