use chrono::Local;
use serde::{Deserialize, Serialize};

/// Summary of one finished quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: usize,
    pub total: usize,
    pub date: String,
}

impl ScoreRecord {
    /// Stamped with today's local date. `score` is clamped to `total`.
    pub fn today(score: usize, total: usize) -> Self {
        Self {
            score: score.min(total),
            total,
            date: Local::now().format("%-m/%-d/%Y").to_string(),
        }
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total)
    }
}

pub fn percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Performance band used to colour a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            Grade::Good
        } else if percentage >= 60 {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_clamps_score() {
        let record = ScoreRecord::today(30, 25);
        assert_eq!(record.score, 25);
        assert_eq!(record.total, 25);
        assert!(!record.date.is_empty());
    }

    #[test]
    fn test_percentage_guards_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_percentage(100), Grade::Good);
        assert_eq!(Grade::from_percentage(80), Grade::Good);
        assert_eq!(Grade::from_percentage(60), Grade::Fair);
        assert_eq!(Grade::from_percentage(59), Grade::Poor);
    }
}
