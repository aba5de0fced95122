use std::sync::Arc;

use crate::errors::StoreError;
use crate::models::ScoreRecord;

use super::{KeyValueStore, SCORES_KEY, load_json, save_json};

/// How many records the dashboard lists.
pub const RECENT_LIMIT: usize = 5;

/// Dashboard figures derived from the score history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreSummary {
    pub quizzes_taken: usize,
    /// Rounded mean of per-quiz percentages.
    pub average_percentage: u32,
    /// Newest first.
    pub recent: Vec<ScoreRecord>,
}

/// Append-only history of finished quizzes.
pub struct ScoreStore {
    store: Arc<dyn KeyValueStore>,
}

impl ScoreStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn append(&self, record: ScoreRecord) -> Result<(), StoreError> {
        let mut records = self.all()?;
        log::info!("Recording score {}/{}", record.score, record.total);
        records.push(record);
        save_json(self.store.as_ref(), SCORES_KEY, &records)
    }

    /// Oldest first, as appended.
    pub fn all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(load_json(self.store.as_ref(), SCORES_KEY)?.unwrap_or_default())
    }

    pub fn summary(&self) -> Result<ScoreSummary, StoreError> {
        Ok(summarize(&self.all()?))
    }
}

pub fn summarize(records: &[ScoreRecord]) -> ScoreSummary {
    let average_percentage = if records.is_empty() {
        0
    } else {
        let sum: f64 = records.iter().map(ScoreRecord::percentage).sum();
        (sum / records.len() as f64).round() as u32
    };

    ScoreSummary {
        quizzes_taken: records.len(),
        average_percentage,
        recent: records.iter().rev().take(RECENT_LIMIT).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn record(score: usize, total: usize, date: &str) -> ScoreRecord {
        ScoreRecord {
            score,
            total,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let scores = ScoreStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(scores.summary().unwrap(), ScoreSummary::default());
    }

    #[test]
    fn test_append_grows_by_one() {
        let scores = ScoreStore::new(Arc::new(MemoryStore::new()));
        scores.append(record(3, 5, "1/1/2026")).unwrap();
        scores.append(record(25, 25, "1/2/2026")).unwrap();

        let all = scores.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].date, "1/1/2026");
    }

    #[test]
    fn test_summary_average_and_recent_order() {
        let records: Vec<_> = (1..=7).map(|i| record(i, 10, &format!("1/{}/2026", i))).collect();
        let summary = summarize(&records);

        assert_eq!(summary.quizzes_taken, 7);
        // (10+20+...+70)/7 = 40
        assert_eq!(summary.average_percentage, 40);
        assert_eq!(summary.recent.len(), RECENT_LIMIT);
        assert_eq!(summary.recent[0].date, "1/7/2026");
        assert_eq!(summary.recent[4].date, "1/3/2026");
    }

    #[test]
    fn test_zero_total_counts_as_zero_percent() {
        let summary = summarize(&[record(0, 0, "x"), record(1, 1, "y")]);
        assert_eq!(summary.average_percentage, 50);
    }
}
