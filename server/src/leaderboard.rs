//! Process-wide record of finished games.
//!
//! The leaderboard is the only state shared between connections. It is
//! append-only for the life of the process; entries are never edited or
//! removed.

use log::debug;
use shared::{Difficulty, LeaderboardEntry};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct Leaderboard {
    entries: RwLock<Vec<LeaderboardEntry>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the result of one finished game.
    pub async fn record(&self, name: &str, score: u32, difficulty: Difficulty) {
        let mut entries = self.entries.write().await;
        entries.push(LeaderboardEntry {
            name: name.to_string(),
            score,
            difficulty,
        });
        debug!("Leaderboard now holds {} entries", entries.len());
    }

    /// All entries, highest score first. Equal scores keep the order in
    /// which they were recorded.
    pub async fn snapshot(&self) -> Vec<LeaderboardEntry> {
        let mut entries = self.entries.read().await.clone();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_leaderboard() {
        let board = Leaderboard::new();
        assert!(board.is_empty().await);
        assert!(board.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_sorted_descending() {
        let board = Leaderboard::new();
        board.record("ada", 120, Difficulty::Easy).await;
        board.record("grace", 300, Difficulty::Hard).await;
        board.record("alan", 0, Difficulty::Medium).await;

        let scores: Vec<u32> = board.snapshot().await.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 120, 0]);
    }

    #[tokio::test]
    async fn test_equal_scores_keep_record_order() {
        let board = Leaderboard::new();
        board.record("first", 190, Difficulty::Easy).await;
        board.record("top", 400, Difficulty::Hard).await;
        board.record("second", 190, Difficulty::Medium).await;
        board.record("third", 190, Difficulty::Easy).await;

        let names: Vec<String> = board.snapshot().await.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["top", "first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_reorder_storage() {
        let board = Leaderboard::new();
        board.record("low", 10, Difficulty::Easy).await;
        board.record("high", 20, Difficulty::Easy).await;
        board.snapshot().await;

        board.record("mid", 10, Difficulty::Easy).await;
        let names: Vec<String> = board.snapshot().await.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["high", "low", "mid"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_records_are_not_lost() {
        let board = Arc::new(Leaderboard::new());

        let handles: Vec<_> = (0..50u32)
            .map(|i| {
                let board = Arc::clone(&board);
                tokio::spawn(async move {
                    board.record(&format!("player{}", i), i * 10, Difficulty::Medium).await;
                    board.snapshot().await.len()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap() >= 1);
        }

        let snapshot = board.snapshot().await;
        assert_eq!(snapshot.len(), 50);
        assert!(snapshot.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }
}
