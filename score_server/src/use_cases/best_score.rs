use crate::domain::entities::Mode;
use crate::domain::errors::ScoreError;
use crate::domain::ports::AccountStore;

// Best score lookup over an account's recorded games of one mode.
pub struct BestScoreUseCase<S> {
    pub store: S,
}

impl<S> BestScoreUseCase<S>
where
    S: AccountStore,
{
    // `Ok(None)` means no games of that mode, which is not the same as a best of zero.
    pub async fn execute(&self, account_id: &str, mode: Mode) -> Result<Option<u32>, ScoreError> {
        let games = self
            .store
            .games(account_id)
            .await
            .map_err(|_| ScoreError::StorageFailure)?
            .ok_or(ScoreError::UnknownAccount)?;

        Ok(games
            .iter()
            .filter(|game| game.mode == mode)
            .map(|game| game.score.best())
            .max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GameRecord, RecordedScore};
    use crate::domain::ports::AccountStore as _;
    use crate::use_cases::test_support::{FailureFlags, RecordingStore};

    async fn record(store: &RecordingStore, mode: Mode, score: RecordedScore) {
        store
            .append_game(
                "acc-1",
                GameRecord {
                    game_id: uuid::Uuid::new_v4().to_string(),
                    mode,
                    score,
                    recorded_at: 0,
                },
            )
            .await
            .expect("expected append to succeed");
    }

    #[tokio::test]
    async fn when_account_has_no_games_of_mode_then_best_is_absent() {
        let store = RecordingStore::new();
        store.insert_test_account("acc-1", "pilot@example.com");
        record(&store, Mode::Duel, RecordedScore::Duel { player1: 5, player2: 9 }).await;
        let use_case = BestScoreUseCase { store };

        let best = use_case
            .execute("acc-1", Mode::Single)
            .await
            .expect("expected lookup to succeed");

        assert_eq!(best, None);
    }

    #[tokio::test]
    async fn when_single_games_exist_then_best_is_the_maximum_including_zero() {
        let store = RecordingStore::new();
        store.insert_test_account("acc-1", "pilot@example.com");
        record(&store, Mode::Single, RecordedScore::Single(0)).await;
        let use_case = BestScoreUseCase {
            store: store.clone(),
        };

        assert_eq!(use_case.execute("acc-1", Mode::Single).await, Ok(Some(0)));

        record(&store, Mode::Single, RecordedScore::Single(70)).await;
        record(&store, Mode::Single, RecordedScore::Single(40)).await;

        assert_eq!(use_case.execute("acc-1", Mode::Single).await, Ok(Some(70)));
    }

    #[tokio::test]
    async fn when_duels_exist_then_best_takes_the_better_seat() {
        let store = RecordingStore::new();
        store.insert_test_account("acc-1", "pilot@example.com");
        record(&store, Mode::Duel, RecordedScore::Duel { player1: 20, player2: 60 }).await;
        record(&store, Mode::Duel, RecordedScore::Duel { player1: 50, player2: 10 }).await;
        let use_case = BestScoreUseCase { store };

        assert_eq!(use_case.execute("acc-1", Mode::Duel).await, Ok(Some(60)));
    }

    #[tokio::test]
    async fn when_account_is_unknown_then_returns_unknown_account() {
        let use_case = BestScoreUseCase {
            store: RecordingStore::new(),
        };

        assert_eq!(
            use_case.execute("missing", Mode::Single).await,
            Err(ScoreError::UnknownAccount)
        );
    }

    #[tokio::test]
    async fn when_store_read_fails_then_returns_storage_failure() {
        let use_case = BestScoreUseCase {
            store: RecordingStore::new().with_failures(FailureFlags {
                games: true,
                ..FailureFlags::default()
            }),
        };

        assert_eq!(
            use_case.execute("acc-1", Mode::Single).await,
            Err(ScoreError::StorageFailure)
        );
    }
}
