use uuid::Uuid;

use crate::domain::entities::GameRecord;
use crate::domain::errors::ScoreError;
use crate::domain::ports::{AccountStore, Clock};
use crate::interface_adapters::protocol::RecordGameRequest;

// Response returned by the record game use case.
pub struct RecordGameResponse {
    pub game_id: String,
}

// Appends one finished game to an account's history.
pub struct RecordGameUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> RecordGameUseCase<C, S>
where
    C: Clock,
    S: AccountStore,
{
    pub async fn execute(
        &self,
        account_id: &str,
        payload: RecordGameRequest,
    ) -> Result<RecordGameResponse, ScoreError> {
        let score = payload.score.into();
        let record = GameRecord {
            game_id: Uuid::new_v4().to_string(),
            mode: payload.mode,
            score,
            recorded_at: self.clock.now_epoch_seconds(),
        };
        if record.score.mode() != record.mode {
            return Err(ScoreError::InvalidScore);
        }

        let game_id = record.game_id.clone();
        let appended = self
            .store
            .append_game(account_id, record)
            .await
            .map_err(|_| ScoreError::StorageFailure)?;
        if !appended {
            return Err(ScoreError::UnknownAccount);
        }

        Ok(RecordGameResponse { game_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Mode, RecordedScore};
    use crate::interface_adapters::protocol::ScoreDto;
    use crate::use_cases::test_support::{FailureFlags, FixedClock, RecordingStore};

    #[tokio::test]
    async fn when_duel_is_recorded_then_both_seats_are_kept() {
        let store = RecordingStore::new();
        store.insert_test_account("acc-1", "pilot@example.com");
        let use_case = RecordGameUseCase {
            clock: FixedClock(42),
            store: store.clone(),
        };

        let result = use_case
            .execute(
                "acc-1",
                RecordGameRequest {
                    mode: Mode::Duel,
                    score: ScoreDto::Duel {
                        player1: 30,
                        player2: 50,
                    },
                },
            )
            .await
            .expect("expected game to be recorded");

        let account = store.get_test_account("acc-1").expect("expected account");
        assert_eq!(
            account.games,
            vec![GameRecord {
                game_id: result.game_id,
                mode: Mode::Duel,
                score: RecordedScore::Duel {
                    player1: 30,
                    player2: 50,
                },
                recorded_at: 42,
            }]
        );
    }

    #[tokio::test]
    async fn when_score_shape_does_not_match_mode_then_returns_invalid_score() {
        let store = RecordingStore::new();
        store.insert_test_account("acc-1", "pilot@example.com");
        let use_case = RecordGameUseCase {
            clock: FixedClock(0),
            store: store.clone(),
        };

        let result = use_case
            .execute(
                "acc-1",
                RecordGameRequest {
                    mode: Mode::Duel,
                    score: ScoreDto::Single(40),
                },
            )
            .await;

        assert_eq!(result.err(), Some(ScoreError::InvalidScore));
        assert!(store
            .get_test_account("acc-1")
            .is_some_and(|a| a.games.is_empty()));
    }

    #[tokio::test]
    async fn when_account_is_unknown_then_returns_unknown_account() {
        let use_case = RecordGameUseCase {
            clock: FixedClock(0),
            store: RecordingStore::new(),
        };

        let result = use_case
            .execute(
                "missing",
                RecordGameRequest {
                    mode: Mode::Single,
                    score: ScoreDto::Single(10),
                },
            )
            .await;

        assert_eq!(result.err(), Some(ScoreError::UnknownAccount));
    }

    #[tokio::test]
    async fn when_store_append_fails_then_returns_storage_failure() {
        let use_case = RecordGameUseCase {
            clock: FixedClock(0),
            store: RecordingStore::new().with_failures(FailureFlags {
                append: true,
                ..FailureFlags::default()
            }),
        };

        let result = use_case
            .execute(
                "acc-1",
                RecordGameRequest {
                    mode: Mode::Single,
                    score: ScoreDto::Single(10),
                },
            )
            .await;

        assert_eq!(result.err(), Some(ScoreError::StorageFailure));
    }
}
