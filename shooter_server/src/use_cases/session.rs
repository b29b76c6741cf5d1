// Session task: owns one RoundController and serialises every event that touches it.

use crate::domain::{
    AccountId, ArchiveError, BestScoreLookup, GameMode, RoundConfig, RoundController,
    RoundOutcome, RoundPhase, RoundSummary, ScoreArchive,
};
use crate::use_cases::types::{SessionCommand, SessionNotice, SessionView};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

/// Shared configuration for spawning session tasks.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Geometry and rules for every round in the session.
    pub round_config: RoundConfig,
    /// Fixed simulation step.
    pub tick_interval: Duration,
    /// Countdown period; one second in production.
    pub countdown_interval: Duration,
    /// Capacity for inbound host commands.
    pub command_channel_capacity: usize,
    /// Capacity for outcome and warning notices.
    pub notice_channel_capacity: usize,
    /// Upper bound for each score archive call.
    pub archive_timeout: Duration,
    /// Base seed for target placement.
    pub seed: u64,
}

/// Channels the host shell uses to drive and observe a session.
pub struct SessionHandle {
    pub command_tx: mpsc::Sender<SessionCommand>,
    pub view_rx: watch::Receiver<SessionView>,
    pub notice_rx: mpsc::Receiver<SessionNotice>,
    pub task: JoinHandle<()>,
}

/// Spawns the task that owns a player's rounds until `Close` or the command channel drops.
///
/// Guests (`account == None`) play normally but their rounds are never persisted.
pub fn spawn_session(
    account: Option<AccountId>,
    archive: Arc<dyn ScoreArchive>,
    settings: SessionSettings,
) -> SessionHandle {
    let (command_tx, command_rx) = mpsc::channel(settings.command_channel_capacity);
    let (view_tx, view_rx) = watch::channel(SessionView::ModeSelection);
    let (notice_tx, notice_rx) = mpsc::channel(settings.notice_channel_capacity);

    let session = Session {
        account,
        archive,
        settings,
        view_tx,
        notice_tx,
        controller: None,
        round: 0,
    };
    let task = tokio::spawn(session_task(session, command_rx));

    SessionHandle {
        command_tx,
        view_rx,
        notice_rx,
        task,
    }
}

struct Session {
    account: Option<AccountId>,
    archive: Arc<dyn ScoreArchive>,
    settings: SessionSettings,
    view_tx: watch::Sender<SessionView>,
    notice_tx: mpsc::Sender<SessionNotice>,
    controller: Option<RoundController>,
    // Bumped on every start and restart; tags notices.
    round: u64,
}

enum CommandEffect {
    RoundStarted,
    Applied,
    Ignored,
    Closed,
}

impl Session {
    fn is_running(&self) -> bool {
        self.controller
            .as_ref()
            .is_some_and(|c| c.phase() == RoundPhase::Running)
    }

    fn apply(&mut self, command: SessionCommand) -> CommandEffect {
        match command {
            SessionCommand::Start { mode } => {
                self.round += 1;
                let seed = self.settings.seed.wrapping_add(self.round);
                self.controller = Some(RoundController::new(
                    mode,
                    self.settings.round_config,
                    seed,
                ));
                info!(round = self.round, ?mode, "round started");
                CommandEffect::RoundStarted
            }
            SessionCommand::Move { slot, direction } => {
                let moved = self
                    .controller
                    .as_mut()
                    .is_some_and(|c| c.handle_move(slot, direction));
                if moved {
                    CommandEffect::Applied
                } else {
                    debug!(player = slot.number(), "move ignored");
                    CommandEffect::Ignored
                }
            }
            SessionCommand::Fire { slot } => {
                match self.controller.as_mut().and_then(|c| c.handle_fire(slot)) {
                    Some(_) => CommandEffect::Applied,
                    None => {
                        debug!(player = slot.number(), "fire ignored");
                        CommandEffect::Ignored
                    }
                }
            }
            SessionCommand::Restart => {
                let restarted = self.controller.as_mut().is_some_and(|c| c.restart());
                if restarted {
                    self.round += 1;
                    info!(round = self.round, "round restarted");
                    CommandEffect::RoundStarted
                } else {
                    debug!("restart ignored");
                    CommandEffect::Ignored
                }
            }
            SessionCommand::Close => CommandEffect::Closed,
        }
    }

    fn tick(&mut self, dt: f32) {
        if let Some(controller) = self.controller.as_mut() {
            controller.tick(dt);
        }
    }

    fn tick_second(&mut self) {
        let Some(summary) = self.controller.as_mut().and_then(|c| c.tick_second()) else {
            return;
        };

        tokio::spawn(finalize_round(
            self.round,
            summary,
            self.account.clone(),
            self.archive.clone(),
            self.notice_tx.clone(),
            self.settings.archive_timeout,
        ));
    }

    fn publish(&self) {
        let view = match &self.controller {
            Some(controller) => SessionView::Playing {
                round: self.round,
                snapshot: controller.snapshot(),
            },
            None => SessionView::ModeSelection,
        };
        self.view_tx.send_replace(view);
    }
}

async fn session_task(mut session: Session, mut command_rx: mpsc::Receiver<SessionCommand>) {
    let mut ticks = time::interval(session.settings.tick_interval);
    let mut countdown = time::interval(session.settings.countdown_interval);
    let dt = session.settings.tick_interval.as_secs_f32();

    loop {
        // Both timers are only polled while a round runs, so a torn-down round sees no late tick.
        let running = session.is_running();
        tokio::select! {
            command = command_rx.recv() => {
                let Some(command) = command else {
                    debug!("command channel closed");
                    break;
                };
                match session.apply(command) {
                    CommandEffect::RoundStarted => {
                        ticks.reset();
                        countdown.reset();
                    }
                    CommandEffect::Applied => {}
                    CommandEffect::Ignored => continue,
                    CommandEffect::Closed => break,
                }
            }
            _ = ticks.tick(), if running => session.tick(dt),
            _ = countdown.tick(), if running => session.tick_second(),
        }

        session.publish();
    }

    info!(rounds = session.round, "session closed");
}

// Best lookup, outcome, then a single persist. Runs off the tick loop.
async fn finalize_round(
    round: u64,
    summary: RoundSummary,
    account: Option<AccountId>,
    archive: Arc<dyn ScoreArchive>,
    notice_tx: mpsc::Sender<SessionNotice>,
    archive_timeout: Duration,
) {
    let best = match (&account, summary.mode) {
        (Some(account), GameMode::SinglePlayer) => {
            lookup_best(archive.as_ref(), account, summary.mode, archive_timeout).await
        }
        _ => BestScoreLookup::Absent,
    };

    let outcome = RoundOutcome::resolve(summary.result, best);
    info!(round, ?outcome, "round outcome");
    if notice_tx
        .send(SessionNotice::Outcome { round, outcome })
        .await
        .is_err()
    {
        debug!(round, "session gone before outcome was delivered");
    }

    let Some(account) = account else {
        debug!(round, "guest round; not persisted");
        return;
    };

    let persisted = time::timeout(
        archive_timeout,
        archive.persist(&account, summary.mode, summary.result),
    )
    .await;

    let message = match persisted {
        Ok(Ok(())) => {
            info!(round, account_id = %account, "round persisted");
            return;
        }
        Ok(Err(err)) => {
            warn!(round, account_id = %account, error = ?err, "failed to persist round");
            archive_warning(&err)
        }
        Err(_) => {
            warn!(round, account_id = %account, "persist timed out");
            "Score could not be saved: score service timed out".to_string()
        }
    };

    if notice_tx
        .send(SessionNotice::Warning { round, message })
        .await
        .is_err()
    {
        debug!(round, "session gone before warning was delivered");
    }
}

async fn lookup_best(
    archive: &dyn ScoreArchive,
    account: &AccountId,
    mode: GameMode,
    archive_timeout: Duration,
) -> BestScoreLookup {
    match time::timeout(archive_timeout, archive.best_score(account, mode)).await {
        Ok(Ok(best)) => best.into(),
        Ok(Err(err)) => {
            warn!(account_id = %account, error = ?err, "best score lookup failed");
            BestScoreLookup::Unavailable
        }
        Err(_) => {
            warn!(account_id = %account, "best score lookup timed out");
            BestScoreLookup::Unavailable
        }
    }
}

fn archive_warning(err: &ArchiveError) -> String {
    match err {
        ArchiveError::Unavailable => "Score could not be saved: score service unavailable".into(),
        ArchiveError::Rejected { status } => {
            format!("Score could not be saved: score service rejected it ({status})")
        }
        ArchiveError::UnknownAccount => "Score could not be saved: unknown account".into(),
    }
}
