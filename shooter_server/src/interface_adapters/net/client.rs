use crate::domain::{AccountId, LoginResult, RegisterResult};
use crate::interface_adapters::protocol::{
    ClientMessage, CredentialsDto, FailureReason, ServerMessage, SnapshotDto,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{
    SessionCommand, SessionHandle, SessionNotice, SessionView, account, spawn_session,
};

use axum::{
    Error,
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;
use tracing::{Instrument, Span, debug, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug)]
enum NetError {
    // Categorizes connection lifecycle failures so callers can decide policy.
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    SessionClosed,
    HandshakeRequired,
    ClosedBeforeHandshake,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

const LOG_THROTTLE: Duration = Duration::from_secs(2);
const MAX_INVALID_JSON: u32 = 10;
const MAX_CREDENTIAL_LEN: usize = 256;
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| {
        // Separate connection id for correlating logs before/after an account exists.
        let conn_id = Uuid::new_v4();
        let span = info_span!("conn", %conn_id, account_id = tracing::field::Empty);
        handle_socket(socket, state).instrument(span)
    })
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let handshake = match timeout(HANDSHAKE_TIMEOUT, read_handshake(&mut socket, &state)).await {
        Ok(Ok(handshake)) => handshake,
        Ok(Err(NetError::ClosedBeforeHandshake)) => {
            info!("client disconnected before handshake");
            return;
        }
        Ok(Err(e)) => {
            warn!(error = ?e, "handshake failed");
            return;
        }
        Err(_) => {
            let _ = send_close_with_reason(&mut socket, close_code::POLICY, "handshake timeout").await;
            warn!("handshake timed out");
            return;
        }
    };

    if let Some(account) = &handshake.account {
        Span::current().record("account_id", account.as_str());
    }
    info!(guest = handshake.account.is_none(), "client connected");

    let mut settings = state.session_settings.clone();
    settings.seed = rand::random();
    let session = spawn_session(handshake.account, state.archive.clone(), settings);
    let mut ctx = ConnCtx::new(session, handshake.msgs_in, handshake.bytes_in);

    match send_message(&mut socket, &ServerMessage::ModeSelection).await {
        Ok(bytes) => {
            ctx.msgs_out += 1;
            ctx.bytes_out += bytes as u64;
            if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
                warn!(error = ?e, "client loop exited with error");
            }
        }
        Err(e) => warn!(error = ?e, "failed to send mode selection"),
    }

    // Stop the round timers before the connection goes away.
    if ctx.command_tx.send(SessionCommand::Close).await.is_err() {
        debug!("session already stopped");
    }

    info!(
        msgs_in = ctx.msgs_in,
        msgs_out = ctx.msgs_out,
        bytes_in = ctx.bytes_in,
        bytes_out = ctx.bytes_out,
        invalid_json = ctx.invalid_json,
        "client disconnected"
    );
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

async fn send_close_with_reason(
    socket: &mut WebSocket,
    code: u16,
    reason: &'static str,
) -> Result<(), NetError> {
    socket
        .send(Message::Close(Some(CloseFrame {
            code,
            reason: reason.into(),
        })))
        .await
        .map_err(NetError::Ws)?;
    socket.close().await.map_err(NetError::Ws)
}

struct ConnCtx {
    pub command_tx: mpsc::Sender<SessionCommand>,
    pub view_rx: watch::Receiver<SessionView>,
    pub notice_rx: mpsc::Receiver<SessionNotice>,

    pub msgs_in: u64,
    pub msgs_out: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,

    pub invalid_json: u32,

    pub last_command_full_log: Instant,
    pub last_ignored_log: Instant,

    pub close_frame: Option<CloseFrame>,
}

impl ConnCtx {
    fn new(session: SessionHandle, msgs_in: u64, bytes_in: u64) -> Self {
        let now = Instant::now() - LOG_THROTTLE;
        Self {
            command_tx: session.command_tx,
            view_rx: session.view_rx,
            notice_rx: session.notice_rx,
            msgs_in,
            msgs_out: 0,
            bytes_in,
            bytes_out: 0,
            invalid_json: 0,
            last_command_full_log: now,
            last_ignored_log: now,
            close_frame: None,
        }
    }
}

#[derive(Debug)]
struct Handshake {
    account: Option<AccountId>,
    bytes_in: u64,
    msgs_in: u64,
}

// Login and register may be retried; only Guest or a successful Login ends the handshake.
async fn read_handshake(socket: &mut WebSocket, state: &AppState) -> Result<Handshake, NetError> {
    let mut msgs_in = 0;
    let mut bytes_in = 0;

    loop {
        let Some(incoming) = socket.recv().await else {
            return Err(NetError::ClosedBeforeHandshake);
        };

        let message = incoming.map_err(NetError::Ws)?;
        match message {
            Message::Text(text) => {
                msgs_in += 1;
                bytes_in += text.len() as u64;

                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Guest) => {
                        return Ok(Handshake {
                            account: None,
                            bytes_in,
                            msgs_in,
                        });
                    }
                    Ok(ClientMessage::Login(credentials)) => {
                        let result = if credentials_too_long(&credentials) {
                            LoginResult::InvalidCredentials
                        } else {
                            account::login(
                                state.identity.as_ref(),
                                &credentials.email,
                                &credentials.password,
                            )
                            .await
                        };

                        let reply = match result {
                            LoginResult::Ok(account) => {
                                send_message(
                                    socket,
                                    &ServerMessage::Identity {
                                        account_id: account.to_string(),
                                    },
                                )
                                .await?;
                                return Ok(Handshake {
                                    account: Some(account),
                                    bytes_in,
                                    msgs_in,
                                });
                            }
                            LoginResult::InvalidCredentials => FailureReason::InvalidCredentials,
                            LoginResult::StoreUnavailable => FailureReason::StoreUnavailable,
                        };
                        debug!(reason = ?reply, "login failed");
                        send_message(socket, &ServerMessage::LoginFailed { reason: reply }).await?;
                    }
                    Ok(ClientMessage::Register(credentials)) => {
                        let result = if credentials_too_long(&credentials) {
                            RegisterResult::InvalidCredentials
                        } else {
                            account::register(
                                state.identity.as_ref(),
                                &credentials.email,
                                &credentials.password,
                            )
                            .await
                        };

                        let reply = match result {
                            RegisterResult::Registered(account) => ServerMessage::Registered {
                                account_id: account.to_string(),
                            },
                            RegisterResult::AlreadyRegistered => ServerMessage::RegisterFailed {
                                reason: FailureReason::AlreadyRegistered,
                            },
                            RegisterResult::InvalidCredentials => ServerMessage::RegisterFailed {
                                reason: FailureReason::InvalidCredentials,
                            },
                            RegisterResult::StoreUnavailable => ServerMessage::RegisterFailed {
                                reason: FailureReason::StoreUnavailable,
                            },
                        };
                        send_message(socket, &reply).await?;
                    }
                    Ok(_) => {
                        let _ = send_close_with_reason(
                            socket,
                            close_code::POLICY,
                            "handshake required",
                        )
                        .await;
                        return Err(NetError::HandshakeRequired);
                    }
                    Err(_) => {
                        let _ = send_close_with_reason(
                            socket,
                            close_code::POLICY,
                            "invalid handshake payload",
                        )
                        .await;
                        return Err(NetError::HandshakeRequired);
                    }
                }
            }
            Message::Binary(_) => {
                let _ = send_close_with_reason(
                    socket,
                    close_code::UNSUPPORTED,
                    "binary messages not supported",
                )
                .await;
                return Err(NetError::HandshakeRequired);
            }
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => return Err(NetError::ClosedBeforeHandshake),
        }
    }
}

fn credentials_too_long(credentials: &CredentialsDto) -> bool {
    credentials.email.len() > MAX_CREDENTIAL_LEN || credentials.password.len() > MAX_CREDENTIAL_LEN
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

enum LoopControl {
    Continue,
    Disconnect,
}

fn view_message(view: &SessionView) -> ServerMessage {
    match view {
        SessionView::ModeSelection => ServerMessage::ModeSelection,
        SessionView::Playing { round, snapshot } => {
            ServerMessage::Snapshot(SnapshotDto::new(*round, snapshot))
        }
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    // Split borrows so `tokio::select!` can hold them concurrently.
    let ConnCtx {
        command_tx,
        view_rx,
        notice_rx,
        msgs_in,
        msgs_out,
        bytes_in,
        bytes_out,
        invalid_json,
        last_command_full_log,
        last_ignored_log,
        close_frame,
    } = ctx;

    let mut fatal: Option<NetError> = None;

    loop {
        let disconnect: bool = tokio::select! {
            incoming = socket.recv() => {
                match handle_incoming_ws(
                    incoming,
                    command_tx,
                    msgs_in,
                    bytes_in,
                    invalid_json,
                    last_command_full_log,
                    last_ignored_log,
                    close_frame,
                ) {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            changed = view_rx.changed() => {
                match changed {
                    Ok(()) => {
                        let msg = view_message(&view_rx.borrow_and_update());
                        match forward_message(&msg, socket, msgs_out, bytes_out).await {
                            LoopControl::Continue => false,
                            LoopControl::Disconnect => true,
                        }
                    }
                    Err(_) => {
                        fatal = Some(NetError::SessionClosed);
                        true
                    }
                }
            }

            notice = notice_rx.recv() => {
                match notice {
                    Some(notice) => {
                        let msg = ServerMessage::from(notice);
                        match forward_message(&msg, socket, msgs_out, bytes_out).await {
                            LoopControl::Continue => false,
                            LoopControl::Disconnect => true,
                        }
                    }
                    None => {
                        fatal = Some(NetError::SessionClosed);
                        true
                    }
                }
            }
        };

        if disconnect {
            if let Some(frame) = close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_incoming_ws(
    incoming: Option<Result<Message, Error>>,
    command_tx: &mpsc::Sender<SessionCommand>,
    msgs_in: &mut u64,
    bytes_in: &mut u64,
    invalid_json: &mut u32,
    last_command_full_log: &mut Instant,
    last_ignored_log: &mut Instant,
    close_frame: &mut Option<CloseFrame>,
) -> Result<LoopControl, NetError> {
    match incoming {
        Some(Ok(msg)) => match msg {
            Message::Text(text) => {
                *msgs_in += 1;
                *bytes_in += text.len() as u64;

                let parsed = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(parsed) => parsed,
                    Err(parse_err) => {
                        *invalid_json += 1;
                        if should_log(last_ignored_log) {
                            warn!(
                                bytes = text.len(),
                                error = %parse_err,
                                "failed to parse client message"
                            );
                        }

                        if *invalid_json > MAX_INVALID_JSON {
                            *close_frame = Some(CloseFrame {
                                code: close_code::POLICY,
                                reason: "too many invalid messages".into(),
                            });
                            return Ok(LoopControl::Disconnect);
                        }
                        return Ok(LoopControl::Continue);
                    }
                };

                let Some(command) = parsed.into_command() else {
                    // Repeated handshakes and unknown seats keep the session stable.
                    if should_log(last_ignored_log) {
                        warn!("message ignored after handshake");
                    }
                    return Ok(LoopControl::Continue);
                };

                match command_tx.try_send(command) {
                    Ok(()) => Ok(LoopControl::Continue),
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        if should_log(last_command_full_log) {
                            warn!("command channel full; dropping command");
                        }
                        Ok(LoopControl::Continue)
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => Err(NetError::SessionClosed),
                }
            }
            Message::Binary(_) => {
                *close_frame = Some(CloseFrame {
                    code: close_code::UNSUPPORTED,
                    reason: "binary messages not supported".into(),
                });
                Ok(LoopControl::Disconnect)
            }
            Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
            Message::Close(_) => Ok(LoopControl::Disconnect),
        },
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            Ok(LoopControl::Disconnect)
        }
        None => {
            info!("websocket closed");
            Ok(LoopControl::Disconnect)
        }
    }
}

async fn forward_message(
    msg: &ServerMessage,
    socket: &mut WebSocket,
    msgs_out: &mut u64,
    bytes_out: &mut u64,
) -> LoopControl {
    match send_message(socket, msg).await {
        Ok(bytes) => {
            *msgs_out += 1;
            *bytes_out += bytes as u64;
            LoopControl::Continue
        }
        Err(err) => {
            // Log unexpected send failures; disconnect will follow immediately.
            warn!(error = ?err, "failed to send message");
            LoopControl::Disconnect
        }
    }
}
