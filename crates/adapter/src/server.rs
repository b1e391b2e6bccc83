//! TCP server for the frame stream
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::error::{AdapterError, Result};
use crate::protocol::{parse_actions, parse_message, ClientMessage, ErrorCode, ServerMessage};
use crate::runtime::{InboundCommand, InboundPayload, OutboundMessage};
use crate::types::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
    /// Grid size announced in `welcome`.
    pub width: usize,
    pub height: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_pending_commands: 16,
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        }
    }
}

impl ServerConfig {
    /// Create from `ARCADE_REMOTE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("ARCADE_REMOTE_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("ARCADE_REMOTE_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_pending_commands = lookup("ARCADE_REMOTE_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            host,
            port,
            max_pending_commands,
            ..defaults
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| AdapterError::InvalidAddress { addr, source })
    }
}

/// Check whether the frame stream is disabled via `ARCADE_REMOTE_DISABLED`.
pub fn is_disabled() -> bool {
    std::env::var("ARCADE_REMOTE_DISABLED")
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(v: &str) -> bool {
    matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Reported once the listener is bound.
#[derive(Debug, Clone)]
pub struct ServerReady {
    pub addr: SocketAddr,
    /// Live count of clients that completed the handshake.
    pub handshaken_clients: Arc<AtomicUsize>,
}

/// Handle to a connected client
struct ClientHandle {
    id: usize,
    handshaken: bool,
    last_seq: Option<u64>,
    tx: mpsc::UnboundedSender<String>,
}

/// Shared server state
struct ServerState {
    config: ServerConfig,
    clients: RwLock<Vec<ClientHandle>>,
    handshaken: Arc<AtomicUsize>,
}

impl ServerState {
    async fn send_to(&self, client_id: usize, line: String) {
        let clients = self.clients.read().await;
        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
            let _ = c.tx.send(line);
        }
    }

    async fn broadcast(&self, line: String) {
        let clients = self.clients.read().await;
        for c in clients.iter().filter(|c| c.handshaken) {
            let _ = c.tx.send(line.clone());
        }
    }

    async fn is_handshaken(&self, client_id: usize) -> bool {
        let clients = self.clients.read().await;
        clients
            .iter()
            .find(|c| c.id == client_id)
            .is_some_and(|c| c.handshaken)
    }

    async fn mark_handshaken(&self, client_id: usize) {
        let mut clients = self.clients.write().await;
        if let Some(c) = clients.iter_mut().find(|c| c.id == client_id) {
            if !c.handshaken {
                c.handshaken = true;
                self.handshaken.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Record `seq` if it is newer than the last one seen from this client.
    async fn check_and_update_seq(&self, client_id: usize, seq: u64) -> bool {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
            return false;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    async fn remove(&self, client_id: usize) {
        let mut clients = self.clients.write().await;
        if let Some(pos) = clients.iter().position(|c| c.id == client_id) {
            if clients.remove(pos).handshaken {
                self.handshaken.fetch_sub(1, Ordering::Relaxed);
            }
        }
    }
}

/// Start the TCP server.
///
/// Runs until the listener fails. Commands go to `command_tx`; everything on
/// `out_rx` is written to clients.
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<ServerReady>>,
) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AdapterError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    let bound = listener.local_addr()?;
    info!(%bound, "frame stream listening");

    let state = Arc::new(ServerState {
        config,
        clients: RwLock::new(Vec::new()),
        handshaken: Arc::new(AtomicUsize::new(0)),
    });
    if let Some(tx) = ready_tx {
        let _ = tx.send(ServerReady {
            addr: bound,
            handshaken_clients: Arc::clone(&state.handshaken),
        });
    }

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                match msg {
                    OutboundMessage::ToClient { client_id, line } => {
                        state.send_to(client_id, line).await
                    }
                    OutboundMessage::Broadcast { line } => state.broadcast(line).await,
                }
            }
        });
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, peer) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %peer, "client connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, Arc::clone(&state), command_tx).await {
                warn!(client_id, error = %e, "client error");
            }
            state.remove(client_id).await;
            info!(client_id, "client disconnected");
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
) -> Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    {
        let mut clients = state.clients.write().await;
        clients.push(ClientHandle {
            id: client_id,
            handshaken: false,
            last_seq: None,
            tx: tx.clone(),
        });
    }

    // Ends once every sender is gone, after the client is removed.
    tokio::spawn(async move {
        while let Some(mut line) = rx.recv().await {
            line.push('\n');
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let reply = |msg: ServerMessage| match msg.to_line() {
        Ok(line) => {
            let _ = tx.send(line);
        }
        Err(e) => warn!(client_id, error = %e, "failed to encode reply"),
    };

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let msg = match parse_message(trimmed) {
            Ok(msg) => msg,
            Err(rejection) => {
                warn!(client_id, code = rejection.code.as_str(), "rejected line");
                reply(rejection.into_message());
                continue;
            }
        };

        match msg {
            ClientMessage::Hello { client } => {
                debug!(client_id, name = %client.name, version = %client.version, "hello");
                state.mark_handshaken(client_id).await;
                reply(ServerMessage::welcome(state.config.width, state.config.height));
                // Ask the game loop for the current frame so the viewer
                // does not wait for the next change.
                let _ = command_tx.try_send(InboundCommand {
                    client_id,
                    seq: 0,
                    payload: InboundPayload::FrameRequest,
                });
            }

            ClientMessage::Command { seq, actions } => {
                if !state.is_handshaken(client_id).await {
                    reply(ServerMessage::error(
                        Some(seq),
                        ErrorCode::HandshakeRequired,
                        "send hello before command",
                    ));
                    continue;
                }
                if !state.check_and_update_seq(client_id, seq).await {
                    reply(ServerMessage::error(
                        Some(seq),
                        ErrorCode::StaleSeq,
                        "seq must be strictly increasing",
                    ));
                    continue;
                }
                let actions = match parse_actions(&actions) {
                    Ok(actions) => actions,
                    Err(message) => {
                        reply(ServerMessage::error(
                            Some(seq),
                            ErrorCode::InvalidCommand,
                            message,
                        ));
                        continue;
                    }
                };

                // Ack is sent by the game loop once the actions are applied.
                let queued = command_tx.try_send(InboundCommand {
                    client_id,
                    seq,
                    payload: InboundPayload::Actions(actions),
                });
                if queued.is_err() {
                    reply(ServerMessage::error(
                        Some(seq),
                        ErrorCode::Backpressure,
                        "command queue is full",
                    ));
                }
            }
        }
    }

    Ok(())
}
