//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async TCP server. The game loop owns
//! all game state; only owned commands and encoded lines cross the channels.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::runtime::{self, Runtime};
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

use crate::error::{AdapterError, Result};
use crate::protocol::{FrameMessage, ServerMessage};
use crate::server::{is_disabled, run_server, ServerConfig, ServerReady};
use crate::types::GameAction;

/// Command delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload {
    /// Apply these actions, then ack `seq`.
    Actions(Vec<GameAction>),
    /// A client finished its handshake and wants the current frame.
    FrameRequest,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    ToClient { client_id: usize, line: String },
    /// Sent to every handshaken client.
    Broadcast { line: String },
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    addr: SocketAddr,
    clients: Arc<AtomicUsize>,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns `Ok(None)` if `ARCADE_REMOTE_DISABLED` is set.
    pub fn start_from_env() -> Result<Option<Self>> {
        if is_disabled() {
            return Ok(None);
        }
        Self::start(ServerConfig::from_env()).map(Some)
    }

    /// Start the server on a background runtime and wait until it is bound.
    pub fn start(config: ServerConfig) -> Result<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let (ready_tx, ready_rx) = oneshot::channel::<ServerReady>();
        let (fail_tx, fail_rx) = oneshot::channel::<AdapterError>();

        let rt = runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("arcade-remote")
            .enable_all()
            .build()
            .map_err(AdapterError::Runtime)?;

        rt.spawn(async move {
            if let Err(e) = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await {
                error!(error = %e, "frame stream stopped");
                let _ = fail_tx.send(e);
            }
        });

        let ready = rt.block_on(async move {
            match ready_rx.await {
                Ok(ready) => Ok(ready),
                Err(_) => Err(fail_rx.await.unwrap_or(AdapterError::Startup)),
            }
        })?;

        Ok(Self {
            _rt: rt,
            addr: ready.addr,
            clients: ready.handshaken_clients,
            cmd_rx,
            out_tx,
        })
    }

    /// Address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of clients that completed the handshake.
    pub fn client_count(&self) -> usize {
        self.clients.load(Ordering::Relaxed)
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    pub fn reply(&self, client_id: usize, msg: &ServerMessage) {
        match msg.to_line() {
            Ok(line) => self.send(OutboundMessage::ToClient { client_id, line }),
            Err(e) => warn!(error = %e, "failed to encode reply"),
        }
    }

    pub fn ack(&self, client_id: usize, seq: u64) {
        self.reply(client_id, &ServerMessage::Ack { seq });
    }

    /// Push a frame to every handshaken client.
    pub fn broadcast_frame(&self, frame: FrameMessage) {
        match ServerMessage::Frame(frame).to_line() {
            Ok(line) => self.send(OutboundMessage::Broadcast { line }),
            Err(e) => warn!(error = %e, "failed to encode frame"),
        }
    }
}
