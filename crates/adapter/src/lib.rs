//! Adapter module - remote frame stream over TCP with a JSON line protocol
//!
//! This module lets remote viewers watch the game and drive it. Every frame
//! the game loop bakes is pushed as the exact markup string a browser would
//! assign to `innerHTML`, so a thin web page can mirror the terminal.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: client connects to the TCP socket (default `127.0.0.1:7878`)
//! 2. **Handshake**: client sends `hello`, server answers `welcome` and the current frame
//! 3. **Streaming**: the server broadcasts a `frame` whenever the markup changes
//! 4. **Commanding**: clients send `command` with game actions; the game loop acks
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **hello**: `{"type":"hello","client":{"name":..,"version":..}}`
//! - **command**: `{"type":"command","seq":1,"actions":["moveUp","fire"]}`
//!
//! ## Server → Client
//!
//! - **welcome**: protocol version and grid size
//! - **frame**: frame counter, markup, score, lives, game-over flag
//! - **ack**: the command with this `seq` was applied
//! - **error**: `handshake_required`, `stale_seq`, `invalid_command`,
//!   `invalid_json` or `backpressure`
//!
//! # Environment Variables
//!
//! - `ARCADE_REMOTE_HOST`: bind address (default `127.0.0.1`)
//! - `ARCADE_REMOTE_PORT`: port number (default `7878`)
//! - `ARCADE_REMOTE_MAX_PENDING`: command queue depth (default `16`)
//! - `ARCADE_REMOTE_DISABLED`: `1` or `true` disables the stream entirely
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","client":{"name":"viewer","version":"1.0"}}
//! Server -> Client: {"type":"welcome","protocol_version":"1.0.0","width":50,"height":11}
//! Server -> Client: {"type":"frame","frame":120,"markup":"...","score":0,"lives":3,"game_over":false}
//! Client -> Server: {"type":"command","seq":1,"actions":["fire"]}
//! Server -> Client: {"type":"ack","seq":1}
//! ```

pub mod error;
pub mod protocol;
pub mod runtime;
pub mod server;

pub use ascii_arcade_types as types;

pub use error::AdapterError;
pub use protocol::*;
pub use runtime::{Adapter, InboundCommand, InboundPayload, OutboundMessage};
pub use server::{is_disabled, run_server, ServerConfig, ServerReady};
