//! Protocol module - JSON message types for the frame stream
//!
//! Every message is one JSON object per line, tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::types::GameAction;

/// Version reported in `welcome`.
pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// Messages a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// First message on a connection.
    Hello { client: ClientInfo },
    /// Game actions to apply, in order. `seq` must increase strictly per
    /// connection.
    Command { seq: u64, actions: Vec<String> },
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HandshakeRequired,
    StaleSeq,
    InvalidCommand,
    InvalidJson,
    Backpressure,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::HandshakeRequired => "handshake_required",
            ErrorCode::StaleSeq => "stale_seq",
            ErrorCode::InvalidCommand => "invalid_command",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::Backpressure => "backpressure",
        }
    }
}

/// One baked frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMessage {
    /// Frame counter of the game loop.
    pub frame: u64,
    /// Baked markup, ready for `innerHTML`.
    pub markup: String,
    pub score: u32,
    pub lives: u8,
    pub game_over: bool,
}

/// Messages the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol_version: String,
        width: usize,
        height: usize,
    },
    Frame(FrameMessage),
    Ack {
        seq: u64,
    },
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seq: Option<u64>,
        code: ErrorCode,
        message: String,
    },
}

impl ServerMessage {
    pub fn welcome(width: usize, height: usize) -> Self {
        ServerMessage::Welcome {
            protocol_version: PROTOCOL_VERSION.to_string(),
            width,
            height,
        }
    }

    pub fn error(seq: Option<u64>, code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            seq,
            code,
            message: message.into(),
        }
    }

    /// Serialize without the trailing newline.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ============== Parsing ==============

/// Why an inbound line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub seq: Option<u64>,
    pub code: ErrorCode,
    pub message: String,
}

impl Rejection {
    pub fn into_message(self) -> ServerMessage {
        ServerMessage::error(self.seq, self.code, self.message)
    }
}

/// Parse one inbound line.
///
/// Lines that are not JSON are `invalid_json`. JSON that is not a known
/// message is `invalid_command`, carrying its `seq` when one can be found.
pub fn parse_message(line: &str) -> Result<ClientMessage, Rejection> {
    let value: serde_json::Value = serde_json::from_str(line).map_err(|e| Rejection {
        seq: None,
        code: ErrorCode::InvalidJson,
        message: e.to_string(),
    })?;
    let seq = value.get("seq").and_then(serde_json::Value::as_u64);
    serde_json::from_value(value).map_err(|e| Rejection {
        seq,
        code: ErrorCode::InvalidCommand,
        message: e.to_string(),
    })
}

/// Map action names to game actions. Any unknown name rejects the whole
/// command.
pub fn parse_actions(actions: &[String]) -> Result<Vec<GameAction>, String> {
    actions
        .iter()
        .map(|name| GameAction::from_str(name).ok_or_else(|| format!("unknown action: {name}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hello() {
        let msg =
            parse_message(r#"{"type":"hello","client":{"name":"viewer","version":"0.1"}}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Hello {
                client: ClientInfo {
                    name: "viewer".into(),
                    version: "0.1".into()
                }
            }
        );
    }

    #[test]
    fn test_parse_command() {
        let msg = parse_message(r#"{"type":"command","seq":4,"actions":["moveUp","fire"]}"#)
            .unwrap();
        let ClientMessage::Command { seq, actions } = msg else {
            panic!("expected command");
        };
        assert_eq!(seq, 4);
        assert_eq!(
            parse_actions(&actions).unwrap(),
            vec![GameAction::MoveUp, GameAction::Fire]
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = parse_actions(&["fire".into(), "jump".into()]).unwrap_err();
        assert!(err.contains("jump"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_message("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJson);
        assert_eq!(err.seq, None);
    }

    #[test]
    fn test_unknown_type_keeps_seq() {
        let err = parse_message(r#"{"type":"teleport","seq":9}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCommand);
        assert_eq!(err.seq, Some(9));
    }

    #[test]
    fn test_server_messages_serialize_tagged() {
        let line = ServerMessage::Ack { seq: 3 }.to_line().unwrap();
        assert_eq!(line, r#"{"type":"ack","seq":3}"#);

        let line = ServerMessage::error(None, ErrorCode::HandshakeRequired, "hello first")
            .to_line()
            .unwrap();
        assert_eq!(
            line,
            r#"{"type":"error","code":"handshake_required","message":"hello first"}"#
        );

        let frame = ServerMessage::Frame(FrameMessage {
            frame: 7,
            markup: "<span class=\"blue-glow\">></span>".into(),
            score: 10,
            lives: 3,
            game_over: false,
        });
        let value: serde_json::Value = serde_json::from_str(&frame.to_line().unwrap()).unwrap();
        assert_eq!(value["type"], "frame");
        assert_eq!(value["markup"], "<span class=\"blue-glow\">></span>");
        assert_eq!(value["lives"], 3);
    }

    #[test]
    fn test_error_code_names_match_wire() {
        for code in [
            ErrorCode::HandshakeRequired,
            ErrorCode::StaleSeq,
            ErrorCode::InvalidCommand,
            ErrorCode::InvalidJson,
            ErrorCode::Backpressure,
        ] {
            let wire = serde_json::to_string(&code).unwrap();
            assert_eq!(wire, format!("\"{}\"", code.as_str()));
        }
    }
}
