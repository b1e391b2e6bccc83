use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

use ascii_arcade::adapter::{
    run_server, FrameMessage, InboundCommand, InboundPayload, OutboundMessage, ServerConfig,
    ServerMessage,
};
use ascii_arcade::engine::GameState;
use ascii_arcade::types::{WINDOW_HEIGHT, WINDOW_WIDTH};

fn frame_of(game: &GameState, frame: u64) -> ServerMessage {
    ServerMessage::Frame(FrameMessage {
        frame,
        markup: game.bake(),
        score: game.score(),
        lives: game.lives(),
        game_over: game.game_over(),
    })
}

/// Stand-in game loop: applies actions, acks them and answers frame requests.
fn spawn_game_loop(
    mut cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
) {
    tokio::spawn(async move {
        let mut game = GameState::new(3).with_spawn_interval_ms(0);
        game.start();
        let mut frame = 0u64;
        while let Some(cmd) = cmd_rx.recv().await {
            let reply = match cmd.payload {
                InboundPayload::Actions(actions) => {
                    for action in actions {
                        game.apply_action(action);
                    }
                    frame += 1;
                    ServerMessage::Ack { seq: cmd.seq }
                }
                InboundPayload::FrameRequest => frame_of(&game, frame),
            };
            let line = reply.to_line().unwrap();
            let _ = out_tx.send(OutboundMessage::ToClient {
                client_id: cmd.client_id,
                line,
            });
        }
    });
}

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: std::net::SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.expect("connect failed");
        let (read_half, writer) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        self.writer.flush().await.unwrap();
    }

    async fn read(&mut self) -> serde_json::Value {
        let line = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
            .await
            .expect("timed out waiting for a line")
            .unwrap()
            .expect("connection closed");
        serde_json::from_str(&line).unwrap()
    }
}

#[tokio::test]
async fn adapter_handshake_commands_and_errors() {
    let config = ServerConfig {
        port: 0,
        max_pending_commands: 8,
        ..ServerConfig::default()
    };

    let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(8);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let (ready_tx, ready_rx) = oneshot::channel();

    tokio::spawn(async move {
        let _ = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await;
    });
    let ready = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");
    spawn_game_loop(cmd_rx, out_tx.clone());

    let mut client = Client::connect(ready.addr).await;

    // Commands before hello are refused.
    client
        .send(r#"{"type":"command","seq":1,"actions":["fire"]}"#)
        .await;
    let v = client.read().await;
    assert_eq!(v["type"], "error");
    assert_eq!(v["code"], "handshake_required");
    assert_eq!(v["seq"], 1);

    // Hello gets a welcome and the current frame.
    client
        .send(r#"{"type":"hello","client":{"name":"e2e","version":"0.1"}}"#)
        .await;
    let v = client.read().await;
    assert_eq!(v["type"], "welcome");
    assert_eq!(v["protocol_version"], "1.0.0");
    assert_eq!(v["width"], WINDOW_WIDTH);
    assert_eq!(v["height"], WINDOW_HEIGHT);

    let v = client.read().await;
    assert_eq!(v["type"], "frame");
    assert_eq!(v["lives"], 3);
    assert!(v["markup"].as_str().unwrap().contains("blue-glow"));
    assert_eq!(ready.handshaken_clients.load(Ordering::SeqCst), 1);

    // Applied commands are acked.
    client
        .send(r#"{"type":"command","seq":2,"actions":["moveUp","fire"]}"#)
        .await;
    let v = client.read().await;
    assert_eq!(v["type"], "ack");
    assert_eq!(v["seq"], 2);

    // Replayed seq.
    client
        .send(r#"{"type":"command","seq":2,"actions":["fire"]}"#)
        .await;
    let v = client.read().await;
    assert_eq!(v["code"], "stale_seq");
    assert_eq!(v["seq"], 2);

    // Unknown action.
    client
        .send(r#"{"type":"command","seq":3,"actions":["warp"]}"#)
        .await;
    let v = client.read().await;
    assert_eq!(v["code"], "invalid_command");
    assert_eq!(v["seq"], 3);

    // Not JSON at all.
    client.send("not json").await;
    let v = client.read().await;
    assert_eq!(v["code"], "invalid_json");
    assert!(v.get("seq").is_none());

    // Broadcast frames reach handshaken clients.
    let game = GameState::new(0);
    let line = frame_of(&game, 99).to_line().unwrap();
    out_tx.send(OutboundMessage::Broadcast { line }).unwrap();
    let v = client.read().await;
    assert_eq!(v["type"], "frame");
    assert_eq!(v["frame"], 99);
}

#[tokio::test]
async fn adapter_skips_broadcasts_before_hello() {
    let config = ServerConfig {
        port: 0,
        ..ServerConfig::default()
    };
    let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(4);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let (ready_tx, ready_rx) = oneshot::channel();

    tokio::spawn(async move {
        let _ = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await;
    });
    let ready = ready_rx.await.unwrap();
    spawn_game_loop(cmd_rx, out_tx.clone());

    let mut client = Client::connect(ready.addr).await;
    // Let the server register the connection before broadcasting.
    tokio::time::sleep(Duration::from_millis(50)).await;
    out_tx
        .send(OutboundMessage::Broadcast {
            line: r#"{"type":"frame","frame":1,"markup":"","score":0,"lives":3,"game_over":false}"#
                .to_string(),
        })
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The first line is the welcome, not the broadcast.
    client
        .send(r#"{"type":"hello","client":{"name":"late","version":"0.1"}}"#)
        .await;
    let v = client.read().await;
    assert_eq!(v["type"], "welcome");
    let v = client.read().await;
    assert_eq!(v["type"], "frame");
    assert_eq!(v["frame"], 0);
}
