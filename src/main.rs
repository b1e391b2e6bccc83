//! ASCII Arcade runner (default binary).
//!
//! Plays the side-scrolling shooter in the terminal. The game runs on a
//! fixed timestep; every tick's baked markup is offered to the remote frame
//! stream, which only sends it on when it changed.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};

use ascii_arcade::adapter::{Adapter, FrameMessage, InboundPayload, ServerMessage};
use ascii_arcade::engine::{DebugInfo, GameState, Settings};
use ascii_arcade::input::{describe_key, handle_key_event, should_quit};
use ascii_arcade::logging;
use ascii_arcade::term::{FrameBuffer, GameView, RemoteStatusView, TerminalRenderer, Viewport};
use ascii_arcade::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    logging::init_from_env()?;
    let settings = Settings::from_env();
    info!(?settings, "starting");

    let adapter = match Adapter::start_from_env() {
        Ok(adapter) => adapter,
        Err(e) => {
            warn!(error = %e, "frame stream unavailable, playing offline");
            None
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = Arcade::new(settings, adapter).run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

struct Arcade {
    game: GameState,
    settings: Settings,
    debug: DebugInfo,
    adapter: Option<Adapter>,
    frame: u64,
    last_markup: Option<String>,
}

impl Arcade {
    fn new(settings: Settings, adapter: Option<Adapter>) -> Self {
        let mut game = GameState::new(settings.seed);
        game.start();
        Self {
            game,
            settings,
            debug: DebugInfo::default(),
            adapter,
            frame: 0,
            last_markup: None,
        }
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(0, 0);

        let started = Instant::now();
        let tick_duration = Duration::from_millis(TICK_MS as u64);
        let mut last_tick = Instant::now();

        loop {
            // Render.
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let remote = self.adapter.as_ref().map(|a| RemoteStatusView {
                port: a.local_addr().port(),
                client_count: a.client_count().min(u16::MAX as usize) as u16,
            });
            let debug = self.settings.debug_mode.then_some(&self.debug);
            view.render_into(&self.game, debug, remote.as_ref(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            self.debug.record_frame(started.elapsed().as_millis() as u64);

            // Input with timeout until next tick.
            let timeout = tick_duration.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key)
                        if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                    {
                        if should_quit(key) {
                            info!(score = self.game.score(), "quit");
                            return Ok(());
                        }
                        self.debug.record_press(describe_key(key.code));
                        if let Some(action) = handle_key_event(key, self.settings.control_scheme)
                        {
                            self.apply(action);
                        }
                    }
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
            }

            self.drain_remote();

            // Tick.
            if last_tick.elapsed() >= tick_duration {
                last_tick = Instant::now();
                for event in self.game.tick(TICK_MS) {
                    debug!(?event, "game event");
                }
                self.frame += 1;
                self.publish_frame();
            }
        }
    }

    fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::ToggleDebug => self.settings.toggle_debug(),
            _ => {
                self.game.apply_action(action);
            }
        }
    }

    fn drain_remote(&mut self) {
        let Some(mut adapter) = self.adapter.take() else {
            return;
        };
        while let Some(inbound) = adapter.try_recv() {
            match inbound.payload {
                InboundPayload::Actions(actions) => {
                    for action in actions {
                        self.apply(action);
                    }
                    adapter.ack(inbound.client_id, inbound.seq);
                }
                InboundPayload::FrameRequest => {
                    let frame = ServerMessage::Frame(self.frame_message(self.game.bake()));
                    adapter.reply(inbound.client_id, &frame);
                }
            }
        }
        self.adapter = Some(adapter);
    }

    /// Broadcast the frame if its markup differs from the last one sent.
    fn publish_frame(&mut self) {
        if self.adapter.is_none() {
            return;
        }
        let markup = self.game.bake();
        if self.last_markup.as_deref() == Some(markup.as_str()) {
            return;
        }
        let message = self.frame_message(markup.clone());
        self.last_markup = Some(markup);
        if let Some(adapter) = &self.adapter {
            adapter.broadcast_frame(message);
        }
    }

    fn frame_message(&self, markup: String) -> FrameMessage {
        FrameMessage {
            frame: self.frame,
            markup,
            score: self.game.score(),
            lives: self.game.lives(),
            game_over: self.game.game_over(),
        }
    }
}
