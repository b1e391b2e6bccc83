//! Game state module - the shuttle, its bullets and the asteroid field
//!
//! All entities live on one [`Canvas`]; the state keeps their handles and
//! per-entity game data (hit points, velocity) alongside. Time advances only
//! through [`GameState::tick`], so the simulation is deterministic for a
//! given seed and sequence of actions.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::core::{Canvas, EntityId, RichTextArea};
use crate::rng::SimpleRng;
use crate::snapshot::{GameEvent, GameSnapshot};
use crate::sprites::{AsteroidKind, SpriteSheet, STAR_CLASS};
use crate::types::*;

/// Upper bound on events reported by a single tick.
pub const MAX_EVENTS: usize = 64;

/// Events reported by one tick.
pub type Events = ArrayVec<GameEvent, MAX_EVENTS>;

const STAR_COUNT: u32 = 12;

/// An asteroid on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub id: EntityId,
    pub kind: AsteroidKind,
    pub hit_points: u8,
    /// Leftward speed in cells per second.
    pub velocity: f64,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    canvas: Canvas,
    sprites: SpriteSheet,
    shuttle: EntityId,
    bullets: Vec<EntityId>,
    asteroids: Vec<Asteroid>,
    rng: SimpleRng,
    seed: u32,
    score: u32,
    lives: u8,
    elapsed_ms: u64,
    last_fire_ms: Option<u64>,
    spawn_timer_ms: u32,
    spawn_interval_ms: u32,
    events: Events,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let sprites = SpriteSheet::new();
        let mut canvas = Canvas::with_text_area(starfield(seed));
        let shuttle = canvas.put_sprite(sprites.shuttle.clone(), shuttle_home());

        Self {
            canvas,
            sprites,
            shuttle,
            bullets: Vec::new(),
            asteroids: Vec::new(),
            rng: SimpleRng::new(seed),
            seed,
            score: 0,
            lives: STARTING_LIVES,
            elapsed_ms: 0,
            last_fire_ms: None,
            spawn_timer_ms: 0,
            spawn_interval_ms: ASTEROID_SPAWN_MS,
            events: Events::new(),
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Override the asteroid spawn interval. `0` disables spawning.
    pub fn with_spawn_interval_ms(mut self, interval_ms: u32) -> Self {
        self.spawn_interval_ms = interval_ms;
        self
    }

    /// Start the simulation
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(seed = self.seed, "game started");
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }

    pub fn shuttle(&self) -> EntityId {
        self.shuttle
    }

    pub fn bullets(&self) -> &[EntityId] {
        &self.bullets
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    /// Composite the current frame.
    pub fn compose(&self) -> RichTextArea {
        self.canvas.compose()
    }

    /// Composite the current frame and serialize it to markup.
    pub fn bake(&self) -> String {
        self.canvas.bake()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            started: self.started,
            paused: self.paused,
            game_over: self.game_over,
            score: self.score,
            lives: self.lives,
            elapsed_ms: self.elapsed_ms,
            bullets: self.bullets.len(),
            asteroids: self.asteroids.len(),
            shuttle_row: self.shuttle_row(),
        }
    }

    fn shuttle_row(&self) -> i64 {
        self.canvas
            .get(self.shuttle)
            .map(|e| e.bottom_left().y as i64)
            .unwrap_or_default()
    }

    fn playing(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    fn push_event(&mut self, event: GameEvent) {
        // Overflowing events are dropped; the state change itself still happens.
        let _ = self.events.try_push(event);
    }

    /// Apply a player action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveUp => self.move_shuttle(1),
            GameAction::MoveDown => self.move_shuttle(-1),
            GameAction::Fire => self.fire(),
            GameAction::Pause => {
                if !self.started || self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                let spawn_interval_ms = self.spawn_interval_ms;
                *self = Self::new(self.seed).with_spawn_interval_ms(spawn_interval_ms);
                self.start();
                true
            }
            // Front-end setting, nothing to do in the simulation.
            GameAction::ToggleDebug => false,
        }
    }

    /// Move the shuttle by `rows`, clamped to the grid.
    pub fn move_shuttle(&mut self, rows: i64) -> bool {
        if !self.playing() {
            return false;
        }
        let top = WINDOW_HEIGHT as f64 - 1.0;
        let Some(shuttle) = self.canvas.get_mut(self.shuttle) else {
            return false;
        };
        let current = shuttle.position();
        let y = (current.y + rows as f64).clamp(0.0, top);
        if y == current.y {
            return false;
        }
        shuttle.set_position(Vector::new(current.x, y));
        true
    }

    /// Fire a bullet from the shuttle unless the cooldown is still running.
    pub fn fire(&mut self) -> bool {
        if !self.playing() {
            return false;
        }
        if let Some(last) = self.last_fire_ms {
            if self.elapsed_ms.saturating_sub(last) < FIRE_DELAY_MS as u64 {
                return false;
            }
        }
        let row = self.shuttle_row();
        let id = self
            .canvas
            .put_sprite(self.sprites.bullet.clone(), Vector::cell(1, row));
        self.bullets.push(id);
        self.last_fire_ms = Some(self.elapsed_ms);
        self.push_event(GameEvent::Fired);
        true
    }

    /// Place an asteroid with an explicit position and speed.
    pub fn spawn_asteroid_at(
        &mut self,
        kind: AsteroidKind,
        position: Vector,
        velocity: f64,
    ) -> EntityId {
        let id = self
            .canvas
            .put_sprite(self.sprites.asteroid(kind).clone(), position);
        self.asteroids.push(Asteroid {
            id,
            kind,
            hit_points: kind.hit_points(),
            velocity,
        });
        debug!(kind = kind.as_str(), x = position.x, y = position.y, velocity, "asteroid spawned");
        self.push_event(GameEvent::AsteroidSpawned { kind });
        id
    }

    /// Spawn a random asteroid just inside the right edge.
    pub fn spawn_asteroid(&mut self) -> EntityId {
        let kind = if self.rng.next_range(10) < 7 {
            AsteroidKind::Small
        } else {
            AsteroidKind::Large
        };
        let sprite = self.sprites.asteroid(kind);
        let center = sprite.center();
        let size = sprite.size();

        // Keep the whole sprite on the grid vertically.
        let min_y = center.y as u32;
        let max_y = (WINDOW_HEIGHT as f64 - size.y + center.y) as u32;
        let y = min_y + self.rng.next_range(max_y - min_y + 1);
        let x = WINDOW_WIDTH as f64 - 1.0 + center.x;

        let (lo, hi) = kind.speed_range();
        let velocity = self.rng.range_f64(lo, hi);
        self.spawn_asteroid_at(kind, Vector::new(x, y as f64), velocity)
    }

    /// Advance the simulation by `elapsed_ms` and report what happened.
    ///
    /// Events from actions applied since the previous tick (such as shots
    /// fired) are reported first.
    pub fn tick(&mut self, elapsed_ms: u32) -> Events {
        if self.playing() {
            self.elapsed_ms += elapsed_ms as u64;
            let dt = elapsed_ms as f64 / 1000.0;

            self.move_bullets(dt);
            self.move_asteroids(dt);
            self.run_spawner(elapsed_ms);
            self.resolve_bullet_hits();
            self.resolve_shuttle_hits();
        }
        std::mem::take(&mut self.events)
    }

    fn move_bullets(&mut self, dt: f64) {
        let step = Vector::RIGHT * (BULLET_SPEED * dt);
        let right_edge = WINDOW_WIDTH as f64 - 1.0;
        let canvas = &mut self.canvas;
        self.bullets.retain(|&id| {
            let Some(bullet) = canvas.get_mut(id) else {
                return false;
            };
            bullet.translate(step);
            if bullet.position().x > right_edge {
                canvas.remove(id);
                return false;
            }
            true
        });
    }

    fn move_asteroids(&mut self, dt: f64) {
        let canvas = &mut self.canvas;
        self.asteroids.retain(|asteroid| {
            let Some(entity) = canvas.get_mut(asteroid.id) else {
                return false;
            };
            entity.translate(Vector::LEFT * (asteroid.velocity * dt));
            if entity.top_right().x < 0.0 {
                canvas.remove(asteroid.id);
                return false;
            }
            true
        });
    }

    fn run_spawner(&mut self, elapsed_ms: u32) {
        if self.spawn_interval_ms == 0 {
            return;
        }
        self.spawn_timer_ms += elapsed_ms;
        while self.spawn_timer_ms >= self.spawn_interval_ms {
            self.spawn_timer_ms -= self.spawn_interval_ms;
            self.spawn_asteroid();
        }
    }

    fn resolve_bullet_hits(&mut self) {
        // Hit points left after the hits found so far; a bullet never hits a
        // rock an earlier bullet already finished off this tick.
        let mut left: Vec<u8> = self.asteroids.iter().map(|a| a.hit_points).collect();
        let mut hits: Vec<(EntityId, usize)> = Vec::new();
        for &bullet_id in &self.bullets {
            let Some(bullet) = self.canvas.get(bullet_id) else {
                continue;
            };
            let target = self.asteroids.iter().enumerate().position(|(i, a)| {
                left[i] > 0
                    && self
                        .canvas
                        .get(a.id)
                        .is_some_and(|e| e.is_colliding_with(bullet))
            });
            if let Some(index) = target {
                left[index] -= 1;
                hits.push((bullet_id, index));
            }
        }

        for (bullet_id, index) in hits {
            self.bullets.retain(|&id| id != bullet_id);
            self.canvas.remove(bullet_id);

            let asteroid = &mut self.asteroids[index];
            asteroid.hit_points = asteroid.hit_points.saturating_sub(1);
            let (kind, remaining) = (asteroid.kind, asteroid.hit_points);
            if remaining > 0 {
                self.push_event(GameEvent::AsteroidHit { kind, remaining });
            } else {
                let points = kind.points();
                self.score += points;
                debug!(kind = kind.as_str(), points, score = self.score, "asteroid destroyed");
                self.push_event(GameEvent::AsteroidDestroyed { kind, points });
            }
        }

        let canvas = &mut self.canvas;
        self.asteroids.retain(|a| {
            if a.hit_points == 0 {
                canvas.remove(a.id);
                return false;
            }
            true
        });
    }

    fn resolve_shuttle_hits(&mut self) {
        let Some(shuttle) = self.canvas.get(self.shuttle) else {
            return;
        };
        let crashed: Vec<EntityId> = self
            .asteroids
            .iter()
            .filter(|a| {
                self.canvas
                    .get(a.id)
                    .is_some_and(|e| shuttle.is_colliding_with(e))
            })
            .map(|a| a.id)
            .collect();

        for id in crashed {
            if self.game_over {
                break;
            }
            self.asteroids.retain(|a| a.id != id);
            self.canvas.remove(id);
            self.lives = self.lives.saturating_sub(1);
            info!(lives = self.lives, "shuttle hit");
            self.push_event(GameEvent::ShuttleHit { lives: self.lives });
            if self.lives == 0 {
                self.game_over = true;
                info!(score = self.score, "game over");
                self.push_event(GameEvent::GameOver { score: self.score });
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// The shuttle's starting position: left edge, middle row.
pub fn shuttle_home() -> Vector {
    Vector::cell(0, ((WINDOW_HEIGHT - 1) / 2) as i64)
}

/// A dim, seeded starfield for the background.
fn starfield(seed: u32) -> RichTextArea {
    let mut area = RichTextArea::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut rng = SimpleRng::new(seed.rotate_left(16) ^ 0x5eed);
    for _ in 0..STAR_COUNT {
        // Column 0 is the shuttle's lane; keep it clear.
        let x = 1 + rng.next_range(WINDOW_WIDTH as u32 - 1) as i64;
        let y = rng.next_range(WINDOW_HEIGHT as u32) as i64;
        let position = Vector::cell(x, y);
        area.text_mut().set(position, '.');
        area.style(position, [STAR_CLASS]);
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_game() -> GameState {
        let mut game = GameState::new(7).with_spawn_interval_ms(0);
        game.start();
        game
    }

    #[test]
    fn shuttle_starts_mid_left() {
        let game = quiet_game();
        assert_eq!(game.snapshot().shuttle_row, 5);
        let shuttle = game.canvas().get(game.shuttle()).unwrap();
        assert_eq!(shuttle.position(), Vector::new(0.0, 5.0));
    }

    #[test]
    fn shuttle_movement_is_clamped() {
        let mut game = quiet_game();
        for _ in 0..20 {
            game.apply_action(GameAction::MoveUp);
        }
        assert_eq!(game.snapshot().shuttle_row, WINDOW_HEIGHT as i64 - 1);
        assert!(!game.apply_action(GameAction::MoveUp));

        for _ in 0..20 {
            game.apply_action(GameAction::MoveDown);
        }
        assert_eq!(game.snapshot().shuttle_row, 0);
        assert!(!game.apply_action(GameAction::MoveDown));
    }

    #[test]
    fn nothing_moves_before_start() {
        let mut game = GameState::new(7);
        assert!(!game.apply_action(GameAction::Fire));
        assert!(!game.apply_action(GameAction::MoveUp));
        assert!(game.tick(1000).is_empty());
        assert_eq!(game.elapsed_ms(), 0);
    }

    #[test]
    fn starfield_is_dim_and_leaves_lane_clear() {
        let game = GameState::new(3);
        let background = game.canvas().text_area();
        for (&index, classes) in background.spans() {
            assert!(classes.contains(STAR_CLASS));
            assert_eq!(background.text().char_at(index), Some('.'));
            assert_ne!(background.text().as_vector(index).x, 0.0);
        }
    }

    #[test]
    fn toggle_debug_is_not_a_simulation_action() {
        let mut game = quiet_game();
        assert!(!game.apply_action(GameAction::ToggleDebug));
    }
}
