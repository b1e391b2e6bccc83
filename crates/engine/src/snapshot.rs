//! Read-only summaries of the game state for front-ends and remote viewers.

use crate::sprites::AsteroidKind;

/// Point-in-time view of the scoreboard and entity counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub lives: u8,
    pub elapsed_ms: u64,
    pub bullets: usize,
    pub asteroids: usize,
    /// Grid row the shuttle is on.
    pub shuttle_row: i64,
}

/// Something noteworthy that happened during a tick.
///
/// Front-ends map these to sounds or effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Fired,
    AsteroidSpawned { kind: AsteroidKind },
    AsteroidHit { kind: AsteroidKind, remaining: u8 },
    AsteroidDestroyed { kind: AsteroidKind, points: u32 },
    ShuttleHit { lives: u8 },
    GameOver { score: u32 },
}
