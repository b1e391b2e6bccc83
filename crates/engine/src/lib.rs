//! Game engine - the shooter's rules on top of the compositor
//!
//! This crate owns the game loop state but no I/O: front-ends feed it
//! [`GameAction`](types::GameAction)s and elapsed time, then draw the
//! composited canvas however they like.
//!
//! # Module Structure
//!
//! - [`game_state`]: shuttle, bullets, asteroids, collisions, score and lives
//! - [`sprites`]: the shared sprite sheet and asteroid kinds
//! - [`rng`]: seeded LCG for reproducible spawns
//! - [`settings`]: player settings read from the environment
//! - [`debug`]: frame-rate sampling and the debug readout
//! - [`snapshot`]: read-only summaries and per-tick events
//!
//! # Example
//!
//! ```
//! use ascii_arcade_engine::{GameEvent, GameState};
//! use ascii_arcade_types::{GameAction, TICK_MS};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! assert!(game.apply_action(GameAction::Fire));
//! let events = game.tick(TICK_MS);
//! assert_eq!(events.first(), Some(&GameEvent::Fired));
//!
//! // A second shot inside the cooldown is refused.
//! assert!(!game.apply_action(GameAction::Fire));
//!
//! // Shuttle and bullet sit side by side with the same class: one run.
//! assert!(game.bake().contains("<span class=\"blue-glow\">>-</span>"));
//! ```

pub mod debug;
pub mod game_state;
pub mod rng;
pub mod settings;
pub mod snapshot;
pub mod sprites;

pub use ascii_arcade_core as core;
pub use ascii_arcade_types as types;

pub use debug::{DebugInfo, FrameStats};
pub use game_state::{shuttle_home, Asteroid, Events, GameState, MAX_EVENTS};
pub use rng::SimpleRng;
pub use settings::Settings;
pub use snapshot::{GameEvent, GameSnapshot};
pub use sprites::{AsteroidKind, SpriteSheet};
