//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (compositor, game logic, terminal rendering, remote protocol).
//!
//! # Grid Dimensions
//!
//! The playfield is a 50x11 character grid:
//!
//! - **Width**: 50 columns (indexed 0-49, left to right)
//! - **Height**: 11 rows (indexed 0-10, **bottom to top**)
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FIRE_DELAY_MS` | 300 | Minimum time between two shots |
//! | `ASTEROID_SPAWN_MS` | 1500 | Interval between asteroid spawns |
//! | `DEBUG_INTERVAL_MS` | 500 | FPS sampling window for the debug readout |
//!
//! # Examples
//!
//! ```
//! use ascii_arcade_types::{ControlScheme, GameAction, Vector, WINDOW_HEIGHT, WINDOW_WIDTH};
//!
//! let action = GameAction::from_str("moveUp").unwrap();
//! assert_eq!(action, GameAction::MoveUp);
//!
//! assert_eq!(ControlScheme::from_str("VIM"), Some(ControlScheme::Vim));
//!
//! let centre = Vector::new(0.0, ((WINDOW_HEIGHT - 1) / 2) as f64);
//! assert_eq!(centre.y, 5.0);
//! assert_eq!(WINDOW_WIDTH, 50);
//! ```

pub mod vector;

pub use vector::{round_half_up, Vector};

/// Playfield width in cells (50 columns)
pub const WINDOW_WIDTH: usize = 50;

/// Playfield height in cells (11 rows)
pub const WINDOW_HEIGHT: usize = 11;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Minimum time between two shots in milliseconds
pub const FIRE_DELAY_MS: u32 = 300;

/// Bullet speed in cells per second (0.1 cell per frame at 60 FPS)
pub const BULLET_SPEED: f64 = 6.0;

/// Interval between asteroid spawns in milliseconds
pub const ASTEROID_SPAWN_MS: u32 = 1500;

/// Lives the shuttle starts with
pub const STARTING_LIVES: u8 = 3;

/// FPS sampling window for the debug readout in milliseconds
pub const DEBUG_INTERVAL_MS: u32 = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(FIRE_DELAY_MS, 300);
        assert_eq!(ASTEROID_SPAWN_MS, 1500);
        assert_eq!(DEBUG_INTERVAL_MS, 500);
        assert!((BULLET_SPEED - 0.1 * 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn action_names_round_trip_through_parser() {
        for action in GameAction::ALL {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(GameAction::from_str("FIRE"), Some(GameAction::Fire));
        assert_eq!(GameAction::from_str("jump"), None);
    }
}

/// Game actions that can be applied to modify game state
///
/// These actions are used by both keyboard input and remote clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move the shuttle one row up
    MoveUp,
    /// Move the shuttle one row down
    MoveDown,
    /// Fire a bullet (subject to the fire cooldown)
    Fire,
    /// Toggle pause state
    Pause,
    /// Restart the game from its seed
    Restart,
    /// Toggle the debug readout (front-end only)
    ToggleDebug,
}

impl GameAction {
    pub const ALL: [GameAction; 6] = [
        GameAction::MoveUp,
        GameAction::MoveDown,
        GameAction::Fire,
        GameAction::Pause,
        GameAction::Restart,
        GameAction::ToggleDebug,
    ];

    /// Parse action from string (case-insensitive, for the remote protocol)
    ///
    /// # Examples
    ///
    /// ```
    /// use ascii_arcade_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveDown"), Some(GameAction::MoveDown));
    /// assert_eq!(GameAction::from_str("fire"), Some(GameAction::Fire));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "fire" => Some(GameAction::Fire),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "toggledebug" => Some(GameAction::ToggleDebug),
            _ => None,
        }
    }

    /// Convert to camelCase string for the remote protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::Fire => "fire",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::ToggleDebug => "toggleDebug",
        }
    }
}

/// Keyboard layouts the player can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlScheme {
    /// W/S and arrow keys, Space fires
    #[default]
    Classic,
    /// K/J and arrow keys, Space or F fires
    Vim,
}

impl ControlScheme {
    /// Parse a scheme name (case-insensitive). Accepts the numeric indices
    /// `0` and `1` as well.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "0" => Some(ControlScheme::Classic),
            "vim" | "1" => Some(ControlScheme::Vim),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Classic => "classic",
            ControlScheme::Vim => "vim",
        }
    }
}
