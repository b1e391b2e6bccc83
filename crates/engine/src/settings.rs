//! Player settings read from the environment.

use crate::types::ControlScheme;

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Show the debug readout (fps, last key, elapsed time).
    pub debug_mode: bool,
    pub control_scheme: ControlScheme,
    /// Seed for asteroid spawns.
    pub seed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            control_scheme: ControlScheme::Classic,
            seed: 1,
        }
    }
}

impl Settings {
    /// Read `ARCADE_DEBUG`, `ARCADE_CONTROLS` and `ARCADE_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or unparseable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let debug_mode = lookup("ARCADE_DEBUG")
            .map(|v| is_truthy(&v))
            .unwrap_or(defaults.debug_mode);

        let control_scheme = lookup("ARCADE_CONTROLS")
            .and_then(|v| ControlScheme::from_str(&v))
            .unwrap_or(defaults.control_scheme);

        let seed = lookup("ARCADE_SEED")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            debug_mode,
            control_scheme,
            seed,
        }
    }

    pub fn toggle_debug(&mut self) {
        self.debug_mode = !self.debug_mode;
    }
}

/// `1`, `true`, `yes` and `on` (any case) count as enabled.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
