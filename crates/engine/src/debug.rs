//! Debug readout state: frame rate sampling, last key, elapsed time.

use crate::types::DEBUG_INTERVAL_MS;

/// Counts frames per fixed interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStats {
    interval_ms: u32,
    fps_last_interval: u32,
    frames_this_interval: u32,
    last_interval_ms: u64,
}

impl FrameStats {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            fps_last_interval: 0,
            frames_this_interval: 0,
            last_interval_ms: 0,
        }
    }

    /// Count one frame rendered at `now_ms`.
    ///
    /// Once more than one interval has passed since the last sample, the
    /// frame rate is recomputed as `floor(1000 * frames / interval)` and the
    /// counter restarts.
    pub fn record_frame(&mut self, now_ms: u64) {
        self.frames_this_interval += 1;
        if now_ms.saturating_sub(self.last_interval_ms) > self.interval_ms as u64 {
            self.fps_last_interval =
                (1000 * self.frames_this_interval as u64 / self.interval_ms as u64) as u32;
            self.last_interval_ms = now_ms;
            self.frames_this_interval = 0;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps_last_interval
    }

    pub fn frames_this_interval(&self) -> u32 {
        self.frames_this_interval
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(DEBUG_INTERVAL_MS)
    }
}

/// Everything the debug readout shows.
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub frames: FrameStats,
    pub last_press: Option<String>,
    pub elapsed_ms: u64,
}

impl DebugInfo {
    pub fn record_frame(&mut self, now_ms: u64) {
        self.elapsed_ms = now_ms;
        self.frames.record_frame(now_ms);
    }

    pub fn record_press(&mut self, label: impl Into<String>) {
        self.last_press = Some(label.into());
    }

    /// One-line summary, e.g. `FPS 60 | frames 12 | key 'w' | 3.250s`.
    pub fn summary(&self) -> String {
        format!(
            "FPS {} | frames {} | key {} | {:.3}s",
            self.frames.fps(),
            self.frames.frames_this_interval(),
            self.last_press.as_deref().unwrap_or("-"),
            self.elapsed_ms as f64 / 1000.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_sampled_per_interval() {
        let mut stats = FrameStats::new(500);
        // 30 frames across the first interval, ~16ms apart.
        for i in 1..=30u64 {
            stats.record_frame(i * 16);
        }
        assert_eq!(stats.fps(), 0);
        assert_eq!(stats.frames_this_interval(), 30);

        // The 32nd frame lands at 512ms, past the 500ms window.
        stats.record_frame(31 * 16);
        stats.record_frame(32 * 16);
        assert_eq!(stats.fps(), 1000 * 32 / 500);
        assert_eq!(stats.frames_this_interval(), 0);
    }

    #[test]
    fn summary_formats_all_fields() {
        let mut info = DebugInfo::default();
        info.record_press("'w'");
        info.record_frame(3250);
        assert_eq!(info.summary(), "FPS 2 | frames 0 | key 'w' | 3.250s");
    }
}
