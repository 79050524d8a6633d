//! Playback-related small types and handles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::Track;

#[derive(Debug)]
pub enum PlayerCmd {
    /// Point the sink at the given track, reset position and start playing.
    Select(Track),
    /// Toggle pause/resume. After a track ran to its end, replays it.
    TogglePause,
    /// Seek to an absolute position given as a percentage of the duration.
    SeekPercent(f64),
    /// Stop playback and clear the current track; the player bar goes away.
    Dismiss,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// The track currently loaded into the sink (if any).
    pub track: Option<Track>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Total duration, when the decoder or tags expose one.
    pub duration: Option<Duration>,
    /// Whether playback is currently active.
    pub playing: bool,
}

impl PlaybackInfo {
    /// Displayed progress in percent. Unknown or zero duration reads as 0.
    pub fn progress_percent(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => {
                (self.elapsed.as_secs_f64() / d.as_secs_f64() * 100.0).clamp(0.0, 100.0)
            }
            _ => 0.0,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Absolute seek target for a percentage scrub. The percentage is clamped
/// to `[0, 100]` before scaling.
pub fn seek_target(duration: Duration, percent: f64) -> Duration {
    let clamped = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    Duration::from_secs_f64(duration.as_secs_f64() * clamped / 100.0)
}
