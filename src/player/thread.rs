use std::path::Path;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lofty::prelude::AudioFile;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::library::Track;

use super::sink::create_sink_at;
use super::types::{PlaybackHandle, PlayerCmd, seek_target};

/// Duration fallback when the decoder cannot report one (common for mp3).
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}

pub(super) fn spawn_player_thread(
    rx: Receiver<PlayerCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut current: Option<Track> = None;
        let mut sink: Option<Sink> = None;
        let mut paused = true;
        let mut duration: Option<Duration> = None;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        fn do_select(
            track: Track,
            stream: &OutputStream,
            sink: &mut Option<Sink>,
            current: &mut Option<Track>,
            paused: &mut bool,
            duration: &mut Option<Duration>,
            started_at: &mut Option<Instant>,
            accumulated: &mut Duration,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }
            *accumulated = Duration::ZERO;

            match create_sink_at(stream, &track.path, Duration::ZERO) {
                Ok((new_sink, decoded)) => {
                    *duration = decoded.or_else(|| probe_duration(&track.path));
                    new_sink.play();
                    *sink = Some(new_sink);
                    *paused = false;
                    *started_at = Some(Instant::now());
                }
                Err(e) => {
                    // Undecodable input: the bar stays up, nothing plays.
                    log::warn!("cannot play {}: {e}", track.path.display());
                    *duration = None;
                    *sink = None;
                    *paused = true;
                    *started_at = None;
                }
            }

            if let Ok(mut info) = playback_info.lock() {
                info.track = Some(track.clone());
                info.elapsed = Duration::ZERO;
                info.duration = *duration;
                info.playing = !*paused;
            }
            *current = Some(track);
        }

        fn do_dismiss(
            sink: &mut Option<Sink>,
            current: &mut Option<Track>,
            paused: &mut bool,
            duration: &mut Option<Duration>,
            started_at: &mut Option<Instant>,
            accumulated: &mut Duration,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }
            *sink = None;
            *current = None;
            *paused = true;
            *duration = None;
            *started_at = None;
            *accumulated = Duration::ZERO;
            if let Ok(mut info) = playback_info.lock() {
                info.track = None;
                info.elapsed = Duration::ZERO;
                info.duration = None;
                info.playing = false;
            }
        }

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            sink.set_volume(1.0);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(1.0 - t);
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    PlayerCmd::Select(track) => {
                        do_select(
                            track,
                            &stream,
                            &mut sink,
                            &mut current,
                            &mut paused,
                            &mut duration,
                            &mut started_at,
                            &mut accumulated,
                            &playback_info,
                        );
                    }

                    PlayerCmd::TogglePause => {
                        let finished = sink.as_ref().map(|s| s.empty()).unwrap_or(false);
                        if finished && paused {
                            // The track ran to its end; toggling replays it
                            // from the top.
                            if let Some(track) = current.clone() {
                                do_select(
                                    track,
                                    &stream,
                                    &mut sink,
                                    &mut current,
                                    &mut paused,
                                    &mut duration,
                                    &mut started_at,
                                    &mut accumulated,
                                    &playback_info,
                                );
                            }
                        } else if let Some(ref s) = sink {
                            if paused {
                                s.play();
                            } else {
                                s.pause();
                            }
                            if paused {
                                // unpausing
                                started_at = Some(Instant::now());
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = true;
                                }
                            } else {
                                // pausing
                                if let Some(st) = started_at {
                                    accumulated += Instant::now() - st;
                                }
                                started_at = None;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                            }
                            paused = !paused;
                        }
                    }

                    PlayerCmd::SeekPercent(percent) => {
                        // Scrubbing: rebuild the current sink and skip into the file.
                        // This uses `Source::skip_duration` (works for common formats).
                        let Some(track) = current.clone() else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }
                        // Unknown duration: the scrub target is undefined, ignore.
                        let Some(total) = duration else {
                            continue;
                        };

                        let target = seek_target(total, percent);

                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        match create_sink_at(&stream, &track.path, target) {
                            Ok((new_sink, _)) => {
                                if paused {
                                    new_sink.pause();
                                    started_at = None;
                                } else {
                                    new_sink.play();
                                    started_at = Some(Instant::now());
                                }
                                sink = Some(new_sink);
                                accumulated = target;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.elapsed = target;
                                }
                            }
                            Err(e) => {
                                log::warn!(
                                    "seek failed for {}: {e}",
                                    track.path.display()
                                );
                                sink = None;
                                paused = true;
                                started_at = None;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                            }
                        }
                    }

                    PlayerCmd::Dismiss => {
                        do_dismiss(
                            &mut sink,
                            &mut current,
                            &mut paused,
                            &mut duration,
                            &mut started_at,
                            &mut accumulated,
                            &playback_info,
                        );
                    }

                    PlayerCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            // Fade out gently before stopping.
                            fade_out_sink(s, fade_out_ms);
                            s.stop();
                        }
                        // Update shared state so the UI/MPRIS don't keep showing Playing.
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: refresh the observed position and catch
                    // the natural end of the track.
                    if let Some(ref s) = sink {
                        if !paused && s.empty() {
                            // End of track: stay on it, no auto-advance.
                            paused = true;
                            started_at = None;
                            if let Some(d) = duration {
                                accumulated = d;
                            }
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = false;
                                if let Some(d) = duration {
                                    info.elapsed = d;
                                }
                            }
                        } else if !paused {
                            let mut elapsed = accumulated
                                + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                            if let Some(d) = duration {
                                elapsed = elapsed.min(d);
                            }
                            if let Ok(mut info) = playback_info.lock() {
                                info.elapsed = elapsed;
                            }
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
