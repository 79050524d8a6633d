use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Screen, ViewMode};
use crate::config;
use crate::import::{ImportOutcome, ImportStage};
use crate::library::TrackId;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlaybackInfo, Player, PlayerCmd};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct LoopState {
    /// Last-known current track as emitted to MPRIS.
    last_mpris_track: Option<TrackId>,
    /// Last-known playing flag as emitted to MPRIS.
    last_mpris_playing: bool,
}

impl LoopState {
    pub fn new() -> Self {
        Self {
            last_mpris_track: None,
            last_mpris_playing: false,
        }
    }
}

fn playback_snapshot(app: &App) -> PlaybackInfo {
    app.playback_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|i| i.clone()))
        .unwrap_or_default()
}

/// Main terminal event loop: handles input, UI drawing, sync with the
/// audio thread, the import workers and MPRIS. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    mpris: &MprisHandle,
    control_rx: &Receiver<ControlCmd>,
    state: &mut LoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // A finished import appends to the store and lands on the browse screen.
        if let Some(ImportOutcome::Submitted(track)) = app.import.poll() {
            app.selected = app.store.len();
            app.store.append(track);
            app.show_screen(Screen::Browse);
        }

        // Keep MPRIS in sync even when playback changes come from media keys
        // or from the track running out.
        let info = playback_snapshot(app);
        let current_id = info.track.as_ref().map(|t| t.id.clone());
        if current_id != state.last_mpris_track || info.playing != state.last_mpris_playing {
            update_mpris(mpris, app);
            state.last_mpris_track = current_id;
            state.last_mpris_playing = info.playing;
        }

        terminal.draw(|f| ui::draw(f, app, settings))?;

        while let Ok(cmd) = control_rx.try_recv() {
            match cmd {
                ControlCmd::Quit => return Ok(()),
                ControlCmd::Play => {
                    if info.track.is_some() && !info.playing {
                        let _ = player.send(PlayerCmd::TogglePause);
                    }
                }
                ControlCmd::Pause => {
                    if info.playing {
                        let _ = player.send(PlayerCmd::TogglePause);
                    }
                }
                ControlCmd::PlayPause => {
                    if info.track.is_some() {
                        let _ = player.send(PlayerCmd::TogglePause);
                    }
                }
                ControlCmd::Stop => {
                    let _ = player.send(PlayerCmd::Dismiss);
                }
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let width = terminal.size()?.width;
                if handle_key(key, settings, app, player, width) {
                    return Ok(());
                }
            }
        }
    }
}

/// Dispatch one key press. Returns true when the app should quit.
fn handle_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    width: u16,
) -> bool {
    // Title editing captures every printable key first.
    if app.screen == Screen::Import && app.import.editing {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.import.end_title_edit(),
            KeyCode::Backspace => app.import.pop_title_char(),
            KeyCode::Char(c) => app.import.push_title_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => {
            match app.screen {
                Screen::Browse => {
                    // Re-list on entry so freshly added files show up.
                    if let Some(dir) = app.music_dir.clone() {
                        app.import.refresh_files(Path::new(&dir));
                    }
                    app.show_screen(Screen::Import);
                }
                Screen::Import => app.show_screen(Screen::Browse),
            }
            return false;
        }
        _ => {}
    }

    match app.screen {
        Screen::Browse => handle_browse_key(key, settings, app, player, width),
        Screen::Import => handle_import_key(key, app),
    }
    false
}

fn handle_browse_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    width: u16,
) {
    let columns = match app.view_mode {
        ViewMode::Grid => ui::grid_columns(width),
        ViewMode::List => 1,
    };

    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.select_left(),
        KeyCode::Char('l') | KeyCode::Right => app.select_right(),
        KeyCode::Char('k') | KeyCode::Up => app.select_up(columns),
        KeyCode::Char('j') | KeyCode::Down => app.select_down(columns),
        KeyCode::Char('v') => app.toggle_view_mode(),
        KeyCode::Enter => {
            if let Some(track) = app.selected_track().cloned() {
                let _ = player.send(PlayerCmd::Select(track));
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            let _ = player.send(PlayerCmd::TogglePause);
        }
        KeyCode::Char('x') => {
            let _ = player.send(PlayerCmd::Dismiss);
        }
        KeyCode::Char('H') => scrub(app, player, -settings.controls.scrub_percent),
        KeyCode::Char('L') => scrub(app, player, settings.controls.scrub_percent),
        _ => {}
    }
}

/// Nudge the playback position by `delta` percent of the duration.
fn scrub(app: &App, player: &Player, delta: f64) {
    let info = playback_snapshot(app);
    if info.track.is_none() {
        return;
    }
    let target = (info.progress_percent() + delta).clamp(0.0, 100.0);
    let _ = player.send(PlayerCmd::SeekPercent(target));
}

fn handle_import_key(key: KeyEvent, app: &mut App) {
    match app.import.stage {
        ImportStage::Browsing => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.import.picker_next(),
            KeyCode::Char('k') | KeyCode::Up => app.import.picker_prev(),
            KeyCode::Char('r') => {
                if let Some(dir) = app.music_dir.clone() {
                    app.import.refresh_files(Path::new(&dir));
                }
            }
            KeyCode::Enter => app.import.select_highlighted(),
            KeyCode::Esc => app.show_screen(Screen::Browse),
            _ => {}
        },
        ImportStage::Extracting => {
            if key.code == KeyCode::Esc {
                app.import.cancel();
            }
        }
        ImportStage::Ready => match key.code {
            KeyCode::Char('e') => app.import.begin_title_edit(),
            KeyCode::Enter => app.import.confirm(),
            KeyCode::Esc => app.import.cancel(),
            _ => {}
        },
        // The simulated upload is serialized: panel input waits for it.
        ImportStage::Submitting => {}
    }
}
