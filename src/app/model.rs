//! Application model types: `App`, `Screen` and `ViewMode`.

use crate::config::ViewModeSetting;
use crate::import::ImportPanel;
use crate::library::{Track, TrackStore};
use crate::player::PlaybackHandle;

/// Which of the two screens is on display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    Browse,
    Import,
}

/// Browse screen layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

impl From<ViewModeSetting> for ViewMode {
    fn from(s: ViewModeSetting) -> Self {
        match s {
            ViewModeSetting::Grid => ViewMode::Grid,
            ViewModeSetting::List => ViewMode::List,
        }
    }
}

/// The main application model.
pub struct App {
    pub store: TrackStore,
    pub screen: Screen,
    pub view_mode: ViewMode,
    /// Browse selection, an index into the store.
    pub selected: usize,
    pub playback_handle: Option<PlaybackHandle>,
    pub import: ImportPanel,
    pub music_dir: Option<String>,
}

impl App {
    /// Create a new `App` around an empty store.
    pub fn new(import: ImportPanel) -> Self {
        Self {
            store: TrackStore::new(),
            screen: Screen::Browse,
            view_mode: ViewMode::Grid,
            selected: 0,
            playback_handle: None,
            import,
            music_dir: None,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Record the music directory in the app state.
    pub fn set_music_dir(&mut self, dir: String) {
        self.music_dir = Some(dir);
    }

    pub fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    /// Flip between the grid and list renderings of the collection.
    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        };
    }

    pub fn has_tracks(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.store.get(self.selected)
    }

    /// Move the browse selection one card left.
    pub fn select_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the browse selection one card right.
    pub fn select_right(&mut self) {
        if self.selected + 1 < self.store.len() {
            self.selected += 1;
        }
    }

    /// Move the selection one row up in a grid of `columns` per row.
    /// List mode passes `columns == 1`.
    pub fn select_up(&mut self, columns: usize) {
        let step = columns.max(1);
        if self.selected >= step {
            self.selected -= step;
        }
    }

    /// Move the selection one row down in a grid of `columns` per row.
    pub fn select_down(&mut self, columns: usize) {
        let step = columns.max(1);
        if self.selected + step < self.store.len() {
            self.selected += step;
        }
    }
}
