//! The import panel state machine.
//!
//! One import is in flight at a time. Worker completions arrive on an
//! `mpsc` channel and are paired with the selection that spawned them
//! through a generation counter, so a superseded selection's results are
//! dropped instead of clobbering the current one.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::config::ImportSettings;
use crate::library::{CoverArt, Track, TrackId, data_uri};

use super::picker;
use super::worker;

/// Where the panel currently is in the flow.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImportStage {
    /// Picker visible, nothing selected yet.
    Browsing,
    /// Cover-art extraction running for the selected file.
    Extracting,
    /// Extraction finished; the title can be edited and confirm is allowed.
    Ready,
    /// Simulated upload in flight. Panel input is ignored until it lands.
    Submitting,
}

/// Completions delivered by the worker threads.
#[derive(Debug)]
pub enum ImportEvent {
    Extracted {
        generation: u64,
        art: Option<CoverArt>,
    },
    SubmitComplete {
        generation: u64,
    },
}

/// What `poll` hands back to the runtime.
#[derive(Debug)]
pub enum ImportOutcome {
    /// The simulated upload finished; append this and show the browse screen.
    Submitted(Track),
}

pub struct ImportPanel {
    pub stage: ImportStage,

    /// Candidate files listed from the music directory.
    pub files: Vec<PathBuf>,
    pub picker_selected: usize,

    pub selected_file: Option<PathBuf>,
    pub title: String,
    /// Data URI of the extracted art, or the fallback URL. Set on Ready.
    pub thumbnail: Option<String>,
    pub editing: bool,
    pub alert: Option<String>,

    settings: ImportSettings,
    generation: u64,
    events_tx: Sender<ImportEvent>,
    events_rx: Receiver<ImportEvent>,
}

/// Default title for a picked file: everything before the first `.` of the
/// file name, with the full name as a fallback for dotfiles.
pub fn default_title(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");
    let stem = name.split('.').next().unwrap_or("");
    if stem.is_empty() {
        name.to_string()
    } else {
        stem.to_string()
    }
}

impl ImportPanel {
    pub fn new(settings: ImportSettings) -> Self {
        let (events_tx, events_rx) = mpsc::channel::<ImportEvent>();
        Self {
            stage: ImportStage::Browsing,
            files: Vec::new(),
            picker_selected: 0,
            selected_file: None,
            title: String::new(),
            thumbnail: None,
            editing: false,
            alert: None,
            settings,
            generation: 0,
            events_tx,
            events_rx,
        }
    }

    /// Re-list the music directory. Keeps the picker cursor in range.
    pub fn refresh_files(&mut self, dir: &Path) {
        self.files = picker::list_audio_files(dir, &self.settings);
        if self.picker_selected >= self.files.len() {
            self.picker_selected = self.files.len().saturating_sub(1);
        }
    }

    pub fn picker_next(&mut self) {
        if !self.files.is_empty() && self.picker_selected + 1 < self.files.len() {
            self.picker_selected += 1;
        }
    }

    pub fn picker_prev(&mut self) {
        self.picker_selected = self.picker_selected.saturating_sub(1);
    }

    /// Select the file under the picker cursor.
    pub fn select_highlighted(&mut self) {
        if let Some(path) = self.files.get(self.picker_selected).cloned() {
            self.select_file(path);
        }
    }

    /// Validate and select `path`, kicking off cover-art extraction.
    ///
    /// Non-audio files raise an alert and clear the pending selection; a
    /// selection made while one is already Extracting supersedes it.
    pub fn select_file(&mut self, path: PathBuf) {
        if self.stage == ImportStage::Submitting {
            return;
        }
        self.alert = None;

        if !picker::is_audio_mime(&path) {
            self.alert = Some("Please choose a valid audio file.".to_string());
            self.clear_selection();
            return;
        }

        self.generation += 1;
        self.title = default_title(&path);
        self.thumbnail = None;
        self.editing = false;
        self.selected_file = Some(path.clone());
        self.stage = ImportStage::Extracting;

        worker::spawn_extract(path, self.generation, self.events_tx.clone());
    }

    pub fn begin_title_edit(&mut self) {
        if self.stage == ImportStage::Ready {
            self.editing = true;
        }
    }

    pub fn end_title_edit(&mut self) {
        self.editing = false;
    }

    pub fn push_title_char(&mut self, c: char) {
        if self.editing && !c.is_control() {
            self.title.push(c);
        }
    }

    pub fn pop_title_char(&mut self) {
        if self.editing {
            self.title.pop();
        }
    }

    /// Confirm the import: start the simulated upload.
    pub fn confirm(&mut self) {
        if self.stage != ImportStage::Ready {
            return;
        }
        self.editing = false;
        self.stage = ImportStage::Submitting;
        worker::spawn_submit_timer(
            Duration::from_millis(self.settings.submit_delay_ms),
            self.generation,
            self.events_tx.clone(),
        );
    }

    /// Abandon the current selection and go back to the picker. Ignored
    /// while Submitting.
    pub fn cancel(&mut self) {
        if self.stage == ImportStage::Submitting {
            return;
        }
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        // Bump the generation so in-flight worker results are dropped.
        self.generation += 1;
        self.selected_file = None;
        self.title.clear();
        self.thumbnail = None;
        self.editing = false;
        self.stage = ImportStage::Browsing;
    }

    /// Drain worker events. Returns the finished track when the simulated
    /// upload lands.
    pub fn poll(&mut self) -> Option<ImportOutcome> {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                ImportEvent::Extracted { generation, art } => {
                    if generation != self.generation || self.stage != ImportStage::Extracting {
                        log::debug!("dropping stale extraction result");
                        continue;
                    }
                    // Art found becomes a data URI; no art or a failed read
                    // falls back to the stock image. Extraction never fails
                    // the flow.
                    self.thumbnail = Some(match art {
                        Some(a) => data_uri(&a.mime, &a.data),
                        None => self.settings.fallback_thumbnail.clone(),
                    });
                    self.stage = ImportStage::Ready;
                }
                ImportEvent::SubmitComplete { generation } => {
                    if generation != self.generation || self.stage != ImportStage::Submitting {
                        log::debug!("dropping stale submit completion");
                        continue;
                    }
                    let Some(path) = self.selected_file.take() else {
                        self.clear_selection();
                        continue;
                    };
                    let track = Track {
                        id: TrackId::generate(),
                        path,
                        thumbnail: self
                            .thumbnail
                            .take()
                            .unwrap_or_else(|| self.settings.fallback_thumbnail.clone()),
                        title: std::mem::take(&mut self.title),
                    };
                    self.clear_selection();
                    return Some(ImportOutcome::Submitted(track));
                }
            }
        }
        None
    }

    /// File name of the pending selection, for display.
    pub fn selected_file_name(&self) -> Option<&str> {
        self.selected_file
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn events_sender(&self) -> Sender<ImportEvent> {
        self.events_tx.clone()
    }
}
