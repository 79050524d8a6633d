//! Background workers for the import flow.
//!
//! Cover-art extraction and the simulated upload both run off the UI
//! thread and report back through the panel's event channel.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::library::read_embedded_art;

use super::panel::ImportEvent;

/// Read embedded cover art and report the outcome.
pub(super) fn spawn_extract(path: PathBuf, generation: u64, tx: Sender<ImportEvent>) {
    thread::spawn(move || {
        let art = read_embedded_art(&path);
        let _ = tx.send(ImportEvent::Extracted { generation, art });
    });
}

/// Simulated upload latency: fire `SubmitComplete` after `delay`.
pub(super) fn spawn_submit_timer(delay: Duration, generation: u64, tx: Sender<ImportEvent>) {
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = tx.send(ImportEvent::SubmitComplete { generation });
    });
}
