use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::tempdir;

use crate::config::ImportSettings;
use crate::library::CoverArt;

use super::*;

fn quick_settings() -> ImportSettings {
    ImportSettings {
        submit_delay_ms: 0,
        fallback_thumbnail: "https://example.test/fallback.jpg".to_string(),
        ..ImportSettings::default()
    }
}

/// Pump `poll` until the panel leaves `stage` or the deadline passes.
fn pump_until_stage_leaves(panel: &mut ImportPanel, stage: ImportStage) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while panel.stage == stage && Instant::now() < deadline {
        let _ = panel.poll();
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn default_title_takes_the_name_up_to_the_first_dot() {
    assert_eq!(default_title(Path::new("/tmp/song.mp3")), "song");
    assert_eq!(default_title(Path::new("/tmp/song.final.mp3")), "song");
    assert_eq!(default_title(Path::new("relative.ogg")), "relative");
    // Dotfiles have an empty first segment; fall back to the full name.
    assert_eq!(default_title(Path::new("/tmp/.hidden")), ".hidden");
}

#[test]
fn selecting_a_non_audio_file_alerts_and_clears_the_selection() {
    let mut panel = ImportPanel::new(quick_settings());

    panel.select_file(PathBuf::from("/tmp/readme.txt"));

    assert_eq!(panel.stage, ImportStage::Browsing);
    assert!(panel.selected_file.is_none());
    assert!(panel.thumbnail.is_none());
    assert!(panel.title.is_empty());
    assert_eq!(
        panel.alert.as_deref(),
        Some("Please choose a valid audio file.")
    );
}

#[test]
fn selecting_an_audio_file_sets_defaults_and_starts_extraction() {
    let mut panel = ImportPanel::new(quick_settings());

    panel.select_file(PathBuf::from("/tmp/My Song.live.mp3"));

    assert_eq!(panel.stage, ImportStage::Extracting);
    assert_eq!(panel.selected_file_name(), Some("My Song.live.mp3"));
    assert_eq!(panel.title, "My Song");
    assert!(panel.alert.is_none());
}

#[test]
fn extraction_without_art_falls_back_to_the_stock_thumbnail() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("tagless.mp3");
    std::fs::write(&file, b"not a real mp3").unwrap();

    let mut panel = ImportPanel::new(quick_settings());
    panel.select_file(file);

    pump_until_stage_leaves(&mut panel, ImportStage::Extracting);

    assert_eq!(panel.stage, ImportStage::Ready);
    assert_eq!(
        panel.thumbnail.as_deref(),
        Some("https://example.test/fallback.jpg")
    );
}

#[test]
fn extraction_with_art_produces_a_data_uri_thumbnail() {
    let mut panel = ImportPanel::new(quick_settings());
    panel.stage = ImportStage::Extracting;
    panel.selected_file = Some(PathBuf::from("/tmp/tagged.mp3"));
    panel.title = "tagged".to_string();

    let tx = panel.events_sender();
    tx.send(ImportEvent::Extracted {
        generation: panel.generation(),
        art: Some(CoverArt {
            mime: "image/png".to_string(),
            data: b"abc".to_vec(),
        }),
    })
    .unwrap();

    assert!(panel.poll().is_none());
    assert_eq!(panel.stage, ImportStage::Ready);
    assert_eq!(
        panel.thumbnail.as_deref(),
        Some("data:image/png;base64,YWJj")
    );
}

#[test]
fn stale_worker_events_are_dropped() {
    let mut panel = ImportPanel::new(quick_settings());
    panel.select_file(PathBuf::from("/tmp/first.mp3"));
    let old_generation = panel.generation();

    // Abandoning the selection supersedes the in-flight extraction.
    panel.cancel();
    assert_eq!(panel.stage, ImportStage::Browsing);

    let tx = panel.events_sender();
    tx.send(ImportEvent::Extracted {
        generation: old_generation,
        art: None,
    })
    .unwrap();

    assert!(panel.poll().is_none());
    assert_eq!(panel.stage, ImportStage::Browsing);
    assert!(panel.thumbnail.is_none());
}

#[test]
fn confirm_is_only_honored_when_ready() {
    let mut panel = ImportPanel::new(quick_settings());

    panel.confirm();
    assert_eq!(panel.stage, ImportStage::Browsing);

    panel.select_file(PathBuf::from("/tmp/song.mp3"));
    panel.confirm();
    assert_eq!(panel.stage, ImportStage::Extracting);
}

#[test]
fn panel_input_is_ignored_while_submitting() {
    let mut panel = ImportPanel::new(ImportSettings {
        // Long enough that the submit cannot land mid-test.
        submit_delay_ms: 60_000,
        ..quick_settings()
    });
    panel.stage = ImportStage::Extracting;
    panel.selected_file = Some(PathBuf::from("/tmp/one.mp3"));
    panel.title = "one".to_string();

    let tx = panel.events_sender();
    tx.send(ImportEvent::Extracted {
        generation: panel.generation(),
        art: None,
    })
    .unwrap();
    assert!(panel.poll().is_none());
    assert_eq!(panel.stage, ImportStage::Ready);

    panel.confirm();
    assert_eq!(panel.stage, ImportStage::Submitting);

    panel.select_file(PathBuf::from("/tmp/two.mp3"));
    panel.cancel();
    assert_eq!(panel.stage, ImportStage::Submitting);
    assert_eq!(panel.selected_file_name(), Some("one.mp3"));
}

#[test]
fn full_walk_produces_a_track_with_the_edited_title() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("demo.mp3");
    std::fs::write(&file, b"not a real mp3").unwrap();

    let mut panel = ImportPanel::new(quick_settings());
    panel.select_file(file.clone());
    pump_until_stage_leaves(&mut panel, ImportStage::Extracting);
    assert_eq!(panel.stage, ImportStage::Ready);

    panel.begin_title_edit();
    for _ in 0..panel.title.len() {
        panel.pop_title_char();
    }
    for c in "Test Song".chars() {
        panel.push_title_char(c);
    }
    panel.end_title_edit();
    panel.confirm();
    assert_eq!(panel.stage, ImportStage::Submitting);

    let deadline = Instant::now() + Duration::from_secs(2);
    let mut outcome = None;
    while outcome.is_none() && Instant::now() < deadline {
        outcome = panel.poll();
        std::thread::sleep(Duration::from_millis(5));
    }

    let Some(ImportOutcome::Submitted(track)) = outcome else {
        panic!("submit never completed");
    };
    assert_eq!(track.title, "Test Song");
    assert_eq!(track.path, file);
    assert_eq!(track.thumbnail, "https://example.test/fallback.jpg");
    assert_eq!(panel.stage, ImportStage::Browsing);
    assert!(panel.selected_file.is_none());
}

#[test]
fn picker_cursor_stays_in_range() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.mp3"), b"x").unwrap();
    std::fs::write(dir.path().join("b.mp3"), b"x").unwrap();

    let mut panel = ImportPanel::new(quick_settings());
    panel.refresh_files(dir.path());
    assert_eq!(panel.files.len(), 2);

    panel.picker_prev();
    assert_eq!(panel.picker_selected, 0);
    panel.picker_next();
    assert_eq!(panel.picker_selected, 1);
    panel.picker_next();
    assert_eq!(panel.picker_selected, 1);

    // Re-listing an emptied directory pulls the cursor back.
    let empty = tempdir().unwrap();
    panel.refresh_files(empty.path());
    assert_eq!(panel.picker_selected, 0);
}
