use std::path::PathBuf;

use super::*;
use crate::config::ImportSettings;
use crate::import::ImportPanel;
use crate::library::{Track, TrackId};

fn t(title: &str) -> Track {
    Track {
        id: TrackId::generate(),
        path: PathBuf::from(format!("/tmp/{title}.mp3")),
        thumbnail: "https://example.test/fallback.jpg".to_string(),
        title: title.into(),
    }
}

fn app_with(n: usize) -> App {
    let mut app = App::new(ImportPanel::new(ImportSettings::default()));
    for i in 0..n {
        app.store.append(t(&format!("track-{i}")));
    }
    app
}

#[test]
fn new_app_starts_on_an_empty_browse_grid() {
    let app = app_with(0);
    assert_eq!(app.screen, Screen::Browse);
    assert_eq!(app.view_mode, ViewMode::Grid);
    assert!(!app.has_tracks());
    assert!(app.selected_track().is_none());
}

#[test]
fn toggle_view_mode_flips_between_grid_and_list() {
    let mut app = app_with(0);
    app.toggle_view_mode();
    assert_eq!(app.view_mode, ViewMode::List);
    app.toggle_view_mode();
    assert_eq!(app.view_mode, ViewMode::Grid);
}

#[test]
fn horizontal_selection_clamps_at_both_ends() {
    let mut app = app_with(3);

    app.select_left();
    assert_eq!(app.selected, 0);

    app.select_right();
    app.select_right();
    assert_eq!(app.selected, 2);
    app.select_right();
    assert_eq!(app.selected, 2);
}

#[test]
fn vertical_selection_moves_by_a_full_row() {
    // 7 tracks in a 3-wide grid:
    //   0 1 2
    //   3 4 5
    //   6
    let mut app = app_with(7);

    app.select_down(3);
    assert_eq!(app.selected, 3);
    app.select_down(3);
    assert_eq!(app.selected, 6);
    // No row below the last.
    app.select_down(3);
    assert_eq!(app.selected, 6);

    app.select_up(3);
    assert_eq!(app.selected, 3);
    app.select_up(3);
    assert_eq!(app.selected, 0);
    app.select_up(3);
    assert_eq!(app.selected, 0);
}

#[test]
fn selected_track_follows_the_cursor() {
    let mut app = app_with(2);
    assert_eq!(app.selected_track().unwrap().title, "track-0");
    app.select_right();
    assert_eq!(app.selected_track().unwrap().title, "track-1");
}

#[test]
fn view_mode_converts_from_its_setting() {
    assert_eq!(
        ViewMode::from(crate::config::ViewModeSetting::Grid),
        ViewMode::Grid
    );
    assert_eq!(
        ViewMode::from(crate::config::ViewModeSetting::List),
        ViewMode::List
    );
}
