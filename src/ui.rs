//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`:
//! the shared header shell, the browse grid/list, the import panel and
//! the bottom player bar.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, Screen, ViewMode};
use crate::config::Settings;
use crate::import::ImportStage;
use crate::player::PlaybackInfo;

/// Card geometry for the browse grid.
const CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 5;

/// How many cards fit side by side at the given terminal width.
pub fn grid_columns(width: u16) -> usize {
    ((width / CARD_WIDTH) as usize).max(1)
}

/// Format seconds as `M:SS`. Missing, non-finite or negative input reads
/// as `0:00`, like an audio element with no loaded metadata.
pub fn format_time(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total = s as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "0:00".to_string(),
    }
}

fn browse_controls_text(scrub_percent: f64) -> String {
    format!(
        "[hjkl/arrows] move | [enter] play | [space/p] play-pause | [H/L] scrub -/+{}% | [x] close player | [v] grid/list | [tab] import | [q] quit",
        scrub_percent
    )
}

fn import_controls_text() -> String {
    "[j/k] move | [enter] pick | [e] edit title | [esc] cancel | [r] re-list | [tab] browse | [q] quit"
        .to_string()
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, settings: &Settings) {
    // Snapshot the shared playback state once per frame.
    let info: PlaybackInfo = app
        .playback_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|i| i.clone()))
        .unwrap_or_default();
    let bar_visible = info.track.is_some();

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(1)];
    if bar_visible {
        constraints.push(Constraint::Length(4));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tunedeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    match app.screen {
        Screen::Browse => draw_browse(frame, app, chunks[1]),
        Screen::Import => draw_import(frame, app, chunks[1]),
    }

    if bar_visible {
        draw_player_bar(frame, &info, chunks[2]);
    }

    let footer_text = match app.screen {
        Screen::Browse => browse_controls_text(settings.controls.scrub_percent),
        Screen::Import => import_controls_text(),
    };
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[chunks.len() - 1]);
}

fn has_embedded_art(thumbnail: &str) -> bool {
    thumbnail.starts_with("data:")
}

fn draw_browse(frame: &mut Frame, app: &App, area: Rect) {
    if app.store.is_empty() {
        let empty = Paragraph::new("No songs yet. Press [tab] to import one.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" collection "));
        frame.render_widget(empty, area);
        return;
    }

    match app.view_mode {
        ViewMode::Grid => draw_browse_grid(frame, app, area),
        ViewMode::List => draw_browse_list(frame, app, area),
    }
}

fn draw_browse_grid(frame: &mut Frame, app: &App, area: Rect) {
    let tracks = app.store.tracks();
    let columns = grid_columns(area.width);
    let card_w = (area.width / columns as u16).max(1);

    let total_rows = tracks.len().div_ceil(columns);
    let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);

    // Keep the selected card's row in view, roughly centered.
    let selected_row = app.selected / columns;
    let mut start_row = selected_row.saturating_sub(visible_rows / 2);
    if start_row + visible_rows > total_rows {
        start_row = total_rows.saturating_sub(visible_rows);
    }

    for (i, track) in tracks.iter().enumerate() {
        let row = i / columns;
        if row < start_row || row >= start_row + visible_rows {
            continue;
        }
        let col = i % columns;

        let x = area.x + col as u16 * card_w;
        let y = area.y + (row - start_row) as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.y + area.height || x + card_w > area.x + area.width {
            continue;
        }
        let cell = Rect {
            x,
            y,
            width: card_w,
            height: CARD_HEIGHT,
        };

        let art_line = if has_embedded_art(&track.thumbnail) {
            "◈ cover art"
        } else {
            "♪"
        };
        let body = format!("{art_line}\n{}", track.title);

        let mut block = Block::default().borders(Borders::ALL);
        if i == app.selected {
            block = block.border_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        let card = Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(card, cell);
    }
}

fn draw_browse_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .tracks()
        .iter()
        .map(|t| {
            let marker = if has_embedded_art(&t.thumbnail) {
                "◈"
            } else {
                "♪"
            };
            ListItem::new(format!("{marker} {}", t.title))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" collection "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if app.has_tracks() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_import(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let panel = &app.import;

    let status = if let Some(alert) = &panel.alert {
        alert.clone()
    } else {
        match panel.stage {
            ImportStage::Browsing => match &app.music_dir {
                Some(dir) => format!("Pick a song to import from {dir}"),
                None => "Pick a song to import".to_string(),
            },
            ImportStage::Extracting => format!(
                "Reading tags from {}...",
                panel.selected_file_name().unwrap_or("?")
            ),
            ImportStage::Ready => "Ready. [e] edits the title, [enter] uploads".to_string(),
            ImportStage::Submitting => format!("Uploading \"{}\"...", panel.title),
        }
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" import "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[0]);

    match panel.stage {
        ImportStage::Browsing => {
            let items: Vec<ListItem> = panel
                .files
                .iter()
                .map(|p| {
                    ListItem::new(
                        p.file_name()
                            .and_then(|s| s.to_str())
                            .unwrap_or("?")
                            .to_string(),
                    )
                })
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" files "))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ratatui::widgets::ListState::default();
            if !panel.files.is_empty() {
                state.select(Some(panel.picker_selected));
            }
            frame.render_stateful_widget(list, chunks[1], &mut state);
        }
        _ => {
            let file = panel.selected_file_name().unwrap_or("?");
            let title_line = if panel.editing {
                format!("Title: {}▏", panel.title)
            } else {
                format!("Title: {}", panel.title)
            };
            let cover_line = match panel.thumbnail.as_deref() {
                Some(t) if has_embedded_art(t) => "Cover: embedded art",
                Some(_) => "Cover: fallback image",
                None => "Cover: ...",
            };
            let detail = format!("File:  {file}\n{title_line}\n{cover_line}");
            let detail_par = Paragraph::new(detail)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" song ")
                        .padding(Padding {
                            left: 1,
                            right: 0,
                            top: 0,
                            bottom: 0,
                        }),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(detail_par, chunks[1]);
        }
    }
}

fn draw_player_bar(frame: &mut Frame, info: &PlaybackInfo, area: Rect) {
    let Some(track) = &info.track else {
        return;
    };

    let block = Block::default().borders(Borders::ALL).title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let marker = if has_embedded_art(&track.thumbnail) {
        "◈"
    } else {
        "♪"
    };
    let state = if info.playing { "Playing" } else { "Paused" };
    let title_line = Paragraph::new(format!(" {marker} {} — {state}", track.title));
    frame.render_widget(title_line, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(10),
            Constraint::Length(8),
        ])
        .split(rows[1]);

    let elapsed = Paragraph::new(format!(" {}", format_time(Some(info.elapsed.as_secs_f64()))));
    frame.render_widget(elapsed, cols[0]);

    let percent = info.progress_percent();
    let gauge = Gauge::default()
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{percent:.0}%"));
    frame.render_widget(gauge, cols[1]);

    let total = Paragraph::new(format!(
        " {}",
        format_time(info.duration.map(|d| d.as_secs_f64()))
    ));
    frame.render_widget(total, cols[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds_but_not_minutes() {
        assert_eq!(format_time(Some(0.0)), "0:00");
        assert_eq!(format_time(Some(65.0)), "1:05");
        assert_eq!(format_time(Some(59.9)), "0:59");
        assert_eq!(format_time(Some(600.0)), "10:00");
        assert_eq!(format_time(Some(3605.0)), "60:05");
    }

    #[test]
    fn format_time_reads_missing_or_invalid_input_as_zero() {
        assert_eq!(format_time(None), "0:00");
        assert_eq!(format_time(Some(f64::NAN)), "0:00");
        assert_eq!(format_time(Some(f64::INFINITY)), "0:00");
        assert_eq!(format_time(Some(-3.0)), "0:00");
    }

    #[test]
    fn grid_columns_scales_with_width_and_never_hits_zero() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(23), 1);
        assert_eq!(grid_columns(24), 1);
        assert_eq!(grid_columns(48), 2);
        assert_eq!(grid_columns(120), 5);
    }
}
