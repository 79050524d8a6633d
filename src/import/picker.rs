use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ImportSettings;

fn has_listed_extension(path: &Path, settings: &ImportSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect the candidate files below `dir` for the import picker, sorted by
/// file name. Listing goes by extension; the `audio/*` MIME gate is applied
/// later, when a file is actually chosen.
pub fn list_audio_files(dir: &Path, settings: &ImportSettings) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && has_listed_extension(path, settings)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort_by_key(|p| {
        p.file_name()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default()
    });
    files
}

/// MIME gate for the import flow: only `audio/*` files are accepted.
pub fn is_audio_mime(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.type_() == mime_guess::mime::AUDIO)
        .unwrap_or(false)
}
