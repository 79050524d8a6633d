use serde::Deserialize;

/// Thumbnail used when a song has no embedded cover art (or extraction
/// failed). Overridable via `[import] fallback_thumbnail`.
pub const DEFAULT_FALLBACK_THUMBNAIL: &str =
    "https://i.pinimg.com/736x/26/30/35/263035ac32db539bde41ed51f766ea18.jpg";

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunedeck/config.toml` or
/// `~/.config/tunedeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNEDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub audio: AudioSettings,
    pub import: ImportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui: UiSettings::default(),
            controls: ControlsSettings::default(),
            audio: AudioSettings::default(),
            import: ImportSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "tunedeck" header box.
    pub header_text: String,

    /// Which layout the browse screen starts in.
    pub start_view: ViewModeSetting,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ your music, on deck ~ ".to_string(),
            start_view: ViewModeSetting::Grid,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewModeSetting {
    Grid,
    List,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Percentage of the track to scrub per `H` / `L` keypress.
    pub scrub_percent: f64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_percent: 5.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Directory the import picker lists files from. When unset, the first
    /// CLI argument wins, then the current directory.
    pub music_dir: Option<String>,

    /// File extensions the picker lists (case-insensitive, without dot).
    /// The `audio/*` MIME gate still applies when a file is chosen.
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while listing.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Synthetic delay applied on confirm, simulating upload latency.
    pub submit_delay_ms: u64,
    /// Image used when a song has no extractable cover art.
    pub fallback_thumbnail: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            music_dir: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            submit_delay_ms: 1500,
            fallback_thumbnail: DEFAULT_FALLBACK_THUMBNAIL.to_string(),
        }
    }
}
