use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tunedeck_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", "/tmp/tunedeck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tunedeck-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tunedeck")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tunedeck")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[ui]
header_text = "hello"
start_view = "list"

[controls]
scrub_percent = 2.5

[audio]
quit_fade_out_ms = 123

[import]
music_dir = "/srv/music"
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
max_depth = 3
submit_delay_ms = 10
fallback_thumbnail = "https://example.test/cover.png"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TUNEDECK__AUDIO__QUIT_FADE_OUT_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.header_text, "hello");
    assert!(matches!(s.ui.start_view, ViewModeSetting::List));
    assert_eq!(s.controls.scrub_percent, 2.5);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.import.music_dir.as_deref(), Some("/srv/music"));
    assert_eq!(s.import.extensions, vec!["mp3".to_string()]);
    assert!(!s.import.recursive);
    assert!(!s.import.include_hidden);
    assert!(!s.import.follow_links);
    assert_eq!(s.import.max_depth, Some(3));
    assert_eq!(s.import.submit_delay_ms, 10);
    assert_eq!(s.import.fallback_thumbnail, "https://example.test/cover.png");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[import]
submit_delay_ms = 1500
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TUNEDECK__IMPORT__SUBMIT_DELAY_MS", "0");

    let s = Settings::load().unwrap();
    assert_eq!(s.import.submit_delay_ms, 0);
}

#[test]
fn validate_rejects_out_of_range_scrub_percent() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.controls.scrub_percent = 0.0;
    assert!(s.validate().is_err());

    s.controls.scrub_percent = 150.0;
    assert!(s.validate().is_err());
}

#[test]
fn defaults_keep_the_stock_fallback_thumbnail() {
    let s = Settings::default();
    assert_eq!(s.import.fallback_thumbnail, DEFAULT_FALLBACK_THUMBNAIL);
    assert_eq!(s.import.submit_delay_ms, 1500);
}
