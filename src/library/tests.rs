use std::path::PathBuf;

use tempfile::tempdir;

use super::*;

fn track(title: &str) -> Track {
    Track {
        id: TrackId::generate(),
        path: PathBuf::from(format!("/tmp/{title}.mp3")),
        thumbnail: "https://example.test/fallback.jpg".to_string(),
        title: title.to_string(),
    }
}

#[test]
fn append_preserves_insertion_order_and_length() {
    let mut store = TrackStore::new();
    for name in ["first", "second", "third"] {
        store.append(track(name));
    }

    assert_eq!(store.len(), 3);
    let titles: Vec<&str> = store.tracks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn generated_ids_are_unique() {
    let mut store = TrackStore::new();
    for _ in 0..50 {
        store.append(track("same-title"));
    }

    let mut ids: Vec<String> = store.tracks().iter().map(|t| t.id.to_string()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn empty_store_reads_as_empty() {
    let store = TrackStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.get(0).is_none());
}

#[test]
fn data_uri_encodes_mime_and_payload() {
    assert_eq!(
        data_uri("image/jpeg", b"abc"),
        "data:image/jpeg;base64,YWJj"
    );
    assert_eq!(data_uri("image/png", b""), "data:image/png;base64,");
}

#[test]
fn read_embedded_art_absorbs_unreadable_files() {
    let dir = tempdir().unwrap();
    let bogus = dir.path().join("not-really.mp3");
    std::fs::write(&bogus, b"this is not an mp3").unwrap();

    assert!(read_embedded_art(&bogus).is_none());
    assert!(read_embedded_art(&dir.path().join("missing.mp3")).is_none());
}
