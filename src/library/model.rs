use std::fmt;
use std::path::PathBuf;

use uuid::Uuid;

/// Opaque identifier for a track, unique for the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    /// Mint a fresh id. Ids are random, so two tracks imported from the
    /// same file still get distinct identities.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One imported song. Records are immutable once appended to the store;
/// `path` stays playable only as long as the underlying file does.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub path: PathBuf,
    /// Cover art as a `data:` URI, or the configured fallback image URL.
    pub thumbnail: String,
    pub title: String,
}
