//! Embedded cover-art extraction.
//!
//! Tag parsing is delegated to `lofty`; anything that goes wrong while
//! probing a file collapses to "no art found". The import flow substitutes
//! its fallback image in that case, so extraction can never fail an import.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lofty::picture::PictureType;
use lofty::prelude::TaggedFileExt;

/// Raw embedded picture bytes plus their MIME type.
#[derive(Debug, Clone)]
pub struct CoverArt {
    pub mime: String,
    pub data: Vec<u8>,
}

/// Return the front cover (or, failing that, the first embedded picture)
/// of the audio file at `path`. Unreadable files yield `None`.
pub fn read_embedded_art(path: &Path) -> Option<CoverArt> {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            log::debug!("no readable tags in {}: {e}", path.display());
            return None;
        }
    };

    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;
    let picture = tag
        .pictures()
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| tag.pictures().first())?;

    let mime = picture
        .mime_type()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Some(CoverArt {
        mime,
        data: picture.data().to_vec(),
    })
}

/// Render picture bytes as a displayable `data:` URI.
pub fn data_uri(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}
