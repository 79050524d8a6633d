use crate::app::App;
use crate::mpris::MprisHandle;

/// Push the current playback snapshot to the MPRIS surface.
pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let info = app
        .playback_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|i| i.clone()));

    match info {
        Some(info) => mpris.set_now_playing(info.track.as_ref(), info.playing),
        None => mpris.set_now_playing(None, false),
    }
}
