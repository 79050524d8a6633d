//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the track store, the
//! active screen, the browse selection and the playback handle.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
