//! Playback module: the single output stream and its transport state.
//!
//! One audio thread owns the output stream for the whole session. The UI
//! talks to it through `PlayerCmd` messages and observes progress through
//! the shared `PlaybackHandle`.

mod controller;
mod sink;
mod thread;
mod types;

pub use controller::*;
pub use types::*;
